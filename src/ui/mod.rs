pub mod card;
pub mod details;
pub mod gift;
pub mod home;
pub mod language;
pub mod snow;
pub mod widgets;

pub use details::render_details_view;
pub use gift::render_gift_view;
pub use home::{HomeView, render_home_view};
pub use language::render_language_picker;
pub use snow::SnowLayer;
