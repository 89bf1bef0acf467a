//! New-year gift screen: open a box, get a random movie.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::metadata::MediaItem;

/// Minimum time the reveal animation runs, even if the lookup is faster
pub const REVEAL_DURATION: Duration = Duration::from_secs(2);

pub const GIFT_MOVIES: [u64; 30] = [
    508442, 508947, 568124, 438631, 634649, 76600, 505642, 315162, 502356, 447365, 569094,
    346698, 872585, 940551, 1022789, 533535, 519182, 748783, 1011985, 150540, 585511, 614930,
    1022796, 787699, 940721, 693134, 823464, 1096197, 1072790, 1011316,
];

pub fn pick_gift<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    *GIFT_MOVIES.choose(rng).unwrap_or(&GIFT_MOVIES[0])
}

#[derive(Debug, Clone, PartialEq)]
pub enum GiftPhase {
    Closed,
    Revealing {
        movie_id: u64,
        since: Instant,
        outcome: Option<Result<MediaItem, String>>,
    },
    Revealed(MediaItem),
    Failed(String),
}

#[derive(Debug)]
pub struct GiftBox {
    phase: GiftPhase,
}

impl Default for GiftBox {
    fn default() -> Self {
        Self {
            phase: GiftPhase::Closed,
        }
    }
}

impl GiftBox {
    pub fn phase(&self) -> &GiftPhase {
        &self.phase
    }

    pub fn is_revealing(&self) -> bool {
        matches!(self.phase, GiftPhase::Revealing { .. })
    }

    /// Start a reveal. Returns the movie id to look up, or `None` when a
    /// reveal is already running.
    pub fn open<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> Option<u64> {
        if self.is_revealing() {
            return None;
        }
        let movie_id = pick_gift(rng);
        self.phase = GiftPhase::Revealing {
            movie_id,
            since: now,
            outcome: None,
        };
        Some(movie_id)
    }

    /// Store the lookup result; it shows once the animation has run its
    /// course. Results for another movie are ignored.
    pub fn resolve(&mut self, id: u64, result: Result<MediaItem, String>) {
        if let GiftPhase::Revealing {
            movie_id, outcome, ..
        } = &mut self.phase
        {
            if *movie_id == id && outcome.is_none() {
                *outcome = Some(result);
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let GiftPhase::Revealing { since, outcome, .. } = &mut self.phase else {
            return;
        };
        if now.duration_since(*since) < REVEAL_DURATION {
            return;
        }
        if let Some(result) = outcome.take() {
            self.phase = match result {
                Ok(movie) => GiftPhase::Revealed(movie),
                Err(e) => GiftPhase::Failed(e),
            };
        }
    }

    pub fn close(&mut self) {
        self.phase = GiftPhase::Closed;
    }
}
