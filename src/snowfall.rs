use std::f32::consts::TAU;

use chrono::{Datelike, NaiveDateTime};
use rand::Rng;

use crate::config::SnowfallMode;

pub const DEFAULT_FLAKES: usize = 80;

/// Dec 24 00:00 through Jan 2 23:59:59, any year
pub fn is_new_year_period(now: NaiveDateTime) -> bool {
    match now.month() {
        12 => now.day() >= 24,
        1 => now.day() <= 2,
        _ => false,
    }
}

pub fn should_snow(mode: SnowfallMode, now: NaiveDateTime) -> bool {
    match mode {
        SnowfallMode::Auto => is_new_year_period(now),
        SnowfallMode::Always => true,
        SnowfallMode::Never => false,
    }
}

/// Positions are in terminal cells, speeds in cells per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed_y: f32,
    pub speed_x: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Snowflake {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, y: f32) -> Self {
        Self {
            x: rng.random::<f32>() * width,
            y,
            size: 1.5 + rng.random::<f32>() * 3.0,
            speed_y: 0.1 + rng.random::<f32>() * 0.3,
            speed_x: (rng.random::<f32>() - 0.5) * 0.1,
            rotation: rng.random::<f32>() * TAU,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.2,
        }
    }

    /// Glyph by flake size
    pub fn glyph(&self) -> char {
        if self.size >= 3.5 {
            '❄'
        } else if self.size >= 2.5 {
            '*'
        } else {
            '·'
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snowfall {
    flakes: Vec<Snowflake>,
    width: u16,
    height: u16,
}

impl Snowfall {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, count: usize, width: u16, height: u16) -> Self {
        let (w, h) = (width as f32, height as f32);
        let flakes = (0..count)
            .map(|_| {
                let y = rng.random::<f32>() * h;
                Snowflake::spawn(rng, w, y)
            })
            .collect();
        Self {
            flakes,
            width,
            height,
        }
    }

    #[cfg(test)]
    fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    /// Rescale flake positions to a new area
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        let sx = width as f32 / self.width.max(1) as f32;
        let sy = height as f32 / self.height.max(1) as f32;
        for flake in &mut self.flakes {
            flake.x *= sx;
            flake.y *= sy;
        }
        self.width = width;
        self.height = height;
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (w, h) = (self.width as f32, self.height as f32);
        for flake in &mut self.flakes {
            let y = flake.y + flake.speed_y;
            if y > h + 1.0 {
                *flake = Snowflake::spawn(rng, w, -1.0);
                continue;
            }

            let mut x = flake.x + flake.speed_x + flake.rotation.sin() * 0.05;
            if x > w + 1.0 {
                x = -1.0;
            } else if x < -1.0 {
                x = w + 1.0;
            }

            flake.x = x;
            flake.y = y;
            flake.rotation += flake.rotation_speed;
        }
    }

    /// Cells currently covered by a flake
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16, char)> + '_ {
        self.flakes.iter().filter_map(move |f| {
            if f.x < 0.0 || f.y < 0.0 {
                return None;
            }
            let (x, y) = (f.x as u16, f.y as u16);
            (x < self.width && y < self.height).then_some((x, y, f.glyph()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_new_year_window() {
        assert!(!is_new_year_period(at(2025, 12, 23, 23, 59, 59)));
        assert!(is_new_year_period(at(2025, 12, 24, 0, 0, 0)));
        assert!(is_new_year_period(at(2025, 12, 31, 12, 0, 0)));
        assert!(is_new_year_period(at(2026, 1, 1, 0, 0, 0)));
        assert!(is_new_year_period(at(2026, 1, 2, 23, 59, 59)));
        assert!(!is_new_year_period(at(2026, 1, 3, 0, 0, 0)));
        assert!(!is_new_year_period(at(2026, 7, 4, 12, 0, 0)));
    }

    #[test]
    fn test_modes() {
        let summer = at(2026, 7, 4, 12, 0, 0);
        assert!(!should_snow(SnowfallMode::Auto, summer));
        assert!(should_snow(SnowfallMode::Always, summer));
        assert!(!should_snow(SnowfallMode::Never, at(2025, 12, 25, 0, 0, 0)));
    }

    #[test]
    fn test_flakes_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut snow = Snowfall::new(&mut rng, DEFAULT_FLAKES, 40, 12);
        assert_eq!(snow.flakes().len(), DEFAULT_FLAKES);

        for _ in 0..500 {
            snow.step(&mut rng);
            for f in snow.flakes() {
                assert!(f.y >= -1.0 && f.y <= 13.0 + 1.0, "y out of range: {}", f.y);
                assert!(f.x >= -1.0 && f.x <= 41.0, "x out of range: {}", f.x);
            }
            for (x, y, _) in snow.cells() {
                assert!(x < 40 && y < 12);
            }
        }
        assert_eq!(snow.flakes().len(), DEFAULT_FLAKES);
    }

    #[test]
    fn test_flake_respawns_at_top() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut snow = Snowfall::new(&mut rng, 1, 10, 5);
        snow.flakes[0].y = 6.5;
        snow.flakes[0].speed_y = 0.3;

        snow.step(&mut rng);
        assert_eq!(snow.flakes()[0].y, -1.0);
    }

    #[test]
    fn test_resize_scales_positions() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut snow = Snowfall::new(&mut rng, 1, 10, 10);
        snow.flakes[0].x = 5.0;
        snow.flakes[0].y = 5.0;

        snow.resize(20, 40);
        assert_eq!(snow.flakes()[0].x, 10.0);
        assert_eq!(snow.flakes()[0].y, 20.0);
    }
}
