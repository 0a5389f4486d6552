//! Game tuning and preferences
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! settings file only needs the values it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    /// Constant ball speed (pixels per tick)
    pub ball_speed: f32,
    pub ball_radius: f32,

    // === Paddle ===
    /// Paddle width as a fraction of the viewport width
    pub paddle_width_fraction: f32,
    pub paddle_height: f32,
    /// Pixels moved per tick while a direction is held
    pub paddle_step: f32,
    /// Impact-offset to dx factor on paddle hits
    pub steering_coefficient: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_padding: f32,
    pub brick_height: f32,
    pub brick_offset_top: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED,
            ball_radius: BALL_RADIUS,

            paddle_width_fraction: PADDLE_WIDTH_FRACTION,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            steering_coefficient: STEERING_COEFFICIENT,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_padding: BRICK_PADDING,
            brick_height: BRICK_HEIGHT,
            brick_offset_top: BRICK_OFFSET_TOP,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(|source| GameError::Parse {
            context: "settings".to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> GameResult<()> {
        let positive = [
            ("ball_speed", self.ball_speed),
            ("ball_radius", self.ball_radius),
            ("paddle_width_fraction", self.paddle_width_fraction),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("brick_height", self.brick_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidSetting {
                    name,
                    value,
                    expected: "(0, inf)",
                });
            }
        }

        if self.paddle_width_fraction > 1.0 {
            return Err(GameError::InvalidSetting {
                name: "paddle_width_fraction",
                value: self.paddle_width_fraction,
                expected: "(0, 1]",
            });
        }

        let non_negative = [
            ("steering_coefficient", self.steering_coefficient),
            ("brick_padding", self.brick_padding),
            ("brick_offset_top", self.brick_offset_top),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::InvalidSetting {
                    name,
                    value,
                    expected: "[0, inf)",
                });
            }
        }

        if self.brick_rows == 0 {
            return Err(GameError::InvalidSetting {
                name: "brick_rows",
                value: 0.0,
                expected: "[1, inf)",
            });
        }
        if self.brick_cols == 0 {
            return Err(GameError::InvalidSetting {
                name: "brick_cols",
                value: 0.0,
                expected: "[1, inf)",
            });
        }
        match self.brick_rows.checked_mul(self.brick_cols) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => {
                return Err(GameError::InvalidSetting {
                    name: "brick_rows * brick_cols",
                    value: self.brick_rows as f32 * self.brick_cols as f32,
                    expected: "[1, 10000]",
                });
            }
        }

        Ok(())
    }

    /// Highest reachable score (one point per brick)
    pub fn max_score(&self) -> u64 {
        self.brick_rows.saturating_mul(self.brick_cols) as u64
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            context: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brickfall_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.ball_speed, 6.0);
        assert_eq!(settings.paddle_step, 7.0);
        assert_eq!(settings.steering_coefficient, 0.2);
        assert_eq!(settings.max_score(), 24);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "ball_speed": 9.0, "brick_rows": 2 }"#).unwrap();
        assert_eq!(settings.ball_speed, 9.0);
        assert_eq!(settings.brick_rows, 2);
        assert_eq!(settings.brick_cols, BRICK_COLS);
        assert_eq!(settings.paddle_height, PADDLE_HEIGHT);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let err = Settings::from_json(r#"{ "ball_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidSetting {
                name: "ball_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = Settings::from_json(r#"{ "brick_cols": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidSetting {
                name: "brick_cols",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        // Product overflows usize
        let err = Settings::from_json(r#"{ "brick_rows": 4294967296, "brick_cols": 4294967296 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidSetting {
                name: "brick_rows * brick_cols",
                ..
            }
        ));

        // Fits in usize but far too many bricks to allocate
        let err = Settings::from_json(r#"{ "brick_rows": 100000, "brick_cols": 100000 }"#)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidSetting { .. }));

        let settings = Settings::from_json(r#"{ "brick_rows": 100, "brick_cols": 100 }"#).unwrap();
        assert_eq!(settings.max_score(), 10_000);
    }

    #[test]
    fn test_max_score_saturates_when_unvalidated() {
        let settings = Settings {
            brick_rows: usize::MAX,
            brick_cols: 2,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
        assert_eq!(settings.max_score(), usize::MAX as u64);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ ball_speed: ").unwrap_err();
        assert!(matches!(err, GameError::Parse { .. }));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_missing_file() {
        let err = Settings::load_from(std::path::Path::new("/nonexistent/brickfall.json"))
            .unwrap_err();
        assert!(matches!(err, GameError::Io { .. }));
    }
}
