//! Starfield configuration, loaded from JSON and overridden from the command line

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StarfieldConfig {
    pub particle_count: u32,
    /// Pointer distance (in pixels) under which a star catches the wind
    pub influence_radius: f32,
    pub wind_factor: f32,
    /// Per tick velocity multiplier, `1.0` keeps momentum forever
    pub friction: f32,
    pub gravity: f32,

    pub max_radius: f32,
    pub max_speed: f32,
    pub color: [f32; 4],
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            influence_radius: 50.0,
            wind_factor: 0.05,
            friction: 0.98,
            gravity: 0.005,

            max_radius: 2.0,
            max_speed: 0.5,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl StarfieldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params().validate()?;

        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(invalid("maxRadius", "must be a finite, non-negative number"));
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(invalid("maxSpeed", "must be a finite, non-negative number"));
        }
        if self.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(invalid("color", "channels must be within 0..=1"));
        }

        Ok(())
    }

    pub fn params(&self) -> FieldParams {
        FieldParams {
            influence_radius: self.influence_radius,
            wind_factor: self.wind_factor,
            friction: self.friction,
            gravity: self.gravity,
        }
    }
}

/// The constants read by every particle update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub influence_radius: f32,
    pub wind_factor: f32,
    pub friction: f32,
    pub gravity: f32,
}

impl FieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.influence_radius.is_finite() || self.influence_radius < 0.0 {
            return Err(invalid(
                "influenceRadius",
                "must be a finite, non-negative number",
            ));
        }
        if !self.wind_factor.is_finite() {
            return Err(invalid("windFactor", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(invalid("friction", "must be within 0..=1"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", "must be finite"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = StarfieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.influence_radius, 50.0);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "particleCount": 250, "gravity": 0.01 }}"#).unwrap();

        let config = StarfieldConfig::load(file.path()).unwrap();
        assert_eq!(config.particle_count, 250);
        assert_eq!(config.gravity, 0.01);
        assert_eq!(config.friction, StarfieldConfig::default().friction);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "particleCount": 10, "turbulence": 3 }}"#).unwrap();

        assert!(matches!(
            StarfieldConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StarfieldConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn friction_above_one_is_rejected() {
        let config = StarfieldConfig {
            friction: 1.5,
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "friction"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn zero_particles_is_valid() {
        let config = StarfieldConfig {
            particle_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_ranges_are_rejected() {
        let config = StarfieldConfig {
            max_radius: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StarfieldConfig {
            influence_radius: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
