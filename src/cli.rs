use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, StarfieldConfig};

/// A starfield that drifts downward and scatters in the pointer's wake
#[derive(Parser, Debug)]
#[command()]
pub struct Args {
    /// JSON file with starfield options (`particleCount`, `influenceRadius`, ...)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of stars
    #[arg(short, long)]
    pub particles: Option<u32>,

    /// Pointer distance, in pixels, under which stars catch the wind
    #[arg(long)]
    pub influence_radius: Option<f32>,

    /// Multiplier applied to the pointer displacement
    #[arg(long)]
    pub wind_factor: Option<f32>,

    /// Per frame velocity multiplier
    #[arg(long)]
    pub friction: Option<f32>,

    /// Constant downward acceleration per frame
    #[arg(short, long, allow_negative_numbers = true)]
    pub gravity: Option<f32>,

    /// Seed for star placement, random if unset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cap the refresh rate
    ///
    /// if unset the field advances once per presented frame
    #[arg(short, long)]
    pub framerate: Option<u32>,
}

impl Args {
    /// Defaults, then the config file, then command line overrides
    pub fn resolve_config(&self) -> Result<StarfieldConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => StarfieldConfig::load(path)?,
            None => StarfieldConfig::default(),
        };

        if let Some(particles) = self.particles {
            config.particle_count = particles;
        }
        if let Some(influence_radius) = self.influence_radius {
            config.influence_radius = influence_radius;
        }
        if let Some(wind_factor) = self.wind_factor {
            config.wind_factor = wind_factor;
        }
        if let Some(friction) = self.friction {
            config.friction = friction;
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn no_arguments_resolve_to_defaults() {
        let args = Args::parse_from(["starfield"]);
        assert_eq!(args.resolve_config().unwrap(), StarfieldConfig::default());
        assert_eq!(args.framerate, None);
    }

    #[test]
    fn flags_override_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "particleCount": 40, "friction": 0.9 }}"#).unwrap();

        let path = file.path().to_str().unwrap();

        let args = Args::parse_from([
            "starfield",
            "--config",
            path,
            "--friction",
            "0.5",
            "--gravity",
            "-0.01",
        ]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.particle_count, 40);
        assert_eq!(config.friction, 0.5);
        assert_eq!(config.gravity, -0.01);
    }

    #[test]
    fn invalid_override_is_reported() {
        let args = Args::parse_from(["starfield", "--friction", "2"]);
        assert!(matches!(
            args.resolve_config(),
            Err(ConfigError::Invalid {
                field: "friction",
                ..
            })
        ));
    }
}
