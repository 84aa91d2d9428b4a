use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::patterns::Seed;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;
use crate::viewport::ScaleLimits;

pub const USAGE: &str = "\
usage: sparselife [options]

options:
  --rule <rule>       life rule, e.g. B3/S23 (default)
  --pattern <name>    start from a built-in pattern instead of a random soup
  --seed <n>          seed for the random soup
  --scale <s>         initial screen units per cell (default 10)
  --sps <n>           generations per second (default 10)
  --log <path>        write logs to <path>, filtered by RUST_LOG
  --help              print this message";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing value for {flag}")]
    MissingValue { flag: String },

    #[error("Unknown flag \"{flag}\"")]
    UnknownFlag { flag: String },

    #[error("Invalid number \"{got}\" for {flag}")]
    InvalidNumber { flag: String, got: String },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("{name} is out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },
}

/// Tunables of the viewer
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rule: RuleSet,
    pub seed: Seed,

    /// Screen units per cell when the viewer starts
    pub initial_scale: f64,
    pub scale_limits: ScaleLimits,

    /// Screen units panned per tick while a direction is held
    pub pan_speed: f64,

    /// Zoom factor per tick while a zoom key is held
    pub key_zoom_factor: f64,

    /// Zoom factor per wheel notch
    pub wheel_zoom_factor: f64,

    pub steps_per_second: f64,

    pub log_file: Option<PathBuf>,

    /// Set by `--help`
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: RuleSet::default(),
            seed: Seed::default(),
            initial_scale: 10.0,
            scale_limits: ScaleLimits::default(),
            pan_speed: 4.0,
            key_zoom_factor: 1.05,
            wheel_zoom_factor: 1.1,
            steps_per_second: 10.0,
            log_file: None,
            help: false,
        }
    }
}

fn value<I: Iterator<Item = String>>(flag: &str, args: &mut I) -> Result<String, ConfigError> {
    args.next().ok_or_else(|| ConfigError::MissingValue {
        flag: flag.to_string(),
    })
}

fn number<T: FromStr, I: Iterator<Item = String>>(
    flag: &str,
    args: &mut I,
) -> Result<T, ConfigError> {
    let got = value(flag, args)?;

    got.parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        got,
    })
}

impl Config {
    /// Build a config from command line arguments, not including the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--rule" => config.rule = value(&flag, &mut args)?.parse()?,
                "--pattern" => {
                    config.seed = Seed::Preset {
                        name: value(&flag, &mut args)?,
                    }
                }
                "--seed" => {
                    config.seed = Seed::Soup {
                        seed: Some(number(&flag, &mut args)?),
                    }
                }
                "--scale" => config.initial_scale = number(&flag, &mut args)?,
                "--sps" => config.steps_per_second = number(&flag, &mut args)?,
                "--log" => config.log_file = Some(value(&flag, &mut args)?.into()),
                "-h" | "--help" => config.help = true,
                _ => return Err(ConfigError::UnknownFlag { flag }),
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = self.scale_limits;
        if !limits.is_valid() {
            return Err(ConfigError::OutOfRange {
                name: "scale limits",
                reason: format!(
                    "need finite 0 < min <= max, got {} and {}",
                    limits.min, limits.max
                ),
            });
        }

        if !limits.contains(self.initial_scale) {
            return Err(ConfigError::OutOfRange {
                name: "scale",
                reason: format!(
                    "{} is outside [{}, {}]",
                    self.initial_scale, limits.min, limits.max
                ),
            });
        }

        for (name, factor) in [
            ("key zoom factor", self.key_zoom_factor),
            ("wheel zoom factor", self.wheel_zoom_factor),
        ] {
            if !(factor.is_finite() && factor > 1.0) {
                return Err(ConfigError::OutOfRange {
                    name,
                    reason: format!("must be greater than 1, got {factor}"),
                });
            }
        }

        if !(self.steps_per_second.is_finite() && self.steps_per_second > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "steps per second",
                reason: format!("must be positive, got {}", self.steps_per_second),
            });
        }

        Ok(())
    }
}
