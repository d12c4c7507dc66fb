use crate::costing::{DEFAULT_SIGMA, DEFAULT_SIGMA_AZIMUTH};
use crate::matching::ConfigError;

use dotenv::dotenv;
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// The parameters of the [`Matcher`](crate::matching::Matcher).
///
/// May be read from the environment (and a `.env` file), see
/// [`MatcherConfig::from_env`], or deserialized from any `serde`
/// format. Missing fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Standard deviation of the positional error, in meters.
    pub sigma: f64,

    /// Standard deviation of the heading error, in degrees.
    pub sigma_azimuth: f64,

    /// The rate of the transition distribution, where zero
    /// adapts the distribution to the time between samples.
    pub lambda: f64,

    /// The radius around a sample to search for candidates, in meters.
    pub max_radius: f64,

    /// The furthest a transition may route, in meters.
    pub max_distance: f64,

    /// The most candidates proposed for a sample.
    pub max_candidates: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            sigma_azimuth: DEFAULT_SIGMA_AZIMUTH,
            lambda: 0.0,
            max_radius: 100.0,
            max_distance: 15_000.0,
            max_candidates: 8,
        }
    }
}

impl MatcherConfig {
    pub const SIGMA: &'static str = "MATCHER_SIGMA";
    pub const SIGMA_AZIMUTH: &'static str = "MATCHER_SIGMA_AZIMUTH";
    pub const LAMBDA: &'static str = "MATCHER_LAMBDA";
    pub const MAX_RADIUS: &'static str = "MATCHER_MAX_RADIUS";
    pub const MAX_DISTANCE: &'static str = "MATCHER_MAX_DISTANCE";
    pub const MAX_CANDIDATES: &'static str = "MATCHER_MAX_CANDIDATES";

    pub fn with_sigma(self, sigma: f64) -> Self {
        Self { sigma, ..self }
    }

    pub fn with_sigma_azimuth(self, sigma_azimuth: f64) -> Self {
        Self {
            sigma_azimuth,
            ..self
        }
    }

    pub fn with_lambda(self, lambda: f64) -> Self {
        Self { lambda, ..self }
    }

    pub fn with_max_radius(self, max_radius: f64) -> Self {
        Self { max_radius, ..self }
    }

    pub fn with_max_distance(self, max_distance: f64) -> Self {
        Self {
            max_distance,
            ..self
        }
    }

    pub fn with_max_candidates(self, max_candidates: usize) -> Self {
        Self {
            max_candidates,
            ..self
        }
    }

    /// Returns the configuration if every parameter is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.sigma > 0.0 && self.sigma.is_finite()) {
            return Err(ConfigError::InvalidSigma(self.sigma));
        }

        if !(self.sigma_azimuth > 0.0 && self.sigma_azimuth.is_finite()) {
            return Err(ConfigError::InvalidAzimuthSigma(self.sigma_azimuth));
        }

        if !(self.lambda >= 0.0 && self.lambda.is_finite()) {
            return Err(ConfigError::InvalidLambda(self.lambda));
        }

        if !(self.max_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.max_radius));
        }

        if !(self.max_distance > 0.0) {
            return Err(ConfigError::InvalidDistance(self.max_distance));
        }

        if self.max_candidates == 0 {
            return Err(ConfigError::NoCandidates);
        }

        Ok(self)
    }

    /// Reads the configuration from the environment, loading a `.env`
    /// file if one is present. Unset variables take their defaults.
    ///
    /// | Variable                 | Field            |
    /// |--------------------------|------------------|
    /// | `MATCHER_SIGMA`          | `sigma`          |
    /// | `MATCHER_SIGMA_AZIMUTH`  | `sigma_azimuth`  |
    /// | `MATCHER_LAMBDA`         | `lambda`         |
    /// | `MATCHER_MAX_RADIUS`     | `max_radius`     |
    /// | `MATCHER_MAX_DISTANCE`   | `max_distance`   |
    /// | `MATCHER_MAX_CANDIDATES` | `max_candidates` |
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv().is_ok() {
            debug!("Loaded environment from .env");
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads the configuration from the variables given by `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Self {
            sigma: read(&lookup, Self::SIGMA)?.unwrap_or(defaults.sigma),
            sigma_azimuth: read(&lookup, Self::SIGMA_AZIMUTH)?.unwrap_or(defaults.sigma_azimuth),
            lambda: read(&lookup, Self::LAMBDA)?.unwrap_or(defaults.lambda),
            max_radius: read(&lookup, Self::MAX_RADIUS)?.unwrap_or(defaults.max_radius),
            max_distance: read(&lookup, Self::MAX_DISTANCE)?.unwrap_or(defaults.max_distance),
            max_candidates: read(&lookup, Self::MAX_CANDIDATES)?
                .unwrap_or(defaults.max_candidates),
        }
        .validate()
    }
}

fn read<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Unparsable { key, value })
}
