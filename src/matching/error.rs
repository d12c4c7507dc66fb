use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sigma must be positive and finite, got {0}")]
    InvalidSigma(f64),

    #[error("azimuth sigma must be positive and finite, got {0}")]
    InvalidAzimuthSigma(f64),

    #[error("lambda must be non-negative and finite, got {0}")]
    InvalidLambda(f64),

    #[error("maximum radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("maximum distance must be positive, got {0}")]
    InvalidDistance(f64),

    #[error("at least one candidate must be permitted per sample")]
    NoCandidates,

    #[error("could not parse {key}={value}")]
    Unparsable { key: &'static str, value: String },
}
