//! Crate-wide error type.
//!
//! The physics core itself is total and never fails; errors only come from
//! building a scenario (bad parameters, impossible placement) or loading one
//! from disk.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid body or scenario parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Random placement could not find a non-overlapping spot.
    #[error("placement failed: {0}")]
    Placement(String),

    /// Malformed scenario YAML.
    #[error("scenario config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius 5 outside [10, 30]".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn yaml_errors_convert() {
        let bad: std::result::Result<u32, _> = serde_yaml::from_str("[not, a, number]");
        let e: Error = bad.unwrap_err().into();
        assert!(e.to_string().starts_with("scenario config"));
    }
}
