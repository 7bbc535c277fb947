/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be a non-zero direction")]
    ZeroDirection { field: &'static str },
}

/// Check that `value` is strictly positive and finite.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Check that `value` is zero or positive and finite.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn direction(field: &'static str, value: glam::Vec3) -> Result<(), ConfigError> {
    if value.length_squared() > f32::EPSILON && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ZeroDirection { field })
    }
}
