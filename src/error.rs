//! # Errors
//!
//! Every entry point either returns a well-defined number or rejects its input up front.
//! Non-finite intermediate results (overflow, NaN) are values, not errors.
//!
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayoffError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoffError {
  /// A parameter outside its admissible range.
  #[error("invalid parameter `{name}` = {value}: {reason}")]
  InvalidParameter {
    name: &'static str,
    value: f64,
    reason: &'static str,
  },
}

impl PayoffError {
  pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
    Self::InvalidParameter {
      name,
      value,
      reason,
    }
  }

  /// Name of the rejected parameter.
  pub fn parameter(&self) -> &'static str {
    match self {
      Self::InvalidParameter { name, .. } => name,
    }
  }
}

/// Reject non-finite or non-positive values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
  if !value.is_finite() {
    return Err(PayoffError::invalid(name, value, "must be finite"));
  }
  if value <= 0.0 {
    return Err(PayoffError::invalid(name, value, "must be positive"));
  }
  Ok(value)
}

/// Reject non-finite or negative values.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
  if !value.is_finite() {
    return Err(PayoffError::invalid(name, value, "must be finite"));
  }
  if value < 0.0 {
    return Err(PayoffError::invalid(name, value, "must not be negative"));
  }
  Ok(value)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positive_check_rejects_zero_and_nan() {
    assert!(ensure_positive("strike", 0.0).is_err());
    assert!(ensure_positive("strike", -1.0).is_err());
    assert!(ensure_positive("strike", f64::NAN).is_err());
    assert_eq!(ensure_positive("strike", 1.5), Ok(1.5));
  }

  #[test]
  fn non_negative_check_accepts_zero() {
    assert_eq!(ensure_non_negative("premium", 0.0), Ok(0.0));
    let err = ensure_non_negative("premium", -0.01).unwrap_err();
    assert_eq!(err.parameter(), "premium");
    assert!(err.to_string().contains("must not be negative"));
  }
}
