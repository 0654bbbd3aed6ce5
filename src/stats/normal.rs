//! # Standard normal
//!
//! $$
//! \Phi(x)\approx 1-\varphi(x)\,(b_1t+b_2t^2+b_3t^3+b_4t^4+b_5t^5),\qquad t=\frac{1}{1+px}
//! $$
//!
//! Abramowitz & Stegun 26.2.17, absolute error below $7.5\times10^{-8}$.
//!
use std::f64::consts::PI;

const P: f64 = 0.231_641_9;
const B1: f64 = 0.319_381_530;
const B2: f64 = -0.356_563_782;
const B3: f64 = 1.781_477_937;
const B4: f64 = -1.821_255_978;
const B5: f64 = 1.330_274_429;

/// Standard normal density.
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
  (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution function.
///
/// The tail is evaluated on `|x|` and reflected, so `norm_cdf(-x) == 1.0 - norm_cdf(x)`
/// up to one rounding step. NaN propagates.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
  if x.is_nan() {
    return f64::NAN;
  }

  let a = x.abs();
  let t = 1.0 / (1.0 + P * a);
  let poly = t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
  let tail = norm_pdf(a) * poly;

  if x >= 0.0 {
    1.0 - tail
  } else {
    tail
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use statrs::distribution::ContinuousCDF;
  use statrs::distribution::Normal;

  use super::*;

  #[test]
  fn cdf_at_zero_is_one_half() {
    assert_abs_diff_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-7);
  }

  #[test]
  fn cdf_is_symmetric() {
    for i in 0..=100 {
      let x = -5.0 + 0.1 * i as f64;
      assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 7.5e-8);
    }
  }

  #[test]
  fn cdf_matches_reference_distribution() {
    let n = Normal::new(0.0, 1.0).unwrap();
    for i in 0..=160 {
      let x = -8.0 + 0.1 * i as f64;
      assert_abs_diff_eq!(norm_cdf(x), n.cdf(x), epsilon = 7.5e-8);
    }
  }

  #[test]
  fn cdf_limits_and_nan() {
    assert_eq!(norm_cdf(f64::INFINITY), 1.0);
    assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    assert!(norm_cdf(f64::NAN).is_nan());
  }

  #[test]
  fn pdf_peak() {
    assert_abs_diff_eq!(norm_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
  }
}
