use impl_new_derive::ImplNew;
use ndarray::Array1;

use crate::error::ensure_non_negative;
use crate::error::PayoffError;
use crate::error::Result;
use crate::quant::strategy::Strategy;
use crate::traits::PayoffExt;

/// Upper bound on the number of samples a single curve may produce.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Price domain sampled by a payoff curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveConfig {
  pub price_min: f64,
  pub price_max: f64,
  pub step: f64,
}

impl Default for CurveConfig {
  fn default() -> Self {
    Self::around_spot(100.0)
  }
}

impl CurveConfig {
  pub fn new(price_min: f64, price_max: f64, step: f64) -> Result<Self> {
    if !price_min.is_finite() {
      return Err(PayoffError::invalid("price_min", price_min, "must be finite"));
    }
    if !price_max.is_finite() {
      return Err(PayoffError::invalid("price_max", price_max, "must be finite"));
    }
    if price_max < price_min {
      return Err(PayoffError::invalid(
        "price_max",
        price_max,
        "must not be below price_min",
      ));
    }
    if !step.is_finite() || step <= 0.0 {
      return Err(PayoffError::invalid("step", step, "must be positive and finite"));
    }
    if grid_len(price_min, price_max, step) > MAX_SAMPLES as f64 {
      return Err(PayoffError::invalid("step", step, "too fine for the price range"));
    }
    Ok(Self {
      price_min,
      price_max,
      step,
    })
  }

  /// `[0, 2 * spot]` in unit steps.
  pub fn around_spot(spot: f64) -> Self {
    Self {
      price_min: 0.0,
      price_max: 2.0 * spot.abs(),
      step: 1.0,
    }
  }

  /// Number of samples the domain produces.
  pub fn sample_count(&self) -> usize {
    grid_len(self.price_min, self.price_max, self.step) as usize
  }

  /// Reject domains starting below zero, where payoffs have no economic meaning.
  pub fn non_negative(self) -> Result<Self> {
    ensure_non_negative("price_min", self.price_min)?;
    Ok(self)
  }
}

fn grid_len(price_min: f64, price_max: f64, step: f64) -> f64 {
  // Tolerate rounding so that `max` itself is sampled when it lies on the grid.
  ((price_max - price_min) / step + 1e-9).floor() + 1.0
}

/// A single payoff sample.
#[derive(ImplNew, Clone, Debug, PartialEq)]
pub struct CurvePoint {
  pub price: f64,
  pub total: f64,
  /// Per-leg P&L in leg order
  pub per_leg: Vec<f64>,
}

/// Lazy payoff samples; clone to restart from the first price.
#[derive(Clone, Debug)]
pub struct PayoffCurve<'a> {
  strategy: &'a Strategy,
  config: CurveConfig,
  index: usize,
  len: usize,
}

impl<'a> PayoffCurve<'a> {
  pub fn new(strategy: &'a Strategy, config: CurveConfig) -> Result<Self> {
    let config = CurveConfig::new(config.price_min, config.price_max, config.step)?;
    Ok(Self {
      strategy,
      config,
      index: 0,
      len: config.sample_count(),
    })
  }

  pub fn config(&self) -> CurveConfig {
    self.config
  }

  /// Fresh iterator over the same domain.
  pub fn restart(&self) -> Self {
    Self {
      index: 0,
      ..self.clone()
    }
  }

  /// Remaining prices and totals as arrays, for plotting or further numerics.
  pub fn into_arrays(self) -> (Array1<f64>, Array1<f64>) {
    let (prices, totals): (Vec<f64>, Vec<f64>) = self.map(|pt| (pt.price, pt.total)).unzip();
    (Array1::from(prices), Array1::from(totals))
  }
}

impl Iterator for PayoffCurve<'_> {
  type Item = CurvePoint;

  fn next(&mut self) -> Option<Self::Item> {
    if self.index >= self.len {
      return None;
    }
    // Multiply rather than accumulate so long curves do not drift.
    let price = (self.config.price_min + self.index as f64 * self.config.step)
      .min(self.config.price_max);
    self.index += 1;

    let per_leg = self.strategy.leg_payoffs(price);
    let total = self.strategy.payoff(price);
    Some(CurvePoint::new(price, total, per_leg))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let rest = self.len - self.index;
    (rest, Some(rest))
  }
}

impl ExactSizeIterator for PayoffCurve<'_> {}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::quant::leg::Leg;

  fn spread() -> Strategy {
    Strategy::new(vec![
      Leg::long_call(100.0, 7.0).unwrap(),
      Leg::short_call(110.0, 4.0).unwrap(),
    ])
  }

  #[test]
  fn samples_inclusive_domain() {
    let s = spread();
    let curve = s.payoff_curve(90.0, 120.0, 5.0).unwrap();
    assert_eq!(curve.len(), 7);
    let points = curve.collect::<Vec<_>>();
    assert_eq!(points.first().unwrap().price, 90.0);
    assert_eq!(points.last().unwrap().price, 120.0);
    for pt in &points {
      assert_abs_diff_eq!(pt.total, pt.per_leg.iter().sum::<f64>(), epsilon = 1e-12);
      assert_eq!(pt.per_leg.len(), 2);
    }
    assert_abs_diff_eq!(points[3].total, 2.0);
  }

  #[test]
  fn curve_is_restartable() {
    let s = spread();
    let mut curve = s.payoff_curve(0.0, 10.0, 0.1).unwrap();
    let again = curve.restart();
    curve.next();
    curve.next();
    assert_eq!(curve.len(), 99);
    assert_eq!(again.len(), 101);
    assert_eq!(again.clone().count(), 101);
    assert_eq!(again.count(), 101);
  }

  #[test]
  fn single_point_domain() {
    let s = spread();
    let points = s.payoff_curve(105.0, 105.0, 1.0).unwrap().collect::<Vec<_>>();
    assert_eq!(points.len(), 1);
    assert_abs_diff_eq!(points[0].total, 2.0);
  }

  #[test]
  fn rejects_bad_domains() {
    let s = spread();
    assert!(s.payoff_curve(10.0, 0.0, 1.0).is_err());
    assert!(s.payoff_curve(0.0, 10.0, 0.0).is_err());
    assert!(s.payoff_curve(0.0, f64::INFINITY, 1.0).is_err());
    assert!(CurveConfig::new(-5.0, 5.0, 1.0).unwrap().non_negative().is_err());
  }

  #[test]
  fn last_sample_stays_inside_domain() {
    let s = spread();
    let prices = s
      .payoff_curve(0.0, 0.3, 0.1)
      .unwrap()
      .map(|pt| pt.price)
      .collect::<Vec<_>>();
    assert_eq!(prices.len(), 4);
    assert_eq!(*prices.last().unwrap(), 0.3);
    assert!(prices.iter().all(|&p| p <= 0.3));
  }

  #[test]
  fn rejects_oversized_grids() {
    let s = spread();
    assert!(matches!(
      s.payoff_curve(0.0, 1e30, 1e-5),
      Err(PayoffError::InvalidParameter { name: "step", .. })
    ));
    let at_cap = CurveConfig::new(0.0, (MAX_SAMPLES - 1) as f64, 1.0).unwrap();
    assert_eq!(at_cap.sample_count(), MAX_SAMPLES);
    assert!(CurveConfig::new(0.0, MAX_SAMPLES as f64, 1.0).is_err());
    let unchecked = CurveConfig {
      price_min: 0.0,
      price_max: 1e30,
      step: 1e-5,
    };
    assert_eq!(unchecked.sample_count(), usize::MAX);
  }

  #[test]
  fn default_domain_spans_twice_spot() {
    let cfg = CurveConfig::around_spot(105.0);
    assert_eq!(cfg.sample_count(), 211);
    assert_eq!(CurveConfig::default().price_max, 200.0);
  }

  #[test]
  fn arrays_line_up() {
    let s = spread();
    let (prices, totals) = s.payoff_curve(100.0, 110.0, 1.0).unwrap().into_arrays();
    assert_eq!(prices.len(), 11);
    assert_eq!(totals.len(), 11);
    assert_abs_diff_eq!(totals[10], 7.0);
  }
}
