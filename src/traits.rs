//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:\text{inputs}\to\text{payoffs/prices}
//! $$
//!
use crate::error::Result;

/// Profit/loss at expiry as a function of the underlying price.
pub trait PayoffExt {
  /// P&L at underlying price `p`.
  fn payoff(&self, p: f64) -> f64;

  /// Slope of the payoff just below and just above `p`.
  fn slopes_at(&self, p: f64) -> (f64, f64);

  /// Evaluate on a slice of prices.
  fn payoff_many(&self, prices: &[f64]) -> Vec<f64> {
    prices.iter().map(|&p| self.payoff(p)).collect()
  }
}

/// Pricer trait.
pub trait PricerExt: TimeExt {
  /// Calculate the call and put price.
  fn calculate_call_put(&self) -> Result<(f64, f64)>;

  /// Calculate the price.
  fn calculate_price(&self) -> Result<f64>;
}

pub trait TimeExt {
  fn tau(&self) -> Option<f64>;

  fn eval(&self) -> Option<chrono::NaiveDate> {
    None
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    None
  }

  /// Return tau directly, or compute it from eval/expiration dates (ACT/365).
  fn tau_or_from_dates(&self) -> Option<f64> {
    if let Some(tau) = self.tau() {
      return Some(tau);
    }
    match (self.eval(), self.expiration()) {
      (Some(e), Some(x)) => Some(x.signed_duration_since(e).num_days() as f64 / 365.0),
      _ => None,
    }
  }

  /// Calculate tau in days.
  fn calculate_tau_in_days(&self) -> Option<f64> {
    self.tau_or_from_dates().map(|tau| tau * 365.0)
  }

  /// Calculate tau in years.
  fn calculate_tau_in_years(&self) -> Option<f64> {
    self.tau_or_from_dates()
  }
}
