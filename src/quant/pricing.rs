//! # Pricing
//!
//! $$
//! V_0=\mathbb E^{\mathbb Q}\!\left[e^{-rT}\,\Pi(S_T)\right]
//! $$
//!
use crate::error::ensure_non_negative;
use crate::error::ensure_positive;
use crate::error::Result;

pub mod bsm;

pub use bsm::black_scholes_price;

/// Market inputs shared by every leg priced off the same underlying.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketParameters {
  /// Underlying price
  pub spot: f64,
  /// Time to maturity in years
  pub tau: f64,
  /// Annualized volatility
  pub volatility: f64,
  /// Risk-free rate
  pub risk_free_rate: f64,
}

impl MarketParameters {
  pub fn new(spot: f64, tau: f64, volatility: f64, risk_free_rate: f64) -> Result<Self> {
    Ok(Self {
      spot: ensure_positive("spot", spot)?,
      tau: ensure_non_negative("tau", tau)?,
      volatility: ensure_non_negative("volatility", volatility)?,
      risk_free_rate: ensure_non_negative("risk_free_rate", risk_free_rate)?,
    })
  }

  /// Inputs in the units a trading screen shows: days to expiry and percentages.
  pub fn from_quote(spot: f64, days: f64, vol_pct: f64, rate_pct: f64) -> Result<Self> {
    Self::new(spot, days / 365.0, vol_pct / 100.0, rate_pct / 100.0)
  }
}
