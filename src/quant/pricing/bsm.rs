//! # Black-Scholes
//!
//! $$
//! C=S\,\Phi(d_1)-Ke^{-r\tau}\Phi(d_2),\qquad P=Ke^{-r\tau}\Phi(-d_2)-S\,\Phi(-d_1)
//! $$
//!
//! $$
//! d_1=\frac{\ln(S/K)+(r+\tfrac12\sigma^2)\tau}{\sigma\sqrt\tau},\qquad d_2=d_1-\sigma\sqrt\tau
//! $$
//!
use tracing::debug;

use crate::error::ensure_non_negative;
use crate::error::ensure_positive;
use crate::error::PayoffError;
use crate::error::Result;
use crate::quant::pricing::MarketParameters;
use crate::quant::OptionType;
use crate::stats::normal::norm_cdf;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

/// European option pricer.
#[derive(Clone, Copy, Debug)]
pub struct BSMPricer {
  /// Underlying price
  pub s: f64,
  /// Volatility
  pub v: f64,
  /// Strike price
  pub k: f64,
  /// Risk-free rate
  pub r: f64,
  /// Time to maturity in years
  pub tau: Option<f64>,
  /// Evaluation date
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date
  pub expiration: Option<chrono::NaiveDate>,
  /// Option type
  pub option_type: OptionType,
}

impl BSMPricer {
  pub fn new(
    s: f64,
    v: f64,
    k: f64,
    r: f64,
    tau: Option<f64>,
    eval: Option<chrono::NaiveDate>,
    expiration: Option<chrono::NaiveDate>,
    option_type: OptionType,
  ) -> Self {
    Self {
      s,
      v,
      k,
      r,
      tau,
      eval,
      expiration,
      option_type,
    }
  }

  pub fn builder(s: f64, v: f64, k: f64, r: f64) -> BSMPricerBuilder {
    BSMPricerBuilder {
      s,
      v,
      k,
      r,
      tau: None,
      eval: None,
      expiration: None,
      option_type: OptionType::Call,
    }
  }

  /// Pricer for one strike off shared market inputs.
  pub fn from_market(market: &MarketParameters, k: f64, option_type: OptionType) -> Self {
    Self::builder(market.spot, market.volatility, k, market.risk_free_rate)
      .tau(market.tau)
      .option_type(option_type)
      .build()
  }
}

pub struct BSMPricerBuilder {
  s: f64,
  v: f64,
  k: f64,
  r: f64,
  tau: Option<f64>,
  eval: Option<chrono::NaiveDate>,
  expiration: Option<chrono::NaiveDate>,
  option_type: OptionType,
}

impl BSMPricerBuilder {
  pub fn tau(mut self, tau: f64) -> Self {
    self.tau = Some(tau);
    self
  }
  pub fn eval(mut self, eval: chrono::NaiveDate) -> Self {
    self.eval = Some(eval);
    self
  }
  pub fn expiration(mut self, expiration: chrono::NaiveDate) -> Self {
    self.expiration = Some(expiration);
    self
  }
  pub fn option_type(mut self, option_type: OptionType) -> Self {
    self.option_type = option_type;
    self
  }
  pub fn build(self) -> BSMPricer {
    BSMPricer {
      s: self.s,
      v: self.v,
      k: self.k,
      r: self.r,
      tau: self.tau,
      eval: self.eval,
      expiration: self.expiration,
      option_type: self.option_type,
    }
  }
}

impl PricerExt for BSMPricer {
  fn calculate_call_put(&self) -> Result<(f64, f64)> {
    let tau = self.checked_tau()?;
    let s = ensure_positive("spot", self.s)?;
    let k = ensure_positive("strike", self.k)?;
    let v = ensure_non_negative("volatility", self.v)?;
    let r = ensure_non_negative("risk_free_rate", self.r)?;

    if tau == 0.0 {
      debug!(s, k, "expired option, pricing at intrinsic value");
      return Ok(((s - k).max(0.0), (k - s).max(0.0)));
    }

    let df_k = k * (-r * tau).exp();
    if v == 0.0 {
      debug!(s, k, tau, "zero volatility, pricing at discounted intrinsic value");
      return Ok(((s - df_k).max(0.0), (df_k - s).max(0.0)));
    }

    let (d1, d2) = d1_d2(s, k, r, v, tau);
    let call = s * norm_cdf(d1) - df_k * norm_cdf(d2);
    let put = df_k * norm_cdf(-d2) - s * norm_cdf(-d1);

    Ok((call, put))
  }

  fn calculate_price(&self) -> Result<f64> {
    let (call, put) = self.calculate_call_put()?;
    Ok(match self.option_type {
      OptionType::Call => call,
      OptionType::Put => put,
    })
  }
}

impl TimeExt for BSMPricer {
  fn tau(&self) -> Option<f64> {
    self.tau
  }

  fn eval(&self) -> Option<chrono::NaiveDate> {
    self.eval
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    self.expiration
  }
}

impl BSMPricer {
  fn checked_tau(&self) -> Result<f64> {
    let tau = self
      .calculate_tau_in_years()
      .ok_or_else(|| PayoffError::invalid("tau", f64::NAN, "set tau or both eval and expiration"))?;
    ensure_non_negative("tau", tau)
  }

  /// Calculate d1 and d2; only meaningful for positive tau and volatility.
  pub fn d1_d2(&self) -> Result<(f64, f64)> {
    let tau = self.checked_tau()?;
    Ok(d1_d2(self.s, self.k, self.r, self.v, tau))
  }
}

fn d1_d2(s: f64, k: f64, r: f64, v: f64, tau: f64) -> (f64, f64) {
  let vol_sqrt_t = v * tau.sqrt();
  let d1 = ((s / k).ln() + (r + 0.5 * v.powi(2)) * tau) / vol_sqrt_t;
  (d1, d1 - vol_sqrt_t)
}

/// Theoretical European premium.
pub fn black_scholes_price(
  option_type: OptionType,
  spot: f64,
  strike: f64,
  t: f64,
  vol: f64,
  r: f64,
) -> Result<f64> {
  BSMPricer::builder(spot, vol, strike, r)
    .tau(t)
    .option_type(option_type)
    .build()
    .calculate_price()
}
