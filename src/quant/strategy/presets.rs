//! Common one- and two-leg strategies.
//!
//! Spreads take the lower strike first. Every constructor validates its legs and the
//! strike ordering the strategy implies.
use crate::error::PayoffError;
use crate::error::Result;
use crate::quant::leg::Leg;
use crate::quant::strategy::Strategy;

fn ordered(lower: f64, upper: f64) -> Result<()> {
  if lower < upper {
    Ok(())
  } else {
    Err(PayoffError::invalid(
      "upper_strike",
      upper,
      "must be above the lower strike",
    ))
  }
}

pub fn long_call(strike: f64, premium: f64) -> Result<Strategy> {
  Ok(Strategy::new(vec![Leg::long_call(strike, premium)?]))
}

pub fn short_call(strike: f64, premium: f64) -> Result<Strategy> {
  Ok(Strategy::new(vec![Leg::short_call(strike, premium)?]))
}

pub fn long_put(strike: f64, premium: f64) -> Result<Strategy> {
  Ok(Strategy::new(vec![Leg::long_put(strike, premium)?]))
}

pub fn short_put(strike: f64, premium: f64) -> Result<Strategy> {
  Ok(Strategy::new(vec![Leg::short_put(strike, premium)?]))
}

/// Buy the lower-strike call, sell the upper-strike call.
pub fn bull_call_spread(
  lower_strike: f64,
  lower_premium: f64,
  upper_strike: f64,
  upper_premium: f64,
) -> Result<Strategy> {
  ordered(lower_strike, upper_strike)?;
  Ok(Strategy::new(vec![
    Leg::long_call(lower_strike, lower_premium)?,
    Leg::short_call(upper_strike, upper_premium)?,
  ]))
}

/// Sell the lower-strike call, buy the upper-strike call.
pub fn bear_call_spread(
  lower_strike: f64,
  lower_premium: f64,
  upper_strike: f64,
  upper_premium: f64,
) -> Result<Strategy> {
  ordered(lower_strike, upper_strike)?;
  Ok(Strategy::new(vec![
    Leg::short_call(lower_strike, lower_premium)?,
    Leg::long_call(upper_strike, upper_premium)?,
  ]))
}

/// Buy the lower-strike put, sell the upper-strike put.
pub fn bull_put_spread(
  lower_strike: f64,
  lower_premium: f64,
  upper_strike: f64,
  upper_premium: f64,
) -> Result<Strategy> {
  ordered(lower_strike, upper_strike)?;
  Ok(Strategy::new(vec![
    Leg::short_put(upper_strike, upper_premium)?,
    Leg::long_put(lower_strike, lower_premium)?,
  ]))
}

/// Sell the lower-strike put, buy the upper-strike put.
pub fn bear_put_spread(
  lower_strike: f64,
  lower_premium: f64,
  upper_strike: f64,
  upper_premium: f64,
) -> Result<Strategy> {
  ordered(lower_strike, upper_strike)?;
  Ok(Strategy::new(vec![
    Leg::long_put(upper_strike, upper_premium)?,
    Leg::short_put(lower_strike, lower_premium)?,
  ]))
}

pub fn long_straddle(strike: f64, call_premium: f64, put_premium: f64) -> Result<Strategy> {
  Ok(Strategy::new(vec![
    Leg::long_call(strike, call_premium)?,
    Leg::long_put(strike, put_premium)?,
  ]))
}

pub fn short_straddle(strike: f64, call_premium: f64, put_premium: f64) -> Result<Strategy> {
  Ok(Strategy::new(vec![
    Leg::short_call(strike, call_premium)?,
    Leg::short_put(strike, put_premium)?,
  ]))
}

/// Long put below, long call above.
pub fn long_strangle(
  put_strike: f64,
  put_premium: f64,
  call_strike: f64,
  call_premium: f64,
) -> Result<Strategy> {
  ordered(put_strike, call_strike)?;
  Ok(Strategy::new(vec![
    Leg::long_call(call_strike, call_premium)?,
    Leg::long_put(put_strike, put_premium)?,
  ]))
}

/// Short put below, short call above.
pub fn short_strangle(
  put_strike: f64,
  put_premium: f64,
  call_strike: f64,
  call_premium: f64,
) -> Result<Strategy> {
  ordered(put_strike, call_strike)?;
  Ok(Strategy::new(vec![
    Leg::short_call(call_strike, call_premium)?,
    Leg::short_put(put_strike, put_premium)?,
  ]))
}
