//! # Leg
//!
//! $$
//! \Pi(p)=\pm\left(\max(\omega(p-K),0)-c\right),\qquad \omega=\begin{cases}+1&\text{call}\\-1&\text{put}\end{cases}
//! $$
//!
use std::fmt::Display;

use crate::error::ensure_non_negative;
use crate::error::ensure_positive;
use crate::error::Result;
use crate::quant::Moneyness;
use crate::quant::OptionType;
use crate::quant::Position;
use crate::traits::PayoffExt;

/// A single option position held to expiry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
  option_type: OptionType,
  position: Position,
  /// Strike price
  strike: f64,
  /// Premium paid (long) or received (short)
  premium: f64,
}

impl Leg {
  pub fn new(
    option_type: OptionType,
    position: Position,
    strike: f64,
    premium: f64,
  ) -> Result<Self> {
    Ok(Self {
      option_type,
      position,
      strike: ensure_positive("strike", strike)?,
      premium: ensure_non_negative("premium", premium)?,
    })
  }

  pub fn long_call(strike: f64, premium: f64) -> Result<Self> {
    Self::new(OptionType::Call, Position::Long, strike, premium)
  }

  pub fn short_call(strike: f64, premium: f64) -> Result<Self> {
    Self::new(OptionType::Call, Position::Short, strike, premium)
  }

  pub fn long_put(strike: f64, premium: f64) -> Result<Self> {
    Self::new(OptionType::Put, Position::Long, strike, premium)
  }

  pub fn short_put(strike: f64, premium: f64) -> Result<Self> {
    Self::new(OptionType::Put, Position::Short, strike, premium)
  }

  pub fn option_type(&self) -> OptionType {
    self.option_type
  }

  pub fn position(&self) -> Position {
    self.position
  }

  pub fn strike(&self) -> f64 {
    self.strike
  }

  pub fn premium(&self) -> f64 {
    self.premium
  }

  /// Same leg with a different premium.
  pub fn with_premium(&self, premium: f64) -> Result<Self> {
    Self::new(self.option_type, self.position, self.strike, premium)
  }

  /// Opposite side of the same contract.
  pub fn flipped(&self) -> Self {
    let position = match self.position {
      Position::Long => Position::Short,
      Position::Short => Position::Long,
    };
    Self { position, ..*self }
  }

  /// Cash exchanged when the position is opened: negative for a debit, positive for a credit.
  pub fn cash_flow(&self) -> f64 {
    -self.position.sign() * self.premium
  }

  /// Exercise value of the contract at `p`, ignoring premium and side.
  #[inline]
  pub fn intrinsic(&self, p: f64) -> f64 {
    match self.option_type {
      OptionType::Call => (p - self.strike).max(0.0),
      OptionType::Put => (self.strike - p).max(0.0),
    }
  }

  /// Slope of the payoff for prices below the strike.
  pub fn slope_below(&self) -> f64 {
    match self.option_type {
      OptionType::Call => 0.0,
      OptionType::Put => -self.position.sign(),
    }
  }

  /// Slope of the payoff for prices above the strike.
  pub fn slope_above(&self) -> f64 {
    match self.option_type {
      OptionType::Call => self.position.sign(),
      OptionType::Put => 0.0,
    }
  }

  pub fn moneyness(&self, spot: f64) -> Moneyness {
    Moneyness::classify(self.option_type, self.strike, spot)
  }
}

impl PayoffExt for Leg {
  #[inline]
  fn payoff(&self, p: f64) -> f64 {
    self.position.sign() * (self.intrinsic(p) - self.premium)
  }

  fn slopes_at(&self, p: f64) -> (f64, f64) {
    if p < self.strike {
      (self.slope_below(), self.slope_below())
    } else if p > self.strike {
      (self.slope_above(), self.slope_above())
    } else {
      (self.slope_below(), self.slope_above())
    }
  }
}

impl Display for Leg {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} {} K={:.2} @ {:.2}",
      self.position, self.option_type, self.strike, self.premium
    )
  }
}

/// P&L of `leg` at expiry for underlying price `price`.
#[inline]
pub fn evaluate_leg(leg: &Leg, price: f64) -> f64 {
  leg.payoff(price)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::error::PayoffError;

  #[test]
  fn four_payoff_formulas() {
    let lc = Leg::long_call(100.0, 5.0).unwrap();
    let sc = Leg::short_call(100.0, 5.0).unwrap();
    let lp = Leg::long_put(100.0, 5.0).unwrap();
    let sp = Leg::short_put(100.0, 5.0).unwrap();

    for p in [0.0, 50.0, 95.0, 100.0, 105.0, 130.0] {
      assert_abs_diff_eq!(lc.payoff(p), (-5.0_f64).max(p - 100.0 - 5.0));
      assert_abs_diff_eq!(sc.payoff(p), 5.0_f64.min(5.0 - (p - 100.0)));
      assert_abs_diff_eq!(lp.payoff(p), (-5.0_f64).max(100.0 - p - 5.0));
      assert_abs_diff_eq!(sp.payoff(p), 5.0_f64.min(5.0 - (100.0 - p)));
    }
  }

  #[test]
  fn long_short_symmetry() {
    for &option_type in &[OptionType::Call, OptionType::Put] {
      for &(strike, premium) in &[(100.0, 5.0), (42.5, 0.0), (7.0, 3.25)] {
        let long = Leg::new(option_type, Position::Long, strike, premium).unwrap();
        let short = long.flipped();
        for i in 0..=40 {
          let p = i as f64 * 5.0;
          assert_eq!(evaluate_leg(&long, p), -evaluate_leg(&short, p));
        }
      }
    }
  }

  #[test]
  fn slopes_follow_formulas() {
    let lc = Leg::long_call(100.0, 1.0).unwrap();
    let sp = Leg::short_put(100.0, 1.0).unwrap();
    assert_eq!(lc.slopes_at(90.0), (0.0, 0.0));
    assert_eq!(lc.slopes_at(100.0), (0.0, 1.0));
    assert_eq!(lc.slopes_at(110.0), (1.0, 1.0));
    assert_eq!(sp.slopes_at(100.0), (1.0, 0.0));
    assert_eq!(Leg::long_put(1.0, 0.0).unwrap().slope_below(), -1.0);
    assert_eq!(Leg::short_call(1.0, 0.0).unwrap().slope_above(), -1.0);
  }

  #[test]
  fn validation_fails_fast() {
    assert!(matches!(
      Leg::long_call(0.0, 1.0),
      Err(PayoffError::InvalidParameter { name: "strike", .. })
    ));
    assert!(matches!(
      Leg::short_put(100.0, -0.5),
      Err(PayoffError::InvalidParameter {
        name: "premium",
        ..
      })
    ));
    assert!(Leg::long_put(f64::INFINITY, 1.0).is_err());
  }

  #[test]
  fn with_premium_returns_new_leg() {
    let leg = Leg::short_call(100.0, 0.0).unwrap();
    let priced = leg.with_premium(2.5).unwrap();
    assert_eq!(leg.premium(), 0.0);
    assert_eq!(priced.premium(), 2.5);
    assert_eq!(priced.strike(), 100.0);
    assert_eq!(priced.cash_flow(), 2.5);
    assert_eq!(priced.flipped().cash_flow(), -2.5);
  }

  #[test]
  fn moneyness_and_batch_evaluation() {
    let lp = Leg::long_put(100.0, 2.0).unwrap();
    assert_eq!(lp.moneyness(90.0), Moneyness::InTheMoney);
    assert_eq!(lp.payoff_many(&[90.0, 100.0, 110.0]), vec![8.0, -2.0, -2.0]);
    assert_eq!(lp.to_string(), "long put K=100.00 @ 2.00");
  }

  #[test]
  fn negative_price_is_accepted() {
    let lp = Leg::long_put(10.0, 1.0).unwrap();
    assert_abs_diff_eq!(lp.payoff(-5.0), 14.0);
  }
}
