use std::fmt::Display;

pub mod leg;
pub mod pricing;
pub mod strategy;

/// Option type.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OptionType {
  #[default]
  Call,
  Put,
}

impl Display for OptionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OptionType::Call => write!(f, "call"),
      OptionType::Put => write!(f, "put"),
    }
  }
}

/// Side of a position.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Position {
  /// Bought; premium is paid.
  #[default]
  Long,
  /// Sold; premium is received.
  Short,
}

impl Position {
  /// +1 for long, -1 for short.
  #[inline]
  pub fn sign(self) -> f64 {
    match self {
      Position::Long => 1.0,
      Position::Short => -1.0,
    }
  }
}

impl Display for Position {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Position::Long => write!(f, "long"),
      Position::Short => write!(f, "short"),
    }
  }
}

/// Moneyness.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Moneyness {
  #[default]
  DeepInTheMoney,
  InTheMoney,
  AtTheMoney,
  OutOfTheMoney,
  DeepOutOfTheMoney,
}

impl Moneyness {
  /// Relative distance from the strike inside which an option counts as at the money.
  pub const ATM_BAND: f64 = 0.01;
  /// Relative distance beyond which an option counts as deep in/out of the money.
  pub const DEEP_BAND: f64 = 0.10;

  /// Classify an option of `option_type` and `strike` against `spot`.
  pub fn classify(option_type: OptionType, strike: f64, spot: f64) -> Self {
    let m = match option_type {
      OptionType::Call => (spot - strike) / strike,
      OptionType::Put => (strike - spot) / strike,
    };

    if m.abs() <= Self::ATM_BAND {
      Moneyness::AtTheMoney
    } else if m > Self::DEEP_BAND {
      Moneyness::DeepInTheMoney
    } else if m > 0.0 {
      Moneyness::InTheMoney
    } else if m < -Self::DEEP_BAND {
      Moneyness::DeepOutOfTheMoney
    } else {
      Moneyness::OutOfTheMoney
    }
  }
}

impl Display for Moneyness {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Moneyness::DeepInTheMoney => write!(f, "Deep in the money"),
      Moneyness::InTheMoney => write!(f, "In the money"),
      Moneyness::AtTheMoney => write!(f, "At the money"),
      Moneyness::OutOfTheMoney => write!(f, "Out of the money"),
      Moneyness::DeepOutOfTheMoney => write!(f, "Deep out of the money"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn moneyness_of_calls_and_puts() {
    assert_eq!(
      Moneyness::classify(OptionType::Call, 100.0, 100.5),
      Moneyness::AtTheMoney
    );
    assert_eq!(
      Moneyness::classify(OptionType::Call, 100.0, 105.0),
      Moneyness::InTheMoney
    );
    assert_eq!(
      Moneyness::classify(OptionType::Call, 100.0, 120.0),
      Moneyness::DeepInTheMoney
    );
    assert_eq!(
      Moneyness::classify(OptionType::Put, 100.0, 105.0),
      Moneyness::OutOfTheMoney
    );
    assert_eq!(
      Moneyness::classify(OptionType::Put, 100.0, 120.0),
      Moneyness::DeepOutOfTheMoney
    );
  }

  #[test]
  fn position_sign() {
    assert_eq!(Position::Long.sign(), 1.0);
    assert_eq!(Position::Short.sign(), -1.0);
  }
}
