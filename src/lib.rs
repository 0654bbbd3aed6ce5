//! # option-payoff
//!
//! Payoff analysis for option strategies and theoretical European premiums.
//!
//! | Module     | Description                                                              |
//! |------------|--------------------------------------------------------------------------|
//! | [`quant`]  | Legs, strategies (exact break-evens and extrema, payoff curves), pricing. |
//! | [`stats`]  | Standard normal CDF approximation used by the pricer.                    |
//! | [`traits`] | Payoff and pricer contracts.                                             |
//! | [`error`]  | Parameter validation errors.                                             |
//!
pub mod error;
pub mod quant;
pub mod stats;
pub mod traits;

pub use error::PayoffError;
pub use quant::leg::evaluate_leg;
pub use quant::leg::Leg;
pub use quant::pricing::black_scholes_price;
pub use quant::pricing::MarketParameters;
pub use quant::strategy::BreakEven;
pub use quant::strategy::Extremum;
pub use quant::strategy::Strategy;
pub use quant::OptionType;
pub use quant::Position;
