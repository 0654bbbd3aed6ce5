//! # Strategy
//!
//! $$
//! \Pi(p)=\sum_{i=1}^N \Pi_i(p),\qquad \Pi\big|_{[s_j,s_{j+1}]}(p)=a_j\,p+b_j
//! $$
//!
//! Piecewise-linear aggregate of option legs. Break-evens and extrema are solved
//! segment by segment on the kinks (distinct strikes); nothing here samples.
//!
use std::fmt::Display;

use rayon::prelude::*;
use tracing::debug;
use tracing::trace;

use crate::error::Result;
use crate::quant::leg::Leg;
use crate::quant::pricing::bsm::BSMPricer;
use crate::quant::pricing::MarketParameters;
use crate::traits::PayoffExt;
use crate::traits::PricerExt;

pub mod curve;
pub mod presets;

pub use curve::CurveConfig;
pub use curve::CurvePoint;
pub use curve::PayoffCurve;

/// Relative tolerance for treating a payoff value as zero and merging nearby roots.
const REL_EPS: f64 = 1e-9;

/// Maximum profit or maximum loss of a strategy.
///
/// Losses are signed: a finite maximum loss is `<= 0` for any strategy that can lose money.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extremum {
  Finite(f64),
  /// Grows without bound as the underlying rises.
  Unbounded,
}

impl Extremum {
  pub fn is_unbounded(&self) -> bool {
    matches!(self, Extremum::Unbounded)
  }

  pub fn finite(&self) -> Option<f64> {
    match self {
      Extremum::Finite(v) => Some(*v),
      Extremum::Unbounded => None,
    }
  }

  /// Absolute size for display; infinite when unbounded.
  pub fn magnitude(&self) -> f64 {
    match self {
      Extremum::Finite(v) => v.abs(),
      Extremum::Unbounded => f64::INFINITY,
    }
  }
}

impl Display for Extremum {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Extremum::Finite(v) => write!(f, "{v:.2}"),
      Extremum::Unbounded => write!(f, "unbounded"),
    }
  }
}

/// Price or price range where the strategy neither gains nor loses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BreakEven {
  Point(f64),
  /// Flat zero-payoff segment; `upper` may be infinite.
  Band { lower: f64, upper: f64 },
}

impl BreakEven {
  fn lower(&self) -> f64 {
    match self {
      BreakEven::Point(p) => *p,
      BreakEven::Band { lower, .. } => *lower,
    }
  }

  pub fn contains(&self, p: f64) -> bool {
    match self {
      BreakEven::Point(x) => (p - x).abs() <= REL_EPS * x.abs().max(1.0),
      BreakEven::Band { lower, upper } => p >= *lower && p <= *upper,
    }
  }
}

impl Display for BreakEven {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BreakEven::Point(p) => write!(f, "{p:.2}"),
      BreakEven::Band { lower, upper } => write!(f, "[{lower:.2}, {upper:.2}]"),
    }
  }
}

/// All analytic metrics of one strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategySummary {
  /// Net entry cash flow: positive for a credit, negative for a debit.
  pub net_premium: f64,
  pub max_profit: Extremum,
  pub max_loss: Extremum,
  pub break_evens: Vec<BreakEven>,
}

/// One affine piece `slope * p + intercept` valid on `[lower, upper]`.
#[derive(Clone, Copy, Debug)]
struct Segment {
  lower: f64,
  upper: f64,
  slope: f64,
  /// Value at `lower`
  value: f64,
}

/// An ordered set of legs analyzed as one position.
///
/// Prices are taken on `[0, ∞)`; the lowest segment starts at zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strategy {
  legs: Vec<Leg>,
}

impl Strategy {
  pub fn new(legs: Vec<Leg>) -> Self {
    debug!(legs = legs.len(), "building strategy");
    Self { legs }
  }

  pub fn legs(&self) -> &[Leg] {
    &self.legs
  }

  pub fn is_empty(&self) -> bool {
    self.legs.is_empty()
  }

  /// Copy of this strategy with `leg` appended.
  pub fn with_leg(&self, leg: Leg) -> Self {
    let mut legs = self.legs.clone();
    legs.push(leg);
    Self::new(legs)
  }

  /// Distinct strikes, ascending.
  pub fn strikes(&self) -> Vec<f64> {
    let mut strikes = self.legs.iter().map(Leg::strike).collect::<Vec<_>>();
    strikes.sort_by(f64::total_cmp);
    strikes.dedup();
    strikes
  }

  /// Net cash flow at entry: positive for a credit, negative for a debit.
  pub fn net_premium(&self) -> f64 {
    self.legs.iter().map(Leg::cash_flow).sum()
  }

  /// P&L of every leg at `p`, in leg order.
  pub fn leg_payoffs(&self, p: f64) -> Vec<f64> {
    self.legs.iter().map(|leg| leg.payoff(p)).collect()
  }

  fn zero_tol(&self) -> f64 {
    let scale = self
      .legs
      .iter()
      .map(|l| l.strike().max(l.premium()))
      .fold(1.0, f64::max);
    REL_EPS * scale
  }

  /// Affine pieces between consecutive kinks, starting at price zero.
  fn segments(&self) -> Vec<Segment> {
    let strikes = self.strikes();
    let Some(&first) = strikes.first() else {
      return vec![];
    };

    let mut segments = Vec::with_capacity(strikes.len() + 1);
    segments.push(Segment {
      lower: 0.0,
      upper: first,
      slope: self.slopes_at(first).0,
      value: self.payoff(0.0),
    });
    for (i, &k) in strikes.iter().enumerate() {
      segments.push(Segment {
        lower: k,
        upper: strikes.get(i + 1).copied().unwrap_or(f64::INFINITY),
        slope: self.slopes_at(k).1,
        value: self.payoff(k),
      });
    }

    trace!(?segments, "payoff segments");
    segments
  }

  /// Every price where total payoff is zero, ascending.
  pub fn break_evens(&self) -> Vec<BreakEven> {
    let tol = self.zero_tol();
    let mut found: Vec<BreakEven> = Vec::new();

    for seg in self.segments() {
      if seg.slope == 0.0 {
        if seg.value.abs() <= tol {
          push_band(&mut found, seg.lower, seg.upper);
        }
        continue;
      }

      let root = seg.lower - seg.value / seg.slope;
      let slack = REL_EPS * root.abs().max(1.0);
      if root >= seg.lower - slack && root <= seg.upper + slack {
        push_point(&mut found, root.clamp(seg.lower, seg.upper));
      }
    }

    found.sort_by(|a, b| a.lower().total_cmp(&b.lower()));
    debug!(count = found.len(), "break-evens");
    found
  }

  /// Break-even points only, with bands reduced to their finite bounds.
  pub fn break_even_points(&self) -> Vec<f64> {
    let mut points = Vec::new();
    for be in self.break_evens() {
      match be {
        BreakEven::Point(p) => points.push(p),
        BreakEven::Band { lower, upper } => {
          points.push(lower);
          if upper.is_finite() {
            points.push(upper);
          }
        }
      }
    }
    points
  }

  /// Slope of the last segment, i.e. as the underlying rises without bound.
  fn terminal_slope(&self) -> f64 {
    self.segments().last().map_or(0.0, |s| s.slope)
  }

  /// Payoff at zero and at every kink; the finite extremes are among them.
  fn kink_values(&self) -> impl Iterator<Item = f64> + '_ {
    std::iter::once(0.0)
      .chain(self.strikes())
      .map(|p| self.payoff(p))
  }

  pub fn max_profit(&self) -> Extremum {
    if self.terminal_slope() > 0.0 {
      return Extremum::Unbounded;
    }
    Extremum::Finite(self.kink_values().fold(f64::NEG_INFINITY, f64::max))
  }

  /// Signed maximum loss (`<= 0` whenever the strategy can lose).
  pub fn max_loss(&self) -> Extremum {
    if self.terminal_slope() < 0.0 {
      return Extremum::Unbounded;
    }
    Extremum::Finite(self.kink_values().fold(f64::INFINITY, f64::min))
  }

  pub fn summary(&self) -> StrategySummary {
    StrategySummary {
      net_premium: self.net_premium(),
      max_profit: self.max_profit(),
      max_loss: self.max_loss(),
      break_evens: self.break_evens(),
    }
  }

  /// Lazy payoff samples over `[price_min, price_max]`.
  pub fn payoff_curve(&self, price_min: f64, price_max: f64, step: f64) -> Result<PayoffCurve<'_>> {
    PayoffCurve::new(self, CurveConfig::new(price_min, price_max, step)?)
  }

  /// New strategy whose leg premiums are theoretical Black-Scholes prices.
  pub fn priced(&self, market: &MarketParameters) -> Result<Self> {
    let legs = self
      .legs
      .iter()
      .map(|leg| {
        let premium =
          BSMPricer::from_market(market, leg.strike(), leg.option_type()).calculate_price()?;
        leg.with_premium(premium)
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(Self::new(legs))
  }
}

impl PayoffExt for Strategy {
  fn payoff(&self, p: f64) -> f64 {
    self.legs.iter().map(|leg| leg.payoff(p)).sum()
  }

  fn slopes_at(&self, p: f64) -> (f64, f64) {
    self.legs.iter().fold((0.0, 0.0), |(below, above), leg| {
      let (b, a) = leg.slopes_at(p);
      (below + b, above + a)
    })
  }
}

impl From<Vec<Leg>> for Strategy {
  fn from(legs: Vec<Leg>) -> Self {
    Self::new(legs)
  }
}

impl FromIterator<Leg> for Strategy {
  fn from_iter<I: IntoIterator<Item = Leg>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

/// Summaries of independent strategies, computed in parallel.
pub fn analyze_all(strategies: &[Strategy]) -> Vec<StrategySummary> {
  strategies.par_iter().map(Strategy::summary).collect()
}

fn push_point(found: &mut Vec<BreakEven>, p: f64) {
  if found.iter().any(|be| be.contains(p)) {
    return;
  }
  found.push(BreakEven::Point(p));
}

fn push_band(found: &mut Vec<BreakEven>, lower: f64, upper: f64) {
  let (mut lower, mut upper) = (lower, upper);
  found.retain(|be| match *be {
    BreakEven::Point(p) => !(p >= lower && p <= upper),
    BreakEven::Band { lower: l, upper: u } => {
      if u >= lower && l <= upper {
        lower = lower.min(l);
        upper = upper.max(u);
        false
      } else {
        true
      }
    }
  });
  found.push(BreakEven::Band { lower, upper });
}
