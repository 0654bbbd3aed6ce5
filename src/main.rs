use anyhow::Context;
use anyhow::Result;
use option_payoff::quant::pricing::MarketParameters;
use option_payoff::quant::strategy::analyze_all;
use option_payoff::quant::strategy::presets;
use option_payoff::quant::strategy::CurveConfig;
use option_payoff::quant::strategy::Strategy;
use option_payoff::traits::PayoffExt;
use prettytable::row;
use prettytable::Table;

// Usage: option-payoff [spot] [days] [vol %] [rate %]
fn main() -> Result<()> {
  init_tracing();

  let args = std::env::args().skip(1).collect::<Vec<_>>();
  let arg = |i: usize, default: f64| -> Result<f64> {
    match args.get(i) {
      Some(raw) => raw
        .parse::<f64>()
        .with_context(|| format!("argument {} is not a number: {raw}", i + 1)),
      None => Ok(default),
    }
  };
  let market =
    MarketParameters::from_quote(arg(0, 100.0)?, arg(1, 30.0)?, arg(2, 20.0)?, arg(3, 3.0)?)?;

  let quoted = vec![
    ("Long call", presets::long_call(100.0, 5.0)?),
    ("Short call", presets::short_call(100.0, 5.0)?),
    ("Long put", presets::long_put(100.0, 5.0)?),
    ("Short put", presets::short_put(100.0, 5.0)?),
    ("Bull call spread", presets::bull_call_spread(100.0, 7.0, 110.0, 4.0)?),
    ("Bear call spread", presets::bear_call_spread(100.0, 7.0, 110.0, 4.0)?),
    ("Bull put spread", presets::bull_put_spread(90.0, 3.0, 100.0, 5.0)?),
    ("Bear put spread", presets::bear_put_spread(100.0, 4.0, 110.0, 7.0)?),
    ("Long straddle", presets::long_straddle(100.0, 5.0, 5.0)?),
    ("Short straddle", presets::short_straddle(100.0, 5.0, 5.0)?),
    ("Long strangle", presets::long_strangle(90.0, 4.0, 110.0, 4.0)?),
    ("Short strangle", presets::short_strangle(90.0, 4.0, 110.0, 4.0)?),
  ];

  let (names, strategies): (Vec<_>, Vec<_>) = quoted.into_iter().unzip();
  println!("Quoted premiums");
  summary_table(&names, &strategies).printstd();

  let priced = strategies
    .iter()
    .map(|s| s.priced(&market))
    .collect::<option_payoff::error::Result<Vec<_>>>()?;
  println!(
    "\nBlack-Scholes premiums (spot {:.2}, {:.0} days, vol {:.1}%, rate {:.2}%)",
    market.spot,
    market.tau * 365.0,
    market.volatility * 100.0,
    market.risk_free_rate * 100.0
  );
  summary_table(&names, &priced).printstd();

  let config = CurveConfig::around_spot(market.spot).non_negative()?;
  let curve_step = config.step * 10.0;
  println!("\nPayoff of the priced bull call spread");
  let mut table = Table::new();
  table.add_row(row!["Price", "Total", "Long call", "Short call"]);
  for pt in priced[4].payoff_curve(config.price_min, config.price_max, curve_step)? {
    table.add_row(row![
      format!("{:.2}", pt.price),
      format!("{:.2}", pt.total),
      format!("{:.2}", pt.per_leg[0]),
      format!("{:.2}", pt.per_leg[1])
    ]);
  }
  table.printstd();
  println!("P&L at spot: {:.2}", priced[4].payoff(market.spot));

  Ok(())
}

fn summary_table(names: &[&str], strategies: &[Strategy]) -> Table {
  let mut table = Table::new();
  table.add_row(row![
    "Strategy",
    "Net premium",
    "Max profit",
    "Max loss",
    "Break-even"
  ]);
  for (name, summary) in names.iter().zip(analyze_all(strategies)) {
    let break_evens = summary
      .break_evens
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(", ");
    table.add_row(row![
      name,
      format!("{:.2}", summary.net_premium),
      summary.max_profit,
      summary.max_loss,
      break_evens
    ]);
  }
  table
}

fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("option_payoff=warn")),
    )
    .init();
}
