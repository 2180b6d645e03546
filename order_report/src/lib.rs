pub mod report;
pub mod table;

use brokerage::{Brokerage, Config, Result};
use chrono::{Duration, Utc};

pub use report::{GroupedTrade, Report, Row, build_rows};

/// How far back the report looks.
pub const LOOKBACK_HOURS: i64 = 24;
pub const LOGIN_NOTICE: &str = "Logging in to Robinhood...";

/// Logs in, pulls the last day of option orders and turns them into display rows.
pub async fn fetch_rows<B: Brokerage>(brokerage: &mut B, config: &Config) -> Result<Vec<Row>> {
    let session = brokerage.login(config).await?;
    let since = Utc::now() - Duration::hours(LOOKBACK_HOURS);
    let orders = brokerage.option_orders(&session, since).await?;

    let report = Report::from_records(&orders)?;
    if report.is_empty() {
        tracing::info!("No option orders since {since}");
    }
    for symbol in report.symbols() {
        let count = report.trades(symbol).map_or(0, <[GroupedTrade]>::len);
        tracing::debug!("{symbol}: {count} orders");
    }
    report.into_rows()
}

/// Title line followed by the rendered table.
pub async fn run<B: Brokerage>(brokerage: &mut B, config: &Config) -> Result<String> {
    let rows = fetch_rows(brokerage, config).await?;
    let table = table::render(&rows, &table::HEADERS);
    Ok(format!("{}\n{table}", table::REPORT_TITLE))
}

/// What the binary prints once a run is over. Failures are reported, never escalated.
pub fn outcome(result: Result<String>) -> String {
    match result {
        Ok(report) => format!("\n{report}"),
        Err(e) => {
            tracing::error!("Report failed: {e:?}");
            format!("An error occurred: {e}")
        }
    }
}
