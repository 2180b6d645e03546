use brokerage::{Error, Leg, OrderRecord, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rustc_hash::FxHashMap;

pub const COLUMNS: usize = 7;
pub type Row = [String; COLUMNS];

const FILLED: &str = "filled";
const NOT_AVAILABLE: &str = "N/A";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NAIVE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Display-ready projection of one order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTrade {
    pub time: DateTime<FixedOffset>,
    /// `None` only when the order has no legs at all.
    pub side: Option<String>,
    pub quantity: f64,
    pub price: f64,
    pub premium: f64,
    pub state: String,
    pub option_details: String,
}

impl GroupedTrade {
    pub fn from_record(record: &OrderRecord) -> Result<Self> {
        let time = parse_created_at(&record.created_at)?;
        let leg = record.first_leg();
        let side = match leg {
            Some(leg) => Some(leg.side.clone().ok_or_else(|| {
                Error::Parse(format!(
                    "order created at {} has a leg without side",
                    record.created_at
                ))
            })?),
            None => None,
        };

        Ok(Self {
            time,
            side,
            quantity: record.quantity.unwrap_or(0.),
            price: record.price.unwrap_or(0.),
            premium: record.premium.unwrap_or(0.),
            state: record.state.clone().unwrap_or_default(),
            option_details: option_details(leg),
        })
    }

    pub fn is_filled(&self) -> bool {
        self.state == FILLED
    }

    pub fn to_row(&self) -> Result<Row> {
        let side = self.side.as_deref().ok_or_else(|| {
            Error::Parse(format!("filled order at {} has no leg to take a side from", self.time))
        })?;
        Ok([
            self.time.format(DISPLAY_TIME_FORMAT).to_string(),
            side.to_uppercase(),
            format!("{:.0}", self.quantity),
            format_currency(self.price),
            format_currency(self.premium),
            self.option_details.clone(),
            self.state.clone(),
        ])
    }
}

/// Trades grouped by symbol, symbols kept in first-seen order.
#[derive(Debug, Default)]
pub struct Report {
    groups: Vec<(String, Vec<GroupedTrade>)>,
    index: FxHashMap<String, usize>,
}

impl Report {
    pub fn from_records(records: &[OrderRecord]) -> Result<Self> {
        let mut report = Self::default();
        for record in records {
            let Some(symbol) = record.chain_symbol.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            let trade = GroupedTrade::from_record(record)?;
            report.push(symbol, trade);
        }

        for (_, trades) in report.groups.iter_mut() {
            // stable, equal times keep arrival order
            trades.sort_by_key(|trade| trade.time);
        }
        Ok(report)
    }

    fn push(&mut self, symbol: &str, trade: GroupedTrade) {
        let idx = match self.index.get(symbol) {
            Some(&idx) => idx,
            None => {
                self.groups.push((symbol.to_string(), Vec::new()));
                self.index.insert(symbol.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].1.push(trade);
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(symbol, _)| symbol.as_str())
    }

    pub fn trades(&self, symbol: &str) -> Option<&[GroupedTrade]> {
        let idx = *self.index.get(symbol)?;
        Some(&self.groups[idx].1)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Header row, filled trades, blank separator; once per symbol.
    pub fn into_rows(self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for (symbol, trades) in self.groups {
            let mut header = blank_row();
            header[0] = symbol;
            rows.push(header);

            for trade in trades.iter().filter(|trade| trade.is_filled()) {
                rows.push(trade.to_row()?);
            }

            rows.push(blank_row());
        }
        Ok(rows)
    }
}

pub fn build_rows(records: &[OrderRecord]) -> Result<Vec<Row>> {
    Report::from_records(records)?.into_rows()
}

/// `"<TYPE> <STRIKE> <EXPIRATION>"` of a leg, or "N/A" without one.
pub fn option_details(leg: Option<&Leg>) -> String {
    let Some(leg) = leg else {
        return NOT_AVAILABLE.to_string();
    };
    let option_type = leg.option_type.as_deref().unwrap_or_default().to_uppercase();
    let strike = leg.strike_price.as_deref().unwrap_or(NOT_AVAILABLE);
    let expiration = leg.expiration_date.as_deref().unwrap_or(NOT_AVAILABLE);
    format!("{option_type} {strike} {expiration}")
}

/// Accepts RFC 3339 ("...Z" or "+hh:mm"); offset-less times are taken as UTC.
pub fn parse_created_at(created_at: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(created_at) {
        return Ok(time);
    }
    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(created_at, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| Error::Parse(format!("invalid created_at timestamp {created_at:?}")))
}

fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

fn blank_row() -> Row {
    Default::default()
}
