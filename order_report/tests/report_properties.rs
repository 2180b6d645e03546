//! Property-based checks of grouping, ordering, filtering and formatting of report rows.

use brokerage::{Leg, OrderRecord};
use chrono::{DateTime, Duration};
use order_report::{Row, build_rows};
use proptest::prelude::*;

const SYMBOLS: [&str; 4] = ["AAPL", "TSLA", "SPY", "QQQ"];
const STATES: [&str; 4] = ["filled", "cancelled", "queued", "rejected"];

fn order_strategy() -> impl Strategy<Value = OrderRecord> {
    (
        0..SYMBOLS.len(),
        0i64..86_400,
        prop_oneof![Just("buy"), Just("sell")],
        0..STATES.len(),
        0.0f64..1_000.0,
        0.0f64..500.0,
        0.0f64..50_000.0,
    )
        .prop_map(|(symbol, secs, side, state, quantity, price, premium)| {
            let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
            let created_at = (base + Duration::seconds(secs)).to_rfc3339();
            OrderRecord {
                chain_symbol: Some(SYMBOLS[symbol].to_string()),
                created_at,
                legs: vec![Leg {
                    side: Some(side.to_string()),
                    option_type: Some("call".to_string()),
                    strike_price: Some("100.0000".to_string()),
                    expiration_date: Some("2024-03-15".to_string()),
                }],
                quantity: Some(quantity),
                price: Some(price),
                premium: Some(premium),
                state: Some(STATES[state].to_string()),
            }
        })
}

fn is_blank(row: &Row) -> bool {
    row.iter().all(String::is_empty)
}

fn is_header(row: &Row) -> bool {
    !row[0].is_empty() && row[1..].iter().all(String::is_empty)
}

/// Splits rows back into (symbol, data rows) groups.
fn groups(rows: &[Row]) -> Vec<(String, Vec<Row>)> {
    let mut groups: Vec<(String, Vec<Row>)> = Vec::new();
    let mut open = false;
    for row in rows {
        if is_blank(row) {
            assert!(open, "separator without a group");
            open = false;
        } else if !open && is_header(row) {
            groups.push((row[0].clone(), Vec::new()));
            open = true;
        } else {
            assert!(open, "data row outside a group");
            groups.last_mut().unwrap().1.push(row.clone());
        }
    }
    assert!(!open, "last group is not closed");
    groups
}

fn has_two_decimals(cell: &str) -> bool {
    let Some(amount) = cell.strip_prefix('$') else {
        return false;
    };
    matches!(amount.split_once('.'), Some((_, cents)) if cents.len() == 2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn groups_follow_first_seen_symbols(orders in prop::collection::vec(order_strategy(), 0..40)) {
        let rows = build_rows(&orders).unwrap();
        let groups = groups(&rows);

        let mut expected: Vec<&str> = Vec::new();
        for order in &orders {
            let symbol = order.chain_symbol.as_deref().unwrap();
            if !expected.contains(&symbol) {
                expected.push(symbol);
            }
        }
        let seen: Vec<&str> = groups.iter().map(|(symbol, _)| symbol.as_str()).collect();
        prop_assert_eq!(seen, expected);

        for (symbol, data) in &groups {
            let filled = orders
                .iter()
                .filter(|o| o.chain_symbol.as_deref() == Some(symbol.as_str()))
                .filter(|o| o.state.as_deref() == Some("filled"))
                .count();
            prop_assert_eq!(data.len(), filled);
        }
    }

    #[test]
    fn data_rows_are_chronological(orders in prop::collection::vec(order_strategy(), 0..40)) {
        let rows = build_rows(&orders).unwrap();
        for (_, data) in groups(&rows) {
            for pair in data.windows(2) {
                prop_assert!(pair[0][0] <= pair[1][0], "{} after {}", pair[0][0], pair[1][0]);
            }
        }
    }

    #[test]
    fn only_filled_rows_with_fixed_formatting(orders in prop::collection::vec(order_strategy(), 0..40)) {
        let rows = build_rows(&orders).unwrap();
        for (_, data) in groups(&rows) {
            for row in data {
                prop_assert_eq!(row[6].as_str(), "filled");
                prop_assert!(row[1] == "BUY" || row[1] == "SELL");
                prop_assert!(!row[2].contains('.'), "quantity {}", row[2]);
                prop_assert!(has_two_decimals(&row[3]), "price {}", row[3]);
                prop_assert!(has_two_decimals(&row[4]), "premium {}", row[4]);
            }
        }
    }

    #[test]
    fn unfilled_orders_do_not_disturb_filled_ones(orders in prop::collection::vec(order_strategy(), 0..40)) {
        let filled_only: Vec<OrderRecord> = orders
            .iter()
            .filter(|o| o.state.as_deref() == Some("filled"))
            .cloned()
            .collect();

        let all = groups(&build_rows(&orders).unwrap());
        let trimmed = groups(&build_rows(&filled_only).unwrap());

        let mut all_data: Vec<(String, Vec<Row>)> = all.into_iter().filter(|(_, d)| !d.is_empty()).collect();
        let mut trimmed_data = trimmed;
        all_data.sort_by(|a, b| a.0.cmp(&b.0));
        trimmed_data.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(all_data, trimmed_data);
    }
}
