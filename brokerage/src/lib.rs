pub mod config;
pub mod error;
pub mod robinhood;
pub mod types;

use chrono::{DateTime, Utc};

pub use config::Config;
pub use error::{Error, Result};
pub use robinhood::RobinhoodClient;
pub use types::{Leg, OrderRecord, OrdersPage, Session};

/// A brokerage account that can be logged into and asked for its option order history.
pub trait Brokerage {
    fn login(&mut self, config: &Config) -> impl Future<Output = Result<Session>> + Send;

    /// Every option order updated at or after `since`, in the order the brokerage lists them.
    fn option_orders(
        &self,
        session: &Session,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<OrderRecord>>> + Send;
}
