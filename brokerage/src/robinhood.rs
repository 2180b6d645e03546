pub mod auth;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;

use crate::{
    Brokerage,
    config::Config,
    error::{Error, Result},
    types::{OrderRecord, OrdersPage, Session},
};
use auth::{TokenRequest, TokenResponse};

/// Robinhood REST client.
pub struct RobinhoodClient {
    client: Client,
    api_base: String,
}

impl RobinhoodClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base)
    }

    fn token_url(&self) -> String {
        format!("{}/oauth2/token/", self.api_base)
    }

    fn option_orders_url(&self) -> String {
        format!("{}/options/orders/", self.api_base)
    }

    async fn fetch_page(
        &self,
        session: &Session,
        url: &str,
        since: Option<&str>,
    ) -> Result<OrdersPage> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("Authorization", session.authorization());
        if let Some(since) = since {
            request = request.query(&[("updated_at[gte]", since)]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|e| {
                tracing::debug!("Failed to read error body from {url}: {e}");
                String::new()
            });
            return Err(Error::Fetch(format!("{url} returned {status}: {body}")));
        }
        resp.json::<OrdersPage>()
            .await
            .map_err(|e| Error::Fetch(format!("failed to decode orders page: {e}")))
    }
}

impl Brokerage for RobinhoodClient {
    async fn login(&mut self, config: &Config) -> Result<Session> {
        tracing::info!("Logging in to Robinhood as {}", config.username);
        let body = TokenRequest::new_password(config);

        let resp = self
            .client
            .post(self.token_url())
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Auth(format!("login request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::Auth(format!("failed to read login response: {e}")))?;
        let token = match serde_json::from_str::<TokenResponse>(&text) {
            Ok(token) => token,
            Err(_) if !status.is_success() => {
                return Err(Error::Auth(format!("login returned {status}: {text}")));
            }
            Err(e) => return Err(Error::Auth(format!("failed to parse login response: {e}"))),
        };

        let session = token.into_session()?;
        tracing::info!("Logged in");
        Ok(session)
    }

    async fn option_orders(
        &self,
        session: &Session,
        since: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        tracing::info!("Fetching option orders updated since {since}");

        let first_url = self.option_orders_url();
        let mut page = self.fetch_page(session, &first_url, Some(&since)).await?;
        let mut orders = std::mem::take(&mut page.results);

        // next 链接已经带上了查询参数
        while let Some(next) = page.next.take() {
            tracing::debug!("Following {next}");
            page = self.fetch_page(session, &next, None).await?;
            orders.append(&mut page.results);
        }

        tracing::info!("Fetched {} option orders", orders.len());
        Ok(orders)
    }
}
