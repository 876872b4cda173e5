use async_trait::async_trait;
use reqwest::{Client, header};
use shared_utils::env::get_env_var_or;
use tracing::debug;

use crate::{
    models::{bar::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, DataProvider, ProviderError, ProviderInitError,
        yahoo::{params::construct_params, response::YahooResponse},
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// Creates a new Yahoo provider.
    ///
    /// The chart endpoint can be overridden with the `YAHOO_CHART_URL`
    /// environment variable.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_base_url(get_env_var_or("YAHOO_CHART_URL", DEFAULT_BASE_URL))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
        query: &[(String, String)],
    ) -> Result<BarSeries, ProviderError> {
        let url = format!("{}/{}", self.base_url, symbol);
        debug!(%url, "requesting yahoo chart");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Yahoo reports unknown symbols as 404 with a regular chart error body.
        match serde_json::from_str::<YahooResponse>(&body) {
            Ok(chart) => chart.into_bar_series(symbol, params.timeframe),
            Err(_) if !status.is_success() => ApiSnafu {
                message: format!("{symbol}: HTTP {status}: {body}"),
            }
            .fail(),
            Err(e) => ApiSnafu {
                message: format!("{symbol}: malformed chart response: {e}"),
            }
            .fail(),
        }
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let query = construct_params(&params)?;

        let mut result = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            let series = self.fetch_symbol(symbol, &params, &query).await?;
            debug!(symbol = %symbol, bars = series.bars.len(), "yahoo chart received");
            result.push(series);
        }

        Ok(result)
    }
}
