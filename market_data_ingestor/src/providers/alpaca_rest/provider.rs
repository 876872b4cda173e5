use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{get_env_var, get_env_var_or};
use tracing::debug;

use crate::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{
        ApiSnafu, DataProvider, ProviderError, ProviderInitError,
        alpaca_rest::{
            params::construct_params,
            response::{AlpacaBar, AlpacaResponse},
        },
    },
};

const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";
const BARS_PATH: &str = "/v2/stocks/bars";

pub struct AlpacaProvider {
    client: Client,
    bars_url: String,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables. `APCA_API_DATA_URL` overrides the data host.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(get_env_var("APCA_API_KEY_ID")?.into());
        let secret_key = SecretString::new(get_env_var("APCA_API_SECRET_KEY")?.into());

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret())?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(secret_key.expose_secret())?,
        );

        let client = Client::builder().default_headers(headers).build()?;
        let host = get_env_var_or("APCA_API_DATA_URL", DEFAULT_DATA_URL);

        Ok(Self {
            client,
            bars_url: format!("{}{}", host.trim_end_matches('/'), BARS_PATH),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    fn name(&self) -> &'static str {
        "alpaca"
    }

    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        // Validates the timeframe before any request is made.
        let base_query = construct_params(&params)?;

        let mut all_bars: IndexMap<String, Vec<AlpacaBar>> = IndexMap::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query_params = base_query.clone();
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(&self.bars_url)
                .query(&query_params)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    message: format!("HTTP {status}: {error_msg}"),
                }
                .fail();
            }

            let alpaca_response = response.json::<AlpacaResponse>().await?;

            // Merge the bars from the current page into our collection.
            for (symbol, bars) in alpaca_response.bars.unwrap_or_default() {
                all_bars.entry(symbol).or_default().extend(bars);
            }

            match alpaca_response.next_page_token {
                Some(token) => {
                    debug!("fetching next alpaca page");
                    next_page_token = Some(token);
                }
                None => break,
            }
        }

        let result = all_bars
            .into_iter()
            .map(|(symbol, alpaca_bars)| BarSeries {
                symbol,
                timeframe: params.timeframe,
                bars: alpaca_bars.into_iter().map(Bar::from).collect(),
            })
            .collect();

        Ok(result)
    }
}
