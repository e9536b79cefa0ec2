//! Async HTTP client for the wallet REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::credentials::CredentialProvider;
use crate::envelope::{
    ApiEnvelope, TopUpReceipt, TopUpRequest, TransactionPage, TransferReceipt, TransferRequest,
    WalletBalance,
};
use crate::error::{WalletError, WalletResult};

/// Records requested for the statements screen
pub const STATEMENT_LIMIT: u32 = 100;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a request needs; passed explicitly instead of living in a
/// global service object.
#[derive(Clone)]
pub struct ClientContext {
    pub base_url: String,
    pub timeout: Duration,
    pub credentials: Arc<dyn CredentialProvider>,
}

impl ClientContext {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            credentials,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[derive(Clone)]
pub struct WalletClient {
    http: Client,
    ctx: ClientContext,
}

impl WalletClient {
    pub fn new(ctx: ClientContext) -> WalletResult<Self> {
        let http = Client::builder().timeout(ctx.timeout).build()?;
        Ok(Self { http, ctx })
    }

    pub fn base_url(&self) -> &str {
        &self.ctx.base_url
    }

    pub async fn balance(&self) -> WalletResult<WalletBalance> {
        self.call(Method::GET, "/wallet/balance", None::<&()>).await
    }

    /// One page of history, newest first. Pages start at 1.
    pub async fn transactions(&self, page: u32, limit: u32) -> WalletResult<TransactionPage> {
        let endpoint = format!("/wallet/transactions?page={page}&limit={limit}");
        self.call(Method::GET, &endpoint, None::<&()>).await
    }

    /// The most recent `limit` transactions in a single page
    pub async fn statement_feed(&self, limit: u32) -> WalletResult<TransactionPage> {
        self.transactions(1, limit).await
    }

    pub async fn top_up(&self, amount: Decimal) -> WalletResult<TopUpReceipt> {
        ensure_positive(amount)?;
        let body = TopUpRequest { amount };
        self.call(Method::POST, "/wallet/topup", Some(&body)).await
    }

    pub async fn transfer(&self, request: &TransferRequest) -> WalletResult<TransferReceipt> {
        ensure_positive(request.amount)?;
        self.call(Method::POST, "/wallet/transfer", Some(request)).await
    }

    async fn call<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> WalletResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.ctx.credentials.bearer_token()?;
        let url = self.ctx.url(endpoint);
        debug!(%method, %url, "wallet request");

        let mut req = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let envelope: ApiEnvelope = match serde_json::from_str(&text) {
            Ok(env) => env,
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => ApiEnvelope {
                status: None,
                message: None,
                data: None,
            },
        };

        if !status.is_success() {
            let message = envelope.message_or_default();
            warn!(status = status.as_u16(), %url, %message, "wallet API call failed");
            return Err(WalletError::Api {
                status: status.as_u16(),
                message,
            });
        }

        envelope.into_data(status.as_u16())
    }
}

fn ensure_positive(amount: Decimal) -> WalletResult<()> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::InvalidAmount(amount));
    }
    Ok(())
}
