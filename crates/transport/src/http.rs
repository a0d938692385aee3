use reqwest::StatusCode;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::fetch::{BoxFuture, GisFetch};

/// `reqwest`-backed fetcher carrying one set of credentials.
pub struct HttpFetch {
    client: reqwest::Client,
    credentials: Credentials,
}

impl HttpFetch {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(reqwest::Client::new(), credentials)
    }

    pub fn with_client(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url, "gis GET");
        let resp = self
            .client
            .get(url)
            .headers(self.credentials.headers()?)
            .send()
            .await?;
        debug!(url, status = resp.status().as_u16(), "gis response");
        Ok(resp)
    }
}

impl GisFetch for HttpFetch {
    fn query(&self, url: &str) -> BoxFuture<'_, Result<serde_json::Value>> {
        let url = url.to_string();
        Box::pin(async move {
            let resp = self.get(&url).await?;
            Ok(resp.json::<serde_json::Value>().await?)
        })
    }

    fn check_status(&self, url: &str) -> BoxFuture<'_, Result<bool>> {
        let url = url.to_string();
        Box::pin(async move { Ok(self.get(&url).await?.status() == StatusCode::OK) })
    }
}
