use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Authenticated GET access to the GIS service.
///
/// Methods return boxed futures so the controller can hold a
/// `dyn GisFetch`.
pub trait GisFetch: Send + Sync {
    /// GET `url` and parse the body as JSON, whatever the status code.
    fn query(&self, url: &str) -> BoxFuture<'_, Result<serde_json::Value>>;

    /// GET `url`; `true` iff the status is exactly 200.
    fn check_status(&self, url: &str) -> BoxFuture<'_, Result<bool>>;
}

/// `query` followed by a typed decode.
pub async fn query_as<T: DeserializeOwned>(fetch: &dyn GisFetch, url: &str) -> Result<T> {
    let value = fetch.query(url).await?;
    Ok(serde_json::from_value(value)?)
}
