use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::error::{Result, TransportError};

pub const ACTION_LOCATION: &str = "Action-Location";

/// Identity attached to every GIS request.
///
/// Passed in at construction instead of being read from ambient session
/// storage, so each fetcher carries exactly one credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bearer_token: String,
    /// Location of the view issuing the requests.
    pub action_location: String,
}

impl Credentials {
    pub fn new(bearer_token: impl Into<String>, action_location: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            action_location: action_location.into(),
        }
    }

    pub fn headers(&self) -> Result<HeaderMap> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.bearer_token))
            .map_err(|_| TransportError::InvalidHeader {
                name: "Authorization",
            })?;
        auth.set_sensitive(true);

        let location = HeaderValue::from_str(&self.action_location).map_err(|_| {
            TransportError::InvalidHeader {
                name: ACTION_LOCATION,
            }
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(HeaderName::from_static("action-location"), location);
        Ok(headers)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &"<redacted>")
            .field("action_location", &self.action_location)
            .finish()
    }
}
