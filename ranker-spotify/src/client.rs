use std::time::{Duration, Instant};

use crate::ClientResult;

/// A client for the Spotify Web API.
pub struct Client {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) client: reqwest::Client,
    pub(crate) token: tokio::sync::Mutex<Option<AccessToken>>,
}

/// An app access token, along with when it stops being usable.
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    pub(crate) value: String,
    pub(crate) expires_at: Instant,
}
impl AccessToken {
    /// Tokens are refreshed this long before Spotify would reject them.
    const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

    pub(crate) fn new(value: String, expires_in_secs: u64) -> Self {
        let lifetime = Duration::from_secs(expires_in_secs).saturating_sub(Self::EXPIRY_MARGIN);
        Self {
            value,
            expires_at: Instant::now() + lifetime,
        }
    }

    pub(crate) fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

impl Client {
    /// The default base URL for API requests.
    pub const API_BASE_URL: &str = "https://api.spotify.com/v1";
    /// The default base URL for token requests.
    pub const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

    /// Create a new client using the app's credentials.
    ///
    /// `timeout` bounds every individual HTTP request.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            client: reqwest::Client::builder().timeout(timeout).build()?,
            token: tokio::sync::Mutex::new(None),
        })
    }
}
