use serde::{Deserialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult, client::AccessToken};

/// Making requests to the Spotify Web API.
impl Client {
    /// Make an authenticated `GET` request to the Web API and deserialize the body.
    ///
    /// `endpoint` is relative to the API base URL, e.g. `albums/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails, the request fails, or the
    /// response is not valid.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<T> {
        let token = self.access_token().await?;
        let url = format!("{}/{endpoint}", Self::API_BASE_URL);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(parameters)
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if status == 401 {
            // The token was revoked early; forget it so the next call fetches a new one.
            *self.token.lock().await = None;
        }

        parse_response(status, &bytes)
    }

    /// Returns a usable app access token, fetching a new one through the
    /// client-credentials flow if the cached one is missing or stale.
    async fn access_token(&self) -> ClientResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh()
        {
            return Ok(token.value.clone());
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: u64,
        }

        tracing::debug!("requesting new Spotify access token");
        let response = self
            .client
            .post(format!("{}/api/token", Self::ACCOUNTS_BASE_URL))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let response: TokenResponse = parse_response(status, &bytes)?;

        let token = AccessToken::new(response.access_token, response.expires_in);
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}

/// Turns a raw HTTP response into either the body or a [`ClientError::SpotifyError`].
pub(crate) fn parse_response<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> ClientResult<T> {
    if (200..300).contains(&status) {
        return Ok(serde_json::from_slice(bytes)?);
    }

    let message = serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(ErrorBody::into_message);
    Err(ClientError::SpotifyError { status, message })
}

/// The Web API nests its errors as `{"error": {"status", "message"}}`, while the
/// accounts service uses the OAuth shape `{"error", "error_description"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorKind,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorKind {
    Api { message: Option<String> },
    OAuth(String),
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        match self.error {
            ErrorKind::Api { message } => message,
            ErrorKind::OAuth(code) => Some(match self.error_description {
                Some(description) => format!("{code} ({description})"),
                None => code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        value: u32,
    }

    #[test]
    fn test_parse_success() {
        let body: Body = parse_response(200, br#"{"value": 7}"#).unwrap();
        assert_eq!(body.value, 7);
    }

    #[test]
    fn test_parse_api_error() {
        let err = parse_response::<Body>(
            429,
            br#"{"error": {"status": 429, "message": "API rate limit exceeded"}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::SpotifyError { status: 429, message: Some(ref m) } if m == "API rate limit exceeded"
        ));
    }

    #[test]
    fn test_parse_oauth_error() {
        let err = parse_response::<Body>(
            400,
            br#"{"error": "invalid_client", "error_description": "Invalid client secret"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Spotify error: 400: invalid_client (Invalid client secret)"
        );
    }

    #[test]
    fn test_parse_error_without_body() {
        let err = parse_response::<Body>(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(
            err,
            ClientError::SpotifyError {
                status: 502,
                message: None
            }
        ));
    }

    #[test]
    fn test_parse_malformed_success_body() {
        let err = parse_response::<Body>(200, b"{}").unwrap_err();
        assert!(matches!(err, ClientError::DeserializationError(_)));
    }
}
