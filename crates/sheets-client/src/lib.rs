// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Minimal client for the Google Sheets v4 REST API
//!
//! Only supports what is needed to use a single spreadsheet range as a table:
//! reading all values of a range and overwriting single cells.
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::RwLock;
use url::Url;

mod auth;
mod values;

pub use auth::ServiceAccountKey;
pub use values::{sheet_title, CellValue, Row};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid service account private key")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
    #[error("failed to sign token request")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("sheets api responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("given base url is not a base")]
    NotBaseUrl,
}

impl Error {
    /// Returns true if the error was caused by the request running into the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Reqwest(e) if e.is_timeout())
    }
}

/// HTTP client for a single Google spreadsheet
pub struct SheetsClient {
    base_url: Url,
    spreadsheet_id: String,
    key: auth::SigningKey,

    client: reqwest::Client,
    token: RwLock<Option<auth::AccessToken>>,
}

impl SheetsClient {
    /// Create a new client from all required configurations
    ///
    /// The `client` should be configured with a timeout, the Sheets client itself never retries
    /// or times out on its own.
    pub fn new(
        client: reqwest::Client,
        key: ServiceAccountKey,
        base_url: Url,
        spreadsheet_id: String,
    ) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::NotBaseUrl);
        }

        Ok(Self {
            base_url,
            spreadsheet_id,
            key: auth::SigningKey::new(key)?,
            client,
            token: RwLock::new(None),
        })
    }

    /// Id of the spreadsheet this client operates on
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Acquire an access token ahead of the first request
    ///
    /// Used at startup to fail early on misconfigured credentials.
    pub async fn authorize(&self) -> Result<()> {
        self.update_token(None).await.map(|_| ())
    }

    /// Internal function to acquire a new access token using the JWT bearer grant
    async fn get_access_token(&self) -> Result<auth::AccessToken> {
        let assertion = self.key.assertion(chrono::Utc::now())?;

        let response = self
            .client
            .post(self.key.token_uri())
            .form(&[
                ("grant_type", auth::JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!(
                "Token endpoint rejected service account {} with {}",
                self.key.client_email(),
                response.status()
            );
            return Err(Error::InvalidCredentials);
        }

        let response: auth::TokenResponse = response.json().await?;

        Ok(auth::AccessToken::from_response(response, chrono::Utc::now()))
    }

    /// Internal function used to acquire a new token when the current one expired or an
    /// `401 Unauthorized` http response was received
    ///
    /// Acquires the internal token and checks if it has changed from the current one or else
    /// calls `get_access_token` to get a new one which it then saves.
    async fn update_token(&self, old_token: Option<String>) -> Result<String> {
        let mut token = self.token.write().await;

        if let Some(current_token) = &*token {
            let replaced = old_token.map_or(true, |old| old != current_token.secret());

            if replaced && current_token.is_fresh(chrono::Utc::now()) {
                return Ok(current_token.secret().to_owned());
            }
        }

        let new_token = self.get_access_token().await?;
        let secret = new_token.secret().to_owned();

        *token = Some(new_token);

        Ok(secret)
    }

    /// Internal function to send a request by passing a closure which constructs the request
    ///
    /// Will try the request with the clients current token once and if the token has expired it
    /// will refresh the token and try the request again once
    async fn send_authorized(&self, f: impl Fn(&Client) -> RequestBuilder) -> Result<Response> {
        let current = {
            let token = self.token.read().await;

            token
                .as_ref()
                .map(|token| (token.secret().to_owned(), token.is_fresh(chrono::Utc::now())))
        };

        let token = match current {
            Some((token, true)) => token,
            Some((expired, false)) => self.update_token(Some(expired)).await?,
            None => self.update_token(None).await?,
        };

        let response = f(&self.client)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.update_token(Some(token)).await?;

            let response = f(&self.client)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .send()
                .await?;

            Ok(response)
        } else {
            Ok(response)
        }
    }

    /// internal url builder
    fn url<I>(&self, path_segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::NotBaseUrl)?
            .pop_if_empty()
            .extend(path_segments);
        Ok(url)
    }
}

/// Turns any non-2xx response into [`Error::Status`]
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(Error::Status { status, body })
}
