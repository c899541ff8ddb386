//! HTTP client for the roster REST API.
//!
//! Every request carries the bearer token (when logged in) and a fresh
//! `X-Correlation-ID`. A 401/403 from any endpoint clears the stored session,
//! so the next command starts from the login step again.

mod auth;
mod players;
mod teams;

use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};

pub const CORRELATION_HEADER: &str = "X-Correlation-ID";

pub struct ApiClient {
    http: Client,
    config: Config,
    store: Option<SessionStore>,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Client backed by the session file named in the config. A stored session
    /// whose token has already expired is discarded.
    pub fn new(config: Config) -> ClientResult<Self> {
        let store = SessionStore::new(&config.session_file);
        let token = match store.load()? {
            Some(session) if session.is_expired(Utc::now()) => {
                log::info!("Stored session has expired, please log in again");
                store.clear()?;
                None
            }
            Some(session) => Some(session.token),
            None => None,
        };

        Ok(Self {
            http: build_http(&config)?,
            config,
            store: Some(store),
            token: RwLock::new(token),
        })
    }

    /// Client that keeps its token in memory only.
    pub fn ephemeral(config: Config) -> ClientResult<Self> {
        Ok(Self {
            http: build_http(&config)?,
            config,
            store: None,
            token: RwLock::new(None),
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    fn persist_session(&self, session: &Session) -> ClientResult<()> {
        self.set_token(Some(session.token.clone()));
        match &self.store {
            Some(store) => store.save(session),
            None => Ok(()),
        }
    }

    /// Forget the token in memory and on disk.
    pub fn clear_session(&self) -> ClientResult<()> {
        self.set_token(None);
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    fn require_token(&self) -> ClientResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        let correlation_id = Uuid::new_v4().to_string();
        log::debug!("{} {} correlation_id={}", method, url, correlation_id);

        let builder = self
            .http
            .request(method, url)
            .header(CORRELATION_HEADER, correlation_id);

        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let body = self.send(builder).await?;
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    /// Like `execute`, for endpoints whose success body carries nothing useful.
    async fn execute_empty(&self, builder: RequestBuilder) -> ClientResult<()> {
        self.send(builder).await.map(|_| ())
    }

    /// Send the request and return the raw body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> ClientResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let error = ClientError::from_response(status, &body);
        if matches!(error, ClientError::Unauthorized(_)) {
            log::warn!("Server rejected credentials ({}), clearing session", status);
            if let Err(e) = self.clear_session() {
                log::error!("Failed to clear session: {}", e);
            }
        } else {
            log::debug!("Request failed with status {}: {}", status, error);
        }
        Err(error)
    }
}

fn build_http(config: &Config) -> ClientResult<Client> {
    Ok(Client::builder()
        .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout())
        .build()?)
}
