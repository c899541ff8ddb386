use reqwest::Method;

use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserInfo};
use crate::session::Session;

impl ApiClient {
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation("Username and password are required"));
        }

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .execute(self.request(Method::POST, "/auth/login").json(&request))
            .await?;

        let username = response
            .user
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or(request.username);
        self.persist_session(&Session::new(response.token.clone(), Some(username)))?;
        log::info!("Logged in");

        Ok(response)
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> ClientResult<MessageResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation("Username and password are required"));
        }

        let request = RegisterRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
            email: email.map(str::to_string),
        };
        self.execute(self.request(Method::POST, "/auth/register").json(&request))
            .await
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.require_token()?;
        self.execute(self.request(Method::GET, "/auth/me")).await
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.clear_session()?;
        log::info!("Logged out");
        Ok(())
    }
}
