//! Login, registration and logout: the only writers of the session store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use smartbiz_auth::{AuthToken, Role, Session, SessionStore};
use smartbiz_core::DomainError;

use crate::{ClientConfig, ClientError, http};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const REGISTER_PATH: &str = "/api/auth/register";

/// Confirmation shown after a successful registration.
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful!";

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("email and password are required"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl RegistrationRequest {
    fn validate(&self) -> Result<(), DomainError> {
        if !self.role.can_self_register() {
            return Err(DomainError::validation(format!(
                "{} accounts cannot be self-registered",
                self.role.label()
            )));
        }
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("name, email and password are required"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: ClientConfig,
    sessions: Arc<dyn SessionStore>,
}

impl AuthClient {
    pub fn new(config: ClientConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self::with_http(reqwest::Client::new(), config, sessions)
    }

    pub fn with_http(
        http: reqwest::Client,
        config: ClientConfig,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            config,
            sessions,
        }
    }

    /// Log in as `role` and persist the resulting session.
    ///
    /// The caller navigates to `role.dashboard_route()` on success.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<Session, ClientError> {
        credentials.validate()?;

        let url = self.config.endpoint(role.login_path());
        tracing::debug!(%url, %role, "logging in");

        let resp: LoginResponse =
            http::send_json(self.http.post(url).json(credentials), LOGIN_FAILED).await?;

        if resp.token.is_empty() {
            return Err(ClientError::Decode {
                message: LOGIN_FAILED.to_string(),
                detail: "login response carried an empty token".to_string(),
            });
        }

        let session = Session::new(AuthToken::new(resp.token), role);
        self.sessions.save(&session)?;

        tracing::info!(%role, "logged in");
        Ok(session)
    }

    /// Create an owner or employee account. Does not log in.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<&'static str, ClientError> {
        request.validate()?;

        let url = self.config.endpoint(REGISTER_PATH);
        tracing::debug!(%url, role = %request.role, "registering account");

        http::send(self.http.post(url).json(request), REGISTRATION_FAILED).await?;

        tracing::info!(role = %request.role, "account registered");
        Ok(REGISTRATION_SUCCEEDED)
    }

    /// Destroy the local session. No network call.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.sessions.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    pub fn session(&self) -> Session {
        self.sessions.read()
    }
}
