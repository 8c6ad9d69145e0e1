//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, DecodeError},
    domain::auth::models::{AuthPayload, Credentials, NewAccount},
    session::{SessionUser, Token},
};

const AUTH_KEYS: &[&str] = &[];
const PROFILE_KEYS: &[&str] = &["user"];

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: ApiClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn establish(&self, payload: AuthPayload) -> Result<(SessionUser, bool), ApiError> {
        let Some(token) = payload.token.and_then(Token::new) else {
            return Ok((payload.user, false));
        };

        self.client.session().establish(&token, &payload.user)?;

        Ok((payload.user, true))
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: Credentials) -> Result<SessionUser, ApiError> {
        credentials.validate()?;

        // a stored token would turn a rejected password into SessionExpired
        self.client.session().clear()?;

        let payload: AuthPayload = self
            .client
            .item(
                ApiRequest::post("/login").json(credentials.to_json()),
                Access::Public,
                AUTH_KEYS,
            )
            .await?;

        let (user, signed_in) = self.establish(payload)?;

        if !signed_in {
            return Err(DecodeError::Missing("token").into());
        }

        info!(user = user.id, role = ?user.role, "signed in");

        Ok(user)
    }

    async fn register(&self, account: NewAccount) -> Result<SessionUser, ApiError> {
        account.validate()?;

        let payload: AuthPayload = self
            .client
            .item(
                ApiRequest::post("/register").json(account.to_json()),
                Access::Public,
                AUTH_KEYS,
            )
            .await?;

        let (user, signed_in) = self.establish(payload)?;

        info!(user = user.id, signed_in, "account registered");

        Ok(user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let outcome = self
            .client
            .call(ApiRequest::post("/auth/logout"), Access::Authenticated)
            .await;

        if let Err(error) = outcome {
            warn!(%error, "server logout failed, signing out locally");
        }

        self.client.session().clear()?;

        info!("signed out");

        Ok(())
    }

    async fn profile(&self) -> Result<SessionUser, ApiError> {
        let user: SessionUser = self
            .client
            .item(
                ApiRequest::get("/auth/profile"),
                Access::Authenticated,
                PROFILE_KEYS,
            )
            .await?;

        self.client.session().remember_user(&user)?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in and store the token and user, replacing any current session.
    async fn login(&self, credentials: Credentials) -> Result<SessionUser, ApiError>;

    /// Create a customer account. Signs in when the server hands back a
    /// token.
    async fn register(&self, account: NewAccount) -> Result<SessionUser, ApiError>;

    /// Sign out on the server, then locally. The local session is cleared
    /// even when the server call fails.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Fetch the signed-in user and refresh the cached copy.
    async fn profile(&self) -> Result<SessionUser, ApiError>;
}
