//! API client with the session gate.

use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::{
        envelope,
        error::{ApiError, server_message},
        transport::{ApiRequest, Transport},
    },
    session::{LOGIN_PATH, Session},
};

/// Whether a call needs the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Sent with the token when there is one.
    Public,

    /// Refused locally without a token.
    Authenticated,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send `request` and return the body of a 2xx response.
    ///
    /// Authenticated calls without a stored token fail with
    /// [`ApiError::AuthenticationRequired`] before anything is sent. A 401 in
    /// answer to a request that carried a token clears the session and
    /// surfaces as [`ApiError::SessionExpired`].
    ///
    /// # Errors
    ///
    /// Returns an error for the cases above, on transport failure, and with
    /// the server's message for any other non-2xx status.
    pub async fn call(&self, request: ApiRequest, access: Access) -> Result<Value, ApiError> {
        let token = self.session.token()?;

        if access == Access::Authenticated && token.is_none() {
            debug!(path = %request.path, "refusing protected call without a session");

            return Err(ApiError::AuthenticationRequired);
        }

        let sent_token = token.is_some();
        let method = request.method;
        let path = request.path.clone();

        debug!(%method, %path, authenticated = sent_token, "sending request");

        let response = self.transport.send(request.bearer(token)).await?;

        debug!(%method, %path, status = response.status, "received response");

        if response.is_success() {
            return Ok(response.body);
        }

        if response.status == 401 && sent_token {
            warn!(%method, %path, "session rejected by server, signing out");

            self.session.clear()?;

            return Err(ApiError::SessionExpired {
                login_path: LOGIN_PATH,
            });
        }

        let message = server_message(&response.body);

        warn!(%method, %path, status = response.status, %message, "request failed");

        Err(ApiError::Server {
            status: response.status,
            message,
        })
    }

    /// [`ApiClient::call`] and decode a list out of the envelope.
    ///
    /// # Errors
    ///
    /// Returns an error when the call fails or the list does not decode.
    pub async fn list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        access: Access,
        keys: &[&str],
    ) -> Result<Vec<T>, ApiError> {
        let body = self.call(request, access).await?;

        Ok(envelope::list(body, keys)?)
    }

    /// [`ApiClient::call`] and decode a single resource out of the envelope.
    ///
    /// # Errors
    ///
    /// Returns an error when the call fails or the resource does not decode.
    pub async fn item<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        access: Access,
        keys: &[&str],
    ) -> Result<T, ApiError> {
        let body = self.call(request, access).await?;

        Ok(envelope::item(body, keys)?)
    }
}
