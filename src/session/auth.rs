//! Login and logout.

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::api::{ApiCall, routes};
use crate::error::{HarnessError, Result};
use crate::session::client::{Credentials, LoginResult, SessionClient};

impl SessionClient {
    /// Open a session.
    ///
    /// On success the returned token replaces any token currently held. On
    /// failure the current token, if any, is left untouched.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<LoginResult> {
        let response = self
            .api()
            .call(ApiCall::post(routes::LOGIN).json(json!({
                "cluster": credentials.cluster,
                "username": credentials.username,
                "password": credentials.password,
                "host": credentials.host,
                "port": credentials.port,
            })))
            .await?;

        let result = LoginResult::from_response(&response)?;
        if self.is_authenticated() {
            warn!("login replaces an open session");
        }
        self.set_session_key(result.session_key.clone());
        info!(
            user = %credentials.username,
            host = %credentials.host,
            home = %result.home_path,
            "logged in"
        );
        Ok(result)
    }

    /// Close the session.
    ///
    /// Without a session this sends nothing and returns
    /// [`HarnessError::NoActiveSession`]. With one, the local token is
    /// cleared whatever the server answers.
    pub async fn logout(&mut self) -> Result<Value> {
        let Some(token) = self.take_session_key() else {
            warn!("logout without an active session");
            return Err(HarnessError::NoActiveSession);
        };

        let result = self
            .api()
            .call(
                ApiCall::get(routes::LOGOUT)
                    .credential(routes::LOGOUT_SESSION_HEADER, Some(&token)),
            )
            .await;

        match &result {
            Ok(_) => info!("logged out"),
            Err(e) => warn!("logout failed, session dropped locally: {}", e),
        }
        result
    }
}
