//! OAuth2 user-info client
//!
//! Calls the provider's user-info endpoint with the access token the client
//! obtained from the provider. Response parsing is left to [`SocialProvider`].

use serde_json::Value;

use crate::domain::gateway::OAuthUserInfoGateway;
use crate::domain::value_object::social_provider::SocialProvider;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct HttpOAuthUserInfoGateway {
    client: reqwest::Client,
}

impl HttpOAuthUserInfoGateway {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpOAuthUserInfoGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthUserInfoGateway for HttpOAuthUserInfoGateway {
    async fn fetch_user_info(
        &self,
        provider: SocialProvider,
        access_token: &str,
    ) -> AuthResult<Value> {
        let response = self
            .client
            .get(provider.user_info_url())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::OAuthProvider(format!("{provider}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::OAuthProvider(format!(
                "{provider} user-info returned {}",
                status.as_u16()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AuthError::OAuthProvider(format!("{provider}: malformed user-info: {e}")))
    }
}
