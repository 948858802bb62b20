//! External Gateways
//!
//! Outbound calls the domain depends on but does not implement.

use serde_json::Value;

use crate::domain::value_object::social_provider::SocialProvider;
use crate::error::AuthResult;

/// Fetches the raw user-info attributes a provider holds for an access token
#[trait_variant::make(OAuthUserInfoGateway: Send)]
pub trait LocalOAuthUserInfoGateway {
    async fn fetch_user_info(&self, provider: SocialProvider, access_token: &str)
    -> AuthResult<Value>;
}
