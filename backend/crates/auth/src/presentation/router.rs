//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::mail::MailSender;

use crate::application::config::AuthConfig;
use crate::domain::gateway::OAuthUserInfoGateway;
use crate::domain::repository::AuthStore;
use crate::infra::oauth::HttpOAuthUserInfoGateway;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access_token;

/// Create the Auth router with the PostgreSQL repository and live provider calls
pub fn auth_router<M>(repo: PgAuthRepository, config: AuthConfig, mailer: M) -> Router
where
    M: MailSender + Send + Sync + 'static,
{
    auth_router_generic(repo, config, mailer, HttpOAuthUserInfoGateway::new())
}

/// Create a generic Auth router for any store, mailer and provider gateway
pub fn auth_router_generic<R, M, G>(repo: R, config: AuthConfig, mailer: M, oauth: G) -> Router
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config, mailer, oauth);

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R, M, G>))
        .route("/me", get(handlers::me::<R, M, G>))
        .route_layer(middleware::from_fn_with_state(
            state.issuer.clone(),
            require_access_token,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, M, G>))
        .route("/signup/email-code", post(handlers::send_sign_up_code::<R, M, G>))
        .route("/login", post(handlers::login::<R, M, G>))
        .route("/refresh", post(handlers::refresh::<R, M, G>))
        .route("/find-id/step1", post(handlers::find_login_id_send_code::<R, M, G>))
        .route("/find-id/step2", post(handlers::find_login_id_verify::<R, M, G>))
        .route("/reset-password", post(handlers::reset_password::<R, M, G>))
        .route("/oauth2/{provider}", post(handlers::social_login::<R, M, G>))
        .merge(protected)
        .with_state(state)
}
