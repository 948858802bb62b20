//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use platform::mail::MailSender;

use crate::application::config::AuthConfig;
use crate::application::{
    FindLoginIdUseCase, GetCurrentUserUseCase, LoginTokens, RefreshAccessTokenUseCase,
    ResetPasswordInput, ResetPasswordUseCase, SendSignUpCodeUseCase, SignInInput, SignInUseCase,
    SignOutUseCase, SignUpInput, SignUpUseCase, SocialLoginUseCase,
};
use crate::domain::gateway::OAuthUserInfoGateway;
use crate::domain::repository::AuthStore;
use crate::domain::token_issuer::{IssuedToken, Principal, TokenIssuer};
use crate::domain::value_object::social_provider::SocialProvider;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AccessTokenResponse, EmailRequest, FindLoginIdResponse, FindLoginIdVerifyRequest,
    LoginRequest, ResetPasswordRequest, SignUpRequest, SignUpResponse, SocialLoginRequest,
    UserInfoResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, M, G> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub issuer: Arc<TokenIssuer>,
    pub mailer: Arc<M>,
    pub oauth: Arc<G>,
}

impl<R, M, G> AuthAppState<R, M, G> {
    /// The token issuer is derived from `config`
    pub fn new(repo: R, config: AuthConfig, mailer: M, oauth: G) -> Self {
        Self {
            repo: Arc::new(repo),
            issuer: Arc::new(config.token_issuer()),
            config: Arc::new(config),
            mailer: Arc::new(mailer),
            oauth: Arc::new(oauth),
        }
    }
}

impl<R, M, G> Clone for AuthAppState<R, M, G> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            issuer: self.issuer.clone(),
            mailer: self.mailer.clone(),
            oauth: self.oauth.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        login_id: req.login_id,
        email: req.email,
        email_code: req.email_code,
        password: req.password,
        password_confirm: req.password_confirm,
        nickname: req.nickname,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: output.user_id.value(),
        }),
    ))
}

/// POST /api/auth/signup/email-code
pub async fn send_sign_up_code<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case =
        SendSignUpCodeUseCase::new(state.repo.clone(), state.repo.clone(), state.mailer.clone());

    use_case.execute(&req.email).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Login / Refresh / Logout
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> AuthResult<(CookieJar, Json<AccessTokenResponse>)>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let tokens = use_case
        .execute(SignInInput {
            login_id: req.login_id,
            password: req.password,
        })
        .await?;

    Ok(token_response(&state.config, jar, tokens))
}

/// POST /api/auth/oauth2/{provider}
pub async fn social_login<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Path(provider): Path<String>,
    jar: CookieJar,
    Json(req): Json<SocialLoginRequest>,
) -> AuthResult<(CookieJar, Json<AccessTokenResponse>)>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let provider: SocialProvider = provider.parse()?;

    let use_case = SocialLoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.oauth.clone(),
        state.issuer.clone(),
    );

    let tokens = use_case.execute(provider, &req.access_token).await?;

    Ok(token_response(&state.config, jar, tokens))
}

/// POST /api/auth/refresh
pub async fn refresh<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    jar: CookieJar,
) -> AuthResult<Json<AccessTokenResponse>>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let refresh_token = jar
        .get(&state.config.refresh_cookie_name)
        .map(|cookie| cookie.value().to_string());

    let use_case = RefreshAccessTokenUseCase::new(state.repo.clone(), state.issuer.clone());
    let access_token = use_case.execute(refresh_token.as_deref()).await?;

    Ok(Json(access_token_body(access_token)))
}

/// POST /api/auth/logout (bearer)
pub async fn logout<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Extension(principal): Extension<Principal>,
    jar: CookieJar,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone());
    use_case.execute(&principal).await?;

    let jar = jar.add(state.config.refresh_cookie().removal());

    Ok((StatusCode::NO_CONTENT, jar))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me (bearer)
pub async fn me<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<UserInfoResponse>>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case = GetCurrentUserUseCase::new(state.repo.clone());
    let user = use_case.execute(&principal).await?;

    Ok(Json(user.into()))
}

// ============================================================================
// Account Recovery
// ============================================================================

/// POST /api/auth/find-id/step1
pub async fn find_login_id_send_code<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case =
        FindLoginIdUseCase::new(state.repo.clone(), state.repo.clone(), state.mailer.clone());

    use_case.send_code(&req.email).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/find-id/step2
pub async fn find_login_id_verify<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Json(req): Json<FindLoginIdVerifyRequest>,
) -> AuthResult<Json<FindLoginIdResponse>>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case =
        FindLoginIdUseCase::new(state.repo.clone(), state.repo.clone(), state.mailer.clone());

    let login_id = use_case.verify_code(&req.email, &req.code).await?;

    Ok(Json(FindLoginIdResponse {
        login_id: login_id.as_str().to_string(),
    }))
}

/// POST /api/auth/reset-password
pub async fn reset_password<R, M, G>(
    State(state): State<AuthAppState<R, M, G>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
    M: MailSender + Send + Sync + 'static,
    G: OAuthUserInfoGateway + Send + Sync + 'static,
{
    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());

    use_case
        .execute(ResetPasswordInput {
            login_id: req.login_id,
            email: req.email,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn access_token_body(token: IssuedToken) -> AccessTokenResponse {
    AccessTokenResponse {
        access_token: token.token,
        access_token_expires_at: token.expires_at,
    }
}

/// Access token in the body, refresh token in its cookie
fn token_response(
    config: &AuthConfig,
    jar: CookieJar,
    tokens: LoginTokens,
) -> (CookieJar, Json<AccessTokenResponse>) {
    let cookie = config
        .refresh_cookie()
        .build(tokens.refresh_token.token, tokens.refresh_max_age_secs);

    (jar.add(cookie), Json(access_token_body(tokens.access_token)))
}
