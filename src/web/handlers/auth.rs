//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{
    clear_cookie, session_cookie, AuthError, AuthService, ProfileUpdateInput, SignupInput,
    TokenIssuer,
};
use crate::config::Config;
use crate::db::{AccountRepository, AccountStore, Database};
use crate::media::{DisabledImageStore, HttpImageStore, ImageStore};
use crate::web::dto::{
    AccountResponse, LoginRequest, MessageResponse, SignupRequest, UpdateProfileRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthAccount;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service.
    pub auth: Arc<AuthService>,
    /// Token issuer, shared with the session middleware.
    pub issuer: Arc<TokenIssuer>,
    /// Whether session cookies require encrypted transport.
    pub secure_cookies: bool,
    /// Whether error bodies may carry diagnostic detail (development only).
    pub expose_error_detail: bool,
}

impl AppState {
    /// Build the application state from configuration and a connected database.
    pub fn new(config: &Config, db: &Database) -> crate::Result<Self> {
        let store: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(db.pool().clone()));
        let images: Arc<dyn ImageStore> = match config.media.upload_url {
            Some(ref url) => Arc::new(HttpImageStore::new(url.clone())),
            None => Arc::new(DisabledImageStore),
        };
        Self::with_collaborators(config, store, images)
    }

    /// Build the application state with explicit collaborators.
    ///
    /// Used by tests to substitute the image store or the account store.
    pub fn with_collaborators(
        config: &Config,
        store: Arc<dyn AccountStore>,
        images: Arc<dyn ImageStore>,
    ) -> crate::Result<Self> {
        let issuer = Arc::new(TokenIssuer::new(&config.auth.jwt_secret)?);
        let auth = Arc::new(AuthService::new(store, images, issuer.clone()));

        Ok(Self {
            auth,
            issuer,
            secure_cookies: config.environment.is_production(),
            expose_error_detail: !config.environment.is_production(),
        })
    }

    fn api_error(&self, err: AuthError) -> ApiError {
        ApiError::from_auth(err, self.expose_error_detail)
    }
}

/// POST /api/auth/signup - Create an account and establish a session.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AccountResponse>), ApiError> {
    let session = state
        .auth
        .signup(SignupInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        })
        .await
        .map_err(|e| state.api_error(e))?;

    // The account is durable at this point; only now is a cookie attached
    let jar = jar.add(session_cookie(session.token, state.secure_cookies));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AccountResponse::from(session.account)),
    ))
}

/// POST /api/auth/login - Authenticate and establish a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AccountResponse>), ApiError> {
    let session = state
        .auth
        .login(&req.email, &req.password)
        .await
        .map_err(|e| state.api_error(e))?;

    let jar = jar.add(session_cookie(session.token, state.secure_cookies));

    Ok((jar, Json(AccountResponse::from(session.account))))
}

/// POST /api/auth/logout - Clear the client-held session.
///
/// Idempotent: clearing an absent cookie produces the same response.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(clear_cookie(state.secure_cookies));
    (jar, Json(MessageResponse::new("Logged out successfully")))
}

/// PUT /api/auth/update-profile - Partially update the authenticated account.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthAccount(account_id): AuthAccount,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .auth
        .update_profile(
            &account_id,
            ProfileUpdateInput {
                full_name: req.full_name,
                email: req.email,
                profile_pic: req.profile_pic,
            },
        )
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(AccountResponse::from(account)))
}

/// GET /api/auth/check - Return the authenticated account's public view.
pub async fn check(
    State(state): State<Arc<AppState>>,
    AuthAccount(account_id): AuthAccount,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .auth
        .check_auth(&account_id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(AccountResponse::from(account)))
}
