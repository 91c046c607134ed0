//! Authentication, profile and token lifecycle.

use std::time::Duration;

use serde_json::{json, Value};

use crate::api::endpoints;
use crate::api::types::OtpPurpose;
use crate::api::{report, send, str_field, ApiError};
use crate::auth::{Session, TokenStore, UserProfile};
use crate::clients::{
    FileUpload, HttpClient, HttpMethod, HttpRequest, MultipartForm, ResponseEnvelope,
};
use crate::ui::NoticeLevel;

/// Authentication operations.
///
/// # Example
///
/// ```rust,ignore
/// let auth = store.auth();
///
/// let session = auth.login("jane@example.com", "hunter2").await?;
/// assert!(auth.is_logged_in());
///
/// if auth.is_admin() {
///     println!("Welcome back, admin");
/// }
///
/// auth.logout().await;
/// assert!(!auth.is_logged_in());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AuthApi<'a> {
    client: &'a HttpClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend rejects the registration.
    pub async fn register(&self, user: Value) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::REGISTER)
                .json(user)
                .requires_auth(false),
        )
        .await;
        report(self.client.ui(), result, Some("Registration successful"))
    }

    /// Sends a one-time password to `email`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses to send the code.
    pub async fn send_otp(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::SEND_OTP)
                .json(json!({ "email": email, "type": purpose }))
                .requires_auth(false),
        )
        .await;
        report(self.client.ui(), result, Some("OTP code sent"))
    }

    /// Logs in, stores the token pair and caches the user profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the credentials are rejected,
    /// [`ApiError::MissingField`] if the response carries no access token,
    /// or any error from fetching the profile. Tokens saved before a
    /// profile failure stay saved.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let result = self.login_and_cache_profile(email, password).await;
        report(self.client.ui(), result, Some("Login successful"))
    }

    async fn login_and_cache_profile(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::LOGIN)
                .json(json!({ "email": email, "password": password }))
                .requires_auth(false),
        )
        .await?;

        let (access, refresh) = read_token_pair(&envelope.data)?;
        self.tokens().save(&access, &refresh);
        tracing::debug!("Login succeeded, fetching profile");

        let user = self.profile().await?;

        Ok(Session::new(
            access,
            self.tokens().refresh_token(),
            Some(user),
        ))
    }

    /// Logs out.
    ///
    /// Tells the backend to revoke the refresh token when one is stored,
    /// then always clears the session, notifies and schedules the redirect
    /// to the home page. Backend failures are logged, never returned.
    pub async fn logout(&self) {
        if let Some(refresh) = self.tokens().refresh_token() {
            let result = send(
                self.client,
                HttpRequest::builder(HttpMethod::Post, endpoints::auth::LOGOUT)
                    .json(json!({ "refresh_token": refresh })),
            )
            .await;
            if let Err(e) = result {
                tracing::warn!(error = %e, "Logout request failed, clearing session anyway");
            }
        }

        self.tokens().clear();

        let ui = self.client.ui();
        let config = self.client.config();
        ui.notify(NoticeLevel::Success, "Logged out");
        ui.redirect(config.home_path(), config.logout_redirect_delay());
    }

    /// Fetches the current user's profile and caches it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails, or
    /// [`ApiError::Decode`] if the payload is not a profile.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::auth::PROFILE),
        )
        .await?;

        let user = envelope
            .into_data::<UserProfile>()
            .map_err(|e| ApiError::decode("user profile", e))?;
        self.tokens().save_user(&user);
        Ok(user)
    }

    /// Updates the current user's profile and caches the returned copy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the update is rejected, or
    /// [`ApiError::Decode`] if the payload is not a profile.
    pub async fn update_profile(&self, changes: Value) -> Result<UserProfile, ApiError> {
        let result = self.update_and_cache_profile(changes).await;
        report(self.client.ui(), result, Some("Profile updated"))
    }

    async fn update_and_cache_profile(&self, changes: Value) -> Result<UserProfile, ApiError> {
        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Patch, endpoints::auth::PROFILE).json(changes),
        )
        .await?;

        let user = envelope
            .into_data::<UserProfile>()
            .map_err(|e| ApiError::decode("user profile", e))?;
        self.tokens().save_user(&user);
        Ok(user)
    }

    /// Uploads a new avatar as the multipart field `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the upload is rejected.
    pub async fn upload_avatar(&self, file: FileUpload) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::AVATAR)
                .multipart(MultipartForm::new().file("file", file)),
        )
        .await;
        report(self.client.ui(), result, Some("Avatar updated"))
    }

    /// Exchanges the stored refresh token for a new token pair.
    ///
    /// On any failure the session is cleared and the login redirect is
    /// scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingRefreshToken`] if no refresh token is
    /// stored, [`ApiError::Http`] if the backend rejects it, or
    /// [`ApiError::MissingField`] if the response carries no access token.
    pub async fn refresh_token(&self) -> Result<Session, ApiError> {
        let result = self.exchange_refresh_token().await;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Token refresh failed, clearing session");
            // An HTTP 401 has already torn the session down and redirected.
            if !e.session_expired() {
                self.tokens().clear();
                self.client
                    .ui()
                    .redirect(self.client.config().login_path(), Duration::ZERO);
            }
        }

        result
    }

    async fn exchange_refresh_token(&self) -> Result<Session, ApiError> {
        let refresh = self
            .tokens()
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?;

        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::REFRESH_TOKEN)
                .json(json!({ "refreshToken": refresh }))
                .requires_auth(false),
        )
        .await?;

        let (access, new_refresh) = read_token_pair(&envelope.data)?;
        self.tokens().save(&access, &new_refresh);

        Ok(Session::new(
            access,
            self.tokens().refresh_token(),
            self.tokens().user(),
        ))
    }

    /// Refreshes the token pair if the access token's `exp` has passed.
    ///
    /// Returns `true` if a refresh happened. Opaque tokens without an `exp`
    /// claim are never refreshed.
    ///
    /// # Errors
    ///
    /// Returns any error from [`refresh_token`](Self::refresh_token).
    pub async fn refresh_if_expired(&self) -> Result<bool, ApiError> {
        match self.tokens().session() {
            Some(session) if session.expired() => {
                self.refresh_token().await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Sets a new password using an emailed one-time code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the code or password is rejected.
    pub async fn forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::FORGOT_PASSWORD)
                .json(json!({ "email": email, "code": code, "newPassword": new_password }))
                .requires_auth(false),
        )
        .await;
        report(self.client.ui(), result, Some("Password changed"))
    }

    /// Resets a password with a backend-defined payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the reset is rejected.
    pub async fn reset_password(&self, body: Value) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::auth::RESET_PASSWORD)
                .json(body)
                .requires_auth(false),
        )
        .await;
        report(self.client.ui(), result, Some("Password reset"))
    }

    /// Returns `true` if an access token is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.tokens().is_authenticated()
    }

    /// Returns the cached user profile.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.tokens().user()
    }

    /// Returns `true` if the cached user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user().as_ref().is_some_and(UserProfile::is_admin)
    }
}

/// Reads `(access, refresh)` from a token response; `refresh` may be empty.
fn read_token_pair(data: &Value) -> Result<(String, String), ApiError> {
    let access = str_field(data, &["access_token", "accessToken"]).ok_or(
        ApiError::MissingField {
            field: "access_token",
        },
    )?;
    let refresh = str_field(data, &["refresh_token", "refreshToken"]).unwrap_or_default();
    Ok((access, refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_token_pair_accepts_both_casings() {
        let snake = json!({"access_token": "a", "refresh_token": "r"});
        assert_eq!(
            read_token_pair(&snake).unwrap(),
            ("a".to_string(), "r".to_string())
        );

        let camel = json!({"accessToken": "a2"});
        assert_eq!(
            read_token_pair(&camel).unwrap(),
            ("a2".to_string(), String::new())
        );
    }

    #[test]
    fn test_read_token_pair_requires_access_token() {
        let result = read_token_pair(&json!({"refreshToken": "r"}));
        assert!(matches!(
            result,
            Err(ApiError::MissingField {
                field: "access_token"
            })
        ));
    }
}
