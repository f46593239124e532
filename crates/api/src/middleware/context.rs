//! Cookie-context middleware.
//!
//! An upstream gateway authenticates users and sets cookies; this
//! middleware decodes them into an [`AuthContext`] and stores it in
//! request extensions. Requests are never rejected here, the context
//! is informational.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::debug;

use ledgerline_shared::AuthContext;

/// Decodes the identity cookies and attaches the context to the request.
pub async fn context_middleware(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let context = AuthContext::from_cookies(
        jar.get("session").map(|c| c.value()),
        jar.get("isAdmin").map(|c| c.value()),
        jar.get("isMgr").map(|c| c.value()),
        jar.get("user").map(|c| c.value()),
        jar.get("uid").map(|c| c.value()),
    );

    if context.admin {
        debug!(user = %context.username, "Admin request");
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Extractor for the request's identity context.
///
/// Use this in handlers to read who made the request:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let name = auth.username();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl AuthUser {
    /// Returns the decoded username, empty when anonymous.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.0.username
    }

    /// Whether the request carried the admin cookie.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.0.admin
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        // Anonymous context when the middleware did not run (tests).
        Ok(Self(
            parts
                .extensions
                .get::<AuthContext>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}
