//! Request-scoped authentication context decoded from cookies.
//!
//! The application does not implement authentication itself. An upstream
//! gateway sets the cookies and they are trusted verbatim here: a `session`
//! cookie marks the request as authenticated, `isAdmin`/`isMgr` carry "1"
//! for elevated roles, and `user`/`uid` hold base64-encoded identity values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Identity and role context for one request.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    /// Whether a session cookie was present.
    pub authenticated: bool,
    /// Whether the `isAdmin` cookie was "1".
    pub admin: bool,
    /// Whether the `isMgr` cookie was "1".
    pub manager: bool,
    /// Decoded username from the `user` cookie.
    pub username: String,
    /// Decoded user id from the `uid` cookie.
    pub user_id: String,
}

impl AuthContext {
    /// Builds the context from raw cookie values.
    ///
    /// Role cookies only count when a session cookie is present. Malformed
    /// base64 in the identity cookies decodes to an empty string rather
    /// than failing the request.
    #[must_use]
    pub fn from_cookies(
        session: Option<&str>,
        is_admin: Option<&str>,
        is_mgr: Option<&str>,
        user: Option<&str>,
        uid: Option<&str>,
    ) -> Self {
        let authenticated = session.is_some_and(|s| !s.is_empty());

        Self {
            authenticated,
            admin: authenticated && is_admin == Some("1"),
            manager: authenticated && is_mgr == Some("1"),
            username: decode_identity(user),
            user_id: decode_identity(uid),
        }
    }
}

/// Leniently decodes a base64 identity cookie value.
fn decode_identity(value: Option<&str>) -> String {
    value
        .and_then(|v| BASE64.decode(v).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_without_session() {
        let ctx = AuthContext::from_cookies(None, Some("1"), Some("1"), None, None);

        assert!(!ctx.authenticated);
        assert!(!ctx.admin);
        assert!(!ctx.manager);
    }

    #[test]
    fn test_admin_requires_session() {
        let ctx = AuthContext::from_cookies(Some("abc"), Some("1"), None, None, None);

        assert!(ctx.authenticated);
        assert!(ctx.admin);
        assert!(!ctx.manager);
    }

    #[test]
    fn test_role_cookie_must_be_one() {
        let ctx = AuthContext::from_cookies(Some("abc"), Some("yes"), Some("0"), None, None);

        assert!(!ctx.admin);
        assert!(!ctx.manager);
    }

    #[test]
    fn test_identity_cookies_decoded() {
        // "alice" / "u-42" in base64
        let ctx = AuthContext::from_cookies(
            Some("abc"),
            None,
            None,
            Some("YWxpY2U="),
            Some("dS00Mg=="),
        );

        assert_eq!(ctx.username, "alice");
        assert_eq!(ctx.user_id, "u-42");
    }

    #[test]
    fn test_malformed_identity_is_empty() {
        let ctx = AuthContext::from_cookies(Some("abc"), None, None, Some("%%%"), None);

        assert_eq!(ctx.username, "");
    }

    #[test]
    fn test_empty_session_is_anonymous() {
        let ctx = AuthContext::from_cookies(Some(""), Some("1"), None, None, None);

        assert!(!ctx.authenticated);
        assert!(!ctx.admin);
    }
}
