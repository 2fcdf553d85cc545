//! Bearer token helpers.

/// The literal scheme prefix carried by every forwarded `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Ensures a token carries the `Bearer ` scheme prefix.
///
/// The check is a substring test, not an anchored prefix test: any token that
/// already contains `"Bearer "` anywhere is returned unchanged. Calling this on
/// its own output is a no-op.
///
/// # Examples
///
/// ```
/// use identity_common::normalize_bearer_prefix;
///
/// assert_eq!(normalize_bearer_prefix("abc"), "Bearer abc");
/// assert_eq!(normalize_bearer_prefix("Bearer abc"), "Bearer abc");
/// ```
#[must_use]
pub fn normalize_bearer_prefix(token: &str) -> String {
    if token.contains(BEARER_PREFIX) {
        token.to_string()
    } else {
        bearer(token)
    }
}

/// Formats a raw credential as a bearer header value.
#[must_use]
pub fn bearer(credential: &str) -> String {
    format!("{BEARER_PREFIX}{credential}")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bare_tokens_are_prefixed(token in ".*") {
            prop_assume!(!token.contains(BEARER_PREFIX));
            prop_assert_eq!(normalize_bearer_prefix(&token), format!("Bearer {token}"));
        }

        #[test]
        fn tokens_containing_scheme_are_unchanged(
            head in ".*",
            tail in ".*",
        ) {
            let token = format!("{head}{BEARER_PREFIX}{tail}");
            prop_assert_eq!(normalize_bearer_prefix(&token), token);
        }

        #[test]
        fn normalization_is_idempotent(token in ".*") {
            let once = normalize_bearer_prefix(&token);
            prop_assert_eq!(normalize_bearer_prefix(&once), once.clone());
        }
    }
}
