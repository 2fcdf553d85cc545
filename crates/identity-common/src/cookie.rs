//! Named cookie lookup on inbound requests.
//!
//! The client never inspects an inbound request beyond its `Cookie` headers,
//! so the inbound side is modelled as a [`CookieSource`] rather than a
//! concrete request type. Implementations are provided for the `http` crate's
//! request, request parts and header map, which covers axum, hyper and most
//! other Rust HTTP servers.

use http::header::COOKIE;
use http::{HeaderMap, Request, request::Parts};

/// Read-only lookup of a cookie by name.
pub trait CookieSource {
    /// Returns the value of the first cookie called `name`, if present.
    fn cookie(&self, name: &str) -> Option<String>;
}

impl CookieSource for HeaderMap {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get_all(COOKIE)
            .iter()
            .find_map(|value| find_cookie(value.as_bytes(), name))
    }
}

impl CookieSource for Parts {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers.cookie(name)
    }
}

impl<B> CookieSource for Request<B> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers().cookie(name)
    }
}

impl<T: CookieSource + ?Sized> CookieSource for &T {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}

/// Scans one `Cookie` header value (`a=1; b=2`) for `name`.
///
/// Works on raw bytes so that a non-ASCII value in one pair does not hide the
/// others. Pairs without `=` are skipped. A value wrapped in double quotes is
/// returned without them.
fn find_cookie(header: &[u8], name: &str) -> Option<String> {
    header.split(|&b| b == b';').find_map(|pair| {
        let eq = pair.iter().position(|&b| b == b'=')?;
        let (key, value) = pair.split_at(eq);
        if key.trim_ascii() != name.as_bytes() {
            return None;
        }
        let value = value[1..].trim_ascii();
        let value = value
            .strip_prefix(b"\"")
            .and_then(|v| v.strip_suffix(b"\""))
            .unwrap_or(value);
        Some(String::from_utf8_lossy(value).into_owned())
    })
}
