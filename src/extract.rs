use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::gate::FlagQuery;

/// Extractor for the request's raw `Cookie` header, as [`FlagQuery::server`]
/// expects it.
///
/// Infallible on purpose: a request without the header, or with one that is
/// not valid UTF-8, extracts as the empty string — server context with no
/// cookies set, which still selects the gate's server mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieHeader(pub String);

impl CookieHeader {
    /// A server-mode query resolving `flag_name` against this header
    pub fn query(&self, flag_name: &str) -> FlagQuery {
        FlagQuery::server(flag_name, &self.0)
    }
}

impl<S> FromRequestParts<S> for CookieHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        Ok(CookieHeader(raw.to_string()))
    }
}
