//! Bearer token extraction.
//!
//! The token is only lifted out of the `Authorization` header here;
//! verification happens in the mutation service so every operation
//! authenticates the same way.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};

/// The raw bearer token, if the request carried one.
///
/// ```ignore
/// async fn protected_route(token: BearerToken) -> impl Responder {
///     state.mutations.delete_post(token.as_deref(), id).await
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Parse `Bearer <token>`; the scheme is matched case-insensitively.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .map(str::to_owned);

        if token.is_none() && req.headers().contains_key(header::AUTHORIZATION) {
            tracing::debug!("Authorization header present but not a bearer token");
        }

        ready(Ok(BearerToken(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn extract(req: TestRequest) -> BearerToken {
        let (req, mut payload) = req.to_http_parts();
        BearerToken::from_request(&req, &mut payload)
            .into_inner()
            .unwrap()
    }

    #[test]
    fn test_extracts_bearer_token() {
        let token = extract(
            TestRequest::default().insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi")),
        );
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let token =
            extract(TestRequest::default().insert_header((header::AUTHORIZATION, "bearer abc")));
        assert_eq!(token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_or_foreign_scheme_is_none() {
        assert!(extract(TestRequest::default()).0.is_none());
        assert!(
            extract(TestRequest::default().insert_header((header::AUTHORIZATION, "Basic dXNlcg==")))
                .0
                .is_none()
        );
        assert!(
            extract(TestRequest::default().insert_header((header::AUTHORIZATION, "Bearer  ")))
                .0
                .is_none()
        );
    }
}
