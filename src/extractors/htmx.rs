//! Extract htmx request headers for plain axum handlers.

use crate::mixins::Htmx;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// htmx request headers as an [`Htmx`] value. Never rejects.
#[derive(Clone, Debug)]
pub struct HxHeaders(pub Htmx);

#[async_trait]
impl<S> FromRequestParts<S> for HxHeaders
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(HxHeaders(Htmx::from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::FragmentAware;
    use axum::http::Request;

    #[tokio::test]
    async fn reads_headers_from_parts() {
        let (mut parts, _) = Request::builder()
            .uri("/rows")
            .header("HX-Request", "true")
            .header("HX-Target", "#rows")
            .body(())
            .unwrap()
            .into_parts();
        let HxHeaders(htmx) = HxHeaders::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(htmx.should_render_fragment());
        assert_eq!(htmx.target, "#rows");
    }
}
