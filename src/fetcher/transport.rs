use std::sync::Arc;

use async_trait::async_trait;
use http::Uri;

use super::RequestInit;
use crate::{http::Request, Error, Response, Router};

/// Sends a request somewhere and hands back whatever comes back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: String, init: RequestInit) -> anyhow::Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, url: String, init: RequestInit) -> anyhow::Result<Response> {
        (**self).send(url, init).await
    }
}

/// Delivers requests straight to a [Router] without touching the network.
#[derive(Debug, Clone)]
pub struct InMemoryTransport {
    router: Arc<Router>,
}

impl InMemoryTransport {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl From<Router> for InMemoryTransport {
    fn from(router: Router) -> Self {
        Self::new(Arc::new(router))
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, url: String, init: RequestInit) -> anyhow::Result<Response> {
        let target = request_target(&url)?;
        let request = Request::new(init.method.into(), target)
            .with_headers(init.headers)
            .with_body(init.body.unwrap_or_default());
        self.router.handle(request).await
    }
}

/// The path and query of `url`; scheme and authority are dropped.
pub(crate) fn request_target(url: &str) -> Result<String, Error> {
    let uri = url
        .parse::<Uri>()
        .map_err(|_| Error::InvalidUrl(url.to_string()))?;
    Ok(uri
        .path_and_query()
        .map(|target| target.as_str())
        .filter(|target| !target.is_empty())
        .unwrap_or("/")
        .to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_extract_request_target() {
        assert_eq!(request_target("/users/1").unwrap(), "/users/1");
        assert_eq!(
            request_target("http://localhost:8080/users/1?x=y").unwrap(),
            "/users/1?x=y"
        );
        assert_eq!(request_target("http://localhost:8080").unwrap(), "/");
        assert!(matches!(
            request_target("/users/ 1"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
