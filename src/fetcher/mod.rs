//! The client side: builds URLs from the same templates the router matches
//! and hands them to a [Transport].

mod init;
mod transport;

pub use init::RequestInit;
pub use transport::{InMemoryTransport, Transport};

pub(crate) use transport::request_target;

use tracing::debug;

use crate::{utils::Also, Error, Params, PathTemplate, RequestMethod, Response};

/// Renders path templates into URLs and sends them through a transport.
///
/// The fetcher does not know which routes exist: a pattern nobody registered
/// is rendered and sent like any other, and the transport decides what
/// happens (usually a 404 from the router). Responses are returned as the
/// transport produced them, whatever their status.
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: String::new(),
        }
    }

    /// Prefix for every rendered path, e.g. `http://localhost:8080`.
    /// Empty by default.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fails with [Error::InvalidTemplate] or [Error::MissingParam] when the
    /// path cannot be rendered, and with [Error::BodyNotAllowed] for a GET
    /// with a body. Anything else is the transport's result.
    pub async fn request<P: Into<Params>>(
        &self,
        method: RequestMethod,
        pattern: &str,
        params: P,
        mut init: RequestInit,
    ) -> anyhow::Result<Response> {
        let path = PathTemplate::compile(pattern)?.render(&params.into())?;
        if init.body.is_some() && !method.allows_body() {
            return Err(Error::BodyNotAllowed { method }.into());
        }
        init.method = method;
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, pattern = %pattern, "-->");
        self.transport
            .send(url, init)
            .await
            .also(|r| debug!(method = %method, pattern = %pattern, response = ?r, "<--"))
    }

    pub async fn get<P: Into<Params>>(
        &self,
        pattern: &str,
        params: P,
        init: RequestInit,
    ) -> anyhow::Result<Response> {
        self.request(RequestMethod::Get, pattern, params, init).await
    }

    pub async fn post<P: Into<Params>>(
        &self,
        pattern: &str,
        params: P,
        init: RequestInit,
    ) -> anyhow::Result<Response> {
        self.request(RequestMethod::Post, pattern, params, init).await
    }

    pub async fn put<P: Into<Params>>(
        &self,
        pattern: &str,
        params: P,
        init: RequestInit,
    ) -> anyhow::Result<Response> {
        self.request(RequestMethod::Put, pattern, params, init).await
    }

    pub async fn delete<P: Into<Params>>(
        &self,
        pattern: &str,
        params: P,
        init: RequestInit,
    ) -> anyhow::Result<Response> {
        self.request(RequestMethod::Delete, pattern, params, init).await
    }

    pub async fn patch<P: Into<Params>>(
        &self,
        pattern: &str,
        params: P,
        init: RequestInit,
    ) -> anyhow::Result<Response> {
        self.request(RequestMethod::Patch, pattern, params, init).await
    }
}
