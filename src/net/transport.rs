use std::net::SocketAddr;

use anyhow::Context;
use async_trait::async_trait;
use http::{header, HeaderValue};
use tokio::{io::BufReader, net::TcpStream};
use tracing::debug;

use crate::{
    fetcher::{request_target, RequestInit, Transport},
    http::{HeaderMapExt, ReadResponse, Request, WriteRequest},
    Response,
};

/// Sends each request over a fresh TCP connection to `addr`.
///
/// The scheme and authority of the URL are ignored; only its path and query
/// go on the wire.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&self, url: String, init: RequestInit) -> anyhow::Result<Response> {
        let target = request_target(&url)?;
        let body = init.body.unwrap_or_default();
        let mut request = Request::new(init.method.into(), target).with_headers(init.headers);
        request.insert_header(header::HOST, self.addr.to_string())?;
        request
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        request
            .headers_mut()
            .insert(header::CONNECTION, HeaderValue::from_static("close"));
        let request = request.with_body(body);

        let stream = TcpStream::connect(self.addr)
            .await
            .with_context(|| format!("Failed to connect to {}", self.addr))?;
        let (rx, mut tx) = stream.into_split();
        tx.write_request(&request).await?;
        debug!(addr = %self.addr, request = ?request, "Sent request");
        let response = BufReader::new(rx).read_response().await?;
        Ok(response)
    }
}
