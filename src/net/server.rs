use anyhow::{Context, Result};
use http::header;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::{
    io::{self, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    time,
};
use tracing::{debug, error, info, warn};

use crate::{
    http::{HeaderMapExt, ReadRequest, WriteResponse},
    Response, Router,
};

/// Pause after a failed accept, e.g. when the process is out of file
/// descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// A builder for a [TcpServer].
pub struct TcpServerBuilder {
    router: Arc<Router>,
    host: IpAddr,
    port: u16,
}

impl TcpServerBuilder {
    fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 80,
        }
    }

    /// Set the host to listen on.
    /// The default host is 127.0.0.1
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Set the port to listen on. Port 0 lets the OS pick a free one.
    /// The default port is 80
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub async fn bind(self) -> Result<TcpServer> {
        let addr = SocketAddr::new(self.host, self.port);
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to address: {}", addr))?;
        Ok(TcpServer {
            listener,
            router: self.router,
        })
    }
}

/// Serves a [Router] over HTTP/1.1, one request per connection.
pub struct TcpServer {
    listener: TcpListener,
    router: Arc<Router>,
}

impl TcpServer {
    pub fn builder<R: Into<Arc<Router>>>(router: R) -> TcpServerBuilder {
        TcpServerBuilder::new(router.into())
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the task is dropped. Accept errors are
    /// logged and retried.
    pub async fn run(self) -> Result<()> {
        info!(addr = ?self.listener.local_addr().ok(), "Listening");
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!("Failed to accept connection: {}", err);
                    time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            debug!(peer = %peer, "Accepted connection");
            let router = self.router.clone();
            tokio::spawn(async move {
                if let Err(err) = serve(&router, stream).await {
                    warn!(peer = %peer, "Connection failed: {}", err);
                }
            });
        }
    }
}

async fn serve(router: &Router, stream: TcpStream) -> io::Result<()> {
    let (rx, mut tx) = stream.into_split();
    let request = BufReader::new(rx).read_request().await?;
    debug!(target: "server", stage = "request", data = ?request, "1 - parsed request");
    let mut response = match router.handle(request).await {
        Ok(response) => response,
        Err(err) => {
            error!("Handler failed: {:?}", err);
            Response::error()
        }
    };
    response
        .headers_mut()
        .insert(header::CONNECTION, header::HeaderValue::from_static("close"));
    tx.write_response(&response).await?;
    debug!(target: "server", stage = "response", status = %response.status, "2 - wrote response");
    tx.shutdown().await
}
