//! HTTP/1.1 over TCP: a server for a [Router](crate::Router) and a
//! [Transport](crate::Transport) for a [Fetcher](crate::Fetcher).

mod server;
mod transport;

pub use server::{TcpServer, TcpServerBuilder};
pub use transport::TcpTransport;
