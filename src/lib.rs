//! A route table shared by a server-side [Router] and a client-side [Fetcher].
//!
//! Routes are registered as path templates like `/users/:id/cats/:cat`. The
//! router matches incoming requests against them in registration order; the
//! fetcher renders the same templates with parameter values and sends the
//! result through a [Transport].
//!
//! # Example usage
//!
//! ```
//! use http::StatusCode;
//! use little_router::{Fetcher, HandlerContext, InMemoryTransport, RequestInit, Response, Router};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let router = Router::builder()
//!     .get("/users/:id", |ctx: HandlerContext| async move {
//!         let id = ctx.params.get("id").unwrap_or_default().to_string();
//!         Ok(Response::text(StatusCode::OK, format!("User: {id}")))
//!     })
//!     .build()?;
//!
//! let fetcher = Fetcher::new(InMemoryTransport::from(router));
//! let response = fetcher
//!     .get("/users/:id", [("id", "1")], RequestInit::new())
//!     .await?;
//! assert_eq!(response.text_body()?, "User: 1");
//! # Ok(())
//! # }
//! ```
pub(crate) mod error;
pub mod fetcher;
pub mod http;
pub(crate) mod method;
#[cfg(feature = "tcp")]
pub mod net;
pub(crate) mod params;
pub mod router;
pub mod template;
pub(crate) mod utils;

pub use error::{Error, Result, TemplateError};
pub use fetcher::{Fetcher, InMemoryTransport, RequestInit, Transport};
pub use crate::http::{Request, Response};
pub use method::RequestMethod;
#[cfg(feature = "tcp")]
pub use net::{TcpServer, TcpServerBuilder, TcpTransport};
pub use params::Params;
pub use router::{
    Handler, HandlerContext, MatchResult, Plugin, RouteEntry, RouteTable, Router, RouterBuilder,
};
pub use template::{PathTemplate, Segment};
