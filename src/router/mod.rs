mod builder;
mod handler;
mod plugin;
mod table;

pub use builder::RouterBuilder;
pub use handler::{Handler, HandlerContext};
pub use plugin::Plugin;
pub use table::{MatchResult, RouteEntry, RouteTable};

use http::Extensions;
use tracing::debug;

use crate::{http::Request, RequestMethod, Response};

/// Dispatches requests to the handler of the first matching route.
///
/// The route table is frozen once built, so a router can be shared behind an
/// `Arc` and serve concurrent requests without locking.
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Registered `(method, pattern)` pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (RequestMethod, &str)> {
        self.table
            .entries()
            .iter()
            .map(|entry| (entry.method, entry.template.pattern()))
    }

    /// Runs the matched route's plugins, then its handler, and returns the
    /// handler's response unchanged, or a bare 404 when no route matches.
    /// Plugin and handler errors are returned as they are.
    pub async fn handle(&self, request: Request) -> anyhow::Result<Response> {
        let Some(MatchResult { entry, params }) =
            self.table.lookup(&request.method, request.path_only())
        else {
            debug!(method = %request.method, path = %request.path, "No route matched");
            return Ok(Response::not_found());
        };
        debug!(
            method = %request.method,
            path = %request.path,
            pattern = %entry.template,
            "Matched route"
        );
        let mut extensions = Extensions::new();
        for plugin in entry.plugins.iter() {
            debug!(plugin = plugin.name(), "-->");
            plugin.run(&request, &mut extensions).await?;
        }
        entry
            .handler
            .handle(HandlerContext {
                params,
                request,
                extensions,
            })
            .await
    }
}
