use std::{future::Future, sync::Arc};

use tracing::debug;

use crate::{Handler, HandlerContext, Plugin, RequestMethod, Response, Result};

use super::{table::RouteTable, Router};

struct Route {
    method: RequestMethod,
    pattern: String,
    plugins: Vec<Arc<dyn Plugin>>,
    handler: Arc<dyn Handler>,
}

/// Collects routes and compiles them all at [RouterBuilder::build].
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route whose `plugins` run in order before `handler`.
    pub fn route<S, H>(
        mut self,
        method: RequestMethod,
        pattern: S,
        plugins: Vec<Arc<dyn Plugin>>,
        handler: H,
    ) -> Self
    where
        S: Into<String>,
        H: Handler + 'static,
    {
        self.routes.push(Route {
            method,
            pattern: pattern.into(),
            plugins,
            handler: Arc::new(handler),
        });
        self
    }

    pub fn get<S, F, Fut>(self, pattern: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        self.route(RequestMethod::Get, pattern, Vec::new(), handler)
    }

    pub fn post<S, F, Fut>(self, pattern: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        self.route(RequestMethod::Post, pattern, Vec::new(), handler)
    }

    pub fn put<S, F, Fut>(self, pattern: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        self.route(RequestMethod::Put, pattern, Vec::new(), handler)
    }

    pub fn delete<S, F, Fut>(self, pattern: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        self.route(RequestMethod::Delete, pattern, Vec::new(), handler)
    }

    pub fn patch<S, F, Fut>(self, pattern: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        self.route(RequestMethod::Patch, pattern, Vec::new(), handler)
    }

    /// Registers every route in order. The first invalid or duplicate route
    /// aborts the build.
    pub fn build(self) -> Result<Router> {
        let mut table = RouteTable::new();
        for route in self.routes {
            let plugins = route.plugins.len();
            table.register(route.method, &route.pattern, route.plugins, route.handler)?;
            debug!(method = %route.method, pattern = %route.pattern, plugins, "Registered route");
        }
        Ok(Router::new(table))
    }
}
