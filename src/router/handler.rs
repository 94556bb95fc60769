use std::future::Future;

use async_trait::async_trait;
use http::Extensions;

use crate::{http::Request, Params, Response};

/// What a matched handler receives: the captured path parameters, the
/// request that matched and whatever the route's plugins left behind.
#[derive(Debug)]
pub struct HandlerContext {
    pub params: Params,
    pub request: Request,
    pub extensions: Extensions,
}

/// Produces the response for a matched route.
///
/// Any `Fn(HandlerContext) -> impl Future<Output = anyhow::Result<Response>>`
/// is a handler. Errors are handed back to the caller of
/// [Router::handle](crate::Router::handle) as they are.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: HandlerContext) -> anyhow::Result<Response>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
{
    async fn handle(&self, ctx: HandlerContext) -> anyhow::Result<Response> {
        self(ctx).await
    }
}
