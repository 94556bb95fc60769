use async_trait::async_trait;
use http::Extensions;

use crate::http::Request;

/// A per-route step that runs before the handler.
///
/// Plugins run in the order they were given to
/// [RouterBuilder::route](crate::RouterBuilder::route). Each one sees the
/// request and may leave values in `extensions` for later plugins and for
/// the handler, which finds them in
/// [HandlerContext::extensions](crate::HandlerContext::extensions).
/// An error stops the chain: the handler is not called and the error is
/// returned from [Router::handle](crate::Router::handle) as it is.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, request: &Request, extensions: &mut Extensions) -> anyhow::Result<()>;
}
