use std::{fmt::Debug, sync::Arc};

use http::Method;

use crate::{Error, Handler, Params, PathTemplate, Plugin, RequestMethod, Result};

pub struct RouteEntry {
    pub method: RequestMethod,
    pub template: PathTemplate,
    pub plugins: Box<[Arc<dyn Plugin>]>,
    pub handler: Arc<dyn Handler>,
}

impl Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("template", &self.template.pattern())
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct MatchResult<'a> {
    pub entry: &'a RouteEntry,
    pub params: Params,
}

/// Routes in registration order.
///
/// Lookup returns the first registered entry whose method and template match,
/// so an earlier `/users/:id` shadows a later `/users/me`.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [Error::InvalidTemplate] for a malformed pattern and with
    /// [Error::DuplicateRoute] when an entry with the same method and the same
    /// template shape exists. The table is unchanged on failure.
    pub fn register<S: AsRef<str>>(
        &mut self,
        method: RequestMethod,
        pattern: S,
        plugins: Vec<Arc<dyn Plugin>>,
        handler: Arc<dyn Handler>,
    ) -> Result<()> {
        let template = PathTemplate::compile(pattern)?;
        if self
            .entries
            .iter()
            .any(|entry| entry.method == method && entry.template.same_shape(&template))
        {
            return Err(Error::DuplicateRoute {
                method,
                pattern: template.pattern().to_string(),
            });
        }
        self.entries.push(RouteEntry {
            method,
            template,
            plugins: plugins.into_boxed_slice(),
            handler,
        });
        Ok(())
    }

    pub fn lookup(&self, method: &Method, path: &str) -> Option<MatchResult<'_>> {
        self.entries
            .iter()
            .filter(|entry| entry.method == *method)
            .find_map(|entry| {
                entry
                    .template
                    .matches(path)
                    .map(|params| MatchResult { entry, params })
            })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{HandlerContext, Response};

    async fn ok(_: HandlerContext) -> anyhow::Result<Response> {
        Ok(Response::text(http::StatusCode::OK, "ok"))
    }

    fn handler() -> Arc<dyn Handler> {
        Arc::new(ok)
    }

    fn table(routes: &[(RequestMethod, &str)]) -> RouteTable {
        let mut table = RouteTable::new();
        for (method, pattern) in routes {
            table.register(*method, pattern, Vec::new(), handler()).unwrap();
        }
        table
    }

    fn matched(table: &RouteTable, method: Method, path: &str) -> Option<(String, Params)> {
        table
            .lookup(&method, path)
            .map(|result| (result.entry.template.pattern().to_string(), result.params))
    }

    #[test]
    fn should_prefer_first_registered_route() {
        let table = table(&[
            (RequestMethod::Get, "/users/:id"),
            (RequestMethod::Get, "/users/me"),
        ]);
        assert_eq!(
            matched(&table, Method::GET, "/users/me"),
            Some(("/users/:id".to_string(), Params::from([("id", "me")])))
        );
    }

    #[test]
    fn should_isolate_methods() {
        let table = table(&[(RequestMethod::Get, "/x")]);
        assert_eq!(matched(&table, Method::POST, "/x"), None);
        assert_eq!(
            matched(&table, Method::GET, "/x"),
            Some(("/x".to_string(), Params::new()))
        );
        assert_eq!(matched(&table, Method::OPTIONS, "/x"), None);
    }

    #[test]
    fn should_continue_past_method_mismatch() {
        let table = table(&[
            (RequestMethod::Post, "/users/:id"),
            (RequestMethod::Get, "/users/:user"),
        ]);
        assert_eq!(
            matched(&table, Method::GET, "/users/1"),
            Some(("/users/:user".to_string(), Params::from([("user", "1")])))
        );
    }

    #[test]
    fn should_reject_duplicate_routes() {
        let mut table = table(&[(RequestMethod::Get, "/users/:id")]);
        let result = table.register(RequestMethod::Get, "/users/:uid", Vec::new(), handler());
        assert!(matches!(
            result,
            Err(Error::DuplicateRoute { method: RequestMethod::Get, ref pattern }) if pattern == "/users/:uid"
        ));
        assert_eq!(table.len(), 1);
        table
            .register(RequestMethod::Delete, "/users/:id", Vec::new(), handler())
            .unwrap();
        table
            .register(RequestMethod::Get, "/users/me", Vec::new(), handler())
            .unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn should_reject_invalid_template() {
        let mut table = RouteTable::new();
        let result = table.register(RequestMethod::Get, "/a//b", Vec::new(), handler());
        assert!(matches!(result, Err(Error::InvalidTemplate { .. })));
        assert!(table.is_empty());
    }
}
