//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler, and every handler receives a clone of the router's state.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use serde_json::json;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Built once at startup around the application state `S` and handed to
/// [`Server::serve`](crate::Server::serve). Each [`Router::on`] call returns
/// `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

/// Outcome of matching a method + path pair against the routing table.
pub(crate) enum Route<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    /// The path exists, but only for the listed methods.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Matches `method` and `path`. `HEAD` falls back to the `GET` route
    /// when no `HEAD` route is registered for the path.
    pub(crate) fn lookup(&self, method: Method, path: &str) -> Route<S> {
        if let Some(found) = self.find(method, path) {
            return found;
        }
        if method == Method::Head {
            if let Some(found) = self.find(Method::Get, path) {
                return found;
            }
        }

        let allowed: Vec<Method> = Method::ALL.into_iter()
            .filter(|&m| self.serves(m, path) || (m == Method::Head && self.serves(Method::Get, path)))
            .collect();
        if allowed.is_empty() {
            Route::NotFound
        } else {
            Route::MethodNotAllowed(allowed)
        }
    }

    fn find(&self, method: Method, path: &str) -> Option<Route<S>> {
        let matched = self.routes.get(&method)?.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some(Route::Found(handler, params))
    }

    fn serves(&self, method: Method, path: &str) -> bool {
        self.routes.get(&method).is_some_and(|tree| tree.at(path).is_ok())
    }

    /// Routes one request and produces one response, without a socket.
    ///
    /// This is the same path the server takes for every request; it is
    /// public so the application can be exercised in-process. Responses to
    /// `HEAD` keep their status and headers but never carry a body.
    pub async fn respond(&self, mut req: Request) -> Response {
        let method = req.method;
        let mut response = match self.lookup(method, &req.path) {
            Route::Found(handler, params) => {
                req.params = params;
                handler.call(req, self.state.clone()).await
            }
            Route::MethodNotAllowed(allowed) => method_not_allowed(&allowed),
            Route::NotFound => not_found(),
        };
        if method == Method::Head {
            response.body.clear();
        }
        response
    }
}

pub(crate) fn not_found() -> Response {
    Response::builder()
        .status(Status::NotFound)
        .json_value(&json!({ "error": "not found" }))
}

pub(crate) fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .json_value(&json!({ "error": "method not allowed" }))
}
