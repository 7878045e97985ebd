//! Route registration.
//!
//! A [`Router`] only records registrations. [`Router::build`] splits every
//! pattern into segments and pushes it through [`Trie::add`], producing an
//! immutable [`Routes`] table. Pattern errors surface there, each naming the
//! pattern, its module and its index within that module.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::BuildError;
use crate::guard::Guard;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::path;
use crate::routes::{Endpoint, Routes};
use crate::trie::{ModuleId, RouteDescription, Trie};

/// Module id of routers created with [`Router::new`].
pub const DEFAULT_MODULE: &str = "app";

/// The application router.
///
/// Patterns are `/`-separated segments, each one of:
///
/// | Segment       | Matches                                   |
/// |---------------|-------------------------------------------|
/// | `users`       | exactly `users`                           |
/// | `{id}`        | any one segment, captured as `id`         |
/// | `{id:int}`    | one segment passing the constraint        |
/// | `{lang=en}`   | exactly `en`, and sets `lang = "en"`      |
/// | `{*rest}`     | the rest of the path (last segment only)  |
///
/// When several routes match a path, the most specific one wins; see
/// [`Routes::resolve`].
///
/// ```rust
/// use sprig::{Method, Request, Response, Router};
/// # async fn get_user(_: Request) -> Response { Response::text("") }
/// # async fn me(_: Request) -> Response { Response::text("") }
/// # async fn create_user(_: Request) -> Response { Response::text("") }
/// let routes = Router::new()
///     .get("/users/{id:int}", get_user)
///     .get("/users/me", me)
///     .on(Method::Post, "/users", create_user)
///     .build()
///     .unwrap();
/// assert_eq!(routes.trie().len(), 3);
/// ```
pub struct Router {
    module: ModuleId,
    config: Config,
    next_index: usize,
    routes: Vec<Registration>,
}

struct Registration {
    module: ModuleId,
    index: usize,
    method: Method,
    pattern: String,
    endpoint: Endpoint,
}

impl Router {
    pub fn new() -> Self {
        Self::module(DEFAULT_MODULE)
    }

    /// A router whose routes are reported under `name`, e.g. in build
    /// errors and [`Routes::listing`].
    pub fn module(name: &str) -> Self {
        Self {
            module: ModuleId::from(name),
            config: Config::default(),
            next_index: 0,
            routes: Vec::new(),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.register(method, path, None, handler.into_boxed_handler())
    }

    /// Like [`on`](Router::on), but the route is only taken when `guard`
    /// accepts the request. A rejected route falls through to the next most
    /// specific candidate.
    pub fn on_when(self, method: Method, path: &str, guard: Guard, handler: impl Handler) -> Self {
        self.register(method, path, Some(guard), handler.into_boxed_handler())
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Adds every route of `other`, keeping its module id.
    ///
    /// Route indices are kept too, unless this router already holds routes
    /// of the same module: those arriving are numbered after the ones
    /// present, so `module#index` stays unique. `other`'s config is ignored;
    /// the merged table uses this router's.
    pub fn merge(mut self, other: Router) -> Self {
        let mut offsets: HashMap<ModuleId, usize> = HashMap::new();
        for route in &self.routes {
            let next = offsets.entry(route.module.clone()).or_default();
            *next = (*next).max(route.index + 1);
        }

        for mut route in other.routes {
            if let Some(offset) = offsets.get(&route.module) {
                debug!(
                    module = %route.module,
                    from = route.index,
                    to = route.index + offset,
                    "renumbering merged route"
                );
                route.index += offset;
            }
            if route.module == self.module {
                self.next_index = self.next_index.max(route.index + 1);
            }
            self.routes.push(route);
        }
        self
    }

    fn register(
        mut self,
        method: Method,
        path: &str,
        guard: Option<Guard>,
        handler: BoxedHandler,
    ) -> Self {
        self.routes.push(Registration {
            module: self.module.clone(),
            index: self.next_index,
            method,
            pattern: path.to_owned(),
            endpoint: Endpoint { guard, handler },
        });
        self.next_index += 1;
        self
    }

    /// Builds the trie. Fails on the first invalid pattern.
    pub fn build(self) -> Result<Routes, BuildError> {
        let mut trie = Trie::with_capture_conflicts(self.config.capture_conflicts);
        for route in self.routes {
            let segments = path::segments(&route.pattern, self.config.trailing_slash);
            let description = RouteDescription { method: route.method, condition: route.endpoint };
            trie.add(&segments, &route.module, route.index, description)
                .map_err(|err| BuildError { pattern: route.pattern.clone(), ..err })?;
        }

        info!(routes = trie.len(), nodes = trie.node_count(), "route table built");
        Ok(Routes::new(trie, self.config.trailing_slash))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
