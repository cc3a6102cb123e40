//! The router: tree descent, validation, and the error-handler boundary.

use std::collections::HashMap;

use crate::builder::RouterBuilder;
use crate::context::Context;
use crate::error::{RouteError, RoutingError};
use crate::iterator::RoutingIterator;
use crate::parser::{parse_args, parse_line};
use crate::tree::RoutePoint;

/// What to do with path segments left over once an endpoint matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Ignore unconsumed trailing segments (the historical behavior).
    #[default]
    Lenient,
    /// Fail with [`RoutingError::TrailingSegment`] when segments remain.
    Strict,
}

/// The error-handler callback.
///
/// Receives the failure and the context active when it occurred. The
/// context is `None` only when parsing itself failed, since no invocation
/// exists at that point.
pub type ErrorHandler = Box<dyn FnMut(&RouteError, Option<&Context>)>;

fn default_error_handler() -> ErrorHandler {
    Box::new(|err, _ctx| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    })
}

/// Owns the routing tree and dispatches invocations to endpoints.
///
/// Built once via [`Router::builder`], then treated as read-only apart
/// from the `FnMut` handlers it calls into. Every failed invocation
/// reaches the error handler exactly once, whichever stage failed:
/// parsing (through the `dispatch_*` conveniences), routing, validation,
/// or the endpoint handler itself.
///
/// The default error handler prints `Error: …` to stderr and exits the
/// process with status 1; replace it at build time for embedding or
/// testing.
///
/// # Example
///
/// ```
/// use cmdroute::Router;
///
/// let mut router = Router::builder()
///     .endpoint("server", |e| {
///         e.required_string("host")
///             .int_option("port")
///             .bool_option("debug")
///             .handler(|ctx| {
///                 let host = ctx.get_string("host")?;
///                 let port = ctx.get_int("port").unwrap_or(8080);
///                 println!("serving {host}:{port}");
///                 Ok(())
///             })
///     })
///     .build()
///     .unwrap();
///
/// router.dispatch_line("server --host=localhost --port=9000");
/// ```
pub struct Router {
    roots: HashMap<String, RoutePoint>,
    error_handler: ErrorHandler,
    match_policy: MatchPolicy,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("roots", &self.roots)
            .field("match_policy", &self.match_policy)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Starts declaring a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub(crate) fn new(
        roots: HashMap<String, RoutePoint>,
        error_handler: Option<ErrorHandler>,
        match_policy: MatchPolicy,
    ) -> Self {
        Self {
            roots,
            error_handler: error_handler.unwrap_or_else(default_error_handler),
            match_policy,
        }
    }

    /// Routes one invocation, reporting any failure to the error handler.
    pub fn route(&mut self, ctx: &Context, itr: &mut RoutingIterator) {
        if let Err(err) = self.descend(ctx, itr) {
            (self.error_handler)(&err, Some(ctx));
        }
    }

    /// Routes one invocation, returning the failure instead of invoking
    /// the error handler. Intended for embedding and tests.
    pub fn try_route(
        &mut self,
        ctx: &Context,
        itr: &mut RoutingIterator,
    ) -> Result<(), RouteError> {
        self.descend(ctx, itr)
    }

    /// Parses a raw line and routes it.
    ///
    /// Parse failures go to the error handler with no context.
    pub fn dispatch_line(&mut self, line: &str) {
        match parse_line(line) {
            Ok(input) => {
                let ctx = Context::new(&input);
                let mut itr = RoutingIterator::new(&input);
                self.route(&ctx, &mut itr);
            }
            Err(err) => {
                let err = RouteError::from(err);
                (self.error_handler)(&err, None);
            }
        }
    }

    /// Parses an argument vector (program name excluded) and routes it.
    pub fn dispatch_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match parse_args(args) {
            Ok(input) => {
                let ctx = Context::new(&input);
                let mut itr = RoutingIterator::new(&input);
                self.route(&ctx, &mut itr);
            }
            Err(err) => {
                let err = RouteError::from(err);
                (self.error_handler)(&err, None);
            }
        }
    }

    /// Walks the path through the tree to an endpoint, validates, and
    /// runs the handler.
    fn descend(&mut self, ctx: &Context, itr: &mut RoutingIterator) -> Result<(), RouteError> {
        let mut node = self.roots.get_mut(itr.current()).ok_or_else(|| {
            RoutingError::UnknownCommand {
                name: itr.current().to_string(),
            }
        })?;

        loop {
            node = match node {
                RoutePoint::Endpoint(endpoint) => {
                    if self.match_policy == MatchPolicy::Strict {
                        if let Some(extra) = itr.peek() {
                            return Err(RoutingError::TrailingSegment {
                                segment: extra.to_string(),
                            }
                            .into());
                        }
                    }
                    endpoint.validate(ctx)?;
                    return endpoint.handle(ctx).map_err(RouteError::Handler);
                }
                RoutePoint::Command(command) => {
                    // Advancing past the end leaves the cursor on the last
                    // segment, so a too-short path fails the child lookup.
                    itr.advance();
                    let segment = itr.current().to_string();
                    match command.child_mut(&segment) {
                        Some(child) => child,
                        None => {
                            return Err(RoutingError::UnknownSegment { segment }.into())
                        }
                    }
                }
            };
        }
    }
}
