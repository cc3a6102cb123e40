//! Endpoint handler contract.

use crate::context::Context;

/// The result type for endpoint handlers.
///
/// Failures are opaque to the router and pass through to its error handler
/// unchanged as [`RouteError::Handler`](crate::RouteError::Handler).
pub type HandlerResult = Result<(), anyhow::Error>;

/// A command endpoint's entry point.
///
/// Handlers receive the invocation's [`Context`] read-only and must not
/// retain it past the call. Any `FnMut(&Context) -> HandlerResult` closure
/// is a handler through the blanket impl below.
///
/// # Example
///
/// ```
/// use cmdroute::{Context, Handler, HandlerResult};
///
/// struct Greeter {
///     greeted: u32,
/// }
///
/// impl Handler for Greeter {
///     fn handle(&mut self, ctx: &Context) -> HandlerResult {
///         self.greeted += 1;
///         println!("hello, {}", ctx.get_or_default("name", "world"));
///         Ok(())
///     }
/// }
/// ```
pub trait Handler {
    /// Executes the handler for one invocation.
    fn handle(&mut self, ctx: &Context) -> HandlerResult;
}

impl<F> Handler for F
where
    F: FnMut(&Context) -> HandlerResult,
{
    fn handle(&mut self, ctx: &Context) -> HandlerResult {
        self(ctx)
    }
}
