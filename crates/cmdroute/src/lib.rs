//! Command-line tokenizing and hierarchical command dispatch.
//!
//! `cmdroute` turns a raw command line into a structured invocation
//! (command, ordered subcommands, flags), routes it through a tree of
//! declared commands to a terminal endpoint, validates the endpoint's
//! option schema against the supplied flags, and runs the endpoint's
//! handler with a read-only view of the parsed state.
//!
//! # Pipeline
//!
//! ```text
//! raw line ─ tokenize ─ parse ─► ParsedInput
//!                                   │
//!                     ┌─────────────┴──────────────┐
//!                 Context (flags)        RoutingIterator (path)
//!                     │                            │
//!                     └────────► Router ◄──────────┘
//!                                   │ descend tree
//!                                Endpoint
//!                                   │ validate options + groups
//!                                Handler(Context)
//! ```
//!
//! Flags are `--name` or `--name=value` tokens and must come after every
//! subcommand; quoting with `'` or `"` keeps whitespace literal. Failures
//! at any stage converge on the router's single error handler, which by
//! default prints to stderr and exits nonzero.
//!
//! # Quick start
//!
//! ```
//! use cmdroute::Router;
//!
//! let mut router = Router::builder()
//!     .command("db", |c| {
//!         c.endpoint("migrate", |e| {
//!             e.description("apply pending migrations")
//!                 .required_string("url")
//!                 .int_option("steps")
//!                 .bool_option("dry-run")
//!                 .handler(|ctx| {
//!                     let url = ctx.get_string("url")?;
//!                     let steps = ctx.get_int("steps").unwrap_or(1);
//!                     let dry = ctx.get_bool("dry-run");
//!                     println!("migrating {url} by {steps} (dry={dry})");
//!                     Ok(())
//!                 })
//!         })
//!     })
//!     .build()
//!     .unwrap();
//!
//! router.dispatch_line("db migrate --url=postgres://localhost --dry-run");
//! ```
//!
//! # Option groups
//!
//! An endpoint may declare groups of options gated by a trigger flag.
//! A group's options are validated only while its trigger is present;
//! exclusive groups refuse to share an invocation with any other active
//! group:
//!
//! ```
//! use cmdroute::Router;
//!
//! let router = Router::builder()
//!     .endpoint("export", |e| {
//!         e.exclusive_group("json", "json", |g| g.string_option("indent"))
//!             .exclusive_group("csv", "csv", |g| g.required_string("delimiter"))
//!             .handler(|_ctx| Ok(()))
//!     })
//!     .build()
//!     .unwrap();
//! # drop(router);
//! ```

mod builder;
mod context;
mod error;
mod handler;
mod iterator;
mod options;
mod parser;
mod router;
mod tokenizer;
mod tree;

pub use builder::{CommandBuilder, EndpointBuilder, GroupBuilder, RouterBuilder};
pub use context::Context;
pub use error::{
    BuildError, ContextError, ParseError, RouteError, RoutingError, ValidationError,
};
pub use handler::{Handler, HandlerResult};
pub use iterator::RoutingIterator;
pub use options::{OptionGroup, OptionKind, OptionSet, OptionSpec};
pub use parser::{parse_args, parse_line, parse_os_args, Flag, ParsedInput};
pub use router::{ErrorHandler, MatchPolicy, Router};
pub use tokenizer::tokenize;
pub use tree::{CommandNode, Endpoint, RoutePoint};
