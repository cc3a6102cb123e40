//! Fluent declaration of routing trees.
//!
//! Builders are plain data until [`RouterBuilder::build`], which checks
//! the declaration (duplicate names, handler-less endpoints) and produces
//! an immutable tree. Nesting is closure-scoped:
//!
//! ```
//! use cmdroute::{MatchPolicy, Router};
//!
//! let router = Router::builder()
//!     .command("db", |c| {
//!         c.endpoint("migrate", |e| {
//!             e.description("apply pending migrations")
//!                 .bool_option("dry-run")
//!                 .handler(|_ctx| Ok(()))
//!         })
//!     })
//!     .match_policy(MatchPolicy::Strict)
//!     .build()
//!     .unwrap();
//! # drop(router);
//! ```

use std::collections::HashMap;

use crate::context::Context;
use crate::error::{BuildError, RouteError};
use crate::handler::{Handler, HandlerResult};
use crate::options::{OptionGroup, OptionKind, OptionSet, OptionSpec};
use crate::router::{ErrorHandler, MatchPolicy, Router};
use crate::tree::{CommandNode, Endpoint, RoutePoint};

enum NodeBuilder {
    Command(CommandBuilder),
    Endpoint(EndpointBuilder),
}

impl NodeBuilder {
    fn name(&self) -> &str {
        match self {
            NodeBuilder::Command(c) => &c.name,
            NodeBuilder::Endpoint(e) => &e.name,
        }
    }

    fn into_node(self) -> Result<RoutePoint, BuildError> {
        match self {
            NodeBuilder::Command(c) => c.into_node(),
            NodeBuilder::Endpoint(e) => e.into_node(),
        }
    }
}

fn collect_children(
    parent: &str,
    builders: Vec<NodeBuilder>,
) -> Result<HashMap<String, RoutePoint>, BuildError> {
    let mut children = HashMap::with_capacity(builders.len());
    for builder in builders {
        let name = builder.name().to_string();
        if children.contains_key(&name) {
            return Err(BuildError::DuplicateChild {
                parent: parent.to_string(),
                name,
            });
        }
        children.insert(name, builder.into_node()?);
    }
    Ok(children)
}

/// Declares a router: top-level routes, error handler, match policy.
#[must_use = "call build() to obtain the router"]
pub struct RouterBuilder {
    roots: Vec<NodeBuilder>,
    error_handler: Option<ErrorHandler>,
    match_policy: MatchPolicy,
}

impl RouterBuilder {
    pub(crate) fn new() -> Self {
        Self {
            roots: Vec::new(),
            error_handler: None,
            match_policy: MatchPolicy::default(),
        }
    }

    /// Declares a top-level command node.
    pub fn command(
        mut self,
        name: impl Into<String>,
        f: impl FnOnce(CommandBuilder) -> CommandBuilder,
    ) -> Self {
        self.roots
            .push(NodeBuilder::Command(f(CommandBuilder::new(name.into()))));
        self
    }

    /// Declares a top-level endpoint.
    pub fn endpoint(
        mut self,
        name: impl Into<String>,
        f: impl FnOnce(EndpointBuilder) -> EndpointBuilder,
    ) -> Self {
        self.roots
            .push(NodeBuilder::Endpoint(f(EndpointBuilder::new(name.into()))));
        self
    }

    /// Replaces the default print-and-exit error handler.
    pub fn error_handler(
        mut self,
        f: impl FnMut(&RouteError, Option<&Context>) + 'static,
    ) -> Self {
        self.error_handler = Some(Box::new(f));
        self
    }

    /// Sets how leftover path segments are treated after an endpoint
    /// matches. Defaults to [`MatchPolicy::Lenient`].
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Checks the declaration and produces the router.
    pub fn build(self) -> Result<Router, BuildError> {
        let mut roots = HashMap::with_capacity(self.roots.len());
        for builder in self.roots {
            let name = builder.name().to_string();
            if roots.contains_key(&name) {
                return Err(BuildError::DuplicateRoot { name });
            }
            roots.insert(name, builder.into_node()?);
        }
        Ok(Router::new(roots, self.error_handler, self.match_policy))
    }
}

/// Declares an internal command node and its children.
pub struct CommandBuilder {
    name: String,
    children: Vec<NodeBuilder>,
}

impl CommandBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    /// Declares a nested command node.
    pub fn command(
        mut self,
        name: impl Into<String>,
        f: impl FnOnce(CommandBuilder) -> CommandBuilder,
    ) -> Self {
        self.children
            .push(NodeBuilder::Command(f(CommandBuilder::new(name.into()))));
        self
    }

    /// Declares an endpoint under this command.
    pub fn endpoint(
        mut self,
        name: impl Into<String>,
        f: impl FnOnce(EndpointBuilder) -> EndpointBuilder,
    ) -> Self {
        self.children
            .push(NodeBuilder::Endpoint(f(EndpointBuilder::new(name.into()))));
        self
    }

    fn into_node(self) -> Result<RoutePoint, BuildError> {
        let children = collect_children(&self.name, self.children)?;
        Ok(RoutePoint::Command(CommandNode::new(self.name, children)))
    }
}

/// Declares an endpoint: handler, options, and option groups.
pub struct EndpointBuilder {
    name: String,
    description: Option<String>,
    handler: Option<Box<dyn Handler>>,
    options: Vec<OptionSpec>,
    groups: Vec<GroupBuilder>,
    require_group: bool,
}

impl EndpointBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            description: None,
            handler: None,
            options: Vec::new(),
            groups: Vec::new(),
            require_group: false,
        }
    }

    /// Sets a human-readable description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the endpoint's handler from a closure or function. Required;
    /// [`RouterBuilder::build`] fails without one.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Context) -> HandlerResult + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Sets the endpoint's handler from a [`Handler`] implementation.
    ///
    /// Use this when the handler carries state of its own.
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Declares an option with an explicit kind and required-ness.
    pub fn option(mut self, name: impl Into<String>, kind: OptionKind, required: bool) -> Self {
        self.options.push(OptionSpec::new(name, kind, required));
        self
    }

    /// Declares an optional `String` option.
    pub fn string_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::String, false)
    }

    /// Declares a required `String` option.
    pub fn required_string(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::String, true)
    }

    /// Declares an optional `Int` option.
    pub fn int_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Int, false)
    }

    /// Declares a required `Int` option.
    pub fn required_int(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Int, true)
    }

    /// Declares an optional `Float` option.
    pub fn float_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Float, false)
    }

    /// Declares a required `Float` option.
    pub fn required_float(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Float, true)
    }

    /// Declares an optional `Bool` switch.
    pub fn bool_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Bool, false)
    }

    /// Declares a required `Bool` switch.
    pub fn required_bool(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Bool, true)
    }

    /// Declares an option group activated by `trigger`.
    pub fn group(
        mut self,
        name: impl Into<String>,
        trigger: impl Into<String>,
        f: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        self.groups
            .push(f(GroupBuilder::new(name.into(), trigger.into(), false)));
        self
    }

    /// Declares an exclusive option group activated by `trigger`. An
    /// exclusive group tolerates no other active group in the same
    /// invocation.
    pub fn exclusive_group(
        mut self,
        name: impl Into<String>,
        trigger: impl Into<String>,
        f: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        self.groups
            .push(f(GroupBuilder::new(name.into(), trigger.into(), true)));
        self
    }

    /// Demands that at least one declared group is active per invocation.
    pub fn require_group(mut self) -> Self {
        self.require_group = true;
        self
    }

    fn into_node(self) -> Result<RoutePoint, BuildError> {
        let handler = self.handler.ok_or_else(|| BuildError::MissingHandler {
            name: self.name.clone(),
        })?;

        let options = OptionSet::from_specs(&self.name, self.options)?;

        let mut groups = Vec::with_capacity(self.groups.len());
        for builder in self.groups {
            if groups.iter().any(|g: &OptionGroup| g.name == builder.name) {
                return Err(BuildError::DuplicateGroup {
                    endpoint: self.name,
                    name: builder.name,
                });
            }
            let scope = format!("{}/{}", self.name, builder.name);
            groups.push(OptionGroup {
                name: builder.name,
                trigger: builder.trigger,
                exclusive: builder.exclusive,
                options: OptionSet::from_specs(&scope, builder.options)?,
            });
        }

        Ok(RoutePoint::Endpoint(Endpoint::new(
            self.name,
            self.description,
            handler,
            options,
            groups,
            self.require_group,
        )))
    }
}

/// Declares the options of one option group.
pub struct GroupBuilder {
    name: String,
    trigger: String,
    exclusive: bool,
    options: Vec<OptionSpec>,
}

impl GroupBuilder {
    fn new(name: String, trigger: String, exclusive: bool) -> Self {
        Self {
            name,
            trigger,
            exclusive,
            options: Vec::new(),
        }
    }

    /// Declares an option with an explicit kind and required-ness.
    pub fn option(mut self, name: impl Into<String>, kind: OptionKind, required: bool) -> Self {
        self.options.push(OptionSpec::new(name, kind, required));
        self
    }

    /// Declares an optional `String` option.
    pub fn string_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::String, false)
    }

    /// Declares a required `String` option.
    pub fn required_string(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::String, true)
    }

    /// Declares an optional `Int` option.
    pub fn int_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Int, false)
    }

    /// Declares a required `Int` option.
    pub fn required_int(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Int, true)
    }

    /// Declares an optional `Float` option.
    pub fn float_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Float, false)
    }

    /// Declares a required `Float` option.
    pub fn required_float(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Float, true)
    }

    /// Declares an optional `Bool` switch.
    pub fn bool_option(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Bool, false)
    }

    /// Declares a required `Bool` switch.
    pub fn required_bool(self, name: impl Into<String>) -> Self {
        self.option(name, OptionKind::Bool, true)
    }
}
