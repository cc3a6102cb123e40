//! Routing tree nodes and the option validation engine.
//!
//! The tree is a set of named nodes: command nodes route to children,
//! endpoint nodes terminate routing with an option schema and a handler.
//! The two variants are a tagged enum rather than trait objects, so an
//! endpoint structurally cannot carry children and descent needs no
//! virtual dispatch.

use std::collections::HashMap;
use std::fmt;

use crate::context::Context;
use crate::error::{ContextError, ValidationError};
use crate::handler::{Handler, HandlerResult};
use crate::options::{OptionGroup, OptionKind, OptionSet};

/// A node in the routing tree: either an internal command or a terminal
/// endpoint.
pub enum RoutePoint {
    /// Internal node mapping names to children.
    Command(CommandNode),
    /// Leaf node carrying an option schema and a handler.
    Endpoint(Endpoint),
}

impl RoutePoint {
    /// The node's name, the segment it matches during descent.
    pub fn name(&self) -> &str {
        match self {
            RoutePoint::Command(node) => &node.name,
            RoutePoint::Endpoint(endpoint) => &endpoint.name,
        }
    }
}

impl fmt::Debug for RoutePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePoint::Command(node) => f
                .debug_struct("Command")
                .field("name", &node.name)
                .field("children", &node.children.len())
                .finish(),
            RoutePoint::Endpoint(endpoint) => f
                .debug_struct("Endpoint")
                .field("name", &endpoint.name)
                .field("options", &endpoint.options.len())
                .field("groups", &endpoint.groups.len())
                .finish(),
        }
    }
}

/// An internal routing node with uniquely named children.
pub struct CommandNode {
    name: String,
    children: HashMap<String, RoutePoint>,
}

impl CommandNode {
    pub(crate) fn new(name: String, children: HashMap<String, RoutePoint>) -> Self {
        Self { name, children }
    }

    /// The node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a child by name.
    pub fn child(&self, name: &str) -> Option<&RoutePoint> {
        self.children.get(name)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut RoutePoint> {
        self.children.get_mut(name)
    }
}

/// A terminal routing node: option schema, option groups, and a handler.
pub struct Endpoint {
    name: String,
    description: Option<String>,
    handler: Box<dyn Handler>,
    options: OptionSet,
    groups: Vec<OptionGroup>,
    require_group: bool,
}

impl Endpoint {
    pub(crate) fn new(
        name: String,
        description: Option<String>,
        handler: Box<dyn Handler>,
        options: OptionSet,
        groups: Vec<OptionGroup>,
        require_group: bool,
    ) -> Self {
        Self {
            name,
            description,
            handler,
            options,
            groups,
            require_group,
        }
    }

    /// The endpoint's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The endpoint's description, if one was declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Checks the invocation's flags against the declared schema.
    ///
    /// Two phases, short-circuiting on the first failure: active option
    /// groups first (declaration order, exclusivity enforced), then the
    /// endpoint's flat options.
    pub fn validate(&self, ctx: &Context) -> Result<(), ValidationError> {
        self.validate_groups(ctx)?;
        validate_option_set(&self.options, ctx)
    }

    fn validate_groups(&self, ctx: &Context) -> Result<(), ValidationError> {
        // Trigger of the most recent active group, when that group was
        // exclusive. A later active group collides with it.
        let mut exclusive_active: Option<&str> = None;
        let mut any_active = false;

        for group in &self.groups {
            if !ctx.is_present(&group.trigger) {
                continue;
            }
            if let Some(active) = exclusive_active {
                return Err(ValidationError::GroupConflict {
                    active: active.to_string(),
                    conflicting: group.trigger.clone(),
                });
            }
            any_active = true;
            exclusive_active = group.exclusive.then_some(group.trigger.as_str());
            validate_option_set(&group.options, ctx)?;
        }

        if self.require_group && !self.groups.is_empty() && !any_active {
            return Err(ValidationError::NoActiveGroup);
        }

        Ok(())
    }

    /// Runs the endpoint's handler.
    pub(crate) fn handle(&mut self, ctx: &Context) -> HandlerResult {
        self.handler.handle(ctx)
    }
}

/// Validates one option set against the supplied flags.
///
/// Specs are checked in declaration order. An absent, non-required option
/// is skipped entirely; kind checks apply only to present flags.
fn validate_option_set(options: &OptionSet, ctx: &Context) -> Result<(), ValidationError> {
    for spec in options.iter() {
        let present = ctx.is_present(&spec.name);
        if !present {
            if spec.required {
                return Err(ValidationError::MissingRequired {
                    name: spec.name.clone(),
                });
            }
            continue;
        }

        match spec.kind {
            OptionKind::Bool => {
                if ctx.has_value(&spec.name) {
                    return Err(ValidationError::BoolHasValue {
                        name: spec.name.clone(),
                    });
                }
            }
            OptionKind::String => {
                if !ctx.has_value(&spec.name) {
                    return Err(ValidationError::MissingValue {
                        name: spec.name.clone(),
                    });
                }
            }
            OptionKind::Int => {
                if !ctx.has_value(&spec.name) {
                    return Err(ValidationError::MissingValue {
                        name: spec.name.clone(),
                    });
                }
                if let Err(err) = ctx.get_i64(&spec.name) {
                    return Err(type_mismatch(&spec.name, "an integer", err));
                }
            }
            OptionKind::Float => {
                if !ctx.has_value(&spec.name) {
                    return Err(ValidationError::MissingValue {
                        name: spec.name.clone(),
                    });
                }
                if let Err(err) = ctx.get_f64(&spec.name) {
                    return Err(type_mismatch(&spec.name, "a float", err));
                }
            }
        }
    }

    Ok(())
}

fn type_mismatch(name: &str, expected: &'static str, err: ContextError) -> ValidationError {
    let reason = match &err {
        ContextError::InvalidInt { source, .. } => source.to_string(),
        ContextError::InvalidFloat { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    ValidationError::TypeMismatch {
        name: name.to_string(),
        expected,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionSpec;
    use crate::parser::parse_line;

    fn ctx(line: &str) -> Context {
        Context::new(&parse_line(line).unwrap())
    }

    fn specs(entries: &[(&str, OptionKind, bool)]) -> OptionSet {
        OptionSet::from_specs(
            "test",
            entries
                .iter()
                .map(|(name, kind, required)| OptionSpec::new(*name, *kind, *required))
                .collect(),
        )
        .unwrap()
    }

    fn endpoint(options: OptionSet, groups: Vec<OptionGroup>, require_group: bool) -> Endpoint {
        Endpoint::new(
            "test".into(),
            None,
            Box::new(|_: &Context| Ok(())),
            options,
            groups,
            require_group,
        )
    }

    fn group(name: &str, trigger: &str, exclusive: bool, options: OptionSet) -> OptionGroup {
        OptionGroup {
            name: name.into(),
            trigger: trigger.into(),
            exclusive,
            options,
        }
    }

    #[test]
    fn valid_flags_pass_all_kinds() {
        let ep = endpoint(
            specs(&[
                ("host", OptionKind::String, true),
                ("port", OptionKind::Int, true),
                ("ratio", OptionKind::Float, false),
                ("debug", OptionKind::Bool, false),
            ]),
            vec![],
            false,
        );
        let ctx = ctx("srv --host=localhost --port=8080 --ratio=0.5 --debug");
        assert!(ep.validate(&ctx).is_ok());
    }

    #[test]
    fn missing_required_option_fails() {
        let ep = endpoint(specs(&[("port", OptionKind::Int, true)]), vec![], false);
        assert_eq!(
            ep.validate(&ctx("srv --host=x")),
            Err(ValidationError::MissingRequired { name: "port".into() })
        );
    }

    #[test]
    fn absent_optional_option_is_skipped() {
        let ep = endpoint(specs(&[("port", OptionKind::Int, false)]), vec![], false);
        assert!(ep.validate(&ctx("srv")).is_ok());
    }

    #[test]
    fn bool_option_rejects_a_value() {
        let ep = endpoint(specs(&[("debug", OptionKind::Bool, false)]), vec![], false);
        assert_eq!(
            ep.validate(&ctx("srv --debug=1")),
            Err(ValidationError::BoolHasValue { name: "debug".into() })
        );
        assert!(ep.validate(&ctx("srv --debug")).is_ok());
    }

    #[test]
    fn string_option_requires_a_value() {
        let ep = endpoint(specs(&[("host", OptionKind::String, false)]), vec![], false);
        assert_eq!(
            ep.validate(&ctx("srv --host")),
            Err(ValidationError::MissingValue { name: "host".into() })
        );
    }

    #[test]
    fn int_option_rejects_unparseable_value() {
        let ep = endpoint(specs(&[("port", OptionKind::Int, false)]), vec![], false);
        let err = ep.validate(&ctx("srv --port=abc")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { ref name, expected: "an integer", .. } if name == "port"
        ));
    }

    #[test]
    fn int_option_without_value_is_missing_value() {
        let ep = endpoint(specs(&[("port", OptionKind::Int, false)]), vec![], false);
        assert_eq!(
            ep.validate(&ctx("srv --port")),
            Err(ValidationError::MissingValue { name: "port".into() })
        );
    }

    #[test]
    fn float_option_rejects_unparseable_value() {
        let ep = endpoint(specs(&[("ratio", OptionKind::Float, false)]), vec![], false);
        let err = ep.validate(&ctx("srv --ratio=x.y")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { expected: "a float", .. }
        ));
    }

    #[test]
    fn inactive_group_options_are_not_checked() {
        let ep = endpoint(
            OptionSet::default(),
            vec![group(
                "tls",
                "tls",
                false,
                specs(&[("cert", OptionKind::String, true)]),
            )],
            false,
        );
        // Trigger absent: the group's required option is not demanded.
        assert!(ep.validate(&ctx("srv")).is_ok());
    }

    #[test]
    fn active_group_options_are_validated() {
        let ep = endpoint(
            OptionSet::default(),
            vec![group(
                "tls",
                "tls",
                false,
                specs(&[("cert", OptionKind::String, true)]),
            )],
            false,
        );
        assert_eq!(
            ep.validate(&ctx("srv --tls")),
            Err(ValidationError::MissingRequired { name: "cert".into() })
        );
        assert!(ep.validate(&ctx("srv --tls --cert=/etc/cert.pem")).is_ok());
    }

    #[test]
    fn two_active_exclusive_groups_conflict() {
        let ep = endpoint(
            OptionSet::default(),
            vec![
                group("json", "json", true, OptionSet::default()),
                group("yaml", "yaml", true, OptionSet::default()),
            ],
            false,
        );
        assert_eq!(
            ep.validate(&ctx("srv --json --yaml")),
            Err(ValidationError::GroupConflict {
                active: "json".into(),
                conflicting: "yaml".into(),
            })
        );
    }

    #[test]
    fn conflict_reporting_follows_declaration_order() {
        // Same two groups, only one triggered: no conflict either way.
        let make = || {
            endpoint(
                OptionSet::default(),
                vec![
                    group("a", "alpha", true, OptionSet::default()),
                    group("b", "beta", false, OptionSet::default()),
                ],
                false,
            )
        };
        assert!(make().validate(&ctx("srv --alpha")).is_ok());
        assert!(make().validate(&ctx("srv --beta")).is_ok());

        // Both triggered: alpha is declared first and is exclusive, so it
        // is always reported as the active side.
        assert_eq!(
            make().validate(&ctx("srv --beta --alpha")),
            Err(ValidationError::GroupConflict {
                active: "alpha".into(),
                conflicting: "beta".into(),
            })
        );
    }

    #[test]
    fn non_exclusive_groups_may_coexist() {
        let ep = endpoint(
            OptionSet::default(),
            vec![
                group("a", "alpha", false, OptionSet::default()),
                group("b", "beta", false, OptionSet::default()),
            ],
            false,
        );
        assert!(ep.validate(&ctx("srv --alpha --beta")).is_ok());
    }

    #[test]
    fn exclusive_group_after_non_exclusive_is_allowed() {
        // Exclusivity looks backward: a non-exclusive active group does
        // not block a later exclusive one.
        let ep = endpoint(
            OptionSet::default(),
            vec![
                group("a", "alpha", false, OptionSet::default()),
                group("b", "beta", true, OptionSet::default()),
            ],
            false,
        );
        assert!(ep.validate(&ctx("srv --alpha --beta")).is_ok());
    }

    #[test]
    fn require_group_demands_an_active_trigger() {
        let make = |require| {
            endpoint(
                OptionSet::default(),
                vec![group("a", "alpha", false, OptionSet::default())],
                require,
            )
        };
        assert_eq!(
            make(true).validate(&ctx("srv")),
            Err(ValidationError::NoActiveGroup)
        );
        assert!(make(true).validate(&ctx("srv --alpha")).is_ok());
        assert!(make(false).validate(&ctx("srv")).is_ok());
    }

    #[test]
    fn group_phase_runs_before_global_phase() {
        let ep = endpoint(
            specs(&[("port", OptionKind::Int, true)]),
            vec![group(
                "tls",
                "tls",
                false,
                specs(&[("cert", OptionKind::String, true)]),
            )],
            false,
        );
        // Both phases would fail; the group failure wins.
        assert_eq!(
            ep.validate(&ctx("srv --tls")),
            Err(ValidationError::MissingRequired { name: "cert".into() })
        );
    }
}
