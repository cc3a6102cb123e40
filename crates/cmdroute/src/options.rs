//! Option schemas and option groups declared on endpoints.

use std::collections::HashMap;

use crate::error::BuildError;

/// The value kind an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence-only switch; supplying a value is a validation error.
    Bool,
    /// Requires a non-empty value.
    String,
    /// Requires a value parseable as an integer.
    Int,
    /// Requires a value parseable as a float.
    Float,
}

/// One declared option: name, kind, and whether it must be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Flag name the option matches (without `--`).
    pub name: String,
    /// Accepted value kind.
    pub kind: OptionKind,
    /// Whether the flag must be present.
    pub required: bool,
}

impl OptionSpec {
    /// Creates an option spec.
    pub fn new(name: impl Into<String>, kind: OptionKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
        }
    }
}

/// A set of option specs, iterated in declaration order.
///
/// Backed by an ordered sequence plus a name index so lookups stay cheap
/// while validation and conflict reporting remain deterministic across
/// runs. Duplicate names are a construction-time error.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    specs: Vec<OptionSpec>,
    index: HashMap<String, usize>,
}

impl OptionSet {
    /// Builds a set from specs, rejecting duplicate names.
    ///
    /// `scope` names the owning endpoint or group for the error message.
    pub(crate) fn from_specs(scope: &str, specs: Vec<OptionSpec>) -> Result<Self, BuildError> {
        let mut set = Self::default();
        for spec in specs {
            if set.index.contains_key(&spec.name) {
                return Err(BuildError::DuplicateOption {
                    scope: scope.to_string(),
                    name: spec.name,
                });
            }
            set.index.insert(spec.name.clone(), set.specs.len());
            set.specs.push(spec);
        }
        Ok(set)
    }

    /// Looks up a spec by name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.index.get(name).map(|&i| &self.specs[i])
    }

    /// Iterates specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if no options are declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// A cluster of option specs gated by a trigger flag.
///
/// The group's options are validated only when the trigger flag is present
/// in the invocation. An exclusive group tolerates no other active group
/// in the same invocation.
#[derive(Debug, Clone)]
pub struct OptionGroup {
    /// Declaration name, used in build diagnostics.
    pub name: String,
    /// Flag whose presence activates the group.
    pub trigger: String,
    /// Whether this group must be the only active one.
    pub exclusive: bool,
    /// Options validated while the group is active.
    pub options: OptionSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_preserves_declaration_order() {
        let set = OptionSet::from_specs(
            "ep",
            vec![
                OptionSpec::new("zeta", OptionKind::String, false),
                OptionSpec::new("alpha", OptionKind::Int, true),
                OptionSpec::new("mid", OptionKind::Bool, false),
            ],
        )
        .unwrap();

        let names: Vec<&str> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn set_indexes_by_name() {
        let set = OptionSet::from_specs(
            "ep",
            vec![OptionSpec::new("port", OptionKind::Int, true)],
        )
        .unwrap();

        let spec = set.get("port").unwrap();
        assert_eq!(spec.kind, OptionKind::Int);
        assert!(spec.required);
        assert!(set.get("host").is_none());
    }

    #[test]
    fn duplicate_option_is_a_build_error() {
        let err = OptionSet::from_specs(
            "server",
            vec![
                OptionSpec::new("port", OptionKind::Int, true),
                OptionSpec::new("port", OptionKind::String, false),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::DuplicateOption {
                scope: "server".into(),
                name: "port".into(),
            }
        );
    }
}
