//! Read-only typed access to a parsed invocation.

use std::collections::{HashMap, HashSet};

use crate::error::ContextError;
use crate::parser::ParsedInput;

/// An immutable snapshot of one parsed invocation.
///
/// Wraps a [`ParsedInput`] with typed flag accessors, command equality
/// checks, and subcommand membership checks. Subcommand order is discarded
/// here; the [`RoutingIterator`](crate::RoutingIterator) keeps the ordered
/// path. Collection accessors return copies, never references into the
/// context's own storage.
///
/// Flag lookups tolerate a leading `--` on the queried name, so
/// `ctx.is_present("--debug")` and `ctx.is_present("debug")` agree.
#[derive(Debug, Clone)]
pub struct Context {
    command: String,
    subcommands: HashSet<String>,
    flags: HashMap<String, String>,
}

impl Context {
    /// Builds a context from a parsed invocation.
    pub fn new(input: &ParsedInput) -> Self {
        Self {
            command: input.command.clone(),
            subcommands: input.subcommands.iter().cloned().collect(),
            flags: input
                .flags
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        let name = name.strip_prefix("--").unwrap_or(name);
        self.flags.get(name).map(String::as_str)
    }

    /// Looks up a flag that must be present and carry a non-empty value.
    fn value_of(&self, name: &str) -> Result<&str, ContextError> {
        match self.lookup(name) {
            None => Err(ContextError::FlagNotFound { name: name.into() }),
            Some("") => Err(ContextError::FlagEmpty { name: name.into() }),
            Some(value) => Ok(value),
        }
    }

    /// The command word of this invocation.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns true if the command word equals `target`.
    pub fn is_command(&self, target: &str) -> bool {
        self.command == target
    }

    /// Returns true if `name` appeared as a subcommand.
    pub fn has_subcommand(&self, name: &str) -> bool {
        self.subcommands.contains(name)
    }

    /// Returns true if the flag is present, with or without a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns true if the flag is present and carries a non-empty value.
    pub fn has_value(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|v| !v.is_empty())
    }

    /// Returns the flag's value as a string.
    ///
    /// Unlike the numeric accessors this succeeds for present-but-valueless
    /// flags, returning the empty string.
    pub fn get_string(&self, name: &str) -> Result<String, ContextError> {
        self.lookup(name)
            .map(str::to_string)
            .ok_or_else(|| ContextError::FlagNotFound { name: name.into() })
    }

    /// Parses the flag's value as an `i32`.
    pub fn get_i32(&self, name: &str) -> Result<i32, ContextError> {
        let value = self.value_of(name)?;
        value.parse().map_err(|source| ContextError::InvalidInt {
            name: name.into(),
            source,
        })
    }

    /// Parses the flag's value as an `i64`.
    pub fn get_i64(&self, name: &str) -> Result<i64, ContextError> {
        let value = self.value_of(name)?;
        value.parse().map_err(|source| ContextError::InvalidInt {
            name: name.into(),
            source,
        })
    }

    /// Parses the flag's value as an `i64`. Alias for [`get_i64`].
    ///
    /// [`get_i64`]: Context::get_i64
    pub fn get_int(&self, name: &str) -> Result<i64, ContextError> {
        self.get_i64(name)
    }

    /// Parses the flag's value as an `f32`.
    pub fn get_f32(&self, name: &str) -> Result<f32, ContextError> {
        let value = self.value_of(name)?;
        value.parse().map_err(|source| ContextError::InvalidFloat {
            name: name.into(),
            source,
        })
    }

    /// Parses the flag's value as an `f64`.
    pub fn get_f64(&self, name: &str) -> Result<f64, ContextError> {
        let value = self.value_of(name)?;
        value.parse().map_err(|source| ContextError::InvalidFloat {
            name: name.into(),
            source,
        })
    }

    /// Presence-only boolean: true iff the flag appeared at all.
    ///
    /// Never fails; any value the flag carries is ignored.
    pub fn get_bool(&self, name: &str) -> bool {
        self.is_present(name)
    }

    /// Returns the flag's value if present and non-empty, else `default`.
    pub fn get_or_default(&self, name: &str, default: &str) -> String {
        match self.lookup(name) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }

    /// Subcommand names, copied out. Order is unspecified.
    pub fn subcommands(&self) -> Vec<String> {
        self.subcommands.iter().cloned().collect()
    }

    /// Flag name-to-value mapping, copied out.
    pub fn flags(&self) -> HashMap<String, String> {
        self.flags.clone()
    }

    /// Flag names, copied out.
    pub fn flag_names(&self) -> Vec<String> {
        self.flags.keys().cloned().collect()
    }

    /// Flag values, copied out.
    pub fn flag_values(&self) -> Vec<String> {
        self.flags.values().cloned().collect()
    }

    /// Flags rendered as `name=value` strings, copied out.
    pub fn flag_pairs(&self) -> Vec<String> {
        self.flags
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect()
    }
}
