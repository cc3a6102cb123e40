//! Error types for parsing, routing, and validation.
//!
//! Every failure mode in the crate is a variant of one of the enums here.
//! [`RouteError`] is the umbrella the router funnels into its single
//! error-handler call per invocation: it wraps parse, routing, validation,
//! and opaque handler failures.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Errors produced while turning a raw line or argument vector into a
/// [`ParsedInput`](crate::ParsedInput).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or contained only whitespace.
    #[error("empty input: nothing to parse")]
    EmptyInput,

    /// The first token was flag-shaped; the command word must come first.
    #[error("first word must be a command, not flag '{token}'")]
    LeadingFlag {
        /// The offending flag-shaped token.
        token: String,
    },

    /// A plain word appeared after the first flag token.
    #[error("subcommand '{token}' cannot appear after a flag")]
    SubcommandAfterFlag {
        /// The out-of-place subcommand token.
        token: String,
    },

    /// A `--name=` flag had nothing (or only whitespace) after the `=`.
    #[error("flag '{name}' has an empty value after '='")]
    EmptyFlagValue {
        /// The flag whose value was empty.
        name: String,
    },

    /// An argument vector contained a bare `--` token.
    #[error("bare '--' is not a valid argument")]
    BareSeparator,
}

/// Errors from typed flag access on a [`Context`](crate::Context).
#[derive(Debug, Error)]
pub enum ContextError {
    /// The queried flag is not present at all.
    #[error("flag '{name}' not found")]
    FlagNotFound {
        /// The queried flag name.
        name: String,
    },

    /// The flag is present but carries no value.
    #[error("flag '{name}' has no value")]
    FlagEmpty {
        /// The queried flag name.
        name: String,
    },

    /// The stored text could not be parsed as the requested integer type.
    #[error("flag '{name}' is not a valid integer")]
    InvalidInt {
        /// The queried flag name.
        name: String,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The stored text could not be parsed as the requested float type.
    #[error("flag '{name}' is not a valid float")]
    InvalidFloat {
        /// The queried flag name.
        name: String,
        /// The underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
}

/// Errors from descending the routing tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No top-level route matches the command word.
    #[error("no route for command '{name}'")]
    UnknownCommand {
        /// The unmatched command word.
        name: String,
    },

    /// A command node has no child matching the current path segment.
    #[error("no route for segment '{segment}'")]
    UnknownSegment {
        /// The unmatched path segment.
        segment: String,
    },

    /// Strict matching only: segments remained after an endpoint matched.
    #[error("unexpected trailing segment '{segment}' after endpoint")]
    TrailingSegment {
        /// The first unconsumed segment.
        segment: String,
    },
}

/// Errors from checking a matched endpoint's option schema against the
/// supplied flags. Validation short-circuits on the first failure; the
/// endpoint handler never runs when one of these is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required option was not supplied.
    #[error("required option '{name}' is missing")]
    MissingRequired {
        /// The missing option.
        name: String,
    },

    /// A `Bool` option was given a value (`--x=1` instead of `--x`).
    #[error("option '{name}' is a switch and takes no value")]
    BoolHasValue {
        /// The offending option.
        name: String,
    },

    /// A `String` option was supplied without a value.
    #[error("option '{name}' requires a value")]
    MissingValue {
        /// The offending option.
        name: String,
    },

    /// A numeric option's value failed to parse.
    #[error("option '{name}' expects {expected}: {reason}")]
    TypeMismatch {
        /// The offending option.
        name: String,
        /// Human-readable expected kind ("an integer", "a float").
        expected: &'static str,
        /// The underlying parse failure, rendered.
        reason: String,
    },

    /// Two option groups were triggered while an earlier one was exclusive.
    #[error("group '{conflicting}' cannot be combined with exclusive group '{active}'")]
    GroupConflict {
        /// Trigger of the exclusive group that was already active.
        active: String,
        /// Trigger of the group that collided with it.
        conflicting: String,
    },

    /// The endpoint requires at least one option group to be triggered.
    #[error("at least one option group must be selected")]
    NoActiveGroup,
}

/// Errors detected while building a routing tree. These are construction
/// mistakes in the declaration, not runtime input problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Two top-level routes share a name.
    #[error("duplicate top-level route '{name}'")]
    DuplicateRoot {
        /// The colliding route name.
        name: String,
    },

    /// Two children of the same command node share a name.
    #[error("duplicate route '{name}' under command '{parent}'")]
    DuplicateChild {
        /// The parent command node.
        parent: String,
        /// The colliding child name.
        name: String,
    },

    /// An option name was declared twice in the same scope.
    #[error("duplicate option '{name}' in '{scope}'")]
    DuplicateOption {
        /// Endpoint or group the option belongs to.
        scope: String,
        /// The colliding option name.
        name: String,
    },

    /// Two groups on the same endpoint share a name.
    #[error("duplicate group '{name}' on endpoint '{endpoint}'")]
    DuplicateGroup {
        /// The owning endpoint.
        endpoint: String,
        /// The colliding group name.
        name: String,
    },

    /// An endpoint was declared without a handler.
    #[error("endpoint '{name}' has no handler")]
    MissingHandler {
        /// The handler-less endpoint.
        name: String,
    },
}

/// Umbrella error delivered to the router's error handler.
///
/// Exactly one of these reaches the handler per failed invocation,
/// whichever stage failed first.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No endpoint matched the routing path.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The matched endpoint's option schema rejected the flags.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The endpoint handler itself failed; passed through unchanged.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages() {
        assert_eq!(
            ParseError::LeadingFlag {
                token: "--x".into()
            }
            .to_string(),
            "first word must be a command, not flag '--x'"
        );
        assert_eq!(
            ParseError::EmptyFlagValue { name: "opt".into() }.to_string(),
            "flag 'opt' has an empty value after '='"
        );
    }

    #[test]
    fn route_error_is_transparent_for_validation() {
        let inner = ValidationError::MissingRequired { name: "port".into() };
        let outer = RouteError::from(inner);
        assert_eq!(outer.to_string(), "required option 'port' is missing");
    }

    #[test]
    fn handler_error_wraps_anyhow() {
        let err = RouteError::Handler(anyhow::anyhow!("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
