//! Cursor over the routing path of one invocation.

use crate::parser::ParsedInput;

/// A cursor over `[command, subcommand_1, …, subcommand_n]`.
///
/// The router advances the cursor one segment at a time as it descends the
/// tree. [`advance`](RoutingIterator::advance) is a no-op once the cursor
/// sits on the last segment; callers detect exhaustion through its return
/// value or [`has_remaining`](RoutingIterator::has_remaining).
///
/// Built from the [`ParsedInput`] rather than a [`Context`](crate::Context)
/// so the path keeps the subcommand order of the source line.
#[derive(Debug, Clone)]
pub struct RoutingIterator {
    index: usize,
    path: Vec<String>,
}

impl RoutingIterator {
    /// Builds the path cursor for an invocation.
    pub fn new(input: &ParsedInput) -> Self {
        let mut path = Vec::with_capacity(1 + input.subcommands.len());
        path.push(input.command.clone());
        path.extend(input.subcommands.iter().cloned());
        Self { index: 0, path }
    }

    /// The segment under the cursor.
    pub fn current(&self) -> &str {
        &self.path[self.index]
    }

    /// Moves to the next segment. Returns false (and stays put) if the
    /// cursor is already on the last segment.
    pub fn advance(&mut self) -> bool {
        if self.index < self.path.len() - 1 {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if segments remain beyond the cursor.
    pub fn has_remaining(&self) -> bool {
        self.index < self.path.len() - 1
    }

    /// The segment after the cursor, if any, without moving.
    pub fn peek(&self) -> Option<&str> {
        self.path.get(self.index + 1).map(String::as_str)
    }

    /// Returns true if the cursor sits on `name`.
    pub fn is_at(&self, name: &str) -> bool {
        self.current() == name
    }

    /// The full path, in order.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The path joined with `/`, for diagnostics.
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }
}
