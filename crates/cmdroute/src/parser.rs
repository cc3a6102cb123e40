//! Parsing raw input into a structured invocation.
//!
//! A parsed invocation is a command word, an ordered run of subcommand
//! words, and a set of flags. The positional rule is strict: every
//! subcommand must precede the first flag. Input arrives either as a single
//! raw line ([`parse_line`]) or as a pre-split argument vector
//! ([`parse_args`] / [`parse_os_args`]).

use crate::error::ParseError;
use crate::tokenizer::tokenize;

/// A single `--name` or `--name=value` occurrence on the command line.
///
/// An empty value means the flag was present without a value, which is
/// distinct from the flag being absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// Flag name without the `--` prefix.
    pub name: String,
    /// Flag value; empty for presence-only flags.
    pub value: String,
}

impl Flag {
    /// Returns true if the flag carries a non-empty value.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

/// The structured result of parsing one invocation.
///
/// Immutable once returned from a parse function. Flag names are unique:
/// a duplicate on the command line overwrites the earlier value
/// (last-write-wins) while keeping the original position, so downstream
/// consumers see a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// The command word (never flag-shaped).
    pub command: String,
    /// Subcommand words in the order they appeared.
    pub subcommands: Vec<String>,
    /// Flags, unique by name, in first-appearance order.
    pub flags: Vec<Flag>,
}

impl ParsedInput {
    fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            subcommands: Vec::new(),
            flags: Vec::new(),
        }
    }

    fn push_flag(&mut self, flag: Flag) {
        match self.flags.iter_mut().find(|f| f.name == flag.name) {
            Some(existing) => existing.value = flag.value,
            None => self.flags.push(flag),
        }
    }
}

fn is_flag_shaped(token: &str) -> bool {
    token.starts_with("--")
}

/// Parses a raw command line into a [`ParsedInput`].
///
/// The first token is the command; plain tokens after it are subcommands
/// until the first flag, after which only flags may follow.
///
/// # Example
///
/// ```
/// use cmdroute::parse_line;
///
/// let input = parse_line("deploy staging --force --tag=v2").unwrap();
/// assert_eq!(input.command, "deploy");
/// assert_eq!(input.subcommands, vec!["staging"]);
/// assert_eq!(input.flags.len(), 2);
/// ```
pub fn parse_line(raw: &str) -> Result<ParsedInput, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let tokens = tokenize(raw);
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if is_flag_shaped(&tokens[0]) {
        return Err(ParseError::LeadingFlag {
            token: tokens[0].clone(),
        });
    }

    let mut result = ParsedInput::new(&tokens[0]);
    let mut flags_started = false;

    for token in &tokens[1..] {
        if is_flag_shaped(token) {
            flags_started = true;
            result.push_flag(parse_flag_token(token)?);
        } else if flags_started {
            return Err(ParseError::SubcommandAfterFlag {
                token: token.clone(),
            });
        } else {
            result.subcommands.push(token.clone());
        }
    }

    Ok(result)
}

/// Parses a pre-split argument vector (program name already removed).
///
/// Tokens are trimmed and empty ones skipped. A bare `--` token is
/// rejected; otherwise the positional rules match [`parse_line`].
pub fn parse_args<I, S>(args: I) -> Result<ParsedInput, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<String> = args
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if is_flag_shaped(&tokens[0]) {
        return Err(ParseError::LeadingFlag {
            token: tokens[0].clone(),
        });
    }

    let mut result = ParsedInput::new(&tokens[0]);
    let mut flags_started = false;

    for token in &tokens[1..] {
        if token == "--" {
            return Err(ParseError::BareSeparator);
        }
        if is_flag_shaped(token) {
            flags_started = true;
            result.push_flag(parse_flag_token(token)?);
        } else if flags_started {
            return Err(ParseError::SubcommandAfterFlag {
                token: token.clone(),
            });
        } else {
            result.subcommands.push(token.clone());
        }
    }

    Ok(result)
}

/// Parses the current process arguments, excluding the program name.
pub fn parse_os_args() -> Result<ParsedInput, ParseError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    parse_args(args)
}

/// Parses a single flag-shaped token into a [`Flag`].
///
/// Splits on the first `=`. The value must be non-empty after trimming;
/// a value fully wrapped in one matching pair of quotes has them stripped.
fn parse_flag_token(token: &str) -> Result<Flag, ParseError> {
    let body = token.trim_start_matches("--");

    let Some((name, value)) = body.split_once('=') else {
        return Ok(Flag {
            name: body.to_string(),
            value: String::new(),
        });
    };

    let name = name.trim().to_string();
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseError::EmptyFlagValue { name });
    }

    Ok(Flag {
        name,
        value: strip_wrapping_quotes(value).to_string(),
    })
}

fn strip_wrapping_quotes(value: &str) -> &str {
    if value.len() >= 2 {
        let first = value.chars().next();
        let last = value.chars().last();
        if (first == Some('\'') && last == Some('\''))
            || (first == Some('"') && last == Some('"'))
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}
