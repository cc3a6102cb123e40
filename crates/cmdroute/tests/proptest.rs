//! Property-based tests for the tokenizer and parser using proptest.

use proptest::prelude::*;

use cmdroute::{parse_args, parse_line, tokenize, ParseError};

// ============================================================================
// Strategies
// ============================================================================

/// A plain word: no whitespace, no quotes, not flag-shaped.
fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

/// A flag name.
fn flag_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,9}"
}

/// A non-empty flag value without whitespace, quotes, or `=`.
fn flag_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./:]{1,12}"
}

// ============================================================================
// Tokenizer properties
// ============================================================================

proptest! {
    /// Tokenizing never panics, whatever the input.
    #[test]
    fn tokenize_total(input in ".{0,200}") {
        let _ = tokenize(&input);
    }

    /// Without quotes in the input, no token contains whitespace.
    #[test]
    fn tokens_contain_no_unquoted_whitespace(
        words in prop::collection::vec("[a-zA-Z0-9=_/.:-]{1,10}", 0..8),
    ) {
        let line = words.join("  ");
        for token in tokenize(&line) {
            prop_assert!(!token.chars().any(char::is_whitespace));
        }
    }

    /// Joining plain words with arbitrary whitespace runs splits back
    /// into exactly those words.
    #[test]
    fn plain_words_round_trip(
        words in prop::collection::vec(word(), 0..8),
        sep in " {1,3}",
    ) {
        let line = words.join(&sep);
        prop_assert_eq!(tokenize(&line), words);
    }

    /// Quoting a word never changes anything but the quotes.
    #[test]
    fn quoting_is_transparent_for_plain_words(w in word()) {
        prop_assert_eq!(tokenize(&format!("'{w}'")), vec![w.clone()]);
        prop_assert_eq!(tokenize(&format!("\"{w}\"")), vec![w]);
    }
}

// ============================================================================
// Parser properties
// ============================================================================

proptest! {
    /// Parsing never panics, whatever the input.
    #[test]
    fn parse_total(input in ".{0,200}") {
        let _ = parse_line(&input);
    }

    /// A well-formed generated line parses into exactly its parts.
    #[test]
    fn well_formed_lines_round_trip(
        command in word(),
        subcommands in prop::collection::vec(word(), 0..4),
        flags in prop::collection::hash_map(flag_name(), flag_value(), 0..4),
    ) {
        let mut line = command.clone();
        for sub in &subcommands {
            line.push(' ');
            line.push_str(sub);
        }
        for (name, value) in &flags {
            line.push_str(&format!(" --{name}={value}"));
        }

        let input = parse_line(&line).unwrap();
        prop_assert_eq!(&input.command, &command);
        prop_assert_eq!(&input.subcommands, &subcommands);
        prop_assert_eq!(input.flags.len(), flags.len());
        for flag in &input.flags {
            prop_assert_eq!(&flags[&flag.name], &flag.value);
        }
    }

    /// The argv adapter agrees with the line parser on well-formed input.
    #[test]
    fn argv_and_line_agree(
        command in word(),
        subcommands in prop::collection::vec(word(), 0..4),
        flag in flag_name(),
        value in flag_value(),
    ) {
        let mut argv = vec![command.clone()];
        argv.extend(subcommands.clone());
        argv.push(format!("--{flag}={value}"));

        let line = argv.join(" ");
        prop_assert_eq!(parse_args(&argv).unwrap(), parse_line(&line).unwrap());
    }

    /// Whitespace-only input is always EmptyInput.
    #[test]
    fn blank_input_is_empty_input(blank in "[ \t]{0,20}") {
        prop_assert_eq!(parse_line(&blank), Err(ParseError::EmptyInput));
    }

    /// A leading flag-shaped token is always rejected.
    #[test]
    fn leading_flag_is_always_rejected(name in flag_name()) {
        let line = format!("--{name}");
        prop_assert!(
            matches!(parse_line(&line), Err(ParseError::LeadingFlag { .. })),
            "expected Err(ParseError::LeadingFlag {{ .. }}) for input {:?}",
            line
        );
    }
}
