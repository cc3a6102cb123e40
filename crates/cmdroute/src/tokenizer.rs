//! Quote-aware splitting of a raw command line into tokens.

/// Splits `raw` into whitespace-separated tokens.
///
/// A single or double quote opens a region in which whitespace is literal;
/// the quote characters themselves are stripped while the enclosed content
/// is kept. An unterminated quote runs to the end of the string rather than
/// erroring. Empty or all-whitespace input yields no tokens.
///
/// # Example
///
/// ```
/// use cmdroute::tokenize;
///
/// let tokens = tokenize("copy 'my file' --dest=\"/tmp/out dir\"");
/// assert_eq!(tokens, vec!["copy", "my file", "--dest=/tmp/out dir"]);
/// ```
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Set while inside a quoted region; holds the closing quote char.
    let mut quote: Option<char> = None;
    // Distinguishes an empty quoted token ('') from no token at all.
    let mut started = false;

    for ch in raw.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    started = true;
                }
                c if c.is_whitespace() => {
                    if started {
                        tokens.push(std::mem::take(&mut current));
                        started = false;
                    }
                }
                c => {
                    current.push(c);
                    started = true;
                }
            },
        }
    }

    if started {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(tokenize("a  b\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn single_quotes_keep_whitespace() {
        assert_eq!(tokenize("say 'hello world'"), vec!["say", "hello world"]);
    }

    #[test]
    fn double_quotes_keep_whitespace() {
        assert_eq!(tokenize("say \"a  b\""), vec!["say", "a  b"]);
    }

    #[test]
    fn quotes_are_stripped_mid_token() {
        assert_eq!(
            tokenize("--name='hello world'"),
            vec!["--name=hello world"]
        );
    }

    #[test]
    fn other_quote_kind_is_literal_inside_region() {
        assert_eq!(tokenize("say \"it's\""), vec!["say", "it's"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(tokenize("say 'open ended"), vec!["say", "open ended"]);
    }

    #[test]
    fn quoted_empty_string_is_a_token() {
        assert_eq!(tokenize("cmd ''"), vec!["cmd", ""]);
    }

    #[test]
    fn adjacent_quoted_regions_join_into_one_token() {
        assert_eq!(tokenize("'a b''c d'"), vec!["a bc d"]);
    }
}
