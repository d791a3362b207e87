//! Key/value tokenizer
//!
//! Splits a loosely formatted line such as `level=info msg="disk full" code: 7`
//! into key/value pairs. The scan is a single left-to-right pass with two
//! states:
//!
//! - `Scanning`: separators end tokens. `:` and `=` end a key; whitespace,
//!   `,`, `;`, `&`, `{`, `}` and the quote characters end a value.
//! - `Quoted(q)`: everything up to the matching `q` is literal.
//!
//! A backslash makes the next character literal in either state.
//!
//! The tokenizer never fails. Incomplete input degrades into best-effort
//! pairs: a dangling key gets whatever text follows it, and a lone trailing
//! token becomes a key with an empty value.

use std::collections::HashMap;
use tracing::trace;

/// Quoting state of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Separators are active.
    Scanning,
    /// Inside a quoted run opened by the given quote character.
    Quoted(char),
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_key_separator(c: char) -> bool {
    c == ':' || c == '='
}

/// Characters that end a value token. The quote characters are members, so
/// an opening quote also ends the token before it.
fn is_field_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | ',' | ';' | '&' | '{' | '}' | '"' | '\''
    )
}

/// Characters that must be escaped for text to come back as one literal token.
pub(crate) fn is_special(c: char) -> bool {
    c == '\\' || is_key_separator(c) || is_field_separator(c)
}

/// Per-call parse context.
struct Tokenizer {
    /// Characters of the token being assembled.
    buffer: String,
    /// Completed token waiting for its value.
    pending_key: Option<String>,
    state: State,
    pairs: HashMap<String, String>,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            pending_key: None,
            state: State::Scanning,
            pairs: HashMap::new(),
        }
    }

    /// `:` or `=`: the buffer becomes the pending key.
    fn end_key(&mut self) {
        if !self.buffer.is_empty() {
            self.pending_key = Some(std::mem::take(&mut self.buffer));
        }
    }

    /// Field separator: the buffer is a value for the pending key, or the
    /// pending key itself when there is none yet.
    fn end_field(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let token = std::mem::take(&mut self.buffer);
        match self.pending_key.take() {
            Some(key) => {
                trace!(key = %key, value = %token, "pair");
                self.pairs.insert(key, token);
            }
            None => self.pending_key = Some(token),
        }
    }

    fn finish(mut self) -> HashMap<String, String> {
        let rest = std::mem::take(&mut self.buffer);
        match self.pending_key.take() {
            Some(key) => {
                self.pairs.insert(key, rest);
            }
            None if !rest.is_empty() => {
                self.pairs.insert(rest, String::new());
            }
            None => {}
        }
        self.pairs
    }
}

/// Parse `a=b, c: d` style pairs out of a line.
///
/// Later duplicates overwrite earlier ones.
///
/// # Example
///
/// ```
/// use libfieldx::parse_key_value_pairs;
///
/// let pairs = parse_key_value_pairs(r#"level=info msg="disk full""#);
/// assert_eq!(pairs["level"], "info");
/// assert_eq!(pairs["msg"], "disk full");
/// ```
pub fn parse_key_value_pairs(raw: &str) -> HashMap<String, String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tok = Tokenizer::new();
    let mut i = 0;

    while i < chars.len() {
        let mut c = chars[i];

        // The closing quote is consumed together with the character after
        // it, which is then read in the unquoted state.
        if tok.state == State::Quoted(c) {
            tok.state = State::Scanning;
            i += 1;
            let Some(&next) = chars.get(i) else {
                break;
            };
            c = next;
        }

        if c == '\\' {
            if let Some(&escaped) = chars.get(i + 1) {
                tok.buffer.push(escaped);
            }
            i += 2;
            continue;
        }

        if let State::Quoted(_) = tok.state {
            tok.buffer.push(c);
        } else if is_quote(c) {
            tok.state = State::Quoted(c);
            tok.end_field();
        } else if is_key_separator(c) {
            tok.end_key();
        } else if is_field_separator(c) {
            tok.end_field();
        } else {
            tok.buffer.push(c);
        }
        i += 1;
    }

    tok.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_key_value_pairs("").is_empty());
    }

    #[test]
    fn test_separators_only() {
        assert!(parse_key_value_pairs(" ,;&{}\t\r\n").is_empty());
        assert!(parse_key_value_pairs("==::").is_empty());
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            parse_key_value_pairs("a=1,b=2"),
            pairs(&[("a", "1"), ("b", "2")])
        );
    }

    #[test]
    fn test_colon_and_semicolon() {
        assert_eq!(
            parse_key_value_pairs("a:1; b:2"),
            pairs(&[("a", "1"), ("b", "2")])
        );
    }

    #[test]
    fn test_query_string() {
        assert_eq!(
            parse_key_value_pairs("a=1&b=2"),
            pairs(&[("a", "1"), ("b", "2")])
        );
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(
            parse_key_value_pairs("a=1\tb=2\r\nc=3"),
            pairs(&[("a", "1"), ("b", "2"), ("c", "3")])
        );
    }

    #[test]
    fn test_spaces_around_separator() {
        assert_eq!(
            parse_key_value_pairs("key = value"),
            pairs(&[("key", "value")])
        );
    }

    #[test]
    fn test_bare_key() {
        assert_eq!(parse_key_value_pairs("foo"), pairs(&[("foo", "")]));
    }

    #[test]
    fn test_dangling_key() {
        assert_eq!(parse_key_value_pairs("a="), pairs(&[("a", "")]));
    }

    #[test]
    fn test_bare_token_takes_next_token_as_value() {
        assert_eq!(parse_key_value_pairs("foo bar"), pairs(&[("foo", "bar")]));
    }

    #[test]
    fn test_bare_token_replaced_by_next_key() {
        assert_eq!(
            parse_key_value_pairs("error code=5"),
            pairs(&[("code", "5")])
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        assert_eq!(parse_key_value_pairs("a=1 a=2"), pairs(&[("a", "2")]));
    }

    #[test]
    fn test_quoted_value_with_separator() {
        assert_eq!(
            parse_key_value_pairs(r#"a="1,2",b=3"#),
            pairs(&[("a", "1,2"), ("b", "3")])
        );
    }

    #[test]
    fn test_quoted_value_with_spaces() {
        assert_eq!(
            parse_key_value_pairs(r#"msg="hello world" level=info"#),
            pairs(&[("msg", "hello world"), ("level", "info")])
        );
    }

    #[test]
    fn test_single_quotes_keep_double_quotes() {
        assert_eq!(
            parse_key_value_pairs(r#"a='say "hi"'"#),
            pairs(&[("a", r#"say "hi""#)])
        );
    }

    #[test]
    fn test_closing_quote_reads_following_char_unquoted() {
        // The closing quote does not end the token by itself: a plain
        // character right after it joins the quoted text.
        assert_eq!(parse_key_value_pairs(r#"a="x"y"#), pairs(&[("a", "xy")]));
        // A separator right after it ends the token as usual.
        assert_eq!(
            parse_key_value_pairs(r#"a="x",y=1"#),
            pairs(&[("a", "x"), ("y", "1")])
        );
    }

    #[test]
    fn test_opening_quote_ends_previous_token() {
        assert_eq!(
            parse_key_value_pairs(r#"say"hello""#),
            pairs(&[("say", "hello")])
        );
    }

    #[test]
    fn test_empty_quotes_at_end() {
        assert_eq!(parse_key_value_pairs(r#"a="""#), pairs(&[("a", "")]));
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            parse_key_value_pairs(r#"a="open, still"#),
            pairs(&[("a", "open, still")])
        );
    }

    #[test]
    fn test_escaped_separator() {
        assert_eq!(parse_key_value_pairs(r"a=1\,2"), pairs(&[("a", "1,2")]));
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        assert_eq!(
            parse_key_value_pairs(r#"a="x\"y""#),
            pairs(&[("a", r#"x"y"#)])
        );
    }

    #[test]
    fn test_escaped_key_separator() {
        assert_eq!(
            parse_key_value_pairs(r"url=http\://host"),
            pairs(&[("url", "http://host")])
        );
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(parse_key_value_pairs(r"a=1\"), pairs(&[("a", "1")]));
    }

    #[test]
    fn test_json_like_object() {
        assert_eq!(
            parse_key_value_pairs(r#"{"a": 1, "b": "two"}"#),
            pairs(&[("a", "1"), ("b", "two")])
        );
    }

    #[test]
    fn test_unicode() {
        assert_eq!(
            parse_key_value_pairs("名前=値 emoji=🦀"),
            pairs(&[("名前", "値"), ("emoji", "🦀")])
        );
    }
}
