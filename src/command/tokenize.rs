//! Shell-like splitting of console lines into argument tokens.
//!
//! Rules:
//! - tokens are separated by unquoted, unescaped whitespace
//! - `\` takes the next character verbatim, inside quotes as well
//! - `"`, `'` and `` ` `` open a quoted span closed by the same character
//! - empty tokens are dropped, so `""` contributes nothing
//!
//! `#` has no meaning here; [`strip_comment`] removes trailing comments
//! before tokenizing when the caller asks for it.

use std::fmt;

/// Characters that open and close a quoted span.
const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Failure to split a line into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// Input ended while a quoted span was still open.
    UnterminatedQuote {
        /// The quote character that was never closed.
        quote: char,
    },
    /// Input ended right after a `\`.
    TrailingEscape,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote { quote } => {
                write!(f, "quoted section opened with {quote} is not closed")
            }
            Self::TrailingEscape => write!(f, "line ends with an escape"),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Split `text` into tokens.
///
/// ```ignore
/// assert_eq!(tokenize(r#"set render.hdri.file "/a b.png""#)?,
///            ["set", "render.hdri.file", "/a b.png"]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if let Some(open) = quote {
            if c == open {
                quote = None;
            } else {
                current.push(c);
            }
            continue;
        }
        if QUOTES.contains(&c) {
            quote = Some(c);
        } else if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if let Some(open) = quote {
        return Err(TokenizeError::UnterminatedQuote { quote: open });
    }
    if escaped {
        return Err(TokenizeError::TrailingEscape);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Truncate `text` at the first `#` that is neither escaped nor quoted.
///
/// Never fails: malformed quoting is left for [`tokenize`] to report.
#[must_use]
pub fn strip_comment(text: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (c, Some(open)) if c == open => quote = None,
            (_, Some(_)) => {}
            ('#', None) => return &text[..idx],
            (c, None) if QUOTES.contains(&c) => quote = Some(c),
            _ => {}
        }
    }
    text
}

/// Quote `text` so that [`tokenize`] yields it back as a single token.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// `text` as is when it already tokenizes to itself, otherwise quoted.
#[must_use]
pub fn quote_if_needed(text: &str) -> String {
    let plain = !text.is_empty()
        && !text.chars().any(|c| {
            c.is_whitespace() || c == '\\' || c == '#' || QUOTES.contains(&c)
        });
    if plain {
        text.to_owned()
    } else {
        quote(text)
    }
}
