//! Tokenizer for rule text.
//!
//! Splits rule text into groups of comma-separated items. Whitespace between
//! two items separates groups; whitespace touching a comma is insignificant.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Maximal run of characters that are neither whitespace nor commas.
    Word(&'a str),
    Comma,
    /// One or more whitespace characters.
    Space,
}

/// Tokenizes rule text.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        if c == ',' || c.is_whitespace() {
            if let Some(start) = word_start.take() {
                tokens.push(Token::Word(&input[start..i]));
            }
            if c == ',' {
                tokens.push(Token::Comma);
            } else if tokens.last() != Some(&Token::Space) {
                tokens.push(Token::Space);
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }

    if let Some(start) = word_start {
        tokens.push(Token::Word(&input[start..]));
    }

    tokens
}

/// Groups tokens into space-separated groups of comma-separated items.
///
/// Empty items (from `1,,2` or a trailing comma) are kept as empty strings so
/// the parser can report them.
#[must_use]
pub fn split_groups(input: &str) -> Vec<Vec<&str>> {
    let tokens = tokenize(input);
    let mut groups = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut item: Option<&str> = None;
    let mut after_comma = false;

    for (i, token) in tokens.iter().enumerate() {
        match *token {
            Token::Word(word) => {
                item = Some(word);
                after_comma = false;
            }
            Token::Comma => {
                current.push(item.take().unwrap_or_default());
                after_comma = true;
            }
            Token::Space => {
                // The rule prefix always ends its own group.
                let after_prefix = groups.is_empty() && current.is_empty() && item.is_some();
                let before_comma = matches!(tokens.get(i + 1), Some(Token::Comma));
                let at_start = item.is_none() && current.is_empty();
                if !after_prefix && (after_comma || before_comma || at_start) {
                    continue;
                }
                current.push(item.take().unwrap_or_default());
                groups.push(std::mem::take(&mut current));
            }
        }
    }

    if item.is_some() || !current.is_empty() {
        current.push(item.unwrap_or_default());
        groups.push(current);
    }

    groups
}
