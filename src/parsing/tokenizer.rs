//! Splitting block text into literal text and bracketed groups.

use crate::database::minify;

/// One piece of a line: literal text, or a bracketed group including its
/// brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Group(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Text(text) => text,
            Token::Group(text) => text,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Token::Group(_))
    }
}

pub fn is_open_bracket(c: char) -> bool {
    matches!(c, '(' | '[' | '<' | '{')
}

pub fn is_close_bracket(c: char) -> bool {
    matches!(c, ')' | ']' | '>' | '}')
}

pub fn matching_bracket(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '<' => Some('>'),
        '{' => Some('}'),
        _ => None,
    }
}

/// Remove one level of brackets. The closing bracket is only removed if
/// it matches the opening one.
pub fn strip_brackets(text: &str) -> &str {
    let mut chars = text.chars();
    match chars
        .next()
        .and_then(matching_bracket)
    {
        Some(close) => {
            let inner = chars.as_str();
            inner
                .strip_suffix(close)
                .unwrap_or(inner)
        }
        None => text,
    }
}

/// Split text into literal text and bracketed groups. Nesting is tracked
/// so a group only ends at the bracket matching its opening one, and
/// nothing nests inside square brackets. Angle brackets which are really
/// comparison operators are left in the text. The tokens concatenate
/// back to exactly the input.
pub fn split_into_pieces(text: &str, ignore_lt: &[String]) -> Vec<Token> {
    let chars: Vec<char> = text
        .chars()
        .collect();

    let mut tokens = Vec::new();
    let mut piece = String::new();
    let mut nesting: Vec<char> = Vec::new();

    for (i, &c) in chars
        .iter()
        .enumerate()
    {
        match nesting.last() {
            Some(&innermost) => {
                piece.push(c);
                if is_open_bracket(c) && innermost != '[' && !is_lt_gt(&chars, i, ignore_lt) {
                    nesting.push(c);
                } else if Some(c) == matching_bracket(innermost) && !is_lt_gt(&chars, i, ignore_lt)
                {
                    nesting.pop();
                    if nesting.is_empty() {
                        tokens.push(Token::Group(std::mem::take(&mut piece)));
                    }
                }
            }
            None => {
                if is_open_bracket(c) && !is_lt_gt(&chars, i, ignore_lt) {
                    nesting.push(c);
                    if !piece.is_empty() {
                        tokens.push(Token::Text(std::mem::take(&mut piece)));
                    }
                }
                piece.push(c);
            }
        }
    }

    // an unterminated group runs to the end of the line
    if !piece.is_empty() {
        if nesting.is_empty() {
            tokens.push(Token::Text(piece));
        } else {
            tokens.push(Token::Group(piece));
        }
    }

    tokens
}

/// Whether the `<` or `>` at `index` is a less-than or greater-than
/// operator rather than a bracket. It is an operator when it follows one
/// of the ignore-lt phrases, or when it sits between a closing bracket
/// behind and an opening bracket ahead with only spaces in between (the
/// ends of the text count as brackets).
pub fn is_lt_gt(chars: &[char], index: usize, ignore_lt: &[String]) -> bool {
    match chars.get(index) {
        Some('<') | Some('>') => {}
        _ => return false,
    }
    if index == 0 {
        return false;
    }

    let before: String = chars[..index]
        .iter()
        .collect();
    let before = minify(&before);
    if ignore_lt
        .iter()
        .any(|phrase| before.starts_with(phrase.as_str()))
    {
        return true;
    }

    for &c in &chars[index + 1..] {
        if is_open_bracket(c) {
            break;
        }
        if c != ' ' {
            return false;
        }
    }

    for &c in chars[..index]
        .iter()
        .rev()
    {
        if is_close_bracket(c) {
            break;
        }
        if c != ' ' {
            return false;
        }
    }

    true
}

#[cfg(test)]
#[path = "checks/tokenizer.rs"]
mod check;
