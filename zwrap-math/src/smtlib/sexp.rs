//! Minimal S-expression reader for model output.

use std::fmt;
use zwrap_core::{Result, ValueError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sexp {
    Atom(String),
    List(Vec<Sexp>),
}

impl Sexp {
    pub(crate) fn as_atom(&self) -> Option<&str> {
        match self {
            Sexp::Atom(atom) => Some(atom.as_str()),
            Sexp::List(_) => None,
        }
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(atom) => f.write_str(atom),
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Deepest list nesting the reader accepts.
pub(crate) const MAX_DEPTH: usize = 1024;

fn unbalanced(input: &str) -> ValueError {
    ValueError::format_error(format!("Unbalanced parentheses in: {}", input.trim()))
}

/// Read every top-level expression in `input`.
///
/// `;` starts a line comment and `|...|` quotes a symbol. Lists nested
/// deeper than [`MAX_DEPTH`] are a `FormatError`.
pub(crate) fn parse_all(input: &str) -> Result<Vec<Sexp>> {
    let mut stack: Vec<Vec<Sexp>> = vec![Vec::new()];
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '(' => {
                if stack.len() > MAX_DEPTH {
                    return Err(ValueError::format_error(format!(
                        "Expression nesting exceeds maximum depth {}",
                        MAX_DEPTH
                    )));
                }
                stack.push(Vec::new());
            }
            ')' => {
                let Some(list) = stack.pop() else {
                    return Err(unbalanced(input));
                };
                let Some(parent) = stack.last_mut() else {
                    return Err(unbalanced(input));
                };
                parent.push(Sexp::List(list));
            }
            ';' => {
                for (_, next) in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            '|' => {
                let mut symbol = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '|' {
                        closed = true;
                        break;
                    }
                    symbol.push(next);
                }
                if !closed {
                    return Err(ValueError::format_error(format!(
                        "Unterminated quoted symbol in: {}",
                        input.trim()
                    )));
                }
                push_atom(&mut stack, symbol);
            }
            c if c.is_whitespace() => {}
            _ => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '(' | ')' | ';' | '|') {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                push_atom(&mut stack, input[start..end].to_string());
            }
        }
    }

    match stack.pop() {
        Some(top) if stack.is_empty() => Ok(top),
        _ => Err(unbalanced(input)),
    }
}

fn push_atom(stack: &mut [Vec<Sexp>], atom: String) {
    if let Some(current) = stack.last_mut() {
        current.push(Sexp::Atom(atom));
    }
}

/// Read exactly one expression.
pub(crate) fn parse_one(input: &str) -> Result<Sexp> {
    let mut exprs = parse_all(input)?;
    if exprs.len() != 1 {
        return Err(ValueError::format_error(format!(
            "Expected a single expression, found {}: {}",
            exprs.len(),
            input.trim()
        )));
    }
    exprs
        .pop()
        .ok_or_else(|| ValueError::format_error("Empty expression"))
}
