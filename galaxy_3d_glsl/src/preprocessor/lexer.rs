/// Line scanner splitting shader text into passthrough text and directives.
///
/// A directive is a line whose first non-blank character is `#`, outside a
/// block comment. Only `#include` and `#autoresolve` are recognized; every
/// other line, `#` directives included, is passed through byte for byte.

use std::path::Path;
use crate::error::{Error, Result};

/// Scanned unit of shader text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text copied to the output unchanged
    Text(String),

    /// `#include "name"` or `#include <name>`
    Include {
        name: String,
        /// 1-based line of the directive
        line: usize,
        /// Line terminator of the directive line ("" on the last line)
        eol: &'static str,
    },

    /// `#autoresolve BlockName`
    Autoresolve {
        name: String,
        line: usize,
    },
}

/// Split `text` into tokens
///
/// `path` only appears in diagnostics.
pub fn tokenize(path: &Path, text: &str) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut in_block_comment = false;

    for (index, raw) in text.split_inclusive('\n').enumerate() {
        let line = index + 1;
        let (body, eol) = split_eol(raw);

        if !in_block_comment {
            if let Some(directive) = body.trim_start().strip_prefix('#') {
                let directive = directive.trim_start_matches([' ', '\t']);
                let keyword_len = directive
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(directive.len());
                let (keyword, rest) = directive.split_at(keyword_len);

                match keyword {
                    "include" => {
                        let name = parse_include(rest)
                            .map_err(|message| malformed(path, line, message))?;
                        tokens.push(Token::Include { name, line, eol });
                        continue;
                    }
                    "autoresolve" => {
                        let name = parse_autoresolve(rest)
                            .map_err(|message| malformed(path, line, message))?;
                        tokens.push(Token::Autoresolve { name, line });
                        push_text(&mut tokens, eol);
                        continue;
                    }
                    _ => {}
                }
            }
        }

        in_block_comment = scan_comments(body, in_block_comment);
        push_text(&mut tokens, raw);
    }

    Ok(tokens)
}

fn split_eol(raw: &str) -> (&str, &'static str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// Track `/* */` state across a line of text. Returns the state at line end.
fn scan_comments(body: &str, mut in_block_comment: bool) -> bool {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            }
        } else if c == '/' {
            match chars.peek() {
                Some('/') => break,
                Some('*') => {
                    chars.next();
                    in_block_comment = true;
                }
                _ => {}
            }
        }
    }
    in_block_comment
}

fn parse_include(rest: &str) -> std::result::Result<String, String> {
    let rest = rest.trim_start();
    let close = match rest.chars().next() {
        Some('"') => '"',
        Some('<') => '>',
        _ => return Err("expected \"name\" or <name> after #include".to_string()),
    };

    let inner = &rest[1..];
    let end = inner
        .find(close)
        .ok_or_else(|| "unterminated include name".to_string())?;
    let name = &inner[..end];
    if name.trim().is_empty() {
        return Err("empty include name".to_string());
    }

    check_tail(&inner[end + 1..], "include name")?;
    Ok(name.to_string())
}

fn parse_autoresolve(rest: &str) -> std::result::Result<String, String> {
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return Err("expected whitespace after #autoresolve".to_string());
    }
    let rest = rest.trim_start();
    let len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..len];

    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Err("expected uniform block name after #autoresolve".to_string()),
    }

    check_tail(&rest[len..], "uniform block name")?;
    Ok(name.to_string())
}

/// Only blanks and comments may follow a directive argument
///
/// A block comment must close on the directive line.
fn check_tail(tail: &str, what: &str) -> std::result::Result<(), String> {
    let mut rest = tail.trim();
    while let Some(comment) = rest.strip_prefix("/*") {
        match comment.find("*/") {
            Some(end) => rest = comment[end + 2..].trim_start(),
            None => return Err(format!("unterminated block comment after {}", what)),
        }
    }

    if rest.is_empty() || rest.starts_with("//") {
        Ok(())
    } else {
        Err(format!("unexpected `{}` after {}", rest, what))
    }
}

fn malformed(path: &Path, line: usize, message: String) -> Error {
    Error::MalformedDirective {
        path: path.to_path_buf(),
        line,
        message,
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
