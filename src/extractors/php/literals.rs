// PHP lowering - Scalar literal resolution
//
// Only plain scalars resolve to a value. Interpolated strings and heredocs,
// arrays, constant references and any operator expression stay opaque.

use super::PhpExtractor;
use crate::extractors::syntax::{Expr, Literal};
use tree_sitter::Node;

pub(super) fn lower_expr(extractor: &PhpExtractor, node: &Node) -> Expr {
    let text = extractor.get_base().get_node_text(node);
    let literal = match node.kind() {
        "integer" => parse_integer(&text),
        "float" => parse_float(&text),
        "string" => parse_single_quoted(&text),
        "encapsed_string" if !is_interpolated(node) => parse_double_quoted(&text),
        "nowdoc" => parse_heredoc(&text, false),
        "heredoc" if !is_interpolated(node) => parse_heredoc(&text, true),
        _ => None,
    };
    literal.map(Expr::Literal).unwrap_or(Expr::Other)
}

/// True when any part of a string or heredoc is not plain text
fn is_interpolated(node: &Node) -> bool {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.iter().any(|child| match child.kind() {
        "string_content" | "string_value" | "escape_sequence" | "heredoc_start"
        | "heredoc_end" => false,
        "heredoc_body" => is_interpolated(child),
        _ => true,
    })
}

/// Integer literal in any PHP base; values past `i64` become floats
fn parse_integer(text: &str) -> Option<Literal> {
    let digits: String = text.trim().chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();

    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    if body.is_empty() {
        return None;
    }
    if let Ok(value) = i64::from_str_radix(body, radix) {
        return Some(Literal::Int(value));
    }
    if radix == 10 {
        return body.parse::<f64>().ok().map(Literal::Float);
    }
    u128::from_str_radix(body, radix)
        .ok()
        .map(|value| Literal::Float(value as f64))
}

fn parse_float(text: &str) -> Option<Literal> {
    let digits: String = text.trim().chars().filter(|c| *c != '_').collect();
    digits.parse::<f64>().ok().map(Literal::Float)
}

fn strip_quotes(text: &str, quote: char) -> Option<&str> {
    let text = text.trim();
    let text = text
        .strip_prefix('b')
        .or_else(|| text.strip_prefix('B'))
        .unwrap_or(text);
    text.strip_prefix(quote)?.strip_suffix(quote)
}

/// `'...'`: only `\\` and `\'` are escapes
fn parse_single_quoted(text: &str) -> Option<Literal> {
    let inner = strip_quotes(text, '\'')?;
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '\'' {
                    value.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        value.push(c);
    }

    Some(Literal::String(value))
}

/// `"..."` without interpolation
fn parse_double_quoted(text: &str) -> Option<Literal> {
    let inner = strip_quotes(text, '"')?;
    Some(Literal::String(unescape_double_quoted(inner)))
}

/// `<<<EOT` / `<<<"EOT"` / `<<<'EOT'` bodies
///
/// The closing marker's indentation is removed from every body line. Heredoc
/// bodies decode double-quoted escapes except `\"`; nowdoc bodies are verbatim.
fn parse_heredoc(text: &str, decode_escapes: bool) -> Option<Literal> {
    let lines: Vec<&str> = text.split('\n').collect();
    let (closing, body) = match lines.as_slice() {
        [opening, body @ .., closing] if opening.trim_start().starts_with("<<<") => {
            (*closing, body)
        }
        _ => return None,
    };

    let indent_len = closing.len() - closing.trim_start().len();
    let indent = &closing[..indent_len];
    let mut stripped: Vec<&str> = body
        .iter()
        .map(|line| line.strip_prefix(indent).unwrap_or(line))
        .collect();
    if let Some(last) = stripped.last_mut() {
        *last = last.strip_suffix('\r').unwrap_or(last);
    }
    let raw = stripped.join("\n");

    let value = if decode_escapes {
        unescape(&raw, false)
    } else {
        raw
    };
    Some(Literal::String(value))
}

fn unescape_double_quoted(inner: &str) -> String {
    unescape(inner, true)
}

/// Decode double-quoted escapes; `\"` is only an escape inside `"..."`
fn unescape(inner: &str, quoted: bool) -> String {
    let chars: Vec<char> = inner.chars().collect();
    let mut value = String::with_capacity(inner.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' || i + 1 >= chars.len() {
            value.push(c);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        let simple = match next {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'v' => Some('\u{0B}'),
            'e' => Some('\u{1B}'),
            'f' => Some('\u{0C}'),
            '\\' => Some('\\'),
            '$' => Some('$'),
            '"' if quoted => Some('"'),
            _ => None,
        };
        if let Some(escaped) = simple {
            value.push(escaped);
            i += 2;
            continue;
        }

        match next {
            '0'..='7' => {
                let end = (i + 1..chars.len().min(i + 4))
                    .take_while(|&j| matches!(chars[j], '0'..='7'))
                    .last()
                    .map_or(i + 1, |j| j + 1);
                let octal: String = chars[i + 1..end].iter().collect();
                let code = u32::from_str_radix(&octal, 8).unwrap_or(0) & 0xFF;
                value.extend(char::from_u32(code));
                i = end;
            }
            'x' => {
                let end = (i + 2..chars.len().min(i + 4))
                    .take_while(|&j| chars[j].is_ascii_hexdigit())
                    .last()
                    .map_or(i + 2, |j| j + 1);
                if end == i + 2 {
                    value.push_str("\\x");
                } else {
                    let hex: String = chars[i + 2..end].iter().collect();
                    let code = u32::from_str_radix(&hex, 16).unwrap_or(0);
                    value.extend(char::from_u32(code));
                }
                i = end;
            }
            'u' if chars.get(i + 2) == Some(&'{') => {
                let close = chars[i + 3..].iter().position(|&ch| ch == '}');
                let decoded = close.and_then(|offset| {
                    let hex: String = chars[i + 3..i + 3 + offset].iter().collect();
                    u32::from_str_radix(&hex, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .map(|ch| (ch, i + 4 + offset))
                });
                match decoded {
                    Some((ch, end)) => {
                        value.push(ch);
                        i = end;
                    }
                    None => {
                        value.push('\\');
                        i += 1;
                    }
                }
            }
            _ => {
                // Unknown escapes keep their backslash
                value.push('\\');
                i += 1;
            }
        }
    }

    value
}
