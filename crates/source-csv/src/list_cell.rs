//! Parsing of list-valued cells such as `['Amethyst', "Rabbit's Foot"]`.

use std::iter::Peekable;
use std::str::Chars;

/// Parse a list cell, degrading to an empty list when it is malformed.
pub fn parse_list_cell(cell: Option<&str>) -> Vec<String> {
    parse_list_cell_checked(cell).unwrap_or_default()
}

/// Parse a list cell, returning `None` when it is malformed.
///
/// - missing, blank or `[]` cells are empty lists;
/// - cells starting with `[` must be a list literal of quoted strings;
/// - anything else is split on commas with quotes and brackets removed.
pub fn parse_list_cell_checked(cell: Option<&str>) -> Option<Vec<String>> {
    let text = match cell.map(str::trim) {
        None | Some("") | Some("[]") => return Some(Vec::new()),
        Some(text) => text,
    };

    if text.starts_with('[') {
        parse_list_literal(text)
    } else {
        Some(split_fallback(text))
    }
}

fn split_fallback(text: &str) -> Vec<String> {
    text.trim_matches(|c| c == '[' || c == ']')
        .replace(['\'', '"'], "")
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let mut chars = text.chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    skip_whitespace(&mut chars);
    if chars.peek() == Some(&']') {
        chars.next();
    } else {
        loop {
            skip_whitespace(&mut chars);
            match chars.next()? {
                // trailing comma
                ']' if !items.is_empty() => break,
                quote @ ('\'' | '"') => items.push(read_quoted(&mut chars, quote)?),
                _ => return None,
            }
            skip_whitespace(&mut chars);
            match chars.next()? {
                ',' => continue,
                ']' => break,
                _ => return None,
            }
        }
    }

    skip_whitespace(&mut chars);
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => out.push(other),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}
