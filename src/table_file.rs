//! External sine tables
//!
//! The HDL build carries its own copy of the sine table, usually as a C
//! array initializer. Loading that file lets the model run bit for bit on
//! the same samples. Accepted is a list of words separated by commas or
//! whitespace, decimal or `0x` hex, optionally wrapped in the body of a C
//! array (`... = { ... };`) with `//` and `/* */` comments.
use std::path::Path;

use pll_q30::{SineTable, SINE_LEN};

use crate::Error;

/// Parse a single word. Hex words are taken as raw bits.
fn word(token: &str) -> Option<i32> {
    let token = token.trim_end_matches(['u', 'U', 'l', 'L']);
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok()? as i32 as i64,
        None => digits.parse::<i64>().ok()?,
    };
    let value = if negative { -value } else { value };
    i32::try_from(value)
        .ok()
        .or_else(|| u32::try_from(value).ok().map(|v| v as i32))
}

/// Strip `/* */` block comments, keeping line breaks for error positions.
fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let end = rest[start..]
            .find("*/")
            .map_or(rest.len(), |e| start + e + 2);
        out.extend(rest[start..end].chars().filter(|c| *c == '\n'));
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Parse table words from text.
///
/// # Returns
/// The words in file order. The count is not checked here.
pub fn parse_words(text: &str) -> Result<Vec<i32>, Error> {
    let text = strip_block_comments(text);
    // Restrict to the initializer body if there is one.
    let (first_line, body) = match text.find('{') {
        Some(open) => {
            let close = text[open..].find('}').map_or(text.len(), |c| open + c);
            (text[..open].matches('\n').count(), &text[open + 1..close])
        }
        None => (0, text.as_str()),
    };

    let mut words = Vec::with_capacity(SINE_LEN);
    for (i, line) in body.lines().enumerate() {
        let line = line.split("//").next().unwrap_or_default();
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let w = word(token).ok_or_else(|| Error::Parse {
                line: first_line + i + 1,
                text: token.into(),
            })?;
            words.push(w);
        }
    }
    Ok(words)
}

/// Parse a complete table.
pub fn parse(text: &str) -> Result<SineTable, Error> {
    let words = parse_words(text)?;
    Ok(SineTable::from_words(&words)?)
}

/// Load a complete table from a file.
pub fn load(path: &Path) -> Result<SineTable, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.into(),
        source,
    })?;
    let table = parse(&text)?;
    log::info!("Loaded sine table from {}", path.display());
    if &table != SineTable::reference() {
        log::warn!("External sine table differs from the reference table");
    }
    Ok(table)
}
