//! Sources for the raw variable mapping: the live process environment and
//! the optional `.env` override file.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::domain::models::RawEnvironment;

/// Snapshot the process environment.
///
/// Variables whose name or value is not valid UTF-8 cannot be matched by the
/// schema and are skipped.
pub fn from_process() -> RawEnvironment {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                warn!(key = ?key, "skipping environment variable that is not valid UTF-8");
                None
            }
        })
        .collect()
}

/// Fill gaps in `raw` from a `KEY=value` file.
///
/// Keys already present in `raw` keep their value. A missing or unreadable
/// file applies nothing, and lines that do not parse are skipped. Returns
/// how many values were taken from the file.
pub fn merge_override_file(raw: &mut RawEnvironment, path: &Path) -> usize {
    let content = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no override file");
            return 0;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read override file, ignoring it");
            return 0;
        }
    };

    let mut applied = 0;
    for (key, value) in parse_env_file(&content) {
        if raw.fill_gap(key.clone(), value) {
            trace!(%key, "filled from override file");
            applied += 1;
        } else {
            trace!(%key, "already set, override file value ignored");
        }
    }

    debug!(path = %path.display(), applied, "merged override file");
    applied
}

/// Parse `.env` content into key/value pairs.
///
/// Values are taken literally: no `$VAR` expansion and no escapes other than
/// `\n` and `\r` inside double quotes. Quoted values may span lines. For
/// unquoted values `#` starts a comment. A key given twice keeps its last
/// value.
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = content.split('\n').collect();
    let mut vars = BTreeMap::new();

    let mut index = 0;
    while index < lines.len() {
        let line_num = index + 1;
        let line = lines[index].trim();
        index += 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let body = line
            .strip_prefix("export")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map_or(line, str::trim_start);

        let Some((key, rest)) = body.split_once('=') else {
            warn!(line = line_num, "skipping override file line without '='");
            continue;
        };

        let key = key.trim_end();
        if !is_valid_key(key) {
            warn!(line = line_num, key, "skipping override file line with invalid key");
            continue;
        }

        let rest = rest.trim_start();
        let value = match quoted_value(rest, &lines[index..]) {
            Some((value, consumed)) => {
                index += consumed;
                value
            }
            None => unquoted_value(rest),
        };

        vars.insert(key.to_string(), value);
    }

    vars
}

/// Keys are letters, digits, `_`, `.` and `-`.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn unquoted_value(rest: &str) -> String {
    rest.split('#').next().unwrap_or_default().trim().to_string()
}

/// Value of a quoted assignment whose text after `=` is `rest`, reading on
/// into `following` lines until the quote closes. Returns the value and the
/// number of extra lines consumed, or `None` if `rest` is not quoted or the
/// quote never closes.
fn quoted_value(rest: &str, following: &[&str]) -> Option<(String, usize)> {
    let quote = rest.chars().next().filter(|c| matches!(c, '"' | '\'' | '`'))?;
    let mut text = rest[quote.len_utf8()..].to_string();

    let mut consumed = 0;
    let inner = loop {
        if let Some(end) = closing_quote(&text, quote) {
            break &text[..end];
        }
        let next = following.get(consumed)?;
        text.push('\n');
        text.push_str(next);
        consumed += 1;
    };

    let value = if quote == '"' {
        inner.replace("\\n", "\n").replace("\\r", "\r")
    } else {
        inner.to_string()
    };
    Some((value, consumed))
}

/// Byte offset of the first `quote` in `text` not preceded by a backslash.
fn closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (offset, c) in text.char_indices() {
        if c == quote && !escaped {
            return Some(offset);
        }
        escaped = c == '\\' && !escaped;
    }
    None
}

/// Truthy spellings accepted by on/off switches such as `DOTENV_DISABLED`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
