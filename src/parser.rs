//! nmcli output parsing
//!
//! Three shapes come back from `nmcli --terse`:
//!
//! - tabular: one entry per line, values separated by `:`. Literal colons
//!   and backslashes inside values are escaped with `\`.
//! - plain: one unescaped value per line (hostname, monitor events).
//! - multiline: one `SECTION.PROPERTY:value` pair per line. A sentinel
//!   property (`GENERAL.DEVICE` for `device show`) opens each entity.
//!
//! Parsing is lenient. Lines that don't fit are dropped, never reported.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// One parsed entry: field or property name to raw value
pub type Record = BTreeMap<String, String>;

/// Column used when a tabular command has no field set
pub const VALUE_FIELD: &str = "VALUE";

static SECTION_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("constant regex pattern is valid"));

/// How an invocation's stdout is read back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Terse columns, named by the field table when it has an entry
    Tabular,
    /// One `VALUE` per line, never given a field set
    Plain,
    Multiline { sentinel: &'static str },
}

impl OutputMode {
    pub fn multiline(sentinel: &'static str) -> Self {
        OutputMode::Multiline { sentinel }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, OutputMode::Multiline { .. })
    }
}

/// Split a terse line on unescaped colons.
///
/// Escape sequences are kept as-is in the returned fields; see [`unescape`].
pub fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Resolve terse escapes: `\:` to `:` and `\\` to `\`
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ (':' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Zip each terse line with `fields`, keeping only lines with exactly that many values
pub fn parse_terse<S: AsRef<str>>(stdout: &str, fields: &[S]) -> Vec<Record> {
    let mut records = Vec::new();

    for line in stdout.lines() {
        if line.is_empty() {
            continue;
        }
        let values = split_terse(line);
        if values.len() != fields.len() {
            trace!(
                "dropping terse line with {} fields (expected {}): {}",
                values.len(),
                fields.len(),
                line
            );
            continue;
        }
        let record: Record = fields
            .iter()
            .map(|f| f.as_ref().to_string())
            .zip(values)
            .collect();
        records.push(record);
    }

    records
}

/// One [`VALUE_FIELD`] record per non-empty line, taken verbatim.
///
/// Single-value output (hostname, connectivity, monitor events) is not
/// colon-escaped, so it is never split.
pub fn parse_lines(stdout: &str) -> Vec<Record> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| Record::from([(VALUE_FIELD.to_string(), line.to_string())]))
        .collect()
}

/// Group `SECTION.PROPERTY:value` lines into entities opened by `sentinel`.
///
/// Keys are stored in full (`IP4.ADDRESS[1]`) so sections don't collide.
/// Values are kept verbatim apart from a trailing `\r`; under `--terse`
/// there is no column padding, so any whitespace belongs to the value.
/// A repeated identifier resumes its existing entity.
pub fn parse_multiline(stdout: &str, sentinel: &str) -> BTreeMap<String, Record> {
    let mut entities: BTreeMap<String, Record> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            trace!("skipping multiline row without separator: {}", line);
            continue;
        };
        let key = key.trim();
        let value = value.strip_suffix('\r').unwrap_or(value).to_string();

        if is_sentinel(key, sentinel) {
            entities.entry(value.clone()).or_default();
            current = Some(value.clone());
        }

        match current.as_ref().and_then(|id| entities.get_mut(id)) {
            Some(entity) => {
                entity.insert(key.to_string(), value);
            }
            None => trace!("skipping multiline row before first {}: {}", sentinel, line),
        }
    }

    entities
}

fn is_sentinel(key: &str, sentinel: &str) -> bool {
    key == sentinel || SECTION_INDEX.replace_all(key, "") == sentinel
}
