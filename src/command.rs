//! Argument sanitizing and command construction
//!
//! Every value handed to nmcli goes through [`sanitize`]. A
//! [`CommandBuilder`] collects positionals and `key value` options in
//! insertion order and produces an immutable [`Invocation`].

use std::fmt;

use crate::parser::OutputMode;

/// A value destined for the nmcli command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    /// Keyword-like text, lowercased on sanitize
    Text(String),
    /// Case-sensitive user data (names, passwords, paths), passed through unchanged
    Literal(String),
}

impl ArgValue {
    pub fn literal(value: impl Into<String>) -> Self {
        ArgValue::Literal(value.into())
    }

    /// nmcli's `{yes | no}` keyword for a flag
    pub fn yes_no(value: bool) -> Self {
        ArgValue::Text(if value { "yes" } else { "no" }.to_string())
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(value.into())
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Int(value.into())
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

/// Normalize a value into a command-line token
pub fn sanitize(value: &ArgValue) -> String {
    match value {
        ArgValue::Bool(b) => b.to_string(),
        ArgValue::Int(n) => n.to_string(),
        ArgValue::Text(s) => s.to_ascii_lowercase(),
        ArgValue::Literal(s) => s.clone(),
    }
}

pub fn sanitize_all(values: &[ArgValue]) -> Vec<String> {
    values.iter().map(sanitize).collect()
}

/// nmcli subsystems (the first non-option argument)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    General,
    Networking,
    Radio,
    Connection,
    Device,
    Monitor,
}

impl Subsystem {
    pub fn keyword(&self) -> &'static str {
        match self {
            Subsystem::General => "general",
            Subsystem::Networking => "networking",
            Subsystem::Radio => "radio",
            Subsystem::Connection => "connection",
            Subsystem::Device => "device",
            Subsystem::Monitor => "monitor",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Option keys whose values never reach the logs
fn is_secret_option(key: &str) -> bool {
    let key = key.trim_start_matches(['+', '-']);
    key.ends_with("password")
        || key.ends_with("psk")
        || key.contains("wep-key")
        || key.ends_with("secrets")
        || key == "pin"
        || key.ends_with(".pin")
        || key.ends_with("-pin")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Positional(String),
    Option { key: String, value: String },
}

/// One fully-built nmcli call, minus the global options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    subsystem: Subsystem,
    subcommand: String,
    pieces: Vec<Piece>,
    mode: OutputMode,
    fields: Option<Vec<String>>,
    wait: Option<u32>,
}

impl Invocation {
    pub fn subsystem(&self) -> Subsystem {
        self.subsystem
    }

    /// Subcommand path, e.g. `"show"` or `"wifi list"`; empty for the default action
    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    pub fn mode(&self) -> &OutputMode {
        &self.mode
    }

    /// Explicit `--fields` override, if any
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn wait(&self) -> Option<u32> {
        self.wait
    }

    /// Key into the field table: `"subsystem subcommand"` or just `"subsystem"`
    pub fn field_key(&self) -> String {
        if self.subcommand.is_empty() {
            self.subsystem.keyword().to_string()
        } else {
            format!("{} {}", self.subsystem.keyword(), self.subcommand)
        }
    }

    /// Composite string with secret option values masked, for logs
    pub fn redacted(&self) -> String {
        let mut out = self.subcommand.clone();
        for piece in &self.pieces {
            match piece {
                Piece::Positional(token) => {
                    out.push(' ');
                    out.push_str(token);
                }
                Piece::Option { key, .. } if is_secret_option(key) => {
                    out.push_str(&format!(" {} ***", key));
                }
                Piece::Option { key, value } => out.push_str(&format!(" {} {}", key, value)),
            }
        }
        out
    }

    /// Tokens following the subsystem keyword
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .subcommand
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for piece in &self.pieces {
            match piece {
                Piece::Positional(token) => tokens.push(token.clone()),
                Piece::Option { key, value } => {
                    tokens.push(key.clone());
                    tokens.push(value.clone());
                }
            }
        }
        tokens
    }
}

/// Composite string: `"{subcommand} {opt1} {opt2 val2} ..."`
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subcommand)?;
        for piece in &self.pieces {
            match piece {
                Piece::Positional(token) => write!(f, " {}", token)?,
                Piece::Option { key, value } => write!(f, " {} {}", key, value)?,
            }
        }
        Ok(())
    }
}

/// Builder for [`Invocation`]
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    subsystem: Subsystem,
    subcommand: String,
    pieces: Vec<Piece>,
    mode: OutputMode,
    fields: Option<Vec<String>>,
    wait: Option<u32>,
}

impl CommandBuilder {
    pub fn new(subsystem: Subsystem, subcommand: &str) -> Self {
        Self {
            subsystem,
            subcommand: subcommand.trim().to_string(),
            pieces: Vec::new(),
            mode: OutputMode::Tabular,
            fields: None,
            wait: None,
        }
    }

    /// Bare positional token, sanitized
    pub fn positional(mut self, value: impl Into<ArgValue>) -> Self {
        self.pieces.push(Piece::Positional(sanitize(&value.into())));
        self
    }

    pub fn positionals<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgValue>,
    {
        for value in values {
            self = self.positional(value);
        }
        self
    }

    /// Fixed keyword such as `--active`, emitted verbatim
    pub fn flag(mut self, token: &str) -> Self {
        self.pieces.push(Piece::Positional(token.to_string()));
        self
    }

    pub fn flag_if(self, enabled: bool, token: &str) -> Self {
        if enabled {
            self.flag(token)
        } else {
            self
        }
    }

    /// `key value` pair; the value is sanitized
    pub fn option(mut self, key: &str, value: impl Into<ArgValue>) -> Self {
        self.pieces.push(Piece::Option {
            key: key.to_string(),
            value: sanitize(&value.into()),
        });
        self
    }

    pub fn option_opt<V: Into<ArgValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.option(key, value),
            None => self,
        }
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Per-call `--wait`, overriding the configured default
    pub fn wait(mut self, seconds: Option<u32>) -> Self {
        if seconds.is_some() {
            self.wait = seconds;
        }
        self
    }

    pub fn build(self) -> Invocation {
        Invocation {
            subsystem: self.subsystem,
            subcommand: self.subcommand,
            pieces: self.pieces,
            mode: self.mode,
            fields: self.fields,
            wait: self.wait,
        }
    }
}

/// Composite command string from positionals followed by options
pub fn build_command(subcommand: &str, positionals: &[ArgValue], options: &[(&str, ArgValue)]) -> String {
    let mut parts = vec![subcommand.to_string()];
    parts.extend(positionals.iter().map(sanitize));
    parts.extend(
        options
            .iter()
            .map(|(key, value)| format!("{} {}", key, sanitize(value))),
    );
    parts.join(" ")
}
