//! `nmcli general` commands

use crate::client::Nmcli;
use crate::command::{ArgValue, CommandBuilder, Subsystem};
use crate::error::{NmcliError, NmcliResult};
use crate::parser::OutputMode;
use crate::result::CommandResult;
use crate::runner::CommandRunner;
use crate::validation;

/// NetworkManager daemon log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Err,
    Warn,
    Info,
    Debug,
    Trace,
    /// Leave the level unchanged (useful when only setting domains)
    Keep,
}

impl LogLevel {
    pub fn keyword(&self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Err => "ERR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::Keep => "KEEP",
        }
    }
}

/// `nmcli general` facade
pub struct GeneralCommands<'a, R> {
    client: &'a Nmcli<R>,
}

impl<'a, R: CommandRunner> GeneralCommands<'a, R> {
    pub(crate) fn new(client: &'a Nmcli<R>) -> Self {
        Self { client }
    }

    fn builder(subcommand: &str) -> CommandBuilder {
        CommandBuilder::new(Subsystem::General, subcommand)
    }

    /// Overall NetworkManager state (one row)
    pub fn status(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("status").build())
    }

    /// Persistent hostname, available as `CommandResult::value`
    pub fn hostname(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("hostname").build())
    }

    pub fn set_hostname(&self, hostname: &str) -> NmcliResult<CommandResult> {
        validation::validate_hostname(hostname)?;
        let builder = Self::builder("hostname").positional(ArgValue::literal(hostname));
        self.client.execute(builder.build())
    }

    /// Caller's permissions for NetworkManager operations
    pub fn permissions(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("permissions").build())
    }

    pub fn logging(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("logging").build())
    }

    /// Change daemon logging; `domains` such as `PLATFORM` or `WIFI`
    pub fn set_logging(&self, level: Option<LogLevel>, domains: &[&str]) -> NmcliResult<CommandResult> {
        if level.is_none() && domains.is_empty() {
            return Err(NmcliError::InvalidParameter(
                "general logging needs a level or domains".to_string(),
            ));
        }
        for domain in domains {
            validation::validate_argument("Logging domain", domain)?;
            if domain.contains(',') {
                return Err(NmcliError::InvalidParameter(format!(
                    "Logging domain '{}' cannot contain a comma",
                    domain
                )));
            }
        }

        // a bare `general logging` lists; with arguments it sets
        let mut builder = Self::builder("logging")
            .mode(OutputMode::Plain)
            .option_opt("level", level.map(|l| ArgValue::literal(l.keyword())));
        if !domains.is_empty() {
            builder = builder.option("domains", ArgValue::literal(domains.join(",")));
        }
        self.client.execute(builder.build())
    }
}
