//! `nmcli networking` commands

use std::fmt;
use std::str::FromStr;

use crate::client::Nmcli;
use crate::command::{CommandBuilder, Subsystem};
use crate::error::{NmcliError, NmcliResult};
use crate::result::CommandResult;
use crate::runner::CommandRunner;

/// Network connectivity state as reported by NetworkManager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    None,
    Portal,
    Limited,
    Full,
    Unknown,
}

impl Connectivity {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connectivity::None => "none",
            Connectivity::Portal => "portal",
            Connectivity::Limited => "limited",
            Connectivity::Full => "full",
            Connectivity::Unknown => "unknown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Connectivity::None => "the host is not connected to any network.",
            Connectivity::Portal => {
                "the Internet connection is hijacked by a captive portal gateway."
            }
            Connectivity::Limited => {
                "the host is connected to a network, but it has no access to the Internet."
            }
            Connectivity::Full => {
                "the host is connected to a network and has full access to the Internet."
            }
            Connectivity::Unknown => "the connectivity status cannot be found out.",
        }
    }
}

impl FromStr for Connectivity {
    type Err = NmcliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Connectivity::None),
            "portal" => Ok(Connectivity::Portal),
            "limited" => Ok(Connectivity::Limited),
            "full" => Ok(Connectivity::Full),
            "unknown" => Ok(Connectivity::Unknown),
            other => Err(NmcliError::InvalidParameter(format!(
                "Unknown connectivity state '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `nmcli networking` facade
pub struct NetworkingCommands<'a, R> {
    client: &'a Nmcli<R>,
}

impl<'a, R: CommandRunner> NetworkingCommands<'a, R> {
    pub(crate) fn new(client: &'a Nmcli<R>) -> Self {
        Self { client }
    }

    fn builder(subcommand: &str) -> CommandBuilder {
        CommandBuilder::new(Subsystem::Networking, subcommand)
    }

    pub fn on(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("on").build())
    }

    /// Deactivates all interfaces managed by NetworkManager
    pub fn off(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("off").build())
    }

    /// Last known connectivity; `check` asks NetworkManager to re-check first
    pub fn connectivity(&self, check: bool) -> NmcliResult<CommandResult> {
        let builder = Self::builder("connectivity").flag_if(check, "check");
        self.client.execute(builder.build())
    }

    /// [`connectivity`](Self::connectivity) parsed into a [`Connectivity`]
    pub fn connectivity_state(&self, check: bool) -> NmcliResult<Connectivity> {
        let result = self.connectivity(check)?;
        match result.value() {
            Some(value) => value.parse(),
            None => Ok(Connectivity::Unknown),
        }
    }
}
