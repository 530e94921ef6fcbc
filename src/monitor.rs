//! `nmcli monitor`

use crate::client::Nmcli;
use crate::command::{CommandBuilder, Subsystem};
use crate::error::NmcliResult;
use crate::result::CommandResult;
use crate::runner::CommandRunner;

/// Watches NetworkManager activity: connectivity, devices and profiles
pub struct MonitorCommand<'a, R> {
    client: &'a Nmcli<R>,
}

impl<'a, R: CommandRunner> MonitorCommand<'a, R> {
    pub(crate) fn new(client: &'a Nmcli<R>) -> Self {
        Self { client }
    }

    /// Blocks until nmcli exits; each event line lands in a `VALUE` record
    pub fn run(&self) -> NmcliResult<CommandResult> {
        self.client
            .execute(CommandBuilder::new(Subsystem::Monitor, "").build())
    }
}
