//! `nmcli radio` commands: radio switch state and control

use crate::client::Nmcli;
use crate::command::{CommandBuilder, Subsystem};
use crate::error::NmcliResult;
use crate::result::CommandResult;
use crate::runner::CommandRunner;

pub struct RadioCommands<'a, R> {
    client: &'a Nmcli<R>,
}

impl<'a, R: CommandRunner> RadioCommands<'a, R> {
    pub(crate) fn new(client: &'a Nmcli<R>) -> Self {
        Self { client }
    }

    fn run(&self, subcommand: &str) -> NmcliResult<CommandResult> {
        self.client
            .execute(CommandBuilder::new(Subsystem::Radio, subcommand).build())
    }

    /// Hardware and software switch state of every radio (one row)
    pub fn all(&self) -> NmcliResult<CommandResult> {
        self.run("all")
    }

    pub fn all_on(&self) -> NmcliResult<CommandResult> {
        self.run("all on")
    }

    pub fn all_off(&self) -> NmcliResult<CommandResult> {
        self.run("all off")
    }

    /// `enabled` or `disabled`, available as `CommandResult::value`
    pub fn wifi(&self) -> NmcliResult<CommandResult> {
        self.run("wifi")
    }

    pub fn wifi_on(&self) -> NmcliResult<CommandResult> {
        self.run("wifi on")
    }

    pub fn wifi_off(&self) -> NmcliResult<CommandResult> {
        self.run("wifi off")
    }

    pub fn wwan(&self) -> NmcliResult<CommandResult> {
        self.run("wwan")
    }

    pub fn wwan_on(&self) -> NmcliResult<CommandResult> {
        self.run("wwan on")
    }

    pub fn wwan_off(&self) -> NmcliResult<CommandResult> {
        self.run("wwan off")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NmcliConfig;
    use crate::runner::{MockCommandRunner, RawOutput};

    #[test]
    fn test_wifi_state_is_single_value() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|_, args| args == ["--terse", "radio", "wifi"])
            .returning(|_, _| Ok(RawOutput::new(0, "enabled\n", "")));

        let nmcli = Nmcli::with_runner(NmcliConfig::default(), runner);
        assert_eq!(nmcli.radio().wifi().unwrap().value(), Some("enabled"));
    }

    #[test]
    fn test_all_uses_field_set() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|_, args| args == ["--terse", "--fields", "WIFI-HW,WIFI,WWAN-HW,WWAN", "radio", "all"])
            .returning(|_, _| Ok(RawOutput::new(0, "enabled:enabled:missing:enabled\n", "")));

        let nmcli = Nmcli::with_runner(NmcliConfig::default(), runner);
        let result = nmcli.radio().all().unwrap();
        assert_eq!(result.records()[0]["WWAN-HW"], "missing");
    }

    #[test]
    fn test_all_off() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|_, args| args == ["--terse", "radio", "all", "off"])
            .times(1)
            .returning(|_, _| Ok(RawOutput::new(0, "", "")));

        let nmcli = Nmcli::with_runner(NmcliConfig::default(), runner);
        assert!(nmcli.radio().all_off().is_ok());
    }
}
