//! nmcli client
//!
//! [`Nmcli`] turns an [`Invocation`] into argv, runs it through a
//! [`CommandRunner`], and either parses stdout into a [`CommandResult`]
//! or reports the exit code as an error.

use tracing::{debug, warn};

use crate::command::Invocation;
use crate::config::NmcliConfig;
use crate::connection::ConnectionCommands;
use crate::device::DeviceCommands;
use crate::error::{NmcliError, NmcliResult};
use crate::fields::field_set;
use crate::general::GeneralCommands;
use crate::monitor::MonitorCommand;
use crate::networking::NetworkingCommands;
use crate::parser::{self, OutputMode};
use crate::radio::RadioCommands;
use crate::result::{CommandResult, ParsedOutput};
use crate::runner::{CommandRunner, SystemRunner};

/// Entry point: one configured nmcli executable plus the facades over it
#[derive(Debug, Clone)]
pub struct Nmcli<R = SystemRunner> {
    config: NmcliConfig,
    runner: R,
}

impl Nmcli<SystemRunner> {
    pub fn new() -> Self {
        Self::with_config(NmcliConfig::default())
    }

    pub fn with_config(config: NmcliConfig) -> Self {
        Self::with_runner(config, SystemRunner::new())
    }
}

impl Default for Nmcli<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Nmcli<R> {
    pub fn with_runner(config: NmcliConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &NmcliConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn connection(&self) -> ConnectionCommands<'_, R> {
        ConnectionCommands::new(self)
    }

    pub fn device(&self) -> DeviceCommands<'_, R> {
        DeviceCommands::new(self)
    }

    pub fn general(&self) -> GeneralCommands<'_, R> {
        GeneralCommands::new(self)
    }

    pub fn radio(&self) -> RadioCommands<'_, R> {
        RadioCommands::new(self)
    }

    pub fn networking(&self) -> NetworkingCommands<'_, R> {
        NetworkingCommands::new(self)
    }

    pub fn monitor(&self) -> MonitorCommand<'_, R> {
        MonitorCommand::new(self)
    }

    /// Current connectivity, without forcing a re-check
    pub fn status(&self) -> NmcliResult<CommandResult> {
        self.networking().connectivity(false)
    }

    /// `--fields` for an invocation: explicit override, else the table for tabular calls
    pub fn resolve_fields(&self, invocation: &Invocation) -> Option<Vec<String>> {
        if let Some(fields) = invocation.fields() {
            return Some(fields.to_vec());
        }
        match invocation.mode() {
            OutputMode::Tabular => field_set(&invocation.field_key())
                .map(|set| set.iter().map(|f| f.to_string()).collect()),
            OutputMode::Plain | OutputMode::Multiline { .. } => None,
        }
    }

    /// Arguments passed to the executable, global options first
    pub fn argv(&self, invocation: &Invocation) -> Vec<String> {
        let mut args = vec!["--terse".to_string()];

        if invocation.mode().is_multiline() {
            args.push("--mode".to_string());
            args.push("multiline".to_string());
        }
        if let Some(fields) = self.resolve_fields(invocation) {
            args.push("--fields".to_string());
            args.push(fields.join(","));
        }
        if let Some(wait) = invocation.wait().or(self.config.wait) {
            args.push("--wait".to_string());
            args.push(wait.to_string());
        }
        if self.config.show_secrets {
            args.push("--show-secrets".to_string());
        }

        args.push(invocation.subsystem().keyword().to_string());
        args.extend(invocation.tokens());
        args
    }

    /// Run one invocation to completion
    pub fn execute(&self, invocation: Invocation) -> NmcliResult<CommandResult> {
        let args = self.argv(&invocation);
        debug!(
            "Running {} {} {}",
            self.config.program,
            invocation.subsystem(),
            invocation.redacted()
        );

        let output = self.runner.run(&self.config.program, &args)?;

        if !output.success() {
            warn!(
                "{} {} exited with {}: {}",
                self.config.program,
                invocation.field_key(),
                output.exit_code,
                output.stderr.trim()
            );
            return Err(NmcliError::command_failed(output.exit_code, output.stdout, output.stderr));
        }

        let data = match invocation.mode() {
            OutputMode::Tabular | OutputMode::Plain => match self.resolve_fields(&invocation) {
                Some(fields) => ParsedOutput::Table(parser::parse_terse(&output.stdout, &fields)),
                None => ParsedOutput::Table(parser::parse_lines(&output.stdout)),
            },
            OutputMode::Multiline { sentinel } => {
                ParsedOutput::Entities(parser::parse_multiline(&output.stdout, sentinel))
            }
        };

        Ok(CommandResult::new(output.exit_code, output.stdout, output.stderr, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandBuilder, Subsystem};
    use crate::error::ExitStatus;
    use crate::runner::{MockCommandRunner, RawOutput};
    use std::io;

    fn client(runner: MockCommandRunner) -> Nmcli<MockCommandRunner> {
        Nmcli::with_runner(NmcliConfig::default(), runner)
    }

    #[test]
    fn test_argv_tabular_with_field_set() {
        let nmcli = client(MockCommandRunner::new());
        let inv = CommandBuilder::new(Subsystem::Device, "status").build();

        assert_eq!(
            nmcli.argv(&inv),
            vec!["--terse", "--fields", "DEVICE,TYPE,STATE,CONNECTION", "device", "status"]
        );
    }

    #[test]
    fn test_argv_without_field_set() {
        let nmcli = client(MockCommandRunner::new());
        let inv = CommandBuilder::new(Subsystem::Radio, "wifi on").build();

        assert_eq!(nmcli.argv(&inv), vec!["--terse", "radio", "wifi", "on"]);
    }

    #[test]
    fn test_argv_multiline_skips_table_fields() {
        let nmcli = client(MockCommandRunner::new());
        let inv = CommandBuilder::new(Subsystem::Connection, "show")
            .option("id", "home")
            .mode(OutputMode::multiline("connection.id"))
            .build();

        assert_eq!(
            nmcli.argv(&inv),
            vec!["--terse", "--mode", "multiline", "connection", "show", "id", "home"]
        );
    }

    #[test]
    fn test_argv_global_options_precede_subsystem() {
        let config = NmcliConfig::default().with_wait(20).with_show_secrets(true);
        let nmcli = Nmcli::with_runner(config, MockCommandRunner::new());

        let inv = CommandBuilder::new(Subsystem::General, "hostname").build();
        assert_eq!(
            nmcli.argv(&inv),
            vec!["--terse", "--wait", "20", "--show-secrets", "general", "hostname"]
        );

        // per-call wait wins over the configured default
        let inv = CommandBuilder::new(Subsystem::Device, "disconnect")
            .positional(crate::command::ArgValue::literal("eth0"))
            .wait(Some(5))
            .build();
        let argv = nmcli.argv(&inv);
        assert_eq!(&argv[1..3], &["--wait".to_string(), "5".to_string()]);
    }

    #[test]
    fn test_argv_field_override() {
        let nmcli = client(MockCommandRunner::new());
        let inv = CommandBuilder::new(Subsystem::Connection, "show")
            .fields(&["NAME", "UUID"])
            .build();

        assert_eq!(nmcli.argv(&inv)[1..3], ["--fields".to_string(), "NAME,UUID".to_string()]);
    }

    #[test]
    fn test_execute_parses_tabular_output() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program, args| program == "nmcli" && args.last().map(String::as_str) == Some("status"))
            .times(1)
            .returning(|_, _| {
                Ok(RawOutput::new(
                    0,
                    "eth0:ethernet:connected:Wired connection 1\nlo:loopback:unmanaged:\n",
                    "",
                ))
            });

        let result = client(runner)
            .execute(CommandBuilder::new(Subsystem::Device, "status").build())
            .unwrap();

        assert_eq!(result.records().len(), 2);
        assert_eq!(result.records()[0]["CONNECTION"], "Wired connection 1");
        assert_eq!(result.records()[1]["CONNECTION"], "");
    }

    #[test]
    fn test_execute_single_value_output() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_, _| Ok(RawOutput::new(0, "router\n", "")));

        let result = client(runner)
            .execute(CommandBuilder::new(Subsystem::General, "hostname").build())
            .unwrap();
        assert_eq!(result.value(), Some("router"));
    }

    #[test]
    fn test_execute_maps_exit_code_to_error() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| {
            Ok(RawOutput::new(8, "", "Error: NetworkManager is not running.\n"))
        });

        let err = client(runner)
            .execute(CommandBuilder::new(Subsystem::General, "status").build())
            .unwrap_err();

        assert_eq!(err.exit_status(), Some(ExitStatus::NotRunning));
        assert_eq!(err.stderr(), Some("Error: NetworkManager is not running.\n"));
        match err {
            NmcliError::CommandFailed { message, .. } => {
                assert_eq!(message, "NetworkManager is not running.")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_execute_propagates_spawn_failure() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::NotFound, "nmcli not found")));

        let err = client(runner)
            .execute(CommandBuilder::new(Subsystem::General, "status").build())
            .unwrap_err();
        assert!(matches!(err, NmcliError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn test_custom_program() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program, _| program == "/usr/local/bin/nmcli")
            .returning(|_, _| Ok(RawOutput::new(0, "", "")));

        let nmcli = Nmcli::with_runner(NmcliConfig::default().with_program("/usr/local/bin/nmcli"), runner);
        assert!(nmcli.execute(CommandBuilder::new(Subsystem::Radio, "wifi on").build()).is_ok());
    }
}
