//! libnmcli - typed wrapper around the `nmcli` command-line tool
//!
//! Builds nmcli invocations, runs them synchronously and parses terse
//! output into records:
//! - Connection profiles (show, up/down, add/modify/clone/delete, import/export)
//! - Devices and Wi-Fi (status, details, scans, connect, hotspot, LLDP)
//! - General daemon state, hostname, permissions and logging
//! - Radio switches and networking/connectivity
//! - Event monitoring
//!
//! ```no_run
//! use libnmcli::Nmcli;
//!
//! let nmcli = Nmcli::new();
//! for device in nmcli.device().status()?.records() {
//!     println!("{} is {}", device["DEVICE"], device["STATE"]);
//! }
//! # Ok::<(), libnmcli::NmcliError>(())
//! ```

pub mod error;
pub mod config;
pub mod validation;
pub mod command;
pub mod fields;
pub mod parser;
pub mod runner;
pub mod result;
pub mod client;

pub mod connection;
pub mod device;
pub mod general;
pub mod radio;
pub mod networking;
pub mod monitor;

// Re-export commonly used types
pub use error::{ExitStatus, NmcliError, NmcliResult};
pub use config::NmcliConfig;
pub use command::{sanitize, sanitize_all, build_command, ArgValue, CommandBuilder, Invocation, Subsystem};
pub use parser::{OutputMode, Record};
pub use runner::{CommandRunner, RawOutput, SystemRunner};
pub use result::{CommandResult, ParsedOutput};
pub use client::Nmcli;

pub use connection::{
    AddOptions, ConnectionCommands, ConnectionId, ConnectionType, Property, ShowOptions,
    UpOptions,
};
pub use device::{
    DeviceCommands, DeviceSetOptions, HotspotOptions, Rescan, WepKeyType, WifiConnectOptions,
    WifiListOptions,
};
pub use general::{GeneralCommands, LogLevel};
pub use radio::RadioCommands;
pub use networking::{Connectivity, NetworkingCommands};
pub use monitor::MonitorCommand;
pub use validation::WifiBand;
