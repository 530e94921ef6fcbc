//! `nmcli device` commands, including the `device wifi` family

use crate::client::Nmcli;
use crate::command::{ArgValue, CommandBuilder, Subsystem};
use crate::connection::Property;
use crate::error::{NmcliError, NmcliResult};
use crate::parser::OutputMode;
use crate::result::CommandResult;
use crate::runner::CommandRunner;
use crate::validation::{self, WifiBand};

/// Property that opens each device in `device show` output
pub const DEVICE_SENTINEL: &str = "GENERAL.DEVICE";

/// Property that opens each neighbor in `device lldp list` output
pub const LLDP_SENTINEL: &str = "NEIGHBOR.DEVICE";

/// Options for `device set`
#[derive(Debug, Clone, Default)]
pub struct DeviceSetOptions {
    pub autoconnect: Option<bool>,
    pub managed: Option<bool>,
}

/// Whether `device wifi list` triggers a scan first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rescan {
    Yes,
    No,
    /// Scan only when the cached list is stale
    Auto,
}

impl Rescan {
    pub fn keyword(&self) -> &'static str {
        match self {
            Rescan::Yes => "yes",
            Rescan::No => "no",
            Rescan::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WifiListOptions {
    pub ifname: Option<String>,
    pub bssid: Option<String>,
    pub rescan: Option<Rescan>,
}

/// How a WEP `password` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WepKeyType {
    Key,
    Phrase,
}

impl WepKeyType {
    pub fn keyword(&self) -> &'static str {
        match self {
            WepKeyType::Key => "key",
            WepKeyType::Phrase => "phrase",
        }
    }
}

/// Options for `device wifi connect`
#[derive(Debug, Clone, Default)]
pub struct WifiConnectOptions {
    /// SSID or BSSID to connect to
    pub target: String,
    pub password: Option<String>,
    pub wep_key_type: Option<WepKeyType>,
    pub ifname: Option<String>,
    pub bssid: Option<String>,
    /// Name for the created profile
    pub name: Option<String>,
    /// Make the profile visible only to the calling user
    pub private: Option<bool>,
    /// Connect to a network that does not broadcast its SSID
    pub hidden: Option<bool>,
    pub wait: Option<u32>,
}

impl WifiConnectOptions {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Options for `device wifi hotspot`
#[derive(Debug, Clone, Default)]
pub struct HotspotOptions {
    pub ifname: Option<String>,
    pub con_name: Option<String>,
    pub ssid: Option<String>,
    pub band: Option<WifiBand>,
    /// Requires `band`
    pub channel: Option<u32>,
    pub password: Option<String>,
}

/// `nmcli device` facade
pub struct DeviceCommands<'a, R> {
    client: &'a Nmcli<R>,
}

impl<'a, R: CommandRunner> DeviceCommands<'a, R> {
    pub(crate) fn new(client: &'a Nmcli<R>) -> Self {
        Self { client }
    }

    fn builder(subcommand: &str) -> CommandBuilder {
        CommandBuilder::new(Subsystem::Device, subcommand)
    }

    /// One row per device
    pub fn status(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("status").build())
    }

    /// Device details keyed by `GENERAL.DEVICE`; all devices when `ifname` is `None`
    pub fn show(&self, ifname: Option<&str>) -> NmcliResult<CommandResult> {
        let mut builder = Self::builder("show").mode(OutputMode::multiline(DEVICE_SENTINEL));
        if let Some(ifname) = ifname {
            validation::validate_device_name(ifname)?;
            builder = builder.positional(ArgValue::literal(ifname));
        }
        self.client.execute(builder.build())
    }

    pub fn set(&self, ifname: &str, options: &DeviceSetOptions) -> NmcliResult<CommandResult> {
        validation::validate_device_name(ifname)?;
        if options.autoconnect.is_none() && options.managed.is_none() {
            return Err(NmcliError::InvalidParameter(
                "device set needs autoconnect or managed".to_string(),
            ));
        }

        let builder = Self::builder("set")
            .positional(ArgValue::literal(ifname))
            .option_opt("autoconnect", options.autoconnect.map(ArgValue::yes_no))
            .option_opt("managed", options.managed.map(ArgValue::yes_no));
        self.client.execute(builder.build())
    }

    pub fn connect(&self, ifname: &str) -> NmcliResult<CommandResult> {
        self.single("connect", ifname)
    }

    /// Apply pending profile changes to a device without a full reconnect
    pub fn reapply(&self, ifname: &str) -> NmcliResult<CommandResult> {
        self.single("reapply", ifname)
    }

    /// Change the applied connection temporarily (reverted on reconnect)
    pub fn modify(&self, ifname: &str, properties: &[Property]) -> NmcliResult<CommandResult> {
        validation::validate_device_name(ifname)?;
        if properties.is_empty() {
            return Err(NmcliError::InvalidParameter(
                "device modify needs at least one property".to_string(),
            ));
        }

        let mut builder = Self::builder("modify").positional(ArgValue::literal(ifname));
        for property in properties {
            property.validate()?;
            builder = property.append_to(builder);
        }
        self.client.execute(builder.build())
    }

    pub fn disconnect(&self, ifnames: &[&str]) -> NmcliResult<CommandResult> {
        self.several("disconnect", ifnames)
    }

    /// Delete software devices (bridges, bonds, ...)
    pub fn delete(&self, ifnames: &[&str]) -> NmcliResult<CommandResult> {
        self.several("delete", ifnames)
    }

    /// Watch devices for state changes; all devices when `ifnames` is empty.
    /// Blocks until nmcli exits.
    pub fn monitor(&self, ifnames: &[&str]) -> NmcliResult<CommandResult> {
        for ifname in ifnames {
            validation::validate_device_name(ifname)?;
        }
        let builder = Self::builder("monitor")
            .positionals(ifnames.iter().map(|i| ArgValue::literal(*i)));
        self.client.execute(builder.build())
    }

    /// LLDP neighbors keyed by `NEIGHBOR.DEVICE`
    pub fn lldp(&self, ifname: Option<&str>) -> NmcliResult<CommandResult> {
        if let Some(ifname) = ifname {
            validation::validate_interface_name(ifname)?;
        }
        let builder = Self::builder("lldp list")
            .mode(OutputMode::multiline(LLDP_SENTINEL))
            .option_opt("ifname", ifname.map(ArgValue::literal));
        self.client.execute(builder.build())
    }

    /// Visible access points
    pub fn wifi_list(&self, options: &WifiListOptions) -> NmcliResult<CommandResult> {
        if let Some(ifname) = &options.ifname {
            validation::validate_interface_name(ifname)?;
        }
        if let Some(bssid) = &options.bssid {
            validation::validate_mac_address(bssid)?;
        }

        let builder = Self::builder("wifi list")
            .option_opt("--rescan", options.rescan.map(|r| r.keyword()))
            .option_opt("ifname", options.ifname.as_deref().map(ArgValue::literal))
            .option_opt("bssid", options.bssid.as_deref().map(ArgValue::literal));
        self.client.execute(builder.build())
    }

    /// Connect to an access point, creating a profile for it
    pub fn wifi_connect(&self, options: &WifiConnectOptions) -> NmcliResult<CommandResult> {
        validation::validate_argument("SSID or BSSID", &options.target)?;
        if let Some(password) = &options.password {
            validation::validate_argument("Password", password)?;
        }
        if options.wep_key_type.is_some() && options.password.is_none() {
            return Err(NmcliError::InvalidParameter(
                "wep-key-type requires a password".to_string(),
            ));
        }
        if let Some(ifname) = &options.ifname {
            validation::validate_interface_name(ifname)?;
        }
        if let Some(bssid) = &options.bssid {
            validation::validate_mac_address(bssid)?;
        }
        if let Some(name) = &options.name {
            validation::validate_argument("Connection name", name)?;
        }

        let builder = Self::builder("wifi connect")
            .positional(ArgValue::literal(options.target.as_str()))
            .option_opt("password", options.password.as_deref().map(ArgValue::literal))
            .option_opt("wep-key-type", options.wep_key_type.map(|k| k.keyword()))
            .option_opt("ifname", options.ifname.as_deref().map(ArgValue::literal))
            .option_opt("bssid", options.bssid.as_deref().map(ArgValue::literal))
            .option_opt("name", options.name.as_deref().map(ArgValue::literal))
            .option_opt("private", options.private.map(ArgValue::yes_no))
            .option_opt("hidden", options.hidden.map(ArgValue::yes_no))
            .wait(options.wait);
        self.client.execute(builder.build())
    }

    /// Start an access point on a Wi-Fi device
    pub fn wifi_hotspot(&self, options: &HotspotOptions) -> NmcliResult<CommandResult> {
        if let Some(ifname) = &options.ifname {
            validation::validate_interface_name(ifname)?;
        }
        if let Some(con_name) = &options.con_name {
            validation::validate_argument("Connection name", con_name)?;
        }
        if let Some(ssid) = &options.ssid {
            validation::validate_ssid(ssid)?;
        }
        if let Some(password) = &options.password {
            validation::validate_wifi_password(password)?;
        }
        if let Some(channel) = options.channel {
            let band = options.band.ok_or_else(|| {
                NmcliError::InvalidParameter("Hotspot channel requires a band".to_string())
            })?;
            validation::validate_wifi_channel(channel, band)?;
        }

        let builder = Self::builder("wifi hotspot")
            .option_opt("ifname", options.ifname.as_deref().map(ArgValue::literal))
            .option_opt("con-name", options.con_name.as_deref().map(ArgValue::literal))
            .option_opt("ssid", options.ssid.as_deref().map(ArgValue::literal))
            .option_opt("band", options.band.map(|b| b.keyword()))
            .option_opt("channel", options.channel)
            .option_opt("password", options.password.as_deref().map(ArgValue::literal));
        self.client.execute(builder.build())
    }

    /// Ask for a new scan, optionally probing specific hidden SSIDs
    pub fn wifi_rescan(&self, ifname: Option<&str>, ssids: &[&str]) -> NmcliResult<CommandResult> {
        if let Some(ifname) = ifname {
            validation::validate_interface_name(ifname)?;
        }

        let mut builder = Self::builder("wifi rescan").option_opt("ifname", ifname.map(ArgValue::literal));
        for ssid in ssids {
            validation::validate_ssid(ssid)?;
            builder = builder.option("ssid", ArgValue::literal(*ssid));
        }
        self.client.execute(builder.build())
    }

    fn single(&self, subcommand: &str, ifname: &str) -> NmcliResult<CommandResult> {
        validation::validate_device_name(ifname)?;
        let builder = Self::builder(subcommand).positional(ArgValue::literal(ifname));
        self.client.execute(builder.build())
    }

    fn several(&self, subcommand: &str, ifnames: &[&str]) -> NmcliResult<CommandResult> {
        if ifnames.is_empty() {
            return Err(NmcliError::InvalidParameter(format!(
                "device {} needs at least one interface",
                subcommand
            )));
        }
        for ifname in ifnames {
            validation::validate_device_name(ifname)?;
        }
        let builder = Self::builder(subcommand)
            .positionals(ifnames.iter().map(|i| ArgValue::literal(*i)));
        self.client.execute(builder.build())
    }
}
