//! `nmcli connection` commands
//!
//! Connection profiles are addressed with a [`ConnectionId`]. Which
//! selector keywords a subcommand accepts is checked before anything
//! runs; `apath` only makes sense for `show` and `down`.

use crate::client::Nmcli;
use crate::command::{ArgValue, CommandBuilder, Subsystem};
use crate::error::{NmcliError, NmcliResult};
use crate::parser::OutputMode;
use crate::result::CommandResult;
use crate::runner::CommandRunner;
use crate::validation;

/// Property that opens each profile in `connection show ID` output
pub const CONNECTION_SENTINEL: &str = "connection.id";

/// How a connection profile is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionId {
    /// `id NAME`: the connection name
    Name(String),
    /// `uuid UUID`
    Uuid(String),
    /// `path PATH`: D-Bus settings path or its trailing number
    Path(String),
    /// `apath PATH`: D-Bus active connection path or its trailing number
    ActivePath(String),
    /// No keyword; nmcli resolves name, UUID or path itself
    Bare(String),
}

impl ConnectionId {
    pub fn name(name: impl Into<String>) -> Self {
        ConnectionId::Name(name.into())
    }

    pub fn uuid(uuid: impl Into<String>) -> Self {
        ConnectionId::Uuid(uuid.into())
    }

    pub fn path(path: impl Into<String>) -> Self {
        ConnectionId::Path(path.into())
    }

    pub fn active_path(path: impl Into<String>) -> Self {
        ConnectionId::ActivePath(path.into())
    }

    pub fn bare(id: impl Into<String>) -> Self {
        ConnectionId::Bare(id.into())
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            ConnectionId::Name(_) => Some("id"),
            ConnectionId::Uuid(_) => Some("uuid"),
            ConnectionId::Path(_) => Some("path"),
            ConnectionId::ActivePath(_) => Some("apath"),
            ConnectionId::Bare(_) => None,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ConnectionId::Name(v)
            | ConnectionId::Uuid(v)
            | ConnectionId::Path(v)
            | ConnectionId::ActivePath(v)
            | ConnectionId::Bare(v) => v,
        }
    }

    fn validate(&self, subcommand: &str, allow_active_path: bool) -> NmcliResult<()> {
        if !allow_active_path && matches!(self, ConnectionId::ActivePath(_)) {
            return Err(NmcliError::InvalidParameter(format!(
                "connection {} does not accept an apath selector",
                subcommand
            )));
        }
        validation::validate_argument("Connection ID", self.value())?;
        if let ConnectionId::Uuid(uuid) = self {
            validation::validate_uuid(uuid)?;
        }
        Ok(())
    }

    fn append_to(&self, builder: CommandBuilder) -> CommandBuilder {
        let value = ArgValue::literal(self.value());
        match self.keyword() {
            Some(keyword) => builder.option(keyword, value),
            None => builder.positional(value),
        }
    }
}

/// `setting.property value` pair for `add` and `modify`.
///
/// Prefix the name with `+` or `-` to append to or remove from a
/// multi-value property. An empty value clears the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub(crate) fn validate(&self) -> NmcliResult<()> {
        validation::validate_argument("Property name", &self.name)?;
        if self.value.chars().any(|c| c.is_control() && c != '\t') {
            return Err(NmcliError::InvalidParameter(format!(
                "Value for {} contains invalid control characters",
                self.name
            )));
        }
        Ok(())
    }

    pub(crate) fn append_to(&self, builder: CommandBuilder) -> CommandBuilder {
        builder.option(&self.name, ArgValue::literal(self.value.as_str()))
    }
}

/// Connection types known to `connection add`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Ethernet,
    Wifi,
    Wimax,
    Pppoe,
    Gsm,
    Cdma,
    Infiniband,
    Bluetooth,
    Vlan,
    Bond,
    BondSlave,
    Team,
    TeamSlave,
    Bridge,
    BridgeSlave,
    Vpn,
    OlpcMesh,
    Adsl,
    Tun,
    IpTunnel,
    Macvlan,
    Vxlan,
    Dummy,
}

impl ConnectionType {
    pub fn keyword(&self) -> &'static str {
        match self {
            ConnectionType::Ethernet => "ethernet",
            ConnectionType::Wifi => "wifi",
            ConnectionType::Wimax => "wimax",
            ConnectionType::Pppoe => "pppoe",
            ConnectionType::Gsm => "gsm",
            ConnectionType::Cdma => "cdma",
            ConnectionType::Infiniband => "infiniband",
            ConnectionType::Bluetooth => "bluetooth",
            ConnectionType::Vlan => "vlan",
            ConnectionType::Bond => "bond",
            ConnectionType::BondSlave => "bond-slave",
            ConnectionType::Team => "team",
            ConnectionType::TeamSlave => "team-slave",
            ConnectionType::Bridge => "bridge",
            ConnectionType::BridgeSlave => "bridge-slave",
            ConnectionType::Vpn => "vpn",
            ConnectionType::OlpcMesh => "olpc-mesh",
            ConnectionType::Adsl => "adsl",
            ConnectionType::Tun => "tun",
            ConnectionType::IpTunnel => "ip-tunnel",
            ConnectionType::Macvlan => "macvlan",
            ConnectionType::Vxlan => "vxlan",
            ConnectionType::Dummy => "dummy",
        }
    }
}

/// Options for listing profiles
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Only active profiles
    pub active: bool,
    /// Sort order, e.g. `+active:-name`
    pub order: Option<String>,
}

/// Options for `connection up`
#[derive(Debug, Clone, Default)]
pub struct UpOptions {
    /// Device to activate on
    pub ifname: Option<String>,
    /// BSSID of the access point (Wi-Fi)
    pub ap: Option<String>,
    /// File with `setting.property:secret` lines
    pub passwd_file: Option<String>,
    /// Seconds to wait for activation
    pub wait: Option<u32>,
}

/// Options for `connection add`
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub conn_type: Option<ConnectionType>,
    pub con_name: Option<String>,
    pub ifname: Option<String>,
    pub autoconnect: Option<bool>,
    /// Persist to disk (nmcli default: yes)
    pub save: Option<bool>,
    pub properties: Vec<Property>,
}

/// `nmcli connection` facade
pub struct ConnectionCommands<'a, R> {
    client: &'a Nmcli<R>,
}

impl<'a, R: CommandRunner> ConnectionCommands<'a, R> {
    pub(crate) fn new(client: &'a Nmcli<R>) -> Self {
        Self { client }
    }

    fn builder(subcommand: &str) -> CommandBuilder {
        CommandBuilder::new(Subsystem::Connection, subcommand)
    }

    /// List profiles (tabular)
    pub fn show(&self, options: &ShowOptions) -> NmcliResult<CommandResult> {
        let mut builder = Self::builder("show").flag_if(options.active, "--active");
        if let Some(order) = &options.order {
            validation::validate_argument("Sort order", order)?;
            builder = builder.option("--order", order.as_str());
        }
        self.client.execute(builder.build())
    }

    /// Details of one profile, keyed by its `connection.id`
    pub fn show_details(&self, id: &ConnectionId, active: bool) -> NmcliResult<CommandResult> {
        id.validate("show", true)?;
        let builder = Self::builder("show")
            .flag_if(active, "--active")
            .mode(OutputMode::multiline(CONNECTION_SENTINEL));
        self.client.execute(id.append_to(builder).build())
    }

    /// Activate a profile
    pub fn up(&self, id: &ConnectionId, options: &UpOptions) -> NmcliResult<CommandResult> {
        id.validate("up", false)?;
        if let Some(ifname) = &options.ifname {
            validation::validate_device_name(ifname)?;
        }
        if let Some(ap) = &options.ap {
            validation::validate_mac_address(ap)?;
        }
        if let Some(file) = &options.passwd_file {
            validation::validate_argument("Password file", file)?;
        }

        let builder = id
            .append_to(Self::builder("up"))
            .option_opt("ifname", options.ifname.as_deref().map(ArgValue::literal))
            .option_opt("ap", options.ap.as_deref().map(ArgValue::literal))
            .option_opt("passwd-file", options.passwd_file.as_deref().map(ArgValue::literal))
            .wait(options.wait);
        self.client.execute(builder.build())
    }

    /// Deactivate one or more active connections
    pub fn down(&self, ids: &[ConnectionId]) -> NmcliResult<CommandResult> {
        let builder = Self::with_ids(Self::builder("down"), "down", ids, true)?;
        self.client.execute(builder.build())
    }

    /// Change properties of a profile
    pub fn modify(
        &self,
        id: &ConnectionId,
        temporary: bool,
        properties: &[Property],
    ) -> NmcliResult<CommandResult> {
        id.validate("modify", false)?;
        if properties.is_empty() {
            return Err(NmcliError::InvalidParameter(
                "connection modify needs at least one property".to_string(),
            ));
        }

        let mut builder = id.append_to(Self::builder("modify").flag_if(temporary, "--temporary"));
        for property in properties {
            property.validate()?;
            builder = property.append_to(builder);
        }
        self.client.execute(builder.build())
    }

    /// Create a profile
    pub fn add(&self, options: &AddOptions) -> NmcliResult<CommandResult> {
        if options.conn_type.is_none() && options.properties.is_empty() {
            return Err(NmcliError::InvalidParameter(
                "connection add needs a type or properties".to_string(),
            ));
        }
        if let Some(name) = &options.con_name {
            validation::validate_argument("Connection name", name)?;
        }
        if let Some(ifname) = &options.ifname {
            validation::validate_interface_name(ifname)?;
        }

        let mut builder = Self::builder("add")
            .option_opt("save", options.save.map(ArgValue::yes_no))
            .option_opt("type", options.conn_type.map(|t| t.keyword()))
            .option_opt("con-name", options.con_name.as_deref().map(ArgValue::literal))
            .option_opt("ifname", options.ifname.as_deref().map(ArgValue::literal))
            .option_opt("autoconnect", options.autoconnect.map(ArgValue::yes_no));
        for property in &options.properties {
            property.validate()?;
            builder = property.append_to(builder);
        }
        self.client.execute(builder.build())
    }

    /// Copy a profile under a new name
    pub fn clone(
        &self,
        id: &ConnectionId,
        new_name: &str,
        temporary: bool,
    ) -> NmcliResult<CommandResult> {
        id.validate("clone", false)?;
        validation::validate_argument("New connection name", new_name)?;

        let builder = id
            .append_to(Self::builder("clone").flag_if(temporary, "--temporary"))
            .positional(ArgValue::literal(new_name));
        self.client.execute(builder.build())
    }

    /// Delete one or more profiles
    pub fn delete(&self, ids: &[ConnectionId]) -> NmcliResult<CommandResult> {
        let builder = Self::with_ids(Self::builder("delete"), "delete", ids, false)?;
        self.client.execute(builder.build())
    }

    /// Watch profiles until they all disappear; all profiles when `ids` is empty.
    ///
    /// Blocks until nmcli exits.
    pub fn monitor(&self, ids: &[ConnectionId]) -> NmcliResult<CommandResult> {
        let mut builder = Self::builder("monitor");
        for id in ids {
            id.validate("monitor", false)?;
            builder = id.append_to(builder);
        }
        self.client.execute(builder.build())
    }

    /// Re-read all profiles from disk
    pub fn reload(&self) -> NmcliResult<CommandResult> {
        self.client.execute(Self::builder("reload").build())
    }

    /// Load or reload specific profile files
    pub fn load(&self, files: &[&str]) -> NmcliResult<CommandResult> {
        if files.is_empty() {
            return Err(NmcliError::InvalidParameter(
                "connection load needs at least one file".to_string(),
            ));
        }
        for file in files {
            validation::validate_argument("File name", file)?;
        }
        let builder = Self::builder("load").positionals(files.iter().map(|f| ArgValue::literal(*f)));
        self.client.execute(builder.build())
    }

    /// Import a VPN configuration through its NetworkManager plugin
    pub fn import(&self, vpn_type: &str, file: &str, temporary: bool) -> NmcliResult<CommandResult> {
        validation::validate_argument("VPN type", vpn_type)?;
        validation::validate_argument("File name", file)?;

        let builder = Self::builder("import")
            .flag_if(temporary, "--temporary")
            .option("type", vpn_type)
            .option("file", ArgValue::literal(file));
        self.client.execute(builder.build())
    }

    /// Export a VPN profile; printed to stdout when `file` is `None`
    pub fn export(&self, id: &ConnectionId, file: Option<&str>) -> NmcliResult<CommandResult> {
        id.validate("export", false)?;
        let mut builder = id.append_to(Self::builder("export"));
        if let Some(file) = file {
            validation::validate_argument("File name", file)?;
            builder = builder.positional(ArgValue::literal(file));
        }
        self.client.execute(builder.build())
    }

    fn with_ids(
        mut builder: CommandBuilder,
        subcommand: &str,
        ids: &[ConnectionId],
        allow_active_path: bool,
    ) -> NmcliResult<CommandBuilder> {
        if ids.is_empty() {
            return Err(NmcliError::InvalidParameter(format!(
                "connection {} needs at least one connection",
                subcommand
            )));
        }
        for id in ids {
            id.validate(subcommand, allow_active_path)?;
            builder = id.append_to(builder);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_keywords() {
        assert_eq!(ConnectionId::name("Home").keyword(), Some("id"));
        assert_eq!(ConnectionId::uuid("x").keyword(), Some("uuid"));
        assert_eq!(ConnectionId::path("3").keyword(), Some("path"));
        assert_eq!(ConnectionId::active_path("4").keyword(), Some("apath"));
        assert_eq!(ConnectionId::bare("Home").keyword(), None);
    }

    #[test]
    fn test_selector_rendering_keeps_case() {
        let inv = ConnectionId::name("My Home WiFi")
            .append_to(CommandBuilder::new(Subsystem::Connection, "up"))
            .build();
        assert_eq!(inv.tokens(), vec!["up", "id", "My Home WiFi"]);

        let inv = ConnectionId::bare("Office")
            .append_to(CommandBuilder::new(Subsystem::Connection, "down"))
            .build();
        assert_eq!(inv.tokens(), vec!["down", "Office"]);
    }

    #[test]
    fn test_selector_validation() {
        assert!(ConnectionId::active_path("7").validate("up", false).is_err());
        assert!(ConnectionId::active_path("7").validate("down", true).is_ok());
        assert!(ConnectionId::uuid("nope").validate("up", false).is_err());
        assert!(ConnectionId::name("").validate("up", false).is_err());
    }

    #[test]
    fn test_property_validation() {
        assert!(Property::new("ipv4.dns", "").validate().is_ok());
        assert!(Property::new("", "x").validate().is_err());
        assert!(Property::new("ipv4.dns", "1.1.1.1\n8.8.8.8").validate().is_err());
    }

    #[test]
    fn test_connection_type_keywords() {
        assert_eq!(ConnectionType::BondSlave.keyword(), "bond-slave");
        assert_eq!(ConnectionType::IpTunnel.keyword(), "ip-tunnel");
        assert_eq!(ConnectionType::OlpcMesh.keyword(), "olpc-mesh");
    }
}
