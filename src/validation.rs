//! Input validation
//!
//! Facades check arguments here before building an invocation, so bad
//! input fails fast without spawning nmcli.

use crate::error::{NmcliError, NmcliResult};
use std::net::IpAddr;
use uuid::Uuid;

/// Maximum length for interface names (Linux kernel limit is 15)
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Maximum length for a single argument value
const MAX_ARGUMENT_LEN: usize = 4096;

/// Wi-Fi band as nmcli spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiBand {
    /// 5 GHz
    A,
    /// 2.4 GHz
    Bg,
}

impl WifiBand {
    pub fn keyword(&self) -> &'static str {
        match self {
            WifiBand::A => "a",
            WifiBand::Bg => "bg",
        }
    }
}

/// Validate interface name
///
/// Alphanumeric with dashes, underscores and dots (VLAN names such as
/// `eth0.100`), at most 15 characters.
pub fn validate_interface_name(name: &str) -> NmcliResult<()> {
    if name.is_empty() {
        return Err(NmcliError::InvalidParameter(
            "Interface name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(NmcliError::InvalidParameter(
            format!("Interface name too long (max {} characters)", MAX_INTERFACE_NAME_LEN)
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
            return Err(NmcliError::InvalidParameter(
                format!("Invalid interface name '{}': contains invalid character '{}'", name, c)
            ));
        }
    }

    // would be read as an nmcli option
    if name.starts_with('-') {
        return Err(NmcliError::InvalidParameter(
            "Interface name cannot start with dash".to_string()
        ));
    }

    Ok(())
}

/// Validate a NetworkManager device name
///
/// Looser than [`validate_interface_name`]: NetworkManager also names
/// devices that have no kernel interface, such as `p2p-dev-wlp0s20f3`
/// (past the 15 character limit) or Bluetooth BD addresses with colons.
pub fn validate_device_name(name: &str) -> NmcliResult<()> {
    if name.is_empty() {
        return Err(NmcliError::InvalidParameter(
            "Device name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_ARGUMENT_LEN {
        return Err(NmcliError::InvalidParameter(
            format!("Device name too long (max {} characters)", MAX_ARGUMENT_LEN)
        ));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(NmcliError::InvalidParameter(
            format!("Invalid device name '{}': contains control characters", name.escape_debug())
        ));
    }

    // would be read as an nmcli option
    if name.starts_with('-') {
        return Err(NmcliError::InvalidParameter(
            "Device name cannot start with dash".to_string()
        ));
    }

    Ok(())
}

/// Validate MAC address format (BSSIDs)
///
/// Accepts standard MAC format: XX:XX:XX:XX:XX:XX (hex digits)
pub fn validate_mac_address(mac: &str) -> NmcliResult<()> {
    if mac.len() != 17 {
        return Err(NmcliError::InvalidParameter(
            "MAC address must be in format XX:XX:XX:XX:XX:XX".to_string()
        ));
    }

    let parts: Vec<&str> = mac.split(':').collect();
    if parts.len() != 6 {
        return Err(NmcliError::InvalidParameter(
            "MAC address must have 6 octets separated by colons".to_string()
        ));
    }

    for part in parts {
        if part.len() != 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(NmcliError::InvalidParameter(
                format!("Invalid hex digit in MAC address: {}", part)
            ));
        }
    }

    Ok(())
}

/// Validate WiFi SSID (1-32 bytes, no control characters)
pub fn validate_ssid(ssid: &str) -> NmcliResult<()> {
    if ssid.is_empty() {
        return Err(NmcliError::InvalidParameter(
            "SSID cannot be empty".to_string()
        ));
    }

    if ssid.len() > 32 {
        return Err(NmcliError::InvalidParameter(
            "SSID cannot exceed 32 characters".to_string()
        ));
    }

    if ssid.chars().any(|c| c.is_control()) {
        return Err(NmcliError::InvalidParameter(
            "SSID contains invalid control characters".to_string()
        ));
    }

    Ok(())
}

/// Validate WPA pre-shared key: 8-63 printable ASCII characters
pub fn validate_wifi_password(password: &str) -> NmcliResult<()> {
    if password.len() < 8 {
        return Err(NmcliError::InvalidParameter(
            "WiFi password must be at least 8 characters".to_string()
        ));
    }

    if password.len() > 63 {
        return Err(NmcliError::InvalidParameter(
            "WiFi password cannot exceed 63 characters".to_string()
        ));
    }

    if !password.is_ascii() {
        return Err(NmcliError::InvalidParameter(
            "WiFi password must contain only ASCII characters".to_string()
        ));
    }

    if password.chars().any(|c| c.is_control()) {
        return Err(NmcliError::InvalidParameter(
            "WiFi password contains invalid control characters".to_string()
        ));
    }

    Ok(())
}

/// Validate a hotspot channel against its band
pub fn validate_wifi_channel(channel: u32, band: WifiBand) -> NmcliResult<()> {
    let valid_channels: &[u32] = match band {
        WifiBand::Bg => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
        WifiBand::A => &[36, 40, 44, 48, 52, 56, 60, 64, 100, 104, 108, 112,
                         116, 120, 124, 128, 132, 136, 140, 144, 149, 153, 157, 161, 165],
    };

    if !valid_channels.contains(&channel) {
        return Err(NmcliError::InvalidParameter(
            format!("Invalid channel {} for band {}", channel, band.keyword())
        ));
    }

    Ok(())
}

/// Validate hostname for `general hostname`
pub fn validate_hostname(host: &str) -> NmcliResult<()> {
    if host.is_empty() {
        return Err(NmcliError::InvalidParameter(
            "Hostname cannot be empty".to_string()
        ));
    }

    if host.len() > 253 {
        return Err(NmcliError::InvalidParameter(
            "Hostname too long".to_string()
        ));
    }

    if host.parse::<IpAddr>().is_ok() {
        return Err(NmcliError::InvalidParameter(
            "Hostname cannot be an IP address".to_string()
        ));
    }

    for c in host.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '.' {
            return Err(NmcliError::InvalidParameter(
                format!("Invalid hostname character: {}", c)
            ));
        }
    }

    if host.starts_with('-') || host.starts_with('.') ||
       host.ends_with('-') || host.ends_with('.') {
        return Err(NmcliError::InvalidParameter(
            "Invalid hostname format".to_string()
        ));
    }

    Ok(())
}

/// Validate a connection UUID
pub fn validate_uuid(uuid: &str) -> NmcliResult<()> {
    Uuid::parse_str(uuid)
        .map(|_| ())
        .map_err(|e| NmcliError::InvalidParameter(format!("Invalid connection UUID '{}': {}", uuid, e)))
}

/// Validate a free-form argument (connection names, paths, property values)
pub fn validate_argument(what: &str, value: &str) -> NmcliResult<()> {
    if value.is_empty() {
        return Err(NmcliError::InvalidParameter(
            format!("{} cannot be empty", what)
        ));
    }

    if value.len() > MAX_ARGUMENT_LEN {
        return Err(NmcliError::InvalidParameter(
            format!("{} too long (max {} characters)", what, MAX_ARGUMENT_LEN)
        ));
    }

    if value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(NmcliError::InvalidParameter(
            format!("{} contains invalid control characters", what)
        ));
    }

    Ok(())
}
