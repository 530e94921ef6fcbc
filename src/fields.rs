//! Built-in `--fields` sets for tabular commands
//!
//! Keys are the subsystem keyword (its default listing command) or
//! `"subsystem subcommand"`. Lookups are exact.

const GENERAL_STATUS: &[&str] = &[
    "RUNNING",
    "STATE",
    "CONNECTIVITY",
    "NETWORKING",
    "WIFI-HW",
    "WIFI",
    "WWAN-HW",
    "WWAN",
];

const GENERAL_PERMISSIONS: &[&str] = &["PERMISSION", "VALUE"];

const GENERAL_LOGGING: &[&str] = &["LEVEL", "DOMAINS"];

const RADIO_ALL: &[&str] = &["WIFI-HW", "WIFI", "WWAN-HW", "WWAN"];

const CONNECTION_SHOW: &[&str] = &["NAME", "UUID", "TYPE", "TIMESTAMP-REAL", "DEVICE"];

const DEVICE_STATUS: &[&str] = &["DEVICE", "TYPE", "STATE", "CONNECTION"];

const DEVICE_WIFI_LIST: &[&str] = &[
    "SSID",
    "BSSID",
    "MODE",
    "FREQ",
    "RATE",
    "SIGNAL",
    "SECURITY",
    "WPA-FLAGS",
    "RSN-FLAGS",
    "DEVICE",
    "ACTIVE",
    "DBUS-PATH",
];

/// Field set registered for `key`, if any
pub fn field_set(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "general" | "general status" => Some(GENERAL_STATUS),
        "general permissions" => Some(GENERAL_PERMISSIONS),
        "general logging" => Some(GENERAL_LOGGING),
        "radio" | "radio all" => Some(RADIO_ALL),
        "connection" | "connection show" => Some(CONNECTION_SHOW),
        "device" | "device status" => Some(DEVICE_STATUS),
        "device wifi" | "device wifi list" => Some(DEVICE_WIFI_LIST),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsystem_and_subcommand_keys_agree() {
        assert_eq!(field_set("device"), field_set("device status"));
        assert_eq!(field_set("connection"), field_set("connection show"));
        assert_eq!(field_set("device wifi"), field_set("device wifi list"));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(field_set("general permissions"), Some(&["PERMISSION", "VALUE"][..]));
        assert!(field_set("device connect").is_none());
        assert!(field_set("Device").is_none());
        assert!(field_set("general hostname").is_none());
    }

    #[test]
    fn test_wifi_list_columns() {
        let fields = field_set("device wifi list").unwrap();
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[0], "SSID");
        assert_eq!(fields[1], "BSSID");
    }
}
