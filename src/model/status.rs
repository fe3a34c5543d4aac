use serde::{Deserialize, Deserializer, Serialize};

use super::Translatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatteryStatus {
    /// Charge level in percent.
    Percent(f64),
    /// `true` flags a low battery.
    Low(bool),
    /// Free text such as `charging`.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusWarning {
    Flag(bool),
    Message(Translatable),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<StatusWarning>,
}

/// One status entry of a device: either the connection shorthand or a detailed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceStatus {
    Connection(ConnectionState),
    Details(StatusDetails),
}

impl DeviceStatus {
    pub fn connection(&self) -> Option<ConnectionState> {
        match self {
            Self::Connection(state) => Some(*state),
            Self::Details(details) => details.connection,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<DeviceStatus>),
    One(DeviceStatus),
}

/// Hosts send either a single status or a list; both end up as a list.
pub(crate) fn deserialize_status_list<'de, D>(deserializer: D) -> Result<Vec<DeviceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(list)) => list,
        Some(OneOrMany::One(status)) => vec![status],
        None => Vec::new(),
    })
}
