use schemars::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema plus current values describing the extended configuration of a device.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl DeviceDetails {
    pub fn new(schema: Schema, data: Map<String, Value>) -> Self {
        Self {
            id: None,
            schema: Some(schema),
            data,
        }
    }
}
