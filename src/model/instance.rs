use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::ModelError;

const SYSTEM_ADAPTER_PREFIX: &str = "system.adapter.";

/// Identifies one running adapter instance, e.g. `zigbee.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceId {
    adapter: String,
    instance: u32,
}

impl InstanceId {
    pub fn new(adapter: impl Into<String>, instance: u32) -> Result<Self, ModelError> {
        let adapter = adapter.into();
        if adapter.is_empty() || adapter.contains('.') {
            return Err(ModelError::InvalidInstanceId(format!("{}.{}", adapter, instance)));
        }
        Ok(Self { adapter, instance })
    }

    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }

    /// The object id of the instance: `system.adapter.<adapter>.<instance>`.
    pub fn object_id(&self) -> String {
        format!("{}{}", SYSTEM_ADAPTER_PREFIX, self)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.adapter, self.instance)
    }
}

impl FromStr for InstanceId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let short = s.strip_prefix(SYSTEM_ADAPTER_PREFIX).unwrap_or(s);
        let Some((adapter, instance)) = short.split_once('.') else {
            return Err(ModelError::InvalidInstanceId(s.to_owned()));
        };
        let instance = instance
            .parse::<u32>()
            .map_err(|_| ModelError::InvalidInstanceId(s.to_owned()))?;
        Self::new(adapter, instance).map_err(|_| ModelError::InvalidInstanceId(s.to_owned()))
    }
}

impl TryFrom<String> for InstanceId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InstanceId> for String {
    fn from(value: InstanceId) -> Self {
        value.to_string()
    }
}
