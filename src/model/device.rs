use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::deserialize_status_list;
use super::{
    resolve_text, Action, Control, ControlKind, DeviceStatus, Translatable, DEFAULT_LANGUAGE,
};
use crate::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Translatable>,
    /// Image reference; empty means the icon still has to be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Translatable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Translatable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_status_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub status: Vec<DeviceStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub has_details: bool,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            icon: None,
            manufacturer: None,
            model: None,
            color: None,
            status: Vec::new(),
            controls: Vec::new(),
            actions: Vec::new(),
            has_details: false,
        }
    }

    /// Parse a host payload and validate it.
    pub fn from_json(value: Value) -> Result<Self, ModelError> {
        let device: Device = serde_json::from_value(value)?;
        device.validate()?;
        Ok(device)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.is_empty() {
            return Err(ModelError::EmptyId { kind: "device", device: String::new() });
        }
        for control in &self.controls {
            if control.id.is_empty() {
                return Err(ModelError::EmptyId { kind: "control", device: self.id.clone() });
            }
            if matches!(control.kind, ControlKind::Slider | ControlKind::Number) {
                if let (Some(min), Some(max)) = (control.min, control.max) {
                    if min > max {
                        return Err(ModelError::InvalidRange {
                            device: self.id.clone(),
                            control: control.id.clone(),
                            min,
                            max,
                        });
                    }
                }
            }
        }
        if self.actions.iter().any(|action| action.id.is_empty()) {
            return Err(ModelError::EmptyId { kind: "action", device: self.id.clone() });
        }
        Ok(())
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|icon| !icon.is_empty())
    }

    pub fn name(&self, language: &str) -> Option<&str> {
        resolve_text(self.name.as_ref(), language)
    }

    pub fn manufacturer(&self, language: &str) -> Option<&str> {
        resolve_text(self.manufacturer.as_ref(), language)
    }

    pub fn model(&self, language: &str) -> Option<&str> {
        resolve_text(self.model.as_ref(), language)
    }

    /// File name the device image is stored under: `<manufacturer>_<model or id>.<extension>`.
    pub fn icon_file_name(&self, extension: &str) -> String {
        let manufacturer = self.manufacturer(DEFAULT_LANGUAGE);
        let model = self.model(DEFAULT_LANGUAGE).unwrap_or(&self.id);
        match manufacturer {
            Some(manufacturer) => format!("{}_{}.{}", manufacturer, model, extension),
            None => format!("{}.{}", model, extension),
        }
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.id == id)
    }

    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.id == id)
    }
}
