use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{resolve_text, Translatable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Button,
    Switch,
    Slider,
    Select,
    Icon,
    Color,
    Text,
    Number,
    Info,
    #[serde(other)]
    Unknown,
}

/// Value carried by a control state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Number(f64),
    String(String),
    #[default]
    Null,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlState {
    #[serde(default)]
    pub val: StateValue,
    #[serde(default)]
    pub ack: bool,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ts: Option<DateTime<Utc>>,
}

impl ControlState {
    /// A command state (not yet acknowledged by the device).
    pub fn command(val: StateValue) -> Self {
        Self {
            val,
            ack: false,
            ts: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: StateValue,
    pub label: Translatable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ControlKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Translatable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ControlState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl Control {
    pub fn new(id: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: None,
            description: None,
            icon: None,
            state: None,
            unit: None,
            min: None,
            max: None,
            step: None,
            options: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<Translatable>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn has_label(&self) -> bool {
        self.label.as_ref().is_some_and(|label| !label.is_empty())
    }

    pub fn label(&self, language: &str) -> Option<&str> {
        resolve_text(self.label.as_ref(), language)
    }

    /// Simple controls (an unlabeled icon or switch) fit into the card header.
    pub fn is_simple(&self) -> bool {
        matches!(self.kind, ControlKind::Icon | ControlKind::Switch) && !self.has_label()
    }
}
