use serde::{Deserialize, Serialize};

use super::{resolve_text, Translatable};

/// Icon descriptor of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionIcon {
    /// Embedded or remote image (`data:`, `http:` or `https:` URL).
    Image(String),
    /// Name of an icon known to the icon renderer.
    Named(String),
}

impl ActionIcon {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Image(src) | Self::Named(src) => src,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for ActionIcon {
    fn from(value: String) -> Self {
        if value.starts_with("data:") || value.starts_with("http://") || value.starts_with("https://")
        {
            Self::Image(value)
        } else {
            Self::Named(value)
        }
    }
}

impl From<&str> for ActionIcon {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ActionIcon> for String {
    fn from(value: ActionIcon) -> Self {
        match value {
            ActionIcon::Image(src) | ActionIcon::Named(src) => src,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Translatable>,
    /// Translation key of the tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ActionIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Action {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            description: None,
            icon: None,
            color: None,
            disabled: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<Translatable>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<ActionIcon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label(&self, language: &str) -> Option<&str> {
        resolve_text(self.label.as_ref(), language)
    }
}
