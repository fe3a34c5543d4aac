use serde::Deserialize;

use crate::InstanceId;

pub const DETAILS_COMMAND: &str = "dm:deviceDetails";
pub const ICON_FILE_EXTENSION: &str = "webp";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    /// Instance that owns the device.
    pub instance: InstanceId,
    #[serde(default)]
    pub title: Option<String>,
    /// Instance device images get uploaded to, uploads are disabled when unset.
    #[serde(default)]
    pub upload_images_to_instance: Option<String>,
    #[serde(default = "default_icon_file_extension")]
    pub icon_file_extension: String,
    #[serde(default = "default_details_command")]
    pub details_command: String,
}

fn default_icon_file_extension() -> String {
    ICON_FILE_EXTENSION.to_owned()
}

fn default_details_command() -> String {
    DETAILS_COMMAND.to_owned()
}

impl CardConfig {
    /// Create a new instance with required fields and default optional fields
    pub fn new(instance: InstanceId) -> Self {
        Self {
            instance,
            title: None,
            upload_images_to_instance: None,
            icon_file_extension: default_icon_file_extension(),
            details_command: default_details_command(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn upload_images_to_instance(mut self, instance: impl Into<String>) -> Self {
        let instance = instance.into();
        if instance.is_empty() {
            log::warn!("Empty upload instance given, image uploads stay disabled");
            self.upload_images_to_instance = None;
        } else {
            self.upload_images_to_instance = Some(instance);
        }
        self
    }

    pub fn icon_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.icon_file_extension = extension.into();
        self
    }

    pub fn details_command(mut self, command: impl Into<String>) -> Self {
        self.details_command = command.into();
        self
    }

    /// File storage scope of the owning instance (`<adapter>.<instance>`).
    pub fn file_scope(&self) -> String {
        self.instance.to_string()
    }
}
