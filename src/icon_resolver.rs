use crate::{CardConfig, Device, FileContent, HostConnection, HostError, InstanceId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconState {
    #[default]
    Unresolved,
    Fetching,
    /// Embeddable image reference (URL or data URL).
    Resolved(String),
    /// The lookup failed, the card shows the "no image" placeholder.
    Absent,
}

impl IconState {
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Resolved(src) => Some(src),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Absent)
    }
}

/// Pending lookup of a device image in the file storage of its instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    generation: u64,
    device_id: String,
    scope: String,
    file_name: String,
}

impl IconRequest {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn fetch<C: HostConnection>(self, conn: &C) -> IconResponse {
        log::debug!(
            "[{}] loading icon {} from {}",
            self.device_id,
            self.file_name,
            self.scope
        );
        let result = conn.read_file(&self.scope, &self.file_name, true).await;
        IconResponse {
            generation: self.generation,
            device_id: self.device_id,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconResponse {
    generation: u64,
    device_id: String,
    result: Result<FileContent, HostError>,
}

impl IconResponse {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MountKey {
    device_id: String,
    instance: InstanceId,
}

/// Resolves the icon of one card. Every mount of a new (device, instance)
/// pair starts a new generation; responses of older generations are dropped.
#[derive(Debug, Default)]
pub struct IconResolver {
    state: IconState,
    mounted: Option<MountKey>,
    generation: u64,
}

impl IconResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &IconState {
        &self.state
    }

    /// Mount the resolver for `device`. Returns the lookup to run, if any.
    pub fn mount(&mut self, device: &Device, config: &CardConfig) -> Option<IconRequest> {
        let key = MountKey {
            device_id: device.id.clone(),
            instance: config.instance.clone(),
        };

        if self.mounted.as_ref() == Some(&key) {
            // same mount, only adopt an icon the host supplies now
            if let Some(icon) = device.icon() {
                if self.state.image() != Some(icon) {
                    self.generation += 1;
                    self.state = IconState::Resolved(icon.to_owned());
                }
            }
            return None;
        }

        self.mounted = Some(key);
        self.generation += 1;

        if let Some(icon) = device.icon() {
            self.state = IconState::Resolved(icon.to_owned());
            return None;
        }

        self.state = IconState::Fetching;
        Some(IconRequest {
            generation: self.generation,
            device_id: device.id.clone(),
            scope: config.file_scope(),
            file_name: device.icon_file_name(&config.icon_file_extension),
        })
    }

    /// Forget the current mount. A lookup still running is dropped and the next
    /// mount starts over, even for the same device and instance.
    pub fn unmount(&mut self) {
        self.mounted = None;
        self.generation += 1;
        if self.state == IconState::Fetching {
            self.state = IconState::Unresolved;
        }
    }

    /// Apply a finished lookup. Returns false when the response was superseded.
    pub fn apply(&mut self, response: IconResponse) -> bool {
        if response.generation != self.generation || self.state != IconState::Fetching {
            log::debug!(
                "[{}] dropping outdated icon response (generation {}, current {})",
                response.device_id,
                response.generation,
                self.generation
            );
            return false;
        }
        self.state = match response.result {
            Ok(file) => IconState::Resolved(data_url(&file)),
            Err(err) => {
                log::debug!("[{}] no icon available: {}", response.device_id, err);
                IconState::Absent
            }
        };
        true
    }

    /// Replace the icon with an uploaded image. Empty uploads are ignored.
    pub fn apply_upload(&mut self, image: &str) -> bool {
        if image.is_empty() {
            return false;
        }
        self.generation += 1;
        self.state = IconState::Resolved(image.to_owned());
        true
    }
}

/// Build a data URL from a base64 encoded file.
pub fn data_url(file: &FileContent) -> String {
    if file.data.starts_with("data:") {
        return file.data.clone();
    }
    if file.mime_type.contains('/') {
        format!("data:{};base64,{}", file.mime_type, file.data)
    } else {
        format!("data:image/{};base64,{}", file.mime_type, file.data)
    }
}
