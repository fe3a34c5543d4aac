use serde_json::{Map, Value};

use crate::{
    changed_keys, CardConfig, CardError, DeviceDetails, HostConnection, HostError, InstanceId,
    JsonConfig,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Unresolved,
    Ready(DeviceDetails),
    /// The host answered without details.
    Unavailable,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    Collapsed,
    Loading,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    generation: u64,
    device_id: String,
    instance: InstanceId,
    command: String,
}

impl DetailRequest {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub async fn fetch<C: HostConnection>(self, conn: &C) -> DetailResponse {
        log::debug!(
            "Loading device details for {}... from {}",
            self.device_id,
            self.instance
        );
        let result = conn
            .send_to(
                &self.instance,
                &self.command,
                Value::String(self.device_id.clone()),
            )
            .await;
        DetailResponse {
            generation: self.generation,
            device_id: self.device_id,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailResponse {
    generation: u64,
    device_id: String,
    result: Result<Value, HostError>,
}

impl DetailResponse {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

/// Loads the details of one device on demand and keeps the edited copy of its data.
#[derive(Debug)]
pub struct DetailLoader {
    device_id: String,
    open: bool,
    state: DetailState,
    data: Map<String, Value>,
    form_error: Option<String>,
    generation: u64,
    pending: bool,
}

impl DetailLoader {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            open: false,
            state: DetailState::Unresolved,
            data: Map::new(),
            form_error: None,
            generation: 0,
            pending: false,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn phase(&self) -> DetailPhase {
        match (self.open, &self.state) {
            (false, _) => DetailPhase::Collapsed,
            (true, DetailState::Ready(_)) => DetailPhase::Open,
            (true, _) => DetailPhase::Loading,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    pub fn details(&self) -> Option<&DeviceDetails> {
        match &self.state {
            DetailState::Ready(details) => Some(details),
            _ => None,
        }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Request the details. The current state stays until the response is applied.
    pub fn load(&mut self, config: &CardConfig) -> DetailRequest {
        self.generation += 1;
        self.pending = true;
        DetailRequest {
            generation: self.generation,
            device_id: self.device_id.clone(),
            instance: config.instance.clone(),
            command: config.details_command.clone(),
        }
    }

    pub fn invalidate(&mut self) {
        self.state = DetailState::Unresolved;
        self.data.clear();
        self.form_error = None;
    }

    pub fn refresh(&mut self, config: &CardConfig) -> DetailRequest {
        self.invalidate();
        self.load(config)
    }

    /// Open the details view. Does nothing while it is already open.
    pub fn open(&mut self, config: &CardConfig) -> Option<DetailRequest> {
        if self.open {
            return None;
        }
        self.open = true;
        Some(self.refresh(config))
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Point the loader at another device or instance. Requests still in flight are dropped.
    pub fn reset(&mut self, device_id: impl Into<String>) {
        self.device_id = device_id.into();
        self.invalidate();
        self.close();
        self.pending = false;
        // keeps counting so no earlier generation can match again
        self.generation += 1;
    }

    /// Apply a finished request. `Ok(false)` means a newer request superseded it.
    pub fn apply(&mut self, response: DetailResponse) -> Result<bool, CardError> {
        if response.device_id != self.device_id {
            log::debug!(
                "[{}] dropping details meant for {}",
                self.device_id,
                response.device_id
            );
            return Ok(false);
        }
        if response.generation != self.generation {
            log::debug!(
                "[{}] dropping outdated details (generation {}, current {})",
                response.device_id,
                response.generation,
                self.generation
            );
            return Ok(false);
        }
        self.pending = false;

        let value = match response.result {
            Ok(value) => value,
            Err(err) => {
                log::error!("[{}] loading device details failed: {}", response.device_id, err);
                self.fail(err.to_string());
                return Err(err.into());
            }
        };

        if value.is_null() {
            log::debug!("[{}] host has no details for this device", response.device_id);
            self.invalidate();
            self.state = DetailState::Unavailable;
            self.open = false;
            return Ok(true);
        }

        match serde_json::from_value::<DeviceDetails>(value) {
            Ok(details) => {
                log::debug!("Got device details for {}", response.device_id);
                self.data = details.data.clone();
                self.form_error = None;
                self.state = DetailState::Ready(details);
                Ok(true)
            }
            Err(err) => {
                log::error!("[{}] malformed device details: {}", response.device_id, err);
                self.fail(err.to_string());
                Err(CardError::MalformedDetails {
                    device: response.device_id,
                    source: err,
                })
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.invalidate();
        self.state = DetailState::Failed(message);
        self.open = false;
    }

    /// Replace the edited data. Ignored while no details are loaded.
    pub fn update_data(&mut self, data: Map<String, Value>) -> bool {
        if self.details().is_none() {
            return false;
        }
        self.data = data;
        true
    }

    pub fn report_form_error(&mut self, error: Option<String>) {
        self.form_error = error.filter(|e| !e.is_empty());
    }

    pub fn changed_keys(&self) -> Vec<String> {
        self.details()
            .map(|details| changed_keys(&details.data, &self.data))
            .unwrap_or_default()
    }

    pub fn is_dirty(&self) -> bool {
        !self.changed_keys().is_empty()
    }

    /// The details dialog, only while open with loaded details.
    pub fn json_config<'a>(&'a self, instance: &'a InstanceId) -> Option<JsonConfig<'a>> {
        if !self.open {
            return None;
        }
        let details = self.details()?;
        JsonConfig::new(
            instance,
            details.schema.as_ref(),
            &self.data,
            self.form_error.as_deref(),
        )
    }
}
