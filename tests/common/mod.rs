#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use hc_dm_cards::*;
use serde_json::{json, Value};

/// In-memory host: files by `<scope>/<file>`, details answered in queue order.
#[derive(Default)]
pub struct FakeConnection {
    pub files: HashMap<String, FileContent>,
    pub details: Mutex<VecDeque<Result<Value, HostError>>>,
    pub file_reads: AtomicUsize,
    pub requests: Mutex<Vec<(String, String, Value)>>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, scope: &str, file: &str, mime_type: &str, data: &str) -> Self {
        self.files.insert(
            format!("{}/{}", scope, file),
            FileContent {
                mime_type: mime_type.to_owned(),
                data: data.to_owned(),
            },
        );
        self
    }

    pub fn with_details(self, details: Result<Value, HostError>) -> Self {
        self.details.lock().unwrap().push_back(details);
        self
    }

    pub fn file_reads(&self) -> usize {
        self.file_reads.load(Ordering::SeqCst)
    }

    pub fn detail_requests(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HostConnection for FakeConnection {
    fn read_file(
        &self,
        scope: &str,
        file_name: &str,
        _base64: bool,
    ) -> impl Future<Output = Result<FileContent, HostError>> + Send {
        self.file_reads.fetch_add(1, Ordering::SeqCst);
        let result = self
            .files
            .get(&format!("{}/{}", scope, file_name))
            .cloned()
            .ok_or_else(|| HostError::FileNotFound {
                scope: scope.to_owned(),
                file: file_name.to_owned(),
            });
        async move { result }
    }

    fn send_to(
        &self,
        instance: &InstanceId,
        command: &str,
        message: Value,
    ) -> impl Future<Output = Result<Value, HostError>> + Send {
        self.requests
            .lock()
            .unwrap()
            .push((instance.to_string(), command.to_owned(), message));
        let result = self
            .details
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null));
        async move { result }
    }
}

/// A host that never answers.
pub struct HangingConnection;

impl HostConnection for HangingConnection {
    fn read_file(
        &self,
        _scope: &str,
        _file_name: &str,
        _base64: bool,
    ) -> impl Future<Output = Result<FileContent, HostError>> + Send {
        std::future::pending()
    }

    fn send_to(
        &self,
        _instance: &InstanceId,
        _command: &str,
        _message: Value,
    ) -> impl Future<Output = Result<Value, HostError>> + Send {
        std::future::pending()
    }
}

pub struct RecordingActionHandler {
    pub outcome: Result<ActionOutcome, HostError>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingActionHandler {
    pub fn new(outcome: Result<ActionOutcome, HostError>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeviceActionHandler for RecordingActionHandler {
    fn handle_action(
        &self,
        device_id: &str,
        action: &Action,
    ) -> impl Future<Output = Result<ActionOutcome, HostError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((device_id.to_owned(), action.id.clone()));
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}

/// Keeps control states in memory, keyed by control id.
#[derive(Default)]
pub struct MemoryControls {
    pub states: Mutex<HashMap<String, ControlState>>,
    pub writes: Mutex<Vec<(String, String)>>,
}

impl ControlHandler for MemoryControls {
    fn send_control(
        &self,
        device_id: &str,
        control: &Control,
        state: ControlState,
    ) -> impl Future<Output = Result<Option<ControlState>, HostError>> + Send {
        self.writes
            .lock()
            .unwrap()
            .push((device_id.to_owned(), control.id.clone()));
        let acked = ControlState {
            ack: true,
            ..state
        };
        self.states
            .lock()
            .unwrap()
            .insert(control.id.clone(), acked.clone());
        async move { Ok(Some(acked)) }
    }
}

impl ControlStateHandler for MemoryControls {
    fn read_control(
        &self,
        _device_id: &str,
        control: &Control,
    ) -> impl Future<Output = Result<Option<ControlState>, HostError>> + Send {
        let state = self.states.lock().unwrap().get(&control.id).cloned();
        async move { Ok(state) }
    }
}

pub fn translations() -> HashMap<String, String> {
    HashMap::from([
        ("copied".to_owned(), "Copied".to_owned()),
        ("toClipboard".to_owned(), "to clipboard".to_owned()),
        ("refreshDescription".to_owned(), "Reload the device".to_owned()),
    ])
}

pub fn config() -> CardConfig {
    CardConfig::new("hue.0".parse().unwrap())
}

pub fn details_payload(data: Value) -> Value {
    json!({
        "id": "hue.0.lamp-1",
        "schema": {
            "type": "panel",
            "items": {
                "name": { "type": "text", "label": "Name" }
            }
        },
        "data": data,
    })
}
