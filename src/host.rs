use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::{Action, ActionIcon, Control, ControlState, InstanceId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("File [{file}] not found in [{scope}]")]
    FileNotFound { scope: String, file: String },
    #[error("Request [{command}] to [{instance}] failed: {message}")]
    Request {
        instance: String,
        command: String,
        message: String,
    },
    #[error("Handler failed: {0}")]
    Handler(String),
    #[error("Host connection is closed")]
    Disconnected,
}

/// File read from the host file storage.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContent {
    pub mime_type: String,
    /// Payload, base64 encoded when requested that way.
    pub data: String,
}

/// Connection to the host platform (file storage and instance messaging).
pub trait HostConnection {
    fn read_file(
        &self,
        scope: &str,
        file_name: &str,
        base64: bool,
    ) -> impl Future<Output = Result<FileContent, HostError>> + Send;

    fn send_to(
        &self,
        instance: &InstanceId,
        command: &str,
        message: Value,
    ) -> impl Future<Output = Result<Value, HostError>> + Send;
}

pub trait Translator {
    /// Translate `key`. Unknown keys come back unchanged.
    fn translate(&self, key: &str) -> String;
}

impl Translator for HashMap<String, String> {
    fn translate(&self, key: &str) -> String {
        self.get(key).cloned().unwrap_or_else(|| key.to_owned())
    }
}

/// Renderable icon handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconView {
    Image(String),
    Named(String),
}

pub trait IconRenderer {
    fn render_icon(&self, icon: &ActionIcon) -> Option<IconView>;
}

/// Renders every non empty descriptor as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIconRenderer;

impl IconRenderer for DefaultIconRenderer {
    fn render_icon(&self, icon: &ActionIcon) -> Option<IconView> {
        match icon {
            ActionIcon::Image(src) if !src.is_empty() => Some(IconView::Image(src.clone())),
            ActionIcon::Named(name) if !name.is_empty() => Some(IconView::Named(name.clone())),
            _ => None,
        }
    }
}

/// What the card should do once an action handler completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The action changed device state, reload the details.
    Refresh,
}

pub trait DeviceActionHandler {
    fn handle_action(
        &self,
        device_id: &str,
        action: &Action,
    ) -> impl Future<Output = Result<ActionOutcome, HostError>> + Send;
}

pub trait ControlHandler {
    fn send_control(
        &self,
        device_id: &str,
        control: &Control,
        state: ControlState,
    ) -> impl Future<Output = Result<Option<ControlState>, HostError>> + Send;
}

pub trait ControlStateHandler {
    fn read_control(
        &self,
        device_id: &str,
        control: &Control,
    ) -> impl Future<Output = Result<Option<ControlState>, HostError>> + Send;
}

/// Capabilities needed to build views, injected by the host.
#[derive(Clone, Copy)]
pub struct HostContext<'a> {
    pub translator: &'a dyn Translator,
    pub icons: &'a dyn IconRenderer,
    pub language: &'a str,
}

impl<'a> HostContext<'a> {
    pub fn new(translator: &'a dyn Translator, icons: &'a dyn IconRenderer, language: &'a str) -> Self {
        Self {
            translator,
            icons,
            language,
        }
    }
}
