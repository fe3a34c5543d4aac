use crate::{
    Action, ActionOutcome, CardError, Device, DeviceActionHandler, HostContext, HostError,
    IconView,
};

/// Button of one device action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub id: String,
    /// Action label, or the id when neither label nor icon is available.
    pub label: Option<String>,
    pub icon: Option<IconView>,
    pub tooltip: Option<String>,
    pub color: Option<String>,
    pub disabled: bool,
}

impl ActionButton {
    pub fn new(action: &Action, ctx: &HostContext) -> Self {
        let icon = action.icon.as_ref().and_then(|icon| ctx.icons.render_icon(icon));
        let label = match (action.label(ctx.language), &icon) {
            (Some(label), _) => Some(label.to_owned()),
            (None, Some(_)) => None,
            (None, None) => Some(action.id.clone()),
        };
        Self {
            id: action.id.clone(),
            label,
            icon,
            tooltip: action
                .description
                .as_deref()
                .map(|key| ctx.translator.translate(key)),
            color: action.color.clone(),
            disabled: action.disabled,
        }
    }
}

pub fn action_buttons(actions: &[Action], ctx: &HostContext) -> Vec<ActionButton> {
    actions
        .iter()
        .map(|action| ActionButton::new(action, ctx))
        .collect()
}

/// An action ready to be handed to the host action handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    device_id: String,
    action: Action,
}

impl ActionRequest {
    /// Look up `action_id` on `device`. Disabled actions cannot be requested.
    pub fn new(device: &Device, action_id: &str) -> Result<Self, CardError> {
        let action = device
            .action(action_id)
            .ok_or_else(|| CardError::UnknownAction {
                device: device.id.clone(),
                action: action_id.to_owned(),
            })?;
        if action.disabled {
            return Err(CardError::ActionDisabled {
                device: device.id.clone(),
                action: action_id.to_owned(),
            });
        }
        Ok(Self {
            device_id: device.id.clone(),
            action: action.clone(),
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub async fn invoke<H: DeviceActionHandler>(self, handler: &H) -> ActionResponse {
        log::debug!("[{}] invoking action {}", self.device_id, self.action.id);
        let result = handler.handle_action(&self.device_id, &self.action).await;
        ActionResponse {
            device_id: self.device_id,
            action_id: self.action.id,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub device_id: String,
    pub action_id: String,
    pub result: Result<ActionOutcome, HostError>,
}
