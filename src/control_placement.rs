use crate::{Control, ControlHandler, ControlState, ControlStateHandler, HostError};

/// Where the controls of a device go on its card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPlacement<'a> {
    /// No controls, nothing to render.
    Hidden,
    /// A single simple control rendered directly in the card actions.
    Inline(&'a Control),
    /// A trigger that opens a dialog listing all controls.
    Modal(&'a [Control]),
}

impl<'a> ControlPlacement<'a> {
    pub fn of(controls: &'a [Control]) -> Self {
        match controls {
            [] => Self::Hidden,
            [control] if control.is_simple() => Self::Inline(control),
            _ => Self::Modal(controls),
        }
    }

    pub fn has_trigger(&self) -> bool {
        matches!(self, Self::Modal(_))
    }

    /// Controls in the order they are rendered.
    pub fn controls(&self) -> &'a [Control] {
        match *self {
            Self::Hidden => &[],
            Self::Inline(control) => std::slice::from_ref(control),
            Self::Modal(controls) => controls,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsPhase {
    Collapsed,
    ModalOpen,
}

/// Open/closed state of the controls dialog. Toggling never talks to the host.
#[derive(Debug, Default)]
pub struct ControlPanel {
    modal_open: bool,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ControlsPhase {
        if self.modal_open {
            ControlsPhase::ModalOpen
        } else {
            ControlsPhase::Collapsed
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Open the dialog. Refused unless the placement has a trigger.
    pub fn open_modal(&mut self, placement: &ControlPlacement) -> bool {
        if !placement.has_trigger() {
            return false;
        }
        self.modal_open = true;
        true
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn toggle_modal(&mut self, placement: &ControlPlacement) -> bool {
        if self.modal_open {
            self.close_modal();
            true
        } else {
            self.open_modal(placement)
        }
    }
}

/// Controls dialog content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlDialog<'a> {
    pub title: Option<&'a str>,
    pub controls: &'a [Control],
}

/// A control bound to the host handlers that write and read its state.
pub struct BoundControl<'a, H, S> {
    device_id: &'a str,
    control: &'a Control,
    handler: &'a H,
    state_handler: &'a S,
}

impl<'a, H, S> BoundControl<'a, H, S>
where
    H: ControlHandler,
    S: ControlStateHandler,
{
    pub fn new(device_id: &'a str, control: &'a Control, handler: &'a H, state_handler: &'a S) -> Self {
        Self {
            device_id,
            control,
            handler,
            state_handler,
        }
    }

    pub fn control(&self) -> &'a Control {
        self.control
    }

    pub fn device_id(&self) -> &'a str {
        self.device_id
    }

    pub async fn send(&self, state: ControlState) -> Result<Option<ControlState>, HostError> {
        log::debug!("[{}] control {} <- {:?}", self.device_id, self.control.id, state.val);
        self.handler
            .send_control(self.device_id, self.control, state)
            .await
    }

    pub async fn read(&self) -> Result<Option<ControlState>, HostError> {
        self.state_handler
            .read_control(self.device_id, self.control)
            .await
    }
}

/// Bind every placed control, keeping the placement order.
pub fn bind_controls<'a, H, S>(
    device_id: &'a str,
    placement: &ControlPlacement<'a>,
    handler: &'a H,
    state_handler: &'a S,
) -> Vec<BoundControl<'a, H, S>>
where
    H: ControlHandler,
    S: ControlStateHandler,
{
    placement
        .controls()
        .iter()
        .map(|control| BoundControl::new(device_id, control, handler, state_handler))
        .collect()
}
