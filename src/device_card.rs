use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    action_buttons, ActionButton, ActionOutcome, ActionRequest, ActionResponse, BoundControl,
    CardConfig, ControlDialog, ControlHandler, ControlPanel, ControlPlacement, ControlStateHandler,
    ControlsPhase, DetailLoader, DetailPhase, DetailRequest, DetailResponse, Device,
    DeviceActionHandler, DeviceStatus, HostConnection, HostContext, HostError, IconRequest,
    IconResolver, IconResponse, IconState, JsonConfig, Translator,
};

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Device [{device}] has no action [{action}]")]
    UnknownAction { device: String, action: String },
    #[error("Action [{action}] of device [{device}] is disabled")]
    ActionDisabled { device: String, action: String },
    #[error("Device [{device}] has no control [{control}]")]
    UnknownControl { device: String, control: String },
    #[error("Malformed details for device [{device}]: {source}")]
    MalformedDetails {
        device: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Result of a request run outside the card, to be applied with [`DeviceCard::handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    Icon(IconResponse),
    Details(DetailResponse),
    Action(ActionResponse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardIcon {
    Image(String),
    /// Placeholder shown when no image could be resolved.
    NoImage,
}

/// Where uploaded device images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadTarget {
    pub instance: String,
    pub device_id: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}

/// Text copied to the clipboard when the device id is clicked, plus the confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardNotice {
    pub text: String,
    pub message: String,
}

/// Render model of a device card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub title: Option<&'a str>,
    pub display_id: String,
    pub manufacturer: Option<&'a str>,
    pub model: Option<&'a str>,
    pub color: Option<&'a str>,
    pub icon: CardIcon,
    pub status: &'a [DeviceStatus],
    /// Show the button that opens the details dialog.
    pub details_button: bool,
    pub actions: Vec<ActionButton>,
    pub controls: ControlPlacement<'a>,
    pub control_dialog: Option<ControlDialog<'a>>,
    pub details_dialog: Option<JsonConfig<'a>>,
    pub upload: Option<ImageUploadTarget>,
}

static ADAPTER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*\.\d\.").expect("valid adapter prefix pattern"));

/// Device id without its `<adapter>.<instance>.` prefix.
pub fn display_id(device_id: &str) -> String {
    ADAPTER_PREFIX.replace(device_id, "").into_owned()
}

/// Presentation controller of one device card.
#[derive(Debug)]
pub struct DeviceCard {
    device: Device,
    config: CardConfig,
    icon: IconResolver,
    details: DetailLoader,
    controls: ControlPanel,
}

impl DeviceCard {
    pub fn new(device: Device, config: CardConfig) -> Self {
        let details = DetailLoader::new(device.id.clone());
        Self {
            device,
            config,
            icon: IconResolver::new(),
            details,
            controls: ControlPanel::new(),
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn icon(&self) -> &IconState {
        self.icon.state()
    }

    pub fn details(&self) -> &DetailLoader {
        &self.details
    }

    pub fn detail_phase(&self) -> DetailPhase {
        self.details.phase()
    }

    pub fn controls_phase(&self) -> ControlsPhase {
        self.controls.phase()
    }

    pub fn control_placement(&self) -> ControlPlacement<'_> {
        ControlPlacement::of(&self.device.controls)
    }

    /// Mount the card. Returns the icon lookup to run, if any.
    pub fn mount(&mut self) -> Option<IconRequest> {
        self.icon.mount(&self.device, &self.config)
    }

    /// Unmount the card, dropping every request still in flight.
    pub fn unmount(&mut self) {
        self.icon.unmount();
        self.details.reset(self.device.id.clone());
    }

    /// Swap in a fresh device record from the host.
    pub fn update_device(&mut self, device: Device) -> Option<IconRequest> {
        if device.id != self.device.id {
            log::debug!("card switched from {} to {}", self.device.id, device.id);
            self.details.reset(device.id.clone());
        }
        self.device = device;
        if !self.control_placement().has_trigger() {
            self.controls.close_modal();
        }
        self.mount()
    }

    /// Move the card to another instance; the icon is looked up again.
    pub fn set_instance(&mut self, config: CardConfig) -> Option<IconRequest> {
        if config.instance != self.config.instance {
            log::debug!(
                "[{}] card moved from {} to {}",
                self.device.id,
                self.config.instance,
                config.instance
            );
            self.details.reset(self.device.id.clone());
        }
        self.config = config;
        self.mount()
    }

    pub fn apply_icon(&mut self, response: IconResponse) -> bool {
        self.icon.apply(response)
    }

    /// Use an uploaded image as icon. Empty uploads are ignored.
    pub fn upload_image(&mut self, image: &str) -> bool {
        self.icon.apply_upload(image)
    }

    pub fn open_details(&mut self) -> Option<DetailRequest> {
        if !self.device.has_details {
            log::debug!("[{}] device has no details", self.device.id);
            return None;
        }
        self.details.open(&self.config)
    }

    pub fn close_details(&mut self) {
        self.details.close();
    }

    pub fn load_details(&mut self) -> DetailRequest {
        self.details.load(&self.config)
    }

    pub fn refresh(&mut self) -> DetailRequest {
        self.details.refresh(&self.config)
    }

    pub fn apply_details(&mut self, response: DetailResponse) -> Result<bool, CardError> {
        self.details.apply(response)
    }

    /// New data from the schema form.
    pub fn edit_details(&mut self, data: Map<String, Value>) -> bool {
        self.details.update_data(data)
    }

    pub fn report_form_error(&mut self, error: Option<String>) {
        self.details.report_form_error(error)
    }

    pub fn open_controls(&mut self) -> bool {
        let placement = ControlPlacement::of(&self.device.controls);
        self.controls.open_modal(&placement)
    }

    pub fn close_controls(&mut self) {
        self.controls.close_modal();
    }

    pub fn toggle_controls(&mut self) -> bool {
        let placement = ControlPlacement::of(&self.device.controls);
        self.controls.toggle_modal(&placement)
    }

    pub fn bind_control<'a, H, S>(
        &'a self,
        control_id: &str,
        handler: &'a H,
        state_handler: &'a S,
    ) -> Result<BoundControl<'a, H, S>, CardError>
    where
        H: ControlHandler,
        S: ControlStateHandler,
    {
        let control = self
            .device
            .control(control_id)
            .ok_or_else(|| CardError::UnknownControl {
                device: self.device.id.clone(),
                control: control_id.to_owned(),
            })?;
        Ok(BoundControl::new(&self.device.id, control, handler, state_handler))
    }

    pub fn begin_action(&self, action_id: &str) -> Result<ActionRequest, CardError> {
        ActionRequest::new(&self.device, action_id)
    }

    /// Apply the result of an action. Returns the refresh to run when the handler asked for one.
    pub fn complete_action(
        &mut self,
        response: ActionResponse,
    ) -> Result<Option<DetailRequest>, CardError> {
        match response.result? {
            ActionOutcome::Refresh => Ok(Some(self.refresh())),
            ActionOutcome::Done => Ok(None),
        }
    }

    /// Apply a result delivered by the card driver. Returns a follow-up details request, if any.
    pub fn handle_event(&mut self, event: CardEvent) -> Result<Option<DetailRequest>, CardError> {
        match event {
            CardEvent::Icon(response) => {
                self.apply_icon(response);
                Ok(None)
            }
            CardEvent::Details(response) => {
                self.apply_details(response)?;
                Ok(None)
            }
            CardEvent::Action(response) => self.complete_action(response),
        }
    }

    pub async fn resolve_icon<C: HostConnection>(&mut self, conn: &C) -> bool {
        match self.mount() {
            Some(request) => {
                let response = request.fetch(conn).await;
                self.apply_icon(response)
            }
            None => false,
        }
    }

    /// Open the details view and wait for the details.
    pub async fn show_details<C: HostConnection>(&mut self, conn: &C) -> Result<(), CardError> {
        if let Some(request) = self.open_details() {
            let response = request.fetch(conn).await;
            self.apply_details(response)?;
        }
        Ok(())
    }

    pub async fn refresh_details<C: HostConnection>(&mut self, conn: &C) -> Result<(), CardError> {
        let response = self.refresh().fetch(conn).await;
        self.apply_details(response)?;
        Ok(())
    }

    /// Run an action and refresh the details when the handler asks for it.
    pub async fn invoke_action<H, C>(
        &mut self,
        action_id: &str,
        handler: &H,
        conn: &C,
    ) -> Result<ActionOutcome, CardError>
    where
        H: DeviceActionHandler,
        C: HostConnection,
    {
        let response = self.begin_action(action_id)?.invoke(handler).await;
        let outcome = response.result.clone()?;
        if let Some(request) = self.complete_action(response)? {
            let response = request.fetch(conn).await;
            if let Err(err) = self.apply_details(response) {
                log::error!("[{}] refresh after action {} failed: {}", self.device.id, action_id, err);
            }
        }
        Ok(outcome)
    }

    pub fn copy_id(&self, translator: &dyn Translator) -> ClipboardNotice {
        let text = self.device.id.clone();
        let message = format!(
            "{} {} {}!",
            translator.translate("copied"),
            text,
            translator.translate("toClipboard")
        );
        ClipboardNotice { text, message }
    }

    pub fn title<'a>(&'a self, language: &str) -> Option<&'a str> {
        self.config
            .title
            .as_deref()
            .or_else(|| self.device.name(language))
    }

    pub fn view<'a>(&'a self, ctx: &HostContext) -> CardView<'a> {
        let language = ctx.language;
        let title = self.title(language);
        let controls = self.control_placement();
        let control_dialog = (self.controls.is_modal_open() && controls.has_trigger()).then(|| {
            ControlDialog {
                title,
                controls: controls.controls(),
            }
        });
        let upload = self
            .config
            .upload_images_to_instance
            .as_ref()
            .map(|instance| ImageUploadTarget {
                instance: instance.clone(),
                device_id: self.device.id.clone(),
                manufacturer: self.device.manufacturer(language).map(str::to_owned),
                model: self.device.model(language).map(str::to_owned),
            });

        CardView {
            title,
            display_id: display_id(&self.device.id),
            manufacturer: self.device.manufacturer(language),
            model: self.device.model(language),
            color: self.device.color.as_deref(),
            icon: match self.icon.state().image() {
                Some(src) => CardIcon::Image(src.to_owned()),
                None => CardIcon::NoImage,
            },
            status: &self.device.status,
            details_button: self.device.has_details,
            actions: action_buttons(&self.device.actions, ctx),
            controls,
            control_dialog,
            details_dialog: self.details.json_config(&self.config.instance),
            upload,
        }
    }
}
