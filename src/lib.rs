mod action_dispatcher;
#[cfg(feature = "tokio")]
mod card_driver;
mod config;
mod control_placement;
mod detail_loader;
mod device_card;
mod host;
mod icon_resolver;
mod json_config;
mod model;

pub use action_dispatcher::*;
#[cfg(feature = "tokio")]
pub use card_driver::*;
pub use config::*;
pub use control_placement::*;
pub use detail_loader::*;
pub use device_card::*;
pub use host::*;
pub use icon_resolver::*;
pub use json_config::*;
pub use model::*;
