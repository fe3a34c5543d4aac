mod action;
mod control;
mod details;
mod device;
mod instance;
mod status;
mod translatable;

pub use action::*;
pub use control::*;
pub use details::*;
pub use device::*;
pub use instance::*;
pub use status::*;
pub use translatable::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid instance id: [{0}]. Expected <adapter>.<instance>")]
    InvalidInstanceId(String),
    #[error("Empty {kind} id (device: [{device}])")]
    EmptyId { kind: &'static str, device: String },
    #[error("Control [{control}] of device [{device}] has min {min} greater than max {max}")]
    InvalidRange {
        device: String,
        control: String,
        min: f64,
        max: f64,
    },
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}
