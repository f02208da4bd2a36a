//! Client-side controller for the object-detection demo backend.

pub mod config;
mod controller;
pub mod error;
pub mod state;
pub mod surface;
pub mod transport;
pub mod view;

pub use controller::{
    DetectController, HistoryOutcome, InferOutcome, HISTORY_LOAD_ERROR, HISTORY_NETWORK_ERROR,
    INFER_ERROR_PREFIX, INFER_MALFORMED_RESPONSE, INFER_NETWORK_ERROR, NO_FILE_SELECTED,
};
pub use error::DetectError;
pub use surface::{Panel, ScrollBehavior, UiSurface};
pub use transport::{DetectApi, HttpDetectApi, ImageUpload};

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;
