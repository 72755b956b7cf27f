//! Batch file uploader: pick files, upload them as one all-or-nothing batch,
//! delete what was uploaded.
//!
//! [`upload`] holds the state orchestration and is independent of the UI;
//! [`app`] is the egui shell around it.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod upload;
