//! This crate contains the data model and the fetch services shared by the
//! injected inventory components.

pub mod fetcher;
pub mod inventory;
pub mod item_info;
pub mod providers;
pub mod settings;
pub mod stall;

pub type ApiError = anyhow::Error;
