//! tvadmin Core Library
//!
//! Shared types and traits for the tvadmin reconciliation tools.
//!
//! # Modules
//!
//! - [`models`] - Snapshot entities (Device, Group, User) and mapping entries
//! - [`traits`] - Collaborator seams (`RemoteApi`, `Confirm`)
//! - [`error`] - Remote call errors (`ApiError`) and run errors (`ReconcileError`)
//! - [`gate`] - Dry-run / force / confirmation gate
//!
//! # Example
//!
//! ```
//! use tvadmin_core::{DeviceSelector, MappingEntry};
//!
//! let entry = MappingEntry::new("u@x.test", DeviceSelector::by_name("Dev1"));
//! assert_eq!(entry.device.to_string(), "Dev1");
//! ```

pub mod error;
pub mod gate;
pub mod models;
pub mod traits;

pub use error::{ApiError, ApiResult, ReconcileError, ReconcileResult};
pub use gate::{resolve_gate, GateDecision};
pub use models::{
    Device, DeviceSelector, Group, GroupShare, MappingEntry, OnlineState, SharePermission, User,
};
pub use traits::{Confirm, RemoteApi};
