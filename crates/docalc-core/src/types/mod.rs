//! Shared types used across the workspace.

pub mod collections;
pub mod names;

pub use names::{format_names, name_set, NameSet, Values};
