//! Core types for the tagflow layout engine.
//!
//! This crate provides the foundational types shared by the layout passes:
//! - Geometry value types (sizes, bounds, padding)
//! - Container configuration and alignment modes
//! - The [`FlowItem`] trait implemented by host elements
//! - Error types

pub mod config;
pub mod errors;
pub mod item;
pub mod types;

pub use config::*;
pub use errors::*;
pub use item::*;
pub use types::*;
