//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the embedded player core:
//! - Logging and tracing infrastructure
//! - Generic broadcast event bus
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the player facade depends on.
//! It establishes the logging conventions and event broadcasting mechanisms
//! used throughout the workspace.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
