//! Workspace placeholder crate.
//!
//! This crate exists so host applications can depend on `epc-workspace` and
//! reach the individual workspace crates (`core-runtime`, `core-player`)
//! without wiring each path dependency themselves.

pub use core_player as player;
pub use core_runtime as runtime;
