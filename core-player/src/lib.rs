//! # Core Player Module
//!
//! A deferred command facade around an externally supplied, asynchronously
//! initialized media-player widget.
//!
//! ## Overview
//!
//! The widget this crate wraps does not exist when callers start issuing
//! commands: its scripts load lazily and its instance reports readiness
//! through an event. [`PlayerFacade`] hides all of that behind ordinary
//! async methods:
//!
//! - every command queues behind a [`readiness::ReadinessGate`] until the
//!   widget is live;
//! - in strict mode, state-sensitive commands (play, pause, stop, seek)
//!   additionally wait until the widget confirms an acceptable playback
//!   state — or a per-operation timeout forces resolution;
//! - the widget's native callbacks are republished on a generic event bus
//!   under normalized names, so consumers subscribe without ever touching
//!   the widget.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐  invoke   ┌──────────────┐  await   ┌───────────────┐
//! │ caller ├──────────>│ PlayerFacade ├─────────>│ ReadinessGate │
//! └────────┘           └──────┬───────┘          └───────────────┘
//!                             │ dispatch + state wait
//!                             ▼
//!                      ┌──────────────┐  events  ┌──────────────┐
//!                      │ PlayerHandle ├─────────>│  EventProxy  │
//!                      └──────────────┘          └──────┬───────┘
//!                                                       │ publish
//!                                                       ▼
//!                                                ┌──────────────┐
//!                                                │   EventBus   │
//!                                                └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use core_player::{FacadeTarget, PlayerFacade, PlayerOptions, SharedBootstrap};
//! use std::sync::Arc;
//!
//! let bootstrap = Arc::new(SharedBootstrap::new(host_bootstrap));
//! let facade = PlayerFacade::create(
//!     bootstrap,
//!     FacadeTarget::Container("player".to_string()),
//!     PlayerOptions::default().with_media_id("abc123"),
//!     true,
//! )?;
//!
//! // Queues until the widget is ready, then waits for the seek to confirm.
//! facade.seek_to(42.0, true).await?;
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod facade;
pub mod handle;
pub mod policy;
pub mod proxy;
pub mod readiness;
pub mod state;

pub use command::{Command, Operation};
pub use config::PlayerOptions;
pub use error::{PlayerError, Result};
pub use events::{EventKind, PlayerEvent, PlayerEventBus};
pub use facade::{FacadeTarget, PlayerFacade};
pub use handle::{PlayerBootstrap, PlayerConstructor, PlayerHandle, SharedBootstrap};
pub use policy::OperationPolicy;
pub use proxy::{proxy_events, EventCallback, HandlerTable};
pub use readiness::{ReadinessGate, ReadinessResolver};
pub use state::PlayerState;
