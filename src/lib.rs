//! cuesync
//!
//! Synchronizes caption cues with a playback clock: resolves the active cue,
//! formats cue text into a running transcript, and maps the active cue to a
//! scroll offset over a renderer-measured line layout.
//!
//! Pure core ([`resolver`], [`formatter`], [`scroll`], [`store`]) behind an
//! event-driven shell ([`engine`]).

pub mod config;
pub mod engine;
pub mod formatter;
pub mod logging;
pub mod model;
pub mod resolver;
pub mod scroll;
pub mod source;
pub mod store;

pub use engine::{EngineConfig, SyncEngine};
