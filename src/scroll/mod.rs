//! Scroll synchronization between the active cue and a rendered transcript.
//!
//! Cues are semantic units and rendered lines are visual units; the bridge is
//! a linear interpolation over a renderer-measured [`LineLayoutSnapshot`].

pub mod layout;
pub mod sync;

pub use layout::{interpolate_line_index, LineLayoutSnapshot, LineRecord};
pub use sync::{
    on_active_change, target_offset, LatchReset, ScrollAction, ScrollPolicy, SyncState,
    DEFAULT_TOP_PADDING,
};
