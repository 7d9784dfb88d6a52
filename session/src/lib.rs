#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Drives level attempts and the campaign around them.
//!
//! [`LevelSession`] wires the controller, patrol, vision and objective systems
//! to one level world in the fixed per-tick order. [`Campaign`] owns the
//! sessions, reacts to the host requests they raise and keeps the mute switch.

mod audio;
mod campaign;
mod level;

pub use self::audio::{CueLog, GatedAudio};
pub use self::campaign::{Campaign, Stage};
pub use self::level::{HostRequest, HostRequests, LevelHost, LevelSession};
