//! Step-evaluated render schedules.
//!
//! A schedule assigns sparse color and visibility keyframes to groups of scene elements. This
//! crate binds such a schedule to host-owned render targets and applies the state for any
//! epoch-second timestamp, seeking freely in either direction.
//!
//! The crate is renderer-agnostic: hosts implement [`TargetHandle`] for their objects and an
//! [`ElementResolver`] mapping element ids to them. Reading schedule JSON is behind the `json`
//! feature.

#![forbid(unsafe_code)]

mod batch;
mod document;
mod error;
mod model;
mod playback;
mod target;
mod timeline;

#[cfg(feature = "json")]
pub mod json;

pub use batch::*;
pub use document::*;
pub use error::*;
pub use model::*;
pub use playback::*;
pub use target::*;
pub use timeline::*;

#[cfg(test)]
mod test_support;




#[cfg(test)]
mod playback_tests;
