//! Core types for the Patchwork agent-based modeling engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by every other crate in the workspace:
//! agent identifiers, colors, tagged property values, property bags,
//! and link tie modes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod id;
pub mod property;
pub mod tie;

pub use color::{Color, BASE_COLORS};
pub use id::{EntityKey, LinkId, PatchId, TickId, TurtleId, Who};
pub use property::{Properties, PropertyTemplate, Value, ValueKind};
pub use tie::TieMode;
