//! Ordered agent sets for Patchwork.
//!
//! An [`OrderedAgentSet`] is an insertion-ordered collection of agent
//! keys (patches, turtles, or links) that can be re-sorted by a derived
//! numeric key and combined with set algebra. Traversal state is never
//! stored in the set: [`iter`](OrderedAgentSet::iter) and
//! [`cursor`](OrderedAgentSet::cursor) each return an independent object,
//! so any number of traversals of the same set can be in flight.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod set;

pub use cursor::Cursor;
pub use set::{AgentKey, LinkSet, OrderedAgentSet, PatchSet, TurtleSet};
