//! Generational slot storage for agents that can die.
//!
//! Turtles and links live in an [`Arena`] and are addressed by small
//! copyable keys implementing [`EntityKey`](patchwork_core::EntityKey).
//! Every slot carries a generation counter that is bumped when its
//! occupant is removed, so a key kept past its entity's death resolves
//! to `None` instead of aliasing whatever reuses the slot.
//!
//! ```text
//! Arena<K, T>
//! ├── slots: Vec<Slot<T>>   (generation + Option<T>)
//! └── free: Vec<u32>        (vacant slot indices, LIFO)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;

pub use arena::Arena;
pub use error::ArenaError;
