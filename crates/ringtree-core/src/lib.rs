//! Core types for the ringtree workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! level-order coordinate arithmetic shared by the arena and the tree
//! containers: the validated [`Stride`], the [`Position`] of a slot, the
//! [`ArenaId`] identity tag, and the [`CoordError`] type.
//!
//! # Layout
//!
//! Slots are stored breadth-first. Ring `r` holds `stride^r` slots, so the
//! root lives at flat index 0 and ring `r` begins right after every slot of
//! the shallower rings:
//!
//! ```text
//! stride 2:  ring 0 │ 0
//!            ring 1 │ 1 2
//!            ring 2 │ 3 4 5 6
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod id;

pub use coord::{Position, Stride, SubtreeSpans};
pub use error::CoordError;
pub use id::ArenaId;
