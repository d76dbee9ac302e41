//! Growable level-order storage for ringtree.
//!
//! An [`Arena`] owns one contiguous `Vec<T>` laid out ring by ring (see
//! `ringtree-core`). It grows on demand by appending whole rings, which
//! keeps every existing slot at the same flat index. Raw references into
//! the vector would not survive that growth, so callers hold a
//! [`Reference`] instead: an `(arena, epoch, index)` triple resolved fresh
//! on every access.
//!
//! # Contracts
//!
//! Two behaviors are deliberate and covered by tests:
//!
//! - **Grow on access.** [`Arena::resolve`] (and [`Reference::get_mut`])
//!   extend storage until it covers the requested index, even when the
//!   caller only wanted to look. The non-growing [`Arena::get`] exists for
//!   shared reads.
//! - **Destructive restride.** Calling [`Arena::ensure`] with a stride
//!   different from the current one discards every slot before growing.
//!   [`Arena::restride`] is the same reset as a standalone call.
//!
//! `zero`, `clear` and restride bump the arena epoch, so references minted
//! before them fail with [`ArenaError::StaleReference`] instead of silently
//! reading whatever was written into the slot afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;

pub use arena::{Arena, Ensure};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::Reference;
