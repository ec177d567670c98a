#![allow(clippy::len_without_is_empty)]

//! A tunneled FM-index.
//!
//! The index stores a text as the remnant of its Burrows-Wheeler transform
//! after *tunneling*: runs of rows that repeat an unbranched path in a de
//! Bruijn graph of the transform are collapsed into a single copy, with two
//! bitvectors recording where the collapsed blocks begin and end. Despite
//! the collapsing, a backward step over the structure deterministically
//! reproduces the original text, so the index is a self-index that can be
//! smaller than the plain transform on repetitive inputs.
//!
//! ```rust
//! use tfm_index::TFMIndex;
//! use tfm_index::converter::IdConverter;
//!
//! let text = b"abcabcabc\0";
//! let tfm = TFMIndex::from_text(text, IdConverter::<u8>::default());
//! assert!(tfm.tunneled_len() < text.len());
//! assert_eq!(tfm.invert(), text.to_vec());
//! ```
//!
//! Indexes can be serialized as a whole ([`TFMIndex::save`] /
//! [`TFMIndex::load`]), or exchanged with an external prefix-free-parsing
//! pipeline through raw `.L`/`.din`/`.dout` side files
//! ([`TFMIndex::load_pfwg`] / [`TFMIndex::save_pfwg`]).

mod construct;
pub mod converter;
mod dbg;
mod error;
mod heap_size;
mod pfwg;
#[cfg(test)]
mod testutil;
mod tfm_index;
mod util;

pub use crate::error::Error;
pub use crate::heap_size::HeapSize;
pub use crate::tfm_index::{BackwardIterator, Position, TFMIndex};
