//! Internal finite-state machine and field primitives for implementing
//! decoders.
//!
//! This module is intended for applications that need fine control over how
//! payload bytes are sourced. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data.
//!
//! An uplink moves through the states in a fixed order:
//!
//! 1. [`Decoder`] checks the port the uplink arrived on.
//! 2. [`envelope::Format`] checks the format byte.
//! 3. [`envelope::Bitmap`] reads the flag bitmap.
//! 4. One [`data::Field`] per flagged reading, in ascending bit order, each
//!    consuming exactly its own width.
//! 5. [`data::End`], once every flagged reading has been decoded. Any bytes
//!    following are ignored.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! A port or format mismatch is reported as a [`envelope::Mismatch`] rather
//! than an error: the uplink simply belongs to some other decoder. Running out
//! of bytes is not represented in the finite-state machine and must be handled
//! by the caller. The [`cursor`] module provides a bounds-checked reader for
//! byte slices.
//!
//! The standalone field decoders in [`field`] and encoders in [`encode`]
//! operate on the same wire representations.

pub mod bitmap;
pub mod cursor;
pub mod data;
pub mod encode;
pub mod envelope;
pub mod field;

pub use bitmap::{Flags, Reading};

/// Entrypoint to the finite-state machine.
pub type Decoder = envelope::Port;
