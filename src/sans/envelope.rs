//! States processing the uplink port, format byte and flag bitmap.

use either::Either;
use thiserror::Error;

use super::{
    bitmap::Flags,
    data::{AnyField, End, next},
};

/// The LoRaWAN port these uplinks are sent on.
pub const PORT: u8 = 1;

/// The format byte opening these uplinks.
pub const FORMAT: u8 = 0x1F;

/// Why an uplink is not one this crate decodes.
///
/// This is not a decoding failure: the uplink belongs to another decoder.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Uplink arrived on another port.
    #[error("Uplink arrived on port {0}, not port 1.")]
    Port(u8),
    /// Uplink carried no payload.
    #[error("Uplink payload is empty.")]
    Empty,
    /// Payload opened with another format byte.
    #[error("Unknown format byte ({0:#04x}).")]
    Format(u8),
}

/// State token to check the port an uplink arrived on.
#[derive(Debug)]
pub struct Port;

impl Port {
    /// Transition to another state by checking the uplink port. An unknown
    /// port (`None`) is accepted.
    ///
    /// Returns the successor state token.
    pub fn advance(port: Option<u8>) -> Result<Format, Mismatch> {
        match port {
            Some(port) if port != PORT => Err(Mismatch::Port(port)),
            _ => Ok(Format(())),
        }
    }
}

/// State token to check the format byte.
#[derive(Debug)]
pub struct Format(pub(super) ());

impl Format {
    /// Transition to another state by checking the format byte.
    ///
    /// Returns the successor state token.
    pub fn advance(self, r: [u8; 1]) -> Result<Bitmap, Mismatch> {
        match r {
            [FORMAT] => Ok(Bitmap(())),
            [format] => Err(Mismatch::Format(format)),
        }
    }
}

/// State token to decode the flag bitmap.
#[derive(Debug)]
pub struct Bitmap(pub(super) ());

impl Bitmap {
    /// Transition to another state by decoding the flag bitmap.
    ///
    /// Returns the first flagged reading, or the end of the uplink if the
    /// bitmap is empty.
    pub fn advance(self, r: [u8; 1]) -> Either<AnyField, End> {
        next(Flags::from_byte(r[0]))
    }
}
