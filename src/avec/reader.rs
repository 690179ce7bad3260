//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use either::Either::{self, Left, Right};
use log::{debug, trace};
use thiserror::Error;

use crate::sans::{
    Decoder, Reading,
    data::{AnyField, End, Field},
    envelope::Mismatch,
    field::FieldInner,
};

use super::{FromReadings, Outcome};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(std::io::Error),
    /// The reader ended before every flagged reading was read.
    #[error("Uplink ended before every flagged reading was read.")]
    Truncated,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(err),
        }
    }
}

/// Decode an uplink from a reader, publishing to a fresh receiver.
///
/// `port` is the LoRaWAN port the uplink arrived on, or `None` if unknown.
/// Decoding stops after the last flagged reading, leaving any further bytes
/// unread. A reader yielding no bytes at all holds an empty uplink.
///
/// This method is also re-exported as `sdp_uplink::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<O: FromReadings + Default>(
    r: &mut impl Read,
    port: Option<u8>,
) -> Result<Outcome<O>, Error> {
    let format = match Decoder::advance(port) {
        Ok(state) => state,
        Err(mismatch) => return Ok(skip(mismatch)),
    };

    let first = match take(r) {
        Err(Error::Truncated) => return Ok(skip(Mismatch::Empty)),
        first => first?,
    };

    let bitmap = match format.advance(first) {
        Ok(state) => state,
        Err(mismatch) => return Ok(skip(mismatch)),
    };

    let mut o = O::default();

    let mut state = bitmap.advance(take(r)?);

    loop {
        state = match state {
            Left(AnyField::U8(s)) => decode_field(s, r, &mut o, FromReadings::add_u8),
            Left(AnyField::Voltage(s)) => decode_field(s, r, &mut o, FromReadings::add_f64),
            Left(AnyField::Temperature(s)) => decode_field(s, r, &mut o, FromReadings::add_f64),
            Left(AnyField::DifferentialPressure(s)) => {
                decode_field(s, r, &mut o, FromReadings::add_f64)
            }
            Right(_end) => break,
        }?;
    }

    Ok(Outcome::Decoded(o))
}

fn skip<O>(mismatch: Mismatch) -> Outcome<O> {
    debug!("Skipping uplink: {mismatch}");
    Outcome::NotApplicable(mismatch)
}

fn decode_field<T: FieldInner<From = [u8; N]>, O: FromReadings, const N: usize>(
    state: Field<T>,
    r: &mut impl Read,
    o: &mut O,
    add: fn(&mut O, Reading, T::Into),
) -> Result<Either<AnyField, End>, Error> {
    let reading = state.reading();
    let (value, successor) = state.advance(take(r)?);

    trace!("{reading} = {value:?}");
    add(o, reading, value);

    Ok(successor)
}

/// Take an exact number of bytes from a reader.
fn take<const N: usize>(r: &mut impl Read) -> Result<[u8; N], Error> {
    let mut buf = [0; N];
    r.read_exact(&mut buf)?;

    Ok(buf)
}
