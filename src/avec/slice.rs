//! Slice-based decoder implementation.

use either::Either::{self, Left, Right};
use log::{debug, trace};

use crate::sans::{
    Decoder, Reading,
    cursor::{Cursor, OutOfRange},
    data::{AnyField, End, Field},
    envelope::{Bitmap, Mismatch},
    field::FieldInner,
};

use super::{FromReadings, Outcome};

/// Decode an uplink from a slice, publishing to a fresh receiver.
///
/// `port` is the LoRaWAN port the uplink arrived on, or `None` if unknown.
/// The receiver is only returned once every flagged reading has decoded.
/// Bytes following the last flagged reading are ignored.
///
/// This method is also re-exported as `sdp_uplink::avec::decode_slice`.
pub fn decode<O: FromReadings + Default>(
    r: &[u8],
    port: Option<u8>,
) -> Result<Outcome<O>, OutOfRange> {
    let bitmap = match envelope(r, port) {
        Ok(state) => state,
        Err(mismatch) => {
            debug!("Skipping uplink: {mismatch}");
            return Ok(Outcome::NotApplicable(mismatch));
        }
    };

    let c = &mut Cursor::at(r, 1);
    let mut o = O::default();

    let mut state = bitmap.advance(c.take()?);

    loop {
        state = match state {
            Left(AnyField::U8(s)) => decode_field(s, c, &mut o, FromReadings::add_u8),
            Left(AnyField::Voltage(s)) => decode_field(s, c, &mut o, FromReadings::add_f64),
            Left(AnyField::Temperature(s)) => decode_field(s, c, &mut o, FromReadings::add_f64),
            Left(AnyField::DifferentialPressure(s)) => {
                decode_field(s, c, &mut o, FromReadings::add_f64)
            }
            Right(_end) => break,
        }?;
    }

    Ok(Outcome::Decoded(o))
}

/// Check the port and format byte, returning the state to read the bitmap.
fn envelope(r: &[u8], port: Option<u8>) -> Result<Bitmap, Mismatch> {
    let format = Decoder::advance(port)?;
    let &first = r.first().ok_or(Mismatch::Empty)?;
    format.advance([first])
}

fn decode_field<T: FieldInner<From = [u8; N]>, O: FromReadings, const N: usize>(
    state: Field<T>,
    c: &mut Cursor,
    o: &mut O,
    add: fn(&mut O, Reading, T::Into),
) -> Result<Either<AnyField, End>, OutOfRange> {
    let reading = state.reading();
    let (value, successor) = state.advance(c.take()?);

    trace!("{reading} = {value:?}");
    add(o, reading, value);

    Ok(successor)
}
