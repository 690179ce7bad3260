//! Field encodings and standalone field decoders.
//!
//! Every multi-byte field is big-endian. The compact floating-point formats
//! carry a 4-bit exponent with a bias of 15 and no hidden bit, so their
//! magnitude is always below one:
//!
//! - `uflt16`: bits 15..12 exponent, bits 11..0 fraction.
//! - `sflt16`: bit 15 sign, bits 14..11 exponent, bits 10..0 fraction.

use core::fmt::Debug;

use zerocopy::byteorder::big_endian;

use super::cursor::{Cursor, OutOfRange};

pub trait FieldInner {
    /// The data storing this encoding.
    type From;
    /// The value this encoding decodes to.
    type Into: Copy + Debug;

    /// Convert data of this encoding to its value.
    fn decode(r: Self::From) -> Self::Into;
}

macro_rules! field_inner {
    ($t:ident, $n:literal, $into:ty, |$r:ident| $body:expr, $(#[$attr:meta])*) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $t;

        impl FieldInner for $t {
            type From = [u8; $n];
            type Into = $into;

            fn decode($r: Self::From) -> Self::Into {
                $body
            }
        }
    };
}

field_inner!(U8, 1, u8, |r| r[0], /** `uint8`, the boot counter */);
field_inner!(U16, 2, u16, |r| {
    let raw: big_endian::U16 = zerocopy::transmute!(r);
    raw.get()
}, /** `uint16` */);
field_inner!(I16, 2, i16, |r| {
    let raw: big_endian::I16 = zerocopy::transmute!(r);
    raw.get()
}, /** `int16`, two's complement */);

field_inner!(Uflt16, 2, f64, |r| uflt16(U16::decode(r)), /** `uflt16` */);
field_inner!(Sflt16, 2, f64, |r| sflt16(U16::decode(r)), /** `sflt16` */);

field_inner!(Voltage, 2, f64, |r| I16::decode(r) as f64 / 4096.0,
    /** Volts, as `int16` with 12 fraction bits */);
field_inner!(Temperature, 2, f64, |r| I16::decode(r) as f64 / 200.0,
    /** Degrees Celsius, as `int16` in units of 1/200 */);
field_inner!(DifferentialPressure, 2, f64, |r| Sflt16::decode(r) * 32768.0 / 60.0,
    /** Pascals, as `sflt16` of full scale */);

/// Convert a raw `uflt16` to its value, in `[0, 1)`.
pub fn uflt16(raw: u16) -> f64 {
    let exponent = i32::from(raw >> 12);
    let mantissa = f64::from(raw & 0xFFF) / 4096.0;

    mantissa * pow2(exponent - 15)
}

/// Convert a raw `sflt16` to its value, in `(-1, 1)`.
pub fn sflt16(raw: u16) -> f64 {
    if raw == 0x8000 {
        return -0.0;
    }

    let sign = if raw & 0x8000 != 0 { -1.0 } else { 1.0 };
    let exponent = i32::from((raw >> 11) & 0xF);
    let mantissa = f64::from(raw & 0x7FF) / 2048.0;

    sign * mantissa * pow2(exponent - 15)
}

/// Exact power of two, for `e` in the normal exponent range.
pub(crate) fn pow2(e: i32) -> f64 {
    f64::from_bits(((e + 1023) as u64) << 52)
}

/// Decode a `uint16`.
pub fn decode_u16(c: &mut Cursor) -> Result<u16, OutOfRange> {
    c.take().map(U16::decode)
}

/// Decode an `int16`.
pub fn decode_i16(c: &mut Cursor) -> Result<i16, OutOfRange> {
    c.take().map(I16::decode)
}

/// Decode a `uflt16`.
pub fn decode_uflt16(c: &mut Cursor) -> Result<f64, OutOfRange> {
    c.take().map(Uflt16::decode)
}

/// Decode an `sflt16`.
pub fn decode_sflt16(c: &mut Cursor) -> Result<f64, OutOfRange> {
    c.take().map(Sflt16::decode)
}

/// Decode a differential pressure, in pascals.
pub fn decode_differential_pressure(c: &mut Cursor) -> Result<f64, OutOfRange> {
    c.take().map(DifferentialPressure::decode)
}

/// Decode a voltage, in volts.
pub fn decode_voltage(c: &mut Cursor) -> Result<f64, OutOfRange> {
    c.take().map(Voltage::decode)
}

/// Decode a temperature, in degrees Celsius.
pub fn decode_temperature_c(c: &mut Cursor) -> Result<f64, OutOfRange> {
    c.take().map(Temperature::decode)
}
