//! Encoders for the field representations, the inverse of [`super::field`].
//!
//! Values outside a representation's range saturate. Rounding is half-up.

use super::field::pow2;

/// Encode a value in `[0, 1)` as a `uflt16`.
///
/// Negative values and NaN encode as zero. Values of one or more encode as
/// the largest `uflt16`.
pub fn uflt16(f: f64) -> u16 {
    if f.is_nan() || f <= 0.0 {
        return 0;
    }

    if f >= 1.0 {
        return 0xFFFF;
    }

    let (exponent, fraction) = normalize(f, 12);
    if exponent > 15 {
        return 0xFFFF;
    }

    ((exponent as u16) << 12) | fraction
}

/// Encode a value in `(-1, 1)` as an `sflt16`.
///
/// NaN encodes as zero, and negative zero as `0x8000`. Values of magnitude one
/// or more encode as the largest `sflt16` of the same sign.
pub fn sflt16(f: f64) -> u16 {
    if f.is_nan() {
        return 0;
    }

    if f <= -1.0 {
        return 0xFFFF;
    }

    if f >= 1.0 {
        return 0x7FFF;
    }

    let (sign, f) = if f.is_sign_negative() {
        (0x8000, -f)
    } else {
        (0, f)
    };

    if f == 0.0 {
        return sign;
    }

    let (exponent, fraction) = normalize(f, 11);
    if exponent > 15 {
        return 0x7FFF | sign;
    }

    sign | ((exponent as u16) << 11) | fraction
}

/// Encode a value as an `int16`, rounding half-up and saturating.
pub fn i16_rounded(v: f64) -> u16 {
    if v.is_nan() {
        return 0;
    }

    let v = (v + 0.5).clamp(f64::from(i16::MIN), f64::from(i16::MAX));

    // In range, so stepping down from a truncated negative cannot leave it.
    let truncated = v as i32;
    let floor = if f64::from(truncated) > v {
        truncated - 1
    } else {
        truncated
    };

    floor as i16 as u16
}

/// Encode a voltage, in volts.
pub fn voltage(v: f64) -> u16 {
    i16_rounded(v * 4096.0)
}

/// Encode a temperature, in degrees Celsius.
pub fn temperature(t: f64) -> u16 {
    i16_rounded(t * 200.0)
}

/// Encode a differential pressure, in pascals.
pub fn differential_pressure(p: f64) -> u16 {
    sflt16(p * 60.0 / 32768.0)
}

/// Split a positive value below one into a biased exponent and a `width`-bit
/// fraction.
///
/// The returned exponent exceeds 15 when rounding carried out of range.
fn normalize(f: f64, width: u32) -> (i32, u16) {
    let (mut m, e) = frexp(f);

    // Below the smallest exponent, shift the fraction instead.
    let mut exponent = e + 15;
    if exponent < 0 {
        m *= pow2(exponent.max(-64));
        exponent = 0;
    }

    let one = 1u32 << width;
    let mut fraction = (m * f64::from(one) + 0.5) as u32;
    if fraction >= one {
        fraction = one >> 1;
        exponent += 1;
    }

    (exponent, fraction as u16)
}

/// Split a finite value into a fraction in `[0.5, 1)` and a power of two.
fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 {
        return (x, 0);
    }

    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7FF) as i32;

    // Subnormal.
    if exponent == 0 {
        let (m, e) = frexp(x * pow2(64));
        return (m, e - 64);
    }

    let m = f64::from_bits((bits & !(0x7FFu64 << 52)) | (1022u64 << 52));
    (m, exponent - 1022)
}
