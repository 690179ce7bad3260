//! Uplink encoder, producing payloads the decoders accept.
//!
//! Useful for generating test vectors and for simulating a sensor.

use tinyvec::ArrayVec;

use crate::sans::{encode, envelope::FORMAT};

use super::Readings;

/// Length of an uplink carrying every reading.
pub const MAX_PAYLOAD: usize = 11;

/// Encode readings as an uplink payload.
///
/// Only present readings are flagged and written. Values are rounded to the
/// nearest representable step and saturate at the limits of their encoding.
pub fn encode(readings: &Readings) -> ArrayVec<[u8; MAX_PAYLOAD]> {
    let mut buf = ArrayVec::new();

    buf.push(FORMAT);
    buf.push(readings.flags().bits());

    if let Some(v) = readings.battery_voltage {
        buf.extend_from_slice(&encode::voltage(v).to_be_bytes());
    }

    if let Some(v) = readings.system_voltage {
        buf.extend_from_slice(&encode::voltage(v).to_be_bytes());
    }

    if let Some(boot) = readings.boot {
        buf.push(boot);
    }

    if let Some(t) = readings.temperature_c {
        buf.extend_from_slice(&encode::temperature(t).to_be_bytes());
    }

    if let Some(p) = readings.differential_pressure {
        buf.extend_from_slice(&encode::differential_pressure(p).to_be_bytes());
    }

    buf
}
