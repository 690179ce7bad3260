//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode uplinks from data slices and readers,
//! publishing to the [`FromReadings`] trait. [`Readings`] collects every
//! reading an uplink carries, and [`decode`] is the shortest path to it.
//!
//! When only some readings are of interest, or they should land in a domain
//! type, the trait can be derived. See the [`FromReadings`](macro@FromReadings)
//! macro for details.

use core::fmt;

pub mod encode;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

pub use encode::encode;
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

pub use crate::sans::{
    Reading,
    cursor::OutOfRange,
    envelope::{FORMAT, Mismatch, PORT},
};

use crate::sans::Flags;

/// Decode an uplink from a slice into [`Readings`].
///
/// `port` is the LoRaWAN port the uplink arrived on, or `None` if unknown.
pub fn decode(r: &[u8], port: Option<u8>) -> Result<Outcome<Readings>, OutOfRange> {
    decode_slice(r, port)
}

/// The result of decoding an uplink that was read in full.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The uplink is not one this crate decodes.
    NotApplicable(Mismatch),
    /// The uplink was decoded. An uplink flagging no readings still decodes,
    /// to an empty receiver.
    Decoded(T),
}

impl<T> Outcome<T> {
    /// The decoded receiver, if the uplink applied.
    pub fn decoded(self) -> Option<T> {
        match self {
            Self::Decoded(o) => Some(o),
            Self::NotApplicable(_) => None,
        }
    }

    /// Whether the uplink is one this crate decodes.
    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

/// Derive [`FromReadings`] for a struct holding a selection of readings.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a reading, add the `reading(Key)` attribute to an `Option<T>`
/// struct field, where `Key` is the reported name of the reading and `T` is
/// `u8` for `Boot` and `f64` for everything else.
///
/// ```
/// #[derive(Debug, Default, FromReadings)]
/// struct Supply {
///     #[reading(Vbattery)]
///     battery: Option<f64>,
///     #[reading(Boot)]
///     boots: Option<u8>,
/// }
/// ```
///
/// To convert a reading as it arrives, supply an accumulator closure instead.
///
/// ```
/// #[derive(Debug, Default, FromReadings)]
/// struct Weather {
///     #[reading(TemperatureC, |t, c| *t = Some(c * 9.0 / 5.0 + 32.0))]
///     temperature_f: Option<f64>,
/// }
/// ```
///
/// The generated implementation names `Reading` and `FromReadings`, so both
/// must be in scope.
#[cfg(feature = "derive")]
pub use sdp_uplink_derive::FromReadings;

/// Receive reading values for an uplink.
///
/// The default implementation of each method ignores received values.
///
/// See the [`FromReadings`](macro@FromReadings) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromReadings {
    /// Add an unscaled byte reading (the boot counter).
    fn add_u8(&mut self, reading: Reading, _: u8) {}
    /// Add a scaled reading.
    fn add_f64(&mut self, reading: Reading, _: f64) {}
}

/// A reading value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    U8(u8),
    F64(f64),
}

impl Value {
    /// The value as a float, whatever its representation.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::U8(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// Every reading an uplink carried. Readings not flagged are `None`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Readings {
    /// `Vbattery`, in volts.
    pub battery_voltage: Option<f64>,
    /// `Vsystem`, in volts.
    pub system_voltage: Option<f64>,
    /// `Boot`, the boot counter.
    pub boot: Option<u8>,
    /// `TemperatureC`, in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// `DifferentialPressure`, in pascals.
    pub differential_pressure: Option<f64>,
}

impl Readings {
    /// The value of a reading, if present.
    pub fn get(&self, reading: Reading) -> Option<Value> {
        match reading {
            Reading::BatteryVoltage => self.battery_voltage.map(Value::F64),
            Reading::SystemVoltage => self.system_voltage.map(Value::F64),
            Reading::Boot => self.boot.map(Value::U8),
            Reading::TemperatureC => self.temperature_c.map(Value::F64),
            Reading::DifferentialPressure => self.differential_pressure.map(Value::F64),
        }
    }

    /// Present readings and their values, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (Reading, Value)> + '_ {
        Reading::ALL
            .into_iter()
            .filter_map(move |r| self.get(r).map(|v| (r, v)))
    }

    /// Number of present readings.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no readings are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The flag bitmap announcing the present readings.
    pub fn flags(&self) -> Flags {
        self.iter()
            .fold(Flags::from_byte(0), |flags, (r, _)| flags.with(r))
    }
}

impl FromReadings for Readings {
    fn add_u8(&mut self, reading: Reading, value: u8) {
        if reading == Reading::Boot {
            self.boot = Some(value);
        }
    }

    fn add_f64(&mut self, reading: Reading, value: f64) {
        let slot = match reading {
            Reading::BatteryVoltage => &mut self.battery_voltage,
            Reading::SystemVoltage => &mut self.system_voltage,
            Reading::TemperatureC => &mut self.temperature_c,
            Reading::DifferentialPressure => &mut self.differential_pressure,
            Reading::Boot => return,
        };

        *slot = Some(value);
    }
}
