//! States processing flagged readings.

use core::marker::PhantomData;

use either::Either::{self, Left, Right};

use super::{
    bitmap::{Flags, Reading},
    field::{DifferentialPressure, FieldInner, Temperature, U8, Voltage},
};

/// State token to decode a reading stored with encoding `T`.
#[derive(Debug)]
pub struct Field<T> {
    pub(super) reading: Reading,
    pub(super) pending: u8,
    pub(super) _phantom: PhantomData<T>,
}

impl<T: FieldInner> Field<T> {
    /// The reading this field holds.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Transition to another state by decoding a reading.
    ///
    /// Returns the reading's value, and a successor state: the next flagged
    /// reading, or the end of the uplink.
    pub fn advance(self, r: T::From) -> (T::Into, Either<AnyField, End>) {
        let value = T::decode(r);
        (value, next(Flags::from_byte(self.pending)))
    }
}

/// A `Field` state token for an encoding.
#[derive(Debug)]
pub enum AnyField {
    U8(Field<U8>),
    Voltage(Field<Voltage>),
    Temperature(Field<Temperature>),
    DifferentialPressure(Field<DifferentialPressure>),
}

impl AnyField {
    /// The reading this field holds.
    pub fn reading(&self) -> Reading {
        match self {
            Self::U8(s) => s.reading(),
            Self::Voltage(s) => s.reading(),
            Self::Temperature(s) => s.reading(),
            Self::DifferentialPressure(s) => s.reading(),
        }
    }
}

/// State token marking every flagged reading as decoded.
#[derive(Debug)]
pub struct End(pub(super) ());

/// Select the state for the first reading still pending.
pub(super) fn next(pending: Flags) -> Either<AnyField, End> {
    let Some(reading) = pending.first() else {
        return Right(End(()));
    };

    fn new_field<T>(reading: Reading, pending: Flags) -> Field<T> {
        Field {
            reading,
            pending: pending.without(reading).bits(),
            _phantom: PhantomData,
        }
    }

    Left(match reading {
        Reading::BatteryVoltage | Reading::SystemVoltage => {
            AnyField::Voltage(new_field(reading, pending))
        }
        Reading::Boot => AnyField::U8(new_field(reading, pending)),
        Reading::TemperatureC => AnyField::Temperature(new_field(reading, pending)),
        Reading::DifferentialPressure => {
            AnyField::DifferentialPressure(new_field(reading, pending))
        }
    })
}
