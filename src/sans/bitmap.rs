//! The flag bitmap selecting which readings an uplink carries.

use core::fmt;

use tartan_bitfield::bitfield;

/// A reading an uplink may carry.
///
/// Discriminants are the bitmap bit announcing the reading, which is also the
/// order readings appear on the wire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reading {
    /// Battery voltage in volts.
    BatteryVoltage = 0,
    /// System supply voltage in volts.
    SystemVoltage = 1,
    /// Boot counter, unscaled.
    Boot = 2,
    /// Temperature in degrees Celsius.
    TemperatureC = 3,
    /// Differential pressure in pascals.
    DifferentialPressure = 4,
}

impl Reading {
    /// All readings, in wire order.
    pub const ALL: [Self; 5] = [
        Self::BatteryVoltage,
        Self::SystemVoltage,
        Self::Boot,
        Self::TemperatureC,
        Self::DifferentialPressure,
    ];

    /// The key this reading is reported under.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BatteryVoltage => "Vbattery",
            Self::SystemVoltage => "Vsystem",
            Self::Boot => "Boot",
            Self::TemperatureC => "TemperatureC",
            Self::DifferentialPressure => "DifferentialPressure",
        }
    }

    /// Look up a reading by the key it is reported under.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitfield! {
    pub struct Flags(u8) {
        [0] battery_voltage,
        [1] system_voltage,
        [2] boot,
        [3] temperature,
        [4] differential_pressure,
    }
}

impl Flags {
    /// Interpret a raw bitmap byte. Bits 5 to 7 are reserved and ignored.
    pub fn from_byte(raw: u8) -> Self {
        Self(raw)
    }

    /// The raw bitmap byte.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Whether the bitmap announces a reading.
    pub fn contains(&self, reading: Reading) -> bool {
        match reading {
            Reading::BatteryVoltage => self.battery_voltage(),
            Reading::SystemVoltage => self.system_voltage(),
            Reading::Boot => self.boot(),
            Reading::TemperatureC => self.temperature(),
            Reading::DifferentialPressure => self.differential_pressure(),
        }
    }

    /// The first announced reading in wire order, if any.
    pub fn first(&self) -> Option<Reading> {
        Reading::ALL.into_iter().find(|r| self.contains(*r))
    }

    /// A copy of the bitmap announcing `reading` as well.
    pub fn with(&self, reading: Reading) -> Self {
        Self(self.0 | reading.mask())
    }

    /// A copy of the bitmap no longer announcing `reading`.
    pub fn without(&self, reading: Reading) -> Self {
        Self(self.0 & !reading.mask())
    }

    /// Announced readings, in wire order.
    pub fn readings(&self) -> impl Iterator<Item = Reading> {
        let flags = Self(self.0);
        Reading::ALL.into_iter().filter(move |r| flags.contains(*r))
    }
}
