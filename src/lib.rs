#![no_std]

//! A decoder for differential-pressure sensor uplinks: LoRaWAN port 1, payload
//! format `0x1F`.
//!
//! Each uplink carries a format byte, a flag bitmap, and then whichever of the
//! following readings the bitmap selects, in this order:
//!
//! | Bit | Key                    | Encoding                         |
//! |-----|------------------------|----------------------------------|
//! | 0   | `Vbattery`             | `int16` volts, 12 fraction bits  |
//! | 1   | `Vsystem`              | `int16` volts, 12 fraction bits  |
//! | 2   | `Boot`                 | `uint8` boot counter             |
//! | 3   | `TemperatureC`         | `int16` in units of 1/200 °C     |
//! | 4   | `DifferentialPressure` | `sflt16`, rescaled by 32768 / 60 |
//!
//! Most users should begin with [`avec::decode`], or derive a receiver with
//! the macros in the [`avec`] module. Applications needing finer control over
//! byte handling can drive the finite-state machine in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder (default).

pub mod avec;
pub mod sans;
