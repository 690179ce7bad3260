#![cfg(feature = "std")]

use std::{fmt::Debug, io};

use csv::ReaderBuilder;
use sdp_uplink::avec::{self, Mismatch, Outcome, Readings, reader};

const PATH: &str = "fixtures/vectors.csv";

#[test]
fn decode_slice_vectors() {
    for vector in vectors() {
        let outcome = avec::decode_slice::<Readings>(&vector.payload, vector.port);
        vector.validate(outcome);
    }
}

#[test]
fn decode_reader_vectors() {
    for vector in vectors() {
        let outcome = avec::decode_reader::<Readings>(&mut vector.payload.as_slice(), vector.port);
        vector.validate(outcome);
    }
}

#[test]
fn decode_reader_leaves_trailing_bytes() {
    let mut r: &[u8] = &[0x1F, 0x04, 0x07, 0xAA, 0xBB];
    let readings = avec::decode_reader::<Readings>(&mut r, Some(1))
        .unwrap()
        .decoded()
        .unwrap();

    assert_eq!(readings.boot, Some(7));
    assert_eq!(r, [0xAA, 0xBB]);
}

#[test]
fn decode_reader_truncated() {
    let mut r: &[u8] = &[0x1F, 0x01, 0x10];
    let err = avec::decode_reader::<Readings>(&mut r, None).unwrap_err();
    assert!(matches!(err, reader::Error::Truncated), "{err:?}");
}

#[test]
fn decode_reader_io_error() {
    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("link down"))
        }
    }

    let err = avec::decode_reader::<Readings>(&mut Broken, Some(1)).unwrap_err();
    assert!(matches!(err, reader::Error::Io(_)), "{err:?}");
}

#[test]
fn decode_reader_skips_port_without_reading() {
    struct Untouchable;

    impl io::Read for Untouchable {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            panic!("read an uplink on the wrong port")
        }
    }

    let outcome = avec::decode_reader::<Readings>(&mut Untouchable, Some(3)).unwrap();
    assert_eq!(outcome, Outcome::NotApplicable(Mismatch::Port(3)));
}

struct Vector {
    port: Option<u8>,
    hex: String,
    payload: Vec<u8>,
    outcome: String,
    readings: Vec<(String, f64)>,
}

impl Vector {
    fn validate<E: Debug>(&self, found: Result<Outcome<Readings>, E>) {
        let hex = &self.hex;

        match (self.outcome.as_str(), found) {
            ("decoded", Ok(Outcome::Decoded(readings))) => {
                let found: Vec<_> = readings.iter().collect();
                assert_eq!(found.len(), self.readings.len(), "{hex}: {readings:?}");

                for ((reading, value), (name, expected)) in found.iter().zip(&self.readings) {
                    assert_eq!(reading.name(), name, "{hex}");

                    let value = value.as_f64();
                    let tolerance = 1e-9 * expected.abs().max(1.0);
                    assert!(
                        (value - expected).abs() <= tolerance,
                        "{hex}: {name} = {value}, expected {expected}"
                    );
                }
            }
            ("skip:port", Ok(Outcome::NotApplicable(Mismatch::Port(port)))) => {
                assert_eq!(Some(port), self.port, "{hex}");
            }
            ("skip:format", Ok(Outcome::NotApplicable(Mismatch::Format(format)))) => {
                assert_eq!(format, self.payload[0], "{hex}");
            }
            ("skip:empty", Ok(Outcome::NotApplicable(Mismatch::Empty))) => {}
            ("error", Err(_)) => {}
            (expected, found) => panic!("{hex}: expected {expected}, found {found:?}"),
        }
    }
}

fn vectors() -> Vec<Vector> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .comment(Some(b'#'))
        .from_path(PATH)
        .unwrap();

    let vectors: Vec<Vector> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            let fields: Vec<&str> = r.iter().collect();

            let port = match fields[0] {
                "" => None,
                port => Some(port.parse().unwrap()),
            };

            let hex = fields[1].to_string();
            let payload = (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
                .collect();

            let readings = fields[3..]
                .chunks(2)
                .map(|pair| (pair[0].to_string(), pair[1].parse().unwrap()))
                .collect();

            Vector {
                port,
                hex,
                payload,
                outcome: fields[2].to_string(),
                readings,
            }
        })
        .collect();

    assert!(!vectors.is_empty());
    vectors
}
