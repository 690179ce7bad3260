use sdp_uplink::{
    avec::{self, Readings, encode::MAX_PAYLOAD},
    sans::{encode, field},
};

#[test]
fn sflt16() {
    assert_eq!(encode::sflt16(0.5), 0x7C00);
    assert_eq!(encode::sflt16(-0.5), 0xFC00);
    assert_eq!(encode::sflt16(0.0), 0x0000);
    assert_eq!(encode::sflt16(-0.0), 0x8000);
    assert_eq!(encode::sflt16(f64::NAN), 0x0000);
}

#[test]
fn sflt16_saturates() {
    assert_eq!(encode::sflt16(1.0), 0x7FFF);
    assert_eq!(encode::sflt16(-1.0), 0xFFFF);
    assert_eq!(encode::sflt16(40.0), 0x7FFF);

    // Rounds up out of range.
    assert_eq!(encode::sflt16(0.99999), 0x7FFF);
    assert_eq!(encode::sflt16(-0.99999), 0xFFFF);
}

#[test]
fn sflt16_underflow() {
    // 1e-6 is 0.524288 * 2^-19, four steps below the smallest exponent.
    assert_eq!(encode::sflt16(1e-6), 67);
    assert_eq!(encode::sflt16(1e-300), 0);
}

#[test]
fn uflt16() {
    assert_eq!(encode::uflt16(0.5), 0xF800);
    assert_eq!(encode::uflt16(0.3), 0xE99A);
    assert_eq!(encode::uflt16(0.0), 0x0000);
    assert_eq!(encode::uflt16(-0.1), 0x0000);
    assert_eq!(encode::uflt16(1.0), 0xFFFF);
    assert_eq!(encode::uflt16(0.99999), 0xFFFF);
}

#[test]
fn flt16_nearest() {
    for f in [0.3, 0.001, 0.12345, 0.7] {
        let step = f / 1024.0;
        assert!((field::uflt16(encode::uflt16(f)) - f).abs() <= step);
        assert!((field::sflt16(encode::sflt16(f)) - f).abs() <= step);
        assert!((field::sflt16(encode::sflt16(-f)) + f).abs() <= step);
    }
}

#[test]
fn i16_rounded() {
    assert_eq!(encode::i16_rounded(2.5), 3);
    assert_eq!(encode::i16_rounded(2.4), 2);
    assert_eq!(encode::i16_rounded(-2.5), 0xFFFE);
    assert_eq!(encode::i16_rounded(-2.6), 0xFFFD);
    assert_eq!(encode::i16_rounded(40000.0), 0x7FFF);
    assert_eq!(encode::i16_rounded(-40000.0), 0x8000);
}

#[test]
fn i16_rounded_extremes() {
    assert_eq!(encode::i16_rounded(-1e300), 0x8000);
    assert_eq!(encode::i16_rounded(1e300), 0x7FFF);
    assert_eq!(encode::i16_rounded(f64::NEG_INFINITY), 0x8000);
    assert_eq!(encode::i16_rounded(f64::INFINITY), 0x7FFF);
    assert_eq!(encode::i16_rounded(f64::MIN), 0x8000);
    assert_eq!(encode::i16_rounded(f64::NAN), 0);
    assert_eq!(encode::i16_rounded(-32768.5), 0x8000);
    assert_eq!(encode::i16_rounded(32766.5), 0x7FFF);

    assert_eq!(encode::voltage(f64::NEG_INFINITY), 0x8000);
    assert_eq!(encode::temperature(1e300), 0x7FFF);
}

#[test]
fn flt16_infinities() {
    assert_eq!(encode::sflt16(f64::INFINITY), 0x7FFF);
    assert_eq!(encode::sflt16(f64::NEG_INFINITY), 0xFFFF);
    assert_eq!(encode::uflt16(f64::INFINITY), 0xFFFF);
    assert_eq!(encode::uflt16(f64::NEG_INFINITY), 0x0000);
    assert_eq!(encode::differential_pressure(f64::NEG_INFINITY), 0xFFFF);
}

#[test]
fn flt16_reencode_every_value() {
    for raw in 0..=u16::MAX {
        let u = field::uflt16(raw);
        assert_eq!(field::uflt16(encode::uflt16(u)).to_bits(), u.to_bits());

        let s = field::sflt16(raw);
        assert_eq!(field::sflt16(encode::sflt16(s)).to_bits(), s.to_bits());
    }
}

#[test]
fn encode_extreme_readings() {
    let readings = Readings {
        battery_voltage: Some(-1e300),
        system_voltage: Some(f64::INFINITY),
        boot: Some(255),
        temperature_c: Some(f64::NEG_INFINITY),
        differential_pressure: Some(f64::INFINITY),
    };

    let payload = avec::encode(&readings);
    assert_eq!(
        payload.as_slice(),
        [0x1F, 0x1F, 0x80, 0x00, 0x7F, 0xFF, 0xFF, 0x80, 0x00, 0x7F, 0xFF]
    );

    let nan = Readings {
        battery_voltage: Some(f64::NAN),
        differential_pressure: Some(f64::NAN),
        ..Default::default()
    };
    assert_eq!(
        avec::encode(&nan).as_slice(),
        [0x1F, 0x11, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn scaled_readings() {
    assert_eq!(encode::voltage(3.3), 0x34CD);
    assert_eq!(encode::voltage(-1.0), 0xF000);
    assert_eq!(encode::temperature(22.5), 0x1194);
    assert_eq!(encode::temperature(-10.25), 0xF7FE);
    assert_eq!(encode::differential_pressure(0.5 * 32768.0 / 60.0), 0x7C00);
}

#[test]
fn encode_every_reading() {
    let readings = Readings {
        battery_voltage: Some(3.3),
        system_voltage: Some(3.0),
        boot: Some(5),
        temperature_c: Some(22.5),
        differential_pressure: Some(0.5 * 32768.0 / 60.0),
    };

    let payload = avec::encode(&readings);
    assert_eq!(payload.len(), MAX_PAYLOAD);
    assert_eq!(
        payload.as_slice(),
        [0x1F, 0x1F, 0x34, 0xCD, 0x30, 0x00, 0x05, 0x11, 0x94, 0x7C, 0x00]
    );

    let decoded = avec::decode(&payload, Some(1)).unwrap().decoded().unwrap();
    assert!((decoded.battery_voltage.unwrap() - 3.3).abs() < 1.0 / 4096.0);
    assert_eq!(decoded.system_voltage, Some(3.0));
    assert_eq!(decoded.boot, Some(5));
    assert_eq!(decoded.temperature_c, Some(22.5));
    assert_eq!(decoded.differential_pressure, readings.differential_pressure);
}

#[test]
fn encode_sparse_readings() {
    let readings = Readings {
        boot: Some(7),
        temperature_c: Some(-10.25),
        ..Default::default()
    };

    let payload = avec::encode(&readings);
    assert_eq!(payload.as_slice(), [0x1F, 0x0C, 0x07, 0xF7, 0xFE]);

    let decoded = avec::decode(&payload, None).unwrap().decoded().unwrap();
    assert_eq!(decoded, readings);
}

#[test]
fn encode_nothing() {
    let payload = avec::encode(&Readings::default());
    assert_eq!(payload.as_slice(), [0x1F, 0x00]);
}
