//! Reference conversions from engineering handbooks

use gauge_units::{convert, explain, ConversionError};

fn assert_close(actual: f64, expected: f64, rel: f64) {
    let tolerance = rel * expected.abs().max(1e-300);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} got {}",
        expected,
        actual
    );
}

#[test]
fn pressure() {
    assert_close(convert(1.0, "MPa", "psi").unwrap(), 145.0377, 1e-6);
    assert_close(convert(1.0, "psi", "N./mm**2").unwrap(), 6.894757e-3, 1e-6);
    assert_close(convert(1.0, "atm", "Pa").unwrap(), 101325.0, 1e-12);
    assert_close(convert(1.0, "bar", "k.Pa").unwrap(), 100.0, 1e-12);
    assert_close(convert(760.0, "Torr", "atm").unwrap(), 1.0, 1e-12);
    assert_close(convert(1.0, "ksi", "psi").unwrap(), 1000.0, 1e-12);
}

#[test]
fn energy() {
    assert_close(convert(1.0, "BTU./lb", "kJ./kg").unwrap(), 2.326, 1e-9);
    assert_close(convert(1.0, "BTU./lb", "k.cal./kg").unwrap(), 0.555927, 1e-6);
    assert_close(convert(1.0, "BTU", "k.cal").unwrap(), 0.252164, 1e-6);
    assert_close(convert(1.0, "kWh", "MJ").unwrap(), 3.6, 1e-12);
    assert_close(convert(1.0, "cal", "J").unwrap(), 4.184, 1e-12);
}

#[test]
fn power() {
    assert_close(convert(1.0, "hp", "W").unwrap(), 735.49875, 1e-12);
    assert_close(convert(1.0, "k.W", "bhp").unwrap(), 1.341022, 1e-6);
}

#[test]
fn heat_transfer() {
    assert_close(convert(1.0, "W./m./K", "BTU./hr./ft./degF").unwrap(), 0.577789, 1e-6);
    assert_close(convert(1.0, "W./m./K", "BTU.in./hr./ft./ft./degF").unwrap(), 6.933472, 1e-6);
    assert_close(convert(1.0, "W./m./K", "cal./s./cm./degC").unwrap(), 0.002390057, 1e-6);
    assert_close(
        convert(1.0, "BTU./ft**2./hr./degF", "k.cal./m**2./hr./degC").unwrap(),
        4.885695,
        1e-6,
    );
    assert_close(convert(1.0, "degC./W", "degF.hr./BTU").unwrap(), 0.527528, 1e-6);
}

#[test]
fn thermal_expansion() {
    assert_close(convert(1.0, "m./m./degC", "in./in./degF").unwrap(), 5.0 / 9.0, 1e-9);
    assert_close(convert(1.0, "./K", "./degF").unwrap(), 5.0 / 9.0, 1e-9);
    assert_close(convert(1.0, "./R", "./K").unwrap(), 1.8, 1e-9);
}

#[test]
fn velocity_and_misc() {
    assert_close(convert(1.0, "knot", "km./hr").unwrap(), 1.852, 1e-12);
    assert_close(convert(60.0, "mile./hr", "m./s").unwrap(), 26.8224, 1e-9);
    assert_close(convert(1.0, "gal", "L").unwrap(), 3.785411784, 1e-12);
    assert_close(convert(1.0, "acre", "ft**2").unwrap(), 43560.17, 1e-6);
    assert_close(convert(1.0, "A", "el").unwrap(), 6.241509074e18, 1e-9);
    assert_close(convert(1.0, "angstrom", "n.m").unwrap(), 0.1, 1e-12);
}

#[test]
fn absolute_temperature() {
    assert_eq!(convert(20.0, "degC", "degF").unwrap(), 68.0);
    assert_eq!(convert(20.0, "degC", "K").unwrap(), 293.15);
    assert_eq!(convert(0.0, "K", "R").unwrap(), 0.0);
    assert_close(convert(-40.0, "degC", "degF").unwrap(), -40.0, 1e-12);
}

#[test]
fn errors() {
    assert!(matches!(
        convert(1.0, "m", "kg"),
        Err(ConversionError::IncompatibleUnits { .. })
    ));
    assert!(matches!(
        convert(1.0, "m**11", "m"),
        Err(ConversionError::ExponentTooLarge { exponent: 11, .. })
    ));
    assert!(matches!(convert(1.0, "furlong", "m"), Err(ConversionError::UnknownUnit(_))));
    assert!(matches!(convert(1.0, "m//s", "m"), Err(ConversionError::MalformedToken { .. })));
    assert!(matches!(convert(1.0, "kMg", "g"), Err(ConversionError::AmbiguousPrefix(_))));
}

#[test]
fn explanation_serializes() {
    let explanation = explain("psi", "MPa").unwrap();
    let json = serde_json::to_value(&explanation).unwrap();
    assert_eq!(json["dimension"], "L^-1 M T^-2");
    assert_eq!(json["affine"], false);
    assert!(json["pairs"].as_array().unwrap().len() >= 4);
}
