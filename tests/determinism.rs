//! Golden Determinism Tests
//!
//! Exact raw outputs. Any change here changes simulation results on every
//! peer, so these values must only move together with a protocol version bump.

use lockstep_fixed::{EulerOrder, Fp, Fp3, Fp3x2, FpError, FpQuaternion, RigidTransform};

fn raw(value: Fp) -> i64 {
    value.raw()
}

#[test]
fn test_constants() {
    assert_eq!(raw(Fp::ONE), 4_294_967_296);
    assert_eq!(raw(Fp::EPSILON), 4_295);
    assert_eq!(raw(Fp::ONE_E_MINUS_8), 43);
    assert_eq!(raw(Fp::PI), 13_493_037_705);
    assert_eq!(raw(Fp::HALF_PI), 6_746_518_852);
    assert_eq!(raw(Fp::TWO_PI), 26_986_075_409);
    assert_eq!(raw(Fp::PI_OVER_180), 74_961_321);
}

#[test]
fn test_parsing() {
    assert_eq!(raw("0.1".parse().unwrap()), 429_496_730);
    assert_eq!(raw("1.25".parse().unwrap()), 5_368_709_120);
    assert_eq!(raw("-2.5".parse().unwrap()), -10_737_418_240);
    assert!(matches!("1e-8".parse::<Fp>(), Err(FpError::Unsupported(_))));
}

#[test]
fn test_rounding_is_ties_to_even() {
    assert_eq!(raw(Fp::from_raw(7) * Fp::HALF), 4);
    assert_eq!(raw(Fp::from_raw(-7) * Fp::HALF), -4);
    assert_eq!(raw(Fp::from_raw(5) * Fp::HALF), 2);
    assert_eq!(raw(Fp::from_int(3) / Fp::from_int(5)), 2_576_980_378);
}

#[test]
fn test_sqrt() {
    assert_eq!(raw(Fp::TWO.sqrt().unwrap()), 6_074_001_000);
    assert_eq!(raw(Fp::from_raw(1).sqrt().unwrap()), 65_536);
    assert_eq!(raw(Fp::MAX.sqrt().unwrap()), 199_032_864_766_430);
}

#[test]
fn test_sin_cos() {
    let cases = [
        (Fp::ONE, 3_614_090_360, 2_320_580_733),
        (Fp::from_int(100), -2_174_823_868, 3_703_631_355),
        ("-2.5".parse().unwrap(), -2_570_418_286, -3_440_885_628),
        (Fp::from_raw(2_248_839_618), 2_147_483_648, 3_719_550_786),
        (Fp::QUARTER_PI, 3_037_000_501, 3_037_000_500),
        (Fp::PI, -1, -4_294_967_296),
        (-Fp::HALF_PI, -4_294_967_296, 0),
    ];
    for (angle, sin, cos) in cases {
        let (s, c) = angle.sin_cos();
        assert_eq!((raw(s), raw(c)), (sin, cos), "sin_cos({angle:?})");
    }
}

#[test]
fn test_inverse_trig() {
    assert_eq!(Fp::ONE.atan(), Fp::QUARTER_PI);
    assert_eq!(raw(Fp::TWO.atan()), 4_755_167_534);
    assert_eq!(raw((-Fp::HALF).atan()), -1_991_351_318);
    assert_eq!(raw(Fp::HALF.acos()), 4_497_679_234);
    assert_eq!(raw(Fp::ZERO.acos()), 6_746_518_852);
    assert_eq!(raw((-Fp::HALF).acos()), 8_995_358_470);
}

#[test]
fn test_angle_conversion() {
    assert_eq!(raw(Fp::from_int(180).to_radians()), 13_493_037_780);
    assert_eq!(raw(Fp::PI.to_degrees()), 773_094_113_309);
}

#[test]
fn test_vector_normalize() {
    let n = Fp3::new(Fp::from_int(3), Fp::from_int(4), Fp::ZERO).normalize().unwrap();
    assert_eq!((raw(n.x), raw(n.y), raw(n.z)), (2_576_980_378, 3_435_973_837, 0));
}

#[test]
fn test_quaternion_construction() {
    let q = FpQuaternion::from_rotation_z(Fp::ONE);
    assert_eq!(q.to_array().map(raw), [0, 0, 2_059_117_009, 3_769_188_403]);

    let m = q.to_matrix();
    assert_eq!(m.c0.to_array().map(raw), [2_320_580_734, 3_614_090_360, 0]);
    assert_eq!(m.c1.to_array().map(raw), [-3_614_090_360, 2_320_580_734, 0]);

    let e = FpQuaternion::from_euler(
        Fp3::new(Fp::HALF, -Fp::HALF * Fp::HALF, Fp::ONE),
        EulerOrder::Xyz,
    );
    assert_eq!(
        e.to_array().map(raw),
        [1_173_975_429, 50_145_124, 2_095_798_284, 3_560_005_728]
    );
    let v = e.rotate(Fp3::new(Fp::ONE, Fp::TWO, Fp::from_int(3)));
    assert_eq!(v.to_array().map(raw), [-958_835_984, 1_025_709_346, 16_008_840_400]);
}

#[test]
fn test_rigid_composition() {
    let t = RigidTransform::new(
        FpQuaternion::from_rotation_z(Fp::HALF_PI),
        Fp3::new(Fp::ONE, Fp::TWO, Fp::from_int(3)),
    );
    let inverse = t.inverse().unwrap();
    assert_eq!(
        inverse.rotation.to_array().map(raw),
        [0, 0, -3_037_000_500, 3_037_000_499]
    );
    assert_eq!(
        inverse.translation.to_array().map(raw),
        [-8_589_934_590, 4_294_967_295, -12_884_901_888]
    );
    assert_eq!(t * inverse, RigidTransform::IDENTITY);
}

#[test]
fn test_3x2_rotation_uses_fixed_point_sin_cos() {
    let m = Fp3x2::create_rotation(Fp::ONE);
    assert_eq!(m.c0.to_array().map(raw), [2_320_580_733, -3_614_090_360, 0]);
    assert_eq!(m.c1.to_array().map(raw), [3_614_090_360, 2_320_580_733, 0]);
}

#[cfg(feature = "serialization")]
#[test]
fn test_serde_is_raw_and_roundtrips() {
    assert_eq!(serde_json::to_string(&Fp::ONE).unwrap(), "4294967296");

    let t = RigidTransform::new(
        FpQuaternion::from_rotation_x(Fp::from_raw(-123_456_789)),
        Fp3::new(Fp::MIN, Fp::MAX, Fp::from_raw(-1)),
    );
    let json = serde_json::to_string(&t).unwrap();
    let restored: RigidTransform = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, t);
    assert_eq!(restored.to_le_bytes(), t.to_le_bytes());
}
