use dispatchx_core::{
    error::Result,
    scalar::Scalar,
    scalar_type::{f16, Element, ScalarType},
};

#[test]
fn conversions_follow_cast_rules() -> Result<()> {
    assert_eq!(Scalar::F64(3.9).as_i32(), 3);
    assert_eq!(Scalar::F64(-1.5).as_i64(), -1);
    assert_eq!(Scalar::I64(300).as_u8(), 44);
    assert_eq!(Scalar::I32(-1).as_u8(), 255);
    assert_eq!(Scalar::U8(200).as_i8(), -56);
    assert_eq!(Scalar::I64(2).as_f32(), 2.0);
    assert_eq!(Scalar::F32(0.5).as_f16(), f16::from_f32(0.5));
    Ok(())
}

#[test]
fn to_scalar_type_changes_variant() -> Result<()> {
    let s = Scalar::F32(7.0);
    for scalar_type in ScalarType::ALL {
        let converted = s.to_scalar_type(scalar_type);
        assert_eq!(converted.scalar_type(), scalar_type);
        assert_eq!(converted.as_f64_any(), 7.0);
    }
    Ok(())
}

#[test]
fn element_round_trip() -> Result<()> {
    assert_eq!(<i16 as Element>::SCALAR_TYPE, ScalarType::I16);
    assert_eq!(i16::from_scalar(Scalar::F64(12.0)), 12);
    assert_eq!(2.5f64.into_scalar(), Scalar::F64(2.5));
    Ok(())
}

#[test]
fn is_zero() {
    assert!(Scalar::I8(0).is_zero());
    assert!(Scalar::F16(f16::ZERO).is_zero());
    assert!(!Scalar::F64(1e-9).is_zero());
}

#[test]
fn scalar_type_names() {
    assert_eq!(ScalarType::F32.name(), "Float");
    assert_eq!(ScalarType::I8.name(), "Char");
    assert_eq!(ScalarType::F16.size_in_bytes(), 2);
    assert!(ScalarType::U8.is_int());
    assert!(ScalarType::F16.is_float());
}
