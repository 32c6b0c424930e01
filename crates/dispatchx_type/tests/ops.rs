mod utils;

use dispatchx_core::{
    error::{Error, Result},
    scalar::Scalar,
    scalar_type::ScalarType,
};
use dispatchx_type::cpu;
use utils::setup_tensor;

mod test_functions {
    use super::*;

    const LHS: [f32; 4] = [6.0, 8.0, 10.0, 12.0];
    const RHS: [f32; 4] = [2.0, 4.0, 5.0, 3.0];

    pub fn add_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(LHS.to_vec(), &[2, 2], scalar_type)?;
        let b = setup_tensor(RHS.to_vec(), &[2, 2], scalar_type)?;
        let c = a.add(&b)?;

        assert_eq!(c.ty().id(), a.ty().id());
        assert_eq!(c.sizes(), &[2, 2]);
        assert_eq!(c.to_vec::<f64>()?, vec![8.0, 12.0, 15.0, 15.0]);
        Ok(())
    }

    pub fn sub_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(LHS.to_vec(), &[2, 2], scalar_type)?;
        let b = setup_tensor(RHS.to_vec(), &[2, 2], scalar_type)?;
        assert_eq!(a.sub(&b)?.to_vec::<f64>()?, vec![4.0, 4.0, 5.0, 9.0]);
        Ok(())
    }

    pub fn mul_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(LHS.to_vec(), &[2, 2], scalar_type)?;
        let b = setup_tensor(RHS.to_vec(), &[2, 2], scalar_type)?;
        assert_eq!(a.mul(&b)?.to_vec::<f64>()?, vec![12.0, 32.0, 50.0, 36.0]);
        Ok(())
    }

    pub fn div_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(LHS.to_vec(), &[2, 2], scalar_type)?;
        let b = setup_tensor(RHS.to_vec(), &[2, 2], scalar_type)?;
        assert_eq!(a.div(&b)?.to_vec::<f64>()?, vec![3.0, 2.0, 2.0, 4.0]);
        Ok(())
    }

    pub fn neg_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(vec![1.0f32, 0.0, 2.0, 3.0], &[4], scalar_type)?;
        let expected = match scalar_type {
            ScalarType::U8 => vec![255.0, 0.0, 254.0, 253.0],
            _ => vec![-1.0, 0.0, -2.0, -3.0],
        };
        assert_eq!(a.neg()?.to_vec::<f64>()?, expected);
        Ok(())
    }

    pub fn sum_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(LHS.to_vec(), &[2, 2], scalar_type)?;
        let expected = if scalar_type.is_int() { Scalar::I64(36) } else { Scalar::F64(36.0) };
        assert_eq!(a.sum()?, expected);
        Ok(())
    }

    pub fn fill_test(scalar_type: ScalarType) -> Result<()> {
        let mut a = cpu(scalar_type)?.tensor(&[3])?;
        assert_eq!(a.to_vec::<f64>()?, vec![0.0; 3]);

        a.fill_(Scalar::F64(7.0))?;
        assert_eq!(a.to_vec::<f64>()?, vec![7.0; 3]);

        a.zero_()?;
        assert_eq!(a.to_vec::<f64>()?, vec![0.0; 3]);
        Ok(())
    }

    pub fn strided_test(scalar_type: ScalarType) -> Result<()> {
        let a = setup_tensor(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], scalar_type)?;
        let b = setup_tensor(vec![1.0f32, 1.0, 1.0, 1.0, 1.0, 1.0], &[3, 2], scalar_type)?;

        let at = a.transpose(0, 1)?;
        assert!(!at.is_contiguous());

        let c = at.add(&b)?;
        assert!(c.is_contiguous());
        assert_eq!(c.to_vec::<f64>()?, vec![2.0, 5.0, 3.0, 6.0, 4.0, 7.0]);
        assert_eq!(at.sum()?.as_f64_any(), 21.0);
        Ok(())
    }
}

test_types!([add, sub, mul, div, neg, sum, fill, strided]);

#[test]
fn integer_ops_wrap() -> Result<()> {
    let a = setup_tensor(vec![127i8, -128], &[2], ScalarType::I8)?;
    let b = setup_tensor(vec![1i8, 1], &[2], ScalarType::I8)?;

    assert_eq!(a.add(&b)?.to_vec::<i8>()?, vec![-128, -127]);
    assert_eq!(a.sub(&b)?.to_vec::<i8>()?, vec![126, 127]);
    assert_eq!(a.neg()?.to_vec::<i8>()?, vec![-127, -128]);
    Ok(())
}

#[test]
fn integer_division_by_zero() -> Result<()> {
    let a = setup_tensor(vec![1i32, 2], &[2], ScalarType::I32)?;
    let b = setup_tensor(vec![1i32, 0], &[2], ScalarType::I32)?;
    assert!(matches!(a.div(&b), Err(Error::DivisionByZero)));
    Ok(())
}

#[test]
fn float_division_by_zero() -> Result<()> {
    let a = setup_tensor(vec![1.0f64, -1.0], &[2], ScalarType::F64)?;
    let b = setup_tensor(vec![0.0f64, 0.0], &[2], ScalarType::F64)?;
    assert_eq!(a.div(&b)?.to_vec::<f64>()?, vec![f64::INFINITY, f64::NEG_INFINITY]);
    Ok(())
}

#[test]
fn binary_type_mismatch() -> Result<()> {
    let a = setup_tensor(vec![1.0f32], &[1], ScalarType::F32)?;
    let b = setup_tensor(vec![1.0f32], &[1], ScalarType::F64)?;
    match a.add(&b) {
        Err(Error::TypeMismatch { expected, got }) => {
            assert_eq!(expected, "CPUFloatType");
            assert_eq!(got, "CPUDoubleType");
        }
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
    Ok(())
}

#[test]
fn binary_shape_mismatch() -> Result<()> {
    let a = setup_tensor(vec![1.0f32, 2.0], &[2], ScalarType::F32)?;
    let b = setup_tensor(vec![1.0f32, 2.0], &[1, 2], ScalarType::F32)?;
    assert!(matches!(a.mul(&b), Err(Error::DimensionMismatch { .. })));
    Ok(())
}

#[test]
fn self_binary_shares_storage() -> Result<()> {
    let a = setup_tensor(vec![1.0f32, 2.0, 3.0], &[3], ScalarType::F32)?;
    let alias = a.clone();
    assert_eq!(a.mul(&alias)?.to_vec::<f32>()?, vec![1.0, 4.0, 9.0]);
    Ok(())
}

#[test]
fn sum_accumulates_wide() -> Result<()> {
    let a = setup_tensor(vec![200u8; 4], &[4], ScalarType::U8)?;
    assert_eq!(a.sum()?, Scalar::I64(800));

    let empty = cpu(ScalarType::F32)?.tensor(&[0])?;
    assert_eq!(empty.sum()?, Scalar::F64(0.0));
    Ok(())
}

#[test]
fn fill_respects_view() -> Result<()> {
    let base = setup_tensor(vec![0i64; 6], &[2, 3], ScalarType::I64)?;
    let mut column = cpu(ScalarType::I64)?.tensor_from_storage(base.storage().clone(), 1, &[2], &[3])?;
    column.fill_(9i64)?;
    assert_eq!(base.to_vec::<i64>()?, vec![0, 9, 0, 0, 9, 0]);
    Ok(())
}

#[test]
fn uniform_and_normal_reject_integers() -> Result<()> {
    let mut a = cpu(ScalarType::I32)?.tensor(&[4])?;
    assert!(matches!(a.uniform_(0.0, 1.0, None), Err(Error::UnsupportedScalarType { .. })));
    assert!(matches!(a.normal_(0.0, 1.0, None), Err(Error::UnsupportedScalarType { .. })));
    Ok(())
}
