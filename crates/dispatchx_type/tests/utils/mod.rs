#![allow(dead_code)]

use dispatchx_core::{
    backend::{set_default_backend, Backend},
    error::Result,
    scalar_type::{Element, ScalarType},
};
use dispatchx_type::{cpu, Tensor};

// Helper functions
pub fn setup_backend() {
    set_default_backend(Backend::CPU);
}

pub fn setup_tensor<T: Element>(data: Vec<T>, sizes: &[usize], scalar_type: ScalarType) -> Result<Tensor> {
    setup_backend();
    cpu(scalar_type)?.tensor_from_data(&data, sizes)
}

pub fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!((a - e).abs() <= tolerance, "Expected value close to {}, got {}", e, a);
    }
}

#[macro_export]
macro_rules! test_types {
    ([$($op:ident),*]) => {
        $(
            mod $op {
                use super::*;
                use paste::paste;

                paste! {
                    #[test]
                    fn u8() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::U8)
                    }

                    #[test]
                    fn i8() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::I8)
                    }

                    #[test]
                    fn i16() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::I16)
                    }

                    #[test]
                    fn i32() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::I32)
                    }

                    #[test]
                    fn i64() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::I64)
                    }

                    #[test]
                    fn f16() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::F16)
                    }

                    #[test]
                    fn f32() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::F32)
                    }

                    #[test]
                    fn f64() -> Result<()> {
                        test_functions::[<$op _test>](ScalarType::F64)
                    }
                }
            }
        )*
    };
}
