pub mod prelude;

pub use dispatchx_core as core;
pub use dispatchx_cpu as cpu_ops;
pub use dispatchx_type as types;

pub use dispatchx_core::scalar_type::{byte, char, double, f16, float, half, int, long, short};
pub use crate::core::{
    backend::{get_default_backend, set_default_backend, Backend},
    error::{Error, Result},
    scalar::Scalar,
    scalar_type::{get_default_scalar_type, set_default_scalar_type, Element, ScalarType},
};
pub use crate::types::{
    cpu, default_type, get_type, global_context, Context, CpuGenerator, Generator, OpKernel, Storage, Tensor, Type, TypeId,
};
