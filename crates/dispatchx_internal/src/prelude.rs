pub use crate::core::{
    backend::{get_default_backend, set_default_backend, Backend},
    error::{Error, Result},
    scalar::Scalar,
    scalar_type::*,
};
pub use crate::types::{cpu, default_type, get_type, global_context, Generator, Storage, Tensor, Type, TypeId};
