use crate::{backend::Backend, scalar_type::ScalarType};
use std::fmt;

#[derive(Debug)]
pub enum Error {
    TypeMismatch {
        expected: String,
        got: String,
    },
    ScalarTypeMismatch {
        expected: ScalarType,
        got: ScalarType,
    },
    BackendMismatch {
        expected: Backend,
        got: Backend,
    },
    BackendUnavailable(Backend),
    TypeNotEnabled {
        backend: Backend,
        scalar_type: ScalarType,
    },
    NotImplemented {
        op: String,
        type_name: String,
    },
    UnsupportedScalarType {
        op: String,
        scalar_type: ScalarType,
    },
    InvalidArgument(String),
    //
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    ShapeMismatch {
        expected: usize,
        got: usize,
        msg: String,
    },
    DimensionOutOfBounds {
        dim: usize,
        ndim: usize,
    },
    IndexOutOfBounds {
        index: usize,
        size: usize,
    },
    DivisionByZero,
    StorageNotResizable,
    Lock,
    //
    Internal {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)
            }
            Self::ScalarTypeMismatch { expected, got } => {
                write!(f, "Scalar type mismatch: expected {}, got {}", expected, got)
            }
            Self::BackendMismatch { expected, got } => {
                write!(f, "Backend mismatch: expected {}, got {}", expected, got)
            }
            Self::BackendUnavailable(backend) => write!(f, "Backend {} is not available in this build", backend),
            Self::TypeNotEnabled { backend, scalar_type } => {
                write!(f, "Type {}{}Type is not enabled", backend.name(), scalar_type.name())
            }
            Self::NotImplemented { op, type_name } => {
                write!(f, "{} is not implemented for {}", op, type_name)
            }
            Self::UnsupportedScalarType { op, scalar_type } => {
                write!(f, "{} does not support scalar type {}", op, scalar_type)
            }
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),

            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {:?}, got {:?}", expected, got)
            }
            Self::ShapeMismatch { expected, got, msg } => {
                write!(f, "Shape mismatch ({}): expected {}, got {}", msg, expected, got)
            }
            Self::DimensionOutOfBounds { dim, ndim } => {
                write!(
                    f,
                    "Dimension out of bounds: dimension {} is not valid for tensor with {} dimensions",
                    dim, ndim
                )
            }
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "Index out of bounds: index {} is out of bounds for size {}", index, size)
            }
            Self::DivisionByZero => write!(f, "Integer division by zero"),
            Self::StorageNotResizable => write!(f, "Storage is not resizable"),
            Self::Lock => write!(f, "Lock poisoned"),
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}
