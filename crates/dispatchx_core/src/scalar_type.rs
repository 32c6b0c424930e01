#![allow(non_upper_case_globals)]

use crate::scalar::Scalar;
pub use half::f16;

pub const byte: ScalarType = ScalarType::U8;
pub const char: ScalarType = ScalarType::I8;
pub const short: ScalarType = ScalarType::I16;
pub const int: ScalarType = ScalarType::I32;
pub const long: ScalarType = ScalarType::I64;
pub const half: ScalarType = ScalarType::F16;
pub const float: ScalarType = ScalarType::F32;
pub const double: ScalarType = ScalarType::F64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarType {
    U8,
    I8,
    I16,
    I32,
    I64,
    F16,
    F32,
    F64,
}

impl ScalarType {
    pub const ALL: [ScalarType; 8] = [
        ScalarType::U8,
        ScalarType::I8,
        ScalarType::I16,
        ScalarType::I32,
        ScalarType::I64,
        ScalarType::F16,
        ScalarType::F32,
        ScalarType::F64,
    ];

    /// Name used when composing descriptor names, e.g. `CPUFloatType`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::U8 => "Byte",
            Self::I8 => "Char",
            Self::I16 => "Short",
            Self::I32 => "Int",
            Self::I64 => "Long",
            Self::F16 => "Half",
            Self::F32 => "Float",
            Self::F64 => "Double",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 => 4,
            Self::I64 => 8,
            Self::F16 => 2,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    pub fn is_int(&self) -> bool {
        match self {
            Self::U8 | Self::I8 | Self::I16 | Self::I32 | Self::I64 => true,
            Self::F16 | Self::F32 | Self::F64 => false,
        }
    }

    pub fn is_float(&self) -> bool {
        !self.is_int()
    }

    /// # Safety
    /// `ptr` must be valid for reads of `size_in_bytes()` bytes and aligned for this scalar type.
    pub unsafe fn read_scalar(&self, ptr: *const u8) -> Scalar {
        match self {
            Self::U8 => Scalar::U8(*ptr),
            Self::I8 => Scalar::I8(*(ptr as *const i8)),
            Self::I16 => Scalar::I16(*(ptr as *const i16)),
            Self::I32 => Scalar::I32(*(ptr as *const i32)),
            Self::I64 => Scalar::I64(*(ptr as *const i64)),
            Self::F16 => Scalar::F16(*(ptr as *const f16)),
            Self::F32 => Scalar::F32(*(ptr as *const f32)),
            Self::F64 => Scalar::F64(*(ptr as *const f64)),
        }
    }

    /// Writes `value` converted to this scalar type.
    ///
    /// # Safety
    /// `ptr` must be valid for writes of `size_in_bytes()` bytes and aligned for this scalar type.
    pub unsafe fn write_scalar(&self, ptr: *mut u8, value: Scalar) {
        match self {
            Self::U8 => *ptr = value.as_u8(),
            Self::I8 => *(ptr as *mut i8) = value.as_i8(),
            Self::I16 => *(ptr as *mut i16) = value.as_i16(),
            Self::I32 => *(ptr as *mut i32) = value.as_i32(),
            Self::I64 => *(ptr as *mut i64) = value.as_i64(),
            Self::F16 => *(ptr as *mut f16) = value.as_f16(),
            Self::F32 => *(ptr as *mut f32) = value.as_f32(),
            Self::F64 => *(ptr as *mut f64) = value.as_f64(),
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust element types that back a [`ScalarType`].
pub trait Element: Copy + Default + Send + Sync + 'static {
    const SCALAR_TYPE: ScalarType;

    fn from_scalar(value: Scalar) -> Self;

    fn into_scalar(self) -> Scalar;
}

macro_rules! impl_element {
    ($($variant:ident => $type:ty),* $(,)?) => {
        $(
            paste::paste! {
                impl Element for $type {
                    const SCALAR_TYPE: ScalarType = ScalarType::$variant;

                    #[inline]
                    fn from_scalar(value: Scalar) -> Self {
                        value.[<as_ $variant:lower>]()
                    }

                    #[inline]
                    fn into_scalar(self) -> Scalar {
                        Scalar::$variant(self)
                    }
                }
            }
        )*
    };
}

impl_element!(U8 => u8, I8 => i8, I16 => i16, I32 => i32, I64 => i64, F16 => f16, F32 => f32, F64 => f64);

thread_local! {
    static DEFAULT_SCALAR_TYPE: std::cell::Cell<ScalarType> = const { std::cell::Cell::new(ScalarType::F32) };
}

pub fn get_default_scalar_type() -> ScalarType {
    DEFAULT_SCALAR_TYPE.with(|s| s.get())
}

pub fn set_default_scalar_type(scalar_type: ScalarType) {
    DEFAULT_SCALAR_TYPE.with(|s| s.set(scalar_type));
}
