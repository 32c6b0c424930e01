use crate::scalar_type::ScalarType;
use half::f16;

macro_rules! scalar_variants {
    ($($variant:ident => $type:ty),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Scalar {
            $($variant($type),)*
        }

        impl Scalar {
            #[inline]
            pub fn new<T: Into<Self>>(value: T) -> Self {
                value.into()
            }

            #[inline]
            pub fn scalar_type(&self) -> ScalarType {
                match self {
                    $(Self::$variant(_) => ScalarType::$variant,)*
                }
            }

            #[inline]
            pub fn is_int(&self) -> bool {
                self.scalar_type().is_int()
            }

            #[inline]
            pub fn is_float(&self) -> bool {
                self.scalar_type().is_float()
            }

            #[inline]
            pub fn as_f64_any(&self) -> f64 {
                match *self {
                    $(Self::$variant(x) => scalar_variants!(@to_f64 $variant, x),)*
                }
            }

            /// Integer view of the value; floats truncate toward zero and saturate.
            #[inline]
            pub fn as_i64_any(&self) -> i64 {
                match *self {
                    $(Self::$variant(x) => scalar_variants!(@to_i64 $variant, x),)*
                }
            }

            $(
                paste::paste! {
                    #[inline]
                    pub fn [<as_ $variant:lower>](&self) -> $type {
                        match *self {
                            Self::$variant(x) => x,
                            _ => scalar_variants!(@convert $variant, self),
                        }
                    }
                }
            )*

            /// Converts to the given scalar type.
            pub fn to_scalar_type(&self, scalar_type: ScalarType) -> Self {
                match scalar_type {
                    $(ScalarType::$variant => paste::paste! { Self::$variant(self.[<as_ $variant:lower>]()) },)*
                }
            }
        }

        $(
            impl From<$type> for Scalar {
                #[inline]
                fn from(x: $type) -> Self {
                    Self::$variant(x)
                }
            }
        )*
    };

    (@to_f64 F16, $x:expr) => { $x.to_f64() };
    (@to_f64 $variant:ident, $x:expr) => { $x as f64 };

    (@to_i64 F16, $x:expr) => { $x.to_f64() as i64 };
    (@to_i64 $variant:ident, $x:expr) => { $x as i64 };

    (@convert F16, $s:expr) => { f16::from_f64($s.as_f64_any()) };
    (@convert F32, $s:expr) => { $s.as_f64_any() as f32 };
    (@convert F64, $s:expr) => { $s.as_f64_any() };
    (@convert $variant:ident, $s:expr) => {
        paste::paste! {
            if $s.is_int() {
                $s.as_i64_any() as [<$variant:lower>]
            } else {
                $s.as_f64_any() as [<$variant:lower>]
            }
        }
    };
}

scalar_variants!(U8 => u8, I8 => i8, I16 => i16, I32 => i32, I64 => i64, F16 => f16, F32 => f32, F64 => f64);

impl Scalar {
    #[inline]
    pub fn is_zero(&self) -> bool {
        if self.is_int() {
            self.as_i64_any() == 0
        } else {
            self.as_f64_any() == 0.0
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8(x) => write!(f, "{}", x),
            Self::I8(x) => write!(f, "{}", x),
            Self::I16(x) => write!(f, "{}", x),
            Self::I32(x) => write!(f, "{}", x),
            Self::I64(x) => write!(f, "{}", x),
            Self::F16(x) => write!(f, "{}", x),
            Self::F32(x) => write!(f, "{}", x),
            Self::F64(x) => write!(f, "{}", x),
        }
    }
}
