use dispatchx_core::{backend::Backend, scalar_type::ScalarType};

macro_rules! declare_type_ids {
    ($($id:ident => ($backend:ident, $scalar:ident)),* $(,)?) => {
        /// Contiguous identifiers for every descriptor in the system, for external dispatch.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(usize)]
        pub enum TypeId {
            $($id,)*
        }

        impl TypeId {
            pub const ALL: &'static [TypeId] = &[$(TypeId::$id,)*];
            pub const NUM_OPTIONS: usize = Self::ALL.len();

            #[inline]
            pub fn index(&self) -> usize {
                *self as usize
            }

            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            pub fn backend(&self) -> Backend {
                match self {
                    $(Self::$id => Backend::$backend,)*
                }
            }

            pub fn scalar_type(&self) -> ScalarType {
                match self {
                    $(Self::$id => ScalarType::$scalar,)*
                }
            }

            pub fn from_parts(backend: Backend, scalar_type: ScalarType) -> Option<Self> {
                match (backend, scalar_type) {
                    $((Backend::$backend, ScalarType::$scalar) => Some(Self::$id),)*
                    _ => None,
                }
            }
        }
    };
}

declare_type_ids!(
    CPUByte => (CPU, U8),
    CPUChar => (CPU, I8),
    CPUShort => (CPU, I16),
    CPUInt => (CPU, I32),
    CPULong => (CPU, I64),
    CPUHalf => (CPU, F16),
    CPUFloat => (CPU, F32),
    CPUDouble => (CPU, F64),
    CUDAByte => (CUDA, U8),
    CUDAChar => (CUDA, I8),
    CUDAShort => (CUDA, I16),
    CUDAInt => (CUDA, I32),
    CUDALong => (CUDA, I64),
    CUDAHalf => (CUDA, F16),
    CUDAFloat => (CUDA, F32),
    CUDADouble => (CUDA, F64),
    SparseCPUByte => (SparseCPU, U8),
    SparseCPUChar => (SparseCPU, I8),
    SparseCPUShort => (SparseCPU, I16),
    SparseCPUInt => (SparseCPU, I32),
    SparseCPULong => (SparseCPU, I64),
    SparseCPUFloat => (SparseCPU, F32),
    SparseCPUDouble => (SparseCPU, F64),
    SparseCUDAByte => (SparseCUDA, U8),
    SparseCUDAChar => (SparseCUDA, I8),
    SparseCUDAShort => (SparseCUDA, I16),
    SparseCUDAInt => (SparseCUDA, I32),
    SparseCUDALong => (SparseCUDA, I64),
    SparseCUDAFloat => (SparseCUDA, F32),
    SparseCUDADouble => (SparseCUDA, F64),
);

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.backend().name(), self.scalar_type().name())
    }
}
