#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    CPU,
    CUDA,
    SparseCPU,
    SparseCUDA,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::CPU, Backend::CUDA, Backend::SparseCPU, Backend::SparseCUDA];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CPU => "CPU",
            Self::CUDA => "CUDA",
            Self::SparseCPU => "SparseCPU",
            Self::SparseCUDA => "SparseCUDA",
        }
    }

    pub fn is_cuda(&self) -> bool {
        matches!(self, Self::CUDA | Self::SparseCUDA)
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::SparseCPU | Self::SparseCUDA)
    }

    /// The dense backend holding the same device memory.
    pub fn to_dense(&self) -> Backend {
        match self {
            Self::CPU | Self::SparseCPU => Self::CPU,
            Self::CUDA | Self::SparseCUDA => Self::CUDA,
        }
    }

    pub fn to_sparse(&self) -> Backend {
        match self {
            Self::CPU | Self::SparseCPU => Self::SparseCPU,
            Self::CUDA | Self::SparseCUDA => Self::SparseCUDA,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

thread_local! {
    static DEFAULT_BACKEND: std::cell::Cell<Backend> = const { std::cell::Cell::new(Backend::CPU) };
}

pub fn get_default_backend() -> Backend {
    DEFAULT_BACKEND.with(|b| b.get())
}

pub fn set_default_backend(backend: Backend) {
    DEFAULT_BACKEND.with(|b| b.set(backend));
}
