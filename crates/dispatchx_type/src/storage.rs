use dispatchx_core::{
    backend::Backend,
    buffer::{
        blob::{BlobBuffer, BlobDeleter},
        Buffer, BufferManager,
    },
    error::{Error, Result},
    scalar::Scalar,
    scalar_type::ScalarType,
};
use std::{
    ffi::c_void,
    fmt,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Shared memory buffer bound to one (backend, scalar type). Clones share the buffer.
#[derive(Clone)]
pub struct Storage {
    buffer: Arc<RwLock<Box<dyn Buffer>>>,
    scalar_type: ScalarType,
    backend: Backend,
}

impl Storage {
    pub fn new(buffer: Box<dyn Buffer>) -> Self {
        let scalar_type = buffer.scalar_type();
        let backend = buffer.backend();
        Self {
            buffer: Arc::new(RwLock::new(buffer)),
            scalar_type,
            backend,
        }
    }

    pub fn allocate(size: usize, backend: Backend, scalar_type: ScalarType) -> Result<Self> {
        Ok(Self::new(BufferManager::create(size, backend, scalar_type)?))
    }

    /// # Safety
    /// `data` must stay valid and aligned for `size` elements of `scalar_type` while the storage lives.
    pub unsafe fn from_blob(data: *mut c_void, size: usize, scalar_type: ScalarType, backend: Backend) -> Self {
        tracing::trace!(size, backend = backend.name(), scalar_type = scalar_type.as_str(), "wrapping blob");
        Self::new(Box::new(BlobBuffer::new(data, size, scalar_type, backend)))
    }

    /// # Safety
    /// See [`Storage::from_blob`]. `deleter` runs once the last clone of the storage drops.
    pub unsafe fn from_blob_with_deleter(
        data: *mut c_void,
        size: usize,
        scalar_type: ScalarType,
        backend: Backend,
        deleter: BlobDeleter,
    ) -> Self {
        tracing::trace!(size, backend = backend.name(), scalar_type = scalar_type.as_str(), "wrapping blob with deleter");
        Self::new(Box::new(BlobBuffer::with_deleter(data, size, scalar_type, backend, deleter)))
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Box<dyn Buffer>>> {
        self.buffer.read().map_err(|_| Error::Lock)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Box<dyn Buffer>>> {
        self.buffer.write().map_err(|_| Error::Lock)
    }

    /// Size in elements.
    pub fn size(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_resizable(&self) -> Result<bool> {
        Ok(self.read()?.is_resizable())
    }

    pub fn data_ptr(&self) -> Result<*const c_void> {
        Ok(self.read()?.as_ptr())
    }

    pub fn get(&self, index: usize) -> Result<Scalar> {
        self.read()?.read_scalar(index)
    }

    pub fn set(&self, index: usize, value: impl Into<Scalar>) -> Result<()> {
        self.write()?.write_scalar(index, value.into())
    }

    pub fn fill(&self, value: impl Into<Scalar>) -> Result<()> {
        let value = value.into();
        let mut buffer = self.write()?;
        for index in 0..buffer.len() {
            buffer.write_scalar(index, value)?;
        }
        Ok(())
    }

    /// Resizes owned storage, keeping the common prefix and zero-filling growth.
    pub fn resize(&self, size: usize) -> Result<()> {
        self.write()?.resize(size)
    }

    pub fn use_count(&self) -> usize {
        Arc::strong_count(&self.buffer)
    }

    pub fn ptr_eq(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("backend", &self.backend)
            .field("scalar_type", &self.scalar_type)
            .field("size", &self.size().ok())
            .finish()
    }
}
