use crate::{backend::Backend, buffer::Buffer, scalar_type::ScalarType};
use std::ffi::c_void;

pub type BlobDeleter = Box<dyn FnOnce(*mut c_void) + Send + Sync>;

/// Externally owned memory viewed as a buffer. Never copies, never resizes.
pub struct BlobBuffer {
    ptr: *mut c_void,
    len: usize,
    scalar_type: ScalarType,
    backend: Backend,
    deleter: Option<BlobDeleter>,
}

unsafe impl Send for BlobBuffer {}
unsafe impl Sync for BlobBuffer {}

impl BlobBuffer {
    /// # Safety
    /// `ptr` must stay valid for reads and writes of `len` elements of `scalar_type`,
    /// suitably aligned, for as long as the buffer (and every storage sharing it) lives.
    pub unsafe fn new(ptr: *mut c_void, len: usize, scalar_type: ScalarType, backend: Backend) -> Self {
        Self {
            ptr,
            len,
            scalar_type,
            backend,
            deleter: None,
        }
    }

    /// Same as [`BlobBuffer::new`], running `deleter` on the pointer when the buffer drops.
    ///
    /// # Safety
    /// See [`BlobBuffer::new`].
    pub unsafe fn with_deleter(ptr: *mut c_void, len: usize, scalar_type: ScalarType, backend: Backend, deleter: BlobDeleter) -> Self {
        Self {
            ptr,
            len,
            scalar_type,
            backend,
            deleter: Some(deleter),
        }
    }
}

impl Buffer for BlobBuffer {
    fn as_ptr(&self) -> *const c_void {
        self.ptr as *const _
    }

    fn as_mut_ptr(&mut self) -> *mut c_void {
        self.ptr
    }

    fn len(&self) -> usize {
        self.len
    }

    fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    fn backend(&self) -> Backend {
        self.backend
    }
}

impl Drop for BlobBuffer {
    fn drop(&mut self) {
        if let Some(deleter) = self.deleter.take() {
            deleter(self.ptr);
        }
    }
}
