pub mod blob;
pub mod cpu;

use crate::{
    backend::Backend,
    error::{Error, Result},
    scalar::Scalar,
    scalar_type::ScalarType,
};
use cpu::CpuBuffer;
use std::ffi::c_void;

pub struct BufferManager {}

impl BufferManager {
    /// Allocates a zeroed buffer of `size` elements for the backend's device memory.
    pub fn create(size: usize, backend: Backend, scalar_type: ScalarType) -> Result<Box<dyn Buffer>> {
        let buffer: Box<dyn Buffer> = match backend {
            Backend::CPU | Backend::SparseCPU => Box::new(CpuBuffer::new(size, scalar_type)?),
            Backend::CUDA | Backend::SparseCUDA => return Err(Error::BackendUnavailable(backend)),
        };

        tracing::trace!(size, backend = backend.name(), scalar_type = scalar_type.as_str(), "allocated buffer");

        Ok(buffer)
    }
}

pub trait Buffer: Send + Sync {
    fn as_ptr(&self) -> *const c_void;
    fn as_mut_ptr(&mut self) -> *mut c_void;
    /// Length in elements.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn scalar_type(&self) -> ScalarType;
    fn backend(&self) -> Backend;

    fn is_resizable(&self) -> bool {
        false
    }

    fn resize(&mut self, _size: usize) -> Result<()> {
        Err(Error::StorageNotResizable)
    }

    fn size_in_bytes(&self) -> usize {
        self.len() * self.scalar_type().size_in_bytes()
    }

    /// # Safety
    /// Requires a valid source pointer for `size_in_bytes` bytes with no memory overlap
    unsafe fn copy_from_host(&mut self, src: *const c_void, size_in_bytes: usize, dst_offset: usize) -> Result<()> {
        let elem = self.scalar_type().size_in_bytes();
        if dst_offset * elem + size_in_bytes > self.size_in_bytes() {
            return Err(Error::InvalidArgument(format!(
                "copy_from_host: {} bytes at element {} exceed buffer of {} bytes",
                size_in_bytes,
                dst_offset,
                self.size_in_bytes()
            )));
        }
        if size_in_bytes == 0 {
            return Ok(());
        }
        let dst = (self.as_mut_ptr() as *mut u8).add(dst_offset * elem);
        std::ptr::copy_nonoverlapping(src as *const u8, dst, size_in_bytes);
        Ok(())
    }

    /// # Safety
    /// Requires a valid destination pointer for `size_in_bytes` bytes with no memory overlap
    unsafe fn copy_to_host(&self, dest: *mut c_void, size_in_bytes: usize, src_offset: usize) -> Result<()> {
        let elem = self.scalar_type().size_in_bytes();
        if src_offset * elem + size_in_bytes > self.size_in_bytes() {
            return Err(Error::InvalidArgument(format!(
                "copy_to_host: requested {} bytes at element {}, available {}",
                size_in_bytes,
                src_offset,
                self.size_in_bytes()
            )));
        }
        if size_in_bytes == 0 {
            return Ok(());
        }
        let src = (self.as_ptr() as *const u8).add(src_offset * elem);
        std::ptr::copy_nonoverlapping(src, dest as *mut u8, size_in_bytes);
        Ok(())
    }

    fn read_scalar(&self, index: usize) -> Result<Scalar> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds { index, size: self.len() });
        }
        let scalar_type = self.scalar_type();
        unsafe {
            let ptr = (self.as_ptr() as *const u8).add(index * scalar_type.size_in_bytes());
            Ok(scalar_type.read_scalar(ptr))
        }
    }

    fn write_scalar(&mut self, index: usize, value: Scalar) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds { index, size: self.len() });
        }
        let scalar_type = self.scalar_type();
        unsafe {
            let ptr = (self.as_mut_ptr() as *mut u8).add(index * scalar_type.size_in_bytes());
            scalar_type.write_scalar(ptr, value);
        }
        Ok(())
    }
}
