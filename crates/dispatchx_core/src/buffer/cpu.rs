use crate::{
    backend::Backend,
    buffer::Buffer,
    error::{Error, Result},
    scalar_type::ScalarType,
};
use std::ffi::c_void;

/// Host buffer backed by `u64` words so every scalar type is properly aligned.
pub struct CpuBuffer {
    data: Vec<u64>,
    len: usize,
    scalar_type: ScalarType,
}

impl CpuBuffer {
    pub fn new(size: usize, scalar_type: ScalarType) -> Result<Self> {
        let words = Self::words_for(size, scalar_type)?;
        Ok(Self {
            data: vec![0; words],
            len: size,
            scalar_type,
        })
    }

    fn words_for(size: usize, scalar_type: ScalarType) -> Result<usize> {
        let total_size = size
            .checked_mul(scalar_type.size_in_bytes())
            .ok_or_else(|| Error::InvalidArgument("Overflow in allocation".into()))?;
        Ok(total_size.div_ceil(std::mem::size_of::<u64>()))
    }
}

impl Buffer for CpuBuffer {
    fn as_ptr(&self) -> *const c_void {
        self.data.as_ptr() as *const _
    }

    fn as_mut_ptr(&mut self) -> *mut c_void {
        self.data.as_mut_ptr() as *mut _
    }

    fn len(&self) -> usize {
        self.len
    }

    fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    fn backend(&self) -> Backend {
        Backend::CPU
    }

    fn is_resizable(&self) -> bool {
        true
    }

    fn resize(&mut self, size: usize) -> Result<()> {
        let words = Self::words_for(size, self.scalar_type)?;
        if size < self.len {
            // zero the dropped tail so a later grow reads zeros
            let elem = self.scalar_type.size_in_bytes();
            let bytes = unsafe { std::slice::from_raw_parts_mut(self.data.as_mut_ptr() as *mut u8, self.data.len() * std::mem::size_of::<u64>()) };
            bytes[size * elem..].fill(0);
        }
        self.data.resize(words, 0);
        self.len = size;
        Ok(())
    }
}
