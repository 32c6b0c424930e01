use crate::{storage::Storage, Generator, Type};
use dispatchx_core::{
    backend::Backend,
    error::{Error, Result},
    layout::Layout,
    scalar::Scalar,
    scalar_type::{Element, ScalarType},
};
use dispatchx_cpu::utils::get_strided_index;
use std::fmt;

/// Strided view of a [`Storage`] tagged with its dispatch descriptor.
///
/// Cloning a tensor shares its storage. A zero-dimensional tensor holds one element.
#[derive(Clone)]
pub struct Tensor {
    ty: &'static dyn Type,
    storage: Storage,
    layout: Layout,
}

impl Tensor {
    /// Assembles a tensor, checking that `storage` matches `ty` and covers `layout`.
    pub fn from_parts(ty: &'static dyn Type, storage: Storage, layout: Layout) -> Result<Self> {
        if storage.scalar_type() != ty.scalar_type() {
            return Err(Error::ScalarTypeMismatch {
                expected: ty.scalar_type(),
                got: storage.scalar_type(),
            });
        }
        if storage.backend() != ty.backend().to_dense() {
            return Err(Error::BackendMismatch {
                expected: ty.backend().to_dense(),
                got: storage.backend(),
            });
        }

        check_fits(&layout, storage.size()?)?;
        Ok(Self { ty, storage, layout })
    }

    pub(crate) fn new_contiguous(ty: &'static dyn Type, sizes: &[usize]) -> Result<Self> {
        Layout::check_shape(sizes)?;
        let layout = Layout::from_shape(sizes);
        let storage = ty.storage_with_size(layout.size())?;
        Ok(Self { ty, storage, layout })
    }

    // descriptor

    pub fn ty(&self) -> &'static dyn Type {
        self.ty
    }

    pub fn backend(&self) -> Backend {
        self.ty.backend()
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.ty.scalar_type()
    }

    // layout

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sizes(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    pub fn dim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn numel(&self) -> usize {
        self.layout.size()
    }

    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Checks the layout against a buffer of `len` elements. Storages can be resized after the
    /// tensor was built, so kernels call this under the buffer lock.
    pub(crate) fn check_span(&self, len: usize) -> Result<()> {
        check_fits(&self.layout, len)
    }

    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Self> {
        let mut tensor = self.clone();
        tensor.layout.transpose(dim0, dim1)?;
        Ok(tensor)
    }

    pub fn view(&self, sizes: &[usize]) -> Result<Self> {
        let mut tensor = self.clone();
        tensor.layout.view(sizes)?;
        Ok(tensor)
    }

    pub fn contiguous(&self) -> Result<Self> {
        if self.is_contiguous() {
            Ok(self.clone())
        } else {
            self.ty.copy(self)
        }
    }

    // elements

    pub fn get(&self, indices: &[usize]) -> Result<Scalar> {
        let offset = self.layout.index_offset(indices)?;
        self.storage.get(offset)
    }

    pub fn set(&mut self, indices: &[usize], value: impl Into<Scalar>) -> Result<()> {
        let offset = self.layout.index_offset(indices)?;
        self.storage.set(offset, value)
    }

    pub fn item(&self) -> Result<Scalar> {
        if self.numel() != 1 {
            return Err(Error::InvalidArgument(format!(
                "item() can only be called on a tensor with a single element, but got tensor with {} elements",
                self.numel()
            )));
        }

        let indices = vec![0; self.dim()];
        self.get(&indices)
    }

    /// Elements in logical (row-major) order, converted to `T`.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        let numel = self.numel();
        let dims = self.sizes();
        let strides = self.strides();
        let buffer = self.storage.read()?;

        (0..numel)
            .map(|i| {
                let index = self.offset() + get_strided_index(i, dims.len(), dims, strides);
                buffer.read_scalar(index).map(T::from_scalar)
            })
            .collect()
    }

    // dispatch

    pub fn copy_(&mut self, src: &Tensor) -> Result<()> {
        let ty = self.ty;
        ty.copy_(src, self)
    }

    pub fn to_type(&self, ty: &'static dyn Type) -> Result<Self> {
        if *ty == *self.ty {
            return Ok(self.clone());
        }
        ty.copy(self)
    }

    pub fn to_backend(&self, backend: Backend) -> Result<Self> {
        self.to_type(self.ty.to_backend(backend)?)
    }

    pub fn to_scalar_type(&self, scalar_type: ScalarType) -> Result<Self> {
        self.to_type(self.ty.to_scalar_type(scalar_type)?)
    }

    pub fn fill_(&mut self, value: impl Into<Scalar>) -> Result<()> {
        let ty = self.ty;
        ty.fill_(self, value.into())
    }

    pub fn zero_(&mut self) -> Result<()> {
        let ty = self.ty;
        ty.zero_(self)
    }

    pub fn add(&self, rhs: &Tensor) -> Result<Self> {
        self.ty.add(self, rhs)
    }

    pub fn sub(&self, rhs: &Tensor) -> Result<Self> {
        self.ty.sub(self, rhs)
    }

    pub fn mul(&self, rhs: &Tensor) -> Result<Self> {
        self.ty.mul(self, rhs)
    }

    pub fn div(&self, rhs: &Tensor) -> Result<Self> {
        self.ty.div(self, rhs)
    }

    pub fn neg(&self) -> Result<Self> {
        self.ty.neg(self)
    }

    pub fn sum(&self) -> Result<Scalar> {
        self.ty.sum(self)
    }

    pub fn uniform_(&mut self, from: f64, to: f64, generator: Option<&mut dyn Generator>) -> Result<()> {
        let ty = self.ty;
        ty.uniform_(self, from, to, generator)
    }

    pub fn normal_(&mut self, mean: f64, std: f64, generator: Option<&mut dyn Generator>) -> Result<()> {
        let ty = self.ty;
        ty.normal_(self, mean, std, generator)
    }
}

fn check_fits(layout: &Layout, available: usize) -> Result<()> {
    let end = layout.storage_end()?;
    if end > available {
        return Err(Error::InvalidArgument(format!(
            "layout needs {} elements from offset {}, storage holds {}",
            end - layout.offset(),
            layout.offset(),
            available
        )));
    }
    Ok(())
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("type", &self.ty.name())
            .field("sizes", &self.sizes())
            .field("strides", &self.strides())
            .field("offset", &self.offset())
            .finish()
    }
}
