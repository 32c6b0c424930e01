mod context;
mod cpu;
mod dispatch;
mod generator;
mod sparse;
mod storage;
mod tensor;
mod type_id;

pub use context::{global_context, Context};
pub use cpu::*;
pub use dispatch::{OpKernel, OpRegistry};
pub use generator::{CpuGenerator, Generator};
pub use sparse::*;
pub use storage::Storage;
pub use tensor::Tensor;
pub use type_id::TypeId;

use dispatchx_core::{
    backend::{get_default_backend, Backend},
    buffer::blob::BlobDeleter,
    error::{Error, Result},
    layout::Layout,
    scalar::Scalar,
    scalar_type::{get_default_scalar_type, Element, ScalarType},
};
use std::{ffi::c_void, fmt};

/// Dispatch descriptor for one (backend, scalar type) pair.
///
/// Every registered descriptor is a `&'static dyn Type` owned by the global [`Context`].
/// Tensors carry their descriptor and route operations through it, so a caller never
/// matches on backend or scalar type itself.
///
/// Operations a descriptor does not support return [`Error::NotImplemented`].
pub trait Type: Send + Sync + 'static {
    fn scalar_type(&self) -> ScalarType;
    fn backend(&self) -> Backend;

    fn is_cuda(&self) -> bool {
        self.backend().is_cuda()
    }

    fn is_sparse(&self) -> bool {
        self.backend().is_sparse()
    }

    fn is_distributed(&self) -> bool {
        false
    }

    /// Contiguous identifier, unique among all descriptors.
    fn id(&self) -> TypeId;

    /// Descriptor name, e.g. `CPUFloatType`.
    fn name(&self) -> &'static str;

    fn element_size_in_bytes(&self) -> usize {
        self.scalar_type().size_in_bytes()
    }

    /// Empty storage for this backend and scalar type.
    fn storage(&self) -> Result<Storage> {
        self.storage_with_size(0)
    }

    /// Zero-initialised storage of `size` elements.
    fn storage_with_size(&self, size: usize) -> Result<Storage>;

    /// Wraps `size` elements at `data` without copying or taking ownership.
    ///
    /// # Safety
    /// `data` must stay valid and aligned for `size` elements of this scalar type while the storage lives.
    unsafe fn storage_from_blob(&self, data: *mut c_void, size: usize) -> Result<Storage>;

    /// Same as [`Type::storage_from_blob`], running `deleter` when the last storage handle drops.
    ///
    /// # Safety
    /// See [`Type::storage_from_blob`].
    unsafe fn storage_from_blob_with_deleter(&self, data: *mut c_void, size: usize, deleter: BlobDeleter) -> Result<Storage>;

    /// A fresh generator for this backend.
    fn generator(&self) -> Result<Box<dyn Generator>>;

    /// Copies `src` into `dst`, converting scalar types. `dst` must be of this type and
    /// hold as many elements as `src`.
    fn copy_(&self, src: &Tensor, dst: &mut Tensor) -> Result<()>;

    fn fill_(&self, _tensor: &mut Tensor, _value: Scalar) -> Result<()> {
        Err(not_implemented("fill_", self.name()))
    }

    fn zero_(&self, tensor: &mut Tensor) -> Result<()> {
        self.fill_(tensor, Scalar::I64(0))
    }

    fn add(&self, _lhs: &Tensor, _rhs: &Tensor) -> Result<Tensor> {
        Err(not_implemented("add", self.name()))
    }

    fn sub(&self, _lhs: &Tensor, _rhs: &Tensor) -> Result<Tensor> {
        Err(not_implemented("sub", self.name()))
    }

    fn mul(&self, _lhs: &Tensor, _rhs: &Tensor) -> Result<Tensor> {
        Err(not_implemented("mul", self.name()))
    }

    fn div(&self, _lhs: &Tensor, _rhs: &Tensor) -> Result<Tensor> {
        Err(not_implemented("div", self.name()))
    }

    fn neg(&self, _tensor: &Tensor) -> Result<Tensor> {
        Err(not_implemented("neg", self.name()))
    }

    /// Sum of all elements; floating types accumulate in `F64`, integral types in `I64`.
    fn sum(&self, _tensor: &Tensor) -> Result<Scalar> {
        Err(not_implemented("sum", self.name()))
    }

    /// Fills with samples from `[from, to)`; draws that round up to `to` in a narrow float type
    /// are stored as the largest value below it. Without a generator the global context default
    /// is used.
    fn uniform_(&self, _tensor: &mut Tensor, _from: f64, _to: f64, _generator: Option<&mut dyn Generator>) -> Result<()> {
        Err(not_implemented("uniform_", self.name()))
    }

    fn normal_(&self, _tensor: &mut Tensor, _mean: f64, _std: f64, _generator: Option<&mut dyn Generator>) -> Result<()> {
        Err(not_implemented("normal_", self.name()))
    }
}

pub(crate) fn not_implemented(op: &str, type_name: &str) -> Error {
    Error::NotImplemented {
        op: op.to_string(),
        type_name: type_name.to_string(),
    }
}

impl dyn Type {
    /// The descriptor with the same scalar type on `backend`, looked up in [`global_context`].
    /// Descriptors of a separately built [`Context`] resolve through [`Context::to_backend`].
    pub fn to_backend(&self, backend: Backend) -> Result<&'static dyn Type> {
        global_context().get_type(backend, self.scalar_type())
    }

    /// The descriptor with the same backend and `scalar_type`, looked up in [`global_context`].
    /// Descriptors of a separately built [`Context`] resolve through [`Context::to_scalar_type`].
    pub fn to_scalar_type(&self, scalar_type: ScalarType) -> Result<&'static dyn Type> {
        global_context().get_type(self.backend(), scalar_type)
    }

    /// New tensor of this type holding a converted copy of `src`.
    pub fn copy(&'static self, src: &Tensor) -> Result<Tensor> {
        let mut dst = self.tensor(src.sizes())?;
        self.copy_(src, &mut dst)?;
        Ok(dst)
    }

    /// Zero-filled contiguous tensor.
    pub fn tensor(&'static self, sizes: &[usize]) -> Result<Tensor> {
        if self.is_sparse() {
            return Err(not_implemented("tensor", self.name()));
        }
        Tensor::new_contiguous(self, sizes)
    }

    pub fn ones(&'static self, sizes: &[usize]) -> Result<Tensor> {
        let mut tensor = self.tensor(sizes)?;
        self.fill_(&mut tensor, Scalar::I64(1))?;
        Ok(tensor)
    }

    /// Contiguous tensor built from `data`, converting each element to this scalar type.
    pub fn tensor_from_data<T: Element>(&'static self, data: &[T], sizes: &[usize]) -> Result<Tensor> {
        Layout::check_shape(sizes)?;
        let numel = Layout::compute_size(sizes);
        if data.len() != numel {
            return Err(Error::ShapeMismatch {
                expected: numel,
                got: data.len(),
                msg: "tensor_from_data".into(),
            });
        }

        let tensor = self.tensor(sizes)?;
        {
            let mut buffer = tensor.storage().write()?;
            for (index, value) in data.iter().enumerate() {
                buffer.write_scalar(index, value.into_scalar())?;
            }
        }
        Ok(tensor)
    }

    /// Wraps external contiguous memory as a tensor without copying.
    ///
    /// # Safety
    /// `data` must stay valid and aligned for every element addressed by `sizes` while the tensor
    /// (or any view of it) lives.
    pub unsafe fn tensor_from_blob(&'static self, data: *mut c_void, sizes: &[usize]) -> Result<Tensor> {
        Layout::check_shape(sizes)?;
        self.tensor_from_blob_with_strides(data, sizes, &Layout::compute_strides(sizes))
    }

    /// Wraps external strided memory as a tensor without copying.
    ///
    /// # Safety
    /// See [`tensor_from_blob`](Self::tensor_from_blob).
    pub unsafe fn tensor_from_blob_with_strides(&'static self, data: *mut c_void, sizes: &[usize], strides: &[usize]) -> Result<Tensor> {
        if sizes.len() != strides.len() {
            return Err(Error::InvalidArgument(format!(
                "tensor_from_blob: {} sizes but {} strides",
                sizes.len(),
                strides.len()
            )));
        }
        if self.is_sparse() {
            return Err(not_implemented("tensor_from_blob", self.name()));
        }

        let size = Layout::compute_storage_size(sizes, strides)?;
        let storage = self.storage_from_blob(data, size)?;
        Tensor::from_parts(self, storage, Layout::new(sizes, strides, 0)?)
    }

    /// Tensor viewing an existing storage, which stays shared with its other holders.
    pub fn tensor_from_storage(&'static self, storage: Storage, offset: usize, sizes: &[usize], strides: &[usize]) -> Result<Tensor> {
        if self.is_sparse() {
            return Err(not_implemented("tensor_from_storage", self.name()));
        }
        Tensor::from_parts(self, storage, Layout::new(sizes, strides, offset)?)
    }

    /// Zero-dimensional tensor holding `value` converted to this scalar type.
    pub fn scalar_tensor(&'static self, value: Scalar) -> Result<Tensor> {
        let mut tensor = self.tensor(&[])?;
        self.fill_(&mut tensor, value)?;
        Ok(tensor)
    }
}

impl PartialEq for dyn Type {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for dyn Type {}

impl fmt::Display for dyn Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for dyn Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn get_type(backend: Backend, scalar_type: ScalarType) -> Result<&'static dyn Type> {
    global_context().get_type(backend, scalar_type)
}

pub fn cpu(scalar_type: ScalarType) -> Result<&'static dyn Type> {
    get_type(Backend::CPU, scalar_type)
}

/// Descriptor for the thread's default backend and scalar type.
pub fn default_type() -> Result<&'static dyn Type> {
    get_type(get_default_backend(), get_default_scalar_type())
}
