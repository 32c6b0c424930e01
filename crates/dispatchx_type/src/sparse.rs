use crate::{not_implemented, CpuGenerator, Generator, Storage, Tensor, Type, TypeId};
use dispatchx_core::{backend::Backend, buffer::blob::BlobDeleter, error::Result, scalar_type::ScalarType};
use std::ffi::c_void;

// Sparse descriptors only describe the value storage, which lives in dense CPU memory.
// Tensor construction and kernels are left to the defaults.
macro_rules! declare_sparse_cpu_types {
    ($($name:ident => $variant:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[derive(Debug, Default)]
                pub struct [<SparseCPU $name Type>];

                impl Type for [<SparseCPU $name Type>] {
                    fn scalar_type(&self) -> ScalarType {
                        ScalarType::$variant
                    }

                    fn backend(&self) -> Backend {
                        Backend::SparseCPU
                    }

                    fn id(&self) -> TypeId {
                        TypeId::[<SparseCPU $name>]
                    }

                    fn name(&self) -> &'static str {
                        concat!("SparseCPU", stringify!($name), "Type")
                    }

                    fn storage_with_size(&self, size: usize) -> Result<Storage> {
                        Storage::allocate(size, Backend::CPU, ScalarType::$variant)
                    }

                    unsafe fn storage_from_blob(&self, data: *mut c_void, size: usize) -> Result<Storage> {
                        Ok(Storage::from_blob(data, size, ScalarType::$variant, Backend::CPU))
                    }

                    unsafe fn storage_from_blob_with_deleter(&self, data: *mut c_void, size: usize, deleter: BlobDeleter) -> Result<Storage> {
                        Ok(Storage::from_blob_with_deleter(data, size, ScalarType::$variant, Backend::CPU, deleter))
                    }

                    fn generator(&self) -> Result<Box<dyn Generator>> {
                        Ok(Box::new(CpuGenerator::new()))
                    }

                    fn copy_(&self, _src: &Tensor, _dst: &mut Tensor) -> Result<()> {
                        Err(not_implemented("copy_", self.name()))
                    }
                }
            )*

            pub(crate) fn sparse_cpu_types() -> Vec<Box<dyn Type>> {
                vec![$(Box::new([<SparseCPU $name Type>]),)*]
            }
        }
    };
}

declare_sparse_cpu_types!(
    Byte => U8,
    Char => I8,
    Short => I16,
    Int => I32,
    Long => I64,
    Float => F32,
    Double => F64,
);
