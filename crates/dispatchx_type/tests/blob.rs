mod utils;

use dispatchx_core::{
    backend::Backend,
    error::{Error, Result},
    scalar::Scalar,
    scalar_type::ScalarType,
};
use dispatchx_type::{cpu, get_type};
use std::{
    ffi::c_void,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

#[test]
fn tensor_from_blob_views_external_memory() -> Result<()> {
    let mut data = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let ptr = data.as_mut_ptr() as *mut c_void;

    let mut tensor = unsafe { cpu(ScalarType::F32)?.tensor_from_blob(ptr, &[2, 3])? };
    assert_eq!(tensor.sizes(), &[2, 3]);
    assert_eq!(tensor.strides(), &[3, 1]);
    assert_eq!(tensor.to_vec::<f32>()?, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(tensor.storage().data_ptr()?, ptr as *const c_void);
    assert!(!tensor.storage().is_resizable()?);
    assert!(matches!(tensor.storage().resize(10), Err(Error::StorageNotResizable)));

    tensor.set(&[1, 2], 60.0f32)?;
    drop(tensor);
    assert_eq!(data[5], 60.0);
    Ok(())
}

#[test]
fn tensor_from_blob_with_strides() -> Result<()> {
    let mut data = vec![0i32, 1, 2, 3, 4, 5];
    let ptr = data.as_mut_ptr() as *mut c_void;

    let tensor = unsafe { cpu(ScalarType::I32)?.tensor_from_blob_with_strides(ptr, &[2, 2], &[3, 1])? };
    assert_eq!(tensor.storage().size()?, 5);
    assert!(!tensor.is_contiguous());
    assert_eq!(tensor.to_vec::<i32>()?, vec![0, 1, 3, 4]);

    let column = unsafe { cpu(ScalarType::I32)?.tensor_from_blob_with_strides(ptr, &[3], &[2])? };
    assert_eq!(column.to_vec::<i32>()?, vec![0, 2, 4]);
    drop(column);
    drop(tensor);
    assert_eq!(data.len(), 6);
    Ok(())
}

#[test]
fn tensor_from_blob_empty_sizes() -> Result<()> {
    let mut data = [0u8; 1];
    let tensor = unsafe { cpu(ScalarType::U8)?.tensor_from_blob_with_strides(data.as_mut_ptr() as *mut c_void, &[4, 0], &[1, 1])? };
    assert_eq!(tensor.numel(), 0);
    assert_eq!(tensor.storage().size()?, 0);
    Ok(())
}

#[test]
fn tensor_from_blob_rejects_mismatched_strides() -> Result<()> {
    let mut data = [0f64; 4];
    let result = unsafe { cpu(ScalarType::F64)?.tensor_from_blob_with_strides(data.as_mut_ptr() as *mut c_void, &[2, 2], &[1]) };
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    Ok(())
}

#[test]
fn sparse_tensor_from_blob_not_implemented() -> Result<()> {
    let mut data = [0f32; 4];
    let sparse = get_type(Backend::SparseCPU, ScalarType::F32)?;
    let result = unsafe { sparse.tensor_from_blob(data.as_mut_ptr() as *mut c_void, &[4]) };
    assert!(matches!(result, Err(Error::NotImplemented { .. })));
    Ok(())
}

#[test]
fn deleter_runs_when_last_storage_drops() -> Result<()> {
    let data = Box::into_raw(vec![7i16; 3].into_boxed_slice()) as *mut i16;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let storage = unsafe {
        cpu(ScalarType::I16)?.storage_from_blob_with_deleter(
            data as *mut c_void,
            3,
            Box::new(move |ptr| {
                drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr as *mut i16, 3)));
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )?
    };
    assert_eq!(storage.get(2)?, Scalar::I16(7));

    let tensor = cpu(ScalarType::I16)?.tensor_from_storage(storage.clone(), 0, &[3], &[1])?;
    drop(storage);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(tensor.sum()?, Scalar::I64(21));

    drop(tensor);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn tensor_from_storage_validates() -> Result<()> {
    let storage = cpu(ScalarType::F32)?.storage_with_size(6)?;

    let view = cpu(ScalarType::F32)?.tensor_from_storage(storage.clone(), 2, &[2, 2], &[2, 1])?;
    assert_eq!(view.offset(), 2);
    assert!(view.storage().ptr_eq(&storage));

    assert!(matches!(
        cpu(ScalarType::F32)?.tensor_from_storage(storage.clone(), 3, &[2, 2], &[2, 1]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        cpu(ScalarType::F64)?.tensor_from_storage(storage.clone(), 0, &[2], &[1]),
        Err(Error::ScalarTypeMismatch { expected: ScalarType::F64, got: ScalarType::F32 })
    ));
    assert!(matches!(
        get_type(Backend::SparseCPU, ScalarType::F32)?.tensor_from_storage(storage, 0, &[2], &[1]),
        Err(Error::NotImplemented { .. })
    ));
    Ok(())
}
