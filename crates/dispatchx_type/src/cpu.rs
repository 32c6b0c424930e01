use crate::{global_context, CpuGenerator, Generator, Storage, Tensor, Type, TypeId};
use dispatchx_core::{
    backend::Backend,
    buffer::blob::BlobDeleter,
    error::{Error, Result},
    layout::Layout,
    scalar::Scalar,
    scalar_type::{Element, ScalarType},
};
use dispatchx_cpu::ops::{
    binary::*,
    cast::{copy_cast, CastFrom, CastFromAll},
    fill::*,
    reduction::*,
    unary::*,
};
use half::f16;
use std::ffi::c_void;

type BinaryKernel<T> = unsafe fn(usize, usize, *const usize, *const T, *const T, *mut T);
type UnaryKernel<T> = unsafe fn(usize, usize, *const usize, *const T, *mut T);
type FillKernel<T> = unsafe fn(usize, usize, *const usize, *mut T, T);
type SumKernel<T, A> = unsafe fn(usize, usize, *const usize, *const T) -> A;

fn expect_type(ty: &dyn Type, tensor: &Tensor) -> Result<()> {
    if tensor.ty().id() != ty.id() {
        return Err(Error::TypeMismatch {
            expected: ty.name().to_string(),
            got: tensor.ty().name().to_string(),
        });
    }
    Ok(())
}

fn expect_binary(ty: &dyn Type, lhs: &Tensor, rhs: &Tensor) -> Result<()> {
    expect_type(ty, lhs)?;
    expect_type(ty, rhs)?;
    if lhs.sizes() != rhs.sizes() {
        return Err(Error::DimensionMismatch {
            expected: lhs.sizes().to_vec(),
            got: rhs.sizes().to_vec(),
        });
    }
    Ok(())
}

fn expect_float(ty: &dyn Type, op: &str) -> Result<()> {
    if ty.scalar_type().is_int() {
        return Err(Error::UnsupportedScalarType {
            op: op.to_string(),
            scalar_type: ty.scalar_type(),
        });
    }
    Ok(())
}

fn binary<T: Element>(lhs: &Tensor, rhs: &Tensor, kernel: BinaryKernel<T>) -> Result<Tensor> {
    let out = lhs.ty().tensor(lhs.sizes())?;

    let mut metadata = lhs.layout().dims_and_strides();
    metadata.extend_from_slice(rhs.strides());

    let lhs_buf = lhs.storage().read()?;
    let rhs_buf = if rhs.storage().ptr_eq(lhs.storage()) {
        None
    } else {
        Some(rhs.storage().read()?)
    };
    lhs.check_span(lhs_buf.len())?;
    rhs.check_span(rhs_buf.as_ref().map_or(lhs_buf.len(), |buf| buf.len()))?;
    let rhs_ptr = rhs_buf.as_ref().map_or(lhs_buf.as_ptr(), |buf| buf.as_ptr());
    let mut out_buf = out.storage().write()?;

    unsafe {
        kernel(
            lhs.numel(),
            lhs.dim(),
            metadata.as_ptr(),
            (lhs_buf.as_ptr() as *const T).add(lhs.offset()),
            (rhs_ptr as *const T).add(rhs.offset()),
            out_buf.as_mut_ptr() as *mut T,
        );
    }

    drop(out_buf);
    Ok(out)
}

fn unary<T: Element>(tensor: &Tensor, kernel: UnaryKernel<T>) -> Result<Tensor> {
    let out = tensor.ty().tensor(tensor.sizes())?;
    let metadata = tensor.layout().dims_and_strides();

    let inp_buf = tensor.storage().read()?;
    tensor.check_span(inp_buf.len())?;
    let mut out_buf = out.storage().write()?;

    unsafe {
        kernel(
            tensor.numel(),
            tensor.dim(),
            metadata.as_ptr(),
            (inp_buf.as_ptr() as *const T).add(tensor.offset()),
            out_buf.as_mut_ptr() as *mut T,
        );
    }

    drop(out_buf);
    Ok(out)
}

fn fill<T: Element>(tensor: &mut Tensor, value: T, kernel: FillKernel<T>) -> Result<()> {
    let metadata = tensor.layout().dims_and_strides();
    let mut buf = tensor.storage().write()?;
    tensor.check_span(buf.len())?;

    unsafe {
        kernel(
            tensor.numel(),
            tensor.dim(),
            metadata.as_ptr(),
            (buf.as_mut_ptr() as *mut T).add(tensor.offset()),
            value,
        );
    }

    Ok(())
}

fn sum<T: Element, A: Into<Scalar>>(tensor: &Tensor, kernel: SumKernel<T, A>) -> Result<Scalar> {
    let metadata = tensor.layout().dims_and_strides();
    let buf = tensor.storage().read()?;
    tensor.check_span(buf.len())?;

    let acc = unsafe {
        kernel(
            tensor.numel(),
            tensor.dim(),
            metadata.as_ptr(),
            (buf.as_ptr() as *const T).add(tensor.offset()),
        )
    };

    Ok(acc.into())
}

/// Writes contiguous `values` into `dst` following its layout.
fn write_values<T: Element + CastFrom<T>>(dst: &mut Tensor, values: &[T]) -> Result<()> {
    if values.len() != dst.numel() {
        return Err(Error::ShapeMismatch {
            expected: dst.numel(),
            got: values.len(),
            msg: "write_values".into(),
        });
    }

    let mut metadata = Vec::with_capacity(3 * dst.dim());
    metadata.extend_from_slice(dst.sizes());
    metadata.extend_from_slice(&Layout::compute_strides(dst.sizes()));
    metadata.extend_from_slice(dst.strides());

    let mut buf = dst.storage().write()?;
    dst.check_span(buf.len())?;
    unsafe {
        copy_cast::<T, T>(
            dst.numel(),
            dst.dim(),
            metadata.as_ptr(),
            values.as_ptr(),
            (buf.as_mut_ptr() as *mut T).add(dst.offset()),
        );
    }
    Ok(())
}

fn copy_typed<S: Element, D: Element + CastFrom<S>>(src: &Tensor, dst: &mut Tensor) -> Result<()> {
    // shapes may differ when element counts agree; walk src in logical order then
    let src_strides = if src.sizes() == dst.sizes() {
        src.strides().to_vec()
    } else {
        Layout::compute_strides(dst.sizes())
    };

    let mut metadata = Vec::with_capacity(3 * dst.dim());
    metadata.extend_from_slice(dst.sizes());
    metadata.extend_from_slice(&src_strides);
    metadata.extend_from_slice(dst.strides());

    let src_buf = src.storage().read()?;
    let mut dst_buf = dst.storage().write()?;
    src.check_span(src_buf.len())?;
    dst.check_span(dst_buf.len())?;

    unsafe {
        copy_cast::<S, D>(
            dst.numel(),
            dst.dim(),
            metadata.as_ptr(),
            (src_buf.as_ptr() as *const S).add(src.offset()),
            (dst_buf.as_mut_ptr() as *mut D).add(dst.offset()),
        );
    }

    Ok(())
}

fn copy_into<D: Element + CastFromAll>(ty: &dyn Type, src: &Tensor, dst: &mut Tensor) -> Result<()> {
    expect_type(ty, dst)?;
    if src.backend() != Backend::CPU {
        return Err(Error::BackendMismatch {
            expected: Backend::CPU,
            got: src.backend(),
        });
    }
    if src.numel() != dst.numel() {
        return Err(Error::ShapeMismatch {
            expected: dst.numel(),
            got: src.numel(),
            msg: "copy_".into(),
        });
    }

    let mut src = src.clone();
    if src.storage().ptr_eq(dst.storage()) {
        // source and destination may overlap; detach the source first
        src = src.ty().copy(&src)?;
    }
    if src.sizes() != dst.sizes() && !src.is_contiguous() {
        src = src.contiguous()?;
    }

    match src.scalar_type() {
        ScalarType::U8 => copy_typed::<u8, D>(&src, dst),
        ScalarType::I8 => copy_typed::<i8, D>(&src, dst),
        ScalarType::I16 => copy_typed::<i16, D>(&src, dst),
        ScalarType::I32 => copy_typed::<i32, D>(&src, dst),
        ScalarType::I64 => copy_typed::<i64, D>(&src, dst),
        ScalarType::F16 => copy_typed::<f16, D>(&src, dst),
        ScalarType::F32 => copy_typed::<f32, D>(&src, dst),
        ScalarType::F64 => copy_typed::<f64, D>(&src, dst),
    }
}

/// Largest value of the same float type strictly below `value`; integers pass through.
fn next_below(value: Scalar) -> Scalar {
    match value {
        Scalar::F16(x) => Scalar::F16(f16::from_bits(step_down(x.to_bits() as u64, 16) as u16)),
        Scalar::F32(x) => Scalar::F32(f32::from_bits(step_down(x.to_bits() as u64, 32) as u32)),
        Scalar::F64(x) => Scalar::F64(f64::from_bits(step_down(x.to_bits(), 64))),
        other => other,
    }
}

// bit pattern of the next float down, for finite values of a `width`-bit IEEE type
fn step_down(bits: u64, width: u32) -> u64 {
    let sign = 1u64 << (width - 1);
    if bits & !sign == 0 {
        sign | 1
    } else if bits & sign == 0 {
        bits - 1
    } else {
        bits + 1
    }
}

/// Fills `tensor` with `sample` draws converted to `T`. With `below` set, a draw that rounds
/// up to that bound in `T` is stepped down to the previous representable value.
fn random_fill<T: Element + CastFrom<T>>(
    tensor: &mut Tensor,
    generator: Option<&mut dyn Generator>,
    below: Option<f64>,
    mut sample: impl FnMut(&mut dyn Generator) -> Result<f64>,
) -> Result<()> {
    let numel = tensor.numel();
    let convert = |v: f64| -> T {
        let value = T::from_scalar(Scalar::F64(v));
        match below {
            Some(to) if value.into_scalar().as_f64_any() >= to => T::from_scalar(next_below(value.into_scalar())),
            _ => value,
        }
    };
    let mut draw = |generator: &mut dyn Generator| -> Result<Vec<T>> {
        (0..numel)
            .map(|_| sample(&mut *generator).map(convert))
            .collect()
    };

    let values = match generator {
        Some(generator) => draw(generator)?,
        None => {
            let mut generator = global_context().default_generator(tensor.backend())?;
            draw(&mut **generator)?
        }
    };

    write_values(tensor, &values)
}

macro_rules! declare_cpu_types {
    ($($name:ident => ($variant:ident, $type:ident)),* $(,)?) => {
        paste::paste! {
            $(
                #[derive(Debug, Default)]
                pub struct [<CPU $name Type>];

                impl Type for [<CPU $name Type>] {
                    fn scalar_type(&self) -> ScalarType {
                        ScalarType::$variant
                    }

                    fn backend(&self) -> Backend {
                        Backend::CPU
                    }

                    fn id(&self) -> TypeId {
                        TypeId::[<CPU $name>]
                    }

                    fn name(&self) -> &'static str {
                        concat!("CPU", stringify!($name), "Type")
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

                    fn copy_(&self, src: &Tensor, dst: &mut Tensor) -> Result<()> {
                        copy_into::<$type>(self, src, dst)
                    }

                    fn fill_(&self, tensor: &mut Tensor, value: Scalar) -> Result<()> {
                        expect_type(self, tensor)?;
                        fill::<$type>(tensor, <$type>::from_scalar(value), [<fill_ $type>])
                    }

                    fn add(&self, lhs: &Tensor, rhs: &Tensor) -> Result<Tensor> {
                        expect_binary(self, lhs, rhs)?;
                        binary::<$type>(lhs, rhs, [<add_ $type>])
                    }

                    fn sub(&self, lhs: &Tensor, rhs: &Tensor) -> Result<Tensor> {
                        expect_binary(self, lhs, rhs)?;
                        binary::<$type>(lhs, rhs, [<sub_ $type>])
                    }

                    fn mul(&self, lhs: &Tensor, rhs: &Tensor) -> Result<Tensor> {
                        expect_binary(self, lhs, rhs)?;
                        binary::<$type>(lhs, rhs, [<mul_ $type>])
                    }

                    fn div(&self, lhs: &Tensor, rhs: &Tensor) -> Result<Tensor> {
                        expect_binary(self, lhs, rhs)?;
                        if ScalarType::$variant.is_int() && rhs.to_vec::<$type>()?.contains(&<$type>::default()) {
                            return Err(Error::DivisionByZero);
                        }
                        binary::<$type>(lhs, rhs, [<div_ $type>])
                    }

                    fn neg(&self, tensor: &Tensor) -> Result<Tensor> {
                        expect_type(self, tensor)?;
                        unary::<$type>(tensor, [<neg_ $type>])
                    }

                    fn sum(&self, tensor: &Tensor) -> Result<Scalar> {
                        expect_type(self, tensor)?;
                        sum::<$type, _>(tensor, [<sum_ $type>])
                    }

                    fn uniform_(&self, tensor: &mut Tensor, from: f64, to: f64, generator: Option<&mut dyn Generator>) -> Result<()> {
                        expect_type(self, tensor)?;
                        expect_float(self, "uniform_")?;
                        if !(from <= to) || !from.is_finite() || !to.is_finite() {
                            return Err(Error::InvalidArgument(format!("uniform_ expects finite from <= to, got [{}, {})", from, to)));
                        }
                        let below = (from < to).then_some(to);
                        random_fill::<$type>(tensor, generator, below, |g| Ok(g.uniform(from, to)))
                    }

                    fn normal_(&self, tensor: &mut Tensor, mean: f64, std: f64, generator: Option<&mut dyn Generator>) -> Result<()> {
                        expect_type(self, tensor)?;
                        expect_float(self, "normal_")?;
                        random_fill::<$type>(tensor, generator, None, |g| g.normal(mean, std))
                    }
                }
            )*

            pub(crate) fn cpu_types() -> Vec<Box<dyn Type>> {
                vec![$(Box::new([<CPU $name Type>]),)*]
            }
        }
    };
}

declare_cpu_types!(
    Byte => (U8, u8),
    Char => (I8, i8),
    Short => (I16, i16),
    Int => (I32, i32),
    Long => (I64, i64),
    Half => (F16, f16),
    Float => (F32, f32),
    Double => (F64, f64),
);
