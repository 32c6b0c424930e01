use crate::utils::{get_strided_index, is_contiguous, split_metadata, strided_span};
use half::f16;
use rayon::prelude::*;

/// Element conversion with C cast semantics: integers wrap, floats saturate into integers.
pub trait CastFrom<S>: Sized {
    fn cast_from(value: S) -> Self;
}

/// Element types convertible from every CPU element type.
pub trait CastFromAll:
    CastFrom<u8> + CastFrom<i8> + CastFrom<i16> + CastFrom<i32> + CastFrom<i64> + CastFrom<f16> + CastFrom<f32> + CastFrom<f64>
{
}

impl<T> CastFromAll for T where
    T: CastFrom<u8> + CastFrom<i8> + CastFrom<i16> + CastFrom<i32> + CastFrom<i64> + CastFrom<f16> + CastFrom<f32> + CastFrom<f64>
{
}

macro_rules! cast_row {
    ($dst:ty; $($src:ty),*) => {
        $(
            impl CastFrom<$src> for $dst {
                #[inline(always)]
                fn cast_from(value: $src) -> Self {
                    value as $dst
                }
            }
        )*
        impl CastFrom<f16> for $dst {
            #[inline(always)]
            fn cast_from(value: f16) -> Self {
                value.to_f64() as $dst
            }
        }
    };
}

cast_row!(u8; u8, i8, i16, i32, i64, f32, f64);
cast_row!(i8; u8, i8, i16, i32, i64, f32, f64);
cast_row!(i16; u8, i8, i16, i32, i64, f32, f64);
cast_row!(i32; u8, i8, i16, i32, i64, f32, f64);
cast_row!(i64; u8, i8, i16, i32, i64, f32, f64);
cast_row!(f32; u8, i8, i16, i32, i64, f32, f64);
cast_row!(f64; u8, i8, i16, i32, i64, f32, f64);

macro_rules! cast_to_half {
    ($($src:ty),*) => {
        $(
            impl CastFrom<$src> for f16 {
                #[inline(always)]
                fn cast_from(value: $src) -> Self {
                    f16::from_f64(value as f64)
                }
            }
        )*
    };
}

cast_to_half!(u8, i8, i16, i32, i64, f32, f64);

impl CastFrom<f16> for f16 {
    #[inline(always)]
    fn cast_from(value: f16) -> Self {
        value
    }
}

/// Strided copy from `src` into `dst`, converting each element.
///
/// # Safety
///
/// Caller must guarantee that:
/// * `metadata` is null when `num_dims` is zero, otherwise a valid pointer to `3 * num_dims` elements:
///   - dims[num_dims]: logical dimensions shared by both arrays
///   - src_strides[num_dims]: strides for the source array
///   - dst_strides[num_dims]: strides for the destination array
/// * every index computed from dims and strides is in bounds for `src` and `dst`
/// * `src` and `dst` do not overlap
/// * alignment requirements of `S` and `D` are respected
pub unsafe fn copy_cast<S, D>(num_els: usize, num_dims: usize, metadata: *const usize, src: *const S, dst: *mut D)
where
    S: Copy + Send + Sync,
    D: CastFrom<S> + Send,
{
    if num_els == 0 {
        return;
    }

    let (dims, strides) = split_metadata(num_dims, 2, metadata);
    let (src_strides, dst_strides) = (strides[0], strides[1]);

    let src = std::slice::from_raw_parts(src, strided_span(num_els, dims, src_strides));
    let src_cont = is_contiguous(num_dims, dims, src_strides);
    let src_at = |i: usize| {
        if src_cont {
            src[i]
        } else {
            src[get_strided_index(i, num_dims, dims, src_strides)]
        }
    };

    if is_contiguous(num_dims, dims, dst_strides) {
        let out = std::slice::from_raw_parts_mut(dst, num_els);
        out.par_iter_mut().enumerate().for_each(|(i, out_val)| {
            *out_val = D::cast_from(src_at(i));
        });
    } else {
        // strided destinations may alias themselves (zero strides), so stay sequential
        for i in 0..num_els {
            let dst_idx = get_strided_index(i, num_dims, dims, dst_strides);
            *dst.add(dst_idx) = D::cast_from(src_at(i));
        }
    }
}
