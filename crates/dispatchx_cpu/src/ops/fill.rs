use crate::utils::{get_strided_index, is_contiguous, split_metadata};
use half::f16;
use rayon::prelude::*;

macro_rules! fill_op {
    ($($type:ident),*) => {
        paste::paste! {
            $(
                /// # Safety
                ///
                /// Caller must guarantee that:
                /// * `metadata` is null when `num_dims` is zero, otherwise a valid pointer to `2 * num_dims` elements:
                ///   - dims[num_dims]: logical dimensions of the output
                ///   - strides[num_dims]: strides for the output array
                /// * `out` is valid for every index computed from dims and strides
                pub unsafe fn [<fill_ $type>](num_els: usize, num_dims: usize, metadata: *const usize, out: *mut $type, value: $type) {
                    if num_els == 0 {
                        return;
                    }

                    let (dims, strides) = split_metadata(num_dims, 1, metadata);
                    let strides = strides[0];

                    if is_contiguous(num_dims, dims, strides) {
                        std::slice::from_raw_parts_mut(out, num_els).par_iter_mut().for_each(|x| *x = value);
                    } else {
                        for i in 0..num_els {
                            *out.add(get_strided_index(i, num_dims, dims, strides)) = value;
                        }
                    }
                }
            )*
        }
    };
}

fill_op!(u8, i8, i16, i32, i64, f16, f32, f64);
