use crate::utils::{get_strided_index, is_contiguous, split_metadata, strided_span};
use half::f16;
use rayon::prelude::*;

macro_rules! sum_op {
    ($name:ident, $type:ty, $acc:ty, $zero:expr, $widen:expr, $add:expr) => {
        /// Sums every element, accumulating in a wider type.
        ///
        /// # Safety
        ///
        /// * `metadata` is null when `num_dims` is zero, otherwise a valid pointer to `2 * num_dims` elements:
        ///   - dims[num_dims]: logical dimensions of the input
        ///   - strides[num_dims]: strides for the input array
        /// * `inp` is valid for every index computed from dims and strides
        pub unsafe fn $name(num_els: usize, num_dims: usize, metadata: *const usize, inp: *const $type) -> $acc {
            if num_els == 0 {
                return $zero;
            }

            let (dims, strides) = split_metadata(num_dims, 1, metadata);
            let strides = strides[0];

            let inp = std::slice::from_raw_parts(inp, strided_span(num_els, dims, strides));
            let inp_cont = is_contiguous(num_dims, dims, strides);

            (0..num_els)
                .into_par_iter()
                .map(|i| {
                    let idx = if inp_cont { i } else { get_strided_index(i, num_dims, dims, strides) };
                    $widen(inp[idx])
                })
                .reduce(|| $zero, $add)
        }
    };
}

sum_op!(sum_u8, u8, i64, 0i64, |x: u8| x as i64, |a: i64, b: i64| a.wrapping_add(b));
sum_op!(sum_i8, i8, i64, 0i64, |x: i8| x as i64, |a: i64, b: i64| a.wrapping_add(b));
sum_op!(sum_i16, i16, i64, 0i64, |x: i16| x as i64, |a: i64, b: i64| a.wrapping_add(b));
sum_op!(sum_i32, i32, i64, 0i64, |x: i32| x as i64, |a: i64, b: i64| a.wrapping_add(b));
sum_op!(sum_i64, i64, i64, 0i64, |x: i64| x, |a: i64, b: i64| a.wrapping_add(b));
sum_op!(sum_f16, f16, f64, 0f64, |x: f16| x.to_f64(), |a: f64, b: f64| a + b);
sum_op!(sum_f32, f32, f64, 0f64, |x: f32| x as f64, |a: f64, b: f64| a + b);
sum_op!(sum_f64, f64, f64, 0f64, |x: f64| x, |a: f64, b: f64| a + b);
