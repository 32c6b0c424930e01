use crate::utils::{get_strided_index, is_contiguous, split_metadata, strided_span};
use half::f16;
use rayon::prelude::*;

macro_rules! unary_op {
    ($name:ident, $type:ty, $op:expr) => {
        /// # Safety
        ///
        /// Caller must guarantee that:
        /// * `metadata` is null when `num_dims` is zero, otherwise a valid pointer to `2 * num_dims` elements:
        ///   - dims[num_dims]: logical dimensions of the input
        ///   - strides[num_dims]: strides for the input array
        /// * `inp` is valid for every index computed from dims and strides
        /// * `out` is a valid pointer to a contiguous array of at least `num_els` elements
        /// * `out` does not overlap `inp`
        pub unsafe fn $name(num_els: usize, num_dims: usize, metadata: *const usize, inp: *const $type, out: *mut $type) {
            if num_els == 0 {
                return;
            }

            let (dims, strides) = split_metadata(num_dims, 1, metadata);
            let strides = strides[0];

            let inp = std::slice::from_raw_parts(inp, strided_span(num_els, dims, strides));
            let out = std::slice::from_raw_parts_mut(out, num_els);
            let inp_cont = is_contiguous(num_dims, dims, strides);

            out.par_iter_mut().enumerate().for_each(|(i, out_val)| {
                let idx = if inp_cont { i } else { get_strided_index(i, num_dims, dims, strides) };
                *out_val = $op(inp[idx]);
            });
        }
    };
}

unary_op!(neg_u8, u8, |x: u8| x.wrapping_neg());
unary_op!(neg_i8, i8, |x: i8| x.wrapping_neg());
unary_op!(neg_i16, i16, |x: i16| x.wrapping_neg());
unary_op!(neg_i32, i32, |x: i32| x.wrapping_neg());
unary_op!(neg_i64, i64, |x: i64| x.wrapping_neg());
unary_op!(neg_f16, f16, |x: f16| -x);
unary_op!(neg_f32, f32, |x: f32| -x);
unary_op!(neg_f64, f64, |x: f64| -x);
