use crate::utils::{get_strided_index, is_contiguous, split_metadata, strided_span};
use half::f16;
use rayon::prelude::*;

macro_rules! binary_op {
    ($name:ident, $type:ty, $op:expr) => {
        /// # Safety
        ///
        /// Caller must guarantee that:
        /// * `metadata` is null when `num_dims` is zero, otherwise a valid pointer to `3 * num_dims` elements:
        ///   - dims[num_dims]: logical dimensions shared by both inputs
        ///   - lhs_strides[num_dims]: strides for left-hand side array
        ///   - rhs_strides[num_dims]: strides for right-hand side array
        /// * `lhs` and `rhs` are valid for every index computed from dims and strides
        /// * `out` is a valid pointer to a contiguous array of at least `num_els` elements
        /// * `out` does not overlap `lhs` or `rhs`
        pub unsafe fn $name(
            num_els: usize,
            num_dims: usize,
            metadata: *const usize,
            lhs: *const $type,
            rhs: *const $type,
            out: *mut $type,
        ) {
            if num_els == 0 {
                return;
            }

            let (dims, strides) = split_metadata(num_dims, 2, metadata);
            let (lhs_strides, rhs_strides) = (strides[0], strides[1]);

            let lhs = std::slice::from_raw_parts(lhs, strided_span(num_els, dims, lhs_strides));
            let rhs = std::slice::from_raw_parts(rhs, strided_span(num_els, dims, rhs_strides));
            let out = std::slice::from_raw_parts_mut(out, num_els);

            let lhs_cont = is_contiguous(num_dims, dims, lhs_strides);
            let rhs_cont = is_contiguous(num_dims, dims, rhs_strides);

            out.par_iter_mut().enumerate().for_each(|(i, out_val)| {
                let lhs_idx = if lhs_cont { i } else { get_strided_index(i, num_dims, dims, lhs_strides) };
                let rhs_idx = if rhs_cont { i } else { get_strided_index(i, num_dims, dims, rhs_strides) };

                *out_val = $op(lhs[lhs_idx], rhs[rhs_idx]);
            });
        }
    };
}

macro_rules! int_binary_ops {
    ($($type:ident),*) => {
        paste::paste! {
            $(
                binary_op!([<add_ $type>], $type, |a: $type, b: $type| a.wrapping_add(b));
                binary_op!([<sub_ $type>], $type, |a: $type, b: $type| a.wrapping_sub(b));
                binary_op!([<mul_ $type>], $type, |a: $type, b: $type| a.wrapping_mul(b));
                // callers reject zero divisors before dispatch
                binary_op!([<div_ $type>], $type, |a: $type, b: $type| a.wrapping_div(b));
            )*
        }
    };
}

macro_rules! float_binary_ops {
    ($($type:ident),*) => {
        paste::paste! {
            $(
                binary_op!([<add_ $type>], $type, |a: $type, b: $type| a + b);
                binary_op!([<sub_ $type>], $type, |a: $type, b: $type| a - b);
                binary_op!([<mul_ $type>], $type, |a: $type, b: $type| a * b);
                binary_op!([<div_ $type>], $type, |a: $type, b: $type| a / b);
            )*
        }
    };
}

int_binary_ops!(u8, i8, i16, i32, i64);
float_binary_ops!(f16, f32, f64);
