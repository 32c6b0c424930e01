#[inline]
pub fn is_contiguous(num_dims: usize, dims: &[usize], strides: &[usize]) -> bool {
    let mut acc = 1;
    for d in 0..num_dims {
        let dim_idx = num_dims - 1 - d;
        if dims[dim_idx] > 1 && acc != strides[dim_idx] {
            return false;
        }
        acc *= dims[dim_idx];
    }
    true
}

#[inline]
pub fn get_strided_index(idx: usize, num_dims: usize, dims: &[usize], strides: &[usize]) -> usize {
    let mut strided_i = 0;
    let mut remaining_idx = idx;

    for d in 0..num_dims {
        let dim_idx = num_dims - 1 - d;
        strided_i += (remaining_idx % dims[dim_idx]) * strides[dim_idx];
        remaining_idx /= dims[dim_idx];
    }

    strided_i
}

/// Elements addressed by `dims`/`strides` starting at offset zero.
///
/// The kernels call this only on layouts already checked against their buffer, so the span
/// fits in `usize`; the arithmetic is still checked and saturates rather than wrapping.
#[inline]
pub fn strided_span(num_els: usize, dims: &[usize], strides: &[usize]) -> usize {
    if num_els == 0 {
        return 0;
    }
    dims.iter()
        .zip(strides)
        .fold(1usize, |acc, (&d, &s)| acc.saturating_add(d.saturating_sub(1).saturating_mul(s)))
}

/// Splits kernel metadata into `dims` followed by `count` stride arrays.
///
/// # Safety
/// `metadata` must point to `(1 + count) * num_dims` elements, or be null when `num_dims` is zero.
#[inline]
pub unsafe fn split_metadata<'a>(num_dims: usize, count: usize, metadata: *const usize) -> (&'a [usize], Vec<&'a [usize]>) {
    if num_dims == 0 || metadata.is_null() {
        let empty: &[usize] = &[];
        return (empty, vec![empty; count]);
    }
    let dims = std::slice::from_raw_parts(metadata, num_dims);
    let strides = (0..count)
        .map(|i| std::slice::from_raw_parts(metadata.add((i + 1) * num_dims), num_dims))
        .collect();
    (dims, strides)
}
