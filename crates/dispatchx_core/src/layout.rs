use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl Layout {
    pub fn new(shape: &[usize], strides: &[usize], offset: usize) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(Error::InvalidArgument(format!(
                "shape has {} dimensions but strides has {}",
                shape.len(),
                strides.len()
            )));
        }

        Ok(Self {
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            offset,
        })
    }

    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
            offset: 0,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.shape.get(dim).copied()
    }
    /// Number of elements; a zero-dimensional layout holds one.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_contiguous(&self) -> bool {
        let mut acc = 1;
        for d in (0..self.ndim()).rev() {
            if self.shape[d] > 1 && self.strides[d] != acc {
                return false;
            }
            acc *= self.shape[d];
        }
        true
    }

    pub fn view(&mut self, new_shape: &[usize]) -> Result<()> {
        if !self.is_contiguous() {
            return Err(Error::InvalidArgument("view requires a contiguous layout".into()));
        }

        Self::check_shape(new_shape)?;
        let old_size = self.size();
        let new_size = Self::compute_size(new_shape);
        if old_size != new_size {
            return Err(Error::ShapeMismatch {
                expected: old_size,
                got: new_size,
                msg: "view".into(),
            });
        }

        self.shape = new_shape.to_vec();
        self.strides = Self::compute_strides(new_shape);

        Ok(())
    }

    pub fn transpose(&mut self, dim0: usize, dim1: usize) -> Result<()> {
        let ndim = self.ndim();
        for dim in [dim0, dim1] {
            if dim >= ndim {
                return Err(Error::DimensionOutOfBounds { dim, ndim });
            }
        }

        self.shape.swap(dim0, dim1);
        self.strides.swap(dim0, dim1);

        Ok(())
    }

    /// Storage offset of the element at `indices`.
    pub fn index_offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(Error::DimensionMismatch {
                expected: self.shape.clone(),
                got: indices.to_vec(),
            });
        }

        let mut offset = self.offset;
        for ((&index, &size), &stride) in indices.iter().zip(&self.shape).zip(&self.strides) {
            if index >= size {
                return Err(Error::IndexOutOfBounds { index, size });
            }
            offset = index
                .checked_mul(stride)
                .and_then(|n| offset.checked_add(n))
                .ok_or_else(|| Error::InvalidArgument(format!("index {:?} overflows the storage offset", indices)))?;
        }
        Ok(offset)
    }

    /// Number of storage elements needed past `offset` to address every element.
    pub fn storage_span(&self) -> Result<usize> {
        Self::compute_storage_size(&self.shape, &self.strides)
    }

    /// Index one past the last storage element this layout addresses, zero for empty layouts.
    pub fn storage_end(&self) -> Result<usize> {
        let span = self.storage_span()?;
        if span == 0 {
            return Ok(0);
        }
        self.offset.checked_add(span).ok_or_else(|| {
            Error::InvalidArgument(format!("offset {} plus span {} overflows", self.offset, span))
        })
    }

    /// `dims ++ strides`, the metadata layout expected by the CPU kernels.
    pub fn dims_and_strides(&self) -> Vec<usize> {
        let mut metadata = Vec::with_capacity(2 * self.ndim());
        metadata.extend_from_slice(&self.shape);
        metadata.extend_from_slice(&self.strides);
        metadata
    }

    // helper

    pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
        if shape.is_empty() {
            return vec![];
        }

        let mut strides = vec![1; shape.len()];
        for i in (0..shape.len() - 1).rev() {
            strides[i] = strides[i + 1] * shape[i + 1].max(1);
        }
        strides
    }

    pub fn compute_size(shape: &[usize]) -> usize {
        shape.iter().product()
    }

    /// Checks that the element count and contiguous strides of `shape` fit in `usize`.
    pub fn check_shape(shape: &[usize]) -> Result<()> {
        shape
            .iter()
            .try_fold(1usize, |acc, &size| acc.checked_mul(size.max(1)))
            .map(|_| ())
            .ok_or_else(|| Error::InvalidArgument(format!("shape {:?} overflows", shape)))
    }

    /// Elements a storage must hold for `shape`/`strides`: zero if any size is zero,
    /// otherwise `1 + sum((size - 1) * stride)`. Fails if the count or the span overflows.
    pub fn compute_storage_size(shape: &[usize], strides: &[usize]) -> Result<usize> {
        Self::check_shape(shape)?;
        if shape.contains(&0) {
            return Ok(0);
        }
        shape
            .iter()
            .zip(strides)
            .try_fold(1usize, |acc, (&size, &stride)| (size - 1).checked_mul(stride).and_then(|n| acc.checked_add(n)))
            .ok_or_else(|| Error::InvalidArgument(format!("shape {:?} with strides {:?} overflows", shape, strides)))
    }
}
