//! Tensor shapes: element type plus strided dimensions.

use std::fmt;

use ferrotile_dtype::DataType;
use itertools::Itertools;
use smallvec::SmallVec;

/// One dimension of a tensor: how many elements, and the element stride between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorDimension {
    pub stride: i64,
    pub size: u64,
}

impl TensorDimension {
    pub const fn new(stride: i64, size: u64) -> Self {
        Self { stride, size }
    }
}

/// Dimension list. Inline capacity covers ranks 1–4 without allocating.
pub type Dims = SmallVec<[TensorDimension; 4]>;

/// Element type and strided dimensions of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorShape {
    pub dtype: DataType,
    pub dims: Dims,
}

impl TensorShape {
    pub fn new(dtype: DataType, dims: impl IntoIterator<Item = TensorDimension>) -> Self {
        Self { dtype, dims: dims.into_iter().collect() }
    }

    /// Dense row-major shape with the given sizes.
    ///
    /// ```rust
    /// # use ferrotile_ir::shape::TensorShape;
    /// # use ferrotile_dtype::DataType;
    /// let shape = TensorShape::from_sizes(DataType::Float32, &[2, 3]);
    /// assert_eq!(shape.dims[0].stride, 3);
    /// assert_eq!(shape.dims[1].stride, 1);
    /// ```
    pub fn from_sizes(dtype: DataType, sizes: &[u64]) -> Self {
        let mut dims: Dims = SmallVec::with_capacity(sizes.len());
        let mut stride = 1i64;
        for &size in sizes.iter().rev() {
            dims.push(TensorDimension::new(stride, size));
            stride *= size.max(1) as i64;
        }
        dims.reverse();
        Self { dtype, dims }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn sizes(&self) -> SmallVec<[u64; 4]> {
        self.dims.iter().map(|dim| dim.size).collect()
    }

    /// Number of elements spanned by the strided layout.
    ///
    /// Zero when any dimension is empty.
    pub fn elem_size(&self) -> u64 {
        if self.dims.iter().any(|dim| dim.size == 0) {
            return 0;
        }
        let extent: i64 = self.dims.iter().filter(|dim| dim.stride > 0).map(|dim| (dim.size as i64 - 1) * dim.stride).sum();
        extent as u64 + 1
    }

    pub fn byte_size(&self) -> u64 {
        self.elem_size() * self.dtype.bytes()
    }

    /// The per-iteration view of this shape: strides kept, every size collapsed to 1.
    pub fn scalar_view(&self) -> Self {
        Self { dtype: self.dtype, dims: self.dims.iter().map(|dim| TensorDimension::new(dim.stride, 1)).collect() }
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.dims.iter().map(|dim| format!("{}:{}", dim.size, dim.stride)).join(", ");
        write!(f, "{}({})", self.dtype, dims)
    }
}
