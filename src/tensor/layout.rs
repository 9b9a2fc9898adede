//! Layout: shape, strides, and offset describing a view into storage

use smallvec::SmallVec;
use std::fmt;

/// Inline capacity for dimension lists; CP inputs are rarely above 4-D
const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides in elements (not bytes) between consecutive indices of each dimension
///
/// A stride of 0 marks a broadcast dimension.
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Memory layout of a tensor view
///
/// Element `[i0, i1, ..., in]` lives at
/// `offset + i0 * strides[0] + ... + in * strides[n]` in the backing storage.
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
    offset: usize,
}

impl Layout {
    /// Row-major (C-order) layout for `shape`
    ///
    /// ```
    /// use cpals::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 2, 2]);
    /// assert_eq!(layout.strides(), &[4, 2, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            strides: row_major_strides(shape),
            offset: 0,
        }
    }

    /// Layout with explicit shape, strides, and offset
    pub fn new(shape: Shape, strides: Strides, offset: usize) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            shape,
            strides,
            offset,
        }
    }

    /// Shape of the view
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides of the view
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Starting element index in storage
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// True when the view is row-major with no offset
    pub fn is_contiguous(&self) -> bool {
        self.offset == 0 && self.strides == row_major_strides(&self.shape)
    }

    /// Resolve a possibly negative dimension index (-1 is the last dimension)
    pub fn normalize_dim(&self, d: isize) -> Option<usize> {
        let ndim = self.ndim() as isize;
        let idx = if d < 0 { ndim + d } else { d };
        (0..ndim).contains(&idx).then_some(idx as usize)
    }

    /// Storage index of a multi-index, or `None` if out of bounds
    pub fn index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }
        let mut linear = self.offset as isize;
        for ((&i, &dim), &stride) in indices.iter().zip(&self.shape).zip(&self.strides) {
            if i >= dim {
                return None;
            }
            linear += i as isize * stride;
        }
        Some(linear as usize)
    }

    /// Swap two dimensions
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Option<Self> {
        let d0 = self.normalize_dim(dim0)?;
        let d1 = self.normalize_dim(dim1)?;
        let mut out = self.clone();
        out.shape.swap(d0, d1);
        out.strides.swap(d0, d1);
        Some(out)
    }

    /// Reorder dimensions: output dimension `i` is input dimension `dims[i]`
    pub fn permute(&self, dims: &[usize]) -> Option<Self> {
        if dims.len() != self.ndim() {
            return None;
        }
        let mut seen: SmallVec<[bool; STACK_DIMS]> = SmallVec::from_elem(false, dims.len());
        for &d in dims {
            if d >= dims.len() || seen[d] {
                return None;
            }
            seen[d] = true;
        }
        Some(Self {
            shape: dims.iter().map(|&d| self.shape[d]).collect(),
            strides: dims.iter().map(|&d| self.strides[d]).collect(),
            offset: self.offset,
        })
    }

    /// Restrict dimension `dim` to `[start, start + length)`
    pub fn narrow(&self, dim: usize, start: usize, length: usize) -> Option<Self> {
        if dim >= self.ndim() || start + length > self.shape[dim] {
            return None;
        }
        let mut out = self.clone();
        out.shape[dim] = length;
        out.offset = (self.offset as isize + start as isize * self.strides[dim]) as usize;
        Some(out)
    }

    /// Reinterpret a contiguous view with a new shape of equal element count
    pub fn reshape(&self, new_shape: &[usize]) -> Option<Self> {
        let count: usize = new_shape.iter().product();
        (self.is_contiguous() && count == self.elem_count()).then(|| Self::contiguous(new_shape))
    }

    /// Insert a size-1 dimension at `dim` (negative counts from the end)
    pub fn unsqueeze(&self, dim: isize) -> Option<Self> {
        let ndim = self.ndim() as isize;
        let idx = if dim < 0 { ndim + dim + 1 } else { dim };
        if !(0..=ndim).contains(&idx) {
            return None;
        }
        let idx = idx as usize;
        let stride = match (self.shape.get(idx), self.strides.get(idx)) {
            (Some(&size), Some(&st)) => st * size as isize,
            _ => 1,
        };
        let mut out = self.clone();
        out.shape.insert(idx, 1);
        out.strides.insert(idx, stride);
        Some(out)
    }

    /// View broadcast to `target`, using stride 0 on expanded dimensions
    pub fn broadcast_to(&self, target: &[usize]) -> Option<Self> {
        let pad = target.len().checked_sub(self.ndim())?;
        let mut strides: Strides = SmallVec::from_elem(0, pad);
        for ((&size, &stride), &want) in self.shape.iter().zip(&self.strides).zip(&target[pad..]) {
            match (size == want, size == 1) {
                (true, _) => strides.push(stride),
                (false, true) => strides.push(0),
                (false, false) => return None,
            }
        }
        Some(Self {
            shape: Shape::from_slice(target),
            strides,
            offset: self.offset,
        })
    }
}

/// Row-major strides: last dimension is 1, each earlier one is the product of
/// the sizes after it
fn row_major_strides(shape: &[usize]) -> Strides {
    let mut strides: Strides = SmallVec::from_elem(1, shape.len());
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    strides
}

/// NumPy-style broadcast of two shapes (right-aligned, size-1 expands)
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> Option<Shape> {
    let ndim = a.len().max(b.len());
    let dim_at = |s: &[usize], i: usize| {
        (i + s.len())
            .checked_sub(ndim)
            .map_or(1, |j| s[j])
    };
    (0..ndim)
        .map(|i| match (dim_at(a, i), dim_at(b, i)) {
            (x, y) if x == y => Some(x),
            (1, y) => Some(y),
            (x, 1) => Some(x),
            _ => None,
        })
        .collect()
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("shape", &self.shape.as_slice())
            .field("strides", &self.strides.as_slice())
            .field("offset", &self.offset)
            .finish()
    }
}
