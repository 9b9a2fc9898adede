//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;

/// N-dimensional array stored on a compute device
///
/// A tensor is a [`Storage`] buffer plus a [`Layout`] describing which
/// elements of that buffer the tensor sees and in what order. The element
/// type is a runtime [`DType`].
///
/// # Zero-Copy Views
///
/// `transpose`, `permute`, `narrow`, `unsqueeze` and `broadcast_to` return
/// tensors that share storage with the original and only differ in layout.
/// Call [`Tensor::contiguous`] to materialize a row-major copy.
///
/// # Example
///
/// ```
/// use cpals::prelude::*;
///
/// let device = CpuDevice::new();
/// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
/// let at = a.t().unwrap();
/// assert_eq!(at.contiguous().to_vec::<f64>(), vec![1.0, 3.0, 2.0, 4.0]);
/// ```
pub struct Tensor<R: Runtime> {
    storage: Storage<R>,
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of `shape`.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        Ok(Self {
            storage: Storage::from_slice(data, device),
            layout: Layout::contiguous(shape),
        })
    }

    /// Build a tensor by evaluating `f` at every multi-index, in row-major order
    ///
    /// This is the tensor analogue of filling an array from an index function:
    ///
    /// ```
    /// use cpals::prelude::*;
    ///
    /// let device = CpuDevice::new();
    /// let t = Tensor::<CpuRuntime>::from_fn(&[2, 3], &device, |idx| (idx[0] * 10 + idx[1]) as f64);
    /// assert_eq!(t.to_vec::<f64>(), vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    /// ```
    pub fn from_fn<T, F>(shape: &[usize], device: &R::Device, mut f: F) -> Self
    where
        T: Element,
        F: FnMut(&[usize]) -> T,
    {
        let numel: usize = shape.iter().product();
        let mut data = Vec::with_capacity(numel);
        let mut index = vec![0usize; shape.len()];

        for _ in 0..numel {
            data.push(f(&index));
            // Odometer increment, last dimension fastest
            for dim in (0..shape.len()).rev() {
                index[dim] += 1;
                if index[dim] < shape[dim] {
                    break;
                }
                index[dim] = 0;
            }
        }

        Self {
            storage: Storage::from_slice(&data, device),
            layout: Layout::contiguous(shape),
        }
    }

    /// Create a tensor of `dtype` from f64 values, converting each element
    pub fn from_f64_slice(
        values: &[f64],
        shape: &[usize],
        dtype: DType,
        device: &R::Device,
    ) -> Result<Self> {
        match dtype {
            DType::F64 => Self::try_from_slice(values, shape, device),
            DType::F32 => {
                let data: Vec<f32> = values.iter().map(|&v| v as f32).collect();
                Self::try_from_slice(&data, shape, device)
            }
            DType::I64 => {
                let data: Vec<i64> = values.iter().map(|&v| v as i64).collect();
                Self::try_from_slice(&data, shape, device)
            }
        }
    }

    /// Create a tensor filled with a scalar value converted to `dtype`
    pub fn full_scalar(shape: &[usize], dtype: DType, value: f64, device: &R::Device) -> Self {
        let len: usize = shape.iter().product();
        let storage = match dtype {
            DType::F64 => Storage::from_slice(&vec![value; len], device),
            DType::F32 => Storage::from_slice(&vec![value as f32; len], device),
            DType::I64 => Storage::from_slice(&vec![value as i64; len], device),
        };
        Self {
            storage,
            layout: Layout::contiguous(shape),
        }
    }

    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::full_scalar(shape, dtype, 0.0, device)
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::full_scalar(shape, dtype, 1.0, device)
    }

    // ===== Accessors =====

    /// Underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Layout of this view
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Strides in elements
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Device the data lives on
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// True when the view is row-major with no offset
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    // ===== Views =====

    fn with_layout(&self, layout: Layout) -> Self {
        Self {
            storage: self.storage.clone(),
            layout,
        }
    }

    /// Swap two dimensions (zero-copy)
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        let ndim = self.ndim();
        let layout = self
            .layout
            .transpose(dim0, dim1)
            .ok_or(Error::InvalidDimension { dim: dim0, ndim })?;
        Ok(self.with_layout(layout))
    }

    /// Transpose of a 2-D tensor
    pub fn t(&self) -> Result<Self> {
        if self.ndim() != 2 {
            return Err(Error::InvalidArgument {
                arg: "tensor",
                reason: format!("t() expects a 2-D tensor, got shape {:?}", self.shape()),
            });
        }
        self.transpose(0, 1)
    }

    /// Reorder dimensions (zero-copy)
    pub fn permute(&self, dims: &[usize]) -> Result<Self> {
        let layout = self.layout.permute(dims).ok_or_else(|| Error::InvalidArgument {
            arg: "dims",
            reason: format!(
                "{:?} is not a permutation of 0..{}",
                dims,
                self.ndim()
            ),
        })?;
        Ok(self.with_layout(layout))
    }

    /// Reshape, copying first if the view is not contiguous
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let base = self.contiguous();
        let layout = base
            .layout
            .reshape(shape)
            .ok_or_else(|| Error::shape_mismatch(shape, self.shape()))?;
        Ok(base.with_layout(layout))
    }

    /// Restrict `dim` to `[start, start + length)` (zero-copy)
    pub fn narrow(&self, dim: usize, start: usize, length: usize) -> Result<Self> {
        let size = *self.shape().get(dim).ok_or(Error::InvalidDimension {
            dim: dim as isize,
            ndim: self.ndim(),
        })?;
        let layout = self
            .layout
            .narrow(dim, start, length)
            .ok_or(Error::IndexOutOfBounds {
                index: start + length,
                size,
            })?;
        Ok(self.with_layout(layout))
    }

    /// Insert a size-1 dimension (zero-copy)
    pub fn unsqueeze(&self, dim: isize) -> Result<Self> {
        let ndim = self.ndim();
        let layout = self
            .layout
            .unsqueeze(dim)
            .ok_or(Error::InvalidDimension { dim, ndim })?;
        Ok(self.with_layout(layout))
    }

    /// Broadcast to `shape` using stride-0 dimensions (zero-copy)
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self> {
        let layout = self
            .layout
            .broadcast_to(shape)
            .ok_or_else(|| Error::broadcast(self.shape(), shape))?;
        Ok(self.with_layout(layout))
    }

    /// Row-major copy of this view, or a cheap clone if it already is one
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }
        let storage = match self.dtype() {
            DType::F64 => Storage::from_slice(&self.gather::<f64>(), self.device()),
            DType::F32 => Storage::from_slice(&self.gather::<f32>(), self.device()),
            DType::I64 => Storage::from_slice(&self.gather::<i64>(), self.device()),
        };
        Self {
            storage,
            layout: Layout::contiguous(self.shape()),
        }
    }

    /// Collect the viewed elements in row-major order
    fn gather<T: Element>(&self) -> Vec<T> {
        let data = self.storage.typed::<T>();
        if self.is_contiguous() {
            return data[..self.numel()].to_vec();
        }
        strided_offsets(&self.layout)
            .into_iter()
            .map(|off| data[off])
            .collect()
    }

    // ===== Data Access =====

    /// Copy the viewed elements to a host `Vec` in row-major order
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the tensor dtype.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        assert_eq!(
            T::DTYPE,
            self.dtype(),
            "Tensor::to_vec requested {} from a {} tensor",
            T::DTYPE,
            self.dtype()
        );
        self.gather()
    }

    /// Copy the viewed elements to a `Vec<f64>` whatever the dtype
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self.dtype() {
            DType::F64 => self.gather::<f64>(),
            DType::F32 => self.gather::<f32>().into_iter().map(f64::from).collect(),
            DType::I64 => self
                .gather::<i64>()
                .into_iter()
                .map(Element::to_f64)
                .collect(),
        }
    }

    /// Read a single element as `f64`
    pub fn get(&self, indices: &[usize]) -> Result<f64> {
        let off = self.layout.index(indices).ok_or_else(|| Error::InvalidArgument {
            arg: "indices",
            reason: format!("{:?} is outside shape {:?}", indices, self.shape()),
        })?;
        Ok(match self.dtype() {
            DType::F64 => self.storage.typed::<f64>()[off],
            DType::F32 => f64::from(self.storage.typed::<f32>()[off]),
            DType::I64 => self.storage.typed::<i64>()[off].to_f64(),
        })
    }

    /// Extract the value of a single-element tensor
    pub fn item<T: Element>(&self) -> Result<T> {
        if self.numel() != 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![1],
                got: self.shape().to_vec(),
            });
        }
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: T::DTYPE,
            });
        }
        Ok(self.gather::<T>()[0])
    }
}

/// Storage offsets of every element of `layout`, in row-major order
pub(crate) fn strided_offsets(layout: &Layout) -> Vec<usize> {
    let shape = layout.shape();
    let strides = layout.strides();
    let numel = layout.elem_count();
    let mut offsets = Vec::with_capacity(numel);
    let mut index = vec![0usize; shape.len()];
    let mut current = layout.offset() as isize;

    for _ in 0..numel {
        offsets.push(current as usize);
        for dim in (0..shape.len()).rev() {
            index[dim] += 1;
            current += strides[dim];
            if index[dim] < shape[dim] {
                break;
            }
            current -= strides[dim] * shape[dim] as isize;
            index[dim] = 0;
        }
    }
    offsets
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone shares storage (zero-copy)
    fn clone(&self) -> Self {
        self.with_layout(self.layout.clone())
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

/// Nested-bracket rendering, e.g. `[[1.0, 2.0],\n [3.0, 4.0]]`
///
/// Honors a precision flag (`{:.3}`); otherwise floats use their shortest
/// round-trip form.
impl<R: Runtime> fmt::Display for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        let cells: Vec<String> = match self.dtype() {
            DType::F64 => format_cells(&self.gather::<f64>(), precision),
            DType::F32 => format_cells(&self.gather::<f32>(), precision),
            DType::I64 => self.gather::<i64>().iter().map(i64::to_string).collect(),
        };
        if self.ndim() == 0 {
            return f.write_str(cells.first().map_or("", String::as_str));
        }
        let mut out = String::new();
        write_nested(&mut out, &cells, self.shape(), 0);
        f.write_str(&out)
    }
}

fn format_cells<T: Element>(values: &[T], precision: Option<usize>) -> Vec<String> {
    values
        .iter()
        .map(|v| match precision {
            Some(p) => format!("{:.*}", p, v.to_f64()),
            None => format!("{:?}", v),
        })
        .collect()
}

fn write_nested(out: &mut String, cells: &[String], shape: &[usize], depth: usize) {
    out.push('[');
    if shape.len() == 1 {
        out.push_str(&cells.join(", "));
    } else {
        let block = cells.len() / shape[0].max(1);
        // One blank line between blocks per level above the innermost matrix
        let sep = format!(
            ",{}{}",
            "\n".repeat(shape.len() - 1),
            " ".repeat(depth + 1)
        );
        for (i, chunk) in cells.chunks(block.max(1)).take(shape[0]).enumerate() {
            if i > 0 {
                out.push_str(&sep);
            }
            write_nested(out, chunk, &shape[1..], depth + 1);
        }
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    fn device() -> CpuDevice {
        CpuDevice::new()
    }

    #[test]
    fn test_from_fn_row_major() {
        let t = Tensor::<CpuRuntime>::from_fn(&[2, 2, 2], &device(), |idx| {
            (idx[0] * 4 + idx[1] * 2 + idx[2]) as f64
        });
        assert_eq!(t.shape(), &[2, 2, 2]);
        assert_eq!(
            t.to_vec::<f64>(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn test_try_from_slice_length_check() {
        let r = Tensor::<CpuRuntime>::try_from_slice(&[1.0f64, 2.0, 3.0], &[2, 2], &device());
        assert!(matches!(r, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_permute_then_contiguous() {
        let t = Tensor::<CpuRuntime>::from_slice(
            &[0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0],
            &[1, 2, 3],
            &device(),
        );
        let p = t.permute(&[2, 0, 1]).unwrap();
        assert_eq!(p.shape(), &[3, 1, 2]);
        assert!(!p.is_contiguous());
        let c = p.contiguous();
        assert!(c.is_contiguous());
        assert_eq!(c.to_vec::<f64>(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_narrow_and_get() {
        let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device());
        let col = t.narrow(1, 1, 1).unwrap();
        assert_eq!(col.to_vec::<f32>(), vec![2.0, 4.0]);
        assert_eq!(t.get(&[1, 0]).unwrap(), 3.0);
        assert!(t.get(&[2, 0]).is_err());
        assert!(t.narrow(1, 1, 2).is_err());
    }

    #[test]
    fn test_reshape_non_contiguous_copies() {
        let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device());
        let r = t.t().unwrap().reshape(&[4]).unwrap();
        assert_eq!(r.to_vec::<f64>(), vec![1.0, 3.0, 2.0, 4.0]);
        assert!(t.reshape(&[3]).is_err());
    }

    #[test]
    fn test_item_and_full() {
        let t = Tensor::<CpuRuntime>::full_scalar(&[1], DType::F64, 2.5, &device());
        assert_eq!(t.item::<f64>().unwrap(), 2.5);
        assert!(t.item::<f32>().is_err());
        let ones = Tensor::<CpuRuntime>::ones(&[2, 2], DType::F32, &device());
        assert!(ones.item::<f32>().is_err());
        assert_eq!(ones.to_f64_vec(), vec![1.0; 4]);
    }

    #[test]
    fn test_display_nested() {
        let v = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 1.0], &[2], &device());
        assert_eq!(v.to_string(), "[1.0, 1.0]");

        let m = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device());
        assert_eq!(m.to_string(), "[[1.0, 2.0],\n [3.0, 4.0]]");
        assert_eq!(format!("{:.2}", m), "[[1.00, 2.00],\n [3.00, 4.00]]");

        let c = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 3, 4, 5, 6, 7, 8], &[2, 2, 2], &device());
        assert_eq!(c.to_string(), "[[[1, 2],\n  [3, 4]],\n\n [[5, 6],\n  [7, 8]]]");
    }
}
