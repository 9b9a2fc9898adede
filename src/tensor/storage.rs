//! Storage: reference-counted element buffers shared between views

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::sync::Arc;

/// Storage for tensor data on a device
///
/// The buffer is immutable once created; views (transpose, narrow, ...)
/// clone the `Arc` and only change their [`Layout`](super::Layout).
/// Bytes are held in `u64` words so that every supported element type can be
/// reinterpreted in place without alignment faults.
pub struct Storage<R: Runtime> {
    inner: Arc<StorageInner<R>>,
}

struct StorageInner<R: Runtime> {
    words: Vec<u64>,
    len: usize,
    dtype: DType,
    device: R::Device,
}

impl<R: Runtime> Storage<R> {
    /// Copy `data` into new storage; dtype comes from the element type
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Self {
        let byte_len = std::mem::size_of_val(data);
        let mut words = vec![0u64; byte_len.div_ceil(8)];
        bytemuck::cast_slice_mut::<u64, u8>(&mut words)[..byte_len]
            .copy_from_slice(bytemuck::cast_slice(data));

        Self {
            inner: Arc::new(StorageInner {
                words,
                len: data.len(),
                dtype: T::DTYPE,
                device: device.clone(),
            }),
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Device the buffer belongs to
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * self.inner.dtype.size_in_bytes()
    }

    /// Number of views sharing this buffer
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Borrow the buffer as a typed slice
    ///
    /// Fails with `DTypeMismatch` if `T` is not the storage dtype.
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        if T::DTYPE != self.inner.dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.inner.dtype,
                rhs: T::DTYPE,
            });
        }
        Ok(self.typed())
    }

    /// Typed view without the dtype check; callers dispatch on `dtype()` first
    #[inline]
    pub(crate) fn typed<T: Element>(&self) -> &[T] {
        debug_assert_eq!(T::DTYPE, self.inner.dtype);
        let all: &[T] = bytemuck::cast_slice(&self.inner.words);
        &all[..self.inner.len]
    }
}

impl<R: Runtime> Clone for Storage<R> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.inner.len)
            .field("dtype", &self.inner.dtype)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_odd_length_f32_roundtrip() {
        let device = CpuDevice::new();
        let storage = Storage::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0], &device);
        assert_eq!(storage.len(), 3);
        assert_eq!(storage.size_in_bytes(), 12);
        assert_eq!(storage.as_slice::<f32>().unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_typed_access_checks_dtype() {
        let device = CpuDevice::new();
        let storage = Storage::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &device);
        assert!(storage.as_slice::<f32>().is_err());
        let view = storage.clone();
        assert_eq!(view.ref_count(), 2);
    }
}
