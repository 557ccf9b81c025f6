//! Allocation helpers for the slice-conversion API.

use std::alloc::{alloc, handle_alloc_error, Layout};

/// Fast zero-copy uninitialized vector allocation for Linux/Mac platforms.
///
/// The slice-conversion helpers write every element of their output exactly
/// once, so zero-initializing the buffer first would be wasted bandwidth.
/// This allocates the backing storage directly and hands ownership to `Vec`.
///
/// # Safety contract (caller)
///
/// Every element must be written before the vector is read; until then the
/// contents are uninitialized.
///
/// # Panics
///
/// Panics if the layout is invalid; aborts via `handle_alloc_error` if the
/// allocation fails.
#[cfg(not(target_os = "windows"))]
pub fn alloc_uninit_vec<T>(len: usize, align: usize) -> Vec<T> {
    if len == 0 {
        return Vec::new();
    }

    let layout = Layout::from_size_align(len * std::mem::size_of::<T>(), align)
        .expect("Invalid layout for aligned allocation");

    let ptr = unsafe { alloc(layout) as *mut T };

    if ptr.is_null() {
        handle_alloc_error(layout);
    }

    // SAFETY:
    // - ptr is non-null and properly aligned
    // - len elements of size T were allocated
    // - Memory is uninitialized - caller must initialize before use
    // - On Linux/Mac, Vec uses the same allocator as std::alloc::alloc
    unsafe { Vec::from_raw_parts(ptr, len, len) }
}

/// Windows-safe variant: allocate through `Vec` itself so the buffer is owned
/// by the global allocator from the start. Zero-initialization is the price
/// of avoiding allocator mismatches on that platform.
#[cfg(target_os = "windows")]
pub fn alloc_uninit_vec<T: Default + Clone>(len: usize, _align: usize) -> Vec<T> {
    vec![T::default(); len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_len_and_write() {
        let mut v: Vec<u32> = alloc_uninit_vec(128, 32);
        assert_eq!(v.len(), 128);
        for (i, slot) in v.iter_mut().enumerate() {
            *slot = i as u32;
        }
        assert_eq!(v[127], 127);
    }

    #[test]
    fn test_alloc_empty() {
        let v: Vec<i16> = alloc_uninit_vec(0, 16);
        assert!(v.is_empty());
    }
}
