//! Count-then-fill enumeration.
//!
//! Vulkan reports variable-length arrays through a pair of calls: the first
//! with a null output pointer returns the element count, the second fills a
//! caller-sized buffer and returns `VK_INCOMPLETE` if the buffer was too small.

use crate::error::{GpuError, Result};
use ash::vk;

/// Number of count/fill rounds before giving up on a count that keeps growing.
pub const MAX_ENUMERATION_ATTEMPTS: u32 = 4;

/// Run a native two-call enumeration and collect the results.
///
/// `call` receives the in/out count and either `None` (count query) or a
/// buffer of exactly `count` elements (fill query), and returns the driver's
/// result code. If the fill reports `VK_INCOMPLETE` the count is queried again;
/// if it reports fewer elements than requested the buffer is truncated.
pub fn query_count_then_fill<T, F>(mut call: F) -> Result<Vec<T>>
where
    T: Default + Clone,
    F: FnMut(&mut u32, Option<&mut [T]>) -> vk::Result,
{
    for attempt in 1..=MAX_ENUMERATION_ATTEMPTS {
        let mut count = 0u32;
        call(&mut count, None).result()?;

        let mut items = vec![T::default(); count as usize];
        let mut filled = count;
        match call(&mut filled, Some(&mut items)) {
            vk::Result::SUCCESS => {
                items.truncate(filled as usize);
                return Ok(items);
            }
            vk::Result::INCOMPLETE => {
                tracing::debug!(attempt, count, "Element count grew between calls, retrying");
            }
            err => return Err(GpuError::Vulkan(err)),
        }
    }

    Err(GpuError::EnumerationUnstable(MAX_ENUMERATION_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Emulates the driver side of the two-call contract over a changing list.
    fn driver_call(available: &[u32], count: &mut u32, out: Option<&mut [u32]>) -> vk::Result {
        match out {
            None => {
                *count = available.len() as u32;
                vk::Result::SUCCESS
            }
            Some(out) => {
                let n = (*count as usize).min(available.len()).min(out.len());
                out[..n].copy_from_slice(&available[..n]);
                *count = n as u32;
                if n < available.len() {
                    vk::Result::INCOMPLETE
                } else {
                    vk::Result::SUCCESS
                }
            }
        }
    }

    #[test]
    fn fill_populates_exactly_the_counted_elements() {
        for n in 1..=8u32 {
            let available: Vec<u32> = (100..100 + n).collect();
            let items = query_count_then_fill(|count, out| driver_call(&available, count, out))
                .unwrap();
            assert_eq!(items, available);
        }
    }

    #[test]
    fn zero_elements_is_an_empty_vec() {
        let items: Vec<u32> =
            query_count_then_fill(|count, out| driver_call(&[], count, out)).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn growth_between_calls_is_retried() {
        // The list grows right after the first count query.
        let queries = Cell::new(0);
        let items = query_count_then_fill(|count, out| {
            if out.is_none() {
                queries.set(queries.get() + 1);
            }
            let available: &[u32] = if queries.get() == 1 && out.is_some() {
                &[1, 2, 3]
            } else if queries.get() == 1 {
                &[1, 2]
            } else {
                &[1, 2, 3]
            };
            driver_call(available, count, out)
        })
        .unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(queries.get(), 2);
    }

    #[test]
    fn shrink_between_calls_truncates() {
        let queried = Cell::new(false);
        let items = query_count_then_fill(|count, out| {
            let available: &[u32] = if queried.get() { &[7] } else { &[7, 8, 9] };
            queried.set(true);
            driver_call(available, count, out)
        })
        .unwrap();

        assert_eq!(items, vec![7]);
    }

    #[test]
    fn endless_growth_gives_up() {
        let size = Cell::new(1u32);
        let result: Result<Vec<u32>> = query_count_then_fill(|count, out| {
            let available: Vec<u32> = (0..size.get()).collect();
            if out.is_some() {
                size.set(size.get() + 1);
                // Report what was written, but the list already grew.
                let written = driver_call(&available, count, out);
                if written == vk::Result::SUCCESS {
                    return vk::Result::INCOMPLETE;
                }
                return written;
            }
            driver_call(&available, count, out)
        });

        assert!(matches!(
            result,
            Err(GpuError::EnumerationUnstable(MAX_ENUMERATION_ATTEMPTS))
        ));
    }

    #[test]
    fn count_query_errors_propagate() {
        let result: Result<Vec<u32>> =
            query_count_then_fill(|_, _| vk::Result::ERROR_INITIALIZATION_FAILED);
        assert!(matches!(
            result,
            Err(GpuError::Vulkan(vk::Result::ERROR_INITIALIZATION_FAILED))
        ));
    }

    #[test]
    fn fill_query_errors_propagate() {
        let result: Result<Vec<u32>> = query_count_then_fill(|count, out| {
            if out.is_none() {
                *count = 2;
                vk::Result::SUCCESS
            } else {
                vk::Result::ERROR_OUT_OF_HOST_MEMORY
            }
        });
        assert!(matches!(
            result,
            Err(GpuError::Vulkan(vk::Result::ERROR_OUT_OF_HOST_MEMORY))
        ));
    }
}
