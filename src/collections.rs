//! Small list helpers: shuffling, random picks, slicing, integer ranges.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use core::fmt;

use rand::Rng;

/// Extension methods for slices (and anything that derefs to one, like `Vec`).
pub trait ListExt<T> {
    /// Shuffle in place with a forward Fisher–Yates pass.
    ///
    /// Each position `i` is swapped with a uniformly chosen position in `i..len`.
    fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Uniformly chosen element, or `None` if empty.
    fn random_item_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T>;

    /// Copy of the elements in `start..stop`.
    ///
    /// `stop` is an end index, not an element count: `sliced(2, 5)` yields
    /// three elements.
    ///
    /// `None` if `start > stop` or `stop` is past the end.
    #[cfg(feature = "alloc")]
    fn sliced(&self, start: usize, stop: usize) -> Option<Vec<T>>
    where
        T: Clone;

    /// [`shuffle_with`](Self::shuffle_with) using the thread-local RNG.
    #[cfg(feature = "std")]
    fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// [`random_item_with`](Self::random_item_with) using the thread-local RNG.
    #[cfg(feature = "std")]
    fn random_item(&self) -> Option<&T> {
        self.random_item_with(&mut rand::thread_rng())
    }
}

impl<T> ListExt<T> for [T] {
    fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = self.len();
        for i in 0..count.saturating_sub(1) {
            let r = rng.gen_range(i..count);
            self.swap(i, r);
        }
    }

    fn random_item_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.get(rng.gen_range(0..self.len()))
    }

    #[cfg(feature = "alloc")]
    fn sliced(&self, start: usize, stop: usize) -> Option<Vec<T>>
    where
        T: Clone,
    {
        self.get(start..stop).map(<[T]>::to_vec)
    }
}

/// Arithmetic progression from `start` up to, but not including, `stop`.
///
/// Yields `ceil((stop - start) / step)` values, or none when `step` points
/// away from `stop`. A negative `step` counts down.
///
/// ```
/// use lunekit::int_range;
///
/// assert_eq!(int_range(0, 10, 3).unwrap(), vec![0, 3, 6, 9]);
/// assert_eq!(int_range(5, 0, -2).unwrap(), vec![5, 3, 1]);
/// assert!(int_range(0, 10, -1).unwrap().is_empty());
/// ```
#[cfg(feature = "alloc")]
pub fn int_range(start: i32, stop: i32, step: i32) -> Result<Vec<i32>, RangeError> {
    if step == 0 {
        return Err(RangeError::ZeroStep);
    }
    // i64 so that spans like i32::MIN..i32::MAX cannot overflow.
    let span = i64::from(stop) - i64::from(start);
    let step = i64::from(step);
    let len = if span == 0 || (span > 0) != (step > 0) {
        0
    } else {
        let (span, step) = (span.abs(), step.abs());
        (span + step - 1) / step
    };
    let start = i64::from(start);
    // Every value lies between start and stop, so it fits in i32.
    Ok((0..len).map(|i| (start + i * step) as i32).collect())
}

/// `0..stop` as a list.
#[cfg(feature = "alloc")]
pub fn int_range_to(stop: i32) -> Vec<i32> {
    int_range(0, stop, 1).unwrap_or_default()
}

/// Invalid range arguments.
#[cfg(feature = "alloc")]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// `step` was zero.
    ZeroStep,
}

#[cfg(feature = "alloc")]
impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStep => f.write_str("range step must not be zero"),
        }
    }
}

#[cfg(feature = "alloc")]
impl core::error::Error for RangeError {}
