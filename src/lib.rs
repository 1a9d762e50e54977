//! Aspect-fit geometry for UI images, plus the small utilities that usually
//! travel with it.
//!
//! The geometry is pure: no rendering, no allocation, `no_std` compatible.
//!
//! # Modules
//!
//! - [`fit`] — Stretch / Contain / Cover fitting of content into a container
//! - [`collections`] — Shuffle, random pick, slicing, integer ranges
//! - `persist` — Typed binary save/load under a data directory (feature `persist`)
//! - `singleton` — Process-wide typed instance registry (feature `singleton`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod collections;
pub mod fit;
#[cfg(feature = "persist")]
pub mod persist;
#[cfg(feature = "singleton")]
pub mod singleton;

// Re-exports: core types from fit module
pub use collections::ListExt;
#[cfg(feature = "alloc")]
pub use collections::{RangeError, int_range, int_range_to};
pub use fit::{
    AspectFitter, AutoFit, Axis, Bounds, FitError, FitMode, Offset, Pivot, Rect, Size, compute,
};
#[cfg(feature = "persist")]
pub use persist::{DataStore, PersistError};
#[cfg(feature = "singleton")]
pub use singleton::Registry;
