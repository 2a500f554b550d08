//! Multidimensional array views over shared, reference-counted buffers.
//!
//! An [`Array`] addresses its [`Buffer`] in one of three ways: flat column-major, strided, or
//! gathered through per-axis index tables. Slicing, ranged views and index selection produce new
//! views of the same buffer; writes through any view are seen by all of them.
//!
//! ```
//! use ndview::{ranges, Array, StorageKind};
//!
//! let a = Array::from_vec([3, 4], (0..12).collect::<Vec<i32>>())?;
//! let v = a.view(ranges![1.., ..;-1])?;
//! v.fill(0);
//!
//! assert_eq!(v.storage(), StorageKind::Strided);
//! assert_eq!(a.sum(), 3 + 6 + 9);
//! # Ok::<(), ndview::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

mod array;
pub use array::{Array, Scalar, StorageKind};

mod element;
pub use element::{Element, ElementKind};

mod error;
pub use error::{Error, IndexError, Result, ShapeError};

pub mod helper;
pub use helper::IndexTable;

mod order;
pub use order::Order;

mod range;
pub use range::{CompiledRange, Range};

pub mod scanner;
pub use scanner::Scanner;

mod shape;
pub use shape::Shape;

pub mod storage;
pub use storage::Buffer;

/// Highest supported number of dimensions.
pub const MAX_RANK: usize = 9;
