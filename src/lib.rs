//! Run-length-encoded sequence storage, as used for terminal attribute rows.
//!
//! The core is [`RleVec`], a generic container that stores a flat logical
//! sequence as `(value, length)` runs and supports range replacement with
//! full splitting/coalescing semantics. [`AttrRow`] applies it to the
//! attributes of one screen-buffer row.

pub mod attr;
pub mod attr_row;
pub mod error;
pub mod rle;
mod run;

pub use attr::{AttrFlags, Color, TextAttribute};
pub use attr_row::AttrRow;
pub use error::RleError;
pub use rle::iter::{RleCursor, RleIter};
pub use rle::RleVec;
pub use run::{Run, RunLength};
