//! The core library of Elemental Forms.
//!
//! This library holds basic types that can be reused and re-exported in
//! different runtime implementations.
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(unused_results)]
#![forbid(unsafe_code)]
#![forbid(rust_2018_idioms)]
mod fragment_id;
mod rectangle;
mod size;

pub use fragment_id::FragmentId;
pub use rectangle::Rectangle;
pub use size::Size;
