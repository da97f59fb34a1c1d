//! A bunch of backend-agnostic types that can be leveraged to build a
//! renderer for Elemental Forms.
//!
//! The main piece is the [`atlas`], which packs glyphs, icons and skin
//! bitmaps into shared textures.
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(unused_results)]
#![deny(unsafe_code)]
#![forbid(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod atlas;

pub use elemental_forms_core::{FragmentId, Rectangle, Size};
