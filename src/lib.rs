//! Elemental Forms is a retained-mode GUI toolkit. This crate exposes its
//! bitmap fragment atlas: the part that packs glyphs, icons and skin bitmaps
//! into shared textures for the renderer.
//!
//! Start with an [`Atlas`] and a [`Backend`](atlas::Backend) for your
//! renderer, or the in-memory [`Headless`](atlas::Headless) one.
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(unused_results)]
#![forbid(unsafe_code)]
#![forbid(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use elemental_forms_core::{FragmentId, Rectangle, Size};
pub use elemental_forms_graphics::atlas;

#[doc(no_inline)]
pub use atlas::Atlas;
