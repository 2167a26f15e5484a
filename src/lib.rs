// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streaming stroking, dashing and clipping of vector paths.
//!
//! Trazo turns paths into the shapes a scanline rasterizer fills. A path
//! is pushed through a chain of filters, each one a [`PathConsumer`] that
//! sends its output to the next:
//!
//! - [`Transformed`] maps points to device space.
//! - [`Normalizer`] snaps them to the pixel grid.
//! - [`Dasher`] cuts the path into dashes.
//! - [`Stroker`] replaces every subpath with the outline of its stroke.
//! - [`PathClipFilter`], [`ClosedPathDetector`] and the clip support of the
//!   stroker and dasher avoid work on geometry beyond the clip rectangle.
//! - [`PathSimplifier`] drops segments too small to see.
//!
//! No filter holds more than the current subpath, so long paths stream
//! through without being collected first. [`Pipeline`] assembles the usual
//! chain.
//!
//! # Examples
//!
//! ```
//! use trazo::{stroke, BezPath, Cap, Join, Stroke};
//!
//! let mut path = BezPath::new();
//! path.move_to((0.0, 0.0));
//! path.line_to((10.0, 0.0));
//!
//! let outline = stroke(&path, &Stroke::new(2.0).with_caps(Cap::Butt));
//! assert_eq!(outline.subpath_count(), 1);
//!
//! // Dashes are cut from the centerline, then stroked one by one.
//! let style = Stroke::new(2.0)
//!     .with_join(Join::Round)
//!     .with_dashes(0.0, [3.0, 2.0]);
//! assert_eq!(stroke(&path, &style).subpath_count(), 2);
//! ```
//!
//! Filters can also be chained by hand:
//!
//! ```
//! use trazo::{BezPath, Dasher, PathConsumer, Stroke, Stroker};
//!
//! let mut path = BezPath::new();
//! path.move_to((0.0, 0.0));
//! path.quad_to((50.0, 50.0), (100.0, 0.0));
//!
//! let style = Stroke::new(4.0);
//! let stroker = Stroker::new(BezPath::new(), &style);
//! let mut dasher = Dasher::new(stroker, &[10.0, 5.0], 0.0).with_line_width(style.width);
//! dasher.consume(&path);
//! let outline = dasher.into_inner().into_inner();
//! assert!(outline.subpath_count() > 1);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. However, note that the `libm` crate is not as
//! efficient as the standard library, and that this crate still uses the
//! `alloc` crate regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("trazo requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod bezpath;
mod clip;
pub mod common;
mod consumer;
mod cubicbez;
mod curve;
mod dash;
mod error;
pub mod length;
mod line;
mod normalize;
mod outcode;
mod param_curve;
mod pipeline;
mod point;
mod quadbez;
mod rect;
mod simplify;
mod stack;
mod stroke;
mod stroker;
pub mod subdivide;
mod transform;
mod vec2;

pub use crate::affine::*;
pub use crate::bezpath::*;
pub use crate::clip::*;
pub use crate::consumer::*;
pub use crate::cubicbez::*;
pub use crate::curve::*;
pub use crate::dash::*;
pub use crate::error::*;
pub use crate::length::LengthIterator;
pub use crate::line::*;
pub use crate::normalize::*;
pub use crate::outcode::*;
pub use crate::param_curve::*;
pub use crate::pipeline::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::simplify::*;
pub use crate::stack::*;
pub use crate::stroke::*;
pub use crate::stroker::*;
pub use crate::subdivide::{CurveClipSplitter, Monotonizer};
pub use crate::transform::*;
pub use crate::vec2::*;
