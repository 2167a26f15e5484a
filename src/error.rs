// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::{error::Error, fmt};

/// A stroke or pipeline configuration that cannot produce sensible output.
///
/// Nothing in the pipeline checks for these by itself; call
/// [`Stroke::validate`](crate::Stroke::validate) or
/// [`Pipeline::validate`](crate::Pipeline::validate) on untrusted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeError {
    /// The stroke width is zero or negative.
    NonPositiveWidth,
    /// The stroke width is infinite or NaN.
    NonFiniteWidth,
    /// The miter limit is below one.
    MiterLimitBelowOne,
    /// A dash length is negative.
    NegativeDash,
    /// The dash lengths add up to zero.
    ZeroDashSum,
    /// A dash length or the dash phase is infinite or NaN.
    NonFiniteDash,
    /// The clip rectangle has a non-finite coordinate.
    InvalidClip,
}

impl fmt::Display for StrokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWidth => write!(f, "stroke width must be positive"),
            Self::NonFiniteWidth => write!(f, "stroke width must be finite"),
            Self::MiterLimitBelowOne => write!(f, "miter limit must be at least 1"),
            Self::NegativeDash => write!(f, "dash lengths must not be negative"),
            Self::ZeroDashSum => write!(f, "dash lengths must not all be zero"),
            Self::NonFiniteDash => write!(f, "dash lengths and phase must be finite"),
            Self::InvalidClip => write!(f, "clip rectangle must be finite"),
        }
    }
}

impl Error for StrokeError {}
