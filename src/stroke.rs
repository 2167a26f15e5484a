// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::borrow::Borrow;

use smallvec::SmallVec;

use crate::{BezPath, PathEl, Pipeline, StrokeError};

/// Defines the connection between two segments of a stroke.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Join {
    /// A straight line connecting the segments.
    Bevel,
    /// The segments are extended to their natural intersection point.
    ///
    /// Falls back to [`Bevel`](Self::Bevel) when the intersection is farther
    /// than the miter limit times half the stroke width from the vertex.
    Miter,
    /// An arc between the segments.
    Round,
}

/// Defines the shape to be drawn at the ends of a stroke.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cap {
    /// Flat cap.
    Butt,
    /// Square cap with dimensions equal to half the stroke width.
    Square,
    /// Rounded cap with radius equal to half the stroke width.
    Round,
}

/// Describes the visual style of a stroke.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// Width of the stroke.
    pub width: f64,
    /// Style for connecting segments of the stroke.
    pub join: Join,
    /// Limit for miter joins, as a multiple of half the width.
    pub miter_limit: f64,
    /// Style for capping the beginning of an open subpath.
    pub start_cap: Cap,
    /// Style for capping the end of an open subpath.
    pub end_cap: Cap,
    /// Lengths of dashes in alternating on/off order.
    pub dash_pattern: Dashes,
    /// Offset of the first dash.
    pub dash_offset: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            join: Join::Miter,
            miter_limit: 10.0,
            start_cap: Cap::Square,
            end_cap: Cap::Square,
            dash_pattern: Dashes::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    /// Creates a new stroke with the specified width.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Builder method for setting the join style.
    #[must_use]
    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    /// Builder method for setting the limit for miter joins.
    #[must_use]
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Builder method for setting the cap style for the start of the stroke.
    #[must_use]
    pub fn with_start_cap(mut self, cap: Cap) -> Self {
        self.start_cap = cap;
        self
    }

    /// Builder method for setting the cap style for the end of the stroke.
    #[must_use]
    pub fn with_end_cap(mut self, cap: Cap) -> Self {
        self.end_cap = cap;
        self
    }

    /// Builder method for setting the cap style.
    #[must_use]
    pub fn with_caps(mut self, cap: Cap) -> Self {
        self.start_cap = cap;
        self.end_cap = cap;
        self
    }

    /// Builder method for setting the dashing parameters.
    #[must_use]
    pub fn with_dashes<P>(mut self, offset: f64, pattern: P) -> Self
    where
        P: IntoIterator,
        P::Item: Borrow<f64>,
    {
        self.dash_offset = offset;
        self.dash_pattern.clear();
        self.dash_pattern
            .extend(pattern.into_iter().map(|dash| *dash.borrow()));
        self
    }

    /// Returns `true` if the stroke has a dash pattern.
    #[inline]
    pub fn is_dashed(&self) -> bool {
        !self.dash_pattern.is_empty()
    }

    /// Check that the style describes a drawable stroke.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the width, the miter limit or
    /// the dash pattern.
    pub fn validate(&self) -> Result<(), StrokeError> {
        if !self.width.is_finite() {
            return Err(StrokeError::NonFiniteWidth);
        }
        if self.width <= 0.0 {
            return Err(StrokeError::NonPositiveWidth);
        }
        if self.miter_limit.is_nan() || self.miter_limit < 1.0 {
            return Err(StrokeError::MiterLimitBelowOne);
        }
        if self.is_dashed() {
            if !self.dash_offset.is_finite() || self.dash_pattern.iter().any(|d| !d.is_finite()) {
                return Err(StrokeError::NonFiniteDash);
            }
            if self.dash_pattern.iter().any(|&d| d < 0.0) {
                return Err(StrokeError::NegativeDash);
            }
            if self.dash_pattern.iter().sum::<f64>() == 0.0 {
                return Err(StrokeError::ZeroDashSum);
            }
        }
        Ok(())
    }

    /// How far the outline can reach from the path: half the width, more
    /// for square caps and miter joins.
    pub(crate) fn clip_margin(&self) -> f64 {
        let half_width = self.width / 2.0;
        let mut margin = half_width;
        if self.start_cap == Cap::Square || self.end_cap == Cap::Square {
            margin *= core::f64::consts::SQRT_2;
        }
        if self.join == Join::Miter && margin < self.miter_limit * half_width {
            margin = self.miter_limit * half_width;
        }
        margin
    }

    /// The same style with every length multiplied by `scale`.
    pub(crate) fn scaled(&self, scale: f64) -> Self {
        Self {
            width: self.width * scale,
            dash_pattern: self.dash_pattern.iter().map(|d| d * scale).collect(),
            dash_offset: self.dash_offset * scale,
            ..self.clone()
        }
    }
}

/// Collection of values representing lengths in a dash pattern.
pub type Dashes = SmallVec<[f64; 4]>;

/// Expand a stroke into a fill.
///
/// The path is dashed first if the style has a dash pattern.
pub fn stroke(path: impl IntoIterator<Item = PathEl>, style: &Stroke) -> BezPath {
    let mut out = BezPath::new();
    Pipeline::new()
        .with_stroke(style.clone())
        .run(path, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use crate::{stroke, BezPath, Cap, Join, PathEl, Stroke, StrokeError};

    #[test]
    fn defaults() {
        let style = Stroke::default();
        assert_eq!(style.width, 1.0);
        assert_eq!(style.join, Join::Miter);
        assert_eq!(style.miter_limit, 10.0);
        assert_eq!(style.start_cap, Cap::Square);
        assert_eq!(style.end_cap, Cap::Square);
        assert!(!style.is_dashed());
        assert_eq!(style.validate(), Ok(()));
    }

    #[test]
    fn builders() {
        let style = Stroke::new(3.0)
            .with_join(Join::Round)
            .with_caps(Cap::Butt)
            .with_end_cap(Cap::Round)
            .with_dashes(1.5, [4.0, 2.0]);
        assert_eq!(style.width, 3.0);
        assert_eq!(style.start_cap, Cap::Butt);
        assert_eq!(style.end_cap, Cap::Round);
        assert_eq!(style.dash_pattern.as_slice(), &[4.0, 2.0]);
        assert_eq!(style.dash_offset, 1.5);

        assert_eq!(style.clip_margin(), 1.5);
        assert_eq!(Stroke::new(2.0).clip_margin(), 10.0);
        assert_eq!(
            Stroke::new(2.0).with_join(Join::Bevel).clip_margin(),
            core::f64::consts::SQRT_2
        );

        let scaled = style.scaled(2.0);
        assert_eq!(scaled.width, 6.0);
        assert_eq!(scaled.dash_pattern.as_slice(), &[8.0, 4.0]);
        assert_eq!(scaled.dash_offset, 3.0);
        assert_eq!(scaled.join, Join::Round);
    }

    #[test]
    fn validation() {
        assert_eq!(
            Stroke::new(0.0).validate(),
            Err(StrokeError::NonPositiveWidth)
        );
        assert_eq!(
            Stroke::new(f64::NAN).validate(),
            Err(StrokeError::NonFiniteWidth)
        );
        assert_eq!(
            Stroke::new(1.0).with_miter_limit(0.5).validate(),
            Err(StrokeError::MiterLimitBelowOne)
        );
        assert_eq!(
            Stroke::new(1.0).with_dashes(0.0, [1.0, -1.0]).validate(),
            Err(StrokeError::NegativeDash)
        );
        assert_eq!(
            Stroke::new(1.0).with_dashes(0.0, [0.0, 0.0]).validate(),
            Err(StrokeError::ZeroDashSum)
        );
        assert_eq!(
            Stroke::new(1.0).with_dashes(f64::INFINITY, [1.0]).validate(),
            Err(StrokeError::NonFiniteDash)
        );
    }

    #[test]
    fn stroke_closes_every_subpath() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((50.0, 0.0));
        path.curve_to((80.0, 0.0), (100.0, 20.0), (100.0, 50.0));
        path.move_to((0.0, 100.0));
        path.line_to((0.0, 150.0));
        let out = stroke(&path, &Stroke::new(4.0).with_join(Join::Round));
        assert_eq!(out.subpath_count(), 2);
        let mut open = false;
        for el in out.iter() {
            match el {
                PathEl::MoveTo(_) => {
                    assert!(!open);
                    open = true;
                }
                PathEl::ClosePath => open = false,
                _ => assert!(open),
            }
        }
        assert!(!open);
    }
}
