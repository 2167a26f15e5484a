// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a scalar.

use crate::Point;

/// A curve parametrized by a scalar.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// Split the curve at parameter `t`.
    ///
    /// The first curve covers `[0, t]` and the second `[t, 1]`; both are
    /// reparametrized onto `[0, 1]`.
    fn subdivide_at(&self, t: f64) -> (Self, Self);

    /// Subdivide into (roughly) halves.
    #[inline]
    fn subdivide(&self) -> (Self, Self) {
        self.subdivide_at(0.5)
    }

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }
}

/// Measurements of a curve's control polygon.
///
/// These are the cheap length estimates the arc-length iterator and the
/// clip splitter work with.
pub trait ControlPolygon {
    /// Sum of the lengths of the control polygon legs.
    fn control_polygon_len(&self) -> f64;

    /// Distance from start to end.
    fn chord_len(&self) -> f64;

    /// Sum of the manhattan lengths of the control polygon legs.
    ///
    /// An upper bound of the arc length that needs no square roots.
    fn fast_len(&self) -> f64;

    /// Returns `true` if all control points coincide.
    fn is_point(&self) -> bool;
}
