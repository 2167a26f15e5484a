// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use crate::{ControlPolygon, ParamCurve, Point, Vec2};

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// The direction of travel, `p1 - p0`.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.p1 - self.p0
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subdivide_at(&self, t: f64) -> (Self, Self) {
        let pm = self.eval(t);
        (Self::new(self.p0, pm), Self::new(pm, self.p1))
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ControlPolygon for Line {
    fn control_polygon_len(&self) -> f64 {
        self.length()
    }

    fn chord_len(&self) -> f64 {
        self.length()
    }

    fn fast_len(&self) -> f64 {
        self.p0.manhattan_distance(self.p1)
    }

    fn is_point(&self) -> bool {
        self.p0 == self.p1
    }
}
