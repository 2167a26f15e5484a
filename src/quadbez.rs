// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use crate::{ControlPolygon, ParamCurve, Point};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(missing_docs, reason = "control points are self-explanatory")]
pub struct QuadBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline(always)]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    /// Subdivide using de Casteljau.
    fn subdivide_at(&self, t: f64) -> (Self, Self) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let pm = p01.lerp(p12, t);
        (Self::new(self.p0, p01, pm), Self::new(pm, p12, self.p2))
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ControlPolygon for QuadBez {
    fn control_polygon_len(&self) -> f64 {
        self.p0.distance(self.p1) + self.p1.distance(self.p2)
    }

    fn chord_len(&self) -> f64 {
        self.p0.distance(self.p2)
    }

    fn fast_len(&self) -> f64 {
        self.p0.manhattan_distance(self.p1) + self.p1.manhattan_distance(self.p2)
    }

    fn is_point(&self) -> bool {
        self.p0 == self.p1 && self.p1 == self.p2
    }
}
