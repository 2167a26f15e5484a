// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use crate::{ControlPolygon, ParamCurve, Point};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(missing_docs, reason = "control points are self-explanatory")]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline(always)]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// Subdivide using de Casteljau.
    fn subdivide_at(&self, t: f64) -> (Self, Self) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let pm = p012.lerp(p123, t);
        (
            Self::new(self.p0, p01, p012, pm),
            Self::new(pm, p123, p23, self.p3),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ControlPolygon for CubicBez {
    fn control_polygon_len(&self) -> f64 {
        self.p0.distance(self.p1) + self.p1.distance(self.p2) + self.p2.distance(self.p3)
    }

    fn chord_len(&self) -> f64 {
        self.p0.distance(self.p3)
    }

    fn fast_len(&self) -> f64 {
        self.p0.manhattan_distance(self.p1)
            + self.p1.manhattan_distance(self.p2)
            + self.p2.manhattan_distance(self.p3)
    }

    fn is_point(&self) -> bool {
        self.p0 == self.p1 && self.p1 == self.p2 && self.p2 == self.p3
    }
}

#[cfg(test)]
mod tests {
    use crate::{ControlPolygon, CubicBez, ParamCurve, Point};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn cubicbez_eval() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        assert_eq!(c.eval(0.0), c.p0);
        assert_eq!(c.eval(1.0), c.p3);
        assert_near(c.eval(0.5), Point::new(0.5, 0.75), 1e-12);
    }

    #[test]
    fn cubicbez_subdivide_at() {
        let c = CubicBez::new((0.0, 0.0), (1.0 / 3.0, 0.0), (2.0 / 3.0, 1.0 / 3.0), (1.0, 1.0));
        for &t in &[0.1, 0.5, 0.77] {
            let (a, b) = c.subdivide_at(t);
            assert_eq!(a.p3, b.p0);
            for i in 0..=10 {
                let u = i as f64 * 0.1;
                assert_near(a.eval(u), c.eval(u * t), 1e-12);
                assert_near(b.eval(u), c.eval(t + u * (1.0 - t)), 1e-12);
            }
        }
    }

    #[test]
    fn cubicbez_polygon() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 3.0), (4.0, 3.0), (4.0, 0.0));
        assert_eq!(c.control_polygon_len(), 10.0);
        assert_eq!(c.chord_len(), 4.0);
        assert_eq!(c.fast_len(), 10.0);
        assert!(c.chord_len() <= c.control_polygon_len());
    }
}
