// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomial form of a Bézier segment, and the root finding built on it.
//!
//! A [`Curve`] holds the power-basis coefficients of one segment,
//! `x(t) = a t³ + b t² + c t + d` (and likewise for `y`), together with the
//! coefficients of the first derivative. It is scratch state: every call to
//! [`Curve::set`] overwrites it, and nothing about the previous segment
//! survives.

use arrayvec::ArrayVec;

use crate::common::{cubic_roots_in, quadratic_roots, sort_params};
use crate::{PathSeg, Point};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Upper bound on the false position iterations in
/// [`Curve::roots_of_roc_minus_w`].
const FALSE_POSITION_ITER_LIMIT: usize = 100;

/// Power-basis coefficients of a line, quadratic or cubic Bézier.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Curve {
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
    // Derivative: x'(t) = dax t² + dbx t + cx.
    dax: f64,
    day: f64,
    dbx: f64,
    dby: f64,
}

impl Curve {
    /// Create a curve from a segment.
    pub fn new(seg: &PathSeg) -> Self {
        let mut curve = Self::default();
        curve.set(seg);
        curve
    }

    /// Load the coefficients of `seg`, replacing whatever was there.
    pub fn set(&mut self, seg: &PathSeg) {
        match *seg {
            PathSeg::Cubic(c) => self.set_cubic(c.p0, c.p1, c.p2, c.p3),
            PathSeg::Quad(q) => self.set_quad(q.p0, q.p1, q.p2),
            PathSeg::Line(l) => self.set_line(l.p0, l.p1),
        }
    }

    /// Load the coefficients of a cubic.
    pub fn set_cubic(&mut self, p1: Point, p2: Point, p3: Point, p4: Point) {
        let dx32 = 3.0 * (p3.x - p2.x);
        let dy32 = 3.0 * (p3.y - p2.y);
        let dx21 = 3.0 * (p2.x - p1.x);
        let dy21 = 3.0 * (p2.y - p1.y);
        self.ax = (p4.x - p1.x) - dx32;
        self.ay = (p4.y - p1.y) - dy32;
        self.bx = dx32 - dx21;
        self.by = dy32 - dy21;
        self.cx = dx21;
        self.cy = dy21;
        self.dx = p1.x;
        self.dy = p1.y;
        self.dax = 3.0 * self.ax;
        self.day = 3.0 * self.ay;
        self.dbx = 2.0 * self.bx;
        self.dby = 2.0 * self.by;
    }

    /// Load the coefficients of a quadratic.
    pub fn set_quad(&mut self, p1: Point, p2: Point, p3: Point) {
        let dx21 = p2.x - p1.x;
        let dy21 = p2.y - p1.y;
        self.ax = 0.0;
        self.ay = 0.0;
        self.bx = (p3.x - p2.x) - dx21;
        self.by = (p3.y - p2.y) - dy21;
        self.cx = 2.0 * dx21;
        self.cy = 2.0 * dy21;
        self.dx = p1.x;
        self.dy = p1.y;
        self.dax = 0.0;
        self.day = 0.0;
        self.dbx = 2.0 * self.bx;
        self.dby = 2.0 * self.by;
    }

    /// Load the coefficients of a line.
    pub fn set_line(&mut self, p1: Point, p2: Point) {
        *self = Self {
            cx: p2.x - p1.x,
            cy: p2.y - p1.y,
            dx: p1.x,
            dy: p1.y,
            ..Self::default()
        };
    }

    /// Evaluate the curve at `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        Point::new(
            ((self.ax * t + self.bx) * t + self.cx) * t + self.dx,
            ((self.ay * t + self.by) * t + self.cy) * t + self.dy,
        )
    }

    /// The first derivative at `t`, as `(dx, dy)`.
    #[inline]
    pub fn deriv(&self, t: f64) -> (f64, f64) {
        (
            (self.dax * t + self.dbx) * t + self.cx,
            (self.day * t + self.dby) * t + self.cy,
        )
    }

    /// The second derivative at `t`, as `(ddx, ddy)`.
    #[inline]
    pub fn deriv2(&self, t: f64) -> (f64, f64) {
        (
            2.0 * self.dax * t + self.dbx,
            2.0 * self.day * t + self.dby,
        )
    }

    /// Parameters where `x'(t) = 0`, in no particular order and not
    /// restricted to `[0, 1]`.
    pub fn dx_roots(&self) -> ArrayVec<f64, 2> {
        quadratic_roots(self.dax, self.dbx, self.cx)
    }

    /// Parameters where `y'(t) = 0`, in no particular order and not
    /// restricted to `[0, 1]`.
    pub fn dy_roots(&self) -> ArrayVec<f64, 2> {
        quadratic_roots(self.day, self.dby, self.cy)
    }

    /// Inflection points: parameters where the cross product of the first
    /// and second derivatives vanishes.
    ///
    /// The cross product of a cubic's derivatives is only quadratic in `t`,
    /// so there are at most two.
    pub fn inf_points(&self) -> ArrayVec<f64, 2> {
        let a = self.dax * self.dby - self.dbx * self.day;
        let b = 2.0 * (self.cy * self.dax - self.day * self.cx);
        let c = self.cy * self.dbx - self.cx * self.dby;
        quadratic_roots(a, b, c)
    }

    /// Parameters in `[0, 1)` where the first and second derivatives are
    /// perpendicular, sorted.
    ///
    /// These are the extrema of the speed `|B'(t)|`, found as roots of the
    /// cubic `B'(t) · B''(t) = 0`.
    pub fn perpendicular_df_ddf(&self) -> ArrayVec<f64, 3> {
        let a = 2.0 * (self.dax * self.dax + self.day * self.day);
        let b = 3.0 * (self.dax * self.dbx + self.day * self.dby);
        let c = 2.0 * (self.dax * self.cx + self.day * self.cy)
            + self.dbx * self.dbx
            + self.dby * self.dby;
        let d = self.dbx * self.cx + self.dby * self.cy;
        let mut roots = cubic_roots_in(a, b, c, d, 0.0, 1.0);
        sort_params(&mut roots);
        roots
    }

    /// Parameters in `[0, 1)` where the squared radius of curvature equals
    /// `w2`.
    ///
    /// The radius of curvature has poles at inflections, so it cannot be
    /// bracketed directly. Instead the points where the derivatives are
    /// perpendicular (together with `t = 1`) split `[0, 1]` into intervals,
    /// and each interval whose ends straddle `w2` is searched with a false
    /// position solver. `err` is the relative tolerance of that search.
    ///
    /// Working with squared values avoids a square root per evaluation.
    pub fn roots_of_roc_minus_w(&self, w2: f64, err: f64) -> ArrayVec<f64, 4> {
        let mut bounds = ArrayVec::<f64, 4>::new();
        bounds.extend(self.perpendicular_df_ddf());
        bounds.push(1.0);

        let mut roots = ArrayVec::new();
        let mut t0 = 0.0;
        let mut ft0 = self.roc_sq(t0) - w2;
        for t1 in bounds {
            let ft1 = self.roc_sq(t1) - w2;
            if ft0 == 0.0 {
                roots.push(t0);
            } else if ft1 * ft0 < 0.0 {
                roots.push(self.false_position_roc_sq_minus_x(t0, t1, w2, err));
            }
            t0 = t1;
            ft0 = ft1;
        }
        roots
    }

    /// Parameters in `[0, 1)` where `x(t) = x`.
    pub fn x_points(&self, x: f64) -> ArrayVec<f64, 3> {
        cubic_roots_in(self.ax, self.bx, self.cx, self.dx - x, 0.0, 1.0)
    }

    /// Parameters in `[0, 1)` where `y(t) = y`.
    pub fn y_points(&self, y: f64) -> ArrayVec<f64, 3> {
        cubic_roots_in(self.ay, self.by, self.cy, self.dy - y, 0.0, 1.0)
    }

    /// Squared radius of curvature at `t`.
    ///
    /// With `D = |B'|²`, the radius of curvature is `D^1.5 / |B' × B''|`,
    /// and `|B' × B''|² = D |B''|² - (B' · B'')²`.
    fn roc_sq(&self, t: f64) -> f64 {
        let (dx, dy) = self.deriv(t);
        let (ddx, ddy) = self.deriv2(t);
        let dx2dy2 = dx * dx + dy * dy;
        let ddx2ddy2 = ddx * ddx + ddy * ddy;
        let ddxdxddydy = ddx * dx + ddy * dy;
        dx2dy2 * ((dx2dy2 * dx2dy2) / (dx2dy2 * ddx2ddy2 - ddxdxddydy * ddxdxddydy))
    }

    /// Regula falsi on `[s0, t1]` with the Illinois modification: when the
    /// same end is kept twice in a row, the function value at the other end
    /// is halved (then quartered, and so on) to force it to move.
    fn false_position_roc_sq_minus_x(&self, s0: f64, t1: f64, w2: f64, err: f64) -> f64 {
        let mut side: i32 = 0;
        let mut t = t1;
        let mut ft = eliminate_inf(self.roc_sq(t) - w2);
        let mut s = s0;
        let mut fs = eliminate_inf(self.roc_sq(s) - w2);
        let mut r = s;
        let mut i = 0;
        while i < FALSE_POSITION_ITER_LIMIT && (t - s).abs() > err * (t + s).abs() {
            r = (fs * t - ft * s) / (fs - ft);
            let fr = self.roc_sq(r) - w2;
            if same_sign(fr, ft) {
                ft = fr;
                t = r;
                if side < 0 {
                    fs /= 2f64.powi(-side);
                    side -= 1;
                } else {
                    side = -1;
                }
            } else if fr * fs > 0.0 {
                fs = fr;
                s = r;
                if side > 0 {
                    ft /= 2f64.powi(side);
                    side += 1;
                } else {
                    side = 1;
                }
            } else {
                break;
            }
            i += 1;
        }
        r
    }
}

#[inline]
fn eliminate_inf(x: f64) -> f64 {
    if x == f64::INFINITY {
        f64::MAX
    } else if x == f64::NEG_INFINITY {
        f64::MIN
    } else {
        x
    }
}

#[inline]
fn same_sign(x: f64, y: f64) -> bool {
    (x < 0.0 && y < 0.0) || (x > 0.0 && y > 0.0)
}
