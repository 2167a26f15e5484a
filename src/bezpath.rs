// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths (up to cubic).

use alloc::vec::Vec;
use core::iter::{Extend, FromIterator};
use core::slice;

use crate::{ControlPolygon, CubicBez, Line, ParamCurve, PathConsumer, Point, QuadBez};

/// A Bézier path, possibly with multiple subpaths.
///
/// This is the collector at the end of a pipeline; it records every
/// command it receives, in order.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic Bézier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic Bézier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

/// A segment of a Bézier path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg {
    /// A line segment.
    Line(Line),
    /// A quadratic bezier segment.
    Quad(QuadBez),
    /// A cubic bezier segment.
    Cubic(CubicBez),
}

impl BezPath {
    /// Create a new path.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<PathEl>) -> Self {
        Self(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(PathEl::QuadTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Returns an iterator over the path's elements.
    pub fn iter(&self) -> impl Iterator<Item = PathEl> + Clone + '_ {
        self.0.iter().copied()
    }

    /// Iterate over the path segments.
    ///
    /// A `ClosePath` back to a distinct start point produces a line segment.
    pub fn segments(&self) -> BezPathSegs<'_> {
        let first = match self.0.first() {
            Some(PathEl::MoveTo(p)) => *p,
            _ => Point::ZERO,
        };
        BezPathSegs {
            c: self.0.iter(),
            start: first,
            last: first,
        }
    }

    /// Returns `true` if the path contains no segments.
    pub fn is_empty(&self) -> bool {
        self.0
            .iter()
            .all(|el| matches!(*el, PathEl::MoveTo(..) | PathEl::ClosePath))
    }

    /// The number of subpaths, counted as `MoveTo` elements.
    pub fn subpath_count(&self) -> usize {
        self.0
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(..)))
            .count()
    }
}

impl FromIterator<PathEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        let el_vec: Vec<_> = iter.into_iter().collect();
        Self::from_vec(el_vec)
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = core::iter::Copied<slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().copied()
    }
}

impl IntoIterator for BezPath {
    type Item = PathEl;
    type IntoIter = alloc::vec::IntoIter<PathEl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl PathConsumer for BezPath {
    fn move_to(&mut self, p: Point) {
        self.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    fn path_done(&mut self) {}
}

/// An iterator over the segments of a [`BezPath`].
#[derive(Clone, Debug)]
pub struct BezPathSegs<'a> {
    c: slice::Iter<'a, PathEl>,
    start: Point,
    last: Point,
}

impl Iterator for BezPathSegs<'_> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.c {
            let (ret, last) = match *el {
                PathEl::MoveTo(p) => {
                    self.start = p;
                    self.last = p;
                    continue;
                }
                PathEl::LineTo(p) => (PathSeg::Line(Line::new(self.last, p)), p),
                PathEl::QuadTo(p1, p2) => (PathSeg::Quad(QuadBez::new(self.last, p1, p2)), p2),
                PathEl::CurveTo(p1, p2, p3) => {
                    (PathSeg::Cubic(CubicBez::new(self.last, p1, p2, p3)), p3)
                }
                PathEl::ClosePath => {
                    if self.last != self.start {
                        (PathSeg::Line(Line::new(self.last, self.start)), self.start)
                    } else {
                        continue;
                    }
                }
            };

            self.last = last;
            return Some(ret);
        }
        None
    }
}

impl ParamCurve for PathSeg {
    fn eval(&self, t: f64) -> Point {
        match *self {
            Self::Line(line) => line.eval(t),
            Self::Quad(quad) => quad.eval(t),
            Self::Cubic(cubic) => cubic.eval(t),
        }
    }

    fn subdivide_at(&self, t: f64) -> (Self, Self) {
        match *self {
            Self::Line(line) => {
                let (a, b) = line.subdivide_at(t);
                (Self::Line(a), Self::Line(b))
            }
            Self::Quad(quad) => {
                let (a, b) = quad.subdivide_at(t);
                (Self::Quad(a), Self::Quad(b))
            }
            Self::Cubic(cubic) => {
                let (a, b) = cubic.subdivide_at(t);
                (Self::Cubic(a), Self::Cubic(b))
            }
        }
    }

    fn start(&self) -> Point {
        match *self {
            Self::Line(line) => line.p0,
            Self::Quad(quad) => quad.p0,
            Self::Cubic(cubic) => cubic.p0,
        }
    }

    fn end(&self) -> Point {
        match *self {
            Self::Line(line) => line.p1,
            Self::Quad(quad) => quad.p2,
            Self::Cubic(cubic) => cubic.p3,
        }
    }
}

impl ControlPolygon for PathSeg {
    fn control_polygon_len(&self) -> f64 {
        match self {
            Self::Line(line) => line.control_polygon_len(),
            Self::Quad(quad) => quad.control_polygon_len(),
            Self::Cubic(cubic) => cubic.control_polygon_len(),
        }
    }

    fn chord_len(&self) -> f64 {
        match self {
            Self::Line(line) => line.chord_len(),
            Self::Quad(quad) => quad.chord_len(),
            Self::Cubic(cubic) => cubic.chord_len(),
        }
    }

    fn fast_len(&self) -> f64 {
        match self {
            Self::Line(line) => line.fast_len(),
            Self::Quad(quad) => quad.fast_len(),
            Self::Cubic(cubic) => cubic.fast_len(),
        }
    }

    fn is_point(&self) -> bool {
        match self {
            Self::Line(line) => line.is_point(),
            Self::Quad(quad) => quad.is_point(),
            Self::Cubic(cubic) => cubic.is_point(),
        }
    }
}

impl PathSeg {
    /// Send this segment's drawing command to a consumer.
    ///
    /// Only the command is emitted; the consumer is assumed to already be
    /// at the segment's start point.
    pub fn emit(&self, out: &mut (impl PathConsumer + ?Sized)) {
        match *self {
            Self::Line(line) => out.line_to(line.p1),
            Self::Quad(quad) => out.quad_to(quad.p1, quad.p2),
            Self::Cubic(cubic) => out.curve_to(cubic.p1, cubic.p2, cubic.p3),
        }
    }

    /// Returns a new `PathSeg` describing the same path as `self`, but with
    /// the points reversed.
    #[must_use]
    pub fn reverse(&self) -> Self {
        match self {
            Self::Line(Line { p0, p1 }) => Self::Line(Line::new(*p1, *p0)),
            Self::Quad(q) => Self::Quad(QuadBez::new(q.p2, q.p1, q.p0)),
            Self::Cubic(c) => Self::Cubic(CubicBez::new(c.p3, c.p2, c.p1, c.p0)),
        }
    }

    /// Is this segment [finite]?
    ///
    /// [finite]: f64::is_finite
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Line(l) => l.p0.is_finite() && l.p1.is_finite(),
            Self::Quad(q) => q.p0.is_finite() && q.p1.is_finite() && q.p2.is_finite(),
            Self::Cubic(c) => {
                c.p0.is_finite() && c.p1.is_finite() && c.p2.is_finite() && c.p3.is_finite()
            }
        }
    }
}

impl From<Line> for PathSeg {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<QuadBez> for PathSeg {
    fn from(quad: QuadBez) -> Self {
        Self::Quad(quad)
    }
}

impl From<CubicBez> for PathSeg {
    fn from(cubic: CubicBez) -> Self {
        Self::Cubic(cubic)
    }
}
