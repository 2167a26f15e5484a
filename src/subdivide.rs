// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting segments at interesting parameters.
//!
//! The stroker's offset-curve approximation and the dasher's arc-length
//! search both work best on pieces that are monotonic in x and y, free of
//! inflections, and whose radius of curvature stays on one side of the
//! stroke half width. [`Monotonizer`] cuts a curve into such pieces.
//! [`CurveClipSplitter`] cuts a long segment where it crosses the clip
//! rectangle, so that the parts outside can be rejected wholesale.

use arrayvec::ArrayVec;

use crate::common::sort_params;
use crate::{ControlPolygon, CubicBez, Curve, Line, Outcode, ParamCurve, PathSeg, Point, QuadBez, Rect};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Most split parameters [`find_subdiv_points`] can report: two for each
/// axis, two inflections and four radius-of-curvature roots.
pub const MAX_SUBDIV_POINTS: usize = 10;

/// Most split parameters [`find_clip_points`] can report: three per edge.
pub const MAX_CLIP_POINTS: usize = 12;

/// Split parameters closer than this to either end are dropped.
const SUBDIV_T_MARGIN: f64 = 0.0001;

/// Extra margin around the clip rectangle before splitting at it.
pub const CLIP_RECT_PADDING: f64 = 1.0;

/// Segments shorter than this (manhattan length, device units) are never
/// split at the clip rectangle.
pub const DEFAULT_SUBDIVIDER_MIN_LENGTH: f64 = 100.0;

/// Parameters at which a quadratic or cubic should be split before its
/// offset curve is approximated, sorted and within `(0, 1)`.
///
/// `half_width_sq` is the squared half width of the stroke; pass zero to
/// skip the radius-of-curvature test. The curve is first rotated so that
/// its first control leg lies along the x axis, so that a rotated quarter
/// circle is not cut at its axis extrema.
pub fn find_subdiv_points(
    curve: &mut Curve,
    seg: &PathSeg,
    half_width_sq: f64,
) -> ArrayVec<f64, MAX_SUBDIV_POINTS> {
    let (p0, p1) = match seg {
        PathSeg::Line(_) => return ArrayVec::new(),
        PathSeg::Quad(q) => (q.p0, q.p1),
        PathSeg::Cubic(c) => (c.p0, c.p1),
    };
    let x12 = p1.x - p0.x;
    let y12 = p1.y - p0.y;
    if x12 != 0.0 && y12 != 0.0 {
        let hypot = x12.hypot(y12);
        let cos = x12 / hypot;
        let sin = y12 / hypot;
        let rot = |p: Point| Point::new(cos * p.x + sin * p.y, cos * p.y - sin * p.x);
        match seg {
            PathSeg::Quad(q) => curve.set_quad(rot(q.p0), rot(q.p1), rot(q.p2)),
            PathSeg::Cubic(c) => curve.set_cubic(rot(c.p0), rot(c.p1), rot(c.p2), rot(c.p3)),
            PathSeg::Line(_) => unreachable!("lines are never subdivided"),
        }
    } else {
        curve.set(seg);
    }

    let mut ts = ArrayVec::<f64, MAX_SUBDIV_POINTS>::new();
    ts.extend(curve.dx_roots());
    ts.extend(curve.dy_roots());
    if matches!(seg, PathSeg::Cubic(_)) {
        ts.extend(curve.inf_points());
    }
    ts.extend(curve.roots_of_roc_minus_w(half_width_sq, 0.0001));
    ts.retain(|t| *t >= SUBDIV_T_MARGIN && *t < 1.0 - SUBDIV_T_MARGIN);
    sort_params(&mut ts);
    ts
}

/// Parameters at which `seg` crosses the edges of `clip` that `outcode`
/// names, sorted and strictly within `(0, 1)`.
pub fn find_clip_points(
    curve: &mut Curve,
    seg: &PathSeg,
    outcode: Outcode,
    clip: &Rect,
) -> ArrayVec<f64, MAX_CLIP_POINTS> {
    curve.set(seg);
    let mut ts = ArrayVec::<f64, MAX_CLIP_POINTS>::new();
    if outcode.contains(Outcode::LEFT) {
        ts.extend(curve.x_points(clip.x0));
    }
    if outcode.contains(Outcode::RIGHT) {
        ts.extend(curve.x_points(clip.x1));
    }
    if outcode.contains(Outcode::TOP) {
        ts.extend(curve.y_points(clip.y0));
    }
    if outcode.contains(Outcode::BOTTOM) {
        ts.extend(curve.y_points(clip.y1));
    }
    ts.retain(|t| *t > 0.0);
    sort_params(&mut ts);
    ts
}

/// Split `seg` at each of the increasing parameters `ts`.
///
/// Each cut is made on the remainder left by the previous one, so the
/// parameters are rescaled as the curve shrinks.
pub fn split_at_params<const N: usize>(seg: PathSeg, ts: &[f64]) -> ArrayVec<PathSeg, N> {
    let mut pieces = ArrayVec::new();
    let mut rest = seg;
    let mut prev_t = 0.0;
    for &t in ts {
        let (left, right) = rest.subdivide_at((t - prev_t) / (1.0 - prev_t));
        pieces.push(left);
        rest = right;
        prev_t = t;
    }
    pieces.push(rest);
    pieces
}

/// Cuts curves into pieces that are simple to offset and measure.
#[derive(Clone, Debug)]
pub struct Monotonizer {
    curve: Curve,
    half_width_sq: f64,
}

impl Monotonizer {
    /// A monotonizer for strokes of the given line width.
    ///
    /// A width of zero disables the radius-of-curvature split.
    pub fn new(line_width: f64) -> Self {
        Self {
            curve: Curve::default(),
            half_width_sq: line_width * line_width / 4.0,
        }
    }

    /// Split `seg` at its monotonicity, inflection and radius-of-curvature
    /// parameters. Lines come back unchanged.
    pub fn split(&mut self, seg: PathSeg) -> ArrayVec<PathSeg, { MAX_SUBDIV_POINTS + 1 }> {
        let ts = find_subdiv_points(&mut self.curve, &seg, self.half_width_sq);
        split_at_params(seg, &ts)
    }
}

/// Cuts long segments where they cross a clip rectangle.
#[derive(Clone, Debug)]
pub struct CurveClipSplitter {
    curve: Curve,
    clip: Rect,
    min_length: f64,
}

impl CurveClipSplitter {
    /// A splitter for `clip`, which is padded by [`CLIP_RECT_PADDING`].
    ///
    /// `inv_scale` converts the device-space minimum length into the space
    /// the splitter runs in; pass `1.0` when they are the same.
    pub fn new(clip: Rect, inv_scale: f64) -> Self {
        let min_length = if inv_scale == 0.0 {
            DEFAULT_SUBDIVIDER_MIN_LENGTH
        } else {
            DEFAULT_SUBDIVIDER_MIN_LENGTH * inv_scale
        };
        Self {
            curve: Curve::default(),
            clip: clip.inflate(CLIP_RECT_PADDING, CLIP_RECT_PADDING),
            min_length,
        }
    }

    /// Override the minimum length below which segments are left whole.
    #[must_use]
    pub fn with_min_length(mut self, min_length: f64) -> Self {
        self.min_length = min_length;
        self
    }

    /// Split `seg` at its crossings with the edges in `outcode_or`, the
    /// union of the outcodes of its points.
    ///
    /// Returns `None` when the segment is too short to bother or does not
    /// cross any of those edges.
    pub fn split(
        &mut self,
        seg: PathSeg,
        outcode_or: Outcode,
    ) -> Option<ArrayVec<PathSeg, { MAX_CLIP_POINTS + 1 }>> {
        if seg.fast_len() <= self.min_length {
            return None;
        }
        let ts = find_clip_points(&mut self.curve, &seg, outcode_or, &self.clip);
        if ts.is_empty() {
            return None;
        }
        Some(split_at_params(seg, &ts))
    }

    /// Convenience for [`split`](Self::split) on a line.
    pub fn split_line(
        &mut self,
        p0: Point,
        p1: Point,
        outcode_or: Outcode,
    ) -> Option<ArrayVec<PathSeg, { MAX_CLIP_POINTS + 1 }>> {
        self.split(PathSeg::Line(Line::new(p0, p1)), outcode_or)
    }

    /// Convenience for [`split`](Self::split) on a quadratic.
    pub fn split_quad(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        outcode_or: Outcode,
    ) -> Option<ArrayVec<PathSeg, { MAX_CLIP_POINTS + 1 }>> {
        self.split(PathSeg::Quad(QuadBez::new(p0, p1, p2)), outcode_or)
    }

    /// Convenience for [`split`](Self::split) on a cubic.
    pub fn split_cubic(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
        outcode_or: Outcode,
    ) -> Option<ArrayVec<PathSeg, { MAX_CLIP_POINTS + 1 }>> {
        self.split(PathSeg::Cubic(CubicBez::new(p0, p1, p2, p3)), outcode_or)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    fn assert_chained(pieces: &[PathSeg], seg: &PathSeg) {
        assert_eq!(pieces[0].start(), seg.start());
        assert_near(pieces[pieces.len() - 1].end(), seg.end(), 1e-12);
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn split_at_params_rescales() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        let seg = PathSeg::Cubic(c);
        let pieces: ArrayVec<PathSeg, 4> = split_at_params(seg, &[0.25, 0.5, 0.75]);
        assert_eq!(pieces.len(), 4);
        assert_chained(&pieces, &seg);
        assert_near(pieces[1].start(), c.eval(0.25), 1e-12);
        assert_near(pieces[2].start(), c.eval(0.5), 1e-12);
        assert_near(pieces[3].start(), c.eval(0.75), 1e-12);
    }

    #[test]
    fn monotonizer_pieces_are_monotonic() {
        let seg = PathSeg::Cubic(CubicBez::new(
            (0.0, 0.0),
            (100.0, 200.0),
            (-50.0, 200.0),
            (80.0, -30.0),
        ));
        let mut m = Monotonizer::new(0.0);
        let pieces = m.split(seg);
        assert!(pieces.len() > 1);
        assert_chained(&pieces, &seg);
    }

    #[test]
    fn monotonizer_keeps_lines() {
        let seg = PathSeg::Line(Line::new((0.0, 0.0), (5.0, 5.0)));
        let pieces = Monotonizer::new(2.0).split(seg);
        assert_eq!(pieces.as_slice(), &[seg]);
    }

    #[test]
    fn rotated_arc_is_not_split_at_axes() {
        // A quarter circle rotated by 45 degrees: in the unrotated frame its
        // y extremum falls in the middle, but it is a single smooth arc.
        let k = 0.5522847498;
        let (s, c) = (core::f64::consts::FRAC_1_SQRT_2, core::f64::consts::FRAC_1_SQRT_2);
        let r = |x: f64, y: f64| Point::new(100.0 * (c * x - s * y), 100.0 * (s * x + c * y));
        let seg = PathSeg::Cubic(CubicBez::new(r(1.0, 0.0), r(1.0, k), r(k, 1.0), r(0.0, 1.0)));
        let mut curve = Curve::default();
        let ts = find_subdiv_points(&mut curve, &seg, 0.0);
        // Along its first leg the arc's extrema sit on the endpoints.
        assert!(ts.is_empty(), "{ts:?}");
    }

    #[test]
    fn clip_splitter_cuts_at_edges() {
        let clip = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut splitter = CurveClipSplitter::new(clip, 1.0);
        let p0 = Point::new(-200.0, 50.0);
        let p1 = Point::new(300.0, 50.0);
        let oc = Outcode::of(p0, &clip) | Outcode::of(p1, &clip);
        let pieces = splitter.split_line(p0, p1, oc).unwrap();
        assert_eq!(pieces.len(), 3);
        assert_near(pieces[0].end(), Point::new(-1.0, 50.0), 1e-9);
        assert_near(pieces[1].end(), Point::new(101.0, 50.0), 1e-9);
    }

    #[test]
    fn clip_splitter_ignores_short_segments() {
        let clip = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut splitter = CurveClipSplitter::new(clip, 1.0);
        let p0 = Point::new(-20.0, 50.0);
        let p1 = Point::new(20.0, 50.0);
        assert!(splitter.split_line(p0, p1, Outcode::LEFT).is_none());
        let mut eager = CurveClipSplitter::new(clip, 1.0).with_min_length(0.0);
        assert_eq!(eager.split_line(p0, p1, Outcode::LEFT).map(|p| p.len()), Some(2));
    }
}
