// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke outline generation.
//!
//! A [`Stroker`] turns each incoming subpath into the outline of its
//! stroke. While walking the subpath it emits the left-hand boundary
//! (offset by half the width) straight to its output and records the
//! right-hand boundary on a [`SegmentStack`]; at the end of the subpath the
//! stack is popped, which traces the right-hand boundary backward, and the
//! two are joined by caps or, for a closed subpath, by the closing join.

use arrayvec::ArrayVec;

use crate::common::{ulp, within};
use crate::subdivide::MAX_SUBDIV_POINTS;
use crate::{
    Cap, CubicBez, CurveClipSplitter, Join, Line, Monotonizer, Outcode, ParamCurve, PathConsumer,
    PathSeg, Point, QuadBez, Rect, SegOutcodes, SegRecord, SegmentStack, Stroke, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Round joins whose two offset points are closer than this (squared) are
/// not drawn.
const ROUND_JOIN_THRESHOLD: f64 = 1.0 / 64.0;

/// Control arm length, relative to the radius, of a cubic approximating a
/// quarter circle.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Consecutive tangents closer to parallel than this (sine of the angle)
/// are not joined.
const COLLINEAR_JOIN_EPS: f64 = 1e-10;

const UNIT_X: Vec2 = Vec2::new(1.0, 0.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// A subpath was started but nothing drawn yet.
    MoveTo,
    /// At least one segment of the current subpath was drawn.
    DrawingOpTo,
    /// The last subpath was closed.
    Close,
}

#[derive(Clone, Debug)]
struct StrokeClip {
    rect: Rect,
    splitter: CurveClipSplitter,
}

/// A [`PathConsumer`] that strokes the path it receives and sends the
/// outline to another consumer.
///
/// The outline of each subpath is sent as one or two closed subpaths meant
/// to be filled with the nonzero rule.
#[derive(Clone, Debug)]
pub struct Stroker<C> {
    out: C,
    half_width: f64,
    // 1 / (2 * half_width²), normalizes dot products of offsets.
    inv_half_width_sq2: f64,
    join: Join,
    start_cap: Cap,
    end_cap: Cap,
    miter_limit_sq: f64,
    clip_margin: f64,
    state: State,
    // Start point of the subpath, its tangent and offset.
    start: Point,
    start_dir: Vec2,
    start_offset: Vec2,
    // Current point, the tangent arriving at it and its offset.
    cur: Point,
    cur_dir: Vec2,
    cur_offset: Vec2,
    reverse: SegmentStack,
    closed: bool,
    clip: Option<StrokeClip>,
    c_outcode: Outcode,
    s_outcode: Outcode,
    // The subpath was cut by the clip rectangle.
    opened: bool,
    cap_start: bool,
    monotonizer: Option<Monotonizer>,
    // Cleared while the clip splitter feeds pieces back in.
    subdivide: bool,
}

impl<C: PathConsumer> Stroker<C> {
    /// Create a stroker drawing with `style` into `out`.
    ///
    /// The dash pattern of `style` is ignored; put a
    /// [`Dasher`](crate::Dasher) in front of the stroker for that.
    pub fn new(out: C, style: &Stroke) -> Self {
        let half_width = style.width / 2.0;
        let miter_limit = style.miter_limit * half_width;
        Self {
            clip_margin: style.clip_margin(),
            out,
            half_width,
            inv_half_width_sq2: 1.0 / (2.0 * half_width * half_width),
            join: style.join,
            start_cap: style.start_cap,
            end_cap: style.end_cap,
            miter_limit_sq: miter_limit * miter_limit,
            state: State::Close,
            start: Point::ZERO,
            start_dir: UNIT_X,
            start_offset: Vec2::ZERO,
            cur: Point::ZERO,
            cur_dir: UNIT_X,
            cur_offset: Vec2::ZERO,
            reverse: SegmentStack::new(),
            closed: false,
            clip: None,
            c_outcode: Outcode::empty(),
            s_outcode: Outcode::empty(),
            opened: false,
            cap_start: false,
            monotonizer: Some(Monotonizer::new(style.width)),
            subdivide: true,
        }
    }

    /// Whether to split curves into simple pieces before offsetting them,
    /// and long segments at the clip rectangle. On by default.
    #[must_use]
    pub fn with_subdivision(mut self, subdivide: bool) -> Self {
        self.monotonizer = subdivide.then(|| Monotonizer::new(2.0 * self.half_width));
        self.subdivide = subdivide;
        self
    }

    /// Skip the parts of the stroke that lie outside `clip`.
    ///
    /// The rectangle is grown by the farthest the outline can reach from
    /// the path, so nothing visible is lost. `inv_scale` scales the
    /// device-space length below which segments are not split at the
    /// rectangle; pass `1.0` when the stroker runs in device space.
    #[must_use]
    pub fn with_clip(mut self, clip: Rect, inv_scale: f64) -> Self {
        let margin = self.clip_margin;
        let rect = clip.inflate(margin, margin);
        log::trace!("stroker clip {rect:?} (margin {margin})");
        self.clip = Some(StrokeClip {
            rect,
            splitter: CurveClipSplitter::new(rect, inv_scale),
        });
        self
    }

    /// Get a reference to the output consumer.
    pub fn get_ref(&self) -> &C {
        &self.out
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }

    fn outcode(&self, p: Point) -> Outcode {
        match &self.clip {
            Some(clip) => Outcode::of(p, &clip.rect),
            None => Outcode::empty(),
        }
    }

    fn emit_line_to(&mut self, p: Point, rev: bool) {
        if rev {
            self.reverse.push_line(p);
        } else {
            self.out.line_to(p);
        }
    }

    fn emit_curve_to(&mut self, p0: Point, p1: Point, p2: Point, p3: Point, rev: bool) {
        if rev {
            self.reverse.push(SegRecord::Cubic(p2, p1, p0));
        } else {
            self.out.curve_to(p1, p2, p3);
        }
    }

    /// Handle a segment that touches the outside of the clip rectangle.
    ///
    /// Returns `true` if the segment was consumed: either it lies beyond one
    /// side and only moved the pen, or it was cut at the rectangle and the
    /// pieces were fed back in.
    fn clip_segment(&mut self, seg: PathSeg) -> bool {
        let Some(clip) = &mut self.clip else {
            return false;
        };
        let outcode0 = self.c_outcode;
        let codes = SegOutcodes::of(&seg, outcode0, &clip.rect);
        if !codes.union.is_empty() {
            if codes.shared.is_empty() {
                if self.subdivide {
                    self.subdivide = false;
                    let pieces = clip.splitter.split(seg, codes.union);
                    if let Some(pieces) = pieces {
                        for piece in pieces {
                            self.seg_to(piece);
                        }
                        self.subdivide = true;
                        return true;
                    }
                    self.subdivide = true;
                }
            } else {
                self.c_outcode = codes.end;
                self.move_to_inner(seg.end(), outcode0);
                self.opened = true;
                return true;
            }
        }
        self.c_outcode = codes.end;
        false
    }

    fn seg_to(&mut self, seg: PathSeg) {
        match seg {
            PathSeg::Line(l) => self.line_to(l.p1),
            PathSeg::Quad(q) => self.quad_to(q.p1, q.p2),
            PathSeg::Cubic(c) => self.curve_to(c.p1, c.p2, c.p3),
        }
    }

    fn move_to_inner(&mut self, p: Point, outcode: Outcode) {
        if self.state == State::MoveTo {
            self.cur = p;
        } else {
            if self.state == State::DrawingOpTo {
                self.finish(outcode);
            }
            self.state = State::MoveTo;
            self.cur = p;
            self.cur_dir = UNIT_X;
        }
    }

    /// Start a boundary or join the previous segment (tangent `prev_dir`,
    /// offset `prev_offset`) to one leaving `p` along `dir` with offset
    /// `offset`.
    fn draw_join(
        &mut self,
        prev_dir: Vec2,
        p: Point,
        dir: Vec2,
        prev_offset: Vec2,
        offset: Vec2,
        outcode: Outcode,
    ) {
        if self.state != State::DrawingOpTo {
            self.out.move_to(p + offset);
            if !self.opened {
                self.start_dir = dir;
                self.start_offset = offset;
            }
        } else {
            let cross = prev_dir.cross(dir);
            let smooth = prev_dir.dot(dir) > 0.0
                && cross.abs() <= COLLINEAR_JOIN_EPS * prev_dir.hypot() * dir.hypot();
            if !smooth {
                // The turn is clockwise (in y-up terms) when the outer side
                // is the one on the reverse stack.
                let cw = cross <= 0.0;
                if outcode.is_empty() {
                    match self.join {
                        Join::Miter => self.draw_miter(prev_dir, p, dir, prev_offset, offset, cw),
                        Join::Round => self.draw_round_join(p, prev_offset, offset, cw),
                        Join::Bevel => {}
                    }
                }
                // The inner side goes through the vertex.
                self.emit_line_to(p, !cw);
            }
        }
        self.state = State::DrawingOpTo;
    }

    fn draw_miter(
        &mut self,
        prev_dir: Vec2,
        p: Point,
        dir: Vec2,
        prev_offset: Vec2,
        offset: Vec2,
        rev: bool,
    ) {
        if offset == prev_offset || prev_dir == Vec2::ZERO || dir == Vec2::ZERO {
            return;
        }
        let (prev_offset, offset) = if rev {
            (-prev_offset, -offset)
        } else {
            (prev_offset, offset)
        };
        let miter = compute_miter(
            p - prev_dir + prev_offset,
            p + prev_offset,
            p + dir + offset,
            p + offset,
        );
        // NaN or infinite for parallel edges, which fails the test.
        if (miter - p).hypot2() < self.miter_limit_sq {
            self.emit_line_to(miter, rev);
        }
    }

    fn draw_round_join(&mut self, p: Point, prev_offset: Vec2, offset: Vec2, rev: bool) {
        if prev_offset == Vec2::ZERO || offset == Vec2::ZERO {
            return;
        }
        if (prev_offset - offset).hypot2() < ROUND_JOIN_THRESHOLD {
            return;
        }
        let (prev_offset, offset) = if rev {
            (-prev_offset, -offset)
        } else {
            (prev_offset, offset)
        };
        if prev_offset.dot(offset) >= 0.0 {
            self.draw_arc(p, prev_offset, offset, rev);
        } else {
            // More than 90 degrees: split at the point of the circle on the
            // perpendicular bisector of the chord.
            let n = Vec2::new(offset.y - prev_offset.y, prev_offset.x - offset.x);
            let mut mid = n * (self.half_width / n.hypot());
            if rev {
                mid = -mid;
            }
            self.draw_arc(p, prev_offset, mid, rev);
            self.draw_arc(p, mid, offset, rev);
        }
    }

    /// A cubic approximating the arc of at most 90 degrees around `c` from
    /// `c + from` to `c + to`.
    fn draw_arc(&mut self, c: Point, from: Vec2, to: Vec2, rev: bool) {
        let cosext2 = from.dot(to) * self.inv_half_width_sq2;
        // cos(ext) >= 1 means there is nothing to draw, and would give NaN.
        if cosext2 >= 0.5 {
            return;
        }
        let mut cv = (4.0 / 3.0) * (0.5 - cosext2).sqrt() / (1.0 + (cosext2 + 0.5).sqrt());
        if rev {
            cv = -cv;
        }
        let p1 = c + from;
        let p2 = p1 + cv * from.turn_90();
        let p4 = c + to;
        let p3 = p4 - cv * to.turn_90();
        self.emit_curve_to(p1, p2, p3, p4, rev);
    }

    /// A cap at `c`, where the outline arrives at `c + m` and leaves from
    /// `c - m`.
    fn draw_cap(&mut self, cap: Cap, c: Point, m: Vec2) {
        match cap {
            Cap::Butt => {}
            Cap::Square => {
                self.out.line_to(Point::new(c.x - m.y + m.x, c.y + m.x + m.y));
                self.out.line_to(Point::new(c.x - m.y - m.x, c.y + m.x - m.y));
            }
            Cap::Round => {
                let k = m * KAPPA;
                self.out.curve_to(
                    Point::new(c.x + m.x - k.y, c.y + m.y + k.x),
                    Point::new(c.x - m.y + k.x, c.y + m.x + k.y),
                    Point::new(c.x - m.y, c.y + m.x),
                );
                self.out.curve_to(
                    Point::new(c.x - m.y - k.x, c.y + m.x - k.y),
                    Point::new(c.x - m.x - k.y, c.y - m.y + k.x),
                    Point::new(c.x - m.x, c.y - m.y),
                );
            }
        }
    }

    /// Close off the outline of an open subpath whose current point has
    /// outcode `outcode`.
    fn finish(&mut self, outcode: Outcode) {
        if self.closed {
            self.reverse.pop_all(&mut self.out);
        } else {
            if outcode.is_empty() {
                self.draw_cap(self.end_cap, self.cur, self.cur_offset);
            }
            self.reverse.pop_all(&mut self.out);
            if !self.cap_start {
                self.cap_start = true;
                if self.s_outcode.is_empty() {
                    self.draw_cap(self.start_cap, self.start, -self.start_offset);
                }
            }
        }
        self.out.close_path();
    }

    fn draw_line(&mut self, p1: Point, outcode0: Outcode) {
        let mut dir = p1 - self.cur;
        if dir == Vec2::ZERO {
            dir = UNIT_X;
        }
        let m = dir.offset(self.half_width);
        self.draw_join(self.cur_dir, self.cur, dir, self.cur_offset, m, outcode0);
        self.out.line_to(self.cur + m);
        self.out.line_to(p1 + m);
        self.reverse.push_line(self.cur - m);
        self.reverse.push_line(p1 - m);
        self.state = State::DrawingOpTo;
        self.cur = p1;
        self.cur_dir = dir;
        self.cur_offset = m;
    }

    fn draw_curve(&mut self, seg: PathSeg, outcode0: Outcode) {
        let p0 = self.cur;
        let (mut dir_start, mut dir_end) = end_tangents(&seg);
        if dir_start == Vec2::ZERO {
            // The curve is a single point.
            self.c_outcode = outcode0;
            self.line_to(p0);
            return;
        }
        // Tiny tangents make the offset computation lose precision.
        if dir_start.x.abs() < 0.1 && dir_start.y.abs() < 0.1 {
            dir_start = dir_start.normalize();
        }
        if dir_end.x.abs() < 0.1 && dir_end.y.abs() < 0.1 {
            dir_end = dir_end.normalize();
        }
        let m = dir_start.offset(self.half_width);
        self.draw_join(self.cur_dir, p0, dir_start, self.cur_offset, m, outcode0);

        let pieces = match &mut self.monotonizer {
            Some(monotonizer) => monotonizer.split(seg),
            None => {
                let mut pieces = ArrayVec::<PathSeg, { MAX_SUBDIV_POINTS + 1 }>::new();
                pieces.push(seg);
                pieces
            }
        };
        let mut end_offset = m;
        for piece in pieces {
            let (left, right) = match piece {
                PathSeg::Cubic(c) => self.offset_cubic(c),
                PathSeg::Quad(q) => self.offset_quad(q),
                PathSeg::Line(l) => self.line_offsets(l.p0, l.p1),
            };
            self.emit_offsets(&left, &right);
            end_offset = (left.end() - right.end()) / 2.0;
        }
        self.state = State::DrawingOpTo;
        self.cur = seg.end();
        self.cur_dir = dir_end;
        self.cur_offset = end_offset;
    }

    /// Draw `left` forward and record `right` for the way back.
    fn emit_offsets(&mut self, left: &PathSeg, right: &PathSeg) {
        self.out.line_to(left.start());
        left.emit(&mut self.out);
        match *right {
            PathSeg::Line(l) => self.reverse.push_line(l.p0),
            PathSeg::Quad(q) => self.reverse.push(SegRecord::Quad(q.p1, q.p0)),
            PathSeg::Cubic(c) => self.reverse.push(SegRecord::Cubic(c.p2, c.p1, c.p0)),
        }
        self.reverse.push_line(right.end());
    }

    fn line_offsets(&self, p0: Point, p1: Point) -> (PathSeg, PathSeg) {
        let m = (p1 - p0).offset(self.half_width);
        (
            PathSeg::Line(Line::new(p0 + m, p1 + m)),
            PathSeg::Line(Line::new(p0 - m, p1 - m)),
        )
    }

    /// Approximate both offset curves of a cubic piece.
    ///
    /// Each offset is a cubic through the ideal offset points at t = 0 and
    /// t = 1 with the curve's end tangents, whose arm lengths are chosen so
    /// that it also passes through the ideal offset point at t = 0.5.
    fn offset_cubic(&self, c: CubicBez) -> (PathSeg, PathSeg) {
        let CubicBez { p0, p1, p2, p3 } = c;
        let mut d0 = p1 - p0;
        let mut d3 = p3 - p2;
        // After splitting at a cusp the end tangents can vanish.
        let p0_eq_p1 = same_point(p0, p1, 6.0 * ulp(p1.y));
        let p2_eq_p3 = same_point(p2, p3, 6.0 * ulp(p3.y));
        if p0_eq_p1 && p2_eq_p3 {
            return self.line_offsets(p0, p3);
        } else if p0_eq_p1 {
            d0 = p2 - p0;
        } else if p2_eq_p3 {
            d3 = p3 - p1;
        }
        // Parallel end tangents: the piece is a line.
        let dot = d0.dot(d3);
        let dot_sq = dot * dot;
        if within(dot_sq, d0.hypot2() * d3.hypot2(), 4.0 * ulp(dot_sq)) {
            return self.line_offsets(p0, p3);
        }

        let mid = Point::new(
            0.125 * (p0.x + 3.0 * (p1.x + p2.x) + p3.x),
            0.125 * (p0.y + 3.0 * (p1.y + p2.y) + p3.y),
        );
        let mid_offset = ((p2 - p1) + (p3 - p0)).offset(self.half_width);
        let start_offset = d0.offset(self.half_width);
        let end_offset = d3.offset(self.half_width);
        let inv_det = 4.0 / (3.0 * d0.cross(d3));

        // Solve c1 * d0 + c3 * d3 = 4/3 * (2 * mid - start - end).
        let fit = |start: Point, end: Point, mid: Point| {
            let r = Vec2::new(2.0 * mid.x - start.x - end.x, 2.0 * mid.y - start.y - end.y);
            let c1 = inv_det * (d3.y * r.x - d3.x * r.y);
            let c3 = inv_det * (d0.x * r.y - d0.y * r.x);
            PathSeg::Cubic(CubicBez::new(start, start + c1 * d0, end + c3 * d3, end))
        };
        (
            fit(p0 + start_offset, p3 + end_offset, mid + mid_offset),
            fit(p0 - start_offset, p3 - end_offset, mid - mid_offset),
        )
    }

    /// Approximate both offset curves of a quadratic piece, placing each
    /// control point where the offset end tangents meet.
    fn offset_quad(&self, q: QuadBez) -> (PathSeg, PathSeg) {
        let QuadBez { p0, p1, p2 } = q;
        let d0 = p1 - p0;
        let d2 = p2 - p1;
        let dot = d0.dot(d2);
        let dot_sq = dot * dot;
        if within(dot_sq, d0.hypot2() * d2.hypot2(), 4.0 * ulp(dot_sq)) {
            return self.line_offsets(p0, p2);
        }
        let start_offset = d0.offset(self.half_width);
        let end_offset = d2.offset(self.half_width);
        let fit = |start: Point, end: Point| {
            let ctrl = safe_compute_miter(start, start + d0, end, end - d2);
            PathSeg::Quad(QuadBez::new(start, ctrl, end))
        };
        (
            fit(p0 + start_offset, p2 + end_offset),
            fit(p0 - start_offset, p2 - end_offset),
        )
    }
}

impl<C: PathConsumer> PathConsumer for Stroker<C> {
    fn move_to(&mut self, p: Point) {
        self.move_to_inner(p, self.c_outcode);
        self.start = p;
        self.start_dir = UNIT_X;
        self.opened = false;
        self.cap_start = false;
        if self.clip.is_some() {
            let outcode = self.outcode(p);
            self.c_outcode = outcode;
            self.s_outcode = outcode;
        }
    }

    fn line_to(&mut self, p: Point) {
        let outcode0 = self.c_outcode;
        if self.clip_segment(PathSeg::Line(Line::new(self.cur, p))) {
            return;
        }
        self.draw_line(p, outcode0);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        let outcode0 = self.c_outcode;
        let seg = PathSeg::Quad(QuadBez::new(self.cur, p1, p2));
        if self.clip_segment(seg) {
            return;
        }
        self.draw_curve(seg, outcode0);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        let outcode0 = self.c_outcode;
        let seg = PathSeg::Cubic(CubicBez::new(self.cur, p1, p2, p3));
        if self.clip_segment(seg) {
            return;
        }
        self.draw_curve(seg, outcode0);
    }

    fn close_path(&mut self) {
        if self.state != State::DrawingOpTo && !self.opened {
            if self.state == State::Close {
                return;
            }
            // A lone point: draw its caps around a horizontal tangent.
            let m = Vec2::new(0.0, -self.half_width);
            self.out.move_to(self.cur + m);
            self.start_dir = UNIT_X;
            self.cur_dir = UNIT_X;
            self.start_offset = m;
            self.cur_offset = m;
            self.finish(self.c_outcode);
            return;
        }
        if (self.s_outcode & self.c_outcode).is_empty() {
            if self.cur != self.start {
                let outcode0 = self.c_outcode;
                self.c_outcode = self.outcode(self.start);
                self.draw_line(self.start, outcode0);
            }
            self.draw_join(
                self.cur_dir,
                self.cur,
                self.start_dir,
                self.cur_offset,
                self.start_offset,
                self.s_outcode,
            );
            self.out.line_to(self.start + self.start_offset);
            if self.opened {
                self.out.line_to(self.start - self.start_offset);
            } else {
                self.out.move_to(self.start - self.start_offset);
            }
        }
        self.reverse.pop_all(&mut self.out);
        self.state = State::Close;
        self.cur = self.start;
        self.c_outcode = self.s_outcode;
        if self.opened {
            self.opened = false;
        } else {
            self.out.close_path();
        }
    }

    fn path_done(&mut self) {
        if self.state == State::DrawingOpTo {
            self.finish(self.c_outcode);
        }
        self.out.path_done();
        self.state = State::Close;
        self.reverse.clear();
        self.closed = false;
    }

    fn closed_hint(&mut self, closed: bool) {
        self.closed = closed;
    }
}

fn same_point(a: Point, b: Point, err: f64) -> bool {
    within(a.x, b.x, err) && within(a.y, b.y, err)
}

/// Tangents at both ends, skipping coincident control points. The start
/// tangent is zero only for a curve that is a single point.
fn end_tangents(seg: &PathSeg) -> (Vec2, Vec2) {
    let first_nonzero = |candidates: &[Vec2]| {
        candidates
            .iter()
            .copied()
            .find(|v| *v != Vec2::ZERO)
            .unwrap_or(Vec2::ZERO)
    };
    match *seg {
        PathSeg::Line(l) => (l.p1 - l.p0, l.p1 - l.p0),
        PathSeg::Quad(q) => (
            first_nonzero(&[q.p1 - q.p0, q.p2 - q.p0]),
            first_nonzero(&[q.p2 - q.p1, q.p2 - q.p0]),
        ),
        PathSeg::Cubic(c) => (
            first_nonzero(&[c.p1 - c.p0, c.p2 - c.p0, c.p3 - c.p0]),
            first_nonzero(&[c.p3 - c.p2, c.p3 - c.p1, c.p3 - c.p0]),
        ),
    }
}

/// The intersection of the line through `a0` and `a1` with the line through
/// `b0` and `b1`; not finite if they are parallel.
fn compute_miter(a0: Point, a1: Point, b0: Point, b1: Point) -> Point {
    let da = a1 - a0;
    let db = b1 - b0;
    let t = db.cross(a0 - b0) / da.cross(db);
    a0 + t * da
}

/// Like [`compute_miter`], but falls back to the midpoint of `a0` and `b0`
/// for parallel lines.
fn safe_compute_miter(a0: Point, a1: Point, b0: Point, b1: Point) -> Point {
    let da = a1 - a0;
    let db = b1 - b0;
    let den = da.cross(db);
    if den == 0.0 {
        a0.midpoint(b0)
    } else {
        a0 + (db.cross(a0 - b0) / den) * da
    }
}
