// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashing.

use arrayvec::ArrayVec;
use smallvec::smallvec;

use crate::subdivide::MAX_SUBDIV_POINTS;
use crate::{
    BezPath, ControlPolygon, CubicBez, CurveClipSplitter, Dashes, LengthIterator, Line,
    Monotonizer, Outcode, ParamCurve, PathConsumer, PathEl, PathSeg, Point, QuadBez, Rect,
    SegOutcodes, SegmentStack,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A dash ending closer than this to the end of a segment ends with it.
const EPS: f64 = 1e-6;

/// Phases longer than this many pattern cycles are treated as zero.
const MAX_CYCLES: f64 = 16_000_000.0;

#[derive(Clone, Debug)]
struct DashClip {
    rect: Rect,
    splitter: CurveClipSplitter,
}

/// A [`PathConsumer`] that cuts the path it receives into dashes.
///
/// The output is the "on" pieces of the path, each a separate open
/// subpath. The first dash of every subpath is held back until the
/// subpath ends: if the subpath closes while a dash is on, that last dash
/// continues into the first one.
///
/// With a clip rectangle, segments entirely beyond one of its sides are
/// not measured piece by piece; their lengths are added up and the dash
/// pattern is advanced by the total once the path comes back.
#[derive(Clone, Debug)]
pub struct Dasher<C> {
    out: C,
    dash: Dashes,
    cycle_len: f64,
    // Dash position at the start of every subpath.
    start_idx: usize,
    start_on: bool,
    start_phase: f64,
    idx: usize,
    on: bool,
    // Length already used of the current dash.
    phase: f64,
    first_segments: SegmentStack,
    // Still inside the first dash of the subpath.
    starting: bool,
    needs_move_to: bool,
    start: Point,
    cur: Point,
    li: LengthIterator,
    monotonizer: Option<Monotonizer>,
    clip: Option<DashClip>,
    c_outcode: Outcode,
    outside: bool,
    total_skip_len: f64,
    // Cleared while the clip splitter feeds pieces back in.
    subdivide: bool,
}

impl<C: PathConsumer> Dasher<C> {
    /// Create a dasher with the given on/off lengths, starting `phase` into
    /// the pattern.
    ///
    /// The pattern is used cyclically, so an odd number of lengths
    /// alternates on and off across repetitions. A pattern that is empty,
    /// has a negative or non-finite length, or adds up to zero dashes
    /// nothing: the path passes through whole.
    pub fn new(out: C, pattern: &[f64], phase: f64) -> Self {
        let mut dash: Dashes = pattern.iter().copied().collect();
        let mut cycle_len: f64 = dash.iter().sum();
        let usable = cycle_len > 0.0
            && cycle_len.is_finite()
            && dash.iter().all(|&d| d >= 0.0 && d.is_finite());
        let (idx, on, phase) = if usable {
            normalize_phase(&dash, cycle_len, phase)
        } else {
            log::debug!("dash pattern {pattern:?} is unusable, drawing solid");
            dash = smallvec![f64::INFINITY];
            cycle_len = f64::INFINITY;
            (0, true, 0.0)
        };
        Self {
            out,
            dash,
            cycle_len,
            start_idx: idx,
            start_on: on,
            start_phase: phase,
            idx,
            on,
            phase,
            first_segments: SegmentStack::new(),
            starting: false,
            needs_move_to: false,
            start: Point::ZERO,
            cur: Point::ZERO,
            li: LengthIterator::new(),
            monotonizer: Some(Monotonizer::new(0.0)),
            clip: None,
            c_outcode: Outcode::empty(),
            outside: false,
            total_skip_len: 0.0,
            subdivide: true,
        }
    }

    /// Set the width of the stroke the dashes are for.
    ///
    /// Curves are then also split where their radius of curvature equals
    /// half the width, as the stroker would split them.
    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        if self.monotonizer.is_some() {
            self.monotonizer = Some(Monotonizer::new(width));
        }
        self
    }

    /// Whether to split curves into simple pieces before measuring them,
    /// and long segments at the clip rectangle. On by default.
    #[must_use]
    pub fn with_subdivision(mut self, subdivide: bool) -> Self {
        if !subdivide {
            self.monotonizer = None;
        } else if self.monotonizer.is_none() {
            self.monotonizer = Some(Monotonizer::new(0.0));
        }
        self.subdivide = subdivide;
        self
    }

    /// Skip measuring the parts of the path beyond `clip`.
    ///
    /// `clip` must already include the margin of the stroke drawn from the
    /// dashes. `inv_scale` is as for [`CurveClipSplitter::new`].
    #[must_use]
    pub fn with_clip(mut self, clip: Rect, inv_scale: f64) -> Self {
        self.clip = Some(DashClip {
            rect: clip,
            splitter: CurveClipSplitter::new(clip, inv_scale),
        });
        self
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }

    #[inline]
    fn next_dash(&mut self) {
        self.idx = (self.idx + 1) % self.dash.len();
        self.on = !self.on;
        self.phase = 0.0;
    }

    /// Move along `seg`, drawing it if `on`.
    fn go_to(&mut self, seg: PathSeg, on: bool) {
        if on {
            if self.starting {
                self.first_segments.push(seg.into());
            } else {
                if self.needs_move_to {
                    self.needs_move_to = false;
                    self.out.move_to(self.cur);
                }
                seg.emit(&mut self.out);
            }
        } else {
            self.starting = false;
            self.needs_move_to = true;
        }
        self.cur = seg.end();
    }

    fn emit_first_segments(&mut self) {
        self.out.move_to(self.start);
        self.first_segments.pull_all(&mut self.out);
    }

    /// Handle a segment that touches the outside of the clip rectangle.
    ///
    /// Returns `true` if the segment was consumed, either skipped or cut
    /// and fed back in.
    fn clip_segment(&mut self, seg: PathSeg) -> bool {
        let Some(clip) = &mut self.clip else {
            return false;
        };
        let codes = SegOutcodes::of(&seg, self.c_outcode, &clip.rect);
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
                self.skip_seg(seg);
                return true;
            }
        }
        self.c_outcode = codes.end;
        if self.outside {
            self.outside = false;
            self.skip_len();
        }
        false
    }

    fn seg_to(&mut self, seg: PathSeg) {
        match seg {
            PathSeg::Line(l) => self.line_to(l.p1),
            PathSeg::Quad(q) => self.quad_to(q.p1, q.p2),
            PathSeg::Cubic(c) => self.curve_to(c.p1, c.p2, c.p3),
        }
    }

    /// Pass over `seg` without drawing, remembering its length.
    fn skip_seg(&mut self, seg: PathSeg) {
        let len = match seg {
            PathSeg::Line(l) => l.length(),
            _ => {
                self.li.init(seg);
                self.li.total_length()
            }
        };
        self.outside = true;
        self.total_skip_len += len;
        // The current dash, if on, is interrupted.
        self.needs_move_to = true;
        self.starting = false;
        self.cur = seg.end();
    }

    /// Advance the pattern by the length skipped outside the clip.
    fn skip_len(&mut self) {
        let mut len = self.total_skip_len;
        self.total_skip_len = 0.0;
        if !len.is_finite() {
            log::debug!("skipped length {len} is not finite, dash pattern kept");
            return;
        }

        // Jump over whole cycles.
        if len >= self.cycle_len {
            let rest = len % self.cycle_len;
            let full_cycles = ((len - rest) / self.cycle_len).round();
            // Every cycle passes each index once, so only the parity of
            // the number of toggles matters.
            if self.dash.len() % 2 == 1 && full_cycles % 2.0 == 1.0 {
                self.on = !self.on;
            }
            len = rest;
        }
        loop {
            let left = self.dash[self.idx] - self.phase;
            let rem = len - left;
            if rem <= EPS {
                self.phase += len;
                if rem.abs() <= EPS {
                    self.next_dash();
                }
                break;
            }
            len = rem;
            self.next_dash();
        }
    }

    fn dash_line(&mut self, p1: Point) {
        let d = p1 - self.cur;
        let mut len = d.hypot();
        if len == 0.0 {
            return;
        }
        if !len.is_finite() {
            self.go_to(PathSeg::Line(Line::new(self.cur, p1)), false);
            return;
        }
        let unit = d / len;
        loop {
            let left = self.dash[self.idx] - self.phase;
            let rem = len - left;
            if rem <= EPS {
                self.go_to(PathSeg::Line(Line::new(self.cur, p1)), self.on);
                self.phase += len;
                if rem.abs() <= EPS {
                    self.next_dash();
                }
                break;
            }
            let p = self.cur + left * unit;
            self.go_to(PathSeg::Line(Line::new(self.cur, p)), self.on);
            self.next_dash();
            len = rem;
        }
    }

    fn dash_curve(&mut self, seg: PathSeg) {
        if !seg.fast_len().is_finite() {
            self.go_to(seg, false);
            return;
        }
        let pieces = match &mut self.monotonizer {
            Some(monotonizer) => monotonizer.split(seg),
            None => {
                let mut pieces = ArrayVec::<PathSeg, { MAX_SUBDIV_POINTS + 1 }>::new();
                pieces.push(seg);
                pieces
            }
        };
        for piece in pieces {
            self.dash_simple_curve(piece);
        }
    }

    fn dash_simple_curve(&mut self, seg: PathSeg) {
        if seg.is_point() {
            return;
        }
        self.li.init(seg);
        let mut rest = seg;
        let mut prev_t = 0.0;
        let mut left = self.dash[self.idx] - self.phase;
        loop {
            let t = self.li.advance(left);
            if t.is_nan() || t >= 1.0 {
                break;
            }
            if t != 0.0 {
                let (head, tail) = rest.subdivide_at((t - prev_t) / (1.0 - prev_t));
                self.go_to(head, self.on);
                rest = tail;
                prev_t = t;
            }
            self.next_dash();
            left = self.dash[self.idx];
        }
        self.go_to(rest, self.on);
        self.phase += self.li.last_seg_len();
        if self.phase + EPS >= self.dash[self.idx] {
            self.next_dash();
        }
    }
}

impl<C: PathConsumer> PathConsumer for Dasher<C> {
    fn move_to(&mut self, p: Point) {
        if !self.first_segments.is_empty() {
            self.emit_first_segments();
        }
        self.needs_move_to = true;
        self.idx = self.start_idx;
        self.on = self.start_on;
        self.phase = self.start_phase;
        self.start = p;
        self.cur = p;
        self.starting = true;
        if let Some(clip) = &self.clip {
            self.c_outcode = Outcode::of(p, &clip.rect);
        }
        self.outside = false;
        self.total_skip_len = 0.0;
    }

    fn line_to(&mut self, p: Point) {
        if self.clip_segment(PathSeg::Line(Line::new(self.cur, p))) {
            return;
        }
        self.dash_line(p);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        let seg = PathSeg::Quad(QuadBez::new(self.cur, p1, p2));
        if self.clip_segment(seg) {
            return;
        }
        self.dash_curve(seg);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        let seg = PathSeg::Cubic(CubicBez::new(self.cur, p1, p2, p3));
        if self.clip_segment(seg) {
            return;
        }
        self.dash_curve(seg);
    }

    fn close_path(&mut self) {
        if self.cur != self.start {
            self.line_to(self.start);
        }
        if !self.first_segments.is_empty() {
            if !self.on || self.needs_move_to {
                self.out.move_to(self.start);
            }
            self.first_segments.pull_all(&mut self.out);
            if self.starting {
                // The whole subpath is a single dash.
                self.out.close_path();
            }
        }
        self.move_to(self.start);
    }

    fn path_done(&mut self) {
        if !self.first_segments.is_empty() {
            self.emit_first_segments();
        }
        self.out.path_done();
    }
}

/// Find where in the pattern `phase` lands: the index of the dash, whether
/// it is on, and how much of it is used up.
fn normalize_phase(dash: &[f64], cycle_len: f64, phase: f64) -> (usize, bool, f64) {
    let mut idx = 0;
    let mut on = true;
    let mut phase = phase;
    if !phase.is_finite() {
        log::debug!("dash phase {phase} is not finite, using 0");
        return (0, true, 0.0);
    }
    let cycles = phase / cycle_len;
    let odd_len = dash.len() % 2 == 1;
    if phase < 0.0 {
        if -cycles >= MAX_CYCLES {
            log::debug!("dash phase {phase} spans too many cycles, using 0");
            phase = 0.0;
        } else {
            let full_cycles = (-cycles).floor();
            if odd_len && full_cycles % 2.0 == 1.0 {
                on = !on;
            }
            phase += full_cycles * cycle_len;
            while phase < 0.0 {
                idx = if idx == 0 { dash.len() - 1 } else { idx - 1 };
                phase += dash[idx];
                on = !on;
            }
        }
    } else if phase > 0.0 {
        if cycles >= MAX_CYCLES {
            log::debug!("dash phase {phase} spans too many cycles, using 0");
            phase = 0.0;
        } else {
            let full_cycles = cycles.floor();
            if odd_len && full_cycles % 2.0 == 1.0 {
                on = !on;
            }
            phase -= full_cycles * cycle_len;
            while phase >= dash[idx] {
                phase -= dash[idx];
                idx = (idx + 1) % dash.len();
                on = !on;
            }
        }
    }
    (idx, on, phase)
}

/// Dash a path, without stroking it.
///
/// Returns the centerline of every dash as an open subpath; see
/// [`Dasher`].
pub fn dash(path: impl IntoIterator<Item = PathEl>, phase: f64, pattern: &[f64]) -> BezPath {
    let mut dasher = Dasher::new(BezPath::new(), pattern, phase);
    dasher.consume(path);
    dasher.into_inner()
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::normalize_phase;
    use crate::{dash, BezPath, Dasher, ParamCurve, PathConsumer, PathEl, PathSeg, Point, Rect};

    fn seg_len(seg: &PathSeg) -> f64 {
        let n = 2000;
        let mut len = 0.0;
        let mut last = seg.start();
        for i in 1..=n {
            let p = seg.eval(f64::from(i) / f64::from(n));
            len += last.distance(p);
            last = p;
        }
        len
    }

    fn path_len(path: &BezPath) -> f64 {
        path.segments().map(|seg| seg_len(&seg)).sum()
    }

    /// The on length of a pattern `[on, off]` over `len`, starting at 0.
    fn expected_on(len: f64, on: f64, off: f64) -> f64 {
        let cycle = on + off;
        (len / cycle).floor() * on + (len % cycle).min(on)
    }

    /// The pattern and phase whose dashes are exactly the gaps of
    /// `pattern` at `phase`.
    fn gaps_of(pattern: &[f64], phase: f64) -> (Vec<f64>, f64) {
        let mut gaps = pattern.to_vec();
        // An odd pattern alternates over two repetitions.
        if gaps.len() % 2 == 1 {
            gaps.extend_from_slice(pattern);
        }
        let first = gaps[0];
        gaps.rotate_left(1);
        (gaps, phase - first)
    }

    /// The x extents of the dashes of a horizontal line, sorted.
    fn dash_spans(path: &BezPath) -> Vec<(f64, f64)> {
        let mut spans = Vec::new();
        let mut cur = 0.0;
        let mut span = None;
        for el in path.iter() {
            match el {
                PathEl::MoveTo(p) => {
                    if let Some(s) = span.take() {
                        spans.push(s);
                    }
                    cur = p.x;
                    span = Some((p.x, p.x));
                }
                PathEl::LineTo(p) => {
                    let (s, _) = span.unwrap_or((cur, cur));
                    span = Some((s, p.x));
                    cur = p.x;
                }
                _ => panic!("unexpected element {el:?}"),
            }
        }
        spans.extend(span);
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
        spans
    }

    fn assert_spans(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.0 - e.0).abs() < 1e-9 && (a.1 - e.1).abs() < 1e-9,
                "{actual:?} != {expected:?}"
            );
        }
    }

    fn line(x0: f64, x1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, 0.0));
        path.line_to((x1, 0.0));
        path
    }

    #[test]
    fn dashes_a_line() {
        let out = dash(&line(0.0, 10.0), 0.0, &[3.0, 2.0]);
        assert_spans(&dash_spans(&out), &[(0.0, 3.0), (5.0, 8.0)]);
        assert_eq!(out.subpath_count(), 2);
    }

    #[test]
    fn phase_shifts_the_pattern() {
        let out = dash(&line(0.0, 10.0), 1.0, &[3.0, 2.0]);
        assert_spans(&dash_spans(&out), &[(0.0, 2.0), (4.0, 7.0), (9.0, 10.0)]);

        // A whole number of cycles changes nothing.
        let out = dash(&line(0.0, 10.0), 11.0, &[3.0, 2.0]);
        assert_spans(&dash_spans(&out), &[(0.0, 2.0), (4.0, 7.0), (9.0, 10.0)]);

        let out = dash(&line(0.0, 10.0), -1.0, &[3.0, 2.0]);
        assert_spans(&dash_spans(&out), &[(1.0, 4.0), (6.0, 9.0)]);
    }

    #[test]
    fn normalized_phase() {
        assert_eq!(normalize_phase(&[3.0, 2.0], 5.0, 0.0), (0, true, 0.0));
        assert_eq!(normalize_phase(&[3.0, 2.0], 5.0, 4.0), (1, false, 1.0));
        assert_eq!(normalize_phase(&[3.0, 2.0], 5.0, -1.0), (1, false, 1.0));
        // An odd pattern flips on every cycle.
        assert_eq!(normalize_phase(&[3.0], 3.0, 4.0), (0, false, 1.0));
        assert_eq!(normalize_phase(&[3.0], 3.0, -4.0), (0, true, 2.0));
        assert_eq!(normalize_phase(&[3.0, 2.0], 5.0, 1e100), (0, true, 0.0));
    }

    #[test]
    fn spans_a_polyline() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 0.0));
        path.line_to((4.0, 4.0));
        let out = dash(&path, 0.0, &[3.0, 2.0]);
        // Dashes: 0-3, 5-8, so the second turns the corner.
        assert_eq!(
            out.elements(),
            &[
                PathEl::MoveTo(Point::new(4.0, 1.0)),
                PathEl::LineTo(Point::new(4.0, 4.0)),
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(3.0, 0.0)),
            ]
        );
    }

    #[test]
    fn on_length_matches_arc_length() {
        let mut paths = Vec::new();
        paths.push(line(0.0, 97.0));
        let mut quad = BezPath::new();
        quad.move_to((0.0, 0.0));
        quad.quad_to((50.0, 80.0), (100.0, 0.0));
        paths.push(quad);
        let mut cubic = BezPath::new();
        cubic.move_to((0.0, 0.0));
        cubic.curve_to((20.0, 90.0), (80.0, -90.0), (100.0, 0.0));
        paths.push(cubic);

        for path in paths {
            let total = path_len(&path);
            let out = dash(&path, 0.0, &[7.0, 4.0]);
            let on = path_len(&out);
            let expected = expected_on(total, 7.0, 4.0);
            assert!(
                (on - expected).abs() < 0.01 * total,
                "on length {on}, expected {expected} of {total}"
            );
        }
    }

    #[test]
    fn dashes_and_gaps_add_up_to_the_length() {
        let mut rng = StdRng::seed_from_u64(0xda54);
        let pt = |rng: &mut StdRng| {
            Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0))
        };
        for i in 0..60 {
            let mut path = BezPath::new();
            path.move_to(pt(&mut rng));
            match i % 3 {
                0 => {
                    path.line_to(pt(&mut rng));
                    path.line_to(pt(&mut rng));
                }
                1 => path.quad_to(pt(&mut rng), pt(&mut rng)),
                _ => path.curve_to(pt(&mut rng), pt(&mut rng), pt(&mut rng)),
            }
            let n = rng.random_range(1..=5);
            let pattern: Vec<f64> = (0..n).map(|_| rng.random_range(0.5..10.0)).collect();
            let phase = rng.random_range(-50.0..50.0);
            let (gaps, gap_phase) = gaps_of(&pattern, phase);

            let total = path_len(&path);
            let on = path_len(&dash(&path, phase, &pattern));
            let off = path_len(&dash(&path, gap_phase, &gaps));
            let tolerance = if i % 3 == 0 { 1e-5 } else { 1e-3 * total };
            assert!(
                (on + off - total).abs() < tolerance,
                "{on} + {off} != {total} for {pattern:?} at {phase} on {path:?}"
            );
        }
    }

    #[test]
    fn closed_path_joins_last_and_first_dash() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.line_to((0.0, 10.0));
        path.close_path();
        // Perimeter 40, cycle 9: the last dash starts at 36 and runs on
        // into the first.
        let out = dash(&path, 0.0, &[6.0, 3.0]);
        let last = out
            .elements()
            .split(|el| matches!(el, PathEl::MoveTo(_)))
            .last();
        let joined = [
            PathEl::LineTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(6.0, 0.0)),
        ];
        assert_eq!(last, Some(&joined[..]));
        assert_eq!(out.subpath_count(), 4);
    }

    #[test]
    fn single_dash_loop_stays_closed() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.close_path();
        let out = dash(&path, 0.0, &[100.0, 1.0]);
        assert_eq!(out.elements().first(), Some(&PathEl::MoveTo(Point::ZERO)));
        assert_eq!(out.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn unusable_pattern_draws_solid() {
        let path = line(0.0, 10.0);
        for pattern in [&[][..], &[0.0, 0.0][..], &[2.0, -1.0][..]] {
            let out = dash(&path, 0.0, pattern);
            assert_spans(&dash_spans(&out), &[(0.0, 10.0)]);
        }
        let out = dash(&path, f64::NAN, &[3.0, 2.0]);
        assert_spans(&dash_spans(&out), &[(0.0, 3.0), (5.0, 8.0)]);
    }

    #[test]
    fn skipping_outside_keeps_the_pattern_in_step() {
        let path = line(-10_000.0, 10_000.0);
        let pattern = [3.0, 2.0];
        let visible = |spans: Vec<(f64, f64)>| -> Vec<(f64, f64)> {
            spans
                .into_iter()
                .filter(|&(s, e)| s > -0.5 && e < 99.5)
                .collect()
        };
        let full = visible(dash_spans(&dash(&path, 0.0, &pattern)));

        let clip = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut dasher = Dasher::new(BezPath::new(), &pattern, 0.0).with_clip(clip, 1.0);
        dasher.consume(&path);
        let clipped = dasher.into_inner();
        for el in clipped.iter() {
            if let PathEl::MoveTo(p) | PathEl::LineTo(p) = el {
                assert!(p.x >= -2.0 && p.x <= 102.0, "{p:?} drawn outside");
            }
        }
        let clipped = visible(dash_spans(&clipped));

        assert_eq!(full.len(), 20);
        assert_eq!(full.len(), clipped.len());
        for (a, b) in full.iter().zip(&clipped) {
            assert!((a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn skipped_length_walks_the_pattern() {
        // Within rounding of a dash end: the next dash starts fresh.
        let mut dasher = Dasher::new(BezPath::new(), &[4.0, 4.0], 0.0);
        dasher.total_skip_len = 4.0 - 1e-9;
        dasher.skip_len();
        assert_eq!((dasher.idx, dasher.on, dasher.phase), (1, false, 0.0));

        // Whole cycles are jumped, not walked.
        let mut dasher = Dasher::new(BezPath::new(), &[4.0, 4.0], 0.0);
        dasher.total_skip_len = 8.0e12 + 5.0;
        dasher.skip_len();
        assert_eq!((dasher.idx, dasher.on, dasher.phase), (1, false, 1.0));

        // An odd number of cycles of an odd pattern flips it.
        let mut dasher = Dasher::new(BezPath::new(), &[3.0], 0.0);
        dasher.total_skip_len = 16.0;
        dasher.skip_len();
        assert_eq!((dasher.idx, dasher.on, dasher.phase), (0, false, 1.0));

        let mut dasher = Dasher::new(BezPath::new(), &[3.0, 2.0], 0.0);
        dasher.total_skip_len = f64::INFINITY;
        dasher.skip_len();
        assert_eq!((dasher.idx, dasher.on, dasher.phase), (0, true, 0.0));
        assert_eq!(dasher.total_skip_len, 0.0);
    }

    #[test]
    fn non_finite_segments_are_passed_over() {
        let mut bad_line = BezPath::new();
        bad_line.move_to((0.0, 0.0));
        bad_line.line_to((f64::NAN, 0.0));
        bad_line.line_to((10.0, 0.0));
        let mut inf_line = BezPath::new();
        inf_line.move_to((0.0, 0.0));
        inf_line.line_to((f64::INFINITY, 0.0));
        inf_line.line_to((10.0, 0.0));
        let mut bad_quad = BezPath::new();
        bad_quad.move_to((0.0, 0.0));
        bad_quad.quad_to((5.0, f64::NAN), (10.0, 0.0));
        let mut inf_cubic = BezPath::new();
        inf_cubic.move_to((0.0, 0.0));
        inf_cubic.curve_to((5.0, f64::INFINITY), (5.0, 0.0), (10.0, 0.0));

        for mut path in [bad_line, inf_line, bad_quad, inf_cubic] {
            // Dashing picks up again at the next subpath.
            path.move_to((0.0, 5.0));
            path.line_to((10.0, 5.0));
            let out = dash(&path, 0.0, &[3.0, 2.0]);
            assert_eq!(out.subpath_count(), 2, "{out:?}");
            for seg in out.segments() {
                assert!(seg.start().is_finite() && seg.end().is_finite(), "{out:?}");
            }
        }
    }

    #[test]
    fn infinite_run_outside_the_clip() {
        let clip = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut dasher = Dasher::new(BezPath::new(), &[3.0, 2.0], 0.0).with_clip(clip, 1.0);
        dasher.move_to(Point::new(-5.0, 5.0));
        dasher.line_to(Point::new(f64::NEG_INFINITY, 5.0));
        dasher.line_to(Point::new(-5.0, 5.0));
        dasher.line_to(Point::new(5.0, 5.0));
        dasher.path_done();
        let out = dasher.into_inner();
        assert_spans(&dash_spans(&out), &[(-5.0, -2.0), (0.0, 3.0)]);
    }

    #[test]
    fn closed_hint_is_not_forwarded() {
        let mut dasher = Dasher::new(BezPath::new(), &[1.0, 1.0], 0.0);
        dasher.closed_hint(true);
        dasher.move_to(Point::new(0.0, 0.0));
        dasher.line_to(Point::new(2.0, 0.0));
        dasher.path_done();
        assert_eq!(dasher.into_inner().subpath_count(), 1);
    }
}
