// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filters that act on the clip rectangle.

use crate::{
    CubicBez, CurveClipSplitter, IndexStack, Line, Outcode, ParamCurve, PathConsumer, PathSeg,
    Point, QuadBez, Rect, SegOutcodes, SegRecord, SegmentStack,
};

/// Holds back each subpath until it is known whether it closes.
///
/// Before replaying a subpath the detector tells its output, through
/// [`PathConsumer::closed_hint`], whether a `close_path` ends it. A
/// stroker behind a clip needs this: clipping can cut a closed subpath
/// open, and the cut ends must not get caps.
#[derive(Clone, Debug)]
pub struct ClosedPathDetector<C> {
    out: C,
    buffer: SegmentStack,
}

impl<C: PathConsumer> ClosedPathDetector<C> {
    /// Create a detector sending to `out`.
    pub fn new(out: C) -> Self {
        Self {
            out,
            buffer: SegmentStack::new(),
        }
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }

    fn finish(&mut self, closed: bool) {
        self.out.closed_hint(closed);
        self.buffer.pull_all(&mut self.out);
    }
}

impl<C: PathConsumer> PathConsumer for ClosedPathDetector<C> {
    fn move_to(&mut self, p: Point) {
        self.finish(false);
        self.out.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.buffer.push_line(p);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.buffer.push(SegRecord::Quad(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.buffer.push(SegRecord::Cubic(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.finish(true);
        self.out.close_path();
    }

    fn path_done(&mut self) {
        self.finish(false);
        self.out.path_done();
    }
}

/// Drops the parts of a path to be filled that lie beyond the clip
/// rectangle.
///
/// A run of segments that stays beyond one side of the rectangle is
/// replaced by the rectangle corners it passed, so the winding number
/// inside the rectangle is unchanged. Long segments that cross an edge
/// are cut there first. Subpaths are never closed or opened by the filter:
/// every `move_to` and `close_path` goes through.
#[derive(Clone, Debug)]
pub struct PathClipFilter<C> {
    out: C,
    clip: Rect,
    splitter: CurveClipSplitter,
    // Top left, bottom left, top right, bottom right.
    corners: [Point; 4],
    stack: IndexStack,
    c_outcode: Outcode,
    // The sides every segment of the path so far lies beyond.
    g_outcode: Outcode,
    outside: bool,
    start: Point,
    cur: Point,
    subdivide: bool,
}

impl<C: PathConsumer> PathClipFilter<C> {
    /// Create a filter for `clip`, sending to `out`.
    pub fn new(out: C, clip: Rect) -> Self {
        Self {
            out,
            clip,
            splitter: CurveClipSplitter::new(clip, 1.0),
            corners: [
                Point::new(clip.x0, clip.y0),
                Point::new(clip.x0, clip.y1),
                Point::new(clip.x1, clip.y0),
                Point::new(clip.x1, clip.y1),
            ],
            stack: IndexStack::new(),
            c_outcode: Outcode::empty(),
            g_outcode: Outcode::all(),
            outside: false,
            start: Point::ZERO,
            cur: Point::ZERO,
            subdivide: true,
        }
    }

    /// Whether to cut long segments at the rectangle. On by default.
    #[must_use]
    pub fn with_subdivision(mut self, subdivide: bool) -> Self {
        self.subdivide = subdivide;
        self
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }

    fn finish_path(&mut self) {
        if self.outside {
            if self.g_outcode.is_empty() {
                self.finish();
            } else {
                log::trace!("clip filter dropped a subpath beyond {:?}", self.g_outcode);
                self.outside = false;
                self.stack.clear();
            }
        }
    }

    /// Come back from outside: walk the corners passed, then to the point
    /// where the path is now.
    fn finish(&mut self) {
        self.outside = false;
        self.stack.pull_all(&self.corners, &mut self.out);
        self.out.line_to(self.cur);
    }

    fn clip_seg(&mut self, seg: PathSeg) {
        let outcode0 = self.c_outcode;
        let codes = SegOutcodes::of(&seg, outcode0, &self.clip);
        if !codes.union.is_empty() {
            if codes.shared.is_empty() {
                if self.subdivide {
                    self.subdivide = false;
                    let pieces = self.splitter.split(seg, codes.union);
                    if let Some(pieces) = pieces {
                        for piece in pieces {
                            self.clip_seg(piece);
                        }
                        self.subdivide = true;
                        return;
                    }
                    self.subdivide = true;
                }
            } else {
                self.c_outcode = codes.end;
                self.g_outcode &= codes.shared;
                self.outside = true;
                self.cur = seg.end();
                self.record_corners(codes.shared, outcode0, codes.end);
                return;
            }
        }
        self.c_outcode = codes.end;
        self.g_outcode = Outcode::empty();
        if self.outside {
            self.finish();
        }
        seg.emit(&mut self.out);
        self.cur = seg.end();
    }

    /// Record the corners passed by an outside segment going from a point
    /// with code `oc0` to one with code `oc1`.
    fn record_corners(&mut self, shared: Outcode, oc0: Outcode, oc1: Outcode) {
        if oc0 == oc1 || !shared.intersects(Outcode::LEFT_RIGHT) {
            return;
        }
        let merged = oc0 | oc1;
        let off = if shared.contains(Outcode::LEFT) { 0 } else { 2 };
        match (merged.contains(Outcode::TOP), merged.contains(Outcode::BOTTOM)) {
            (true, false) => self.stack.push(off),
            (false, true) => self.stack.push(off + 1),
            (true, true) => {
                if oc0.contains(Outcode::TOP) {
                    self.stack.push(off);
                    self.stack.push(off + 1);
                } else {
                    self.stack.push(off + 1);
                    self.stack.push(off);
                }
            }
            (false, false) => {}
        }
    }
}

impl<C: PathConsumer> PathConsumer for PathClipFilter<C> {
    fn move_to(&mut self, p: Point) {
        self.finish_path();
        self.out.move_to(p);
        self.c_outcode = Outcode::of(p, &self.clip);
        self.start = p;
        self.cur = p;
    }

    fn line_to(&mut self, p: Point) {
        self.clip_seg(PathSeg::Line(Line::new(self.cur, p)));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.clip_seg(PathSeg::Quad(QuadBez::new(self.cur, p1, p2)));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.clip_seg(PathSeg::Cubic(CubicBez::new(self.cur, p1, p2, p3)));
    }

    fn close_path(&mut self) {
        self.finish_path();
        self.out.close_path();
        self.c_outcode = Outcode::of(self.start, &self.clip);
        self.cur = self.start;
    }

    fn path_done(&mut self) {
        self.finish_path();
        self.out.path_done();
        self.g_outcode = Outcode::all();
    }

    fn closed_hint(&mut self, closed: bool) {
        self.out.closed_hint(closed);
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use crate::{BezPath, ClosedPathDetector, PathClipFilter, PathConsumer, PathEl, Point, Rect};

    #[derive(Debug, PartialEq)]
    enum Event {
        Hint(bool),
        El(PathEl),
        Done,
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl PathConsumer for Recorder {
        fn move_to(&mut self, p: Point) {
            self.0.push(Event::El(PathEl::MoveTo(p)));
        }
        fn line_to(&mut self, p: Point) {
            self.0.push(Event::El(PathEl::LineTo(p)));
        }
        fn quad_to(&mut self, p1: Point, p2: Point) {
            self.0.push(Event::El(PathEl::QuadTo(p1, p2)));
        }
        fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
            self.0.push(Event::El(PathEl::CurveTo(p1, p2, p3)));
        }
        fn close_path(&mut self) {
            self.0.push(Event::El(PathEl::ClosePath));
        }
        fn path_done(&mut self) {
            self.0.push(Event::Done);
        }
        fn closed_hint(&mut self, closed: bool) {
            self.0.push(Event::Hint(closed));
        }
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn detector_announces_closure_before_replay() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.move_to((0.0, 1.0));
        path.quad_to((1.0, 1.0), (1.0, 2.0));
        path.close_path();

        let mut detector = ClosedPathDetector::new(Recorder::default());
        detector.consume(&path);
        let events = detector.into_inner().0;
        assert_eq!(
            events,
            [
                Event::Hint(false),
                Event::El(PathEl::MoveTo(p(0.0, 0.0))),
                Event::Hint(false),
                Event::El(PathEl::LineTo(p(1.0, 0.0))),
                Event::El(PathEl::MoveTo(p(0.0, 1.0))),
                Event::Hint(true),
                Event::El(PathEl::QuadTo(p(1.0, 1.0), p(1.0, 2.0))),
                Event::El(PathEl::ClosePath),
                Event::Hint(false),
                Event::Done,
            ]
        );
    }

    fn clip_filter(path: &BezPath) -> BezPath {
        let mut filter = PathClipFilter::new(BezPath::new(), Rect::new(0.0, 0.0, 100.0, 100.0));
        filter.consume(path);
        filter.into_inner()
    }

    #[test]
    fn inside_path_passes_through() {
        let mut path = BezPath::new();
        path.move_to((10.0, 10.0));
        path.line_to((90.0, 10.0));
        path.curve_to((90.0, 50.0), (50.0, 90.0), (10.0, 90.0));
        path.close_path();
        assert_eq!(clip_filter(&path), path);
    }

    #[test]
    fn outside_run_becomes_corners() {
        let mut path = BezPath::new();
        path.move_to((50.0, 50.0));
        path.line_to((-10.0, 50.0));
        path.line_to((-10.0, -10.0));
        path.line_to((-10.0, 110.0));
        path.line_to((20.0, 80.0));
        path.line_to((50.0, 50.0));
        path.close_path();
        let out = clip_filter(&path);
        // Up past the top left corner and back cancels; down past the
        // bottom left corner remains.
        assert_eq!(
            out.elements(),
            &[
                PathEl::MoveTo(p(50.0, 50.0)),
                PathEl::LineTo(p(-10.0, 50.0)),
                PathEl::LineTo(p(0.0, 100.0)),
                PathEl::LineTo(p(-10.0, 110.0)),
                PathEl::LineTo(p(20.0, 80.0)),
                PathEl::LineTo(p(50.0, 50.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn subpath_beyond_one_side_is_dropped() {
        let mut path = BezPath::new();
        path.move_to((-50.0, -50.0));
        path.line_to((-20.0, -50.0));
        path.quad_to((-20.0, -30.0), (-20.0, -20.0));
        let out = clip_filter(&path);
        assert_eq!(out.elements(), &[PathEl::MoveTo(p(-50.0, -50.0))]);
    }

    #[test]
    fn long_crossing_line_is_cut() {
        let mut path = BezPath::new();
        path.move_to((-500.0, 50.0));
        path.line_to((500.0, 50.0));
        let out = clip_filter(&path);
        let els = out.elements();
        assert_eq!(els.len(), 4, "{els:?}");
        let xs: Vec<f64> = els
            .iter()
            .map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => p.x,
                _ => panic!("unexpected {el:?}"),
            })
            .collect();
        assert_eq!(xs[0], -500.0);
        assert!((xs[1] + 1.0).abs() < 1e-9, "{xs:?}");
        assert!((xs[2] - 101.0).abs() < 1e-9, "{xs:?}");
        assert!((xs[3] - 500.0).abs() < 1e-9, "{xs:?}");
    }
}
