// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred-output buffers.
//!
//! Several stages cannot emit a segment when they see it: the stroker
//! builds the right-hand boundary of a stroke while walking forward but has
//! to emit it backward, the dasher holds the first dash of a subpath until
//! it knows whether the subpath closes, and the closed-path detector holds
//! a whole subpath. All of them record drawing commands in a
//! [`SegmentStack`] and flush it at the subpath boundary.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{PathConsumer, PathSeg, Point};

/// A buffered drawing command, without its start point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegRecord {
    /// A line to the point.
    Line(Point),
    /// A quadratic Bézier with the given control and end points.
    Quad(Point, Point),
    /// A cubic Bézier with the given control and end points.
    Cubic(Point, Point, Point),
}

impl SegRecord {
    /// The point the command ends at.
    #[inline]
    pub fn end(&self) -> Point {
        match *self {
            Self::Line(p) | Self::Quad(_, p) | Self::Cubic(_, _, p) => p,
        }
    }

    /// Send the command to `out`.
    #[inline]
    pub fn emit(&self, out: &mut (impl PathConsumer + ?Sized)) {
        match *self {
            Self::Line(p) => out.line_to(p),
            Self::Quad(p1, p2) => out.quad_to(p1, p2),
            Self::Cubic(p1, p2, p3) => out.curve_to(p1, p2, p3),
        }
    }
}

impl From<PathSeg> for SegRecord {
    fn from(seg: PathSeg) -> Self {
        match seg {
            PathSeg::Line(l) => Self::Line(l.p1),
            PathSeg::Quad(q) => Self::Quad(q.p1, q.p2),
            PathSeg::Cubic(c) => Self::Cubic(c.p1, c.p2, c.p3),
        }
    }
}

/// A growable buffer of drawing commands.
///
/// It can be drained in either order: [`pop_all`](Self::pop_all) emits the
/// most recently pushed record first, [`pull_all`](Self::pull_all) emits in
/// push order.
#[derive(Clone, Debug, Default)]
pub struct SegmentStack {
    records: Vec<SegRecord>,
}

impl SegmentStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command.
    #[inline]
    pub fn push(&mut self, record: SegRecord) {
        self.records.push(record);
    }

    /// Record a line to `p`.
    #[inline]
    pub fn push_line(&mut self, p: Point) {
        self.push(SegRecord::Line(p));
    }

    /// Returns `true` if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The number of buffered commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Emit every record, last pushed first, and empty the stack.
    pub fn pop_all(&mut self, out: &mut (impl PathConsumer + ?Sized)) {
        while let Some(record) = self.records.pop() {
            record.emit(out);
        }
    }

    /// Emit every record in the order it was pushed, and empty the stack.
    pub fn pull_all(&mut self, out: &mut (impl PathConsumer + ?Sized)) {
        for record in self.records.drain(..) {
            record.emit(out);
        }
    }

    /// Discard every record.
    #[inline]
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// A stack of small indices in which pushing the value on top cancels it.
///
/// The clip filter records the clip-rectangle corners a path passes while
/// it is outside the rectangle. Walking past a corner and straight back
/// records it twice in a row, and those two visits cancel.
#[derive(Clone, Debug, Default)]
pub struct IndexStack {
    indices: SmallVec<[u8; 16]>,
}

impl IndexStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `v`, or pop the top if it already equals `v`.
    pub fn push(&mut self, v: u8) {
        if self.indices.last() == Some(&v) {
            self.indices.pop();
        } else {
            self.indices.push(v);
        }
    }

    /// Returns `true` if nothing is recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Emit a line to `points[i]` for each recorded index, oldest first,
    /// and empty the stack.
    pub fn pull_all(&mut self, points: &[Point], out: &mut (impl PathConsumer + ?Sized)) {
        for &i in &self.indices {
            out.line_to(points[usize::from(i)]);
        }
        self.indices.clear();
    }

    /// Discard every index.
    #[inline]
    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::{BezPath, IndexStack, PathEl, Point, SegRecord, SegmentStack};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn pop_reverses_pull_preserves() {
        let mut stack = SegmentStack::new();
        stack.push_line(p(1.0, 0.0));
        stack.push(SegRecord::Quad(p(2.0, 1.0), p(3.0, 0.0)));
        stack.push(SegRecord::Cubic(p(4.0, 1.0), p(5.0, 1.0), p(6.0, 0.0)));
        let snapshot = stack.clone();

        let mut popped = BezPath::new();
        stack.pop_all(&mut popped);
        assert!(stack.is_empty());
        assert_eq!(
            popped.elements(),
            &[
                PathEl::CurveTo(p(4.0, 1.0), p(5.0, 1.0), p(6.0, 0.0)),
                PathEl::QuadTo(p(2.0, 1.0), p(3.0, 0.0)),
                PathEl::LineTo(p(1.0, 0.0)),
            ]
        );

        let mut stack = snapshot;
        let mut pulled = BezPath::new();
        stack.pull_all(&mut pulled);
        assert!(stack.is_empty());
        assert_eq!(pulled.elements()[0], PathEl::LineTo(p(1.0, 0.0)));
        assert_eq!(pulled.elements().len(), 3);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut stack = SegmentStack::new();
        for i in 0..1000 {
            stack.push_line(p(f64::from(i), 0.0));
        }
        assert_eq!(stack.len(), 1000);
        let mut out = BezPath::new();
        stack.pop_all(&mut out);
        assert_eq!(out.elements()[0], PathEl::LineTo(p(999.0, 0.0)));
        assert_eq!(out.elements()[999], PathEl::LineTo(p(0.0, 0.0)));
    }

    #[test]
    fn index_stack_cancels_repeats() {
        let corners = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0), p(1.0, 1.0)];
        let mut stack = IndexStack::new();
        stack.push(0);
        stack.push(1);
        stack.push(1);
        stack.push(3);
        let mut out = BezPath::new();
        stack.pull_all(&corners, &mut out);
        assert!(stack.is_empty());
        assert_eq!(
            out.elements(),
            &[PathEl::LineTo(corners[0]), PathEl::LineTo(corners[3])]
        );

        stack.push(2);
        stack.push(2);
        assert!(stack.is_empty());
    }
}
