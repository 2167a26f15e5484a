// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{PathConsumer, Point};

/// The default distance below which [`PathSimplifier`] drops segments.
pub const PIX_TOLERANCE: f64 = 0.1;

/// A [`PathConsumer`] that drops segments too small to matter.
///
/// A line is dropped when its end is within the tolerance of the current
/// point, a curve when its end and all its control points are.
#[derive(Clone, Debug)]
pub struct PathSimplifier<C> {
    out: C,
    tolerance_sq: f64,
    start: Point,
    cur: Point,
}

impl<C: PathConsumer> PathSimplifier<C> {
    /// Create a simplifier with [`PIX_TOLERANCE`], sending to `out`.
    pub fn new(out: C) -> Self {
        Self {
            out,
            tolerance_sq: PIX_TOLERANCE * PIX_TOLERANCE,
            start: Point::ZERO,
            cur: Point::ZERO,
        }
    }

    /// Set the distance below which segments are dropped.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance_sq = tolerance * tolerance;
        self
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }

    #[inline]
    fn near(&self, p: Point) -> bool {
        self.cur.distance_squared(p) <= self.tolerance_sq
    }
}

impl<C: PathConsumer> PathConsumer for PathSimplifier<C> {
    fn move_to(&mut self, p: Point) {
        self.out.move_to(p);
        self.start = p;
        self.cur = p;
    }

    fn line_to(&mut self, p: Point) {
        if self.near(p) {
            return;
        }
        self.out.line_to(p);
        self.cur = p;
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        if self.near(p2) && self.near(p1) {
            return;
        }
        self.out.quad_to(p1, p2);
        self.cur = p2;
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        if self.near(p3) && self.near(p2) && self.near(p1) {
            return;
        }
        self.out.curve_to(p1, p2, p3);
        self.cur = p3;
    }

    fn close_path(&mut self) {
        self.out.close_path();
        self.cur = self.start;
    }

    fn path_done(&mut self) {
        self.out.path_done();
    }

    fn closed_hint(&mut self, closed: bool) {
        self.out.closed_hint(closed);
    }
}
