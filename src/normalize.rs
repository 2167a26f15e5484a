// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping path coordinates to the pixel grid.

use crate::{PathConsumer, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Where [`Normalizer`] moves path endpoints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NormMode {
    /// The nearest pixel center, `floor(v) + 0.5`.
    ///
    /// Thin horizontal and vertical strokes then cover whole pixels.
    #[default]
    PixelCenter,
    /// The nearest quarter pixel offset, `floor(v + 0.25) + 0.25`.
    PixelQuarter,
}

impl NormMode {
    /// Snap a single coordinate.
    #[inline]
    pub fn snap(self, v: f64) -> f64 {
        if !v.is_finite() {
            return v;
        }
        match self {
            Self::PixelCenter => v.floor() + 0.5,
            Self::PixelQuarter => (v + 0.25).floor() + 0.25,
        }
    }
}

/// A [`PathConsumer`] that snaps endpoints to the pixel grid.
///
/// Control points are moved along with the endpoints next to them, so
/// curves keep their shape.
#[derive(Clone, Debug)]
pub struct Normalizer<C> {
    out: C,
    mode: NormMode,
    // How far the current point and the subpath start were moved.
    cur_adjust: Vec2,
    move_adjust: Vec2,
}

impl<C: PathConsumer> Normalizer<C> {
    /// Create a normalizer sending to `out`.
    pub fn new(out: C, mode: NormMode) -> Self {
        Self {
            out,
            mode,
            cur_adjust: Vec2::ZERO,
            move_adjust: Vec2::ZERO,
        }
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }

    fn snap(&self, p: Point) -> (Point, Vec2) {
        let q = Point::new(self.mode.snap(p.x), self.mode.snap(p.y));
        (q, q - p)
    }
}

impl<C: PathConsumer> PathConsumer for Normalizer<C> {
    fn move_to(&mut self, p: Point) {
        let (q, adjust) = self.snap(p);
        self.cur_adjust = adjust;
        self.move_adjust = adjust;
        self.out.move_to(q);
    }

    fn line_to(&mut self, p: Point) {
        let (q, adjust) = self.snap(p);
        self.cur_adjust = adjust;
        self.out.line_to(q);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        let (q2, adjust) = self.snap(p2);
        let q1 = p1 + (self.cur_adjust + adjust) / 2.0;
        self.cur_adjust = adjust;
        self.out.quad_to(q1, q2);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        let (q3, adjust) = self.snap(p3);
        let q1 = p1 + self.cur_adjust;
        let q2 = p2 + adjust;
        self.cur_adjust = adjust;
        self.out.curve_to(q1, q2, q3);
    }

    fn close_path(&mut self) {
        self.cur_adjust = self.move_adjust;
        self.out.close_path();
    }

    fn path_done(&mut self) {
        self.out.path_done();
    }

    fn closed_hint(&mut self, closed: bool) {
        self.out.closed_hint(closed);
    }
}
