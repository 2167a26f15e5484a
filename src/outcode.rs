// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cohen-Sutherland style outcodes.

use crate::{PathSeg, Point, Rect};

bitflags::bitflags! {
    /// The sides of a clip rectangle a point lies beyond.
    ///
    /// The minimum edges are inclusive and the maximum edges exclusive,
    /// so a point on the right or bottom edge counts as outside.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Outcode: u8 {
        /// Above the top edge (`y < y0`).
        const TOP    = 0b0001;
        /// Below the bottom edge (`y >= y1`).
        const BOTTOM = 0b0010;
        /// Left of the left edge (`x < x0`).
        const LEFT   = 0b0100;
        /// Right of the right edge (`x >= x1`).
        const RIGHT  = 0b1000;
    }
}

impl Outcode {
    /// Both vertical sides.
    pub const LEFT_RIGHT: Self = Self::LEFT.union(Self::RIGHT);

    /// Classify `p` against `clip`.
    #[inline]
    pub fn of(p: Point, clip: &Rect) -> Self {
        let mut code = if p.y < clip.y0 {
            Self::TOP
        } else if p.y >= clip.y1 {
            Self::BOTTOM
        } else {
            Self::empty()
        };
        if p.x < clip.x0 {
            code |= Self::LEFT;
        } else if p.x >= clip.x1 {
            code |= Self::RIGHT;
        }
        code
    }

    /// Returns `true` if the point is inside the rectangle.
    #[inline]
    pub fn is_inside(self) -> bool {
        self.is_empty()
    }
}

/// The outcodes of a segment's points, given the code of its start point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegOutcodes {
    /// Every side any point lies beyond.
    pub union: Outcode,
    /// The sides all points lie beyond. When non-empty the segment's
    /// control polygon, and so the segment, misses the rectangle.
    pub shared: Outcode,
    /// The code of the end point.
    pub end: Outcode,
}

impl SegOutcodes {
    /// Classify the points of `seg` after the first, whose code is `start`.
    pub fn of(seg: &PathSeg, start: Outcode, clip: &Rect) -> Self {
        let mut codes = Self {
            union: start,
            shared: start,
            end: start,
        };
        let mut add = |p: Point| {
            let code = Outcode::of(p, clip);
            codes.union |= code;
            codes.shared &= code;
            codes.end = code;
        };
        match seg {
            PathSeg::Line(l) => add(l.p1),
            PathSeg::Quad(q) => {
                add(q.p1);
                add(q.p2);
            }
            PathSeg::Cubic(c) => {
                add(c.p1);
                add(c.p2);
                add(c.p3);
            }
        }
        codes
    }
}
