// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc-length parametrization by lazy subdivision.

use crate::common::{cubic_roots_in, within};
use crate::{ControlPolygon, Line, ParamCurve, PathSeg, Point};

/// Deepest level of the subdivision tree.
pub const REC_LIMIT: usize = 16;

/// A node whose control polygon is longer than its chord by less than this
/// is measured directly instead of being subdivided further.
pub const CURVE_LEN_ERR: f64 = 0.01;

/// The parameter span of a leaf at [`REC_LIMIT`].
const MIN_T_INC: f64 = 1.0 / (1 << REC_LIMIT) as f64;

/// Relative tolerance on the control polygon legs below which a leaf is
/// treated as traversed at constant speed.
const LOW_ACCELERATION_ERR: f64 = 0.05;

/// Finds the parameters at which a curve reaches given arc lengths.
///
/// The curve is the root of a binary tree whose children are its halves.
/// A node is a leaf once its control polygon is nearly as short as its
/// chord, or once it is [`REC_LIMIT`] levels deep; its length is taken as
/// the average of the two. The iterator walks the leaves in order, and only
/// ever materializes the path from the root to the current leaf: level `i`
/// of that path is kept in `stack[i]`, and `sides_right[i]` records whether
/// the path continues into the right child of that node.
///
/// Queries must ask for increasing lengths, since the walk never goes back.
#[derive(Clone, Debug)]
pub struct LengthIterator {
    stack: [PathSeg; REC_LIMIT + 1],
    sides_right: [bool; REC_LIMIT],
    rec_level: usize,
    done: bool,
    // The current leaf spans [last_t, next_t].
    last_t: f64,
    next_t: f64,
    len_at_last_t: f64,
    len_at_next_t: f64,
    len_at_last_split: f64,
    last_seg_len: f64,
    // Control polygon leg lengths of the current leaf.
    leaf_legs: [f64; 3],
    low_acceleration: Option<bool>,
    flat_leaf_coeffs: Option<[f64; 4]>,
}

impl Default for LengthIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl LengthIterator {
    /// Create an iterator with no curve.
    pub fn new() -> Self {
        let empty = PathSeg::Line(Line::new(Point::ZERO, Point::ZERO));
        Self {
            stack: [empty; REC_LIMIT + 1],
            sides_right: [false; REC_LIMIT],
            rec_level: 0,
            done: true,
            last_t: 0.0,
            next_t: 0.0,
            len_at_last_t: 0.0,
            len_at_next_t: 0.0,
            len_at_last_split: 0.0,
            last_seg_len: 0.0,
            leaf_legs: [0.0; 3],
            low_acceleration: None,
            flat_leaf_coeffs: None,
        }
    }

    /// Start iterating over `seg`.
    pub fn init(&mut self, seg: PathSeg) {
        self.stack[0] = seg;
        self.rec_level = 0;
        self.last_t = 0.0;
        self.len_at_last_t = 0.0;
        self.next_t = 0.0;
        self.len_at_next_t = 0.0;
        self.go_left();
        self.len_at_last_split = 0.0;
        if self.rec_level > 0 {
            self.sides_right[0] = false;
            self.done = false;
        } else {
            // The root is a leaf.
            self.sides_right[0] = true;
            self.done = true;
        }
        self.last_seg_len = 0.0;
    }

    /// The parameter at which the curve should be split so that the piece
    /// since the previous split has length `len`.
    ///
    /// Returns `1.0` when the rest of the curve is shorter than `len`; in
    /// that case [`last_seg_len`](Self::last_seg_len) tells how much of
    /// `len` was used.
    pub fn advance(&mut self, len: f64) -> f64 {
        let target = self.len_at_last_split + len;
        while self.len_at_next_t < target {
            if self.done {
                self.last_seg_len = self.len_at_next_t - self.len_at_last_split;
                return 1.0;
            }
            self.go_to_next_leaf();
        }
        self.len_at_last_split = target;
        let leaf_len = self.len_at_next_t - self.len_at_last_t;
        let mut t = (target - self.len_at_last_t) / leaf_len;

        // Inside a leaf, length grows linearly with t only if the curve is
        // traversed at constant speed. Otherwise flatten the leaf onto a line
        // (keeping its control leg lengths) and solve that 1D Bézier for the
        // fraction of its length.
        if !self.have_low_acceleration() {
            let [a, b, c, d] = self.flat_leaf_coeffs();
            let roots = cubic_roots_in(a, b, c, t * d, 0.0, 1.0);
            if roots.len() == 1 && !roots[0].is_nan() {
                t = roots[0];
            }
        }
        // Map from the leaf's parameter to the whole curve's.
        t = t * (self.next_t - self.last_t) + self.last_t;
        if t >= 1.0 {
            t = 1.0;
            self.done = true;
        }
        self.last_seg_len = len;
        t
    }

    /// The length of the piece ending at the parameter most recently
    /// returned by [`advance`](Self::advance).
    #[inline]
    pub fn last_seg_len(&self) -> f64 {
        self.last_seg_len
    }

    /// The length of the whole curve.
    ///
    /// This walks every remaining leaf; the iterator has to be
    /// [re-initialized](Self::init) before it can answer queries again.
    pub fn total_length(&mut self) -> f64 {
        while !self.done {
            self.go_to_next_leaf();
        }
        self.len_at_next_t
    }

    fn have_low_acceleration(&mut self) -> bool {
        if let Some(low) = self.low_acceleration {
            return low;
        }
        let [len1, len2, len3] = self.leaf_legs;
        let low = match self.stack[self.rec_level] {
            PathSeg::Line(_) => true,
            PathSeg::Quad(_) => within(len1, len2, LOW_ACCELERATION_ERR * len2),
            PathSeg::Cubic(_) => {
                let err3 = LOW_ACCELERATION_ERR * len3;
                within(len1, len2, LOW_ACCELERATION_ERR * len2)
                    && within(len2, len3, err3)
                    && within(len1, len3, err3)
            }
        };
        self.low_acceleration = Some(low);
        low
    }

    /// Power-basis coefficients of the current leaf laid flat: a 1D Bézier
    /// whose control values are the cumulative leg lengths. The last entry
    /// is the negated total, to be scaled by the target fraction.
    fn flat_leaf_coeffs(&mut self) -> [f64; 4] {
        if let Some(coeffs) = self.flat_leaf_coeffs {
            return coeffs;
        }
        let x = self.leaf_legs[0];
        let y = x + self.leaf_legs[1];
        let coeffs = match self.stack[self.rec_level] {
            PathSeg::Cubic(_) => {
                let z = y + self.leaf_legs[2];
                [3.0 * (x - y) + z, 3.0 * (y - 2.0 * x), 3.0 * x, -z]
            }
            PathSeg::Quad(_) => [0.0, y - 2.0 * x, 2.0 * x, -y],
            PathSeg::Line(_) => [0.0, 0.0, x, -x],
        };
        self.flat_leaf_coeffs = Some(coeffs);
        coeffs
    }

    /// Move to the next leaf of an in-order traversal.
    ///
    /// Must be called on a leaf other than the root.
    fn go_to_next_leaf(&mut self) {
        // Climb to the nearest ancestor whose right child is unvisited.
        let mut level = self.rec_level - 1;
        while self.sides_right[level] {
            if level == 0 {
                self.rec_level = 0;
                self.done = true;
                return;
            }
            level -= 1;
        }
        self.sides_right[level] = true;
        // The right half was left at `level` when the node was split.
        self.stack[level + 1] = self.stack[level];
        self.rec_level = level + 1;
        self.go_left();
    }

    /// Descend to the leftmost leaf below the current node and account for
    /// its length.
    fn go_left(&mut self) {
        loop {
            if let Some(len) = self.on_leaf() {
                self.last_t = self.next_t;
                self.len_at_last_t = self.len_at_next_t;
                self.next_t += (1 << (REC_LIMIT - self.rec_level)) as f64 * MIN_T_INC;
                self.len_at_next_t += len;
                self.flat_leaf_coeffs = None;
                self.low_acceleration = None;
                return;
            }
            let (left, right) = self.stack[self.rec_level].subdivide();
            self.stack[self.rec_level] = right;
            self.stack[self.rec_level + 1] = left;
            self.sides_right[self.rec_level] = false;
            self.rec_level += 1;
        }
    }

    /// The length of the current node if it is a leaf.
    fn on_leaf(&mut self) -> Option<f64> {
        let seg = self.stack[self.rec_level];
        self.leaf_legs = match seg {
            PathSeg::Line(l) => [l.length(), 0.0, 0.0],
            PathSeg::Quad(q) => [q.p0.distance(q.p1), q.p1.distance(q.p2), 0.0],
            PathSeg::Cubic(c) => [
                c.p0.distance(c.p1),
                c.p1.distance(c.p2),
                c.p2.distance(c.p3),
            ],
        };
        let poly_len = self.leaf_legs.iter().sum::<f64>();
        let line_len = seg.chord_len();
        if poly_len - line_len < CURVE_LEN_ERR || self.rec_level == REC_LIMIT {
            Some((poly_len + line_len) / 2.0)
        } else {
            None
        }
    }
}
