// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Affine, PathConsumer, Point};

/// A [`PathConsumer`] that applies an affine transform to every point
/// before passing it on.
#[derive(Clone, Debug)]
pub struct Transformed<C> {
    out: C,
    transform: Affine,
}

impl<C> Transformed<C> {
    /// Create a filter applying `transform` and sending to `out`.
    #[inline]
    pub fn new(out: C, transform: Affine) -> Self {
        Self { out, transform }
    }

    /// Replace the transform.
    #[inline]
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Unwrap the output consumer.
    pub fn into_inner(self) -> C {
        self.out
    }
}

impl<C: PathConsumer> PathConsumer for Transformed<C> {
    #[inline]
    fn move_to(&mut self, p: Point) {
        self.out.move_to(self.transform * p);
    }

    #[inline]
    fn line_to(&mut self, p: Point) {
        self.out.line_to(self.transform * p);
    }

    #[inline]
    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.out.quad_to(self.transform * p1, self.transform * p2);
    }

    #[inline]
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.out.curve_to(
            self.transform * p1,
            self.transform * p2,
            self.transform * p3,
        );
    }

    #[inline]
    fn close_path(&mut self) {
        self.out.close_path();
    }

    #[inline]
    fn path_done(&mut self) {
        self.out.path_done();
    }

    #[inline]
    fn closed_hint(&mut self, closed: bool) {
        self.out.closed_hint(closed);
    }
}
