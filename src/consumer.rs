// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The push protocol every pipeline stage speaks.

use alloc::boxed::Box;

use crate::{PathEl, Point};

/// A sink for path drawing commands.
///
/// Every filter in a pipeline implements this trait for its input and
/// holds another `PathConsumer` as its output, so filters can be chained
/// in any order. Commands arrive in stream order; a well-formed stream
/// starts each subpath with [`move_to`](Self::move_to) and ends with
/// [`path_done`](Self::path_done).
pub trait PathConsumer {
    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Draw a line from the current point to `p`.
    fn line_to(&mut self, p: Point);

    /// Draw a quadratic Bézier from the current point through control
    /// point `p1` to `p2`.
    fn quad_to(&mut self, p1: Point, p2: Point);

    /// Draw a cubic Bézier from the current point through control points
    /// `p1` and `p2` to `p3`.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);

    /// Close the current subpath back to its start point.
    fn close_path(&mut self);

    /// Finish the path; no further commands follow.
    fn path_done(&mut self);

    /// Announce whether the subpath that is about to be replayed ends with
    /// a [`close_path`](Self::close_path).
    ///
    /// Sent by the closed-path detector before each buffered subpath. The
    /// stroker uses it to decide between caps and a closing join; filters
    /// that do not care ignore it.
    #[inline]
    fn closed_hint(&mut self, closed: bool) {
        let _ = closed;
    }

    /// Emit a single path element.
    #[inline]
    fn push_el(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => self.move_to(p),
            PathEl::LineTo(p) => self.line_to(p),
            PathEl::QuadTo(p1, p2) => self.quad_to(p1, p2),
            PathEl::CurveTo(p1, p2, p3) => self.curve_to(p1, p2, p3),
            PathEl::ClosePath => self.close_path(),
        }
    }

    /// Feed every element of `path` into this consumer, then call
    /// [`path_done`](Self::path_done).
    fn consume(&mut self, path: impl IntoIterator<Item = PathEl>)
    where
        Self: Sized,
    {
        for el in path {
            self.push_el(el);
        }
        self.path_done();
    }
}

impl<C: PathConsumer + ?Sized> PathConsumer for &mut C {
    #[inline]
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p);
    }

    #[inline]
    fn line_to(&mut self, p: Point) {
        (**self).line_to(p);
    }

    #[inline]
    fn quad_to(&mut self, p1: Point, p2: Point) {
        (**self).quad_to(p1, p2);
    }

    #[inline]
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        (**self).curve_to(p1, p2, p3);
    }

    #[inline]
    fn close_path(&mut self) {
        (**self).close_path();
    }

    #[inline]
    fn path_done(&mut self) {
        (**self).path_done();
    }

    #[inline]
    fn closed_hint(&mut self, closed: bool) {
        (**self).closed_hint(closed);
    }
}

impl<C: PathConsumer + ?Sized> PathConsumer for Box<C> {
    #[inline]
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p);
    }

    #[inline]
    fn line_to(&mut self, p: Point) {
        (**self).line_to(p);
    }

    #[inline]
    fn quad_to(&mut self, p1: Point, p2: Point) {
        (**self).quad_to(p1, p2);
    }

    #[inline]
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        (**self).curve_to(p1, p2, p3);
    }

    #[inline]
    fn close_path(&mut self) {
        (**self).close_path();
    }

    #[inline]
    fn path_done(&mut self) {
        (**self).path_done();
    }

    #[inline]
    fn closed_hint(&mut self, closed: bool) {
        (**self).closed_hint(closed);
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use crate::{BezPath, PathConsumer, PathEl, Point};

    #[derive(Default)]
    struct Hints(Vec<bool>, usize);

    impl PathConsumer for Hints {
        fn move_to(&mut self, _: Point) {}
        fn line_to(&mut self, _: Point) {}
        fn quad_to(&mut self, _: Point, _: Point) {}
        fn curve_to(&mut self, _: Point, _: Point, _: Point) {}
        fn close_path(&mut self) {}
        fn path_done(&mut self) {
            self.1 += 1;
        }
        fn closed_hint(&mut self, closed: bool) {
            self.0.push(closed);
        }
    }

    #[test]
    fn blanket_impls_forward() {
        let mut hints = Hints::default();
        {
            let by_ref: &mut Hints = &mut hints;
            by_ref.closed_hint(true);
            by_ref.path_done();
        }
        let mut boxed: Box<dyn PathConsumer + '_> = Box::new(&mut hints);
        boxed.closed_hint(false);
        boxed.consume([PathEl::MoveTo(Point::ZERO)]);
        drop(boxed);
        assert_eq!(hints.0, [true, false]);
        assert_eq!(hints.1, 2);
    }

    #[test]
    fn bezpath_ignores_hint() {
        let mut path = BezPath::new();
        path.closed_hint(true);
        path.push_el(PathEl::MoveTo(Point::new(1.0, 2.0)));
        path.path_done();
        assert_eq!(path.elements(), &[PathEl::MoveTo(Point::new(1.0, 2.0))]);
    }
}
