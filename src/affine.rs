// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use core::ops::{Mul, MulAssign};

use crate::{Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Threshold for [`Affine::uniform_scale`]; the orthogonality and equal
/// length checks on the linear part must hold to within this value.
const UNIFORM_EPSILON: f64 = 2.0 * f64::EPSILON;

/// A 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Self = Self::scale(1.0);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    ///
    /// The idea is that `(A * B) * v == A * (B * v)`, where `*` is the
    /// [`Mul`] trait.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Self {
        Self(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Self {
        Self([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing non-uniform scaling
    /// with different scale values for x and y
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Self {
        Self([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// An affine transform representing rotation.
    ///
    /// The convention for rotation is that a positive angle rotates a
    /// positive X direction into positive Y. The angle, `th`, is expressed
    /// in radians.
    #[inline]
    pub fn rotate(th: f64) -> Self {
        let (s, c) = (th.sin(), th.cos());
        Self([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub fn translate<V: Into<Vec2>>(p: V) -> Self {
        let p = p.into();
        Self([1.0, 0.0, 0.0, 1.0, p.x, p.y])
    }

    /// An affine transformation representing a skew.
    #[inline(always)]
    pub const fn skew(skew_x: f64, skew_y: f64) -> Self {
        Self([1.0, skew_y, skew_x, 1.0, 0.0, 0.0])
    }

    /// `self` followed by a translation of `trans`.
    #[inline]
    #[must_use]
    pub fn then_translate(mut self, trans: Vec2) -> Self {
        self.0[4] += trans.x;
        self.0[5] += trans.y;
        self
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Compute the determinant of this transform.
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Returns `true` if the linear part collapses the plane onto a line
    /// or a point, so that no geometry survives the transform.
    pub fn is_singular(self) -> bool {
        self.determinant().abs() <= 2.0 * f64::MIN_POSITIVE
    }

    /// Compute the inverse transform.
    ///
    /// Produces NaN values when the determinant is zero.
    pub fn inverse(self) -> Self {
        let inv_det = self.determinant().recip();
        Self([
            inv_det * self.0[3],
            -inv_det * self.0[1],
            -inv_det * self.0[2],
            inv_det * self.0[0],
            inv_det * (self.0[2] * self.0[5] - self.0[3] * self.0[4]),
            inv_det * (self.0[1] * self.0[4] - self.0[0] * self.0[5]),
        ])
    }

    /// The linear part of this transform, with the translation removed.
    #[inline]
    #[must_use]
    pub fn linear(self) -> Self {
        self.with_translation(Vec2::ZERO)
    }

    /// If the linear part is a rotation combined with a uniform scale
    /// (possibly mirrored), returns that scale factor.
    ///
    /// Widths and dash lengths can be multiplied by this factor instead of
    /// transforming the stroke geometry.
    pub fn uniform_scale(self) -> Option<f64> {
        let [a, b, c, d, _, _] = self.0;
        let near_zero = |v: f64| v.abs() < UNIFORM_EPSILON * (a * a + b * b + c * c + d * d);
        if near_zero(a * c + b * d) && near_zero(a * a + b * b - (c * c + d * d)) {
            Some((a * a + b * b).sqrt())
        } else {
            None
        }
    }

    /// Apply the linear part of this transform to a vector.
    #[inline]
    pub fn transform_vec(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.0[0] * v.x + self.0[2] * v.y,
            self.0[1] * v.x + self.0[3] * v.y,
        )
    }

    /// Compute the bounding box of a transformed rectangle.
    ///
    /// The returned rectangle always has non-negative width and height.
    pub fn transform_rect_bbox(self, rect: Rect) -> Rect {
        let p00 = self * Point::new(rect.x0, rect.y0);
        let p01 = self * Point::new(rect.x0, rect.y1);
        let p10 = self * Point::new(rect.x1, rect.y0);
        let p11 = self * Point::new(rect.x1, rect.y1);
        Rect::from_points(p00, p01).union(Rect::from_points(p10, p11))
    }

    /// Is this map [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Returns the translation part of this affine map (`(self.0[4], self.0[5])`).
    #[inline(always)]
    pub fn translation(self) -> Vec2 {
        Vec2::new(self.0[4], self.0[5])
    }

    /// Replaces the translation portion of this affine map
    #[must_use]
    #[inline(always)]
    pub fn with_translation(mut self, trans: Vec2) -> Self {
        self.0[4] = trans.x;
        self.0[5] = trans.y;
        self
    }
}

impl Default for Affine {
    #[inline(always)]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = self.mul(other);
    }
}

#[cfg(feature = "mint")]
impl From<Affine> for mint::ColumnMatrix2x3<f64> {
    #[inline(always)]
    fn from(a: Affine) -> Self {
        Self {
            x: mint::Vector2 {
                x: a.0[0],
                y: a.0[1],
            },
            y: mint::Vector2 {
                x: a.0[2],
                y: a.0[3],
            },
            z: mint::Vector2 {
                x: a.0[4],
                y: a.0[5],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Point, Rect, Vec2};
    use core::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    fn affine_assert_near(a0: Affine, a1: Affine) {
        for i in 0..6 {
            assert!((a0.0[i] - a1.0[i]).abs() < 1e-9, "{a0:?} != {a1:?}");
        }
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
        assert_near(Affine::skew(0.0, 0.0) * p, p);
        assert_near(Affine::skew(2.0, 4.0) * p, Point::new(11.0, 16.0));
    }

    #[test]
    fn affine_inv() {
        let a = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        let a_inv = a.inverse();
        affine_assert_near(a * a_inv, Affine::IDENTITY);
        affine_assert_near(a_inv * a, Affine::IDENTITY);
        let p = Point::new(3.0, 4.0);
        assert_near(a_inv * (a * p), p);
    }

    #[test]
    fn uniform_scale() {
        assert_eq!(Affine::IDENTITY.uniform_scale(), Some(1.0));
        let s = (Affine::rotate(0.7) * Affine::scale(3.0)).uniform_scale();
        assert!(s.is_some_and(|s| (s - 3.0).abs() < 1e-12));
        assert_eq!(Affine::scale_non_uniform(1.0, 2.0).uniform_scale(), None);
        assert_eq!(Affine::skew(0.5, 0.0).uniform_scale(), None);
        // translation does not affect the scale
        assert_eq!(Affine::translate((10.0, 3.0)).uniform_scale(), Some(1.0));
    }

    #[test]
    fn singular() {
        assert!(Affine::scale(0.0).is_singular());
        assert!(Affine::new([1.0, 2.0, 2.0, 4.0, 0.0, 0.0]).is_singular());
        assert!(!Affine::scale(1e-100).is_singular());
    }

    #[test]
    fn linear_and_vec() {
        let a = Affine::scale_non_uniform(2.0, 3.0).then_translate(Vec2::new(5.0, 5.0));
        assert_eq!(a.linear().translation(), Vec2::ZERO);
        assert_eq!(a.transform_vec(Vec2::new(1.0, 1.0)), Vec2::new(2.0, 3.0));
        let bbox = Affine::rotate(PI / 2.0).transform_rect_bbox(Rect::new(0.0, 0.0, 2.0, 1.0));
        assert!((bbox.width() - 1.0).abs() < 1e-9);
        assert!((bbox.height() - 2.0).abs() < 1e-9);
    }
}
