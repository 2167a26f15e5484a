// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

#![allow(missing_docs)]

use arrayvec::ArrayVec;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident/$lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f32 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lfname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("trazo requires either the `std` or `libm` feature")
            })+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("trazo requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs/fabsf;
    fn acos(self) -> Self => acos/acosf;
    fn cbrt(self) -> Self => cbrt/cbrtf;
    fn cos(self) -> Self => cos/cosf;
    fn floor(self) -> Self => floor/floorf;
    fn hypot(self, other: Self) -> Self => hypot/hypotf;
    fn sin(self) -> Self => sin/sinf;
    fn sqrt(self) -> Self => sqrt/sqrtf;
}

/// Returns `true` if `x` and `y` differ by at most `err`.
#[inline]
pub fn within(x: f64, y: f64, err: f64) -> bool {
    let d = y - x;
    d <= err && d >= -err
}

/// The distance from `x` to the next representable `f64` of larger magnitude.
///
/// Used to scale "same point" tolerances to the magnitude of the coordinates.
pub fn ulp(x: f64) -> f64 {
    let x = x.abs();
    if !x.is_finite() {
        return x;
    }
    if x == f64::MAX {
        return x - f64::from_bits(x.to_bits() - 1);
    }
    f64::from_bits(x.to_bits() + 1) - x
}

/// Find real roots of the quadratic equation a x² + b x + c = 0.
///
/// The larger-magnitude root is computed with the sign of the discriminant
/// square root matched to `b`, and the other one from the product of the
/// roots, so that no digits are lost to cancellation. If `a` is zero the
/// equation is treated as linear.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    if a != 0.0 {
        let dis = b * b - 4.0 * a * c;
        if dis > 0.0 {
            let sqrt_dis = dis.sqrt();
            if b >= 0.0 {
                result.push((2.0 * c) / (-b - sqrt_dis));
                result.push((-b - sqrt_dis) / (2.0 * a));
            } else {
                result.push((-b + sqrt_dis) / (2.0 * a));
                result.push((2.0 * c) / (-b + sqrt_dis));
            }
        } else if dis == 0.0 {
            result.push(-b / (2.0 * a));
        }
    } else if b != 0.0 {
        result.push(-c / b);
    }
    result
}

/// Find the real roots of d t³ + a t² + b t + c = 0 lying in `[lo, hi)`.
///
/// Uses Cardano's formula on the depressed cubic, switching to the
/// trigonometric form when there are three real roots. This is not as
/// accurate as a polished solver, but the callers only need parameters
/// good to a fraction of a device pixel.
///
/// See <https://github.com/erich666/GraphicsGems/blob/master/gems/Roots3And4.c>.
pub fn cubic_roots_in(d: f64, a: f64, b: f64, c: f64, lo: f64, hi: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    if d == 0.0 {
        for root in quadratic_roots(a, b, c) {
            if root >= lo && root < hi {
                result.push(root);
            }
        }
        return result;
    }
    let a = a / d;
    let b = b / d;
    let c = c / d;

    // Substitute x = y - a/3 to eliminate the quadratic term, giving
    // y³ + 3p y + 2q = 0.
    let sub = (1.0 / 3.0) * a;
    let sq_a = a * a;
    let p = (1.0 / 3.0) * ((-1.0 / 3.0) * sq_a + b);
    let q = 0.5 * ((2.0 / 27.0) * a * sq_a - sub * b + c);

    let cb_p = p * p * p;
    let disc = q * q + cb_p;

    let mut roots = ArrayVec::<f64, 3>::new();
    if disc < 0.0 {
        let phi = (1.0 / 3.0) * (-q / (-cb_p).sqrt()).acos();
        let t = 2.0 * (-p).sqrt();
        const THIRD_PI: f64 = core::f64::consts::PI / 3.0;
        roots.push(t * phi.cos() - sub);
        roots.push(-t * (phi + THIRD_PI).cos() - sub);
        roots.push(-t * (phi - THIRD_PI).cos() - sub);
    } else {
        let sqrt_disc = disc.sqrt();
        let u = (sqrt_disc - q).cbrt();
        let v = -(sqrt_disc + q).cbrt();
        roots.push(u + v - sub);
        if within(disc, 0.0, 1e-8) {
            roots.push(-0.5 * (u + v) - sub);
        }
    }
    for root in roots {
        if root >= lo && root < hi {
            result.push(root);
        }
    }
    result
}

/// Sorts a small buffer of parameters in increasing order.
///
/// NaN values compare as equal to everything, so they end up wherever
/// the insertion order leaves them; callers filter them beforehand.
pub(crate) fn sort_params<const N: usize>(ts: &mut ArrayVec<f64, N>) {
    ts.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use crate::common::*;

    fn verify<const N: usize>(mut roots: ArrayVec<f64, N>, expected: &[f64], epsilon: f64) {
        assert_eq!(expected.len(), roots.len(), "{roots:?} vs {expected:?}");
        sort_params(&mut roots);
        for i in 0..expected.len() {
            assert!(
                (roots[i] - expected[i]).abs() < epsilon,
                "{roots:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn test_quadratic_roots() {
        verify(
            quadratic_roots(1.0, 0.0, -5.0),
            &[-(5.0f64.sqrt()), 5.0f64.sqrt()],
            1e-12,
        );
        verify(quadratic_roots(1.0, 0.0, 5.0), &[], 1e-12);
        verify(quadratic_roots(0.0, 1.0, 5.0), &[-5.0], 1e-12);
        verify(quadratic_roots(1.0, 2.0, 1.0), &[-1.0], 1e-12);
        verify(quadratic_roots(0.0, 0.0, 1.0), &[], 1e-12);
    }

    #[test]
    fn quadratic_roots_no_cancellation() {
        // Roots are 1e8 and 1e-8; the naive formula loses the small one.
        let roots = quadratic_roots(1.0, -(1e8 + 1e-8), 1.0);
        assert_eq!(roots.len(), 2);
        let small = roots[0].min(roots[1]);
        assert!((small - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn test_cubic_roots_in() {
        // (t - 0.25)(t - 0.5)(t - 0.75)
        let d = 1.0;
        let a = -1.5;
        let b = 0.6875;
        let c = -0.09375;
        verify(cubic_roots_in(d, a, b, c, 0.0, 1.0), &[0.25, 0.5, 0.75], 1e-9);
        verify(cubic_roots_in(d, a, b, c, 0.3, 1.0), &[0.5, 0.75], 1e-9);
        // single real root of t³ - 0.125
        verify(cubic_roots_in(1.0, 0.0, 0.0, -0.125, 0.0, 1.0), &[0.5], 1e-12);
        // degenerate to a quadratic
        verify(cubic_roots_in(0.0, 1.0, 0.0, -0.25, 0.0, 1.0), &[0.5], 1e-12);
        // half-open interval excludes the upper bound
        verify(cubic_roots_in(0.0, 0.0, 1.0, -1.0, 0.0, 1.0), &[], 1e-12);
    }

    #[test]
    fn test_ulp() {
        assert_eq!(ulp(1.0), f64::EPSILON);
        assert_eq!(ulp(-1.0), f64::EPSILON);
        assert!(ulp(1e6) > ulp(1.0));
        assert!(ulp(0.0) > 0.0);
    }

    #[test]
    fn test_within() {
        assert!(within(1.0, 1.05, 0.1));
        assert!(!within(1.0, 1.2, 0.1));
        assert!(!within(0.0, f64::NAN, 1.0));
    }
}
