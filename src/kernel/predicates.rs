// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::ops::{Add, Div, Mul, Sub};

use crate::geometry::point::{Point2, Point3};
use crate::numeric::scalar::Scalar;

/// Signed doubled area of the triangle (a, b, c):
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
pub fn orient2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    &(&(&b[0] - &a[0]) * &(&c[1] - &a[1])) - &(&(&b[1] - &a[1]) * &(&c[0] - &a[0]))
}

/// Signed volume of the tetrahedron (a, b, c, d): ((b-a) x (c-a)) . (d-a).
/// Positive means `d` lies on the positive side of the plane through
/// (a, b, c) under the right-hand winding convention.
pub fn orient3d<T: Scalar>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let ab = a.vector_to(b);
    let ac = a.vector_to(c);
    let ad = a.vector_to(d);
    ab.cross(&ac).dot(&ad)
}

/// Exact collinearity: the cross product of (b-a) and (c-a) vanishes.
pub fn are_collinear<T: Scalar>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>) -> bool
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let ab = a.vector_to(b);
    let ac = a.vector_to(c);
    ab.cross(&ac).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::{Point2, Point3};
    use crate::numeric::approx_f64::ApproxF64;
    use crate::numeric::exact_rational::ExactRational;
    use crate::operations::Zero;

    fn p3(x: f64, y: f64, z: f64) -> Point3<ExactRational> {
        Point3::from_vals([x, y, z])
    }

    #[test]
    fn ccw_test() {
        let a = Point2::<ApproxF64>::from_vals([0.0, 0.0]);
        let b = Point2::<ApproxF64>::from_vals([1.0, 0.0]);
        let c = Point2::<ApproxF64>::from_vals([0.0, 1.0]);

        assert!(orient2d(&a, &b, &c).is_positive());
    }

    #[test]
    fn orientation_3d_positive_volume() {
        let a = p3(0.0, 0.0, 0.0);
        let b = p3(1.0, 0.0, 0.0);
        let c = p3(0.0, 1.0, 0.0);
        let d = p3(0.0, 0.0, 1.0); // above the abc plane

        assert!(orient3d(&a, &b, &c, &d).is_positive());
    }

    #[test]
    fn orientation_3d_negative_volume() {
        let a = p3(0.0, 0.0, 0.0);
        let b = p3(1.0, 0.0, 0.0);
        let c = p3(0.0, 1.0, 0.0);
        let d = p3(0.0, 0.0, -1.0); // below the abc plane

        assert!(orient3d(&a, &b, &c, &d).is_negative());
    }

    #[test]
    fn orientation_3d_coplanar_is_exactly_zero() {
        let a = p3(0.0, 0.0, 0.0);
        let b = p3(1.0, 0.0, 0.0);
        let c = p3(0.0, 1.0, 0.0);
        let d = p3(0.25, 0.75, 0.0);

        assert!(orient3d(&a, &b, &c, &d).is_zero());
    }

    #[test]
    fn collinear_exact() {
        let a = p3(0.0, 0.0, 0.0);
        let b = p3(1.0, 0.5, 0.25);
        let c = p3(2.0, 1.0, 0.5);
        let off = p3(2.0, 1.0, 0.625);

        assert!(are_collinear(&a, &b, &c));
        assert!(!are_collinear(&a, &b, &off));
    }
}
