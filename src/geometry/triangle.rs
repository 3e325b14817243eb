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

use crate::{
    geometry::{
        aabb::Aabb,
        point::{Point, Point2, Point3},
        segment::Segment3,
        vector::Vector3,
    },
    kernel::{orient2d, orient3d},
    numeric::scalar::Scalar,
    operations::{Abs, Zero},
};

#[derive(Clone, Debug)]
pub struct Triangle<T: Scalar> {
    pub a: Point3<T>,
    pub b: Point3<T>,
    pub c: Point3<T>,
}

impl<T: Scalar> Triangle<T> {
    pub fn new(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>) -> Self {
        Self {
            a: a.clone(),
            b: b.clone(),
            c: c.clone(),
        }
    }

    pub fn vertex(&self, i: usize) -> &Point3<T> {
        match i {
            0 => &self.a,
            1 => &self.b,
            2 => &self.c,
            _ => panic!("invalid triangle vertex index"),
        }
    }
}

impl<T: Scalar> Triangle<T>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    pub fn normal(&self) -> Vector3<T> {
        let ab = self.a.vector_to(&self.b);
        let ac = self.a.vector_to(&self.c);
        ab.cross(&ac)
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal().is_zero()
    }

    pub fn aabb(&self) -> Aabb<T, 3> {
        Aabb::from_points(&self.a, &self.b).include(&self.c)
    }

    /// Exact closest point on the triangle, by classifying `p` against the
    /// vertex/edge/interior regions. Every division below has a non-zero
    /// denominator as long as the triangle is not degenerate.
    pub fn closest_point(&self, p: &Point3<T>) -> Point3<T> {
        let ab = self.a.vector_to(&self.b);
        let ac = self.a.vector_to(&self.c);
        let ap = self.a.vector_to(p);

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1.is_negative_or_zero() && d2.is_negative_or_zero() {
            return self.a.clone();
        }

        let bp = self.b.vector_to(p);
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3.is_positive_or_zero() && (&d4 - &d3).is_negative_or_zero() {
            return self.b.clone();
        }

        let vc = &(&d1 * &d4) - &(&d3 * &d2);
        if vc.is_negative_or_zero() && d1.is_positive_or_zero() && d3.is_negative_or_zero() {
            let v = &d1 / &(&d1 - &d3);
            return self.a.add_vector(&ab.scale(&v));
        }

        let cp = self.c.vector_to(p);
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6.is_positive_or_zero() && (&d5 - &d6).is_negative_or_zero() {
            return self.c.clone();
        }

        let vb = &(&d5 * &d2) - &(&d1 * &d6);
        if vb.is_negative_or_zero() && d2.is_positive_or_zero() && d6.is_negative_or_zero() {
            let w = &d2 / &(&d2 - &d6);
            return self.a.add_vector(&ac.scale(&w));
        }

        let va = &(&d3 * &d6) - &(&d5 * &d4);
        let d4_d3 = &d4 - &d3;
        let d5_d6 = &d5 - &d6;
        if va.is_negative_or_zero() && d4_d3.is_positive_or_zero() && d5_d6.is_positive_or_zero() {
            let w = &d4_d3 / &(&d4_d3 + &d5_d6);
            let bc = self.b.vector_to(&self.c);
            return self.b.add_vector(&bc.scale(&w));
        }

        let denom = &(&va + &vb) + &vc;
        let v = &vb / &denom;
        let w = &vc / &denom;
        self.a.add_vector(&ab.scale(&v).add(&ac.scale(&w)))
    }

    /// Exact segment-triangle intersection test, touching configurations
    /// included: an endpoint on the triangle, the segment in the triangle's
    /// plane, and zero-length segments all count as intersections when the
    /// shared point lies on the (closed) triangle.
    pub fn intersects_segment(&self, seg: &Segment3<T>) -> bool {
        let sa = orient3d(&self.a, &self.b, &self.c, &seg.a);
        let sb = orient3d(&self.a, &self.b, &self.c, &seg.b);

        if sa.is_positive() && sb.is_positive() {
            return false;
        }
        if sa.is_negative() && sb.is_negative() {
            return false;
        }

        if sa.is_zero() && sb.is_zero() {
            // Whole segment in the supporting plane.
            let drop = dominant_axis(&self.normal());
            let a2 = project(&seg.a, drop);
            let b2 = project(&seg.b, drop);
            let t0 = project(&self.a, drop);
            let t1 = project(&self.b, drop);
            let t2 = project(&self.c, drop);
            if point_in_triangle_2d(&a2, &t0, &t1, &t2) || point_in_triangle_2d(&b2, &t0, &t1, &t2)
            {
                return true;
            }
            return segments_intersect_2d(&a2, &b2, &t0, &t1)
                || segments_intersect_2d(&a2, &b2, &t1, &t2)
                || segments_intersect_2d(&a2, &b2, &t2, &t0);
        }
        if sa.is_zero() {
            return self.contains_coplanar_point(&seg.a);
        }
        if sb.is_zero() {
            return self.contains_coplanar_point(&seg.b);
        }

        // Strict plane crossing: the segment pierces the triangle iff it
        // passes the three edge side tests with one consistent sign.
        let u = orient3d(&seg.a, &seg.b, &self.a, &self.b);
        let v = orient3d(&seg.a, &seg.b, &self.b, &self.c);
        let w = orient3d(&seg.a, &seg.b, &self.c, &self.a);
        (u.is_positive_or_zero() && v.is_positive_or_zero() && w.is_positive_or_zero())
            || (u.is_negative_or_zero() && v.is_negative_or_zero() && w.is_negative_or_zero())
    }

    /// Parameter of the first crossing of `origin + t * dir` (t >= 0) with
    /// the triangle, None for parallel rays and misses. Rays in the
    /// triangle's plane report no hit; the ray voter treats them as misses.
    pub fn ray_hit(&self, origin: &Point3<T>, dir: &Vector3<T>) -> Option<T> {
        let n = self.normal();
        let denom = n.dot(dir);
        if denom.is_zero() {
            return None;
        }
        let t = &n.dot(&origin.vector_to(&self.a)) / &denom;
        if t.is_negative() {
            return None;
        }
        let hit = origin.add_vector(&dir.scale(&t));
        if self.contains_coplanar_point(&hit) {
            Some(t)
        } else {
            None
        }
    }

    /// Membership test for a point already known to lie in the supporting
    /// plane; boundary included.
    pub fn contains_coplanar_point(&self, p: &Point3<T>) -> bool {
        let drop = dominant_axis(&self.normal());
        point_in_triangle_2d(
            &project(p, drop),
            &project(&self.a, drop),
            &project(&self.b, drop),
            &project(&self.c, drop),
        )
    }
}

/// Axis with the largest absolute normal component; projecting it away
/// keeps the triangle non-degenerate in 2D.
fn dominant_axis<T: Scalar>(n: &Vector3<T>) -> usize
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let ax = n[0].abs();
    let ay = n[1].abs();
    let az = n[2].abs();
    if (&ax - &ay).is_positive_or_zero() {
        if (&ax - &az).is_positive_or_zero() { 0 } else { 2 }
    } else if (&ay - &az).is_positive_or_zero() {
        1
    } else {
        2
    }
}

fn project<T: Scalar>(p: &Point3<T>, drop: usize) -> Point2<T> {
    Point::new([p[(drop + 1) % 3].clone(), p[(drop + 2) % 3].clone()])
}

fn point_in_triangle_2d<T: Scalar>(
    p: &Point2<T>,
    t0: &Point2<T>,
    t1: &Point2<T>,
    t2: &Point2<T>,
) -> bool
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let s1 = orient2d(t0, t1, p);
    let s2 = orient2d(t1, t2, p);
    let s3 = orient2d(t2, t0, p);
    (s1.is_positive_or_zero() && s2.is_positive_or_zero() && s3.is_positive_or_zero())
        || (s1.is_negative_or_zero() && s2.is_negative_or_zero() && s3.is_negative_or_zero())
}

/// 2D segment test, collinear overlap and endpoint touches included.
fn segments_intersect_2d<T: Scalar>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> bool
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let o1 = orient2d(c, d, a);
    let o2 = orient2d(c, d, b);
    let o3 = orient2d(a, b, c);
    let o4 = orient2d(a, b, d);

    if o1.is_zero() && o2.is_zero() && o3.is_zero() && o4.is_zero() {
        // All four endpoints on one line: overlap iff the coordinate
        // intervals overlap on both axes.
        return ranges_overlap(&a[0], &b[0], &c[0], &d[0])
            && ranges_overlap(&a[1], &b[1], &c[1], &d[1]);
    }

    (&o1 * &o2).is_negative_or_zero() && (&o3 * &o4).is_negative_or_zero()
}

fn ranges_overlap<T: Scalar>(a0: &T, a1: &T, b0: &T, b1: &T) -> bool
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let (alo, ahi) = if (a0 - a1).is_positive() {
        (a1, a0)
    } else {
        (a0, a1)
    };
    let (blo, bhi) = if (b0 - b1).is_positive() {
        (b1, b0)
    } else {
        (b0, b1)
    };
    !(bhi - alo).is_negative() && !(ahi - blo).is_negative()
}
