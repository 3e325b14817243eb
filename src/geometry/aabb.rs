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

use std::{
    array::from_fn,
    ops::{Add, Div, Mul, Sub},
};

use crate::{
    geometry::{point::Point, vector::Vector},
    numeric::scalar::Scalar,
    operations::Zero,
};

/// An axis-aligned bounding box in N dimensions.
#[derive(Clone, Debug)]
pub struct Aabb<T: Scalar, const N: usize> {
    pub min: Point<T, N>,
    pub max: Point<T, N>,
}

impl<T: Scalar, const N: usize> Aabb<T, N>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    pub fn new(min: Point<T, N>, max: Point<T, N>) -> Self {
        Aabb { min, max }
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Point<T, N>, b: &Point<T, N>) -> Self {
        let mins = from_fn(|i| min_by_sign(&a[i], &b[i]));
        let maxs = from_fn(|i| max_by_sign(&a[i], &b[i]));
        Aabb::new(Point::new(mins), Point::new(maxs))
    }

    /// Grow to include one more point.
    pub fn include(&self, p: &Point<T, N>) -> Self {
        let mins = from_fn(|i| min_by_sign(&self.min[i], &p[i]));
        let maxs = from_fn(|i| max_by_sign(&self.max[i], &p[i]));
        Aabb::new(Point::new(mins), Point::new(maxs))
    }

    pub fn union(&self, other: &Aabb<T, N>) -> Aabb<T, N> {
        let mins = from_fn(|i| min_by_sign(&self.min[i], &other.min[i]));
        let maxs = from_fn(|i| max_by_sign(&self.max[i], &other.max[i]));
        Aabb::new(Point::new(mins), Point::new(maxs))
    }

    /// Does this AABB intersect `other`? Touching boxes count.
    pub fn intersects(&self, other: &Aabb<T, N>) -> bool {
        for i in 0..N {
            if (&self.max[i] - &other.min[i]).is_negative() {
                return false;
            }
            if (&other.max[i] - &self.min[i]).is_negative() {
                return false;
            }
        }
        true
    }

    /// Center coordinate along axis `i`.
    pub fn center(&self, i: usize) -> T {
        let half = T::from_num_den(1, 2);
        &(&self.min[i] + &self.max[i]) * &half
    }

    /// Squared distance from `p` to the box, zero when inside.
    pub fn distance_squared_to_point(&self, p: &Point<T, N>) -> T {
        let mut acc = T::zero();
        for i in 0..N {
            let below = &self.min[i] - &p[i];
            if below.is_positive() {
                acc += &(&below * &below);
                continue;
            }
            let above = &p[i] - &self.max[i];
            if above.is_positive() {
                acc += &(&above * &above);
            }
        }
        acc
    }

    /// Slab test against the ray `origin + t * dir`, `t >= 0`.
    pub fn intersects_ray(&self, origin: &Point<T, N>, dir: &Vector<T, N>) -> bool {
        let mut t_lo = T::zero();
        let mut t_hi: Option<T> = None;
        for i in 0..N {
            if dir[i].is_zero() {
                if (&self.min[i] - &origin[i]).is_positive()
                    || (&origin[i] - &self.max[i]).is_positive()
                {
                    return false;
                }
                continue;
            }
            let t1 = &(&self.min[i] - &origin[i]) / &dir[i];
            let t2 = &(&self.max[i] - &origin[i]) / &dir[i];
            let (near, far) = if (&t1 - &t2).is_positive() {
                (t2, t1)
            } else {
                (t1, t2)
            };
            if (&near - &t_lo).is_positive() {
                t_lo = near;
            }
            t_hi = match t_hi {
                None => Some(far),
                Some(h) => {
                    if (&far - &h).is_negative() {
                        Some(far)
                    } else {
                        Some(h)
                    }
                }
            };
        }
        match t_hi {
            None => true,
            Some(h) => !(&t_lo - &h).is_positive(),
        }
    }
}

#[inline(always)]
fn min_by_sign<T: Scalar>(a: &T, b: &T) -> T
where
    for<'a> &'a T: Sub<&'a T, Output = T>,
{
    if (a - b).is_negative() { a.clone() } else { b.clone() }
}

#[inline(always)]
fn max_by_sign<T: Scalar>(a: &T, b: &T) -> T
where
    for<'a> &'a T: Sub<&'a T, Output = T>,
{
    if (a - b).is_positive() { a.clone() } else { b.clone() }
}
