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
    geometry::{point::Point3, vector::Vector3},
    numeric::scalar::Scalar,
};

#[derive(Clone, Debug)]
pub struct Plane<T: Scalar> {
    pub normal: Vector3<T>,
    pub d: T,
}

impl<T: Scalar> Plane<T>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    pub fn new(normal: Vector3<T>, d: T) -> Self {
        Plane { normal, d }
    }

    pub fn from_points(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> Self {
        let v1 = p1.vector_to(p2);
        let v2 = p1.vector_to(p3);
        let normal = v1.cross(&v2);
        let d = -normal.dot(&p1.as_vector());
        Plane::new(normal, d)
    }

    /// Signed side value of `p`: positive on the side the normal points to,
    /// zero on the plane. Callers classify by sign.
    pub fn oriented_side(&self, p: &Point3<T>) -> T {
        let mut v = self.normal.dot(&p.as_vector());
        v += &self.d;
        v
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal.is_zero()
    }
}
