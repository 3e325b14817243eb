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
    hash::{Hash, Hasher},
    ops::{Add, Div, Index, Mul, Sub},
};

use crate::{geometry::vector::Vector, numeric::scalar::Scalar, operations::Zero};

#[derive(Clone, Debug)]
pub struct Point<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

impl<T: Scalar, const N: usize> Point<T, N> {
    pub fn new(coords: [T; N]) -> Self {
        Point { coords }
    }

    pub fn from_vals<V>(vals: [V; N]) -> Self
    where
        V: Into<T>,
    {
        Point {
            coords: vals.map(|v| v.into()),
        }
    }

    pub fn as_vector(&self) -> Vector<T, N> {
        Vector::new(self.coords.clone())
    }
}

impl<T: Scalar, const N: usize> Point<T, N>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    pub fn vector_to(&self, other: &Self) -> Vector<T, N> {
        Vector::new(from_fn(|i| &other.coords[i] - &self.coords[i]))
    }

    pub fn distance_squared_to(&self, other: &Self) -> T {
        let mut acc = T::zero();
        for i in 0..N {
            let d = &other.coords[i] - &self.coords[i];
            acc += &(&d * &d);
        }
        acc
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        let half = T::from_num_den(1, 2);
        Point {
            coords: from_fn(|i| &(&self.coords[i] + &other.coords[i]) * &half),
        }
    }

    pub fn add_vector(&self, v: &Vector<T, N>) -> Self {
        Point {
            coords: from_fn(|i| &self.coords[i] + &v.coords[i]),
        }
    }
}

impl<T: Scalar, const N: usize> Default for Point<T, N> {
    fn default() -> Point<T, N> {
        Point {
            coords: from_fn(|_| T::default()),
        }
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl<T: Scalar, const N: usize> Hash for Point<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in &self.coords {
            coord.hash(state);
        }
    }
}

impl<T: Scalar, const N: usize> PartialEq for Point<T, N> {
    fn eq(&self, other: &Self) -> bool {
        for i in 0..N {
            if self.coords[i] != other.coords[i] {
                return false;
            }
        }
        true
    }
}

impl<T: Scalar, const N: usize> Eq for Point<T, N> {}

pub type Point2<T> = Point<T, 2>;
pub type Point3<T> = Point<T, 3>;
