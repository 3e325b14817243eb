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

use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use num_traits::ToPrimitive;

use crate::numeric::scalar::Scalar;
use crate::operations::{Abs, One, Zero};

/// Floating-point scalar. Predicates built on it are not exact; use it for
/// statistical work (ray voting) or for inputs known to be far from the
/// degenerate configurations the resolver has to disambiguate.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ApproxF64(pub f64);

// Inputs are finite coordinates; NaN is never constructed by this crate.
impl Eq for ApproxF64 {}

impl Hash for ApproxF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits());
    }
}

impl<'a, 'b> Add<&'b ApproxF64> for &'a ApproxF64 {
    type Output = ApproxF64;

    fn add(self, rhs: &'b ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 + rhs.0)
    }
}

impl<'a, 'b> Sub<&'b ApproxF64> for &'a ApproxF64 {
    type Output = ApproxF64;

    fn sub(self, rhs: &'b ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 - rhs.0)
    }
}

impl<'a, 'b> Mul<&'b ApproxF64> for &'a ApproxF64 {
    type Output = ApproxF64;

    fn mul(self, rhs: &'b ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 * rhs.0)
    }
}

impl<'a, 'b> Div<&'b ApproxF64> for &'a ApproxF64 {
    type Output = ApproxF64;

    fn div(self, rhs: &'b ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 / rhs.0)
    }
}

impl Add for ApproxF64 {
    type Output = ApproxF64;

    fn add(self, rhs: ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 + rhs.0)
    }
}

impl Sub for ApproxF64 {
    type Output = ApproxF64;

    fn sub(self, rhs: ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 - rhs.0)
    }
}

impl Mul for ApproxF64 {
    type Output = ApproxF64;

    fn mul(self, rhs: ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 * rhs.0)
    }
}

impl Div for ApproxF64 {
    type Output = ApproxF64;

    fn div(self, rhs: ApproxF64) -> ApproxF64 {
        ApproxF64(self.0 / rhs.0)
    }
}

impl Neg for ApproxF64 {
    type Output = ApproxF64;

    fn neg(self) -> ApproxF64 {
        ApproxF64(-self.0)
    }
}

impl<'a> AddAssign<&'a ApproxF64> for ApproxF64 {
    fn add_assign(&mut self, rhs: &'a ApproxF64) {
        self.0 += rhs.0;
    }
}

impl<'a> SubAssign<&'a ApproxF64> for ApproxF64 {
    fn sub_assign(&mut self, rhs: &'a ApproxF64) {
        self.0 -= rhs.0;
    }
}

impl Abs for ApproxF64 {
    fn abs(&self) -> Self {
        ApproxF64(self.0.abs())
    }
}

impl Zero for ApproxF64 {
    fn zero() -> Self {
        ApproxF64(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    fn is_negative(&self) -> bool {
        self.0 < 0.0
    }
}

impl One for ApproxF64 {
    fn one() -> Self {
        ApproxF64(1.0)
    }
}

impl From<i32> for ApproxF64 {
    fn from(v: i32) -> Self {
        ApproxF64(v as f64)
    }
}

impl From<f64> for ApproxF64 {
    fn from(v: f64) -> Self {
        ApproxF64(v)
    }
}

impl ToPrimitive for ApproxF64 {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl Scalar for ApproxF64 {
    fn from_num_den(num: i32, den: i32) -> Self {
        ApproxF64(num as f64 / den as f64)
    }
}
