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

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use num_traits::ToPrimitive;
use rug::Rational;

use crate::numeric::scalar::Scalar;
use crate::operations::{Abs, One, Zero};

/// Exact scalar backed by rug::Rational (arbitrary-precision, GMP).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExactRational(pub Rational);

impl<'a, 'b> Add<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn add(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result += &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Sub<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn sub(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Mul<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn mul(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Div<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn div(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result /= &rhs.0;
        ExactRational(result)
    }
}

impl Add for ExactRational {
    type Output = ExactRational;

    fn add(self, rhs: ExactRational) -> ExactRational {
        ExactRational(self.0 + rhs.0)
    }
}

impl Sub for ExactRational {
    type Output = ExactRational;

    fn sub(self, rhs: ExactRational) -> ExactRational {
        ExactRational(self.0 - rhs.0)
    }
}

impl Mul for ExactRational {
    type Output = ExactRational;

    fn mul(self, rhs: ExactRational) -> ExactRational {
        ExactRational(self.0 * rhs.0)
    }
}

impl Div for ExactRational {
    type Output = ExactRational;

    fn div(self, rhs: ExactRational) -> ExactRational {
        ExactRational(self.0 / rhs.0)
    }
}

impl Neg for ExactRational {
    type Output = ExactRational;

    fn neg(self) -> ExactRational {
        ExactRational(-self.0)
    }
}

impl<'a> AddAssign<&'a ExactRational> for ExactRational {
    fn add_assign(&mut self, rhs: &'a ExactRational) {
        self.0 += &rhs.0;
    }
}

impl<'a> SubAssign<&'a ExactRational> for ExactRational {
    fn sub_assign(&mut self, rhs: &'a ExactRational) {
        self.0 -= &rhs.0;
    }
}

impl Abs for ExactRational {
    fn abs(&self) -> Self {
        let mut r = self.0.clone();
        r.abs_mut();
        ExactRational(r)
    }
}

impl Zero for ExactRational {
    fn zero() -> Self {
        ExactRational(Rational::new())
    }

    fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }

    fn is_positive(&self) -> bool {
        self.0.cmp0() == Ordering::Greater
    }

    fn is_negative(&self) -> bool {
        self.0.cmp0() == Ordering::Less
    }
}

impl One for ExactRational {
    fn one() -> Self {
        ExactRational(Rational::from(1))
    }
}

impl From<i32> for ExactRational {
    fn from(v: i32) -> Self {
        ExactRational(Rational::from(v))
    }
}

impl From<f64> for ExactRational {
    fn from(v: f64) -> Self {
        ExactRational(Rational::from_f64(v).expect("finite coordinate"))
    }
}

impl From<Rational> for ExactRational {
    fn from(v: Rational) -> Self {
        ExactRational(v)
    }
}

impl ToPrimitive for ExactRational {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_f64().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.to_f64().to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.0.to_f64())
    }
}

impl Scalar for ExactRational {
    fn from_num_den(num: i32, den: i32) -> Self {
        ExactRational(Rational::from((num, den)))
    }
}
