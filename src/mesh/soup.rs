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
    error::ResolveError,
    geometry::{
        aabb::Aabb,
        aabb_tree::Primitive,
        point::Point3,
        segment::Segment3,
        triangle::Triangle,
        vector::Vector3,
    },
    numeric::scalar::Scalar,
};

/// An indexed triangle set. No manifoldness, orientation, or closedness is
/// assumed anywhere in this crate; facets may intersect each other.
#[derive(Clone, Debug)]
pub struct TriangleSoup<T: Scalar> {
    vertices: Vec<Point3<T>>,
    facets: Vec<[usize; 3]>,
}

impl<T: Scalar> TriangleSoup<T> {
    pub fn new(vertices: Vec<Point3<T>>, facets: Vec<[usize; 3]>) -> Result<Self, ResolveError> {
        for (fid, f) in facets.iter().enumerate() {
            for &v in f {
                if v >= vertices.len() {
                    return Err(ResolveError::InvalidInput(format!(
                        "facet {fid} references vertex {v} out of range"
                    )));
                }
            }
            if f[0] == f[1] || f[1] == f[2] || f[2] == f[0] {
                return Err(ResolveError::InvalidInput(format!(
                    "facet {fid} repeats a vertex index"
                )));
            }
        }
        Ok(Self { vertices, facets })
    }

    pub fn vertices(&self) -> &[Point3<T>] {
        &self.vertices
    }

    pub fn facets(&self) -> &[[usize; 3]] {
        &self.facets
    }

    pub fn vertex(&self, i: usize) -> &Point3<T> {
        &self.vertices[i]
    }

    pub fn facet(&self, i: usize) -> &[usize; 3] {
        &self.facets[i]
    }

    pub fn triangle(&self, facet: usize) -> Triangle<T> {
        let f = &self.facets[facet];
        Triangle::new(&self.vertices[f[0]], &self.vertices[f[1]], &self.vertices[f[2]])
    }
}

/// A facet lifted to its triangle, tagged with the original facet id. This
/// is what the spatial index stores; `id` deliberately reports the original
/// id so nearest-tie resolution is independent of any subset permutation.
#[derive(Clone, Debug)]
pub struct FacetTriangle<T: Scalar> {
    pub triangle: Triangle<T>,
    pub facet: usize,
}

impl<T: Scalar> Primitive<T> for FacetTriangle<T>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    fn aabb(&self) -> Aabb<T, 3> {
        self.triangle.aabb()
    }

    fn closest_point(&self, query: &Point3<T>) -> Point3<T> {
        self.triangle.closest_point(query)
    }

    fn intersects_segment(&self, seg: &Segment3<T>) -> bool {
        self.triangle.intersects_segment(seg)
    }

    fn ray_hit(&self, origin: &Point3<T>, dir: &Vector3<T>) -> Option<T> {
        self.triangle.ray_hit(origin, dir)
    }

    fn id(&self) -> usize {
        self.facet
    }
}
