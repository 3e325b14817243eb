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
    collections::BTreeSet,
    ops::{Add, Div, Mul, Sub},
};

use log::debug;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::{
    error::ResolveError,
    geometry::{
        aabb_tree::AabbTree,
        plane::Plane,
        point::Point3,
        segment::Segment,
        triangle::Triangle,
    },
    kernel::{are_collinear, orient3d},
    mesh::{
        soup::{FacetTriangle, TriangleSoup},
        winding::{edge_winding, SignedFacetRef},
    },
    numeric::scalar::Scalar,
    operations::Zero,
};

/// One resolved query: the facet (in original mesh numbering) the query
/// point belongs to, and whether the query lies on the positive side of
/// that facet's supporting plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacetHit {
    pub facet: usize,
    pub positive_side: bool,
}

enum NearestElement {
    Vertex(usize),
    /// Index of the vertex opposite the matched edge.
    Edge(usize),
    Face,
}

/// Answers "closest facet with consistent orientation" queries against a
/// fixed facet subset of a triangle soup. Immutable once built; `resolve`
/// takes `&self` and may run from many threads at once.
#[derive(Debug)]
pub struct ClosestFacetResolver<T: Scalar> {
    vertices: Vec<Point3<T>>,
    facets: Vec<[usize; 3]>,
    tree: AabbTree<T, FacetTriangle<T>>,
}

impl<T: Scalar> ClosestFacetResolver<T>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    /// Build the spatial index over the selected facets. `None` selects all
    /// facets. Fails before any query can run: empty selection is
    /// `InvalidInput`, a zero-area selected facet is `DegenerateGeometry`.
    pub fn new(soup: &TriangleSoup<T>, subset: Option<&[usize]>) -> Result<Self, ResolveError> {
        if soup.facets().is_empty() {
            return Err(ResolveError::InvalidInput(
                "closest facet cannot be computed on an empty mesh".into(),
            ));
        }
        let selected: Vec<usize> = match subset {
            Some(ids) => ids.to_vec(),
            None => (0..soup.facets().len()).collect(),
        };
        if selected.is_empty() {
            return Err(ResolveError::InvalidInput(
                "closest facet cannot be computed on an empty facet subset".into(),
            ));
        }

        let mut prims = Vec::with_capacity(selected.len());
        for &fid in &selected {
            if fid >= soup.facets().len() {
                return Err(ResolveError::InvalidInput(format!(
                    "facet subset entry {fid} out of range"
                )));
            }
            let triangle = soup.triangle(fid);
            if triangle.is_degenerate() {
                return Err(ResolveError::DegenerateGeometry {
                    facet: Some(fid),
                    detail: "selected facet has zero area",
                });
            }
            prims.push(FacetTriangle { triangle, facet: fid });
        }

        debug!("building facet index over {} triangles", prims.len());
        let tree = AabbTree::build(prims);

        Ok(Self {
            vertices: soup.vertices().to_vec(),
            facets: soup.facets().to_vec(),
            tree,
        })
    }

    /// Resolve one query point.
    pub fn resolve(&self, query: &Point3<T>) -> Result<FacetHit, ResolveError> {
        let (closest, owner) = self.tree.closest_point_and_primitive(query);
        let fid = owner.facet;

        match classify(&owner.triangle, &closest) {
            NearestElement::Face => self.face_case(query, fid),
            NearestElement::Vertex(k) => {
                let s = self.facets[fid][k];
                self.vertex_case(query, s, fid)
            }
            NearestElement::Edge(k) => {
                let f = &self.facets[fid];
                let s = f[(k + 1) % 3];
                let d = f[(k + 2) % 3];
                self.edge_case(query, s, d, fid)
            }
        }
    }

    /// Resolve a whole query set in input order. The first failure aborts
    /// the batch; single- and multi-threaded runs return identical output.
    pub fn resolve_batch(&self, queries: &[Point3<T>]) -> Result<Vec<FacetHit>, ResolveError> {
        debug!("resolving {} query points", queries.len());
        queries.par_iter().map(|q| self.resolve(q)).collect()
    }

    /// An interior match still goes through the edge machinery, anchored on
    /// the facet's first edge: the positive-side answer must come from the
    /// same angular-adjacency convention in every case.
    fn face_case(&self, query: &Point3<T>, fid: usize) -> Result<FacetHit, ResolveError> {
        let f = &self.facets[fid];
        self.edge_case(query, f[0], f[1], fid)
    }

    fn edge_case(
        &self,
        query: &Point3<T>,
        s: usize,
        d: usize,
        preferred: usize,
    ) -> Result<FacetHit, ResolveError> {
        let mid = self.vertices[s].midpoint(&self.vertices[d]);
        let seg = Segment::new(&mid, query);

        let mut touched: Vec<&FacetTriangle<T>> = Vec::new();
        self.tree.intersected_primitives(&seg, &mut touched);

        let mut refs: SmallVec<[SignedFacetRef; 8]> = SmallVec::new();
        for prim in &touched {
            let reversed = edge_winding(&self.facets[prim.facet], s, d).ok_or(
                ResolveError::InconsistentConnectivity {
                    facet: prim.facet,
                    edge: (s, d),
                },
            )?;
            refs.push(SignedFacetRef {
                facet: prim.facet,
                reversed,
            });
        }

        if refs.is_empty() {
            // The probe segment starts on the edge, so missing everything
            // means the claimed edge is not where the index thinks it is.
            return Err(ResolveError::InconsistentConnectivity {
                facet: preferred,
                edge: (s, d),
            });
        }

        if refs.len() == 1 {
            // Boundary edge: the side of the single incident facet decides.
            let facet = refs[0].facet;
            let positive_side = self.positive_side(facet, query)?;
            return Ok(FacetHit {
                facet,
                positive_side,
            });
        }

        let order = super::order_edge_fan::order_facets_around_edge(
            &self.vertices,
            &self.facets,
            s,
            d,
            &refs,
            query,
        )?;

        // First and last flank the query; they are equivalent choices up to
        // the sign convention, so prefer the caller's facet when it is one
        // of them.
        let first = refs[order[0]];
        let last = refs[*order.last().unwrap()];
        if first.facet == preferred {
            Ok(FacetHit {
                facet: first.facet,
                positive_side: !first.reversed,
            })
        } else if last.facet == preferred {
            Ok(FacetHit {
                facet: last.facet,
                positive_side: last.reversed,
            })
        } else {
            Ok(FacetHit {
                facet: first.facet,
                positive_side: !first.reversed,
            })
        }
    }

    /// Reduce a shared-vertex match to an edge case by picking an extremal
    /// edge of the fan around `s`: a plane through `s` and two adjacent
    /// vertices with every other adjacent vertex on one side and the query
    /// alone on the other.
    fn vertex_case(
        &self,
        query: &Point3<T>,
        s: usize,
        preferred: usize,
    ) -> Result<FacetHit, ResolveError> {
        let apex = self.vertices[s].clone();
        let seg = Segment::new(&apex, query);

        let mut touched: Vec<&FacetTriangle<T>> = Vec::new();
        self.tree.intersected_primitives(&seg, &mut touched);

        let mut adjacent: BTreeSet<usize> = BTreeSet::new();
        for prim in &touched {
            for &v in &self.facets[prim.facet] {
                if v != s {
                    adjacent.insert(v);
                }
            }
        }
        let adjacent: Vec<usize> = adjacent.into_iter().collect();

        for i in 0..adjacent.len() {
            for j in (i + 1)..adjacent.len() {
                let separator = Plane::from_points(
                    &apex,
                    &self.vertices[adjacent[i]],
                    &self.vertices[adjacent[j]],
                );
                if separator.is_degenerate() {
                    return Err(ResolveError::DegenerateGeometry {
                        facet: None,
                        detail: "degenerate separating plane in vertex fan",
                    });
                }
                if self.is_exterior_plane(&separator, &adjacent, query) {
                    if are_collinear(query, &self.vertices[adjacent[i]], &apex) {
                        return Err(ResolveError::UnresolvedVertexCase { vertex: s });
                    }
                    return self.edge_case(query, s, adjacent[i], preferred);
                }
            }
        }

        Err(ResolveError::UnresolvedVertexCase { vertex: s })
    }

    /// All adjacent points on or to one side of the plane, and the query
    /// strictly on the empty side.
    fn is_exterior_plane(&self, separator: &Plane<T>, adjacent: &[usize], query: &Point3<T>) -> bool {
        let mut any_positive = false;
        let mut any_negative = false;
        for &v in adjacent {
            let side = separator.oriented_side(&self.vertices[v]);
            if side.is_positive() {
                any_positive = true;
            } else if side.is_negative() {
                any_negative = true;
            }
        }
        let q = separator.oriented_side(query);
        (!any_positive && q.is_positive()) || (!any_negative && q.is_negative())
    }

    fn positive_side(&self, facet: usize, query: &Point3<T>) -> Result<bool, ResolveError> {
        let f = &self.facets[facet];
        let side = orient3d(
            &self.vertices[f[0]],
            &self.vertices[f[1]],
            &self.vertices[f[2]],
            query,
        );
        if side.is_positive() {
            Ok(true)
        } else if side.is_negative() {
            Ok(false)
        } else {
            Err(ResolveError::SelfIntersection { facet })
        }
    }
}

/// Where on its triangle the nearest point landed, tested with exact
/// predicates in this priority: vertices, then edges, then the interior.
fn classify<T: Scalar>(triangle: &Triangle<T>, p: &Point3<T>) -> NearestElement
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    if p == &triangle.a {
        return NearestElement::Vertex(0);
    }
    if p == &triangle.b {
        return NearestElement::Vertex(1);
    }
    if p == &triangle.c {
        return NearestElement::Vertex(2);
    }
    if are_collinear(&triangle.a, &triangle.b, p) {
        return NearestElement::Edge(2);
    }
    if are_collinear(&triangle.b, &triangle.c, p) {
        return NearestElement::Edge(0);
    }
    if are_collinear(&triangle.c, &triangle.a, p) {
        return NearestElement::Edge(1);
    }
    NearestElement::Face
}
