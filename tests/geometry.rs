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

use triside::geometry::aabb_tree::{AabbTree, Primitive};
use triside::geometry::triangle::Triangle;
use triside::geometry::{Point3, Segment3, Vector3};
use triside::mesh::FacetTriangle;
use triside::numeric::approx_f64::ApproxF64;
use triside::numeric::exact_rational::ExactRational;
use triside::operations::Zero;

fn p3(x: f64, y: f64, z: f64) -> Point3<ExactRational> {
    Point3::from_vals([x, y, z])
}

fn pf(x: f64, y: f64, z: f64) -> Point3<ApproxF64> {
    Point3::from_vals([x, y, z])
}

fn unit_tri() -> Triangle<ExactRational> {
    Triangle::new(&p3(0.0, 0.0, 0.0), &p3(1.0, 0.0, 0.0), &p3(0.0, 1.0, 0.0))
}

#[test]
fn closest_point_interior() {
    let tri = unit_tri();
    let q = p3(0.25, 0.25, 1.0);
    assert_eq!(tri.closest_point(&q), p3(0.25, 0.25, 0.0));
}

#[test]
fn closest_point_vertex_region() {
    let tri = unit_tri();
    assert_eq!(tri.closest_point(&p3(-1.0, -1.0, 0.5)), p3(0.0, 0.0, 0.0));
    assert_eq!(tri.closest_point(&p3(2.0, -1.0, 0.0)), p3(1.0, 0.0, 0.0));
    assert_eq!(tri.closest_point(&p3(-1.0, 2.0, 0.0)), p3(0.0, 1.0, 0.0));
}

#[test]
fn closest_point_edge_regions() {
    let tri = unit_tri();
    // edge (a, b)
    assert_eq!(tri.closest_point(&p3(0.5, -1.0, 1.0)), p3(0.5, 0.0, 0.0));
    // edge (a, c)
    assert_eq!(tri.closest_point(&p3(-1.0, 0.5, 0.0)), p3(0.0, 0.5, 0.0));
    // edge (b, c)
    assert_eq!(tri.closest_point(&p3(2.0, 2.0, 0.0)), p3(0.5, 0.5, 0.0));
}

#[test]
fn closest_point_on_surface_is_identity() {
    let tri = unit_tri();
    let on = p3(0.25, 0.5, 0.0);
    assert_eq!(tri.closest_point(&on), on);
}

#[test]
fn segment_crosses_interior() {
    let tri = unit_tri();
    let seg = Segment3::new(&p3(0.25, 0.25, -1.0), &p3(0.25, 0.25, 1.0));
    assert!(tri.intersects_segment(&seg));
}

#[test]
fn segment_misses() {
    let tri = unit_tri();
    let seg = Segment3::new(&p3(2.0, 2.0, -1.0), &p3(2.0, 2.0, 1.0));
    assert!(!tri.intersects_segment(&seg));
    let above = Segment3::new(&p3(0.25, 0.25, 0.5), &p3(0.25, 0.25, 1.0));
    assert!(!tri.intersects_segment(&above));
}

#[test]
fn segment_endpoint_on_triangle_counts() {
    let tri = unit_tri();
    let seg = Segment3::new(&p3(0.25, 0.25, 0.0), &p3(0.0, 0.0, 1.0));
    assert!(tri.intersects_segment(&seg));
    // endpoint exactly on a vertex
    let seg = Segment3::new(&p3(0.0, 0.0, 0.0), &p3(-1.0, -1.0, 1.0));
    assert!(tri.intersects_segment(&seg));
    // degenerate segment sitting on an edge
    let seg = Segment3::new(&p3(0.5, 0.0, 0.0), &p3(0.5, 0.0, 0.0));
    assert!(tri.intersects_segment(&seg));
}

#[test]
fn segment_through_vertex_counts() {
    let tri = unit_tri();
    let seg = Segment3::new(&p3(0.0, 0.0, -1.0), &p3(0.0, 0.0, 1.0));
    assert!(tri.intersects_segment(&seg));
}

#[test]
fn coplanar_segment_overlap() {
    let tri = unit_tri();
    // crosses the triangle inside its plane
    let seg = Segment3::new(&p3(-1.0, 0.25, 0.0), &p3(1.0, 0.25, 0.0));
    assert!(tri.intersects_segment(&seg));
    // coplanar but fully outside
    let seg = Segment3::new(&p3(2.0, 2.0, 0.0), &p3(3.0, 2.0, 0.0));
    assert!(!tri.intersects_segment(&seg));
    // collinear with an edge, overlapping it
    let seg = Segment3::new(&p3(-1.0, 0.0, 0.0), &p3(0.5, 0.0, 0.0));
    assert!(tri.intersects_segment(&seg));
}

#[test]
fn degenerate_triangle_is_detected() {
    let tri = Triangle::new(&p3(0.0, 0.0, 0.0), &p3(1.0, 1.0, 1.0), &p3(2.0, 2.0, 2.0));
    assert!(tri.is_degenerate());
    assert!(!unit_tri().is_degenerate());
}

#[test]
fn ray_hits_report_parameters() {
    let low = FacetTriangle {
        triangle: Triangle::new(&pf(0.0, 0.0, 1.0), &pf(1.0, 0.0, 1.0), &pf(0.0, 1.0, 1.0)),
        facet: 0,
    };
    let high = FacetTriangle {
        triangle: Triangle::new(&pf(0.0, 0.0, 3.0), &pf(1.0, 0.0, 3.0), &pf(0.0, 1.0, 3.0)),
        facet: 1,
    };
    let tree = AabbTree::build(vec![low, high]);

    let origin = pf(0.25, 0.25, 0.0);
    let dir = Vector3::new([ApproxF64(0.0), ApproxF64(0.0), ApproxF64(1.0)]);
    let mut hits = Vec::new();
    tree.ray_hits(&origin, &dir, &mut hits);
    hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].1.id(), 0);
    assert_eq!(hits[0].0, ApproxF64(1.0));
    assert_eq!(hits[1].1.id(), 1);
    assert_eq!(hits[1].0, ApproxF64(3.0));

    // opposite direction sees nothing
    let down = Vector3::new([ApproxF64(0.0), ApproxF64(0.0), ApproxF64(-1.0)]);
    let mut misses = Vec::new();
    tree.ray_hits(&origin, &down, &mut misses);
    assert!(misses.is_empty());
}

#[test]
fn nearest_query_breaks_exact_ties_toward_smallest_id() {
    // Two facets sharing the edge x in [0,1], y = 0, z = 0; the query sits
    // symmetrically above the shared edge.
    let shared_a = p3(0.0, 0.0, 0.0);
    let shared_b = p3(1.0, 0.0, 0.0);
    let left = FacetTriangle {
        triangle: Triangle::new(&shared_a, &shared_b, &p3(0.0, -1.0, -1.0)),
        facet: 7,
    };
    let right = FacetTriangle {
        triangle: Triangle::new(&shared_a, &shared_b, &p3(0.0, 1.0, -1.0)),
        facet: 3,
    };

    let query = p3(0.5, 0.0, 1.0);
    for prims in [
        vec![left.clone(), right.clone()],
        vec![right.clone(), left.clone()],
    ] {
        let tree = AabbTree::build(prims);
        let (closest, owner) = tree.closest_point_and_primitive(&query);
        assert_eq!(closest, p3(0.5, 0.0, 0.0));
        assert_eq!(owner.id(), 3);
    }
}

#[test]
fn segment_query_gathers_touching_facets() {
    let left = FacetTriangle {
        triangle: Triangle::new(&p3(0.0, 0.0, 0.0), &p3(1.0, 0.0, 0.0), &p3(0.0, -1.0, -1.0)),
        facet: 0,
    };
    let right = FacetTriangle {
        triangle: Triangle::new(&p3(1.0, 0.0, 0.0), &p3(0.0, 0.0, 0.0), &p3(0.0, 1.0, -1.0)),
        facet: 1,
    };
    let tree = AabbTree::build(vec![left, right]);

    // starts on the shared edge, leaves upward: touches both facets
    let seg = Segment3::new(&p3(0.5, 0.0, 0.0), &p3(0.5, 0.0, 1.0));
    let mut out = Vec::new();
    tree.intersected_primitives(&seg, &mut out);
    let mut ids: Vec<usize> = out.iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1]);

    // away from the mesh entirely
    let seg = Segment3::new(&p3(5.0, 5.0, 5.0), &p3(6.0, 6.0, 6.0));
    let mut out = Vec::new();
    tree.intersected_primitives(&seg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn aabb_distance_is_zero_inside() {
    let tri = unit_tri();
    let aabb = tri.aabb();
    assert!(aabb.distance_squared_to_point(&p3(0.1, 0.1, 0.0)).is_zero());
    assert_eq!(
        aabb.distance_squared_to_point(&p3(0.0, 0.0, 2.0)),
        ExactRational::from(4)
    );
}
