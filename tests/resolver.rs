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

use triside::error::ResolveError;
use triside::geometry::Point3;
use triside::mesh::TriangleSoup;
use triside::numeric::exact_rational::ExactRational;
use triside::numeric::scalar::Scalar;
use triside::resolve::{ClosestFacetResolver, FacetHit};

fn p3(x: f64, y: f64, z: f64) -> Point3<ExactRational> {
    Point3::from_vals([x, y, z])
}

fn single_triangle() -> TriangleSoup<ExactRational> {
    TriangleSoup::new(
        vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0)],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

/// Unit cube, all 12 facets wound outward.
fn cube_facets() -> Vec<[usize; 3]> {
    vec![
        [0, 2, 1],
        [0, 3, 2], // bottom, z = 0
        [4, 5, 6],
        [4, 6, 7], // top, z = 1
        [0, 1, 5],
        [0, 5, 4], // front, y = 0
        [2, 3, 7],
        [2, 7, 6], // back, y = 1
        [0, 4, 7],
        [0, 7, 3], // left, x = 0
        [1, 2, 6],
        [1, 6, 5], // right, x = 1
    ]
}

fn cube_vertices() -> Vec<Point3<ExactRational>> {
    vec![
        p3(0.0, 0.0, 0.0),
        p3(1.0, 0.0, 0.0),
        p3(1.0, 1.0, 0.0),
        p3(0.0, 1.0, 0.0),
        p3(0.0, 0.0, 1.0),
        p3(1.0, 0.0, 1.0),
        p3(1.0, 1.0, 1.0),
        p3(0.0, 1.0, 1.0),
    ]
}

fn cube() -> TriangleSoup<ExactRational> {
    TriangleSoup::new(cube_vertices(), cube_facets()).unwrap()
}

fn flipped(facets: &[[usize; 3]]) -> Vec<[usize; 3]> {
    facets.iter().map(|&[a, b, c]| [a, c, b]).collect()
}

/// Queries just outside each cube corner, along the corner diagonal; the
/// nearest point of every one is exactly the corner vertex.
fn corner_queries() -> Vec<(usize, Point3<ExactRational>)> {
    let vertices = cube_vertices();
    (0..8)
        .map(|v| {
            let c = &vertices[v];
            let q = Point3::from_vals([
                (&c[0] - &ExactRational::from_num_den(1, 2)) * ExactRational::from(3),
                (&c[1] - &ExactRational::from_num_den(1, 2)) * ExactRational::from(3),
                (&c[2] - &ExactRational::from_num_den(1, 2)) * ExactRational::from(3),
            ]);
            (v, q)
        })
        .collect()
}

#[test]
fn single_triangle_above_and_below() {
    let resolver = ClosestFacetResolver::new(&single_triangle(), None).unwrap();

    let above = resolver.resolve(&p3(0.25, 0.25, 1.0)).unwrap();
    assert_eq!(
        above,
        FacetHit {
            facet: 0,
            positive_side: true
        }
    );

    let below = resolver.resolve(&p3(0.25, 0.25, -1.0)).unwrap();
    assert_eq!(
        below,
        FacetHit {
            facet: 0,
            positive_side: false
        }
    );
}

#[test]
fn boundary_edge_orients_by_plane_side_alone() {
    let resolver = ClosestFacetResolver::new(&single_triangle(), None).unwrap();

    // Nearest point is the interior of the boundary edge (v0, v1); only one
    // facet is incident, so the answer comes from the plane test.
    let hit = resolver.resolve(&p3(0.5, -1.0, 1.0)).unwrap();
    assert_eq!(
        hit,
        FacetHit {
            facet: 0,
            positive_side: true
        }
    );

    let hit = resolver.resolve(&p3(0.5, -1.0, -2.0)).unwrap();
    assert_eq!(
        hit,
        FacetHit {
            facet: 0,
            positive_side: false
        }
    );
}

#[test]
fn query_in_the_facet_plane_is_self_intersection() {
    let resolver = ClosestFacetResolver::new(&single_triangle(), None).unwrap();

    // Projects onto the boundary edge while sitting in the supporting
    // plane: no strict side exists.
    let err = resolver.resolve(&p3(0.5, -1.0, 0.0)).unwrap_err();
    assert_eq!(err, ResolveError::SelfIntersection { facet: 0 });
}

#[test]
fn shared_edge_resolves_through_the_angular_order() {
    // A ridge: two facets meeting at the edge x in [0,1], sloping away on
    // either side of the y = 0 plane.
    let soup = TriangleSoup::new(
        vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(0.0, -1.0, -1.0),
            p3(0.0, 1.0, -1.0),
        ],
        vec![[0, 1, 2], [1, 0, 3]],
    )
    .unwrap();
    let resolver = ClosestFacetResolver::new(&soup, None).unwrap();

    // Directly above the ridge: nearest point is on the shared edge, both
    // facets are candidates, and the tie goes to the smaller original id.
    let hit = resolver.resolve(&p3(0.5, 0.0, 1.0)).unwrap();
    assert_eq!(
        hit,
        FacetHit {
            facet: 0,
            positive_side: false
        }
    );
}

#[test]
fn cube_corners_resolve_outside() {
    let facets = cube_facets();
    let resolver = ClosestFacetResolver::new(&cube(), None).unwrap();

    for (corner, query) in corner_queries() {
        let hit = resolver.resolve(&query).unwrap();
        assert!(
            facets[hit.facet].contains(&corner),
            "corner {corner} resolved to non-incident facet {}",
            hit.facet
        );
        assert!(
            hit.positive_side,
            "query outside corner {corner} must land on the positive side"
        );
    }
}

#[test]
fn flipping_windings_flips_every_orientation() {
    let outward = ClosestFacetResolver::new(&cube(), None).unwrap();
    let inward_soup = TriangleSoup::new(cube_vertices(), flipped(&cube_facets())).unwrap();
    let inward = ClosestFacetResolver::new(&inward_soup, None).unwrap();

    let queries: Vec<Point3<ExactRational>> = corner_queries()
        .into_iter()
        .map(|(_, q)| q)
        .chain([
            p3(0.5, 0.5, 2.0),
            p3(0.5, 0.5, -2.0),
            p3(2.0, 0.5, 0.5),
            p3(0.5, -0.25, 0.5),
        ])
        .collect();

    for q in &queries {
        let a = outward.resolve(q).unwrap();
        let b = inward.resolve(q).unwrap();
        assert_eq!(a.facet, b.facet);
        assert_eq!(a.positive_side, !b.positive_side);
    }
}

#[test]
fn subset_permutation_returns_identical_results() {
    let soup = cube();
    let identity: Vec<usize> = (0..12).collect();
    let shuffled: Vec<usize> = vec![5, 2, 9, 0, 11, 7, 4, 1, 10, 3, 8, 6];
    let reversed: Vec<usize> = (0..12).rev().collect();

    let baseline = ClosestFacetResolver::new(&soup, Some(&identity)).unwrap();

    let queries: Vec<Point3<ExactRational>> = corner_queries()
        .into_iter()
        .map(|(_, q)| q)
        .chain([
            p3(0.5, 0.5, 2.0),
            p3(-1.0, 0.5, 0.5),
            p3(0.5, 0.5, 0.75), // inside the cube
            p3(2.0, 2.0, 0.5),  // nearest point on a vertical edge
        ])
        .collect();

    let expected: Vec<FacetHit> = queries.iter().map(|q| baseline.resolve(q).unwrap()).collect();

    for subset in [&shuffled, &reversed] {
        let resolver = ClosestFacetResolver::new(&soup, Some(subset.as_slice())).unwrap();
        for (q, want) in queries.iter().zip(&expected) {
            assert_eq!(resolver.resolve(q).unwrap(), *want);
        }
    }
}

#[test]
fn batch_matches_sequential_resolution() {
    let resolver = ClosestFacetResolver::new(&cube(), None).unwrap();

    let queries: Vec<Point3<ExactRational>> = corner_queries()
        .into_iter()
        .map(|(_, q)| q)
        .chain([
            p3(0.5, 0.5, 2.0),
            p3(0.5, 0.5, -2.0),
            p3(-1.0, -1.0, 0.5),
            p3(0.25, 0.25, 0.25),
            p3(3.0, 0.5, 0.5),
        ])
        .collect();

    let sequential: Vec<FacetHit> = queries.iter().map(|q| resolver.resolve(q).unwrap()).collect();
    let batch = resolver.resolve_batch(&queries).unwrap();
    assert_eq!(batch, sequential);
}

#[test]
fn empty_mesh_is_invalid_input() {
    let soup = TriangleSoup::<ExactRational>::new(vec![], vec![]).unwrap();
    let err = ClosestFacetResolver::new(&soup, None).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidInput(_)));
}

#[test]
fn empty_subset_is_invalid_input() {
    let err = ClosestFacetResolver::new(&cube(), Some(&[])).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidInput(_)));
}

#[test]
fn out_of_range_subset_entry_is_invalid_input() {
    let err = ClosestFacetResolver::new(&cube(), Some(&[0, 12])).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidInput(_)));
}

#[test]
fn degenerate_facet_fails_construction() {
    let soup = TriangleSoup::new(
        vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(0.0, 1.0, 0.0),
            p3(2.0, 0.0, 0.0), // collinear with vertices 0 and 1
        ],
        vec![[0, 1, 2], [0, 1, 3]],
    )
    .unwrap();

    let err = ClosestFacetResolver::new(&soup, None).unwrap_err();
    assert_eq!(
        err,
        ResolveError::DegenerateGeometry {
            facet: Some(1),
            detail: "selected facet has zero area"
        }
    );

    // Excluding the degenerate facet from the subset makes it usable.
    let resolver = ClosestFacetResolver::new(&soup, Some(&[0])).unwrap();
    assert!(resolver.resolve(&p3(0.25, 0.25, 1.0)).unwrap().positive_side);
}

#[test]
fn soup_rejects_bad_indices() {
    let err =
        TriangleSoup::<ExactRational>::new(vec![p3(0.0, 0.0, 0.0)], vec![[0, 0, 1]]).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidInput(_)));

    let err = TriangleSoup::<ExactRational>::new(
        vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0)],
        vec![[0, 1, 2]],
    )
    .unwrap_err();
    assert!(matches!(err, ResolveError::InvalidInput(_)));
}

#[test]
fn face_interior_match_keeps_the_owner_facet() {
    let resolver = ClosestFacetResolver::new(&cube(), None).unwrap();

    // Above the top face, off the diagonal: nearest point is interior to
    // the facet [4, 6, 7].
    let hit = resolver.resolve(&p3(0.25, 0.5, 3.0)).unwrap();
    assert!([2usize, 3].contains(&hit.facet));
    assert!(hit.positive_side);

    // Just under the same spot, inside the cube: negative side of the
    // outward facet.
    let hit = resolver.resolve(&p3(0.375, 0.5, 0.75)).unwrap();
    assert!([2usize, 3].contains(&hit.facet));
    assert!(!hit.positive_side);
}

#[test]
fn vertical_edge_of_cube_resolves_outside() {
    let resolver = ClosestFacetResolver::new(&cube(), None).unwrap();

    // Nearest point is the middle of the vertical edge through (1, 1, z):
    // shared by the back and right faces only.
    let hit = resolver.resolve(&p3(2.0, 2.0, 0.5)).unwrap();
    let facets = cube_facets();
    assert!(facets[hit.facet].contains(&2) && facets[hit.facet].contains(&6));
    assert!(hit.positive_side);
}
