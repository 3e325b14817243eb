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
    cmp::Ordering,
    ops::{Add, Div, Mul, Sub},
};

use crate::{
    error::ResolveError,
    geometry::{point::Point3, vector::Vector3},
    mesh::winding::{opposite_vertex, SignedFacetRef},
    numeric::scalar::Scalar,
    operations::Zero,
};

/// Circular order of the facets incident to the edge `(s, d)`, anchored at
/// the pivot's half-plane around the edge axis.
///
/// Returns a permutation of positions into `refs`. The first and the last
/// entry are the two facets angularly adjacent to the pivot; for the first
/// entry the pivot lies on the facet's positive side exactly when the
/// facet's stored winding traverses `s -> d`, and for the last entry when
/// it traverses `d -> s`. The edge handler in the resolver relies on that
/// sign convention.
///
/// Two facets at the same angle are coplanar along the edge, which only a
/// self-intersecting input can produce; a pivot on the edge line carries no
/// angular information. Both are fatal.
pub fn order_facets_around_edge<T: Scalar>(
    vertices: &[Point3<T>],
    facets: &[[usize; 3]],
    s: usize,
    d: usize,
    refs: &[SignedFacetRef],
    pivot: &Point3<T>,
) -> Result<Vec<usize>, ResolveError>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let origin = &vertices[s];
    let edge = origin.vector_to(&vertices[d]);
    let edge_sq = edge.dot(&edge);

    let u = perp_component(origin, &edge, &edge_sq, pivot);
    if u.is_zero() {
        return Err(ResolveError::DegenerateGeometry {
            facet: None,
            detail: "ordering pivot lies on the edge line",
        });
    }
    let v = u.cross(&edge);

    // Each facet becomes a 2D direction in the (u, v) frame; any linear
    // frame with the pivot at angle zero preserves the circular order.
    let mut keyed: Vec<AngularKey<T>> = Vec::with_capacity(refs.len());
    for (position, fref) in refs.iter().enumerate() {
        let opp = opposite_vertex(&facets[fref.facet], s, d).ok_or(
            ResolveError::InconsistentConnectivity {
                facet: fref.facet,
                edge: (s, d),
            },
        )?;
        let w = perp_component(origin, &edge, &edge_sq, &vertices[opp]);
        if w.is_zero() {
            return Err(ResolveError::DegenerateGeometry {
                facet: Some(fref.facet),
                detail: "facet collapses onto the edge line",
            });
        }
        let a1 = w.dot(&u);
        let a2 = w.dot(&v);
        let sector = if a2.is_zero() {
            if a1.is_positive() { 0 } else { 2 }
        } else if a2.is_positive() {
            1
        } else {
            3
        };
        keyed.push(AngularKey {
            position,
            sector,
            a1,
            a2,
        });
    }

    keyed.sort_by(angle_cmp);

    for pair in keyed.windows(2) {
        if angle_cmp(&pair[0], &pair[1]) == Ordering::Equal {
            return Err(ResolveError::SelfIntersection {
                facet: refs[pair[1].position].facet,
            });
        }
    }

    Ok(keyed.into_iter().map(|k| k.position).collect())
}

struct AngularKey<T> {
    position: usize,
    sector: u8,
    a1: T,
    a2: T,
}

fn angle_cmp<T: Scalar>(x: &AngularKey<T>, y: &AngularKey<T>) -> Ordering
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    match x.sector.cmp(&y.sector) {
        Ordering::Equal => {}
        other => return other,
    }
    // Within the half-plane sectors the 2D cross product orders angles;
    // in the aligned/anti-aligned sectors every direction is the same.
    if x.sector == 0 || x.sector == 2 {
        return Ordering::Equal;
    }
    let cross = &(&x.a1 * &y.a2) - &(&x.a2 * &y.a1);
    if cross.is_positive() {
        Ordering::Less
    } else if cross.is_negative() {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Component of `pt - origin` perpendicular to `edge`, scaled by |edge|^2
/// to stay division-free.
fn perp_component<T: Scalar>(
    origin: &Point3<T>,
    edge: &Vector3<T>,
    edge_sq: &T,
    pt: &Point3<T>,
) -> Vector3<T>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let v = origin.vector_to(pt);
    let along = v.dot(edge);
    v.scale(edge_sq).sub(&edge.scale(&along))
}
