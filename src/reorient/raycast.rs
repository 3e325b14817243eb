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

use log::debug;
use num_traits::ToPrimitive;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    error::ResolveError,
    geometry::{aabb_tree::AabbTree, point::Point3, triangle::Triangle, vector::Vector3},
    mesh::soup::{FacetTriangle, TriangleSoup},
    numeric::scalar::Scalar,
    operations::Zero,
    reorient::patches::extract_patches,
};

#[derive(Clone, Debug)]
pub struct ReorientParams {
    /// Ray budget shared by all patches, split proportionally to area.
    pub rays_total: usize,
    /// Floor per patch, so tiny patches still get a meaningful vote.
    pub rays_minimum: usize,
    /// Vote on hit-count parity instead of first-hit distance / escape
    /// counts. Parity is the better signal for closed meshes.
    pub use_parity: bool,
}

impl Default for ReorientParams {
    fn default() -> Self {
        Self {
            rays_total: 100,
            rays_minimum: 10,
            use_parity: false,
        }
    }
}

struct Ray<T: Scalar> {
    facet: usize,
    patch: usize,
    origin: Point3<T>,
    dir: Vector3<T>,
}

#[derive(Clone)]
struct Vote<T> {
    dist_front: T,
    dist_back: T,
    inf_front: u32,
    inf_back: u32,
    par_front: u32,
    par_back: u32,
}

impl<T: Scalar> Vote<T> {
    fn new() -> Self {
        Self {
            dist_front: T::zero(),
            dist_back: T::zero(),
            inf_front: 0,
            inf_back: 0,
            par_front: 0,
            par_back: 0,
        }
    }
}

/// Globally reorient the soup so every patch faces outward, by Monte-Carlo
/// ray voting against the patch-consistent winding. Returns the reoriented
/// facet table and, per facet, whether it ended up flipped relative to the
/// input. Identical seeds give identical output.
pub fn reorient_facets_raycast<T: Scalar>(
    soup: &TriangleSoup<T>,
    params: &ReorientParams,
    seed: u64,
) -> Result<(Vec<[usize; 3]>, Vec<bool>), ResolveError>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let m = soup.facets().len();
    if m == 0 {
        return Err(ResolveError::InvalidInput(
            "cannot reorient an empty mesh".into(),
        ));
    }

    let patches = extract_patches(soup.facets());
    debug!("extracted {} patches", patches.count);

    let mut prims = Vec::with_capacity(m);
    let mut areas = Vec::with_capacity(m);
    for (fid, f) in patches.oriented.iter().enumerate() {
        let triangle = Triangle::new(
            &soup.vertices()[f[0]],
            &soup.vertices()[f[1]],
            &soup.vertices()[f[2]],
        );
        if triangle.is_degenerate() {
            return Err(ResolveError::DegenerateGeometry {
                facet: Some(fid),
                detail: "zero-area facet",
            });
        }
        let n = triangle.normal();
        // The sampling weights may be approximate; only the hit predicates
        // below stay in T.
        areas.push(n.dot(&n).to_f64().unwrap_or(0.0).sqrt() * 0.5);
        prims.push(FacetTriangle { triangle, facet: fid });
    }

    let mut patch_area = vec![0.0f64; patches.count];
    for f in 0..m {
        patch_area[patches.labels[f]] += areas[f];
    }
    let total_area: f64 = patch_area.iter().sum();

    // Rays are generated sequentially from the caller's seed; only the
    // shooting below is parallel.
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rays: Vec<Ray<T>> = Vec::new();
    for c in 0..patches.count {
        let budget =
            (((params.rays_total as f64) * patch_area[c] / total_area) as usize).max(params.rays_minimum);
        let members: Vec<usize> = (0..m).filter(|&f| patches.labels[f] == c).collect();
        let mut cumulative = Vec::with_capacity(members.len());
        let mut acc = 0.0f64;
        for &f in &members {
            acc += areas[f];
            cumulative.push(acc);
        }
        for _ in 0..budget {
            let r = rng.random::<f64>() * acc;
            let pick = cumulative
                .partition_point(|&x| x < r)
                .min(members.len() - 1);
            let f = members[pick];
            if let Some(ray) = sample_ray(&prims[f].triangle, f, c, &mut rng) {
                rays.push(ray);
            }
        }
    }
    debug!("shooting {} rays over {} patches", rays.len(), patches.count);

    let tree = AabbTree::build(prims);
    let use_parity = params.use_parity;

    let votes: Vec<Vote<T>> = rays
        .par_iter()
        .fold(
            || vec![Vote::new(); patches.count],
            |mut acc, ray| {
                record_vote(&tree, ray, use_parity, &mut acc[ray.patch]);
                acc
            },
        )
        .reduce(|| vec![Vote::new(); patches.count], merge_votes);

    let flip_patch: Vec<bool> = (0..patches.count)
        .map(|c| {
            let v = &votes[c];
            if use_parity {
                v.par_front > v.par_back
            } else {
                // Fewer escapes on the front side means the front faces the
                // inside; equal escapes fall back to first-hit distances.
                (v.inf_front == v.inf_back && (&v.dist_front - &v.dist_back).is_negative())
                    || v.inf_front < v.inf_back
            }
        })
        .collect();

    let mut facets_out = patches.oriented.clone();
    let mut flipped_out = Vec::with_capacity(m);
    for f in 0..m {
        let flip = flip_patch[patches.labels[f]];
        if flip {
            let [a, b, c] = facets_out[f];
            facets_out[f] = [a, c, b];
        }
        flipped_out.push(patches.flipped[f] ^ flip);
    }
    Ok((facets_out, flipped_out))
}

/// One ray from a uniform point on the facet, in a hemisphere direction
/// around the facet normal that is not too grazing.
fn sample_ray<T: Scalar>(
    triangle: &Triangle<T>,
    facet: usize,
    patch: usize,
    rng: &mut StdRng,
) -> Option<Ray<T>>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    // Uniform barycentric sample (Turk, Graphics Gems I).
    let s = rng.random::<f64>();
    let t = rng.random::<f64>();
    let sqrt_t = t.sqrt();
    let wa = T::from(1.0 - sqrt_t);
    let wb = T::from((1.0 - s) * sqrt_t);
    let wc = T::from(s * sqrt_t);
    let origin = triangle
        .a
        .as_vector()
        .scale(&wa)
        .add(&triangle.b.as_vector().scale(&wb))
        .add(&triangle.c.as_vector().scale(&wc));
    let origin = Point3::new(origin.coords);

    let n = triangle.normal();
    let nf = [
        n[0].to_f64().unwrap_or(0.0),
        n[1].to_f64().unwrap_or(0.0),
        n[2].to_f64().unwrap_or(0.0),
    ];
    let n_len = (nf[0] * nf[0] + nf[1] * nf[1] + nf[2] * nf[2]).sqrt();
    if !(n_len > 0.0) {
        return None;
    }

    for _ in 0..64 {
        let d = [
            rng.random::<f64>() * 2.0 - 1.0,
            rng.random::<f64>() * 2.0 - 1.0,
            rng.random::<f64>() * 2.0 - 1.0,
        ];
        let len_sq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
        if len_sq > 1.0 || len_sq < 1e-12 {
            continue;
        }
        let len = len_sq.sqrt();
        let mut unit = [d[0] / len, d[1] / len, d[2] / len];
        let cosine = (unit[0] * nf[0] + unit[1] * nf[1] + unit[2] * nf[2]) / n_len;
        if cosine.abs() < 0.1 {
            continue;
        }
        if cosine < 0.0 {
            unit = [-unit[0], -unit[1], -unit[2]];
        }
        return Some(Ray {
            facet,
            patch,
            origin,
            dir: Vector3::new([T::from(unit[0]), T::from(unit[1]), T::from(unit[2])]),
        });
    }
    None
}

fn record_vote<T: Scalar>(
    tree: &AabbTree<T, FacetTriangle<T>>,
    ray: &Ray<T>,
    use_parity: bool,
    vote: &mut Vote<T>,
) where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let back_dir = ray.dir.scale(&T::from(-1));
    let (front_first, front_count) = first_hit_and_count(tree, &ray.origin, &ray.dir, ray.facet);
    let (back_first, back_count) = first_hit_and_count(tree, &ray.origin, &back_dir, ray.facet);

    if use_parity {
        vote.par_front += (front_count % 2) as u32;
        vote.par_back += (back_count % 2) as u32;
    } else {
        match front_first {
            None => vote.inf_front += 1,
            Some(t) => vote.dist_front += &t,
        }
        match back_first {
            None => vote.inf_back += 1,
            Some(t) => vote.dist_back += &t,
        }
    }
}

fn first_hit_and_count<T: Scalar>(
    tree: &AabbTree<T, FacetTriangle<T>>,
    origin: &Point3<T>,
    dir: &Vector3<T>,
    skip: usize,
) -> (Option<T>, usize)
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let mut hits = Vec::new();
    tree.ray_hits(origin, dir, &mut hits);
    let mut nearest: Option<T> = None;
    let mut count = 0usize;
    for (t, prim) in hits {
        if prim.facet == skip {
            continue;
        }
        count += 1;
        nearest = Some(match nearest {
            None => t,
            Some(best) => {
                if (&t - &best).is_negative() {
                    t
                } else {
                    best
                }
            }
        });
    }
    (nearest, count)
}

fn merge_votes<T: Scalar>(a: Vec<Vote<T>>, b: Vec<Vote<T>>) -> Vec<Vote<T>>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    a.into_iter()
        .zip(b)
        .map(|(mut x, y)| {
            x.dist_front += &y.dist_front;
            x.dist_back += &y.dist_back;
            x.inf_front += y.inf_front;
            x.inf_back += y.inf_back;
            x.par_front += y.par_front;
            x.par_back += y.par_back;
            x
        })
        .collect()
}
