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
    geometry::{aabb::Aabb, point::Point3, segment::Segment3, vector::Vector3},
    numeric::scalar::Scalar,
    operations::Zero,
};

/// What the tree needs from the things it indexes. `id` must be a stable
/// key; equal-distance candidates in the nearest query resolve toward the
/// smallest id so results do not depend on build order.
pub trait Primitive<T: Scalar>: Send + Sync {
    fn aabb(&self) -> Aabb<T, 3>;
    fn closest_point(&self, query: &Point3<T>) -> Point3<T>;
    fn intersects_segment(&self, seg: &Segment3<T>) -> bool;
    fn ray_hit(&self, origin: &Point3<T>, dir: &Vector3<T>) -> Option<T>;
    fn id(&self) -> usize;
}

/// A static AABB-tree built once over a fixed primitive set. All queries
/// take `&self`; nothing is mutated after `build`.
#[derive(Debug)]
pub enum AabbTree<T: Scalar, P> {
    Leaf {
        aabb: Aabb<T, 3>,
        prim: P,
    },
    Node {
        aabb: Aabb<T, 3>,
        left: Box<AabbTree<T, P>>,
        right: Box<AabbTree<T, P>>,
    },
}

impl<T: Scalar, P: Primitive<T>> AabbTree<T, P>
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    /// Build by recursive median split along the widest centroid axis.
    pub fn build(prims: Vec<P>) -> Self {
        if prims.is_empty() {
            panic!("Cannot build tree from empty items");
        }
        let items: Vec<(Aabb<T, 3>, P)> = prims.into_iter().map(|p| (p.aabb(), p)).collect();
        Self::build_recursive(items)
    }

    fn build_recursive(mut items: Vec<(Aabb<T, 3>, P)>) -> Self {
        if items.len() == 1 {
            let (aabb, prim) = items.pop().unwrap();
            return AabbTree::Leaf { aabb, prim };
        }

        let axis = widest_center_axis(&items);
        items.sort_by(|x, y| {
            let cx = x.0.center(axis);
            let cy = y.0.center(axis);
            let diff = &cx - &cy;
            if diff.is_negative() {
                Ordering::Less
            } else if diff.is_positive() {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });

        let mid = items.len() / 2;
        let right_items = items.split_off(mid);

        let left = Box::new(Self::build_recursive(items));
        let right = Box::new(Self::build_recursive(right_items));
        let aabb = left.aabb().union(right.aabb());

        AabbTree::Node { aabb, left, right }
    }

    fn aabb(&self) -> &Aabb<T, 3> {
        match self {
            AabbTree::Leaf { aabb, .. } => aabb,
            AabbTree::Node { aabb, .. } => aabb,
        }
    }

    /// Nearest point on any primitive, with the primitive that owns it.
    pub fn closest_point_and_primitive(&self, query: &Point3<T>) -> (Point3<T>, &P) {
        let mut best: Option<(T, Point3<T>, &P)> = None;
        self.closest_recursive(query, &mut best);
        let (_, point, prim) = best.expect("tree is never empty");
        (point, prim)
    }

    fn closest_recursive<'a>(
        &'a self,
        query: &Point3<T>,
        best: &mut Option<(T, Point3<T>, &'a P)>,
    ) {
        match self {
            AabbTree::Leaf { prim, .. } => {
                let candidate = prim.closest_point(query);
                let d2 = query.distance_squared_to(&candidate);
                let replace = match best.as_ref() {
                    None => true,
                    Some((best_d2, _, best_prim)) => {
                        let diff = &d2 - best_d2;
                        diff.is_negative() || (diff.is_zero() && prim.id() < best_prim.id())
                    }
                };
                if replace {
                    *best = Some((d2, candidate, prim));
                }
            }
            AabbTree::Node { left, right, .. } => {
                let dl = left.aabb().distance_squared_to_point(query);
                let dr = right.aabb().distance_squared_to_point(query);
                let (near, far, d_far) = if (&dr - &dl).is_negative() {
                    (right, left, dl)
                } else {
                    (left, right, dr)
                };
                near.closest_recursive(query, best);
                // Equal box distance may still hide a smaller-id tie; only a
                // strictly farther box can be pruned.
                let prune = match best.as_ref() {
                    None => false,
                    Some((best_d2, _, _)) => (&d_far - best_d2).is_positive(),
                };
                if !prune {
                    far.closest_recursive(query, best);
                }
            }
        }
    }

    /// Every primitive whose triangle the segment touches or crosses, in
    /// deterministic traversal order.
    pub fn intersected_primitives<'a>(&'a self, seg: &Segment3<T>, out: &mut Vec<&'a P>) {
        let query = seg.aabb();
        self.segment_recursive(seg, &query, out);
    }

    fn segment_recursive<'a>(
        &'a self,
        seg: &Segment3<T>,
        query: &Aabb<T, 3>,
        out: &mut Vec<&'a P>,
    ) {
        match self {
            AabbTree::Leaf { aabb, prim } => {
                if aabb.intersects(query) && prim.intersects_segment(seg) {
                    out.push(prim);
                }
            }
            AabbTree::Node { aabb, left, right } => {
                if aabb.intersects(query) {
                    left.segment_recursive(seg, query, out);
                    right.segment_recursive(seg, query, out);
                }
            }
        }
    }

    /// All ray crossings with their parameters, unsorted.
    pub fn ray_hits<'a>(&'a self, origin: &Point3<T>, dir: &Vector3<T>, out: &mut Vec<(T, &'a P)>) {
        match self {
            AabbTree::Leaf { aabb, prim } => {
                if aabb.intersects_ray(origin, dir) {
                    if let Some(t) = prim.ray_hit(origin, dir) {
                        out.push((t, prim));
                    }
                }
            }
            AabbTree::Node { aabb, left, right } => {
                if aabb.intersects_ray(origin, dir) {
                    left.ray_hits(origin, dir, out);
                    right.ray_hits(origin, dir, out);
                }
            }
        }
    }
}

fn widest_center_axis<T: Scalar, P>(items: &[(Aabb<T, 3>, P)]) -> usize
where
    for<'a> &'a T: Add<&'a T, Output = T>
        + Sub<&'a T, Output = T>
        + Mul<&'a T, Output = T>
        + Div<&'a T, Output = T>,
{
    let mut best_axis = 0;
    let mut best_spread: Option<T> = None;
    for axis in 0..3 {
        let mut lo: Option<T> = None;
        let mut hi: Option<T> = None;
        for (aabb, _) in items {
            let c = aabb.center(axis);
            lo = Some(match lo {
                None => c.clone(),
                Some(l) => {
                    if (&c - &l).is_negative() {
                        c.clone()
                    } else {
                        l
                    }
                }
            });
            hi = Some(match hi {
                None => c,
                Some(h) => {
                    if (&c - &h).is_positive() {
                        c
                    } else {
                        h
                    }
                }
            });
        }
        let spread = &hi.unwrap() - &lo.unwrap();
        let wider = match best_spread.as_ref() {
            None => true,
            Some(b) => (&spread - b).is_positive(),
        };
        if wider {
            best_axis = axis;
            best_spread = Some(spread);
        }
    }
    best_axis
}
