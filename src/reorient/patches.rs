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

use std::collections::{HashMap, VecDeque};

use smallvec::SmallVec;

use crate::mesh::winding::edge_winding;

/// Edge-connected components of a facet table, with a winding made
/// consistent inside each component by BFS: a visited neighbor is flipped
/// when it traverses the shared edge in the same direction as the facet it
/// was reached from.
#[derive(Clone, Debug)]
pub struct Patches {
    /// Patch label per facet.
    pub labels: Vec<usize>,
    pub count: usize,
    /// Facet table with the BFS-consistent winding applied.
    pub oriented: Vec<[usize; 3]>,
    /// Whether `oriented[f]` differs from the input winding of `f`.
    pub flipped: Vec<bool>,
}

pub fn extract_patches(facets: &[[usize; 3]]) -> Patches {
    let m = facets.len();

    let mut edge_map: HashMap<(usize, usize), SmallVec<[usize; 2]>> = HashMap::new();
    for (fid, f) in facets.iter().enumerate() {
        for k in 0..3 {
            edge_map
                .entry(canonical(f[k], f[(k + 1) % 3]))
                .or_default()
                .push(fid);
        }
    }

    let mut labels = vec![usize::MAX; m];
    let mut flipped = vec![false; m];
    let mut count = 0;
    let mut queue = VecDeque::new();

    for seed in 0..m {
        if labels[seed] != usize::MAX {
            continue;
        }
        labels[seed] = count;
        queue.push_back(seed);
        while let Some(f) = queue.pop_front() {
            let w = apply_flip(facets[f], flipped[f]);
            for k in 0..3 {
                let u = w[k];
                let v = w[(k + 1) % 3];
                for &g in &edge_map[&canonical(u, v)] {
                    if labels[g] != usize::MAX {
                        continue;
                    }
                    labels[g] = count;
                    let reversed = edge_winding(&facets[g], u, v).expect("edge map invariant");
                    flipped[g] = !reversed;
                    queue.push_back(g);
                }
            }
        }
        count += 1;
    }

    let oriented = facets
        .iter()
        .zip(&flipped)
        .map(|(f, &fl)| apply_flip(*f, fl))
        .collect();

    Patches {
        labels,
        count,
        oriented,
        flipped,
    }
}

fn canonical(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

fn apply_flip(f: [usize; 3], flip: bool) -> [usize; 3] {
    if flip { [f[0], f[2], f[1]] } else { f }
}
