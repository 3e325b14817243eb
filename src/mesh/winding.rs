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

/// A facet id paired with how its stored winding relates to a directed
/// edge: `reversed == false` means the facet's cyclic vertex order
/// traverses the edge source-to-destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedFacetRef {
    pub facet: usize,
    pub reversed: bool,
}

/// How `f` traverses the directed edge `(s, d)`. Exactly one of the three
/// cyclic pairs can match either direction; `None` means the facet does not
/// contain the edge at all (the caller reports inconsistent connectivity).
pub fn edge_winding(f: &[usize; 3], s: usize, d: usize) -> Option<bool> {
    if (f[0] == s && f[1] == d) || (f[1] == s && f[2] == d) || (f[2] == s && f[0] == d) {
        Some(false)
    } else if (f[0] == d && f[1] == s) || (f[1] == d && f[2] == s) || (f[2] == d && f[0] == s) {
        Some(true)
    } else {
        None
    }
}

/// The vertex of `f` that is not an endpoint of the edge `(s, d)`.
pub fn opposite_vertex(f: &[usize; 3], s: usize, d: usize) -> Option<usize> {
    if !f.contains(&s) || !f.contains(&d) {
        return None;
    }
    f.iter().copied().find(|&v| v != s && v != d)
}
