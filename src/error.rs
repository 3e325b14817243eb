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

use thiserror::Error;

/// Every failure is fatal for the whole operation it occurs in: a mesh that
/// trips one of these violates the geometric assumptions the index and the
/// ordering predicates rely on, so there is no partial result to salvage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("degenerate geometry (facet {facet:?}): {detail}")]
    DegenerateGeometry {
        facet: Option<usize>,
        detail: &'static str,
    },

    #[error("mesh appears to self-intersect at facet {facet}")]
    SelfIntersection { facet: usize },

    #[error("inconsistent connectivity: facet {facet} does not contain edge {edge:?}")]
    InconsistentConnectivity { facet: usize, edge: (usize, usize) },

    #[error("no separating plane among the facets adjacent to vertex {vertex}")]
    UnresolvedVertexCase { vertex: usize },
}
