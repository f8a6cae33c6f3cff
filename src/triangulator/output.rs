// Copyright 2025 Lars Brubaker
// Triangulation result: vertex-index triangles, their corner slots, and the
// diagnostics gathered along the way.

use std::ops::Range;

use crate::error::{Diagnostic, Severity};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    triangles: Vec<[u32; 3]>,
    corners: Vec<[u32; 3]>,
    face_ranges: Vec<Range<usize>>,
    diagnostics: Vec<Diagnostic>,
}

impl Triangulation {
    /// Build the result from triangles given as corner slots into the
    /// flattened loop-index stream `indices`.
    pub(crate) fn from_corners(
        indices: &[u32],
        corners: Vec<[u32; 3]>,
        face_ranges: Vec<Range<usize>>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let triangles = corners
            .iter()
            .map(|t| t.map(|slot| indices[slot as usize]))
            .collect();
        Triangulation {
            triangles,
            corners,
            face_ranges,
            diagnostics,
        }
    }

    /// Triangles as indices into the coordinate array.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Triangles as positions in the flattened loop-index stream, so callers
    /// can carry per-corner attributes through.
    pub fn corners(&self) -> &[[u32; 3]] {
        &self.corners
    }

    /// Triangles as a flat index buffer.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Range of triangles produced by each face, in the order faces were
    /// added.
    pub fn face_ranges(&self) -> &[Range<usize>] {
        &self.face_ranges
    }

    /// Triangles of one face.
    pub fn face_triangles(&self, face: usize) -> &[[u32; 3]] {
        match self.face_ranges.get(face) {
            Some(r) => &self.triangles[r.clone()],
            None => &[],
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Warning)
    }
}
