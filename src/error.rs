// Copyright 2025 Lars Brubaker
// License: MIT
//
// Fatal input errors and the recoverable diagnostics collected on a result.

use thiserror::Error;

/// Result type for triangulation calls.
pub type TriangulationResult<T> = Result<T, TriangulationError>;

/// Input problems that stop a triangulation before any face is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// A hole encloses more area than the outer loop of its face.
    #[error(
        "face {face}: loop {hole} has area {hole_area} larger than the outer loop's {outer_area}"
    )]
    LoopOrdering {
        face: usize,
        hole: usize,
        outer_area: f64,
        hole_area: f64,
    },

    #[error("vertex index {index} out of range (coordinate array has {vertex_count} vertices)")]
    VertexIndexOutOfRange { index: u32, vertex_count: usize },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

/// Something the triangulator worked around. Warnings are always recorded;
/// info-level entries only when diagnostics are requested.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// The loop needed the fallback ladder to finish.
    #[error("face {face}: loop is self-intersecting or degenerate")]
    SelfIntersectingLoop { face: usize },

    /// No cone-valid, crossing-free bridge existed; the nearest vertex was used.
    #[error("face {face}: no valid bridge for hole {hole}, used nearest vertex")]
    NoValidBridge { face: usize, hole: usize },

    /// A corner was clipped without re-validating it.
    #[error("face {face}: forced clip of an unvalidated corner")]
    IrreducibleLastResort { face: usize },

    /// The clipping loop hit its step cap; the rest was fan-clipped.
    #[error("face {face}: step limit of {steps} reached, remaining loop fan-clipped")]
    StepLimitReached { face: usize, steps: usize },

    /// Fewer than three distinct points remained after cleaning.
    #[error("face {face}: collapsed to fewer than three distinct points")]
    DegenerateFace { face: usize },

    #[error("face {face}: removed {count} duplicate corner(s)")]
    DuplicatePointsRemoved { face: usize, count: usize },

    #[error("face {face}: forced two triangles at a cross-over")]
    CrossOverResolved { face: usize },

    #[error("face {face}: split loop along a diagonal")]
    PolygonSplit { face: usize },

    #[error("face {face}: moved loop {hole} to the outer position")]
    LoopsReordered { face: usize, hole: usize },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::NoValidBridge { .. }
            | Diagnostic::IrreducibleLastResort { .. }
            | Diagnostic::StepLimitReached { .. }
            | Diagnostic::DegenerateFace { .. } => Severity::Warning,
            Diagnostic::SelfIntersectingLoop { .. }
            | Diagnostic::DuplicatePointsRemoved { .. }
            | Diagnostic::CrossOverResolved { .. }
            | Diagnostic::PolygonSplit { .. }
            | Diagnostic::LoopsReordered { .. } => Severity::Info,
        }
    }

    pub fn face(&self) -> usize {
        match *self {
            Diagnostic::SelfIntersectingLoop { face }
            | Diagnostic::NoValidBridge { face, .. }
            | Diagnostic::IrreducibleLastResort { face }
            | Diagnostic::StepLimitReached { face, .. }
            | Diagnostic::DegenerateFace { face }
            | Diagnostic::DuplicatePointsRemoved { face, .. }
            | Diagnostic::CrossOverResolved { face }
            | Diagnostic::PolygonSplit { face }
            | Diagnostic::LoopsReordered { face, .. } => face,
        }
    }
}
