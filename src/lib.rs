// fist-rust: ear-clipping triangulation of polygons with holes
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod bbox;
pub mod ear_queue;
pub mod error;
pub mod geom;
pub mod list;
pub mod triangulator;

pub use ear_queue::EarOrder;
pub use error::{Diagnostic, Severity, TriangulationError, TriangulationResult};
pub use triangulator::{
    triangulate_2d, TriOption, Triangulation, Triangulator, TriangulatorConfig, DEFAULT_EPSILON,
};
