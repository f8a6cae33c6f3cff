// Copyright 2025 Lars Brubaker
// WASM bindings for fist-rust

use fist_rust::{EarOrder, TriOption, Triangulation, Triangulator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// A stateful triangulator: push 2D points, add faces as loops of point
/// indices, then triangulate.
#[wasm_bindgen]
pub struct TriangulatorJs {
    inner: Triangulator,
    coords: Vec<[f64; 3]>,
    result: Option<Triangulation>,
    error: String,
}

#[wasm_bindgen]
impl TriangulatorJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TriangulatorJs {
        TriangulatorJs {
            inner: Triangulator::new(),
            coords: Vec::new(),
            result: None,
            error: String::new(),
        }
    }

    /// Append points from a flat [x0,y0, x1,y1, ...] Float64Array. Returns
    /// the index of the first appended point.
    pub fn add_points(&mut self, xy: &[f64]) -> u32 {
        let first = self.coords.len() as u32;
        self.coords.extend(xy.chunks_exact(2).map(|p| [p[0], p[1], 0.0]));
        first
    }

    /// Add one face. `indices` holds all loops back to back, outer first;
    /// `loop_lengths` says how many indices each loop takes.
    pub fn add_face(&mut self, indices: &[u32], loop_lengths: &[u32]) {
        let mut loops = Vec::with_capacity(loop_lengths.len());
        let mut start = 0usize;
        for &len in loop_lengths {
            let end = (start + len as usize).min(indices.len());
            loops.push(&indices[start..end]);
            start = end;
        }
        self.inner.add_face(&loops);
    }

    /// Set an option (0 = CollectDiagnostics, 1 = ReorderLoops).
    pub fn set_option(&mut self, option: u32, value: bool) {
        let opt = match option {
            0 => TriOption::CollectDiagnostics,
            1 => TriOption::ReorderLoops,
            _ => return,
        };
        self.inner.set_option(opt, value);
    }

    /// order: 0=QualitySorted 1=Sequential 2=Random
    pub fn set_ear_order(&mut self, order: u32) {
        self.inner.set_ear_order(match order {
            1 => EarOrder::Sequential,
            2 => EarOrder::Random,
            _ => EarOrder::QualitySorted,
        });
    }

    /// Triangulate and return true on success; see last_error() otherwise.
    pub fn triangulate(&mut self) -> bool {
        match self.inner.triangulate(&self.coords) {
            Ok(out) => {
                self.result = Some(out);
                self.error.clear();
                true
            }
            Err(e) => {
                self.result = None;
                self.error = e.to_string();
                false
            }
        }
    }

    pub fn triangle_count(&self) -> u32 {
        self.result.as_ref().map_or(0, |r| r.triangle_count() as u32)
    }

    /// Flat triangle point-index triples [i0,i1,i2, ...].
    pub fn get_triangles(&self) -> Vec<u32> {
        self.result.as_ref().map_or_else(Vec::new, |r| r.indices())
    }

    /// Same triangles as positions in the concatenated add_face() indices.
    pub fn get_corners(&self) -> Vec<u32> {
        self.result
            .as_ref()
            .map_or_else(Vec::new, |r| r.corners().iter().flatten().copied().collect())
    }

    /// One message per diagnostic recorded by the last run.
    pub fn get_diagnostics(&self) -> Vec<String> {
        self.result.as_ref().map_or_else(Vec::new, |r| {
            r.diagnostics().iter().map(|d| d.to_string()).collect()
        })
    }

    pub fn last_error(&self) -> String {
        self.error.clone()
    }
}

impl Default for TriangulatorJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: triangulate a single closed loop of 2D vertices given as
/// [x0,y0, x1,y1, ...]. Returns the triangle index array, empty on error.
#[wasm_bindgen]
pub fn triangulate_polygon(vertices: &[f64]) -> Vec<u32> {
    let points: Vec<[f64; 2]> = vertices.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
    let ring: Vec<u32> = (0..points.len() as u32).collect();
    fist_rust::triangulate_2d(&points, &[ring])
        .map(|out| out.indices())
        .unwrap_or_default()
}
