// Copyright 2025 Lars Brubaker
// License: MIT
//
// Public triangulator API and the per-face working context.
//
// A face is one outer loop plus zero or more holes, each loop a list of
// vertex indices into a caller-owned coordinate array. Every face goes
// through: simple-face shortcut -> projection -> cleaning -> orientation ->
// bridging -> ear clipping (with the fallback ladder). The steps are methods
// on TriangulationContext, split across the files in triangulator/.

use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::bbox::BBox;
use crate::ear_queue::{EarOrder, EarQueue};
use crate::error::{Diagnostic, Severity, TriangulationError, TriangulationResult};
use crate::geom::{Point2, Real, Vec3};
use crate::list::{NodeId, NodeList, INVALID};

mod bridge;
mod clean;
mod ear_clip;
mod fallback;
mod numerics;
mod orientation;
mod output;
mod project;
mod reflex;
mod simple;

pub use output::Triangulation;

use numerics::Predicates;
use reflex::ReflexSet;

/// Default tolerance for the near-zero determinant tests, relative to the
/// squared extent of the projected face.
pub const DEFAULT_EPSILON: Real = 1.0e-8;

// ─────────────────────────────── Configuration ─────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TriOption {
    /// Record info-level diagnostics on the result, not just warnings.
    CollectDiagnostics,
    /// Accept faces whose largest loop is not listed first by moving it to
    /// the front, instead of failing with LoopOrdering.
    ReorderLoops,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriangulatorConfig {
    pub ear_order: EarOrder,
    pub epsilon: Real,
    /// Seed for EarOrder::Random. None draws from the thread RNG.
    pub seed: Option<u64>,
    pub reorder_loops: bool,
    pub collect_diagnostics: bool,
    /// Cap on clipping steps per face. None uses a bound proportional to the
    /// node count.
    pub max_steps: Option<usize>,
}

impl Default for TriangulatorConfig {
    fn default() -> Self {
        TriangulatorConfig {
            ear_order: EarOrder::QualitySorted,
            epsilon: DEFAULT_EPSILON,
            seed: None,
            reorder_loops: false,
            collect_diagnostics: false,
            max_steps: None,
        }
    }
}

// ─────────────────────────────── Triangulator ──────────────────────────────────

/// Accumulates faces and triangulates them against a coordinate array.
pub struct Triangulator {
    config: TriangulatorConfig,
    /// Flattened loop-index stream; a corner slot is a position in here.
    indices: Vec<u32>,
    loop_lengths: Vec<usize>,
    /// Number of loops in each face.
    face_loops: Vec<usize>,
    rng: Box<dyn RngCore>,
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulator {
    pub fn new() -> Self {
        Self::with_config(TriangulatorConfig::default())
    }

    pub fn with_config(config: TriangulatorConfig) -> Self {
        let rng = make_rng(config.seed);
        Triangulator {
            config,
            indices: Vec::new(),
            loop_lengths: Vec::new(),
            face_loops: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &TriangulatorConfig {
        &self.config
    }

    pub fn set_option(&mut self, option: TriOption, value: bool) {
        match option {
            TriOption::CollectDiagnostics => self.config.collect_diagnostics = value,
            TriOption::ReorderLoops => self.config.reorder_loops = value,
        }
    }

    pub fn set_ear_order(&mut self, order: EarOrder) {
        self.config.ear_order = order;
    }

    pub fn set_epsilon(&mut self, epsilon: Real) {
        self.config.epsilon = epsilon;
    }

    pub fn set_max_steps(&mut self, max_steps: Option<usize>) {
        self.config.max_steps = max_steps;
    }

    /// Reseed the generator used by EarOrder::Random.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = make_rng(Some(seed));
    }

    /// Replace the generator used by EarOrder::Random.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore>) {
        self.rng = rng;
    }

    /// Add one face. The first loop is the outer boundary, the rest are holes.
    pub fn add_face<L: AsRef<[u32]>>(&mut self, loops: &[L]) {
        for l in loops {
            let l = l.as_ref();
            self.indices.extend_from_slice(l);
            self.loop_lengths.push(l.len());
        }
        self.face_loops.push(loops.len());
    }

    pub fn face_count(&self) -> usize {
        self.face_loops.len()
    }

    /// The flattened loop-index stream, in the order faces were added.
    pub fn loop_indices(&self) -> &[u32] {
        &self.indices
    }

    /// Forget all added faces.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.loop_lengths.clear();
        self.face_loops.clear();
    }

    /// Triangulate every added face. Output indices refer to `coords`; corner
    /// slots refer to positions in loop_indices().
    pub fn triangulate(&mut self, coords: &[Vec3]) -> TriangulationResult<Triangulation> {
        validate_input(&self.indices, coords)?;

        let Triangulator {
            config,
            indices,
            loop_lengths,
            face_loops,
            rng,
        } = self;

        let mut ctx = TriangulationContext::new(coords, indices, config, rng.as_mut());
        let mut face_ranges = Vec::with_capacity(face_loops.len());
        let mut loop_cursor = 0;
        let mut slot_cursor = 0;
        for (face, &count) in face_loops.iter().enumerate() {
            let mut spans = Vec::with_capacity(count);
            for &len in &loop_lengths[loop_cursor..loop_cursor + count] {
                spans.push(slot_cursor..slot_cursor + len);
                slot_cursor += len;
            }
            loop_cursor += count;

            let start = ctx.triangles.len();
            ctx.triangulate_face(face, &spans)?;
            face_ranges.push(start..ctx.triangles.len());
        }

        Ok(ctx.finish(face_ranges))
    }
}

/// Triangulate a single 2D face. `loops[0]` is the outer boundary.
pub fn triangulate_2d<L: AsRef<[u32]>>(
    points: &[[Real; 2]],
    loops: &[L],
) -> TriangulationResult<Triangulation> {
    let coords: Vec<Vec3> = points.iter().map(|p| [p[0], p[1], 0.0]).collect();
    let mut tri = Triangulator::new();
    tri.add_face(loops);
    tri.triangulate(&coords)
}

fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    }
}

fn validate_input(indices: &[u32], coords: &[Vec3]) -> TriangulationResult<()> {
    for &index in indices {
        let Some(c) = coords.get(index as usize) else {
            return Err(TriangulationError::VertexIndexOutOfRange {
                index,
                vertex_count: coords.len(),
            });
        };
        if !c.iter().all(|v| v.is_finite()) {
            return Err(TriangulationError::NonFiniteCoordinate { index });
        }
    }
    Ok(())
}

// ─────────────────────────────── Working context ───────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ChainState {
    /// More than three nodes left.
    Active,
    /// Exactly three nodes left.
    LastTriangle,
    Done,
}

/// All arenas for one triangulation call. Reset between faces, never shrunk.
pub(crate) struct TriangulationContext<'a> {
    coords: &'a [Vec3],
    indices: &'a [u32],
    config: &'a TriangulatorConfig,
    rng: &'a mut dyn RngCore,

    face: usize,
    nodes: NodeList,
    /// Projected points; after cleaning, sorted lexicographically and unique.
    points: Vec<Point2>,
    /// Loop heads of the current face, outer first.
    loops: Vec<NodeId>,
    /// Caller's position of each entry in `loops` within its face.
    loop_ids: Vec<usize>,
    eps: Real,
    /// False when the outer loop was reversed to make it CCW.
    ccw_loop: bool,

    /// Head of the chain being clipped.
    first_node: NodeId,
    reflex: ReflexSet,
    /// Loops whose edges a diagonal must not cross.
    edge_loops: Vec<NodeId>,
    queue: EarQueue,
    /// Pending chains produced by splits.
    chains: Vec<NodeId>,
    steps: usize,
    step_limit: usize,
    troubled: bool,

    /// Emitted triangles as corner slots.
    triangles: Vec<[u32; 3]>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TriangulationContext<'a> {
    pub(crate) fn new(
        coords: &'a [Vec3],
        indices: &'a [u32],
        config: &'a TriangulatorConfig,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        TriangulationContext {
            coords,
            indices,
            config,
            rng,
            face: 0,
            nodes: NodeList::new(),
            points: Vec::new(),
            loops: Vec::new(),
            loop_ids: Vec::new(),
            eps: config.epsilon,
            ccw_loop: true,
            first_node: INVALID,
            reflex: ReflexSet::new(),
            edge_loops: Vec::new(),
            queue: EarQueue::new(config.ear_order),
            chains: Vec::new(),
            steps: 0,
            step_limit: usize::MAX,
            troubled: false,
            triangles: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn begin_face(&mut self, face: usize) {
        self.face = face;
        self.nodes.clear();
        self.points.clear();
        self.loops.clear();
        self.loop_ids.clear();
        self.eps = self.config.epsilon;
        self.ccw_loop = true;
        self.first_node = INVALID;
        self.reflex.clear();
        self.edge_loops.clear();
        self.queue.reset();
        self.chains.clear();
        self.steps = 0;
        self.step_limit = usize::MAX;
        self.troubled = false;
    }

    /// Triangulate one face whose loops occupy `spans` of the corner stream.
    pub(crate) fn triangulate_face(
        &mut self,
        face: usize,
        spans: &[std::ops::Range<usize>],
    ) -> TriangulationResult<()> {
        self.begin_face(face);
        self.load_loops(spans);
        if self.loops.is_empty() || self.loop_ids[0] != 0 {
            self.report(Diagnostic::DegenerateFace { face });
            return Ok(());
        }

        if self.loops.len() == 1 && self.simple_face(self.loops[0]) {
            return Ok(());
        }

        if !self.prepare_loops()? {
            self.report(Diagnostic::DegenerateFace { face });
            return Ok(());
        }
        if self.loops.len() > 1 {
            self.construct_bridges();
        }

        self.clip_face(self.loops[0]);
        Ok(())
    }

    /// Build one node cycle per non-empty loop. Node points start out as
    /// vertex indices and node commons as corner slots.
    fn load_loops(&mut self, spans: &[std::ops::Range<usize>]) {
        let indices = self.indices;
        for (id, span) in spans.iter().enumerate() {
            let head = self
                .nodes
                .push_loop(span.clone().map(|slot| (indices[slot], slot as u32)));
            if head != INVALID {
                self.loops.push(head);
                self.loop_ids.push(id);
            }
        }
    }

    /// Project, clean and orient the loaded loops and classify their
    /// corners. Returns false if the outer loop degenerated.
    fn prepare_loops(&mut self) -> TriangulationResult<bool> {
        self.project_face();
        if !self.clean_face() {
            return Ok(false);
        }
        self.eps = self.config.epsilon * self.extent_sq();

        self.adjust_orientation()?;

        for i in 0..self.loops.len() {
            self.classify_angles(self.loops[i]);
        }
        Ok(true)
    }

    /// Squared larger side of the bounding box of the cleaned points.
    fn extent_sq(&self) -> Real {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        let (mut ymin, mut ymax) = (first.y, first.y);
        for p in &self.points {
            ymin = ymin.min(p.y);
            ymax = ymax.max(p.y);
        }
        let extent = (last.x - first.x).max(ymax - ymin);
        extent * extent
    }

    #[inline]
    fn preds(&self) -> Predicates<'_> {
        Predicates {
            points: &self.points,
            eps: self.eps,
        }
    }

    #[inline]
    fn point_of(&self, node: NodeId) -> u32 {
        self.nodes.point(node)
    }

    fn bbox(&self, i: u32, j: u32) -> BBox {
        BBox::new(&self.points, i, j)
    }

    /// Record a triangle by its nodes' corner slots, restoring the caller's
    /// orientation if the outer loop was reversed.
    fn store_triangle(&mut self, a: NodeId, b: NodeId, c: NodeId) {
        let (a, b, c) = (
            self.nodes.common(a),
            self.nodes.common(b),
            self.nodes.common(c),
        );
        if self.ccw_loop {
            self.triangles.push([a, b, c]);
        } else {
            self.triangles.push([b, a, c]);
        }
    }

    /// Log a diagnostic and keep it if it is a warning or collection is on.
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => warn!(face = self.face, "{}", diagnostic),
            Severity::Info => debug!(face = self.face, "{}", diagnostic),
        }
        if diagnostic.severity() == Severity::Warning || self.config.collect_diagnostics {
            self.diagnostics.push(diagnostic);
        }
    }

    fn finish(self, face_ranges: Vec<std::ops::Range<usize>>) -> Triangulation {
        Triangulation::from_corners(self.indices, self.triangles, face_ranges, self.diagnostics)
    }
}
