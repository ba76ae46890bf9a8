use std::{cmp, fmt};

use tracing::debug;

use crate::core::corner_table::{self, CornerTable, GenericCornerTable};
use crate::core::mesh::Mesh;
use crate::core::shared::{ConfigType, CornerIdx, NdVector, VertexIdx};
use crate::shared::attribute::prediction_scheme::{delta_prediction, mesh_parallelogram_prediction};
use crate::shared::attribute::prediction_transform::PredictionTransform;
use crate::shared::connectivity::edgebreaker::{Clers, Symbol};

/// How the seed face's start corner is chosen. The seed face is always face 0.
#[derive(Clone, Copy, fmt::Debug, cmp::PartialEq)]
pub enum StartCorner {
	/// Prefer a start corner whose first traversed face has both neighbors, then one neighbor,
	/// then any neighbor at all.
	Search,
	/// Always start at corner 0.
	First,
}

#[derive(Clone, fmt::Debug, cmp::PartialEq)]
pub struct Config {
	pub start_corner: StartCorner,
}

impl ConfigType for Config {
	fn default() -> Self {
		Self {
			start_corner: StartCorner::Search,
		}
	}
}

#[derive(fmt::Debug, cmp::PartialEq)]
#[remain::sorted]
#[derive(thiserror::Error)]
pub enum Err {
	#[error("Corner table error: {0}")]
	CornerTableError(#[from] corner_table::Err),
	#[error("The mesh is not connected; {unvisited} faces were not reached from the seed face.")]
	DisconnectedMesh { unvisited: usize },
	#[error("The mesh has no faces.")]
	EmptyMesh,
	#[error("The mesh has {boundary_edges} boundary edges; only closed meshes and single triangles are supported.")]
	OpenMesh { boundary_edges: usize },
	#[error("Vertex {vertex} is not referred to by any face.")]
	UnreferencedVertex { vertex: VertexIdx },
	#[error("Closed meshes must be homeomorphic to a sphere, but the Euler characteristic is {euler_characteristic}.")]
	UnsupportedTopology { euler_characteristic: isize },
}

/// Output of the traversal.
#[derive(Clone, fmt::Debug, cmp::PartialEq)]
pub(crate) struct Traversal {
	pub(crate) clers: Clers,
	pub(crate) deltas: Vec<NdVector<3, f64>>,
	/// Original index of each vertex in the order the decoder will number them.
	pub(crate) vertex_order: Vec<VertexIdx>,
}

pub(crate) struct Edgebreaker<'mesh, T> {
	table: &'mesh CornerTable,

	positions: &'mesh [NdVector<3, f64>],

	transform: &'mesh T,

	/// Positions as the decoder will reconstruct them, indexed by the original vertex index.
	/// Predictions are made from these rather than from 'positions', so that rounding errors
	/// do not accumulate along the traversal.
	reconstructed: Vec<NdVector<3, f64>>,

	/// The 'i'th entry is true if the geometry of the 'i'th vertex is already fixed.
	/// Boundary vertices are marked from the start, which only matters for a single triangle.
	marked: Vec<bool>,

	/// The 'i'th entry is true if the 'i'th face has been traversed.
	flagged: Vec<bool>,

	clers: Clers,

	deltas: Vec<NdVector<3, f64>>,

	vertex_order: Vec<VertexIdx>,
}

/// Validates the mesh and runs the traversal on it. Corrections are produced by 'transform'.
pub(crate) fn encode_connectivity<T: PredictionTransform>(
	mesh: &Mesh,
	cfg: &Config,
	transform: &T,
) -> Result<Traversal, Err> {
	if mesh.faces.is_empty() {
		return Err(Err::EmptyMesh);
	}
	let mut referenced = vec![false; mesh.num_vertices()];
	for &v in mesh.faces.iter().flatten() {
		if let Some(r) = referenced.get_mut(v) {
			*r = true;
		}
	}
	if let Some(vertex) = referenced.iter().position(|&r| !r) {
		return Err(Err::UnreferencedVertex { vertex });
	}

	let table = CornerTable::from_faces(&mesh.faces, mesh.num_vertices())?;
	// the decoder cannot tell which vertices were pre-marked, so the only open mesh that
	// survives a round trip is the single triangle
	let boundary_edges = table.num_boundary_edges();
	if boundary_edges > 0 && table.num_faces() > 1 {
		return Err(Err::OpenMesh { boundary_edges });
	}

	let start = start_corner(&table, cfg.start_corner);
	debug!(start, boundary_edges, "selected start corner");
	let traversal = Edgebreaker::new(&table, &mesh.positions, transform).traverse(start);

	let unvisited = traversal.1;
	if unvisited > 0 {
		return Err(Err::DisconnectedMesh { unvisited });
	}
	if boundary_edges == 0 && table.euler_characteristic() != 2 {
		return Err(Err::UnsupportedTopology { euler_characteristic: table.euler_characteristic() });
	}
	Ok(traversal.0)
}

/// Picks a corner 's' of face 0 such that the first traversed face, the one across the edge
/// facing 's', has as many neighbors as possible.
fn start_corner(table: &CornerTable, policy: StartCorner) -> CornerIdx {
	if policy == StartCorner::First {
		return 0;
	}
	// 0: no face across the start edge, 1: a dead end, 2: one free side, 3: both sides
	let score = |s: CornerIdx| match table.opposite(s) {
		None => 0,
		Some(c) => 1 + table.right(c).is_some() as u8 + table.left(c).is_some() as u8,
	};
	(1..=3).rev()
		.find_map(|wanted| (0..3).find(|&s| score(s) == wanted))
		.unwrap_or(0)
}

impl<'mesh, T: PredictionTransform> Edgebreaker<'mesh, T> {
	pub(crate) fn new(table: &'mesh CornerTable, positions: &'mesh [NdVector<3, f64>], transform: &'mesh T) -> Self {
		Self {
			table,
			positions,
			transform,
			reconstructed: vec![NdVector::zero(); positions.len()],
			marked: table.boundary_vertices(),
			flagged: vec![false; table.num_faces()],
			clers: Clers::new(),
			deltas: Vec::new(),
			vertex_order: Vec::new(),
		}
	}

	/// Runs the traversal from 'start' and returns the result together with the number of
	/// faces that were never reached.
	pub(crate) fn traverse(mut self, start: CornerIdx) -> (Traversal, usize) {
		self.encode_seed(start);

		// Each entry is a gate: a corner of a traversed face. The traversal continues into the
		// face across the edge facing the gate. The stack holds the left branches of 'S' faces.
		let mut stack = vec![start];
		while let Some(mut gate) = stack.pop() {
			while let Some(c) = self.table.opposite(gate) {
				let face = self.table.face(c);
				if self.flagged[face] {
					break;
				}
				self.flagged[face] = true;

				let v = self.table.vertex(c);
				if !self.marked[v] {
					self.clers.push(Symbol::C);
					let predicted = mesh_parallelogram_prediction::predict(self.table, c, gate, &self.reconstructed);
					self.encode_vertex(v, predicted);
					gate = self.table.next(c);
					continue;
				}

				let right_done = self.is_traversed(self.table.right(c));
				let left_done = self.is_traversed(self.table.left(c));
				match (right_done, left_done) {
					(true, true) => {
						self.clers.push(Symbol::E);
						break;
					},
					(true, false) => {
						self.clers.push(Symbol::R);
						gate = self.table.previous(c);
					},
					(false, true) => {
						self.clers.push(Symbol::L);
						gate = self.table.next(c);
					},
					(false, false) => {
						self.clers.push(Symbol::S);
						stack.push(self.table.previous(c));
						gate = self.table.next(c);
					},
				}
			}
		}

		let unvisited = self.flagged.iter().filter(|&&f| !f).count();
		(
			Traversal {
				clers: self.clers,
				deltas: self.deltas,
				vertex_order: self.vertex_order,
			},
			unvisited
		)
	}

	/// Encodes the three vertices of the seed face, starting from the one before 'start'.
	fn encode_seed(&mut self, start: CornerIdx) {
		let p = self.table.previous(start);
		let first = self.table.vertex(p);
		self.encode_vertex(first, NdVector::zero());
		for c in [start, self.table.next(start)] {
			let predicted = delta_prediction::predict(self.table, c, &self.reconstructed);
			self.encode_vertex(self.table.vertex(c), predicted);
		}
		self.flagged[self.table.face(start)] = true;
	}

	fn encode_vertex(&mut self, v: VertexIdx, predicted: NdVector<3, f64>) {
		let delta = self.transform.map(self.positions[v], predicted);
		self.deltas.push(delta);
		self.reconstructed[v] = self.transform.inverse(predicted, delta);
		self.marked[v] = true;
		self.vertex_order.push(v);
	}

	/// A missing neighbor counts as traversed.
	fn is_traversed(&self, corner: Option<CornerIdx>) -> bool {
		corner.map_or(true, |c| self.flagged[self.table.face(c)])
	}
}
