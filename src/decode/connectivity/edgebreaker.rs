use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::core::corner_table::{next, previous, CornerTable, GenericCornerTable};
use crate::core::shared::{CornerIdx, FaceIdx, VertexIdx};
use crate::shared::connectivity::edgebreaker::{Clers, Symbol};

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Corner {corner} and its opposite do not point at each other.")]
    AsymmetricOpposite { corner: CornerIdx },
    #[error("Triangle {triangle} refers to the same vertex more than once.")]
    DegenerateTriangle { triangle: FaceIdx },
    #[error("Corner {corner} is linked to an edge running in the wrong direction.")]
    MismatchedEdge { corner: CornerIdx },
    #[error("The directed edge {vertices:?} belongs to more than one triangle.")]
    NonManifoldEdge { vertices: [VertexIdx; 2] },
    #[error("Only {consumed} of the {total} symbols were used; the CLERS string continues after its last branch ended.")]
    TrailingSymbols { consumed: usize, total: usize },
    #[error("The CLERS string ended at position {position} while branches were still open.")]
    UnexpectedEndOfClers { position: usize },
    #[error("Corner {corner} was never linked to an opposite corner.")]
    UnresolvedCorner { corner: CornerIdx },
    #[error("Corner {corner} was never assigned a vertex.")]
    UnresolvedVertex { corner: CornerIdx },
    #[error("The zip starting at corner {corner} walked past every corner without finding a free edge.")]
    ZipWalkExceeded { corner: CornerIdx },
}

/// State of the opposite slot of a corner during reconstruction.
#[derive(Clone, Copy, PartialEq)]
enum Link {
    Corner(CornerIdx),
    /// The edge facing the corner is free and its far end is a vertex created by a `C`.
    PendingNew,
    /// The edge facing the corner is free and waits to be zipped.
    PendingClose,
    Unset,
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corner(c) => write!(f, "{}", c),
            Self::PendingNew => write!(f, "new"),
            Self::PendingClose => write!(f, "close"),
            Self::Unset => write!(f, "-"),
        }
    }
}

/// Incrementally built corner table.
struct Reconstruction<'clers> {
    clers: &'clers Clers,

    vertices: Vec<Option<VertexIdx>>,

    links: Vec<Link>,

    num_vertices: usize,
}

/// Rebuilds the corner table of the closed mesh that 'clers' describes.
/// The empty string stands for a single triangle.
pub fn decompress_connectivity(clers: &Clers) -> Result<CornerTable, Err> {
    if clers.is_empty() {
        return Ok(CornerTable::from_parts(vec![0, 1, 2], vec![None; 3], 3));
    }
    let mut reconstruction = Reconstruction::new(clers);
    reconstruction.run()?;
    let table = reconstruction.finish()?;
    debug!(num_vertices = table.num_vertices(), num_faces = table.num_faces(), "reconstructed connectivity");
    Ok(table)
}

impl<'clers> Reconstruction<'clers> {
    fn new(clers: &'clers Clers) -> Self {
        let num_corners = 3 * clers.num_triangles();
        let mut vertices = vec![None; num_corners];
        let mut links = vec![Link::Unset; num_corners];
        for (c, v) in vertices.iter_mut().take(3).enumerate() {
            *v = Some(c);
        }
        links[0] = Link::PendingNew;
        links[2] = Link::PendingNew;
        Self {
            clers,
            vertices,
            links,
            num_vertices: 3,
        }
    }

    fn run(&mut self) -> Result<(), Err> {
        let mut c = 1;
        // corners where the left branches of 'S' triangles resume
        let mut stack = Vec::new();
        let mut position = 0;
        loop {
            let symbol = self.clers.get(position).ok_or(Err::UnexpectedEndOfClers { position })?;
            position += 1;

            // attach a new triangle across the edge facing 'c'
            let base = 3 * position;
            self.links[c] = Link::Corner(base);
            self.links[base] = Link::Corner(c);
            self.vertices[base + 1] = self.vertices[previous(c)];
            self.vertices[base + 2] = self.vertices[next(c)];
            c = base + 1;
            let cn = base + 2;

            match symbol {
                Symbol::C => {
                    self.links[cn] = Link::PendingNew;
                    self.vertices[base] = Some(self.num_vertices);
                    self.num_vertices += 1;
                },
                Symbol::L => {
                    self.links[cn] = Link::PendingClose;
                    self.zip(cn)?;
                },
                Symbol::R => {
                    self.links[c] = Link::PendingClose;
                    c = cn;
                },
                Symbol::S => stack.push(cn),
                Symbol::E => {
                    self.links[c] = Link::PendingClose;
                    self.links[cn] = Link::PendingClose;
                    self.zip(cn)?;
                    match stack.pop() {
                        Some(resume) => c = resume,
                        None => break,
                    }
                },
            }
        }

        if position != self.clers.len() {
            return Err(Err::TrailingSymbols { consumed: position, total: self.clers.len() });
        }
        Ok(())
    }

    /// Links the free edge facing 'c' to the next free edge around the vertex it turns about,
    /// merging the two vertex ids, and repeats while that exposes another edge waiting to close.
    fn zip(&mut self, mut c: CornerIdx) -> Result<(), Err> {
        let limit = self.links.len();
        loop {
            let mut b = next(c);
            let mut steps = 0;
            while let Link::Corner(o) = self.links[b] {
                b = next(o);
                steps += 1;
                if steps > limit {
                    return Err(Err::ZipWalkExceeded { corner: c });
                }
            }
            if self.links[b] != Link::PendingNew {
                return Ok(());
            }
            self.links[c] = Link::Corner(b);
            self.links[b] = Link::Corner(c);

            let mut a = previous(c);
            self.vertices[previous(a)] = self.vertices[previous(b)];
            let mut steps = 0;
            while let Link::Corner(o) = self.links[a] {
                if a == b {
                    break;
                }
                a = previous(o);
                self.vertices[previous(a)] = self.vertices[previous(b)];
                steps += 1;
                if steps > limit {
                    return Err(Err::ZipWalkExceeded { corner: c });
                }
            }

            c = previous(c);
            let mut steps = 0;
            while let Link::Corner(o) = self.links[c] {
                if c == b {
                    break;
                }
                c = previous(o);
                steps += 1;
                if steps > limit {
                    return Err(Err::ZipWalkExceeded { corner: c });
                }
            }
            if self.links[c] != Link::PendingClose {
                return Ok(());
            }
        }
    }

    /// Checks that every slot was resolved and returns the table.
    fn finish(self) -> Result<CornerTable, Err> {
        let vertices = self.vertices.iter()
            .enumerate()
            .map(|(corner, v)| v.ok_or(Err::UnresolvedVertex { corner }))
            .collect::<Result<Vec<_>, _>>()?;
        let opposites = self.links.iter()
            .enumerate()
            .map(|(corner, &link)| match link {
                Link::Corner(o) => Ok(o),
                _ => Err(Err::UnresolvedCorner { corner }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (corner, &o) in opposites.iter().enumerate() {
            if opposites[o] != corner {
                return Err(Err::AsymmetricOpposite { corner });
            }
            // the two corners must face the same edge, traversed in opposite directions
            if vertices[next(corner)] != vertices[previous(o)] || vertices[previous(corner)] != vertices[next(o)] {
                return Err(Err::MismatchedEdge { corner });
            }
        }
        for (triangle, f) in vertices.chunks_exact(3).enumerate() {
            if f[0] == f[1] || f[1] == f[2] || f[2] == f[0] {
                return Err(Err::DegenerateTriangle { triangle });
            }
        }
        let mut edges = HashSet::with_capacity(vertices.len());
        for f in vertices.chunks_exact(3) {
            for edge in [[f[0], f[1]], [f[1], f[2]], [f[2], f[0]]] {
                if !edges.insert(edge) {
                    return Err(Err::NonManifoldEdge { vertices: edge });
                }
            }
        }

        Ok(CornerTable::from_parts(
            vertices,
            opposites.into_iter().map(Some).collect(),
            self.num_vertices,
        ))
    }
}
