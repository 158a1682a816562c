//! Planar tiling geometry: vertices, edges (lines) and tiles (cells), fully
//! cross-linked by integer id, plus the per-edge flow-continuation graph used
//! by the solver and the loop tracer.
//!
//! Cross-references are indices into flat `Vec`s rather than pointers, so the
//! whole structure can be handed around as a plain value (see
//! [`GeometryBuilder`](builder::GeometryBuilder) for how it's assembled from a
//! stream of polygons).

pub mod builder;
mod point;

pub use builder::GeometryBuilder;
pub use point::Point;

/// Direction a continuation is followed in, relative to the edge it was
/// reached from. `In` means "arrived via this edge's end 0"; `Out` means
/// "arrived via end 1". Following a continuation in a direction yields the
/// new direction needed to keep moving away from the shared vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

macro_rules! flat_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

flat_id!(VertexId);
flat_id!(EdgeId);
flat_id!(TileId);

#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub pos: Point,
    pub edges: Vec<EdgeId>,
    pub tiles: Vec<TileId>,
}

/// A side shared by one or two tiles. `ends[0]`/`ends[1]` only matter to
/// define a direction for `in`/`out`; the edge itself is undirected.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub ends: [VertexId; 2],
    pub tiles: Vec<TileId>,
    /// Edges sharing `ends[0]`, excluding self.
    pub ins: Vec<EdgeId>,
    /// Edges sharing `ends[1]`, excluding self.
    pub outs: Vec<EdgeId>,
}

impl Edge {
    pub fn other_end(&self, v: VertexId) -> VertexId {
        if self.ends[0] == v {
            self.ends[1]
        } else {
            self.ends[0]
        }
    }

    pub fn has_end(&self, v: VertexId) -> bool {
        self.ends[0] == v || self.ends[1] == v
    }

    /// The continuation list and resulting direction reached by leaving this
    /// edge in `direction`, at position `which` within that list.
    pub fn route(&self, direction: Direction, which: usize) -> Option<EdgeId> {
        match direction {
            Direction::In => self.ins.get(which).copied(),
            Direction::Out => self.outs.get(which).copied(),
        }
    }

    pub fn route_count(&self, direction: Direction) -> usize {
        match direction {
            Direction::In => self.ins.len(),
            Direction::Out => self.outs.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    pub center: Point,
}

impl Tile {
    pub fn sides(&self) -> usize {
        self.edges.len()
    }
}

/// A fully assembled, immutable tiling. Produced once by a
/// [tile generator](crate::tiles) via [`GeometryBuilder`], then shared
/// read-only across solver/generator calls.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub tiles: Vec<Tile>,
    pub board_size: f64,
    pub board_margin: f64,
    pub game_size: f64,
}

impl Geometry {
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Follow a continuation, advancing `direction` so that movement keeps
    /// going away from the vertex shared with `edge`. Mirrors the source's
    /// `goto_next_line`.
    pub fn goto_next(&self, edge: EdgeId, direction: &mut Direction, which: usize) -> Option<EdgeId> {
        let lin = self.edge(edge);
        let next_id = lin.route(*direction, which)?;
        let shared = match direction {
            Direction::In => lin.ends[0],
            Direction::Out => lin.ends[1],
        };
        let next = self.edge(next_id);
        *direction = if next.ends[0] == shared {
            Direction::Out
        } else {
            Direction::In
        };
        Some(next_id)
    }
}
