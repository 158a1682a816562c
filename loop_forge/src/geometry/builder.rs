use super::{Edge, EdgeId, Geometry, Point, Tile, TileId, Vertex, VertexId};
use crate::error::{BuilderError, GeometryError};

/// Assembles a [`Geometry`] from a stream of polygons (tiles), deduplicating
/// vertices and edges within a tolerance. Configure with the fluent `with_*`
/// setters, then ingest tiles with [`add_tile`](Self::add_tile) and finish
/// with [`build`](Self::build). Mirrors `GridWalker2DBuilder`'s shape.
///
/// Mirrors the source's `*_add_tile` family (e.g. `qbert_add_tile`): each
/// call to [`add_tile`](Self::add_tile) searches the existing vertex/edge
/// tables by tolerance before appending anything new. The tolerance (`eps`)
/// must be fixed before the first tile is ingested and never changed
/// afterwards, or vertex dedup becomes inconsistent (see SPEC_FULL.md §9).
#[derive(Default)]
pub struct GeometryBuilder {
    eps_sq: Option<f64>,
    board_size: Option<f64>,
    board_margin: Option<f64>,
    vertex_pos: Vec<Point>,
    vertex_tiles: Vec<Vec<TileId>>,
    edge_ends: Vec<[VertexId; 2]>,
    edge_tiles: Vec<Vec<TileId>>,
    tiles: Vec<Tile>,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `eps` is the absolute tolerance (not squared) below which two points
    /// are considered the same vertex; the source sets it to roughly
    /// `side_length / 10`. Must be set before the first [`add_tile`](Self::add_tile) call.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps_sq = Some(eps * eps);
        self
    }

    pub fn with_board_size(mut self, board_size: f64) -> Self {
        self.board_size = Some(board_size);
        self
    }

    pub fn with_board_margin(mut self, board_margin: f64) -> Self {
        self.board_margin = Some(board_margin);
        self
    }

    fn find_or_insert_vertex(&mut self, p: Point) -> VertexId {
        let eps_sq = self.eps_sq.unwrap_or(0.0);
        // Search backwards: the most recently added vertices are the ones
        // most likely to be reused by the next tile in a generator's
        // sweep order.
        for i in (0..self.vertex_pos.len()).rev() {
            if self.vertex_pos[i].close(&p, eps_sq) {
                return VertexId(i);
            }
        }
        let id = VertexId(self.vertex_pos.len());
        self.vertex_pos.push(p);
        self.vertex_tiles.push(Vec::new());
        id
    }

    fn find_or_insert_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        for i in (0..self.edge_ends.len()).rev() {
            let [e0, e1] = self.edge_ends[i];
            if (e0 == a && e1 == b) || (e0 == b && e1 == a) {
                return EdgeId(i);
            }
        }
        let id = EdgeId(self.edge_ends.len());
        self.edge_ends.push([a, b]);
        self.edge_tiles.push(Vec::new());
        id
    }

    /// Ingest one polygon tile. `points` is the ordered cycle of vertex
    /// coordinates; side `i` runs from `points[i]` to `points[(i+1) % n]`.
    /// The tile's center is the centroid unless `center` is given.
    pub fn add_tile(&mut self, points: &[Point], center: Option<Point>) -> Result<TileId, GeometryError> {
        let n = points.len();
        let vertex_ids: Vec<VertexId> = points.iter().map(|p| self.find_or_insert_vertex(*p)).collect();

        let mut edge_ids = Vec::with_capacity(n);
        for i in 0..n {
            let a = vertex_ids[i];
            let b = vertex_ids[(i + 1) % n];
            edge_ids.push(self.find_or_insert_edge(a, b));
        }

        let tile_id = TileId(self.tiles.len());
        for &v in &vertex_ids {
            self.vertex_tiles[v.index()].push(tile_id);
        }
        for &e in &edge_ids {
            let touching = &mut self.edge_tiles[e.index()];
            if !touching.contains(&tile_id) {
                touching.push(tile_id);
            }
            if touching.len() > 2 {
                return Err(GeometryError::Invalid(format!(
                    "edge {} would be shared by more than 2 tiles",
                    e.index()
                )));
            }
        }

        let center = center.unwrap_or_else(|| Point::centroid(points));
        self.tiles.push(Tile {
            id: tile_id,
            vertices: vertex_ids,
            edges: edge_ids,
            center,
        });
        Ok(tile_id)
    }

    /// Finalize the assembled geometry: link every vertex to its incident
    /// edges, then build the per-edge `in`/`out` continuation lists.
    pub fn build(self) -> Result<Geometry, GeometryError> {
        let mut error = BuilderError::new();
        if self.eps_sq.is_none() {
            error.add_missing_field("eps");
        }
        if self.board_size.is_none() {
            error.add_missing_field("board_size");
        }
        if self.board_margin.is_none() {
            error.add_missing_field("board_margin");
        }
        error.try_throw().map_err(GeometryError::MissingField)?;

        let board_size = self.board_size.unwrap();
        let board_margin = self.board_margin.unwrap();
        let game_size = board_size - 2.0 * board_margin;

        let nverts = self.vertex_pos.len();
        let nedges = self.edge_ends.len();

        let mut vertex_edges: Vec<Vec<EdgeId>> = vec![Vec::new(); nverts];
        for (i, ends) in self.edge_ends.iter().enumerate() {
            vertex_edges[ends[0].index()].push(EdgeId(i));
            if ends[1] != ends[0] {
                vertex_edges[ends[1].index()].push(EdgeId(i));
            }
        }

        let mut edges = Vec::with_capacity(nedges);
        for i in 0..nedges {
            let ends = self.edge_ends[i];
            let ins: Vec<EdgeId> = vertex_edges[ends[0].index()]
                .iter()
                .copied()
                .filter(|&e| e.index() != i)
                .collect();
            let outs: Vec<EdgeId> = vertex_edges[ends[1].index()]
                .iter()
                .copied()
                .filter(|&e| e.index() != i)
                .collect();
            edges.push(Edge {
                id: EdgeId(i),
                ends,
                tiles: self.edge_tiles[i].clone(),
                ins,
                outs,
            });
        }

        let vertices: Vec<Vertex> = (0..nverts)
            .map(|i| Vertex {
                id: VertexId(i),
                pos: self.vertex_pos[i],
                edges: vertex_edges[i].clone(),
                tiles: self.vertex_tiles[i].clone(),
            })
            .collect();

        for v in &vertices {
            if v.edges.is_empty() {
                return Err(GeometryError::Invalid(format!("vertex {} is isolated", v.id.index())));
            }
        }

        Ok(Geometry {
            vertices,
            edges,
            tiles: self.tiles,
            board_size,
            board_margin,
            game_size,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> [Point; 4] {
        [
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ]
    }

    #[test]
    fn build_without_board_margin_reports_missing_field() {
        let mut b = GeometryBuilder::new().with_eps(0.1).with_board_size(10.0);
        b.add_tile(&square(0.0, 0.0, 1.0), None).unwrap();
        match b.build().unwrap_err() {
            GeometryError::MissingField(e) => assert!(e.to_string().contains("board_margin")),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn two_adjacent_squares_share_one_edge() {
        let mut b = GeometryBuilder::new().with_eps(0.1).with_board_size(10.0).with_board_margin(0.0);
        b.add_tile(&square(0.0, 0.0, 1.0), None).unwrap();
        b.add_tile(&square(1.0, 0.0, 1.0), None).unwrap();
        let geo = b.build().unwrap();

        assert_eq!(geo.num_tiles(), 2);
        assert_eq!(geo.num_vertices(), 6);
        assert_eq!(geo.num_edges(), 7);

        let shared = geo
            .edges
            .iter()
            .filter(|e| e.tiles.len() == 2)
            .count();
        assert_eq!(shared, 1);
    }

    #[test]
    fn third_tile_on_an_edge_is_rejected() {
        let mut b = GeometryBuilder::new().with_eps(0.1).with_board_size(10.0).with_board_margin(0.0);
        // Three identical squares at the same spot all share all 4 edges.
        b.add_tile(&square(0.0, 0.0, 1.0), None).unwrap();
        b.add_tile(&square(0.0, 0.0, 1.0), None).unwrap();
        let err = b.add_tile(&square(0.0, 0.0, 1.0), None).unwrap_err();
        assert!(matches!(err, GeometryError::Invalid(_)));
    }

    #[test]
    fn in_out_partition_the_vertex_star() {
        let mut b = GeometryBuilder::new().with_eps(0.1).with_board_size(10.0).with_board_margin(0.0);
        b.add_tile(&square(0.0, 0.0, 1.0), None).unwrap();
        let geo = b.build().unwrap();

        for edge in &geo.edges {
            let mut seen: Vec<_> = edge.ins.iter().chain(edge.outs.iter()).collect();
            seen.sort_by_key(|e| e.index());
            let mut star: Vec<_> = geo
                .vertex(edge.ends[0])
                .edges
                .iter()
                .chain(geo.vertex(edge.ends[1]).edges.iter())
                .filter(|&&e| e != edge.id)
                .collect();
            star.sort_by_key(|e| e.index());
            star.dedup();
            assert_eq!(seen, star);

            let ins: std::collections::HashSet<_> = edge.ins.iter().collect();
            let outs: std::collections::HashSet<_> = edge.outs.iter().collect();
            assert!(ins.is_disjoint(&outs));
        }
    }
}
