//! Plain row types written by output backends.
//!
//! Tabular conventions: a missing cell is `0`, a sentinel locality is `-1`.

use ed_compile::{CellId, EdgeTags, ShortcutEntry};
use ed_core::{EdgeId, OsmNodeId};
use ed_network::PrimalGraph;

/// Cell column value: the raw 64-bit id in decimal, or `0` (the H3 null
/// index) when no cell could be computed.
pub fn cell_field(cell: Option<CellId>) -> String {
    cell.map_or(0, |c| c.0).to_string()
}

/// One row of the enriched edge table.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub id:            EdgeId,
    pub source:        OsmNodeId,
    pub target:        OsmNodeId,
    /// Metres; `None` only if the graph was built without one.
    pub length:        Option<f64>,
    /// km/h after speed resolution.
    pub maxspeed:      Option<f64>,
    pub incoming_cell: Option<CellId>,
    pub outgoing_cell: Option<CellId>,
    pub lca_res:       i8,
    pub cost:          f64,
}

impl EdgeRow {
    /// Join the graph's edge attributes with the compiler's tags.
    pub fn new(graph: &PrimalGraph, tags: &EdgeTags, edge: EdgeId) -> Self {
        let (s, t) = graph.endpoints(edge);
        let i = edge.index();
        Self {
            id:            edge,
            source:        graph.node_osm[s.index()],
            target:        graph.node_osm[t.index()],
            length:        graph.edge_length_m[i],
            maxspeed:      graph.edge_maxspeed_kmh[i],
            incoming_cell: tags.incoming_cell[i],
            outgoing_cell: tags.outgoing_cell[i],
            lca_res:       tags.locality[i].as_i8(),
            cost:          tags.cost[i],
        }
    }

    pub fn to_record(&self) -> [String; 9] {
        let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        [
            self.id.0.to_string(),
            self.source.0.to_string(),
            self.target.0.to_string(),
            opt(self.length),
            opt(self.maxspeed),
            cell_field(self.incoming_cell),
            cell_field(self.outgoing_cell),
            self.lca_res.to_string(),
            self.cost.to_string(),
        ]
    }
}

/// Shortcut table row in its written form.
pub fn shortcut_record(row: &ShortcutEntry) -> [String; 5] {
    [
        row.incoming.0.to_string(),
        row.via_edge.0.to_string(),
        row.cost.to_string(),
        cell_field(row.via_cell),
        row.lca_res.as_i8().to_string(),
    ]
}
