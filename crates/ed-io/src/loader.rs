//! CSV input loader.
//!
//! # CSV formats
//!
//! Nodes, one row per intersection:
//!
//! ```csv
//! id,lat,lon
//! 101,38.2527,-85.7585
//! ```
//!
//! Edges, one row per directed road segment.  The edge id is the zero-based
//! row index, so row order is significant.
//!
//! ```csv
//! source,target,length,maxspeed,highway,way_ids
//! 101,102,84.2,30 mph,residential,5001
//! 102,103,120.0,,primary,5002;5003
//! ```
//!
//! `way_ids` is `;`-separated: simplification merges runs of ways into one
//! edge.  `maxspeed` is the raw OSM tag and is resolved through a
//! [`SpeedTable`]; an empty `length` stays missing and is rejected by the
//! compiler.
//!
//! Restrictions, one row per relation:
//!
//! ```csv
//! relation_id,kind,from_way,via_node,to_way
//! 9001,no_left_turn,5001,102,5002
//! ```
//!
//! Members may be empty or absent.  Rows with an empty `kind` or a
//! conditional kind (containing `@`) are skipped here.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use ed_compile::TurnRestriction;
use ed_core::{GeoPoint, OsmNodeId, RelationId, WayId};
use ed_network::{EdgeAttrs, PrimalGraph, PrimalGraphBuilder};

use crate::speed::SpeedTable;
use crate::{IoError, IoResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  i64,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    source:   i64,
    target:   i64,
    length:   Option<f64>,
    #[serde(default)]
    maxspeed: Option<String>,
    #[serde(default)]
    highway:  Option<String>,
    #[serde(default)]
    way_ids:  String,
}

#[derive(Deserialize)]
struct RestrictionRecord {
    relation_id: i64,
    #[serde(default)]
    kind:        String,
    #[serde(default)]
    from_way:    Option<i64>,
    #[serde(default)]
    via_node:    Option<i64>,
    #[serde(default)]
    to_way:      Option<i64>,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Load nodes and edges from two CSV files into a [`PrimalGraph`].
pub fn load_graph(nodes: &Path, edges: &Path, speeds: &SpeedTable) -> IoResult<PrimalGraph> {
    load_graph_readers(File::open(nodes)?, File::open(edges)?, speeds)
}

/// Like [`load_graph`] but accepts any `Read` sources.
pub fn load_graph_readers<N: Read, E: Read>(
    nodes:  N,
    edges:  E,
    speeds: &SpeedTable,
) -> IoResult<PrimalGraph> {
    let mut builder = PrimalGraphBuilder::new();

    let mut invalid = 0usize;
    for result in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = result?;
        let pos = GeoPoint::new(row.lat, row.lon);
        if !pos.is_valid() {
            invalid += 1;
        }
        builder.add_node(OsmNodeId(row.id), pos)?;
    }
    if invalid > 0 {
        warn!("{invalid} nodes have out-of-range coordinates");
    }

    let mut defaulted = 0usize;
    for (i, result) in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>().enumerate() {
        let row = result?;
        let speed = speeds.resolve(row.maxspeed.as_deref(), row.highway.as_deref());
        if speed.is_default() {
            defaulted += 1;
        }
        let ways = parse_way_ids(&row.way_ids)
            .map_err(|e| IoError::Parse(format!("edge row {i}: {e}")))?;

        builder.add_edge(
            OsmNodeId(row.source),
            OsmNodeId(row.target),
            EdgeAttrs {
                length_m:     row.length,
                maxspeed_kmh: Some(speed.kmh()),
                way_ids:      ways,
            },
        )?;
    }
    if defaulted > 0 {
        debug!("{defaulted} edges use a highway default speed");
    }

    let graph = builder.build();
    info!("loaded {} nodes, {} edges", graph.node_count(), graph.edge_count());
    Ok(graph)
}

/// Parse a `;`-separated way-id list.  Blank entries are skipped.
pub fn parse_way_ids(s: &str) -> Result<Vec<WayId>, String> {
    s.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<i64>().map(WayId).map_err(|_| format!("bad way id {t:?}")))
        .collect()
}

// ── Restrictions ──────────────────────────────────────────────────────────────

/// Load turn restrictions from a CSV file.
pub fn load_restrictions(path: &Path) -> IoResult<Vec<TurnRestriction>> {
    load_restrictions_reader(File::open(path)?)
}

/// Like [`load_restrictions`] but accepts any `Read` source.
pub fn load_restrictions_reader<R: Read>(reader: R) -> IoResult<Vec<TurnRestriction>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut out = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize::<RestrictionRecord>() {
        let row = result?;
        let kind = row.kind.trim();
        if kind.is_empty() || kind.contains('@') {
            debug!("skipping restriction {} with kind {kind:?}", row.relation_id);
            skipped += 1;
            continue;
        }
        out.push(TurnRestriction {
            relation: RelationId(row.relation_id),
            kind:     kind.to_owned(),
            from_way: row.from_way.map(WayId),
            via_node: row.via_node.map(OsmNodeId),
            to_way:   row.to_way.map(WayId),
        });
    }

    info!("loaded {} restrictions, skipped {skipped} conditional or untyped", out.len());
    Ok(out)
}
