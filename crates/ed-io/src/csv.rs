//! CSV output backend.
//!
//! Creates four files in the output directory, each prefixed with the
//! network name:
//! - `<name>_edge_graph.csv`
//! - `<name>_shortcut_table.csv`
//! - `<name>_edges_with_cells.csv`
//! - `<name>_forbidden_turns.csv`

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::info;

use ed_compile::{DualGraph, EdgeTags, ForbiddenTurns, ShortcutEntry};
use ed_network::PrimalGraph;

use crate::row::{EdgeRow, shortcut_record};
use crate::writer::OutputWriter;
use crate::IoResult;

pub const EDGE_GRAPH_HEADER: [&str; 2] = ["incoming_edge", "outgoing_edge"];
pub const SHORTCUT_HEADER: [&str; 5] = ["incoming_edge", "via_edge", "cost", "via_cell", "lca_res"];
pub const EDGES_HEADER: [&str; 9] = [
    "id", "source", "target", "length", "maxspeed",
    "incoming_cell", "outgoing_cell", "lca_res", "cost",
];
pub const FORBIDDEN_HEADER: [&str; 2] = ["incoming_edge", "outgoing_edge"];

/// Writes compiler output to four CSV files.
pub struct CsvWriter {
    edge_graph: Writer<File>,
    shortcuts:  Writer<File>,
    edges:      Writer<File>,
    forbidden:  Writer<File>,
    dir:        PathBuf,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the four files and write their headers.
    pub fn new(dir: &Path, name: &str) -> IoResult<Self> {
        std::fs::create_dir_all(dir)?;
        let open = |suffix: &str, header: &[&str]| -> IoResult<Writer<File>> {
            let mut w = Writer::from_path(dir.join(format!("{name}_{suffix}.csv")))?;
            w.write_record(header)?;
            Ok(w)
        };

        Ok(Self {
            edge_graph: open("edge_graph", &EDGE_GRAPH_HEADER)?,
            shortcuts:  open("shortcut_table", &SHORTCUT_HEADER)?,
            edges:      open("edges_with_cells", &EDGES_HEADER)?,
            forbidden:  open("forbidden_turns", &FORBIDDEN_HEADER)?,
            dir:        dir.to_path_buf(),
            finished:   false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_edge_graph(&mut self, dual: &DualGraph) -> IoResult<()> {
        for d in dual.edges() {
            self.edge_graph.write_record([d.incoming.0.to_string(), d.outgoing.0.to_string()])?;
        }
        Ok(())
    }

    fn write_shortcuts(&mut self, rows: &[ShortcutEntry]) -> IoResult<()> {
        for row in rows {
            self.shortcuts.write_record(shortcut_record(row))?;
        }
        Ok(())
    }

    fn write_edges(&mut self, graph: &PrimalGraph, tags: &EdgeTags) -> IoResult<()> {
        for e in graph.edges() {
            self.edges.write_record(EdgeRow::new(graph, tags, e).to_record())?;
        }
        Ok(())
    }

    fn write_forbidden(&mut self, forbidden: &ForbiddenTurns) -> IoResult<()> {
        for (a, b) in forbidden.sorted() {
            self.forbidden.write_record([a.0.to_string(), b.0.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.edge_graph.flush()?;
        self.shortcuts.flush()?;
        self.edges.flush()?;
        self.forbidden.flush()?;
        info!("wrote output tables to {}", self.dir.display());
        Ok(())
    }
}
