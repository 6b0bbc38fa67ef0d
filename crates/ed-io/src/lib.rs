//! `ed-io`: CSV boundary of the edge-dual compiler.
//!
//! | Module     | Direction | Contents                                           |
//! |------------|-----------|----------------------------------------------------|
//! | `loader`   | in        | nodes, edges and restrictions from CSV             |
//! | `speed`    | in        | raw `maxspeed` → km/h, highway defaults            |
//! | `csv`      | out       | [`CsvWriter`], four tables per network name        |
//!
//! # Usage
//!
//! ```rust,ignore
//! let graph = load_graph(&nodes, &edges, &SpeedTable::default())?;
//! let restrictions = load_restrictions(&restrictions_path)?;
//! let compiled = Compiler::new(config, &index).compile(&graph, &restrictions)?;
//! CsvWriter::new(Path::new("data/output"), "louisville")?.write_compiled(&graph, &compiled)?;
//! ```

pub mod csv;
pub mod error;
pub mod loader;
pub mod row;
pub mod speed;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{IoError, IoResult};
pub use loader::{load_graph, load_graph_readers, load_restrictions, load_restrictions_reader};
pub use row::EdgeRow;
pub use speed::{Speed, SpeedTable, parse_maxspeed};
pub use writer::OutputWriter;
