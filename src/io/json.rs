//! JSON renderers for the parsed ontology and the classified hierarchy
use std::io::{BufWriter, Write};

use crate::error::ElandError;
use crate::model::Ontology;
use crate::reasoner::ClassifiedHierarchy;

const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Writes the parsed ontology as JSON.
pub fn write_ontology<W: Write>(write: W, ont: &Ontology, pretty: bool) -> Result<(), ElandError> {
    let mut w = BufWriter::with_capacity(WRITE_BUFFER_SIZE, write);
    if pretty {
        serde_json::to_writer_pretty(&mut w, ont)?;
    } else {
        serde_json::to_writer(&mut w, ont)?;
    }
    w.write_all(b"\n")?;
    Ok(w.flush()?)
}

/// Writes a classified hierarchy as JSON.
pub fn write_hierarchy<W: Write>(
    write: W,
    hierarchy: &ClassifiedHierarchy,
    pretty: bool,
) -> Result<(), ElandError> {
    let mut w = BufWriter::with_capacity(WRITE_BUFFER_SIZE, write);
    if pretty {
        serde_json::to_writer_pretty(&mut w, hierarchy)?;
    } else {
        serde_json::to_writer(&mut w, hierarchy)?;
    }
    w.write_all(b"\n")?;
    Ok(w.flush()?)
}
