//! Parsers and renderers for ontology formats
pub mod json;
pub mod obo;
pub mod owl;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ElandError;
use crate::model::Ontology;

/// The input formats eland understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResourceType {
    Obo,
    Owl,
}

/// Guesses the resource type from a file extension.
pub fn path_type(path: &Path) -> Option<ResourceType> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("obo") => Some(ResourceType::Obo),
        Some("owl") | Some("rdf") | Some("xml") => Some(ResourceType::Owl),
        _ => None,
    }
}

/// Parses an ontology from a path, detecting the format from the
/// extension.
pub fn parse_path(path: &Path) -> Result<Ontology, ElandError> {
    match path_type(path) {
        Some(typ) => {
            let file = File::open(path)?;
            let mut bufreader = BufReader::new(file);
            parse_read(&mut bufreader, typ)
        }
        None => Err(ElandError::CommandError(format!(
            "Cannot parse a file of this format: {:?}",
            path
        ))),
    }
}

/// Parses an ontology from a reader in the given format.
pub fn parse_read<R: std::io::BufRead>(
    read: &mut R,
    typ: ResourceType,
) -> Result<Ontology, ElandError> {
    match typ {
        ResourceType::Obo => obo::read(read),
        ResourceType::Owl => owl::read(read),
    }
}
