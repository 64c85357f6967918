//! Reserved names and namespaces shared across the crate

/// External name of the universal concept, reserved at id 0.
pub const OWL_THING: &str = "owl:Thing";

/// External name of the empty concept, reserved at id 1.
pub const OWL_NOTHING: &str = "owl:Nothing";

/// The relationship type interpreted as atomic subsumption rather than
/// as a role.
pub const IS_A: &str = "is_a";

/// XML namespaces recognised by the OWL reader.
pub mod ns {
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OBO: &str = "http://purl.obolibrary.org/obo/";
}

/// Recovers a compact OBO identifier from an OBO Foundry PURL, so that
/// `http://purl.obolibrary.org/obo/CHEBI_15377` becomes `CHEBI:15377`.
/// Fragment identifiers such as `…/obo/chebi#has_part` and IRIs outside
/// the OBO namespace are returned unchanged.
pub fn obo_id_from_iri(iri: &str) -> String {
    match iri.strip_prefix(ns::OBO) {
        Some(id) if !id.contains('#') => match id.find('_') {
            Some(us) => format!("{}:{}", &id[..us], &id[us + 1..]),
            None => id.to_string(),
        },
        Some(id) => id.to_string(),
        None => iri.to_string(),
    }
}
