//! The classification core: normalization, saturation and reduction
//!
//! # Overview
//!
//! [`classify`] takes a parsed [`Ontology`](crate::model::Ontology)
//! through the three phases of EL classification:
//!
//! 1. [`normalize`](normalize::normalize) rewrites the raw axioms into
//!    the six canonical forms, interning every name to a dense integer
//!    id and introducing fresh auxiliary concepts where needed;
//! 2. [`saturate`](saturate::saturate) runs the completion rules to a
//!    fixpoint over per-concept contexts;
//! 3. [`Taxonomy::build`](taxonomy::Taxonomy::build) reduces the
//!    saturated supersets to direct parents and children.
//!
//! The phases communicate only through the symbol table, the read-only
//! axiom store and the context array, so each is testable on its own.
pub mod axioms;
pub mod normalize;
pub mod saturate;
pub mod symbol;
pub mod taxonomy;

use std::time::{Duration, Instant};

use crate::error::ElandError;
use crate::model::Ontology;

pub use self::taxonomy::{ClassificationStats, ClassifiedConcept, ClassifiedHierarchy};

/// Classifies an ontology: computes the complete subsumption relation
/// and the transitively reduced taxonomy.
pub fn classify(ont: &Ontology) -> Result<ClassifiedHierarchy, ElandError> {
    classify_with_parse_time(ont, Duration::default())
}

/// As [`classify`], charging an externally measured parse duration to
/// the stats block.
pub fn classify_with_parse_time(
    ont: &Ontology,
    parse_time: Duration,
) -> Result<ClassifiedHierarchy, ElandError> {
    let start = Instant::now();
    let (st, store) = normalize::normalize(ont)?;
    let normalize_time = start.elapsed();

    let start = Instant::now();
    let contexts = saturate::saturate(&store);
    let saturate_time = start.elapsed();

    let start = Instant::now();
    let tax = taxonomy::Taxonomy::build(&contexts, &st);
    let reduction_time = start.elapsed();

    let stats = ClassificationStats::new(&st, parse_time, normalize_time, saturate_time, reduction_time);
    Ok(tax.into_hierarchy(&contexts, &st, stats))
}
