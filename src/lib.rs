//! eland classifies OWL 2 EL ontologies.
//!
//! # Overview
//!
//! Given the terminological axioms of an EL ontology — atomic
//! subsumptions, existential restrictions, intersection definitions,
//! role hierarchies and compositions — eland computes the complete
//! subsumption relation and the transitively reduced taxonomy of
//! direct parents and children. It is built for ChEBI-scale inputs:
//! a couple of hundred thousand concepts classify in seconds on a
//! single core.
//!
//! The crate splits into three layers:
//!
//! - [`model`] — the parsed, string-keyed form of an ontology;
//! - [`io`] — readers for OBO flat files and OWL RDF/XML, and JSON
//!   renderers for the model and the classified output;
//! - [`reasoner`] — the classification core: symbol interning, the
//!   normalized axiom store, the saturation fixpoint engine and the
//!   taxonomy builder.
//!
//! # Example
//!
//! ```
//! use eland::model::{Ontology, Term};
//! use eland::reasoner::classify;
//!
//! let ont = Ontology::new()
//!     .term(Term::new("CHEBI:17790").is_a("CHEBI:30879"))
//!     .term(Term::new("CHEBI:30879"));
//!
//! let hierarchy = classify(&ont).unwrap();
//! assert_eq!(
//!     hierarchy.concept("CHEBI:17790").unwrap().direct_parents,
//!     vec!["CHEBI:30879"]
//! );
//! ```
pub mod error;
pub mod io;
pub mod model;
pub mod reasoner;
pub mod vocab;

pub use crate::error::ElandError;
pub use crate::reasoner::classify;
