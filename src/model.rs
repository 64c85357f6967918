//! The abstract ontology model consumed by the classifier
//!
//! # Overview
//!
//! This module holds the parsed form of an ontology before any
//! normalization has happened: a flat sequence of terms, each with its
//! typed relationships and optional intersection definition, plus the
//! typedefs describing the object properties. Both the OBO and the OWL
//! readers in [`crate::io`] produce this model, and the classifier in
//! [`crate::reasoner`] consumes it.
//!
//! The model is deliberately dumb: identifiers are strings and no
//! resolution or interning happens here. The reasoner's symbol table
//! owns the mapping to dense integer ids.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parsed ontology.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ontology {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ontology: String,
    pub terms: Vec<Term>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub typedefs: Vec<TypeDef>,
}

/// An OBO Typedef stanza or OWL object property declaration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_transitive: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_reflexive: bool,
}

/// One part of an `intersection_of` definition. An empty `relationship`
/// marks a genus (a plain class); otherwise the part is a differentia
/// `∃relationship.target_id`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IntersectionPart {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub relationship: String,
    pub target_id: String,
}

/// A typed relationship to another term.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// A term synonym with its scope.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Synonym {
    pub text: String,
    /// EXACT, BROAD, NARROW or RELATED.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub syn_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<String>,
}

/// A single ontology term.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Term {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub definition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_obsolete: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<Synonym>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intersection_of: Vec<IntersectionPart>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Term {
    /// Constructs a new `Term` with the given identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eland::model::*;
    /// let t = Term::new("CHEBI:15377");
    /// assert_eq!(t.id, "CHEBI:15377");
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Term {
        Term {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Adds an `is_a` relationship to the given target.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eland::model::*;
    /// let t = Term::new("CHEBI:33839").is_a("CHEBI:36080");
    /// assert_eq!(t.relationships[0].rel_type, "is_a");
    /// ```
    pub fn is_a<S: Into<String>>(mut self, target: S) -> Term {
        self.relationships.push(Relationship {
            rel_type: crate::vocab::IS_A.to_string(),
            target_id: target.into(),
            name: String::new(),
        });
        self
    }

    /// Adds a typed relationship to the given target.
    pub fn relationship<S: Into<String>, T: Into<String>>(mut self, rel_type: S, target: T) -> Term {
        self.relationships.push(Relationship {
            rel_type: rel_type.into(),
            target_id: target.into(),
            name: String::new(),
        });
        self
    }

    /// Adds an `intersection_of` part.
    pub fn intersection(mut self, part: IntersectionPart) -> Term {
        self.intersection_of.push(part);
        self
    }

    /// Marks the term obsolete.
    pub fn obsolete(mut self) -> Term {
        self.is_obsolete = true;
        self
    }
}

impl IntersectionPart {
    /// A genus part: a plain class.
    pub fn genus<S: Into<String>>(target: S) -> IntersectionPart {
        IntersectionPart {
            relationship: String::new(),
            target_id: target.into(),
        }
    }

    /// A differentia part: `∃relationship.target`.
    pub fn differentia<S: Into<String>, T: Into<String>>(
        relationship: S,
        target: T,
    ) -> IntersectionPart {
        IntersectionPart {
            relationship: relationship.into(),
            target_id: target.into(),
        }
    }

    /// Returns true if this part is a genus.
    pub fn is_genus(&self) -> bool {
        self.relationship.is_empty()
    }
}

impl TypeDef {
    /// Constructs a new `TypeDef` with the given identifier.
    pub fn new<S: Into<String>>(id: S) -> TypeDef {
        TypeDef {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Marks the property transitive.
    pub fn transitive(mut self) -> TypeDef {
        self.is_transitive = true;
        self
    }

    /// Marks the property reflexive.
    pub fn reflexive(mut self) -> TypeDef {
        self.is_reflexive = true;
        self
    }
}

impl Ontology {
    /// Constructs an empty `Ontology`.
    pub fn new() -> Ontology {
        Ontology::default()
    }

    /// Adds a term, passing `self` back for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eland::model::*;
    /// let o = Ontology::new()
    ///     .term(Term::new("CHEBI:1").is_a("CHEBI:2"))
    ///     .term(Term::new("CHEBI:2"));
    /// assert_eq!(o.terms.len(), 2);
    /// ```
    pub fn term(mut self, t: Term) -> Ontology {
        self.terms.push(t);
        self
    }

    /// Adds a typedef, passing `self` back for chaining.
    pub fn typedef(mut self, td: TypeDef) -> Ontology {
        self.typedefs.push(td);
        self
    }
}
