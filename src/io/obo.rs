//! Reader for OBO flat files
//!
//! # Overview
//!
//! OBO is a line-oriented format: a header of `key: value` lines
//! followed by stanzas opened with `[Term]` or `[Typedef]`. A stanza
//! runs until the next blank line or stanza header. Only the tags the
//! classifier and its reporting need are interpreted; unknown stanza
//! types are skipped whole, unknown tags inside a known stanza are
//! dropped.
//!
//! Trailing `! comment` text after identifiers is stripped, as in
//! `is_a: CHEBI:33839 ! macromolecule`.
use std::io::BufRead;

use crate::error::ElandError;
use crate::model::{IntersectionPart, Ontology, Relationship, Synonym, Term, TypeDef};
use crate::vocab;

enum Stanza {
    Header,
    Term(Term),
    Typedef(TypeDef),
    Other,
}

/// Parses an OBO-format ontology from the given reader.
pub fn read<R: BufRead>(read: &mut R) -> Result<Ontology, ElandError> {
    let mut ont = Ontology::default();
    let mut stanza = Stanza::Header;

    for line in read.lines() {
        let line = line?;
        let line = line.trim_end();

        if line.is_empty() {
            flush(&mut ont, std::mem::replace(&mut stanza, Stanza::Other));
            continue;
        }

        if line.starts_with('[') {
            flush(&mut ont, std::mem::replace(&mut stanza, Stanza::Other));
            stanza = match line {
                "[Term]" => Stanza::Term(Term::default()),
                "[Typedef]" => Stanza::Typedef(TypeDef::default()),
                _ => Stanza::Other,
            };
            continue;
        }

        let Some((key, val)) = line.split_once(": ") else {
            continue;
        };

        match stanza {
            Stanza::Header => header_line(&mut ont, key, val),
            Stanza::Term(ref mut t) => term_line(t, key, val),
            Stanza::Typedef(ref mut td) => typedef_line(td, key, val),
            Stanza::Other => {}
        }
    }
    flush(&mut ont, stanza);

    Ok(ont)
}

fn flush(ont: &mut Ontology, stanza: Stanza) {
    match stanza {
        Stanza::Term(t) => {
            if !t.id.is_empty() {
                ont.terms.push(t);
            }
        }
        Stanza::Typedef(td) => {
            if !td.id.is_empty() {
                ont.typedefs.push(td);
            }
        }
        Stanza::Header | Stanza::Other => {}
    }
}

fn header_line(ont: &mut Ontology, key: &str, val: &str) {
    match key {
        "format-version" => ont.format_version = val.to_string(),
        "data-version" => ont.data_version = val.to_string(),
        "ontology" => ont.ontology = val.to_string(),
        _ => {}
    }
}

fn term_line(t: &mut Term, key: &str, val: &str) {
    match key {
        "id" => t.id = val.to_string(),
        "name" => t.name = val.to_string(),
        "namespace" => t.namespace = val.to_string(),
        "def" => t.definition = parse_quoted(val).to_string(),
        "comment" => t.comment = val.to_string(),
        "subset" => t.subsets.push(val.to_string()),
        "synonym" => t.synonyms.push(parse_synonym(val)),
        "xref" => t.xrefs.push(val.to_string()),
        "alt_id" => t.alt_ids.push(val.to_string()),
        "is_a" => {
            let (id, name) = split_comment(val);
            t.relationships.push(Relationship {
                rel_type: vocab::IS_A.to_string(),
                target_id: id.to_string(),
                name: name.to_string(),
            });
        }
        "relationship" => {
            if let Some(rel) = parse_relationship(val) {
                t.relationships.push(rel);
            }
        }
        "intersection_of" => t.intersection_of.push(parse_intersection_of(val)),
        "is_obsolete" => t.is_obsolete = val == "true",
        "property_value" => {
            if let Some((k, v)) = parse_property_value(val) {
                t.properties.insert(k.to_string(), v.to_string());
            }
        }
        _ => {}
    }
}

fn typedef_line(td: &mut TypeDef, key: &str, val: &str) {
    match key {
        "id" => td.id = val.to_string(),
        "name" => td.name = val.to_string(),
        "is_transitive" => td.is_transitive = val == "true",
        "is_reflexive" => td.is_reflexive = val == "true",
        _ => {}
    }
}

/// Splits `CHEBI:12345 ! some name` into the id and the comment text.
fn split_comment(val: &str) -> (&str, &str) {
    match val.split_once(" ! ") {
        Some((id, name)) => (id.trim_end(), name.trim()),
        None => (val.trim_end(), ""),
    }
}

/// Extracts the text between the first pair of double quotes.
fn parse_quoted(s: &str) -> &str {
    let Some(start) = s.find('"') else {
        return s;
    };
    let rest = &s[start + 1..];
    match rest.find('"') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Parses `"text" SCOPE [xrefs]`, with an optional synonym type between
/// the scope and the xref list.
fn parse_synonym(s: &str) -> Synonym {
    let mut syn = Synonym {
        text: parse_quoted(s).to_string(),
        ..Default::default()
    };

    let Some(start) = s.find('"') else {
        return syn;
    };
    let Some(end) = s[start + 1..].find('"') else {
        return syn;
    };
    let rest = s[start + 1 + end + 1..].trim_start();

    let mut words = rest.split_whitespace();
    if let Some(scope) = words.next() {
        if !scope.starts_with('[') {
            syn.scope = scope.to_string();
        }
    }
    if let Some(syn_type) = words.next() {
        if !syn_type.starts_with('[') {
            syn.syn_type = syn_type.to_string();
        }
    }

    if let (Some(open), Some(close)) = (rest.find('['), rest.rfind(']')) {
        if close > open + 1 {
            syn.xrefs = rest[open + 1..close]
                .split(", ")
                .map(String::from)
                .collect();
        }
    }

    syn
}

/// Parses `type CHEBI:12345 ! name`.
fn parse_relationship(val: &str) -> Option<Relationship> {
    let (val, name) = split_comment(val);
    let (rel_type, target) = val.split_once(' ')?;
    Some(Relationship {
        rel_type: rel_type.to_string(),
        target_id: target.trim().to_string(),
        name: name.to_string(),
    })
}

/// Parses `CHEBI:12345` (genus) or `relationship CHEBI:12345`
/// (differentia).
fn parse_intersection_of(val: &str) -> IntersectionPart {
    let (val, _) = split_comment(val);
    match val.split_once(' ') {
        Some((rel, target)) => IntersectionPart::differentia(rel, target.trim()),
        None => IntersectionPart::genus(val),
    }
}

/// Parses `key value xsd:type` or `key "value" xsd:type`.
fn parse_property_value(val: &str) -> Option<(&str, &str)> {
    let (key, rest) = val.split_once(' ')?;
    let rest = rest.trim_start();
    if rest.starts_with('"') {
        Some((key, parse_quoted(rest)))
    } else {
        Some((key, rest.split_whitespace().next()?))
    }
}
