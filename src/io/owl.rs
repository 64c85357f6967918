//! Reader for OWL RDF/XML ontologies
//!
//! # Overview
//!
//! A streaming extraction of the term-level view the classifier needs,
//! not a general RDF parser: `owl:Class` elements yield terms,
//! `owl:ObjectProperty` elements yield typedefs, and the `owl:Ontology`
//! header fills the version fields. Subclass axioms arrive either as a
//! direct `rdfs:subClassOf rdf:resource` (an is_a) or as a nested
//! `owl:Restriction` carrying `owl:onProperty` and `owl:someValuesFrom`
//! (a typed relationship). Anything else inside a class that carries
//! text lands in the term's property map.
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::ElandError;
use crate::model::{Ontology, Relationship, Synonym, Term, TypeDef};
use crate::vocab::{self, ns, obo_id_from_iri};

/// Parses an OWL RDF/XML ontology from the given reader.
pub fn read<R: BufRead>(read: &mut R) -> Result<Ontology, ElandError> {
    let mut reader = NsReader::from_reader(read);

    let mut ont = Ontology::default();
    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (res, Event::Start(e)) => {
                let local = e.local_name();
                if is_ns(&res, ns::OWL) {
                    match local.as_ref() {
                        b"Ontology" => parse_header(&mut reader, &e, &mut ont)?,
                        b"Class" => {
                            let term = parse_class(&mut reader, &e)?;
                            if !term.id.is_empty() {
                                ont.terms.push(term);
                            }
                        }
                        b"ObjectProperty" => {
                            let td = parse_object_property(&mut reader, &e)?;
                            if !td.id.is_empty() {
                                ont.typedefs.push(td);
                            }
                        }
                        _ => {
                            reader.read_to_end_into(e.name(), &mut skip_buf)?;
                        }
                    }
                } else if is_ns(&res, ns::RDF) && local.as_ref() == b"RDF" {
                    // container element, descend
                } else {
                    reader.read_to_end_into(e.name(), &mut skip_buf)?;
                }
            }
            // self-closing classes and properties still carry an id
            (res, Event::Empty(e)) if is_ns(&res, ns::OWL) => match e.local_name().as_ref() {
                b"Class" => {
                    if let Some(about) = attr_value(&reader, &e, ns::RDF, b"about")? {
                        ont.terms.push(Term::new(obo_id_from_iri(&about)));
                    }
                }
                b"ObjectProperty" => {
                    if let Some(about) = attr_value(&reader, &e, ns::RDF, b"about")? {
                        ont.typedefs.push(TypeDef::new(obo_id_from_iri(&about)));
                    }
                }
                _ => {}
            },
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(ont)
}

fn is_ns(res: &ResolveResult, ns: &str) -> bool {
    matches!(res, ResolveResult::Bound(Namespace(b)) if *b == ns.as_bytes())
}

/// The value of the attribute with the given resolved namespace and
/// local name, if present.
fn attr_value<R: BufRead>(
    reader: &NsReader<R>,
    e: &BytesStart,
    ns: &str,
    local: &[u8],
) -> Result<Option<String>, ElandError> {
    for attr in e.attributes() {
        let attr = attr?;
        let (res, attr_local) = reader.resolve_attribute(attr.key);
        if is_ns(&res, ns) && attr_local.as_ref() == local {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Collects the character data up to the end of the current element,
/// descending through nested markup.
fn read_text<R: BufRead>(reader: &mut NsReader<R>) -> Result<String, ElandError> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(text);
                }
                depth -= 1;
            }
            Event::Eof => return Ok(text),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_header<R: BufRead>(
    reader: &mut NsReader<R>,
    start: &BytesStart,
    ont: &mut Ontology,
) -> Result<(), ElandError> {
    if let Some(about) = attr_value(reader, start, ns::RDF, b"about")? {
        ont.ontology = about;
    }

    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();
    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (_, Event::Start(e)) => {
                if e.local_name().as_ref() == b"versionIRI" {
                    if let Some(v) = attr_value(reader, &e, ns::RDF, b"resource")? {
                        ont.data_version = v;
                    }
                }
                reader.read_to_end_into(e.name(), &mut skip_buf)?;
            }
            (_, Event::Empty(e)) => {
                if e.local_name().as_ref() == b"versionIRI" {
                    if let Some(v) = attr_value(reader, &e, ns::RDF, b"resource")? {
                        ont.data_version = v;
                    }
                }
            }
            (_, Event::End(_)) => return Ok(()),
            (_, Event::Eof) => {
                return Err(ElandError::ParserError(
                    "unexpected end of file in owl:Ontology".into(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

fn parse_class<R: BufRead>(
    reader: &mut NsReader<R>,
    start: &BytesStart,
) -> Result<Term, ElandError> {
    let mut term = Term::default();
    if let Some(about) = attr_value(reader, start, ns::RDF, b"about")? {
        term.id = obo_id_from_iri(&about);
    }

    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();
    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (res, Event::Start(e)) => {
                let local = e.local_name().as_ref().to_vec();
                if is_ns(&res, ns::RDFS) && local == b"label" {
                    term.name = read_text(reader)?;
                } else if is_ns(&res, ns::RDFS) && local == b"subClassOf" {
                    match attr_value(reader, &e, ns::RDF, b"resource")? {
                        Some(resource) => {
                            term.relationships.push(is_a(&resource));
                            reader.read_to_end_into(e.name(), &mut skip_buf)?;
                        }
                        None => {
                            let rel = parse_restriction(reader)?;
                            if !rel.rel_type.is_empty() && !rel.target_id.is_empty() {
                                term.relationships.push(rel);
                            }
                        }
                    }
                } else if local == b"inSubset" {
                    if let Some(resource) = attr_value(reader, &e, ns::RDF, b"resource")? {
                        term.subsets.push(obo_id_from_iri(&resource));
                    }
                    reader.read_to_end_into(e.name(), &mut skip_buf)?;
                } else {
                    class_text_element(&mut term, &local, read_text(reader)?);
                }
            }
            (res, Event::Empty(e)) => {
                let local = e.local_name();
                if is_ns(&res, ns::RDFS) && local.as_ref() == b"subClassOf" {
                    if let Some(resource) = attr_value(reader, &e, ns::RDF, b"resource")? {
                        term.relationships.push(is_a(&resource));
                    }
                } else if local.as_ref() == b"inSubset" {
                    if let Some(resource) = attr_value(reader, &e, ns::RDF, b"resource")? {
                        term.subsets.push(obo_id_from_iri(&resource));
                    }
                }
            }
            (_, Event::End(_)) => return Ok(term),
            (_, Event::Eof) => {
                return Err(ElandError::ParserError(
                    "unexpected end of file in owl:Class".into(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

fn is_a(resource: &str) -> Relationship {
    Relationship {
        rel_type: vocab::IS_A.to_string(),
        target_id: obo_id_from_iri(resource),
        name: String::new(),
    }
}

/// Dispatches a text-carrying element inside an `owl:Class`.
fn class_text_element(term: &mut Term, local: &[u8], text: String) {
    match local {
        b"deprecated" => term.is_obsolete = text == "true",
        b"hasAlternativeId" => term.alt_ids.push(text),
        b"Definition" | b"definition" => term.definition = text,
        b"comment" => term.comment = text,
        b"hasDbXref" | b"hasDbXRef" => term.xrefs.push(text),
        b"hasExactSynonym" => term.synonyms.push(synonym(text, "EXACT")),
        b"hasBroadSynonym" => term.synonyms.push(synonym(text, "BROAD")),
        b"hasNarrowSynonym" => term.synonyms.push(synonym(text, "NARROW")),
        b"hasRelatedSynonym" => term.synonyms.push(synonym(text, "RELATED")),
        _ => {
            if !text.is_empty() {
                term.properties
                    .insert(String::from_utf8_lossy(local).into_owned(), text);
            }
        }
    }
}

fn synonym(text: String, scope: &str) -> Synonym {
    Synonym {
        text,
        scope: scope.to_string(),
        ..Default::default()
    }
}

/// Parses the content of an `rdfs:subClassOf` holding an
/// `owl:Restriction` and returns the relationship it encodes. Consumes
/// events through the closing `rdfs:subClassOf` tag.
fn parse_restriction<R: BufRead>(reader: &mut NsReader<R>) -> Result<Relationship, ElandError> {
    let mut rel = Relationship::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (res, Event::Start(e)) => {
                let in_owl_ns = is_ns(&res, ns::OWL);
                restriction_part(reader, in_owl_ns, &e, &mut rel)?;
                depth += 1;
            }
            (res, Event::Empty(e)) => {
                let in_owl_ns = is_ns(&res, ns::OWL);
                restriction_part(reader, in_owl_ns, &e, &mut rel)?;
            }
            (_, Event::End(_)) => {
                if depth == 0 {
                    return Ok(rel);
                }
                depth -= 1;
            }
            (_, Event::Eof) => {
                return Err(ElandError::ParserError(
                    "unexpected end of file in owl:Restriction".into(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

fn restriction_part<R: BufRead>(
    reader: &NsReader<R>,
    in_owl_ns: bool,
    e: &BytesStart,
    rel: &mut Relationship,
) -> Result<(), ElandError> {
    if !in_owl_ns {
        return Ok(());
    }
    match e.local_name().as_ref() {
        b"onProperty" => {
            if let Some(resource) = attr_value(reader, e, ns::RDF, b"resource")? {
                rel.rel_type = obo_id_from_iri(&resource);
            }
        }
        b"someValuesFrom" => {
            if let Some(resource) = attr_value(reader, e, ns::RDF, b"resource")? {
                rel.target_id = obo_id_from_iri(&resource);
            }
        }
        _ => {}
    }
    Ok(())
}

fn parse_object_property<R: BufRead>(
    reader: &mut NsReader<R>,
    start: &BytesStart,
) -> Result<TypeDef, ElandError> {
    let mut td = TypeDef::default();
    if let Some(about) = attr_value(reader, start, ns::RDF, b"about")? {
        td.id = obo_id_from_iri(&about);
    }

    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();
    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (res, Event::Start(e)) => {
                if is_ns(&res, ns::RDF) && e.local_name().as_ref() == b"type" {
                    property_type(reader, &e, &mut td)?;
                    reader.read_to_end_into(e.name(), &mut skip_buf)?;
                } else if is_ns(&res, ns::RDFS) && e.local_name().as_ref() == b"label" {
                    td.name = read_text(reader)?;
                } else {
                    reader.read_to_end_into(e.name(), &mut skip_buf)?;
                }
            }
            (res, Event::Empty(e)) => {
                if is_ns(&res, ns::RDF) && e.local_name().as_ref() == b"type" {
                    property_type(reader, &e, &mut td)?;
                }
            }
            (_, Event::End(_)) => return Ok(td),
            (_, Event::Eof) => {
                return Err(ElandError::ParserError(
                    "unexpected end of file in owl:ObjectProperty".into(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

fn property_type<R: BufRead>(
    reader: &NsReader<R>,
    e: &BytesStart,
    td: &mut TypeDef,
) -> Result<(), ElandError> {
    if let Some(resource) = attr_value(reader, e, ns::RDF, b"resource")? {
        if resource == format!("{}TransitiveProperty", ns::OWL) {
            td.is_transitive = true;
        } else if resource == format!("{}ReflexiveProperty", ns::OWL) {
            td.is_reflexive = true;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::BufReader;

    fn parse(s: &str) -> Ontology {
        read(&mut BufReader::new(s.as_bytes())).unwrap()
    }

    const DOC: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#"
         xmlns:oboInOwl="http://www.geneontology.org/formats/oboInOwl#">
  <owl:Ontology rdf:about="http://purl.obolibrary.org/obo/chebi.owl">
    <owl:versionIRI rdf:resource="http://purl.obolibrary.org/obo/chebi/235/chebi.owl"/>
  </owl:Ontology>
  <owl:ObjectProperty rdf:about="http://purl.obolibrary.org/obo/chebi#has_part">
    <rdf:type rdf:resource="http://www.w3.org/2002/07/owl#TransitiveProperty"/>
    <rdfs:label>has part</rdfs:label>
  </owl:ObjectProperty>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/CHEBI_33839">
    <rdfs:subClassOf rdf:resource="http://purl.obolibrary.org/obo/CHEBI_36080"/>
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="http://purl.obolibrary.org/obo/chebi#has_part"/>
        <owl:someValuesFrom rdf:resource="http://purl.obolibrary.org/obo/CHEBI_33708"/>
      </owl:Restriction>
    </rdfs:subClassOf>
    <rdfs:label>macromolecule</rdfs:label>
    <oboInOwl:hasExactSynonym>polymer molecule</oboInOwl:hasExactSynonym>
    <owl:deprecated>false</owl:deprecated>
  </owl:Class>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/CHEBI_36080">
    <rdfs:label>biological macromolecule</rdfs:label>
    <owl:deprecated>true</owl:deprecated>
  </owl:Class>
</rdf:RDF>
"#;

    #[test]
    fn test_header() {
        let ont = parse(DOC);
        assert_eq!(ont.ontology, "http://purl.obolibrary.org/obo/chebi.owl");
        assert_eq!(
            ont.data_version,
            "http://purl.obolibrary.org/obo/chebi/235/chebi.owl"
        );
    }

    #[test]
    fn test_classes() {
        let ont = parse(DOC);
        assert_eq!(ont.terms.len(), 2);

        let t = &ont.terms[0];
        assert_eq!(t.id, "CHEBI:33839");
        assert_eq!(t.name, "macromolecule");
        assert!(!t.is_obsolete);
        assert_eq!(t.synonyms[0].text, "polymer molecule");
        assert_eq!(t.synonyms[0].scope, "EXACT");

        assert!(ont.terms[1].is_obsolete);
    }

    #[test]
    fn test_subclass_axioms() {
        let ont = parse(DOC);
        let rels = &ont.terms[0].relationships;
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].rel_type, "is_a");
        assert_eq!(rels[0].target_id, "CHEBI:36080");
        assert_eq!(rels[1].rel_type, "chebi#has_part");
        assert_eq!(rels[1].target_id, "CHEBI:33708");
    }

    #[test]
    fn test_object_property() {
        let ont = parse(DOC);
        assert_eq!(ont.typedefs.len(), 1);
        assert_eq!(ont.typedefs[0].id, "chebi#has_part");
        assert_eq!(ont.typedefs[0].name, "has part");
        assert!(ont.typedefs[0].is_transitive);
        assert!(!ont.typedefs[0].is_reflexive);
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
           xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:AnnotationProperty rdf:about="http://example.com/p"/>
  <owl:Axiom><rdf:something>deep</rdf:something></owl:Axiom>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/CHEBI_1"/>
</rdf:RDF>"#;
        let ont = parse(doc);
        assert_eq!(ont.terms.len(), 1);
        assert_eq!(ont.terms[0].id, "CHEBI:1");
    }
}
