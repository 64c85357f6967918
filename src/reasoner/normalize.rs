//! Transforms the input ontology into the six normal forms
//!
//! # Overview
//!
//! Arbitrary EL axioms are rewritten into the canonical forms the
//! saturation rules recognise, introducing fresh auxiliary concepts
//! where the grammar requires them. The pass is split in two: a first
//! sweep interns every concept and role mentioned anywhere in the
//! input, then a second sweep emits axioms, looking names up rather
//! than interning. A name missing in the second sweep is a bug in the
//! front end, not user data, and surfaces as a validity error.
//!
//! `intersection_of` blocks are equivalences `C ≡ P₁ ⊓ … ⊓ Pₖ`. Only
//! the reverse direction `P₁ ⊓ … ⊓ Pₖ ⊑ C` is emitted here: OBO-style
//! inputs duplicate every part as a standalone is_a/relationship line,
//! which already carries the forward direction. Inputs that do not
//! duplicate the parts lose the forward entailments.
use log::{debug, warn};

use super::axioms::AxiomStore;
use super::symbol::{ConceptId, RoleId, SymbolTable};
use crate::error::{invalid, ElandError};
use crate::model::{IntersectionPart, Ontology};
use crate::vocab;

/// Converts a parsed ontology into a symbol table and a normalized
/// axiom store ready for saturation.
pub fn normalize(ont: &Ontology) -> Result<(SymbolTable, AxiomStore), ElandError> {
    let mut st = SymbolTable::with_capacity(ont.terms.len(), ont.typedefs.len());

    // First sweep: register every concept and role id.
    for t in &ont.terms {
        if t.is_obsolete {
            continue;
        }
        st.intern_concept(&t.id);
        for rel in &t.relationships {
            if rel.rel_type != vocab::IS_A {
                st.intern_role(&rel.rel_type);
            }
            st.intern_concept(&rel.target_id);
        }
        for part in &t.intersection_of {
            if !part.is_genus() {
                st.intern_role(&part.relationship);
            }
            st.intern_concept(&part.target_id);
        }
    }
    for td in &ont.typedefs {
        st.intern_role(&td.id);
    }

    let mut store = AxiomStore::new(&st);

    // Role properties from the typedefs.
    for td in &ont.typedefs {
        let rid = role(&st, &td.id)?;
        if td.is_transitive {
            store.set_transitive(rid);
        }
        if td.is_reflexive {
            store.set_reflexive(rid);
        }
    }

    // Second sweep: emit axioms.
    for t in &ont.terms {
        if t.is_obsolete {
            debug!("skipping obsolete term {}", t.id);
            continue;
        }
        let cid = concept(&st, &t.id)?;

        for rel in &t.relationships {
            let target = concept(&st, &rel.target_id)?;
            if rel.rel_type == vocab::IS_A {
                // NF1: C ⊑ target
                store.add_subsumption(cid, target);
            } else {
                // NF3: C ⊑ ∃R.target
                let rid = role(&st, &rel.rel_type)?;
                store.add_exist_right(cid, rid, target);
            }
        }

        if !t.intersection_of.is_empty() {
            normalize_intersection(&mut st, &mut store, cid, &t.id, &t.intersection_of)?;
        }
    }

    // Account for fresh concepts allocated above.
    store.grow(st.concept_count());
    store.grow_roles(st.role_count());

    Ok((st, store))
}

/// Emits the reverse direction of an `intersection_of` equivalence:
/// `P₁ ⊓ P₂ ⊓ … ⊑ C`, folded left through fresh intermediates so that
/// every stored conjunction is binary. Each differentia `∃R.F` gets a
/// fresh concept X with NF4 `∃R.F ⊑ X` standing in as its conjunct.
fn normalize_intersection(
    st: &mut SymbolTable,
    store: &mut AxiomStore,
    cid: ConceptId,
    term_id: &str,
    parts: &[IntersectionPart],
) -> Result<(), ElandError> {
    let mut conjuncts: Vec<ConceptId> = Vec::with_capacity(parts.len());

    for part in parts {
        if part.is_genus() {
            conjuncts.push(concept(st, &part.target_id)?);
        } else {
            let rid = role(st, &part.relationship)?;
            let filler = concept(st, &part.target_id)?;
            let fresh = st.fresh_concept();
            store.grow(st.concept_count());
            store.add_exist_left(rid, filler, fresh);
            conjuncts.push(fresh);
        }
    }

    if conjuncts.is_empty() {
        return Ok(());
    }
    if conjuncts.len() == 1 {
        warn!(
            "intersection_of with a single part on {}; treating as plain subsumption",
            term_id
        );
        store.add_subsumption(conjuncts[0], cid);
        return Ok(());
    }

    // Left fold: ((c0 ⊓ c1) ⊓ c2) ⊓ … ⊑ C, the final conjunction
    // targeting the defined concept itself.
    let mut acc = conjuncts[0];
    for (i, &next) in conjuncts.iter().enumerate().skip(1) {
        let result = if i == conjuncts.len() - 1 {
            cid
        } else {
            let fresh = st.fresh_concept();
            store.grow(st.concept_count());
            fresh
        };
        store.add_conjunction(acc, next, result);
        acc = result;
    }

    Ok(())
}

fn concept(st: &SymbolTable, name: &str) -> Result<ConceptId, ElandError> {
    st.concept_id(name)
        .ok_or_else(|| invalid!("unresolved concept reference: {}", name))
}

fn role(st: &SymbolTable, name: &str) -> Result<RoleId, ElandError> {
    st.role_id(name)
        .ok_or_else(|| invalid!("unresolved role reference: {}", name))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{IntersectionPart, Ontology, Term, TypeDef};
    use crate::reasoner::symbol::{BOTTOM, TOP};

    #[test]
    fn test_is_a_becomes_nf1() {
        let ont = Ontology::new()
            .term(Term::new("A").is_a("B"))
            .term(Term::new("B"));

        let (st, store) = normalize(&ont).unwrap();

        let a = st.concept_id("A").unwrap();
        let b = st.concept_id("B").unwrap();
        assert_eq!(store.sub_to_sups(a), &[b]);
        assert_eq!(st.role_count(), 0);
    }

    #[test]
    fn test_relationship_becomes_nf3() {
        let ont = Ontology::new().term(Term::new("A").relationship("has_part", "B"));

        let (st, store) = normalize(&ont).unwrap();

        let a = st.concept_id("A").unwrap();
        let b = st.concept_id("B").unwrap();
        let r = st.role_id("has_part").unwrap();
        let rf = store.exist_right(a);
        assert_eq!(rf.len(), 1);
        assert_eq!((rf[0].role, rf[0].filler), (r, b));
    }

    #[test]
    fn test_obsolete_terms_are_skipped() {
        let ont = Ontology::new()
            .term(Term::new("A").is_a("B").obsolete())
            .term(Term::new("C"));

        let (st, store) = normalize(&ont).unwrap();

        assert_eq!(st.concept_id("A"), None);
        assert_eq!(st.concept_id("B"), None);
        assert!(st.concept_id("C").is_some());
        assert_eq!(store.concept_count(), st.concept_count());
    }

    #[test]
    fn test_reserved_names_keep_reserved_ids() {
        let ont = Ontology::new().term(Term::new("A").is_a("owl:Thing")).term(
            Term::new("owl:Nothing"),
        );

        let (st, _) = normalize(&ont).unwrap();

        assert_eq!(st.concept_id("owl:Thing"), Some(TOP));
        assert_eq!(st.concept_id("owl:Nothing"), Some(BOTTOM));
    }

    #[test]
    fn test_typedef_flags() {
        let ont = Ontology::new()
            .term(Term::new("A").relationship("part_of", "B"))
            .typedef(TypeDef::new("part_of").transitive())
            .typedef(TypeDef::new("overlaps").reflexive());

        let (st, store) = normalize(&ont).unwrap();

        let p = st.role_id("part_of").unwrap();
        let o = st.role_id("overlaps").unwrap();
        assert!(store.is_transitive(p));
        assert_eq!(store.chain_targets(p, p), &[p]);
        assert!(store.is_reflexive(o));
        assert!(!store.is_transitive(o));
    }

    #[test]
    fn test_intersection_two_genera() {
        // C ≡ A ⊓ B, with the forward direction as explicit is_a lines.
        let ont = Ontology::new().term(
            Term::new("C")
                .is_a("A")
                .is_a("B")
                .intersection(IntersectionPart::genus("A"))
                .intersection(IntersectionPart::genus("B")),
        );

        let (st, store) = normalize(&ont).unwrap();

        let a = st.concept_id("A").unwrap();
        let b = st.concept_id("B").unwrap();
        let c = st.concept_id("C").unwrap();
        assert_eq!(store.conjunctions(a).unwrap()[&b], vec![c]);
        assert_eq!(store.conjunctions(b).unwrap()[&a], vec![c]);
        // two genera need no fresh concepts
        assert_eq!(st.concept_count(), 5);
    }

    #[test]
    fn test_intersection_with_differentia() {
        let ont = Ontology::new().term(
            Term::new("C")
                .is_a("G")
                .relationship("has_part", "F")
                .intersection(IntersectionPart::genus("G"))
                .intersection(IntersectionPart::differentia("has_part", "F")),
        );

        let (st, store) = normalize(&ont).unwrap();

        let g = st.concept_id("G").unwrap();
        let f = st.concept_id("F").unwrap();
        let c = st.concept_id("C").unwrap();
        let r = st.role_id("has_part").unwrap();

        // one fresh concept X for the differentia, carrying ∃R.F ⊑ X
        let fresh = ConceptId(st.concept_count() as u32 - 1);
        assert!(!st.is_named(fresh));
        assert_eq!(store.exist_left(r, f), &[fresh]);

        // and the binary conjunction G ⊓ X ⊑ C
        assert_eq!(store.conjunctions(g).unwrap()[&fresh], vec![c]);
    }

    #[test]
    fn test_intersection_three_parts_folds_left() {
        let ont = Ontology::new().term(
            Term::new("C")
                .is_a("A")
                .is_a("B")
                .is_a("D")
                .intersection(IntersectionPart::genus("A"))
                .intersection(IntersectionPart::genus("B"))
                .intersection(IntersectionPart::genus("D")),
        );

        let (st, store) = normalize(&ont).unwrap();

        let a = st.concept_id("A").unwrap();
        let b = st.concept_id("B").unwrap();
        let d = st.concept_id("D").unwrap();
        let c = st.concept_id("C").unwrap();

        // one fresh intermediate: A ⊓ B ⊑ X, X ⊓ D ⊑ C
        let fresh = ConceptId(st.concept_count() as u32 - 1);
        assert!(!st.is_named(fresh));
        assert_eq!(store.conjunctions(a).unwrap()[&b], vec![fresh]);
        assert_eq!(store.conjunctions(fresh).unwrap()[&d], vec![c]);
    }

    #[test]
    fn test_single_part_intersection_degrades_to_nf1() {
        let ont = Ontology::new().term(
            Term::new("C")
                .is_a("A")
                .intersection(IntersectionPart::genus("A")),
        );

        let (st, store) = normalize(&ont).unwrap();

        let a = st.concept_id("A").unwrap();
        let c = st.concept_id("C").unwrap();
        // forward from the is_a line, reverse from the degenerate block
        assert_eq!(store.sub_to_sups(c), &[a]);
        assert_eq!(store.sub_to_sups(a), &[c]);
    }
}
