//! Transitive reduction of the saturated subsumption relation
//!
//! The saturated supersets are complete but redundant: A ⊑ C is listed
//! even when A ⊑ B ⊑ C. The taxonomy keeps only the direct edges. A
//! candidate parent B of C is direct iff no other candidate S witnesses
//! the redundancy by itself subsuming B. Fresh auxiliary concepts take
//! part in that calculation (their supersets correctly reflect
//! reachability) but are filtered from the output.
use serde::Serialize;
use std::time::Duration;

use super::saturate::Context;
use super::symbol::{ConceptId, SymbolTable, BOTTOM, TOP};

/// Direct parents and children per concept id.
#[derive(Debug)]
pub struct Taxonomy {
    direct_parents: Vec<Vec<ConceptId>>,
    direct_children: Vec<Vec<ConceptId>>,
}

impl Taxonomy {
    /// Extracts the direct hierarchy from saturated contexts by local
    /// transitive reduction, O(|candidates|²) per concept.
    pub fn build(contexts: &[Context], st: &SymbolTable) -> Taxonomy {
        let n = st.concept_count();
        let mut tax = Taxonomy {
            direct_parents: vec![Vec::new(); n],
            direct_children: vec![Vec::new(); n],
        };

        let mut candidates: Vec<ConceptId> = Vec::new();

        for i in 2..n {
            let c = ConceptId(i as u32);
            let supers = contexts[i].superset();

            candidates.clear();
            let mut has_top = false;
            for &s in supers {
                if s == c || s == BOTTOM {
                    continue;
                }
                if s == TOP {
                    has_top = true;
                    continue;
                }
                candidates.push(s);
            }

            let mut direct: Vec<ConceptId> = Vec::with_capacity(4);
            for &b in &candidates {
                let redundant = candidates
                    .iter()
                    .any(|&s| s != b && contexts[s.index()].has_superclass(b));
                if !redundant {
                    direct.push(b);
                }
            }

            if direct.is_empty() && has_top {
                direct.push(TOP);
            }

            for &p in &direct {
                tax.direct_children[p.index()].push(c);
            }
            tax.direct_parents[i] = direct;
        }

        tax
    }

    pub fn direct_parents(&self, c: ConceptId) -> &[ConceptId] {
        self.direct_parents
            .get(c.index())
            .map_or(&[], |v| v.as_slice())
    }

    pub fn direct_children(&self, c: ConceptId) -> &[ConceptId] {
        self.direct_children
            .get(c.index())
            .map_or(&[], |v| v.as_slice())
    }

    /// Renders the taxonomy into the external hierarchy, keeping only
    /// named concepts and counting the inferred subsumptions.
    pub fn into_hierarchy(
        self,
        contexts: &[Context],
        st: &SymbolTable,
        mut stats: ClassificationStats,
    ) -> ClassifiedHierarchy {
        let n = st.concept_count();

        // |S(c)| beyond self and Top, over named concepts only.
        let mut inferred = 0usize;
        for i in 2..n {
            let c = ConceptId(i as u32);
            if !st.is_named(c) {
                continue;
            }
            inferred += contexts[i].superset().len().saturating_sub(2);
        }
        stats.inferred_subsumptions = inferred;

        let mut concepts = Vec::with_capacity(n.saturating_sub(2));
        for i in 2..n {
            let c = ConceptId(i as u32);
            if !st.is_named(c) {
                continue;
            }

            let direct_parents = self.direct_parents[i]
                .iter()
                .map(|&p| st.concept_name(p))
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();

            let direct_children = self.direct_children[i]
                .iter()
                .map(|&ch| st.concept_name(ch))
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();

            concepts.push(ClassifiedConcept {
                id: st.concept_name(c).to_string(),
                direct_parents,
                direct_children,
            });
        }

        ClassifiedHierarchy { concepts, stats }
    }
}

/// A concept in the classified hierarchy.
#[derive(Clone, Debug, Serialize)]
pub struct ClassifiedConcept {
    pub id: String,
    pub direct_parents: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub direct_children: Vec<String>,
}

/// Timing and size metrics for one classification run.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ClassificationStats {
    pub concept_count: usize,
    pub role_count: usize,
    pub inferred_subsumptions: usize,
    pub parse_time_ms: u64,
    pub normalize_time_ms: u64,
    pub saturate_time_ms: u64,
    pub reduction_time_ms: u64,
    pub total_time_ms: u64,
}

impl ClassificationStats {
    /// Builds the stats block from the phase durations. The concept
    /// count excludes the two reserved concepts.
    pub fn new(
        st: &SymbolTable,
        parse: Duration,
        normalize: Duration,
        saturate: Duration,
        reduction: Duration,
    ) -> ClassificationStats {
        let total = parse + normalize + saturate + reduction;
        ClassificationStats {
            concept_count: st.concept_count().saturating_sub(2),
            role_count: st.role_count(),
            inferred_subsumptions: 0,
            parse_time_ms: parse.as_millis() as u64,
            normalize_time_ms: normalize.as_millis() as u64,
            saturate_time_ms: saturate.as_millis() as u64,
            reduction_time_ms: reduction.as_millis() as u64,
            total_time_ms: total.as_millis() as u64,
        }
    }
}

/// The classified hierarchy: one entry per named concept plus the run
/// statistics.
#[derive(Clone, Debug, Serialize)]
pub struct ClassifiedHierarchy {
    pub concepts: Vec<ClassifiedConcept>,
    pub stats: ClassificationStats,
}

impl ClassifiedHierarchy {
    /// Looks a concept up by its external id.
    pub fn concept(&self, id: &str) -> Option<&ClassifiedConcept> {
        self.concepts.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reasoner::axioms::AxiomStore;
    use crate::reasoner::saturate::saturate;
    use crate::reasoner::symbol::SymbolTable;

    fn saturated_chain() -> (SymbolTable, Vec<Context>) {
        // A ⊑ B ⊑ C
        let mut st = SymbolTable::new();
        let a = st.intern_concept("A");
        let b = st.intern_concept("B");
        let c = st.intern_concept("C");
        let mut store = AxiomStore::new(&st);
        store.add_subsumption(a, b);
        store.add_subsumption(b, c);
        (st, saturate(&store))
    }

    #[test]
    fn test_chain_reduces_to_direct_edges() {
        let (st, contexts) = saturated_chain();
        let tax = Taxonomy::build(&contexts, &st);

        let a = st.concept_id("A").unwrap();
        let b = st.concept_id("B").unwrap();
        let c = st.concept_id("C").unwrap();

        assert_eq!(tax.direct_parents(a), &[b]);
        assert_eq!(tax.direct_parents(b), &[c]);
        assert_eq!(tax.direct_parents(c), &[TOP]);
        assert_eq!(tax.direct_children(b), &[a]);
        assert_eq!(tax.direct_children(TOP), &[c]);
    }

    #[test]
    fn test_soundness_and_completeness() {
        // diamond: X ⊑ A, X ⊑ B, A ⊑ C, B ⊑ C plus the redundant X ⊑ C
        let mut st = SymbolTable::new();
        let x = st.intern_concept("X");
        let a = st.intern_concept("A");
        let b = st.intern_concept("B");
        let c = st.intern_concept("C");
        let mut store = AxiomStore::new(&st);
        store.add_subsumption(x, a);
        store.add_subsumption(x, b);
        store.add_subsumption(x, c);
        store.add_subsumption(a, c);
        store.add_subsumption(b, c);

        let contexts = saturate(&store);
        let tax = Taxonomy::build(&contexts, &st);

        let mut parents = tax.direct_parents(x).to_vec();
        parents.sort();
        assert_eq!(parents, vec![a, b]);

        // soundness: every direct parent is in the superset and is not
        // reachable through another candidate
        for &p in tax.direct_parents(x) {
            assert!(contexts[x.index()].has_superclass(p));
            for &s in contexts[x.index()].superset() {
                if s == x || s == p || s == TOP {
                    continue;
                }
                assert!(!contexts[s.index()].has_superclass(p));
            }
        }

        // completeness: the stripped edge X ⊑ C is reachable through
        // the direct-parent graph
        assert!(!tax.direct_parents(x).contains(&c));
        assert!(tax
            .direct_parents(x)
            .iter()
            .any(|&p| tax.direct_parents(p).contains(&c)));
    }

    #[test]
    fn test_fresh_concepts_are_filtered_but_participate() {
        // A ⊑ F (fresh), F ⊑ B: the reduction routes through F, the
        // output never mentions it.
        let mut st = SymbolTable::new();
        let a = st.intern_concept("A");
        let b = st.intern_concept("B");
        let f = st.fresh_concept();
        let mut store = AxiomStore::new(&st);
        store.grow(st.concept_count());
        store.add_subsumption(a, f);
        store.add_subsumption(f, b);

        let contexts = saturate(&store);
        let tax = Taxonomy::build(&contexts, &st);

        // F is the direct parent of A in id space
        assert_eq!(tax.direct_parents(a), &[f]);

        let stats = ClassificationStats::default();
        let hierarchy = tax.into_hierarchy(&contexts, &st, stats);

        // only named concepts appear, and the nameless parent is
        // dropped from the list
        assert_eq!(hierarchy.concepts.len(), 2);
        assert!(hierarchy.concept("A").unwrap().direct_parents.is_empty());
        assert_eq!(
            hierarchy.concept("B").unwrap().direct_parents,
            vec!["owl:Thing"]
        );
    }

    #[test]
    fn test_inferred_subsumption_count() {
        let (st, contexts) = saturated_chain();
        let tax = Taxonomy::build(&contexts, &st);
        let hierarchy = tax.into_hierarchy(&contexts, &st, ClassificationStats::default());

        // S(A) = {A, B, C, Top} → 2; S(B) = {B, C, Top} → 1; S(C) → 0
        assert_eq!(hierarchy.stats.inferred_subsumptions, 3);
    }

    #[test]
    fn test_hierarchy_json_shape() {
        let (st, contexts) = saturated_chain();
        let tax = Taxonomy::build(&contexts, &st);
        let hierarchy = tax.into_hierarchy(&contexts, &st, ClassificationStats::default());

        let json = serde_json::to_value(&hierarchy).unwrap();
        assert_eq!(json["concepts"][0]["id"], "A");
        assert_eq!(json["concepts"][0]["direct_parents"][0], "B");
        // C has no children key suppression, but A has no children at all
        assert!(json["concepts"][0].get("direct_children").is_none());
        assert_eq!(json["stats"]["inferred_subsumptions"], 3);
    }
}
