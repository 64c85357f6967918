//! The saturation fixpoint engine
//!
//! # Overview
//!
//! Saturation owns one [`Context`] per concept and drives two worklists
//! to a fixpoint, applying the EL completion rules CR1, CR2, CR3, CR4,
//! CR5, CR10 and CR11 until no new facts derive. The concept worklist
//! carries items (C, D) meaning "D was added to S(C)"; the link
//! worklist carries items (C, R, D) meaning "the link (C, D) was added
//! to R(R)". Both are used as stacks: consequences of a fresh fact tend
//! to touch the same context again, and LIFO order keeps that context
//! hot in cache. Correctness does not depend on the order.
//!
//! The axiom store is read-only for the whole run, so every rule is a
//! lookup there plus a set insertion here. The derivable facts are
//! bounded by N² + N²·|R| and every rule only ever adds, so the
//! worklists drain in finite time.
use rustc_hash::FxHashSet;

use super::axioms::AxiomStore;
use super::symbol::{ConceptId, RoleId, BOTTOM, TOP};

/// Saturation state for a single concept.
#[derive(Debug)]
pub struct Context {
    /// S(C): every concept this one is subsumed by, including itself
    /// and Top.
    superset: FxHashSet<ConceptId>,

    /// Forward links per role: D ∈ `link_map[r]` iff (C, D) ∈ R(r).
    link_map: Vec<Vec<ConceptId>>,

    /// Reverse links per role: E ∈ `pred_map[r]` iff (E, C) ∈ R(r).
    pred_map: Vec<Vec<ConceptId>>,
}

impl Context {
    fn new(n_roles: usize) -> Context {
        Context {
            superset: FxHashSet::default(),
            link_map: vec![Vec::new(); n_roles],
            pred_map: vec![Vec::new(); n_roles],
        }
    }

    pub fn superset(&self) -> &FxHashSet<ConceptId> {
        &self.superset
    }

    pub fn has_superclass(&self, d: ConceptId) -> bool {
        self.superset.contains(&d)
    }

    /// The derived links (C, ·) ∈ R(r).
    pub fn links(&self, r: RoleId) -> &[ConceptId] {
        self.link_map.get(r.index()).map_or(&[], |v| v.as_slice())
    }

    /// The derived links (·, C) ∈ R(r).
    pub fn predecessors(&self, r: RoleId) -> &[ConceptId] {
        self.pred_map.get(r.index()).map_or(&[], |v| v.as_slice())
    }
}

struct WorkItem {
    concept: ConceptId,
    added: ConceptId,
}

struct LinkItem {
    source: ConceptId,
    role: RoleId,
    target: ConceptId,
}

/// Runs the single-threaded EL saturation to fixpoint and returns the
/// per-concept contexts.
pub fn saturate(store: &AxiomStore) -> Vec<Context> {
    let n = store.concept_count();
    let nr = store.role_count();

    let mut contexts: Vec<Context> = (0..n).map(|_| Context::new(nr)).collect();

    let mut worklist: Vec<WorkItem> = Vec::with_capacity(n * 2);
    let mut link_worklist: Vec<LinkItem> = Vec::with_capacity(n);

    // S(C) = {C, Top} for every concept.
    for i in 0..n {
        let c = ConceptId(i as u32);
        contexts[i].superset.insert(c);
        contexts[i].superset.insert(TOP);
        worklist.push(WorkItem { concept: c, added: c });
        worklist.push(WorkItem {
            concept: c,
            added: TOP,
        });
    }

    // Snapshot buffer for superset iteration while the same superset
    // may be mutated (a link can be reflexive).
    let mut scratch: Vec<ConceptId> = Vec::new();

    while !worklist.is_empty() || !link_worklist.is_empty() {
        while let Some(item) = worklist.pop() {
            let c = item.concept;
            let d = item.added;

            // CR1: D ⊑ E gives E ∈ S(C).
            for &e in store.sub_to_sups(d) {
                if contexts[c.index()].superset.insert(e) {
                    worklist.push(WorkItem { concept: c, added: e });
                }
            }

            // CR2: D ⊓ D' ⊑ E with D' already in S(C) gives E ∈ S(C).
            // The symmetric storage fires this whichever conjunct
            // arrived first.
            if let Some(pairs) = store.conjunctions(d) {
                for (d2, results) in pairs {
                    if contexts[c.index()].superset.contains(d2) {
                        for &e in results {
                            if contexts[c.index()].superset.insert(e) {
                                worklist.push(WorkItem { concept: c, added: e });
                            }
                        }
                    }
                }
            }

            // CR3: D ⊑ ∃R.B gives the link (C, B) ∈ R(R).
            for rf in store.exist_right(d) {
                if add_link(&mut contexts, c, rf.filler, rf.role) {
                    link_worklist.push(LinkItem {
                        source: c,
                        role: rf.role,
                        target: rf.filler,
                    });
                }
            }

            // CR4 backward: for a predecessor E with (E, C) ∈ R(R) and
            // ∃R.D ⊑ F, the new superclass D of C gives F ∈ S(E).
            for ri in 0..nr {
                let r = RoleId(ri as u32);
                let sups = store.exist_left(r, d);
                if sups.is_empty() {
                    continue;
                }
                let mut i = 0;
                while let Some(&pred) = contexts[c.index()].pred_map[ri].get(i) {
                    i += 1;
                    for &f in sups {
                        if contexts[pred.index()].superset.insert(f) {
                            worklist.push(WorkItem {
                                concept: pred,
                                added: f,
                            });
                        }
                    }
                }
            }
        }

        while let Some(li) = link_worklist.pop() {
            let c = li.source;
            let r = li.role;
            let d = li.target;

            // CR4 forward: (C, D) ∈ R(R) and ∃R.E ⊑ F with E ∈ S(D)
            // gives F ∈ S(C).
            if let Some(fillers) = store.exist_left_map(r) {
                if !fillers.is_empty() {
                    scratch.clear();
                    scratch.extend(contexts[d.index()].superset.iter().copied());
                    for e in &scratch {
                        if let Some(sups) = fillers.get(e) {
                            for &f in sups {
                                if contexts[c.index()].superset.insert(f) {
                                    worklist.push(WorkItem { concept: c, added: f });
                                }
                            }
                        }
                    }
                }
            }

            // CR5: Bottom ∈ S(D) propagates over the link to S(C).
            if contexts[d.index()].superset.contains(&BOTTOM)
                && contexts[c.index()].superset.insert(BOTTOM)
            {
                worklist.push(WorkItem {
                    concept: c,
                    added: BOTTOM,
                });
            }

            // CR10: R ⊑ S copies the link into R(S).
            for &s in store.role_subs(r) {
                if add_link(&mut contexts, c, d, s) {
                    link_worklist.push(LinkItem {
                        source: c,
                        role: s,
                        target: d,
                    });
                }
            }

            // CR11 left: (E, C) ∈ R(R1) and R1 ∘ R ⊑ S give
            // (E, D) ∈ R(S).
            for ri in 0..nr {
                let r1 = RoleId(ri as u32);
                let chained = store.chain_targets(r1, r);
                if chained.is_empty() {
                    continue;
                }
                let mut i = 0;
                while let Some(&pred) = contexts[c.index()].pred_map[ri].get(i) {
                    i += 1;
                    for &s in chained {
                        if add_link(&mut contexts, pred, d, s) {
                            link_worklist.push(LinkItem {
                                source: pred,
                                role: s,
                                target: d,
                            });
                        }
                    }
                }
            }

            // CR11 right: (D, E) ∈ R(R2) and R ∘ R2 ⊑ S give
            // (C, E) ∈ R(S).
            if let Some(chains) = store.role_chains(r) {
                for (r2, ss) in chains {
                    let mut i = 0;
                    while let Some(&e) = contexts[d.index()].link_map[r2.index()].get(i) {
                        i += 1;
                        for &s in ss {
                            if add_link(&mut contexts, c, e, s) {
                                link_worklist.push(LinkItem {
                                    source: c,
                                    role: s,
                                    target: e,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    contexts
}

/// Adds (source, target) to R(role), maintaining both link directions.
/// Returns true if the link was new. The forward vector is scanned
/// linearly: per-concept fan-out per role is small in practice, and a
/// vector beats a hash set at these sizes.
fn add_link(contexts: &mut [Context], source: ConceptId, target: ConceptId, role: RoleId) -> bool {
    if contexts[source.index()].link_map[role.index()].contains(&target) {
        return false;
    }
    contexts[source.index()].link_map[role.index()].push(target);
    contexts[target.index()].pred_map[role.index()].push(source);
    true
}
