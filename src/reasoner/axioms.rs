//! Indexed storage for normalized axioms
//!
//! # Overview
//!
//! The store holds the six normal forms the completion rules recognise,
//! each indexed for the lookup its rule performs:
//!
//! | Form | Shape           | Index                         |
//! |------|-----------------|-------------------------------|
//! | NF1  | A ⊑ B           | `sub_to_sups[A]`              |
//! | NF2  | A₁ ⊓ A₂ ⊑ B     | `conj_index[A₁][A₂]` (both orders) |
//! | NF3  | A ⊑ ∃R.B        | `exist_right[A]`              |
//! | NF4  | ∃R.A ⊑ B        | `exist_left[R][A]`            |
//! | NF5  | R ⊑ S           | `role_subs[R]`                |
//! | NF6  | R₁ ∘ R₂ ⊑ S     | `role_chains[R₁][R₂]`         |
//!
//! Conjunctions are written under both argument orders so the rule that
//! consumes them never has to probe twice. The store performs no
//! duplicate suppression; the saturation state is idempotent under
//! repeated entries. All adds are O(1) amortized. The store is
//! append-only during normalization and read-only during saturation.
use rustc_hash::FxHashMap;

use super::symbol::{ConceptId, RoleId, SymbolTable};

/// A role paired with its filler concept, the payload of NF3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoleFiller {
    pub role: RoleId,
    pub filler: ConceptId,
}

#[derive(Debug, Default)]
pub struct AxiomStore {
    sub_to_sups: Vec<Vec<ConceptId>>,
    conj_index: Vec<FxHashMap<ConceptId, Vec<ConceptId>>>,
    exist_right: Vec<Vec<RoleFiller>>,
    exist_left: Vec<FxHashMap<ConceptId, Vec<ConceptId>>>,
    role_subs: Vec<Vec<RoleId>>,
    role_chains: Vec<FxHashMap<RoleId, Vec<RoleId>>>,
    transitive: Vec<bool>,
    reflexive: Vec<bool>,
}

impl AxiomStore {
    /// Allocates a store sized for the given symbol table.
    pub fn new(st: &SymbolTable) -> AxiomStore {
        let mut s = AxiomStore::default();
        s.grow(st.concept_count());
        s.grow_roles(st.role_count());
        s
    }

    /// Expands the concept-indexed tables to hold `concepts` ids.
    /// Required because the normalizer allocates fresh concepts after
    /// the store has been sized.
    pub fn grow(&mut self, concepts: usize) {
        if self.sub_to_sups.len() < concepts {
            self.sub_to_sups.resize_with(concepts, Vec::new);
            self.conj_index.resize_with(concepts, FxHashMap::default);
            self.exist_right.resize_with(concepts, Vec::new);
        }
    }

    /// Expands the role-indexed tables to hold `roles` ids.
    pub fn grow_roles(&mut self, roles: usize) {
        if self.role_subs.len() < roles {
            self.exist_left.resize_with(roles, FxHashMap::default);
            self.role_subs.resize_with(roles, Vec::new);
            self.role_chains.resize_with(roles, FxHashMap::default);
            self.transitive.resize(roles, false);
            self.reflexive.resize(roles, false);
        }
    }

    pub fn concept_count(&self) -> usize {
        self.sub_to_sups.len()
    }

    pub fn role_count(&self) -> usize {
        self.role_subs.len()
    }

    /// NF1: `sub ⊑ sup`.
    pub fn add_subsumption(&mut self, sub: ConceptId, sup: ConceptId) {
        self.sub_to_sups[sub.index()].push(sup);
    }

    /// NF2: `left1 ⊓ left2 ⊑ right`, stored under both orders.
    pub fn add_conjunction(&mut self, left1: ConceptId, left2: ConceptId, right: ConceptId) {
        self.conj_index[left1.index()]
            .entry(left2)
            .or_default()
            .push(right);
        if left1 != left2 {
            self.conj_index[left2.index()]
                .entry(left1)
                .or_default()
                .push(right);
        }
    }

    /// NF3: `sub ⊑ ∃role.filler`.
    pub fn add_exist_right(&mut self, sub: ConceptId, role: RoleId, filler: ConceptId) {
        self.exist_right[sub.index()].push(RoleFiller { role, filler });
    }

    /// NF4: `∃role.filler ⊑ sup`.
    pub fn add_exist_left(&mut self, role: RoleId, filler: ConceptId, sup: ConceptId) {
        self.exist_left[role.index()]
            .entry(filler)
            .or_default()
            .push(sup);
    }

    /// NF5: `sub ⊑ sup` over roles.
    pub fn add_role_sub(&mut self, sub: RoleId, sup: RoleId) {
        self.role_subs[sub.index()].push(sup);
    }

    /// NF6: `left1 ∘ left2 ⊑ right`.
    pub fn add_role_chain(&mut self, left1: RoleId, left2: RoleId, right: RoleId) {
        self.role_chains[left1.index()]
            .entry(left2)
            .or_default()
            .push(right);
    }

    /// Marks `r` transitive, normalized as the chain `r ∘ r ⊑ r`.
    pub fn set_transitive(&mut self, r: RoleId) {
        self.transitive[r.index()] = true;
        self.add_role_chain(r, r, r);
    }

    pub fn set_reflexive(&mut self, r: RoleId) {
        self.reflexive[r.index()] = true;
    }

    pub fn is_transitive(&self, r: RoleId) -> bool {
        self.transitive.get(r.index()).copied().unwrap_or(false)
    }

    pub fn is_reflexive(&self, r: RoleId) -> bool {
        self.reflexive.get(r.index()).copied().unwrap_or(false)
    }

    /// All B with `c ⊑ B` in NF1.
    pub fn sub_to_sups(&self, c: ConceptId) -> &[ConceptId] {
        self.sub_to_sups.get(c.index()).map_or(&[], |v| v.as_slice())
    }

    /// The conjunction partners of `c`: every D with some `c ⊓ D ⊑ B`,
    /// together with the Bs.
    pub fn conjunctions(&self, c: ConceptId) -> Option<&FxHashMap<ConceptId, Vec<ConceptId>>> {
        self.conj_index.get(c.index())
    }

    /// All (R, B) with `c ⊑ ∃R.B` in NF3.
    pub fn exist_right(&self, c: ConceptId) -> &[RoleFiller] {
        self.exist_right.get(c.index()).map_or(&[], |v| v.as_slice())
    }

    /// All B with `∃r.filler ⊑ B` in NF4.
    pub fn exist_left(&self, r: RoleId, filler: ConceptId) -> &[ConceptId] {
        self.exist_left
            .get(r.index())
            .and_then(|m| m.get(&filler))
            .map_or(&[], |v| v.as_slice())
    }

    /// The full NF4 filler map for role `r`.
    pub fn exist_left_map(&self, r: RoleId) -> Option<&FxHashMap<ConceptId, Vec<ConceptId>>> {
        self.exist_left.get(r.index())
    }

    /// All S with `r ⊑ S` in NF5.
    pub fn role_subs(&self, r: RoleId) -> &[RoleId] {
        self.role_subs.get(r.index()).map_or(&[], |v| v.as_slice())
    }

    /// All S with `r1 ∘ r2 ⊑ S` in NF6.
    pub fn chain_targets(&self, r1: RoleId, r2: RoleId) -> &[RoleId] {
        self.role_chains
            .get(r1.index())
            .and_then(|m| m.get(&r2))
            .map_or(&[], |v| v.as_slice())
    }

    /// The full NF6 second-role map for first role `r`.
    pub fn role_chains(&self, r: RoleId) -> Option<&FxHashMap<RoleId, Vec<RoleId>>> {
        self.role_chains.get(r.index())
    }
}
