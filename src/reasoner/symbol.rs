//! String interning for concepts and roles
//!
//! Every hot-path identifier in the classifier is a dense 32-bit
//! integer; strings appear only at the boundary. The symbol table owns
//! the two bijections (concept name ↔ id, role name ↔ id) and the
//! allocation of fresh auxiliary concepts during normalization.
use rustc_hash::FxHashMap;

use crate::vocab;

/// A dense identifier for a named or fresh concept.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConceptId(pub u32);

/// A dense identifier for an object property.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoleId(pub u32);

/// The universal concept `owl:Thing`.
pub const TOP: ConceptId = ConceptId(0);

/// The empty concept `owl:Nothing`.
pub const BOTTOM: ConceptId = ConceptId(1);

impl ConceptId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl RoleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Maps external names to dense integer ids for the reasoner's inner
/// loops. `owl:Thing` and `owl:Nothing` are pre-registered at ids 0 and
/// 1, so interning them can never produce any other id.
#[derive(Debug)]
pub struct SymbolTable {
    concept_ids: FxHashMap<String, ConceptId>,
    concept_names: Vec<String>,
    role_ids: FxHashMap<String, RoleId>,
    role_names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::with_capacity(0, 0)
    }

    /// Constructs a table sized for the expected number of concepts and
    /// roles, with the reserved concepts pre-registered.
    pub fn with_capacity(concepts: usize, roles: usize) -> SymbolTable {
        let mut st = SymbolTable {
            concept_ids: FxHashMap::with_capacity_and_hasher(concepts + 2, Default::default()),
            concept_names: Vec::with_capacity(concepts + 2),
            role_ids: FxHashMap::with_capacity_and_hasher(roles, Default::default()),
            role_names: Vec::with_capacity(roles),
        };
        let top = st.intern_concept(vocab::OWL_THING);
        let bottom = st.intern_concept(vocab::OWL_NOTHING);
        debug_assert_eq!(top, TOP);
        debug_assert_eq!(bottom, BOTTOM);
        st
    }

    /// Returns the id for `name`, appending a new one if the name has
    /// not been seen before.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eland::reasoner::symbol::*;
    /// let mut st = SymbolTable::new();
    /// let a = st.intern_concept("CHEBI:15377");
    /// let b = st.intern_concept("CHEBI:15377");
    ///
    /// assert_eq!(a, b);
    /// assert_eq!(st.intern_concept("owl:Thing"), TOP);
    /// ```
    pub fn intern_concept(&mut self, name: &str) -> ConceptId {
        if let Some(&id) = self.concept_ids.get(name) {
            return id;
        }
        let id = ConceptId(self.concept_names.len() as u32);
        self.concept_ids.insert(name.to_string(), id);
        self.concept_names.push(name.to_string());
        id
    }

    /// Returns the id for role `name`, appending a new one if needed.
    pub fn intern_role(&mut self, name: &str) -> RoleId {
        if let Some(&id) = self.role_ids.get(name) {
            return id;
        }
        let id = RoleId(self.role_names.len() as u32);
        self.role_ids.insert(name.to_string(), id);
        self.role_names.push(name.to_string());
        id
    }

    /// Allocates a fresh concept with an empty external name. Fresh
    /// concepts participate in saturation like any other concept; the
    /// empty name is what downstream components use to filter them from
    /// the taxonomy output.
    pub fn fresh_concept(&mut self) -> ConceptId {
        let id = ConceptId(self.concept_names.len() as u32);
        self.concept_names.push(String::new());
        id
    }

    pub fn concept_id(&self, name: &str) -> Option<ConceptId> {
        self.concept_ids.get(name).copied()
    }

    pub fn role_id(&self, name: &str) -> Option<RoleId> {
        self.role_ids.get(name).copied()
    }

    /// The external name for `id`, or `""` for fresh concepts and
    /// out-of-range ids.
    pub fn concept_name(&self, id: ConceptId) -> &str {
        self.concept_names.get(id.index()).map_or("", |s| s.as_str())
    }

    pub fn role_name(&self, id: RoleId) -> &str {
        self.role_names.get(id.index()).map_or("", |s| s.as_str())
    }

    /// Returns true if `id` carries a non-empty external name.
    pub fn is_named(&self, id: ConceptId) -> bool {
        !self.concept_name(id).is_empty()
    }

    pub fn concept_count(&self) -> usize {
        self.concept_names.len()
    }

    pub fn role_count(&self) -> usize {
        self.role_names.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
