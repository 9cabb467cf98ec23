use crate::transform::VariableAllocator;
use quadview_model::{BlankNodeRef, TermPatternRef, Variable, VariableRef};
use rustc_hash::FxHashMap;

/// Records which variable replaces a blank node or a variable.
///
/// The mapping is append-only: once a term is mapped, the entry is never removed or
/// overwritten. Blank nodes and variables live in separate tables, so `_:a` and `?a` are
/// distinct keys.
#[derive(Debug, Clone)]
pub struct SubstitutionMapping {
    allocator: VariableAllocator,
    blank_nodes: FxHashMap<String, Variable>,
    variables: FxHashMap<String, Variable>,
}

impl SubstitutionMapping {
    /// Creates an empty mapping that allocates new variables from `allocator`.
    pub fn new(allocator: VariableAllocator) -> Self {
        Self {
            allocator,
            blank_nodes: FxHashMap::default(),
            variables: FxHashMap::default(),
        }
    }

    pub fn allocator(&self) -> &VariableAllocator {
        &self.allocator
    }

    /// Returns the variable `term` is mapped to, if any.
    pub fn get(&self, term: TermPatternRef<'_>) -> Option<&Variable> {
        match term {
            TermPatternRef::BlankNode(bnode) => self.blank_nodes.get(bnode.as_str()),
            TermPatternRef::Variable(variable) => self.variables.get(variable.as_str()),
            TermPatternRef::NamedNode(_) | TermPatternRef::Literal(_) => None,
        }
    }

    /// Returns the variable `term` is mapped to, allocating a fresh one on first sight.
    ///
    /// IRIs and literals cannot be mapped and yield [None].
    pub fn get_or_allocate(&mut self, term: TermPatternRef<'_>) -> Option<Variable> {
        let (table, key) = match term {
            TermPatternRef::BlankNode(bnode) => (&mut self.blank_nodes, bnode.as_str()),
            TermPatternRef::Variable(variable) => (&mut self.variables, variable.as_str()),
            TermPatternRef::NamedNode(_) | TermPatternRef::Literal(_) => return None,
        };

        if let Some(existing) = table.get(key) {
            return Some(existing.clone());
        }

        let fresh = self.allocator.allocate();
        table.insert(key.to_owned(), fresh.clone());
        Some(fresh)
    }

    /// Maps the variable `from` to `to` unless `from` is already mapped.
    ///
    /// Returns whether the entry was added.
    pub fn seed(&mut self, from: VariableRef<'_>, to: Variable) -> bool {
        if self.variables.contains_key(from.as_str()) {
            return false;
        }
        self.variables.insert(from.as_str().to_owned(), to);
        true
    }

    /// Returns the number of mapped terms.
    pub fn len(&self) -> usize {
        self.blank_nodes.len() + self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the blank node entries in no particular order.
    pub fn blank_nodes(&self) -> impl Iterator<Item = (BlankNodeRef<'_>, &Variable)> {
        self.blank_nodes
            .iter()
            .map(|(id, variable)| (BlankNodeRef::new_unchecked(id), variable))
    }

    /// Iterates over the variable entries in no particular order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableRef<'_>, &Variable)> {
        self.variables
            .iter()
            .map(|(name, variable)| (VariableRef::new_unchecked(name), variable))
    }
}
