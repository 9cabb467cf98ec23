use quadview_common::ObjectId;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::ops::Bound;
use std::sync::Arc;
use thiserror::Error;

/// A quad in GSPO order.
pub type EncodedQuad = [ObjectId; 4];

/// Represents what part of a quad is indexed at the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexComponent {
    /// The graph name
    GraphName,
    /// The subject
    Subject,
    /// The predicate
    Predicate,
    /// The object
    Object,
}

impl IndexComponent {
    /// Returns the index of the component in a GSPO quad.
    pub fn gspo_index(self) -> usize {
        match self {
            IndexComponent::GraphName => 0,
            IndexComponent::Subject => 1,
            IndexComponent::Predicate => 2,
            IndexComponent::Object => 3,
        }
    }
}

impl Display for IndexComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexComponent::GraphName => write!(f, "G"),
            IndexComponent::Subject => write!(f, "S"),
            IndexComponent::Predicate => write!(f, "P"),
            IndexComponent::Object => write!(f, "O"),
        }
    }
}

#[derive(Debug, Error)]
#[error("Index components must be distinct")]
pub struct IndexComponentsCreationError;

/// Represents a list of *disjunct* index components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexComponents([IndexComponent; 4]);

impl IndexComponents {
    /// A GSPO index. Used for scans within a single graph.
    pub const GSPO: IndexComponents = IndexComponents([
        IndexComponent::GraphName,
        IndexComponent::Subject,
        IndexComponent::Predicate,
        IndexComponent::Object,
    ]);

    /// A SPOG index. Used for scans over all named graphs, as quads with equal subject,
    /// predicate, and object are adjacent.
    pub const SPOG: IndexComponents = IndexComponents([
        IndexComponent::Subject,
        IndexComponent::Predicate,
        IndexComponent::Object,
        IndexComponent::GraphName,
    ]);

    /// Tries to create a new [IndexComponents].
    ///
    /// Returns an error if an [IndexComponent] appears more than once.
    pub fn try_new(
        components: [IndexComponent; 4],
    ) -> Result<Self, IndexComponentsCreationError> {
        for (i, component) in components.iter().enumerate() {
            if components[..i].contains(component) {
                return Err(IndexComponentsCreationError);
            }
        }
        Ok(IndexComponents(components))
    }

    /// Returns a reference to the inner array.
    pub fn inner(&self) -> &[IndexComponent; 4] {
        &self.0
    }

    /// Reorders a GSPO quad into the order of this index.
    fn permute(self, quad: &EncodedQuad) -> EncodedQuad {
        self.0.map(|component| quad[component.gspo_index()])
    }

    /// Reorders a quad in the order of this index back to GSPO.
    fn restore(self, entry: &EncodedQuad) -> EncodedQuad {
        let mut quad = [ObjectId::DEFAULT_GRAPH; 4];
        for (position, component) in self.0.iter().enumerate() {
            quad[component.gspo_index()] = entry[position];
        }
        quad
    }
}

impl Display for IndexComponents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for component in &self.0 {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Restricts the graph position of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphIdPattern {
    /// A single graph, including the default graph.
    Exact(ObjectId),
    /// Every graph except the default graph.
    AnyNamed,
}

/// A quad pattern on object ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPattern {
    pub graph: GraphIdPattern,
    pub subject: Option<ObjectId>,
    pub predicate: Option<ObjectId>,
    pub object: Option<ObjectId>,
}

impl IdPattern {
    /// Returns the bound value for each position of a GSPO quad.
    fn bound_positions(&self) -> [Option<ObjectId>; 4] {
        let graph = match self.graph {
            GraphIdPattern::Exact(id) => Some(id),
            GraphIdPattern::AnyNamed => None,
        };
        [graph, self.subject, self.predicate, self.object]
    }

    pub fn matches(&self, quad: &EncodedQuad) -> bool {
        let graph_matches = match self.graph {
            GraphIdPattern::Exact(id) => quad[0] == id,
            GraphIdPattern::AnyNamed => !quad[0].is_default_graph(),
        };
        graph_matches
            && self
                .bound_positions()
                .iter()
                .zip(quad)
                .skip(1)
                .all(|(bound, value)| bound.map_or(true, |bound| bound == *value))
    }
}

/// A single permutation of the stored quads.
#[derive(Debug, Clone)]
pub struct MemQuadIndex {
    components: IndexComponents,
    content: BTreeSet<EncodedQuad>,
}

impl MemQuadIndex {
    pub fn new(components: IndexComponents) -> Self {
        Self {
            components,
            content: BTreeSet::new(),
        }
    }

    pub fn components(&self) -> IndexComponents {
        self.components
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn insert(&mut self, quad: &EncodedQuad) -> bool {
        self.content.insert(self.components.permute(quad))
    }

    pub fn remove(&mut self, quad: &EncodedQuad) -> bool {
        self.content.remove(&self.components.permute(quad))
    }

    /// Returns the smallest and largest entry that can match `pattern`.
    ///
    /// Only the longest prefix of bound components narrows the range. The remaining components
    /// must be checked with [IdPattern::matches].
    fn range_for(&self, pattern: &IdPattern) -> (EncodedQuad, EncodedQuad) {
        let positions = pattern.bound_positions();
        let mut lower = [ObjectId::MIN; 4];
        let mut upper = [ObjectId::MAX; 4];
        for (i, component) in self.components.0.iter().enumerate() {
            let Some(value) = positions[component.gspo_index()] else {
                break;
            };
            lower[i] = value;
            upper[i] = value;
        }
        (lower, upper)
    }

    /// Returns the first entry after `after` (or from the start of the range) that matches
    /// `pattern`, in GSPO order.
    fn next_match(
        &self,
        pattern: &IdPattern,
        range: &(EncodedQuad, EncodedQuad),
        after: Option<&EncodedQuad>,
    ) -> Option<(EncodedQuad, EncodedQuad)> {
        let lower = match after {
            None => Bound::Included(range.0),
            Some(after) => Bound::Excluded(*after),
        };
        self.content
            .range((lower, Bound::Included(range.1)))
            .map(|entry| (*entry, self.components.restore(entry)))
            .find(|(_, quad)| pattern.matches(quad))
    }
}

/// The set of indexes that make up the content of a memory storage.
///
/// Every index contains the same quads.
#[derive(Debug, Clone)]
pub struct MemQuadIndexSet {
    gspo: MemQuadIndex,
    spog: MemQuadIndex,
}

impl Default for MemQuadIndexSet {
    fn default() -> Self {
        Self::new()
    }
}

impl MemQuadIndexSet {
    pub fn new() -> Self {
        Self {
            gspo: MemQuadIndex::new(IndexComponents::GSPO),
            spog: MemQuadIndex::new(IndexComponents::SPOG),
        }
    }

    pub fn len(&self) -> usize {
        self.gspo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gspo.is_empty()
    }

    /// Inserts `quad` into all indexes. Returns false if it was already contained.
    pub fn insert(&mut self, quad: &EncodedQuad) -> bool {
        let inserted = self.gspo.insert(quad);
        if inserted {
            self.spog.insert(quad);
        }
        inserted
    }

    /// Removes `quad` from all indexes. Returns false if it was not contained.
    pub fn remove(&mut self, quad: &EncodedQuad) -> bool {
        let removed = self.gspo.remove(quad);
        if removed {
            self.spog.remove(quad);
        }
        removed
    }

    /// Chooses the index that answers `pattern`.
    ///
    /// Scans over all named graphs must use SPOG to keep quads with equal subject, predicate,
    /// and object adjacent.
    fn choose_index(&self, pattern: &IdPattern) -> &MemQuadIndex {
        match pattern.graph {
            GraphIdPattern::Exact(_) => &self.gspo,
            GraphIdPattern::AnyNamed => &self.spog,
        }
    }

    /// Returns a lazy cursor over the quads matching `pattern`.
    ///
    /// The cursor holds on to this version of the index set. Later modifications of the storage
    /// are not visible to it.
    pub fn scan(self: &Arc<Self>, pattern: IdPattern) -> MemQuadCursor {
        let range = self.choose_index(&pattern).range_for(&pattern);
        MemQuadCursor {
            index_set: Arc::clone(self),
            pattern,
            range,
            last: None,
            exhausted: false,
        }
    }

    /// Collects the quads matching `pattern` eagerly.
    pub fn matching(&self, pattern: &IdPattern) -> Vec<EncodedQuad> {
        let index = self.choose_index(pattern);
        let (lower, upper) = index.range_for(pattern);
        index
            .content
            .range(lower..=upper)
            .map(|entry| index.components.restore(entry))
            .filter(|quad| pattern.matches(quad))
            .collect()
    }
}

/// A lazy scan over a snapshot of a [MemQuadIndexSet].
///
/// Each step resumes the range scan after the last returned entry.
#[derive(Debug)]
pub struct MemQuadCursor {
    index_set: Arc<MemQuadIndexSet>,
    pattern: IdPattern,
    range: (EncodedQuad, EncodedQuad),
    last: Option<EncodedQuad>,
    exhausted: bool,
}

impl Iterator for MemQuadCursor {
    type Item = EncodedQuad;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let index = self.index_set.choose_index(&self.pattern);
        match index.next_match(&self.pattern, &self.range, self.last.as_ref()) {
            Some((entry, quad)) => {
                self.last = Some(entry);
                Some(quad)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}
