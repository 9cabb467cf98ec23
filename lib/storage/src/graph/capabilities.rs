use quadview_model::LogicalGraph;

/// Describes what a [GraphView](super::GraphView) supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphCapabilities {
    /// Whether [len](super::GraphView::len) returns the exact number of triples.
    pub size_accurate: bool,
    pub add_allowed: bool,
    pub delete_allowed: bool,
    /// Whether triples can be removed through a running iterator.
    pub iterator_remove_allowed: bool,
    /// Whether literals are compared by value (e.g., `"1"^^xsd:int` equals `"01"^^xsd:int`).
    pub handles_literal_typing: bool,
}

impl GraphCapabilities {
    /// Returns the capabilities of a view on `graph`.
    pub fn for_graph(graph: &LogicalGraph) -> Self {
        Self {
            size_accurate: true,
            add_allowed: !graph.is_union_graph(),
            delete_allowed: true,
            iterator_remove_allowed: false,
            handles_literal_typing: false,
        }
    }
}
