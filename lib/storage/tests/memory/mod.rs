mod mem_quad_storage;

use quadview_common::error::StorageError;
use quadview_common::{GraphSelector, QuadStorage, TripleFilter};
use quadview_model::Term;
use quadview_storage::memory::{MemQuadStorage, MemStorageContext};

fn create_storage() -> MemQuadStorage {
    MemQuadStorage::new()
}

/// Scans `graph` and decodes every position of the returned tuples.
fn scan_terms(
    context: &MemStorageContext,
    graph: GraphSelector<'_>,
    filter: TripleFilter<'_>,
) -> Result<Vec<Vec<Option<Term>>>, StorageError> {
    context
        .scan(graph, filter)?
        .map(|tuple| {
            tuple?
                .as_slice()
                .iter()
                .map(|id| {
                    if id.is_default_graph() {
                        Ok(None)
                    } else {
                        context.decode(*id).map(Some)
                    }
                })
                .collect()
        })
        .collect()
}
