//! Property tests for vector store query ordering and retrieval filtering.

use std::collections::HashMap;

use proptest::prelude::*;
use voxrag_retrieval::document::{Chunk, ChunkMetadata};
use voxrag_retrieval::inmemory::InMemoryVectorStore;
use voxrag_retrieval::vectorstore::VectorStore;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a chunk with a normalized embedding.
fn arb_chunk(dim: usize) -> impl Strategy<Value = Chunk> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| Chunk {
            id,
            text,
            embedding,
            metadata: ChunkMetadata {
                source: "doc.txt".to_string(),
                chunk_index: 0,
                total_chunks: 1,
                total_pages: None,
                chunk_length: None,
            },
        },
    )
}

mod prop_query_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any set of stored chunks, `query` returns matches in
        /// ascending cosine-distance order, bounded by both `n` and the
        /// corpus size.
        #[test]
        fn matches_ascending_and_bounded(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            n in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (matches, unique_count) = rt.block_on(async {
                let store = InMemoryVectorStore::new();

                // Deduplicate ids up front; `add` rejects collisions.
                let mut deduped: HashMap<String, Chunk> = HashMap::new();
                for chunk in &chunks {
                    deduped.entry(chunk.id.clone()).or_insert_with(|| chunk.clone());
                }
                let count = deduped.len();
                for chunk in deduped.values() {
                    store.add(chunk).await.unwrap();
                }

                (store.query(&query, n).await.unwrap(), count)
            });

            prop_assert!(matches.len() <= n);
            prop_assert!(matches.len() <= unique_count);

            for window in matches.windows(2) {
                prop_assert!(
                    window[0].distance <= window[1].distance,
                    "matches not in ascending distance order: {} > {}",
                    window[0].distance,
                    window[1].distance,
                );
            }

            // Cosine distance of normalized vectors stays within [0, 2].
            for m in &matches {
                prop_assert!((-1e-5..=2.0 + 1e-5).contains(&(m.distance as f64)));
            }
        }
    }
}
