//! Slice pagination integration tests against the in-memory backend.

mod common;

use canon_persistence::backends::memory::MemoryBackend;
use canon_persistence::catalog::{
    Architecture, ArchitectureFilterParams, ClassType, ClassTypeFilterParams, CodingRule,
    CodingRuleFilterParams, Convention, ConventionFilterParams, Layer, LayerFilterParams,
    LayerId, Module, ModuleFilterParams, TechStack, TechStackFilterParams,
};
use canon_persistence::core::{SliceEntity, SliceRepository, SliceService};
use canon_persistence::error::{ErrorKind, QueryError, SliceError};
use canon_persistence::types::SearchParams;

use common::{create_backend, seeded_backend, service};

/// Walks every slice from the first page and returns the keys per page.
async fn walk<E: SliceEntity>(
    service: &SliceService<MemoryBackend>,
    params: SearchParams<E::FilterParams>,
) -> Vec<Vec<i64>>
where
    MemoryBackend: SliceRepository<E>,
{
    let mut pages = Vec::new();
    let mut params = params;
    loop {
        let slice = service.search::<E>(params.clone()).await.unwrap();
        let keys: Vec<i64> = slice
            .content
            .iter()
            .map(|dto| serde_json::to_value(dto).unwrap()["id"].as_i64().unwrap())
            .collect();
        pages.push(keys);
        match slice.next_cursor() {
            Some(cursor) => params.cursor = Some(cursor.to_string()),
            None => break,
        }
        assert!(pages.len() < 100, "pagination did not terminate");
    }
    pages
}

// ============================================================================
// Walking
// ============================================================================

#[tokio::test]
async fn test_walk_layers_exhausts_in_key_order() {
    let service = service(seeded_backend());

    let pages = walk::<Layer>(&service, SearchParams::first(2)).await;
    assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[tokio::test]
async fn test_exact_multiple_ends_without_empty_page() {
    let service = service(seeded_backend());

    let pages = walk::<ClassType>(&service, SearchParams::first(3)).await;
    assert_eq!(pages, vec![vec![1, 2, 3]]);
}

#[tokio::test]
async fn test_walk_coding_rules_descending() {
    let service = service(seeded_backend());

    let pages = walk::<CodingRule>(&service, SearchParams::first(4)).await;
    assert_eq!(pages, vec![vec![6, 5, 4, 3], vec![2, 1]]);
}

#[tokio::test]
async fn test_walk_modules_descending() {
    let service = service(seeded_backend());

    let pages = walk::<Module>(&service, SearchParams::first(3)).await;
    assert_eq!(pages, vec![vec![4, 3, 2], vec![1]]);

    let slice = service
        .search::<Module>(SearchParams::after("3", 10))
        .await
        .unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|m| m.id).collect();
    assert_eq!(keys, vec![2, 1]);
}

#[tokio::test]
async fn test_walk_conventions_descending() {
    let service = service(seeded_backend());

    let pages = walk::<Convention>(&service, SearchParams::first(1)).await;
    assert_eq!(pages, vec![vec![2], vec![1]]);
}

#[tokio::test]
async fn test_cursor_equal_to_last_key_yields_empty_slice() {
    let service = service(seeded_backend());

    let slice = service
        .search::<Layer>(SearchParams::after("5", 10))
        .await
        .unwrap();
    assert!(slice.is_empty());
    assert!(!slice.has_next());
    assert_eq!(slice.next_cursor(), None);
}

#[tokio::test]
async fn test_cursor_need_not_exist() {
    let (backend, _) = create_backend();
    for id in [10, 20, 30] {
        backend
            .insert(Layer::new(id, 1, format!("L{id}"), format!("Layer {id}")))
            .unwrap();
    }
    let service = service(backend);

    let slice = service
        .search::<Layer>(SearchParams::after("15", 10))
        .await
        .unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|l| l.id).collect();
    assert_eq!(keys, vec![20, 30]);
}

#[tokio::test]
async fn test_empty_table() {
    let (backend, _) = create_backend();
    let service = service(backend);

    let slice = service
        .search::<Architecture>(SearchParams::first(20))
        .await
        .unwrap();
    assert!(slice.is_empty());
    assert!(!slice.has_next());
    assert_eq!(slice.slice_meta.size, 20);
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn test_filter_layers_by_architecture() {
    let service = service(seeded_backend());

    let params = SearchParams::first(2).with_filters(LayerFilterParams {
        architecture_ids: Some(vec![1]),
    });
    let pages = walk::<Layer>(&service, params).await;
    assert_eq!(pages, vec![vec![1, 2], vec![3]]);
}

#[tokio::test]
async fn test_filters_and_ids_combine() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10)
        .with_ids(Some(vec![2, 3, 4]))
        .with_filters(LayerFilterParams {
            architecture_ids: Some(vec![1]),
        });
    let slice = service.search::<Layer>(params).await.unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|l| l.id).collect();
    assert_eq!(keys, vec![2, 3]);
}

#[tokio::test]
async fn test_empty_id_list_matches_nothing() {
    let service = service(seeded_backend());

    let slice = service
        .search::<Module>(SearchParams::first(10).with_ids(Some(vec![])))
        .await
        .unwrap();
    assert!(slice.is_empty());
    assert!(!slice.has_next());
}

#[tokio::test]
async fn test_filter_modules_by_layer() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10).with_filters(ModuleFilterParams {
        layer_ids: Some(vec![2]),
    });
    let slice = service.search::<Module>(params).await.unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|m| m.id).collect();
    assert_eq!(keys, vec![4, 3]);
}

#[tokio::test]
async fn test_filter_conventions_by_module() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10).with_filters(ConventionFilterParams {
        module_ids: Some(vec![3]),
    });
    let slice = service.search::<Convention>(params).await.unwrap();
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.content[0].description.as_deref(), Some("Use case conventions"));
}

#[tokio::test]
async fn test_filter_tech_stacks_by_status() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10).with_filters(TechStackFilterParams {
        statuses: Some(vec!["DEPRECATED".to_string()]),
        ..Default::default()
    });
    let slice = service.search::<TechStack>(params).await.unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|t| t.id).collect();
    assert_eq!(keys, vec![2]);
}

#[tokio::test]
async fn test_filter_class_types_by_architecture() {
    let service = service(seeded_backend());

    let params = SearchParams::first(1).with_filters(ClassTypeFilterParams {
        architecture_ids: Some(vec![1]),
        ..Default::default()
    });
    let pages = walk::<ClassType>(&service, params).await;
    assert_eq!(pages, vec![vec![1], vec![2]]);

    let params = SearchParams::first(10).with_filters(ClassTypeFilterParams {
        category_ids: Some(vec![1]),
        architecture_ids: Some(vec![2]),
    });
    let slice = service.search::<ClassType>(params).await.unwrap();
    assert!(slice.is_empty());
}

#[tokio::test]
async fn test_filter_coding_rules_by_category_and_severity() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10).with_filters(CodingRuleFilterParams {
        convention_ids: None,
        categories: Some(vec!["annotation".to_string(), "NAMING".to_string()]),
        severities: Some(vec!["CRITICAL".to_string(), "MINOR".to_string()]),
    });
    let slice = service.search::<CodingRule>(params).await.unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|r| r.id).collect();
    assert_eq!(keys, vec![6, 5, 2]);
}

#[tokio::test]
async fn test_filter_architectures_by_tech_stack() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10).with_filters(ArchitectureFilterParams {
        tech_stack_ids: Some(vec![2]),
    });
    let slice = service.search::<Architecture>(params).await.unwrap();
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.content[0].name, "Layered Monolith");
}

#[tokio::test]
async fn test_unknown_severity_rejected() {
    let service = service(seeded_backend());

    let params = SearchParams::first(10).with_filters(CodingRuleFilterParams {
        severities: Some(vec!["LOW".to_string()]),
        ..Default::default()
    });
    let err = service.search::<CodingRule>(params).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFilter);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let service = service(seeded_backend());

    let params = SearchParams::<LayerFilterParams>::first(10).with_search("name", "TION");
    let slice = service.search::<Layer>(params).await.unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|l| l.id).collect();
    assert_eq!(keys, vec![2, 4]);
}

#[tokio::test]
async fn test_search_paginates_with_cursor() {
    let service = service(seeded_backend());

    let params = SearchParams::<CodingRuleFilterParams>::first(1).with_search("CODE", "ann");
    let pages = walk::<CodingRule>(&service, params).await;
    assert_eq!(pages, vec![vec![6], vec![2]]);
}

#[tokio::test]
async fn test_search_optional_text_field() {
    let service = service(seeded_backend());

    let params =
        SearchParams::<ClassTypeFilterParams>::first(10).with_search("DESCRIPTION", "port");
    let slice = service.search::<ClassType>(params).await.unwrap();
    let keys: Vec<i64> = slice.content.iter().map(|c| c.id).collect();
    assert_eq!(keys, vec![3]);
}

#[tokio::test]
async fn test_search_field_outside_entity_enumeration() {
    let service = service(seeded_backend());

    // MODULE_PATH is a module field, not a layer one.
    let params = SearchParams::<LayerFilterParams>::first(10).with_search("MODULE_PATH", "x");
    let err = service.search::<Layer>(params).await.unwrap_err();
    assert!(matches!(
        err,
        SliceError::Query(QueryError::InvalidSearchField { .. })
    ));
}

// ============================================================================
// Validation and lifecycle
// ============================================================================

#[tokio::test]
async fn test_malformed_cursor() {
    let service = service(seeded_backend());

    let err = service
        .search::<Layer>(SearchParams::after("abc", 5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCursor);
}

#[tokio::test]
async fn test_page_size_bounds() {
    let service = service(seeded_backend());

    for size in [0, -1, 101] {
        let err = service
            .search::<Layer>(SearchParams::first(size))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPageSize, "size {size}");
    }

    let slice = service
        .search::<Layer>(SearchParams::first(100))
        .await
        .unwrap();
    assert_eq!(slice.len(), 5);
}

#[tokio::test]
async fn test_soft_deleted_rows_are_skipped() {
    let backend = seeded_backend();
    assert!(backend.soft_delete::<Layer>(LayerId::new(2)));
    let service = service(backend);

    let pages = walk::<Layer>(&service, SearchParams::first(2)).await;
    assert_eq!(pages, vec![vec![1, 3], vec![4, 5]]);
}

#[tokio::test]
async fn test_rows_inserted_ahead_of_cursor_are_seen() {
    let (backend, _) = create_backend();
    for id in 1..=3 {
        backend
            .insert(Layer::new(id, 1, format!("L{id}"), format!("Layer {id}")))
            .unwrap();
    }
    let service = service(backend);

    let first = service
        .search::<Layer>(SearchParams::first(2))
        .await
        .unwrap();
    assert_eq!(first.next_cursor(), Some("2"));

    service
        .repository()
        .insert(Layer::new(4, 1, "L4", "Layer 4"))
        .unwrap();

    let second = service
        .search::<Layer>(SearchParams::after("2", 2))
        .await
        .unwrap();
    let keys: Vec<i64> = second.content.iter().map(|l| l.id).collect();
    assert_eq!(keys, vec![3, 4]);
    assert!(!second.has_next());
}

#[tokio::test]
async fn test_dto_carries_audit_timestamps() {
    let service = service(seeded_backend());

    let slice = service
        .search::<Layer>(SearchParams::first(1))
        .await
        .unwrap();
    assert_eq!(slice.content[0].created_at, common::epoch());
    assert_eq!(slice.content[0].updated_at, common::epoch());
}
