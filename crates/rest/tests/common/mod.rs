//! Test infrastructure for the REST API.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};

use canon_persistence::backends::memory::MemoryBackend;
use canon_persistence::catalog::{
    Architecture, ClassType, ClassTypeCategory, CodingRule, Convention, Layer, Module,
    PlatformType, RuleCategory, RuleSeverity, TechStack, TechStackStatus,
};
use canon_persistence::core::{FixedClock, SliceEntity, SliceRepository};
use canon_persistence::error::{StorageError, StorageResult};
use canon_persistence::types::SliceCriteria;
use canon_rest::{CatalogStorage, ServerConfig, create_app_with_clock};

/// The instant the test clock is pinned at.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap()
}

/// Same instant as [`now`], as serialized in bodies.
pub const NOW: &str = "2024-04-02T10:00:00Z";

/// Creates a test server over `storage` with a pinned clock.
pub fn server_over<S>(storage: S, config: ServerConfig) -> TestServer
where
    S: CatalogStorage,
{
    let clock = Arc::new(FixedClock::new(now()));
    let app = create_app_with_clock(storage, config, clock);
    TestServer::new(app).expect("Failed to create test server")
}

/// Creates a test server over the fixture catalog.
pub fn create_test_server() -> TestServer {
    server_over(seeded_backend(), ServerConfig::for_testing())
}

/// Builds the fixture catalog.
///
/// - tech stacks 1..=3 (2 deprecated, 3 frontend)
/// - architectures 1..=2
/// - layers 1..=5 (1..=3 in architecture 1)
/// - modules 1..=4 (two per layer 1 and 2)
/// - conventions 1..=3 (1 and 2 on module 1)
/// - coding rules 1..=6 on conventions 1 and 2
/// - class type categories 1..=2, one per architecture
/// - class types 1..=3 (1..=2 in category 1)
pub fn seeded_backend() -> MemoryBackend {
    let backend = MemoryBackend::with_clock(Arc::new(FixedClock::new(now())));

    backend
        .insert(TechStack::new(1, "Spring Boot 3", "JAVA", "SPRING_BOOT"))
        .unwrap();
    backend
        .insert(
            TechStack::new(2, "Spring Boot 2", "JAVA", "SPRING_BOOT")
                .with_status(TechStackStatus::Deprecated),
        )
        .unwrap();
    backend
        .insert(
            TechStack::new(3, "Next.js", "TYPESCRIPT", "NEXT_JS")
                .with_platform(PlatformType::Frontend),
        )
        .unwrap();

    backend
        .insert(Architecture::new(1, 1, "Clean Hexagon", "HEXAGONAL"))
        .unwrap();
    backend
        .insert(Architecture::new(2, 2, "Layered Monolith", "LAYERED"))
        .unwrap();

    for (id, architecture, code, name) in [
        (1, 1, "DOM", "Domain"),
        (2, 1, "APP", "Application"),
        (3, 1, "INF", "Infrastructure"),
        (4, 2, "PRE", "Presentation"),
        (5, 2, "PER", "Persistence"),
    ] {
        backend
            .insert(Layer::new(id, architecture, code, name))
            .unwrap();
    }

    for (id, layer, name, path) in [
        (1, 1, "domain-model", "com.acme.domain.model"),
        (2, 1, "domain-service", "com.acme.domain.service"),
        (3, 2, "use-cases", "com.acme.application.usecase"),
        (4, 2, "ports", "com.acme.application.port"),
    ] {
        backend.insert(Module::new(id, layer, name, path)).unwrap();
    }

    for (id, module, version) in [(1, 1, "1.0.0"), (2, 1, "1.1.0"), (3, 3, "1.0.0")] {
        backend
            .insert(Convention::new(id, module, version))
            .unwrap();
    }

    for (id, convention, code, severity, category) in [
        (1, 1, "NAM-001", RuleSeverity::Major, RuleCategory::Naming),
        (2, 1, "ANN-001", RuleSeverity::Critical, RuleCategory::Annotation),
        (3, 1, "STR-001", RuleSeverity::Blocker, RuleCategory::Structure),
        (4, 2, "BEH-001", RuleSeverity::Major, RuleCategory::Behavior),
        (5, 2, "NAM-002", RuleSeverity::Minor, RuleCategory::Naming),
        (6, 2, "ANN-002", RuleSeverity::Critical, RuleCategory::Annotation),
    ] {
        backend
            .insert(
                CodingRule::new(id, convention, code, format!("Rule {code}"), severity, category)
                    .with_description(format!("Description of {code}")),
            )
            .unwrap();
    }

    backend
        .insert(ClassTypeCategory::new(1, 1, "DOMAIN", "Domain"))
        .unwrap();
    backend
        .insert(ClassTypeCategory::new(2, 2, "ADAPTER", "Adapter"))
        .unwrap();

    backend
        .insert(ClassType::new(1, 1, "AGGREGATE", "Aggregate Root"))
        .unwrap();
    backend
        .insert(ClassType::new(2, 1, "VALUE_OBJECT", "Value Object"))
        .unwrap();
    backend
        .insert(ClassType::new(3, 2, "ADAPTER", "Adapter").with_description("Translates a port"))
        .unwrap();

    backend
}

/// Storage whose every query fails.
#[derive(Debug, Clone, Copy)]
pub enum BrokenStorage {
    /// Reports the backend as unavailable.
    Unavailable,
    /// Reports a failed query.
    Failing,
}

#[async_trait]
impl<E: SliceEntity> SliceRepository<E> for BrokenStorage {
    fn backend_name(&self) -> &'static str {
        "broken"
    }

    async fn find_by_slice_criteria(&self, _criteria: &SliceCriteria<E>) -> StorageResult<Vec<E>> {
        Err(match self {
            BrokenStorage::Unavailable => StorageError::Unavailable {
                backend_name: "broken".to_string(),
                message: "connection refused".to_string(),
            },
            BrokenStorage::Failing => StorageError::QueryFailed {
                message: "scan aborted".to_string(),
            },
        })
    }
}

/// Extracts the `id` of every row in a slice response body.
pub fn ids(body: &serde_json::Value) -> Vec<i64> {
    body["data"]["content"]
        .as_array()
        .expect("content is an array")
        .iter()
        .map(|row| row["id"].as_i64().expect("id is an integer"))
        .collect()
}
