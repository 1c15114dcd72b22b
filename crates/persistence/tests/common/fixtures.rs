//! Catalog fixtures.
//!
//! A small hexagonal-architecture catalog with known keys, so slice tests can
//! assert exact page contents.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use canon_persistence::backends::memory::MemoryBackend;
use canon_persistence::catalog::{
    Architecture, ClassType, ClassTypeCategory, CodingRule, Convention, Layer, Module,
    RuleCategory, RuleSeverity, TechStack, TechStackStatus,
};
use canon_persistence::core::{FixedClock, SliceService};
use canon_persistence::types::PageSizeLimits;

/// The instant every fixture row is stamped with.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
}

/// Creates a backend on a fixed clock.
pub fn create_backend() -> (MemoryBackend, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(epoch()));
    (MemoryBackend::with_clock(clock.clone()), clock)
}

/// Creates a backend holding the full fixture catalog.
pub fn seeded_backend() -> MemoryBackend {
    let (backend, _) = create_backend();
    seed_catalog(&backend);
    backend
}

/// Wraps a backend in a service with default limits.
pub fn service(backend: MemoryBackend) -> SliceService<MemoryBackend> {
    SliceService::new(Arc::new(backend), PageSizeLimits::default())
}

/// Inserts the fixture catalog.
///
/// - tech stacks 1..=2, the second deprecated
/// - architectures 1..=2 on tech stacks 1 and 2
/// - layers 1..=5: 1..=3 belong to architecture 1, 4..=5 to architecture 2
/// - modules 1..=4: two per layer 1 and 2
/// - conventions 1..=2 on modules 1 and 3
/// - coding rules 1..=6 on conventions 1 and 2
/// - class type categories 1..=2, one per architecture
/// - class types 1..=3: 1..=2 in category 1, 3 in category 2
pub fn seed_catalog(backend: &MemoryBackend) {
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
        .insert(Architecture::new(1, 1, "Clean Hexagon", "HEXAGONAL"))
        .unwrap();
    backend
        .insert(
            Architecture::new(2, 2, "Layered Monolith", "LAYERED")
                .with_description("Classic n-tier"),
        )
        .unwrap();

    let layers = [
        (1, 1, "DOM", "Domain"),
        (2, 1, "APP", "Application"),
        (3, 1, "INF", "Infrastructure"),
        (4, 2, "PRE", "Presentation"),
        (5, 2, "PER", "Persistence"),
    ];
    for (id, architecture, code, name) in layers {
        backend
            .insert(Layer::new(id, architecture, code, name))
            .unwrap();
    }

    let modules = [
        (1, 1, "domain-model", "com.acme.domain.model"),
        (2, 1, "domain-service", "com.acme.domain.service"),
        (3, 2, "use-cases", "com.acme.application.usecase"),
        (4, 2, "ports", "com.acme.application.port"),
    ];
    for (id, layer, name, path) in modules {
        backend.insert(Module::new(id, layer, name, path)).unwrap();
    }

    backend
        .insert(Convention::new(1, 1, "1.0.0").with_description("Domain conventions"))
        .unwrap();
    backend
        .insert(Convention::new(2, 3, "1.0.0").with_description("Use case conventions"))
        .unwrap();

    let rules = [
        (1, 1, "NAM-001", "Ports end in Port", RuleSeverity::Major, RuleCategory::Naming),
        (2, 1, "ANN-001", "No field injection", RuleSeverity::Critical, RuleCategory::Annotation),
        (3, 1, "STR-001", "Domain has no framework imports", RuleSeverity::Blocker, RuleCategory::Structure),
        (4, 2, "BEH-001", "Aggregates guard invariants", RuleSeverity::Major, RuleCategory::Behavior),
        (5, 2, "NAM-002", "Adapters end in Adapter", RuleSeverity::Minor, RuleCategory::Naming),
        (6, 2, "ANN-002", "Transactions at the use case", RuleSeverity::Critical, RuleCategory::Annotation),
    ];
    for (id, convention, code, name, severity, category) in rules {
        backend
            .insert(
                CodingRule::new(id, convention, code, name, severity, category)
                    .with_description(format!("{name}.")),
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
        .insert(
            ClassType::new(1, 1, "AGGREGATE", "Aggregate Root")
                .with_description("Consistency boundary"),
        )
        .unwrap();
    backend
        .insert(ClassType::new(2, 1, "VALUE_OBJECT", "Value Object"))
        .unwrap();
    backend
        .insert(ClassType::new(3, 2, "ADAPTER", "Adapter").with_description("Translates a port"))
        .unwrap();
}
