use super::common::*;
use crate::age_groups::{AgeGroupRegistry, AgeRange, InvalidRange, RegistryError};
use crate::error::ErrorKind;
use proptest::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn register_rejects_inverted_range() {
    let registry = registry();
    match registry.register(10, 5).await {
        Err(err @ RegistryError::InvalidRange(InvalidRange {
            min_age: 10,
            max_age: 5,
        })) => assert_eq!(err.kind(), ErrorKind::Validation),
        other => panic!("expected range error, got {other:?}"),
    }
    assert!(registry.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn register_reports_the_conflicting_group() {
    let registry = registry();
    let adults = registry.register(18, 60).await.expect("first group registers");

    match registry.register(30, 40).await {
        Err(err @ RegistryError::Overlap { .. }) => {
            assert_eq!(err.kind(), ErrorKind::Conflict);
            let RegistryError::Overlap { existing } = err else {
                unreachable!()
            };
            assert_eq!(existing, adults);
        }
        other => panic!("expected overlap, got {other:?}"),
    }
}

#[tokio::test]
async fn shared_endpoints_conflict() {
    let registry = registry();
    registry.register(0, 10).await.expect("registers");
    assert!(matches!(
        registry.register(10, 20).await,
        Err(RegistryError::Overlap { .. })
    ));
    registry.register(11, 20).await.expect("adjacent range registers");
    assert_eq!(registry.list().await.expect("list").len(), 2);
}

#[tokio::test]
async fn contains_age_tracks_deletion() {
    let registry = registry();
    let group = registry.register(18, 60).await.expect("registers");
    assert!(registry.contains_age(25).await.expect("lookup"));

    registry.delete(group.id.as_str()).await.expect("deletes");
    assert!(!registry.contains_age(25).await.expect("lookup"));
}

#[tokio::test]
async fn delete_distinguishes_missing_from_malformed() {
    let registry = registry();

    match registry.delete("64b7f0c2a1e4d3b2c1a0f9e8").await {
        Err(err @ RegistryError::NotFound(_)) => assert_eq!(err.kind(), ErrorKind::NotFound),
        other => panic!("expected not found, got {other:?}"),
    }
    match registry.delete("abc").await {
        Err(err @ RegistryError::InvalidIdentifier(_)) => {
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier)
        }
        other => panic!("expected invalid identifier, got {other:?}"),
    }
}

#[tokio::test]
async fn store_failures_surface_as_unavailable() {
    let registry = AgeGroupRegistry::new(Arc::new(UnavailableStore));
    match registry.register(1, 2).await {
        Err(err @ RegistryError::Store(_)) => assert_eq!(err.kind(), ErrorKind::Unavailable),
        other => panic!("expected store error, got {other:?}"),
    }
    assert!(registry.contains_age(5).await.is_err());
    assert!(matches!(
        registry.delete("64b7f0c2a1e4d3b2c1a0f9e8").await,
        Err(RegistryError::Store(_))
    ));
}

#[tokio::test]
async fn concurrent_registrations_keep_intervals_disjoint() {
    let registry = Arc::new(registry());
    let attempts: Vec<_> = (0..16u32)
        .map(|offset| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.register(offset, offset + 20).await })
        })
        .collect();

    let mut accepted = 0;
    for attempt in attempts {
        if attempt.await.expect("task joins").is_ok() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(registry.list().await.expect("list").len(), 1);
}

proptest! {
    #[test]
    fn registered_intervals_never_overlap(
        candidates in proptest::collection::vec((0u32..120, 1u32..40), 1..40)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime builds");

        let groups = runtime.block_on(async move {
            let registry = registry();
            for (min_age, span) in candidates {
                match registry.register(min_age, min_age + span).await {
                    Ok(_) | Err(RegistryError::Overlap { .. }) => {}
                    Err(other) => panic!("unexpected registry error: {other:?}"),
                }
            }
            registry.list().await.expect("list")
        });

        for (idx, left) in groups.iter().enumerate() {
            for right in &groups[idx + 1..] {
                prop_assert!(
                    !left.range().overlaps(&right.range()),
                    "{left} overlaps {right}"
                );
            }
        }
    }

    #[test]
    fn overlap_matches_closed_interval_intersection(
        a in 0u32..50, a_span in 1u32..20, b in 0u32..50, b_span in 1u32..20
    ) {
        let left = AgeRange::new(a, a + a_span).expect("valid");
        let right = AgeRange::new(b, b + b_span).expect("valid");
        let intersects = (a..=a + a_span).any(|age| right.contains(age));
        prop_assert_eq!(left.overlaps(&right), intersects);
    }
}
