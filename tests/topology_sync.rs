//! Topology cache and mutation dispatcher against a scripted authority.

mod support;

use amp_console::{AlertLevel, AlertQueue, ApiOp, ApiSubject, CyclePolicy, TopologyCache};
use support::{seed_topology, ScriptedAuthority};

fn alerts() -> AlertQueue {
    AlertQueue::new(CyclePolicy::default())
}

#[tokio::test]
async fn refresh_replaces_the_mirror_wholesale() {
    let authority = ScriptedAuthority::new();
    authority.set_topology(seed_topology());

    let mut cache = TopologyCache::new();
    let mut queue = alerts();
    assert!(cache.topology().sectors.is_empty());

    cache.refresh(authority.as_ref(), &mut queue).await.unwrap();
    assert_eq!(cache.topology().sectors.len(), 2);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_mirror_and_posts_error() {
    let authority = ScriptedAuthority::new();
    authority.set_topology(seed_topology());

    let mut cache = TopologyCache::new();
    let mut queue = alerts();
    cache.refresh(authority.as_ref(), &mut queue).await.unwrap();

    authority.fail_topology(true);
    assert!(cache.refresh(authority.as_ref(), &mut queue).await.is_err());

    // The mirror is untouched and the failure was reported.
    assert_eq!(cache.topology().sectors.len(), 2);
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn add_then_delete_asset_round_trips_through_refetch() {
    let authority = ScriptedAuthority::new();
    authority.set_topology(seed_topology());

    let mut cache = TopologyCache::new();
    let mut queue = alerts();
    cache.refresh(authority.as_ref(), &mut queue).await.unwrap();

    let add = serde_json::json!({
        "sector": "barn",
        "asset": {"Header": {"Name": "feeder", "Description": "auto feeder", "Tags": []}}
    })
    .to_string();
    cache
        .dispatch(
            authority.as_ref(),
            &mut queue,
            ApiOp::Add,
            ApiSubject::Asset,
            add,
        )
        .await
        .unwrap();
    assert!(cache.asset_in_sector("barn", "feeder").is_some());

    let del = serde_json::json!({
        "sector": "barn",
        "asset": {"Header": {"Name": "feeder", "Description": "", "Tags": []}}
    })
    .to_string();
    cache
        .dispatch(
            authority.as_ref(),
            &mut queue,
            ApiOp::Del,
            ApiSubject::Asset,
            del,
        )
        .await
        .unwrap();
    assert!(cache.asset_in_sector("barn", "feeder").is_none());
}

#[tokio::test]
async fn failed_mutation_names_op_and_subject_and_leaves_mirror_alone() {
    let authority = ScriptedAuthority::new();
    authority.set_topology(seed_topology());

    let mut cache = TopologyCache::new();
    let mut queue = alerts();
    cache.refresh(authority.as_ref(), &mut queue).await.unwrap();

    authority.fail_mutation(true);
    let result = cache
        .dispatch(
            authority.as_ref(),
            &mut queue,
            ApiOp::Del,
            ApiSubject::Sector,
            "greenhouse",
        )
        .await;
    assert!(result.is_err());

    // Mirror still holds the sector; the alert identifies the attempt.
    assert!(cache.sector("greenhouse").is_some());
    let mut surface = support::RecordingSurface::new();
    queue.tick(&mut surface);
    let visible = surface.visible_alerts();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].0, AlertLevel::Error);
    assert!(visible[0].1.contains("delete"));
    assert!(visible[0].1.contains("sector"));
}

#[tokio::test]
async fn successful_mutation_always_refetches() {
    let authority = ScriptedAuthority::new();
    authority.set_topology(seed_topology());

    let mut cache = TopologyCache::new();
    let mut queue = alerts();
    cache
        .dispatch(
            authority.as_ref(),
            &mut queue,
            ApiOp::Del,
            ApiSubject::Sector,
            "barn",
        )
        .await
        .unwrap();

    // The mirror reflects the refetched tree, not a local patch: the
    // dispatch above also pulled in everything else the authority holds.
    assert!(cache.sector("barn").is_none());
    assert!(cache.sector("greenhouse").is_some());
    assert_eq!(cache.topology().signals.len(), 1);

    let log = authority.mutations();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].op, ApiOp::Del);
    assert_eq!(log[0].subject, ApiSubject::Sector);
    assert_eq!(log[0].data, "barn");
}
