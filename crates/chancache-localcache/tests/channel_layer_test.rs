//! Behavior tests for the channel cache layer.
//!
//! Every test wraps a counting store double, so assertions on call counts
//! show exactly when a read reached the store.

mod common;

use chancache_core::{CacheMode, ChannelId, ChannelMember, TeamId, UserId};
use chancache_localcache::{LocalCacheChannelStore, MokaCacheProvider};
use chancache_repository::ChannelStore;
use common::{cached, cached_with, id, CountingChannelStore, COUNT_RESULT};
use futures::future::join_all;
use std::sync::Arc;

// =============================================================================
// Member count
// =============================================================================

#[tokio::test]
async fn test_member_count_second_call_is_cached() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    assert_eq!(store.member_count_calls(), 1);

    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    assert_eq!(store.member_count_calls(), 1);
}

#[tokio::test]
async fn test_member_count_bypass_always_reaches_store() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 1);

    layer.get_member_count(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(store.member_count_calls(), 2);

    layer.get_member_count(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(store.member_count_calls(), 3);
}

#[tokio::test]
async fn test_member_count_bypass_warms_cache() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_member_count(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(store.member_count_calls(), 1);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 1);
}

#[tokio::test]
async fn test_member_count_bypass_overwrites_cached_value() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    store.set_count(12);

    // Stale until refreshed
    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);

    assert_eq!(layer.get_member_count(&id(), CacheMode::Bypass).await.unwrap(), 12);
    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), 12);
    assert_eq!(store.member_count_calls(), 2);
}

#[tokio::test]
async fn test_member_count_from_cache() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    assert_eq!(layer.get_member_count_from_cache(&id()).await, COUNT_RESULT);
    assert_eq!(store.member_count_calls(), 1);

    assert_eq!(layer.get_member_count_from_cache(&id()).await, COUNT_RESULT);
    assert_eq!(store.member_count_calls(), 1);

    // Shares state with the regular accessor
    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 1);
}

#[tokio::test]
async fn test_member_count_from_cache_swallows_store_error() {
    let store = CountingChannelStore::new();
    store.set_failing(true);
    let layer = cached(&store);

    assert_eq!(layer.get_member_count_from_cache(&id()).await, 0);
    assert_eq!(store.member_count_calls(), 1);
}

#[tokio::test]
async fn test_member_count_clear_caches() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.clear_caches();
    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 2);
}

#[tokio::test]
async fn test_member_count_invalidate() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.invalidate_member_count(&id());
    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 2);
}

#[tokio::test]
async fn test_member_count_scenario() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), 10);
    assert_eq!(store.member_count_calls(), 1);
    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), 10);
    assert_eq!(store.member_count_calls(), 1);
    assert_eq!(layer.get_member_count(&id(), CacheMode::Bypass).await.unwrap(), 10);
    assert_eq!(store.member_count_calls(), 2);
    layer.clear_caches();
    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), 10);
    assert_eq!(store.member_count_calls(), 3);
}

// =============================================================================
// Pinned post count
// =============================================================================

#[tokio::test]
async fn test_pinned_post_count_caching() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    assert_eq!(layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.pinned_post_count_calls(), 1);

    layer.get_pinned_post_count(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(store.pinned_post_count_calls(), 2);

    layer.invalidate_pinned_post_count(&id());
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.pinned_post_count_calls(), 3);

    layer.clear_caches();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.pinned_post_count_calls(), 4);
}

#[tokio::test]
async fn test_pinned_post_count_bypass_first_then_cached() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_pinned_post_count(&id(), CacheMode::Bypass).await.unwrap();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.pinned_post_count_calls(), 1);
}

// =============================================================================
// Guest count
// =============================================================================

#[tokio::test]
async fn test_guest_count_caching() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    assert_eq!(layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.guest_count_calls(), 1);

    layer.get_guest_count(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(store.guest_count_calls(), 2);

    layer.invalidate_guest_count(&id());
    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.guest_count_calls(), 3);

    layer.clear_caches();
    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.guest_count_calls(), 4);
}

// =============================================================================
// Channel by id
// =============================================================================

#[tokio::test]
async fn test_get_channel_caching() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    let first = layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    let second = layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(store.get_calls(), 1);

    layer.get(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(store.get_calls(), 2);

    layer.invalidate_channel(&id());
    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.get_calls(), 3);

    layer.clear_caches();
    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.get_calls(), 4);
}

#[tokio::test]
async fn test_get_channel_serves_stale_record_until_invalidated() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    store.rename_channel("Renamed");

    let cached_channel = layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(cached_channel.display_name, "Town Square");

    layer.invalidate_channel(&id());
    let fresh = layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(fresh.display_name, "Renamed");
}

#[tokio::test]
async fn test_get_channel_not_found_is_not_cached() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let missing = ChannelId::new("missing");

    assert!(layer.get(&missing, CacheMode::UseIfPresent).await.unwrap_err().is_not_found());
    assert!(layer.get(&missing, CacheMode::UseIfPresent).await.unwrap_err().is_not_found());
    assert_eq!(store.get_calls(), 2);
}

// =============================================================================
// Members for user
// =============================================================================

#[tokio::test]
async fn test_members_for_user_scenario() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let team = TeamId::new("team");
    let (u1, u2) = (UserId::new("u1"), UserId::new("u2"));

    let list = layer.get_members_for_user(&team, &u1).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 1);
    assert_eq!(layer.get_members_for_user(&team, &u1).await.unwrap(), list);
    assert_eq!(store.members_for_user_calls(), 1);

    assert_eq!(layer.get_members_for_user(&team, &u2).await.unwrap(), list);
    assert_eq!(store.members_for_user_calls(), 2);

    layer.invalidate_members_for_all_users();
    layer.get_members_for_user(&team, &u1).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 3);
    layer.get_members_for_user(&team, &u2).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 4);
}

#[tokio::test]
async fn test_invalidate_members_for_user_only_affects_that_user() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let team = TeamId::new("team");
    let (u1, u2) = (UserId::new("u1"), UserId::new("u2"));

    layer.get_members_for_user(&team, &u1).await.unwrap();
    layer.get_members_for_user(&team, &u2).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 2);

    layer.invalidate_members_for_user(&u1);

    layer.get_members_for_user(&team, &u2).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 2);
    layer.get_members_for_user(&team, &u1).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 3);
}

#[tokio::test]
async fn test_members_for_user_key_ignores_team() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let user = UserId::new("u1");

    let first = layer.get_members_for_user(&TeamId::new("team-a"), &user).await.unwrap();
    store.set_members(vec![ChannelMember::new(ChannelId::new("other"), user.clone())]);

    // The second team is answered from the entry cached by the first
    let second = layer.get_members_for_user(&TeamId::new("team-b"), &user).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(store.members_for_user_calls(), 1);
}

#[tokio::test]
async fn test_members_for_user_clear_caches() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let team = TeamId::new("team");
    let user = UserId::new("u1");

    layer.get_members_for_user(&team, &user).await.unwrap();
    layer.clear_caches();
    layer.get_members_for_user(&team, &user).await.unwrap();
    assert_eq!(store.members_for_user_calls(), 2);
}

// =============================================================================
// Cross-family behavior
// =============================================================================

#[tokio::test]
async fn test_families_are_independent() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();

    layer.invalidate_member_count(&id());
    layer.invalidate_members_for_all_users();

    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.guest_count_calls(), 1);
    assert_eq!(store.pinned_post_count_calls(), 1);
    assert_eq!(store.get_calls(), 1);

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 2);
}

#[tokio::test]
async fn test_clear_caches_purges_every_family_and_forwards() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let team = TeamId::new("team");
    let user = UserId::new("u1");

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_members_for_user(&team, &user).await.unwrap();
    assert!(layer.entry_counts().iter().all(|(_, count)| *count == 1));

    layer.clear_caches();
    assert_eq!(store.clear_caches_calls(), 1);
    assert!(layer.entry_counts().iter().all(|(_, count)| *count == 0));

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_pinned_post_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_members_for_user(&team, &user).await.unwrap();
    assert_eq!(store.member_count_calls(), 2);
    assert_eq!(store.pinned_post_count_calls(), 2);
    assert_eq!(store.guest_count_calls(), 2);
    assert_eq!(store.get_calls(), 2);
    assert_eq!(store.members_for_user_calls(), 2);
}

#[tokio::test]
async fn test_invalidating_absent_keys_is_noop() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let nobody = UserId::new("nobody");

    layer.invalidate_member_count(&id());
    layer.invalidate_pinned_post_count(&id());
    layer.invalidate_guest_count(&id());
    layer.invalidate_channel(&id());
    layer.invalidate_members_for_user(&nobody);
    layer.invalidate_members_for_all_users();
    layer.clear_caches();
    layer.clear_caches();

    assert!(layer.entry_counts().iter().all(|(_, count)| *count == 0));
}

#[test]
fn test_cache_names() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);
    let names: Vec<String> = layer.entry_counts().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "ChannelMemberCounts",
            "ChannelPinnedPostsCounts",
            "ChannelGuestsCount",
            "channelById",
            "ChannelMembersForUser",
        ]
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_store_error_is_returned_and_not_cached() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    store.set_failing(true);
    let err = layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap_err();
    assert_eq!(err.error_code(), "DATABASE_ERROR");
    assert_eq!(store.member_count_calls(), 1);

    store.set_failing(false);
    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    assert_eq!(store.member_count_calls(), 2);
}

#[tokio::test]
async fn test_failed_bypass_keeps_cached_value() {
    let store = CountingChannelStore::new();
    let layer = cached(&store);

    layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap();

    store.set_failing(true);
    assert!(layer.get_guest_count(&id(), CacheMode::Bypass).await.is_err());
    assert_eq!(store.guest_count_calls(), 2);

    assert_eq!(layer.get_guest_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    assert_eq!(store.guest_count_calls(), 2);
}

#[tokio::test]
async fn test_cache_write_failure_is_absorbed() {
    let store = CountingChannelStore::new();
    // "10" is two bytes, so every write is rejected
    let layer = cached_with(&store, MokaCacheProvider::new(1));

    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    assert_eq!(layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap(), COUNT_RESULT);
    assert_eq!(store.member_count_calls(), 2);

    let channel = layer.get(&id(), CacheMode::Bypass).await.unwrap();
    assert_eq!(channel.id, id());
}

#[test]
fn test_zero_sized_family_fails_construction() {
    let store = CountingChannelStore::new();
    let mut config = chancache_config::LocalCacheConfig::default();
    config.channel_by_id.size = 0;

    let result = LocalCacheChannelStore::new(store, &MokaCacheProvider::default(), &config);
    assert!(result.is_err());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_reads_return_store_value() {
    let store = CountingChannelStore::new();
    let layer = Arc::new(cached(&store));

    let reads = (0..32).map(|_| {
        let layer = Arc::clone(&layer);
        async move { layer.get_member_count(&id(), CacheMode::UseIfPresent).await }
    });
    for result in join_all(reads).await {
        assert_eq!(result.unwrap(), COUNT_RESULT);
    }

    let calls = store.member_count_calls();
    assert!((1..=32).contains(&calls));

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), calls);
}

#[tokio::test]
async fn test_layer_is_a_drop_in_store() {
    let store = CountingChannelStore::new();
    let layer: Arc<dyn ChannelStore> = Arc::new(cached(&store));

    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    layer.get_member_count(&id(), CacheMode::UseIfPresent).await.unwrap();
    assert_eq!(store.member_count_calls(), 1);

    layer.clear_caches();
    assert_eq!(store.clear_caches_calls(), 1);
}
