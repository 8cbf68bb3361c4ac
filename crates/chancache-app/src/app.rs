//! Application builder and demo scenario.

use crate::di::{build_channel_layer, build_module, ChannelLayer};
use chancache_config::AppConfig;
use chancache_core::{
    CacheMode, Channel, ChannelId, ChannelMember, ChannelType, ChancacheResult, PostId, TeamId,
    UserId,
};
use chancache_repository::{ChannelStore, ChannelWriteStore};
use tracing::info;

/// Members seeded into the demo channel.
pub const DEMO_MEMBER_COUNT: usize = 10;

/// Guests among the seeded members.
pub const DEMO_GUEST_COUNT: usize = 2;

/// Ids created by [`seed_demo_data`].
#[derive(Debug, Clone)]
pub struct DemoData {
    /// Team owning the demo channel.
    pub team_id: TeamId,
    /// Demo team channel.
    pub channel_id: ChannelId,
    /// Direct channel between the first two members.
    pub direct_channel_id: ChannelId,
    /// Seeded members, in creation order.
    pub user_ids: Vec<UserId>,
}

/// One step of the member count scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioStep {
    /// What the step did.
    pub action: &'static str,
    /// Member count it observed, if it read one.
    pub member_count: Option<i64>,
}

/// Result of a full application run.
#[derive(Debug, Clone)]
pub struct AppReport {
    /// Seeded data.
    pub demo: DemoData,
    /// Scenario steps in order.
    pub steps: Vec<ScenarioStep>,
    /// Membership list length for the first user.
    pub memberships_for_first_user: usize,
    /// Entry count per cache after the run; empty when caching is disabled.
    pub cache_entries: Vec<(String, u64)>,
}

/// Seeds one team channel with members and a pinned post, plus a direct channel.
pub async fn seed_demo_data(writer: &dyn ChannelWriteStore) -> ChancacheResult<DemoData> {
    let team_id = TeamId::generate();
    let channel = writer
        .save_channel(&Channel::new(
            team_id.clone(),
            ChannelType::Open,
            "town-square",
            "Town Square",
        ))
        .await?;

    let mut user_ids = Vec::with_capacity(DEMO_MEMBER_COUNT);
    for i in 0..DEMO_MEMBER_COUNT {
        let user_id = UserId::generate();
        let member = if i < DEMO_GUEST_COUNT {
            ChannelMember::new_guest(channel.id.clone(), user_id.clone())
        } else {
            ChannelMember::new(channel.id.clone(), user_id.clone())
        };
        writer.save_member(&member).await?;
        user_ids.push(user_id);
    }

    writer.pin_post(&channel.id, &PostId::generate()).await?;

    let direct = writer
        .save_channel(&Channel::new_direct(&user_ids[0], &user_ids[1]))
        .await?;
    for user_id in &user_ids[..2] {
        writer
            .save_member(&ChannelMember::new(direct.id.clone(), user_id.clone()))
            .await?;
    }

    info!(
        "Seeded channel {} with {} members and direct channel {}",
        channel.id, DEMO_MEMBER_COUNT, direct.id
    );

    Ok(DemoData {
        team_id,
        channel_id: channel.id,
        direct_channel_id: direct.id,
        user_ids,
    })
}

/// Runs the member count sequence: cache-first twice, bypass, clear, cache-first.
pub async fn run_member_count_scenario(
    store: &dyn ChannelStore,
    channel_id: &ChannelId,
) -> ChancacheResult<Vec<ScenarioStep>> {
    let mut steps = Vec::with_capacity(5);

    for (action, mode) in [
        ("use_if_present", CacheMode::UseIfPresent),
        ("use_if_present", CacheMode::UseIfPresent),
        ("bypass", CacheMode::Bypass),
    ] {
        let count = store.get_member_count(channel_id, mode).await?;
        info!("{} -> {}", action, count);
        steps.push(ScenarioStep {
            action,
            member_count: Some(count),
        });
    }

    store.clear_caches();
    steps.push(ScenarioStep {
        action: "clear_caches",
        member_count: None,
    });

    let count = store.get_member_count(channel_id, CacheMode::UseIfPresent).await?;
    info!("use_if_present after clear -> {}", count);
    steps.push(ScenarioStep {
        action: "use_if_present",
        member_count: Some(count),
    });

    Ok(steps)
}

/// Application builder for constructing and running the demo.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Wires the channel layer, seeds data and runs the scenario.
    pub async fn run(self) -> ChancacheResult<AppReport> {
        let config = self.config.unwrap_or_default();
        let module = build_module(&config.cache);
        let ChannelLayer { reader, writer, cache } = build_channel_layer(&module, &config.cache)?;

        let demo = seed_demo_data(writer.as_ref()).await?;
        let steps = run_member_count_scenario(reader.as_ref(), &demo.channel_id).await?;

        let memberships = reader
            .get_members_for_user(&demo.team_id, &demo.user_ids[0])
            .await?;
        let guests = reader.get_guest_count(&demo.channel_id, CacheMode::UseIfPresent).await?;
        let pinned = reader
            .get_pinned_post_count(&demo.channel_id, CacheMode::UseIfPresent)
            .await?;
        let channel = reader.get(&demo.channel_id, CacheMode::UseIfPresent).await?;
        info!(
            "Channel '{}': {} guests, {} pinned posts",
            channel.display_name, guests, pinned
        );

        let cache_entries = cache.map(|c| c.entry_counts()).unwrap_or_default();

        Ok(AppReport {
            demo,
            steps,
            memberships_for_first_user: memberships.len(),
            cache_entries,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
