use std::sync::Arc;

use serenity::all::ShardId;
use serenity::cache::Cache;
use serenity::gateway::{ShardManager, ShardRunnerInfo};

use crate::{
    model::stats::{BotInfoDto, GuildStatsDto, ShardDto, ShardStatusDto},
    realtime::RealtimeEvent,
};

/// Read-mostly aggregation over the live gateway state.
///
/// Serenity runs every shard inside this process against one shared cache;
/// `for_each_shard` is the broadcast-evaluate primitive (run a closure
/// against each shard runner's state and collect the results) and the
/// aggregate counts come straight from the cache.
#[derive(Clone)]
pub struct StatsService {
    cache: Arc<Cache>,
    shard_manager: Arc<ShardManager>,
}

impl StatsService {
    pub fn new(cache: Arc<Cache>, shard_manager: Arc<ShardManager>) -> Self {
        Self {
            cache,
            shard_manager,
        }
    }

    /// Runs `f` against every shard runner and collects the results.
    pub async fn for_each_shard<T>(
        &self,
        f: impl Fn(ShardId, &ShardRunnerInfo) -> T,
    ) -> Vec<T> {
        let runners = self.shard_manager.runners.lock().await;
        runners.iter().map(|(id, info)| f(*id, info)).collect()
    }

    pub async fn shard_status(&self) -> ShardStatusDto {
        let shards = self
            .for_each_shard(|id, info| ShardDto {
                id: id.0 as u32,
                status: info.stage.to_string(),
                latency_ms: info.latency.map(|latency| latency.as_millis() as u64),
            })
            .await;
        ShardStatusDto { shards }
    }

    pub fn bot_info(&self) -> BotInfoDto {
        let (username, avatar, id) = {
            let user = self.cache.current_user();
            (user.name.clone(), user.avatar_url(), user.id.to_string())
        };

        BotInfoDto {
            username,
            avatar,
            id: Some(id),
            guilds: self.cache.guild_count() as u64,
            users: self.cached_user_count(),
        }
    }

    pub fn guild_stats(&self, guild_id: u64) -> Option<GuildStatsDto> {
        let guild = self.cache.guild(guild_id)?;
        Some(GuildStatsDto {
            member_count: guild.member_count,
            channel_count: guild.channels.len() as u64,
            role_count: guild.roles.len() as u64,
        })
    }

    /// Aggregate stats event for the realtime channel.
    pub async fn stats_event(&self) -> RealtimeEvent {
        let shards = self.for_each_shard(|_, _| ()).await.len();
        RealtimeEvent::Stats {
            guilds: self.cache.guild_count() as u64,
            users: self.cached_user_count(),
            shards,
        }
    }

    fn cached_user_count(&self) -> u64 {
        self.cache
            .guilds()
            .into_iter()
            .filter_map(|id| self.cache.guild(id).map(|guild| guild.member_count))
            .sum()
    }
}
