//! Durable per-guild settings.

use async_trait::async_trait;
use core::num::NonZeroU64;
use db::{error, Database, GuildConfig};

/// Backing store for guild settings and the in-progress game marker.
#[async_trait]
pub trait ConfigStore: Send + Sync + 'static {
    async fn guild_config(&self, guild: NonZeroU64) -> error::Result<Option<GuildConfig>>;
    async fn set_prefix(&self, guild: NonZeroU64, prefix: &str) -> error::Result<()>;
    async fn set_channel(&self, guild: NonZeroU64, channel: NonZeroU64) -> error::Result<()>;
    async fn set_playing(&self, guild: NonZeroU64, playing: bool) -> error::Result<()>;
}

#[async_trait]
impl ConfigStore for Database {
    async fn guild_config(&self, guild: NonZeroU64) -> error::Result<Option<GuildConfig>> {
        Database::guild_config(self, guild).await
    }

    async fn set_prefix(&self, guild: NonZeroU64, prefix: &str) -> error::Result<()> {
        Database::set_prefix(self, guild, prefix).await
    }

    async fn set_channel(&self, guild: NonZeroU64, channel: NonZeroU64) -> error::Result<()> {
        Database::set_channel(self, guild, channel).await
    }

    async fn set_playing(&self, guild: NonZeroU64, playing: bool) -> error::Result<()> {
        Database::set_playing(self, guild, playing).await
    }
}
