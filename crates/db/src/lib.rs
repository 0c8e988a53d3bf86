#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;

use alloc::vec::Vec;
use core::num::NonZeroU64;
use tokio_postgres::error::SqlState;

pub use model::config::GuildConfig;
pub use tokio_postgres::{tls::NoTls, Client, Config};

pub struct Database(Client);

impl From<Client> for Database {
    fn from(client: Client) -> Self {
        Self(client)
    }
}

fn deserialize_config_from_row(row: tokio_postgres::Row) -> Result<GuildConfig, tokio_postgres::Error> {
    let prefix = row.try_get("prefix")?;
    let channel: Option<i64> = row.try_get("channel")?;
    Ok(GuildConfig { prefix, channel: channel.and_then(|id| NonZeroU64::new(id as u64)) })
}

impl Database {
    /// Retrieves the settings a guild has stored, if any.
    pub async fn guild_config(&self, guild: NonZeroU64) -> error::Result<Option<GuildConfig>> {
        let gid = guild.get() as i64;
        let row = self
            .0
            .query_opt("SELECT prefix, channel FROM guild WHERE id = $1", &[&gid])
            .await
            .map_err(|_| error::Error::Fatal)?;
        let Some(row) = row else {
            return Ok(None);
        };
        deserialize_config_from_row(row).map(Some).map_err(|_| error::Error::Fatal)
    }

    pub async fn set_prefix(&self, guild: NonZeroU64, prefix: &str) -> error::Result<()> {
        let gid = guild.get() as i64;
        let err = match self
            .0
            .execute(
                "INSERT INTO guild (id, prefix) VALUES ($1, $2) \
                 ON CONFLICT (id) DO UPDATE SET prefix = EXCLUDED.prefix",
                &[&gid, &prefix],
            )
            .await
        {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        let err = err.as_db_error().ok_or(error::Error::Fatal)?;

        // The column is a `VARCHAR(16)`, so oversized prefixes surface as truncation.
        if *err.code() == SqlState::STRING_DATA_RIGHT_TRUNCATION {
            return Err(error::Error::BadInput);
        }

        if *err.code() != SqlState::CHECK_VIOLATION {
            return Err(error::Error::Fatal);
        }

        let constraint = err.constraint().ok_or(error::Error::Fatal)?;
        if constraint == "guild_prefix_check" {
            return Err(error::Error::BadInput);
        }

        Err(error::Error::Fatal)
    }

    pub async fn set_channel(&self, guild: NonZeroU64, channel: NonZeroU64) -> error::Result<()> {
        let gid = guild.get() as i64;
        let cid = channel.get() as i64;
        self.0
            .execute(
                "INSERT INTO guild (id, channel) VALUES ($1, $2) \
                 ON CONFLICT (id) DO UPDATE SET channel = EXCLUDED.channel",
                &[&gid, &cid],
            )
            .await
            .map_err(|_| error::Error::Fatal)?;
        Ok(())
    }

    /// Marks whether a game is currently running in the guild.
    pub async fn set_playing(&self, guild: NonZeroU64, playing: bool) -> error::Result<()> {
        let gid = guild.get() as i64;
        self.0
            .execute(
                "INSERT INTO guild (id, playing) VALUES ($1, $2) \
                 ON CONFLICT (id) DO UPDATE SET playing = EXCLUDED.playing",
                &[&gid, &playing],
            )
            .await
            .map_err(|_| error::Error::Fatal)?;
        Ok(())
    }

    /// Clears every in-progress marker left over from a previous run and
    /// reports which guilds had one. Games cannot be resumed mid-question,
    /// so their markers are simply discarded.
    pub async fn sweep_playing(&self) -> error::Result<Vec<NonZeroU64>> {
        let rows = self
            .0
            .query("UPDATE guild SET playing = FALSE WHERE playing RETURNING id", &[])
            .await
            .map_err(|_| error::Error::Fatal)?;
        let mut guilds = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id").map_err(|_| error::Error::Fatal)?;
            guilds.push(NonZeroU64::new(id as u64).ok_or(error::Error::Fatal)?);
        }
        Ok(guilds)
    }
}
