//! Outbound message delivery.

use async_trait::async_trait;
use core::fmt::{self, Display};
use twilight_model::id::{marker::ChannelMarker, Id};

#[derive(Debug)]
pub struct SendError;

impl Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("message could not be delivered")
    }
}

/// Where outgoing chat messages go. The router and the game sessions only
/// ever talk to a channel through this.
#[async_trait]
pub trait Messenger: Send + Sync + 'static {
    async fn send(&self, channel: Id<ChannelMarker>, text: &str) -> Result<(), SendError>;
}

/// Production sender backed by the Discord REST API.
pub struct Discord(twilight_http::Client);

impl From<twilight_http::Client> for Discord {
    fn from(client: twilight_http::Client) -> Self {
        Self(client)
    }
}

#[async_trait]
impl Messenger for Discord {
    async fn send(&self, channel: Id<ChannelMarker>, text: &str) -> Result<(), SendError> {
        self.0
            .create_message(channel)
            .content(text)
            .map_err(|err| {
                log::warn!("rejected message content for channel {channel}: {err}");
                SendError
            })?
            .await
            .map_err(|err| {
                log::warn!("delivery to channel {channel} failed: {err}");
                SendError
            })?;
        Ok(())
    }
}

/// Sends without letting a delivery failure interrupt the caller.
pub(crate) async fn announce<S: Messenger>(chat: &S, channel: Id<ChannelMarker>, text: &str) {
    if let Err(err) = chat.send(channel, text).await {
        log::error!("dropping announcement for channel {channel}: {err}");
    }
}
