//! Best-effort spoken/visual notifications. Nothing here may hold up a trip.

use std::sync::Arc;

use async_channel::{Receiver, Sender};

use crate::error::{announcer_error, Error};

pub trait Announcer {
    /// Must return promptly; failures are logged and dropped by the caller.
    fn announce(&self, message: &str) -> Result<(), Error>;
}

pub type DynAnnouncer = Arc<dyn Announcer + Send + Sync>;

/// Writes announcements to the log.
#[derive(Clone, Debug, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&self, message: &str) -> Result<(), Error> {
        tracing::info!(target: "announcer", "{}", message);

        Ok(())
    }
}

/// Hands announcements to a consumer such as a text-to-speech worker.
#[derive(Clone, Debug)]
pub struct ChannelAnnouncer {
    sender: Sender<String>,
}

impl ChannelAnnouncer {
    pub fn bounded(capacity: usize) -> (Self, Receiver<String>) {
        let (sender, receiver) = async_channel::bounded(capacity);

        (Self { sender }, receiver)
    }
}

impl Announcer for ChannelAnnouncer {
    fn announce(&self, message: &str) -> Result<(), Error> {
        self.sender.try_send(message.to_string()).map_err(|err| {
            tracing::debug!(?err, "announcement dropped");
            announcer_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_delivers_until_full() {
        let (announcer, receiver) = ChannelAnnouncer::bounded(1);

        announcer.announce("2 motoristas encontrados.").unwrap();
        let err = announcer.announce("overflow").unwrap_err();

        assert!(err.is_collaborator_failure());
        assert_eq!(receiver.try_recv().unwrap(), "2 motoristas encontrados.");
    }

    #[test]
    fn closed_channel_is_an_error() {
        let (announcer, receiver) = ChannelAnnouncer::bounded(4);
        drop(receiver);

        assert!(announcer.announce("hello").is_err());
    }
}
