//! Broadcast transport seam.
//!
//! The host owns the actual channel.  An agent only ever broadcasts to the
//! whole team and drains whatever arrived since its last tick.

use std::collections::VecDeque;

use bw_core::AgentName;

use crate::{Message, ProtocolResult, decode};

/// An encoded message plus the id of the member that sent it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Envelope {
    pub sender: AgentName,
    pub content: String,
}

impl Envelope {
    pub fn new(sender: AgentName, content: impl Into<String>) -> Self {
        Self { sender, content: content.into() }
    }

    /// Decode the content, keeping the sender.
    pub fn open(&self) -> ProtocolResult<Received> {
        Ok(Received { sender: self.sender.clone(), message: decode(&self.content)? })
    }
}

/// A decoded message together with its sender.
#[derive(Clone, PartialEq, Debug)]
pub struct Received {
    pub sender: AgentName,
    pub message: Message,
}

/// What an agent needs from the team channel.
pub trait Transport {
    /// Queue `envelope` for every other team member.  Never blocks.
    fn broadcast(&mut self, envelope: Envelope);

    /// Everything received since the previous call, in arrival order.
    fn drain_inbox(&mut self) -> Vec<Envelope>;
}

/// In-memory [`Transport`]: one inbox filled by the host, one outbox the host
/// empties after each tick.
#[derive(Debug, Default)]
pub struct Mailbox {
    inbox: VecDeque<Envelope>,
    outbox: Vec<Envelope>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host side: hand `envelope` to this member.
    pub fn deliver(&mut self, envelope: Envelope) {
        self.inbox.push_back(envelope);
    }

    /// Host side: collect what this member broadcast.
    pub fn take_outbox(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending(&self) -> usize {
        self.inbox.len()
    }
}

impl Transport for Mailbox {
    fn broadcast(&mut self, envelope: Envelope) {
        self.outbox.push(envelope);
    }

    fn drain_inbox(&mut self) -> Vec<Envelope> {
        self.inbox.drain(..).collect()
    }
}
