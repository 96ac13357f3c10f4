//! Broadcast store-and-forward between team members.

use bw_core::AgentName;
use bw_protocol::Envelope;

#[cfg(feature = "fx-hash")]
type InboxMap = rustc_hash::FxHashMap<AgentName, Vec<Envelope>>;
#[cfg(not(feature = "fx-hash"))]
type InboxMap = std::collections::HashMap<AgentName, Vec<Envelope>>;

/// Every message published during tick *t* is in every other member's
/// inbox at tick *t + 1*.
///
/// Envelopes from one sender keep their publication order.  Across senders
/// the order is the order in which the team applied its members.
#[derive(Debug, Default)]
pub struct MessageBus {
    members: Vec<AgentName>,
    /// Published this tick, not yet visible.
    in_flight: Vec<Envelope>,
    inboxes: InboxMap,
}

impl MessageBus {
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = AgentName>,
    {
        let members: Vec<AgentName> = members.into_iter().collect();
        let inboxes = members.iter().map(|m| (m.clone(), Vec::new())).collect();
        Self { members, in_flight: Vec::new(), inboxes }
    }

    pub fn members(&self) -> &[AgentName] {
        &self.members
    }

    pub fn publish(&mut self, envelope: Envelope) {
        self.in_flight.push(envelope);
    }

    /// Close the tick: fan everything published out to all members except
    /// its sender.
    pub fn end_tick(&mut self) {
        for envelope in self.in_flight.drain(..) {
            for member in &self.members {
                if *member == envelope.sender {
                    continue;
                }
                if let Some(inbox) = self.inboxes.get_mut(member) {
                    inbox.push(envelope.clone());
                }
            }
        }
    }

    /// Everything delivered to `member` so far, oldest first.
    pub fn take_inbox(&mut self, member: &AgentName) -> Vec<Envelope> {
        self.inboxes.get_mut(member).map(std::mem::take).unwrap_or_default()
    }

    /// Envelopes waiting for `member`.
    pub fn pending(&self, member: &AgentName) -> usize {
        self.inboxes.get(member).map_or(0, Vec::len)
    }

    /// Envelopes published this tick.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
