//! Plain data row types written by output backends.

/// What one member did in one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStepRow {
    pub tick: u64,
    pub agent: String,
    /// Phase after the step; empty while idle.
    pub phase: String,
    /// The action taken, empty if none.
    pub action: String,
    pub messages_sent: u64,
}

/// One ledger entry: how `owner` rates `teammate` at `tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustRow {
    pub tick: u64,
    pub owner: String,
    pub teammate: String,
    pub reliability_accurate: u32,
    pub reliability_total: u32,
    pub competence_accurate: u32,
    pub competence_total: u32,
}
