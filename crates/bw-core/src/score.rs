//! Reputation scores.
//!
//! A [`Score`] is an `(accurate, total)` sample: how many of a teammate's
//! evaluated messages proved consistent, out of how many were evaluated.
//! Every teammate gets a [`TrustRecord`] holding two such samples, and an
//! agent's full table of records is its [`Ledger`], the only state that
//! outlives a run.

use std::collections::BTreeMap;
use std::fmt;

use crate::AgentName;

// ── Score ─────────────────────────────────────────────────────────────────────

/// An `(accurate, total)` sample with `accurate <= total` and `total >= 1`.
///
/// Serialized as the two-element array `[accurate, total]`.  Deserialization
/// goes through [`Score::new`], so malformed persisted values are repaired
/// rather than rejected.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(u32, u32)", into = "(u32, u32)"))]
pub struct Score {
    accurate: u32,
    total: u32,
}

impl Score {
    /// Build a score, clamping into the valid domain.
    pub fn new(accurate: u32, total: u32) -> Self {
        let total = total.max(1);
        Self { accurate: accurate.min(total), total }
    }

    #[inline]
    pub fn accurate(self) -> u32 {
        self.accurate
    }

    #[inline]
    pub fn total(self) -> u32 {
        self.total
    }

    /// `accurate / total`, in `[0, 1]`.
    #[inline]
    pub fn ratio(self) -> f64 {
        f64::from(self.accurate) / f64::from(self.total)
    }

    /// One more consistent observation.
    pub fn increase(&mut self) {
        if self.total < u32::MAX {
            self.total += 1;
            self.accurate += 1;
        }
    }

    /// One more contradicted observation.
    pub fn decrease(&mut self) {
        self.total = self.total.saturating_add(1);
    }

    /// Fold a teammate's report of this same sample into `self`.
    ///
    /// The remote sample is ignored when its size is below `min_ratio` times
    /// our own accurate count.  Otherwise the smaller sample is rescaled to
    /// the larger denominator, the two numerators are averaged (floored), and
    /// the larger denominator is kept.  Merging a score with itself is a
    /// no-op, and `total` never shrinks.
    pub fn merge(&mut self, remote: Score, min_ratio: f64) {
        if f64::from(remote.total) < min_ratio * f64::from(self.accurate) {
            return;
        }

        let (common, keep, old, scale) = if self.total <= remote.total {
            (remote.total, remote.accurate, self.total, self.accurate)
        } else {
            (self.total, self.accurate, remote.total, remote.accurate)
        };

        // floor((common * scale / old + keep) / 2) in exact integer arithmetic.
        let (common, keep, old, scale) =
            (u64::from(common), u64::from(keep), u64::from(old), u64::from(scale));
        let avg = (common * scale + keep * old) / (2 * old);

        *self = Score::new(u32::try_from(avg).unwrap_or(u32::MAX), common as u32);
    }
}

impl Default for Score {
    /// The neutral `(1, 1)` prior.
    fn default() -> Self {
        Score { accurate: 1, total: 1 }
    }
}

impl From<(u32, u32)> for Score {
    fn from((accurate, total): (u32, u32)) -> Self {
        Score::new(accurate, total)
    }
}

impl From<Score> for (u32, u32) {
    fn from(s: Score) -> Self {
        (s.accurate, s.total)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.accurate, self.total)
    }
}

// ── TrustRecord ───────────────────────────────────────────────────────────────

/// Reputation of one teammate.
///
/// `reliability` tracks factual claims (sightings, drops); `competence`
/// tracks whether announced intentions are followed through.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrustRecord {
    pub reliability: Score,
    pub competence: Score,
}

impl TrustRecord {
    pub fn new(reliability: Score, competence: Score) -> Self {
        Self { reliability, competence }
    }

    /// Merge both samples of a remote record, see [`Score::merge`].
    pub fn merge(&mut self, remote: &TrustRecord, min_ratio: f64) {
        self.reliability.merge(remote.reliability, min_ratio);
        self.competence.merge(remote.competence, min_ratio);
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Reputation table keyed by teammate name.
///
/// Ordered so that persisted files and gossip payloads are stable.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ledger(BTreeMap<AgentName, TrustRecord>);

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TrustRecord> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TrustRecord> {
        self.0.get_mut(name)
    }

    pub fn insert(&mut self, name: AgentName, record: TrustRecord) -> Option<TrustRecord> {
        self.0.insert(name, record)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Record for `name`, created from `prior` if missing.
    pub fn entry_or(&mut self, name: &AgentName, prior: TrustRecord) -> &mut TrustRecord {
        self.0.entry(name.clone()).or_insert(prior)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentName, &TrustRecord)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &AgentName> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(AgentName, TrustRecord)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (AgentName, TrustRecord)>>(iter: I) -> Self {
        Ledger(iter.into_iter().collect())
    }
}
