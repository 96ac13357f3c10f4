//! Where ledgers live between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bw_core::{AgentName, Ledger};

use crate::TrustResult;

/// Persistence seam for reputation ledgers, one ledger per owning agent.
pub trait ReputationStore: Send {
    /// The owner's saved ledger, `None` if it never saved one.
    fn load(&self, owner: &AgentName) -> TrustResult<Option<Ledger>>;

    /// Replace the owner's saved ledger.
    fn save(&mut self, owner: &AgentName, ledger: &Ledger) -> TrustResult<()>;
}

// ── JsonFileStore ─────────────────────────────────────────────────────────────

/// Ledgers as pretty-printed JSON files, `<dir>/<owner>.json`.
///
/// Files are overwritten, never appended to.  Each agent writes only its own
/// file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, owner: &AgentName) -> PathBuf {
        self.dir.join(format!("{owner}.json"))
    }
}

impl ReputationStore for JsonFileStore {
    fn load(&self, owner: &AgentName) -> TrustResult<Option<Ledger>> {
        let path = self.path_for(owner);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, owner: &AgentName, ledger: &Ledger) -> TrustResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(ledger)?;
        std::fs::write(self.path_for(owner), json)?;
        Ok(())
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// In-memory ledgers.
///
/// Clones share the same map, so a test can hand one clone to an engine and
/// inspect what it saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ledgers: Arc<Mutex<BTreeMap<AgentName, Ledger>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a ledger as if a previous run had saved it.
    pub fn with_ledger(self, owner: AgentName, ledger: Ledger) -> Self {
        if let Ok(mut map) = self.ledgers.lock() {
            map.insert(owner, ledger);
        }
        self
    }

    /// Last ledger saved for `owner`.
    pub fn saved(&self, owner: &AgentName) -> Option<Ledger> {
        self.ledgers.lock().ok()?.get(owner).cloned()
    }
}

impl ReputationStore for MemoryStore {
    fn load(&self, owner: &AgentName) -> TrustResult<Option<Ledger>> {
        Ok(self.saved(owner))
    }

    fn save(&mut self, owner: &AgentName, ledger: &Ledger) -> TrustResult<()> {
        if let Ok(mut map) = self.ledgers.lock() {
            map.insert(owner.clone(), ledger.clone());
        }
        Ok(())
    }
}
