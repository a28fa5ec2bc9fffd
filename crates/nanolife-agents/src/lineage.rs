//! Append-only ancestry records.
//!
//! Population storage compacts with swap-remove, so array positions are
//! never stable across ticks. Ancestry therefore lives outside the
//! population entirely: every bot holds an [`Arc`] to an immutable
//! [`LineageRecord`] created at its birth, and each record links to its
//! parent's record the same way. Records outlive the bots they describe
//! and can never dangle, whatever the population container does.

use std::sync::Arc;

use nanolife_types::{BotId, Genome, LineageEntry};

/// Maximum number of ancestors returned by [`ancestry_chain`].
pub const MAX_LINEAGE_DEPTH: usize = 500;

/// One immutable link in an ancestry chain, created at a bot's birth.
#[derive(Debug)]
pub struct LineageRecord {
    /// Identifier the bot held at birth.
    pub id: BotId,
    /// The bot's generation.
    pub generation: u32,
    /// The bot's genome at birth.
    pub genome: Genome,
    /// The parent's record; `None` for spontaneously spawned bots.
    pub parent: Option<Arc<LineageRecord>>,
}

impl LineageRecord {
    /// Record for a parentless (spawned) bot.
    pub fn root(id: BotId, generation: u32, genome: Genome) -> Arc<Self> {
        Arc::new(Self {
            id,
            generation,
            genome,
            parent: None,
        })
    }

    /// Record for a bot born of `parent`.
    pub fn child(parent: &Arc<Self>, id: BotId, generation: u32, genome: Genome) -> Arc<Self> {
        Arc::new(Self {
            id,
            generation,
            genome,
            parent: Some(Arc::clone(parent)),
        })
    }
}

/// Walk a bot's ancestry newest-first, starting with the bot itself,
/// bounded at [`MAX_LINEAGE_DEPTH`] entries.
pub fn ancestry_chain(record: &Arc<LineageRecord>) -> Vec<LineageEntry> {
    let mut entries = Vec::new();
    let mut current = Some(record);
    while let Some(link) = current {
        if entries.len() >= MAX_LINEAGE_DEPTH {
            break;
        }
        entries.push(LineageEntry {
            id: link.id,
            generation: link.generation,
            genome: link.genome.clone(),
        });
        current = link.parent.as_ref();
    }
    entries
}
