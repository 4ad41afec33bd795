//! History records.

use patch_history_patch::PatchSet;

use crate::clock::Timestamp;

/// One undoable step: the patches that produced it, the patches that revert
/// it, and the action that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub patches: PatchSet,
    pub inverse_patches: PatchSet,
    pub action_tag: String,
    pub created_at: Timestamp,
    /// Patches of the most recent edit folded into this record. Merging
    /// compares the next edit against these rather than the accumulated
    /// `patches`.
    pub last_tick: PatchSet,
}

impl HistoryRecord {
    pub fn new(
        patches: PatchSet,
        inverse_patches: PatchSet,
        action_tag: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        let last_tick = patches.clone();
        Self { patches, inverse_patches, action_tag: action_tag.into(), created_at, last_tick }
    }

    /// Replaces the patches used for merge decisions.
    pub fn with_last_tick(mut self, last_tick: PatchSet) -> Self {
        self.last_tick = last_tick;
        self
    }

    /// Records without forward patches are never stored.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}
