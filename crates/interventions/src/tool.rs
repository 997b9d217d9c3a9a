use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::intervention::InterventionType;

const NONE: u8 = 0;

/// Session-wide active intervention tool.
///
/// Single writer (tool buttons), many readers (in-flight clicks). There is no
/// isolation: a click sees whatever tool is active at the moment it reads,
/// last write wins. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct ToolSelector {
    active: Arc<AtomicU8>,
}

impl ToolSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the active tool unconditionally.
    pub fn select(&self, tool: InterventionType) {
        self.active.store(encode(Some(tool)), Ordering::Relaxed);
    }

    pub fn current(&self) -> Option<InterventionType> {
        decode(self.active.load(Ordering::Relaxed))
    }
}

fn encode(tool: Option<InterventionType>) -> u8 {
    match tool {
        None => NONE,
        Some(InterventionType::Tree) => 1,
        Some(InterventionType::Roof) => 2,
        Some(InterventionType::Water) => 3,
        Some(InterventionType::Building) => 4,
    }
}

fn decode(raw: u8) -> Option<InterventionType> {
    match raw {
        1 => Some(InterventionType::Tree),
        2 => Some(InterventionType::Roof),
        3 => Some(InterventionType::Water),
        4 => Some(InterventionType::Building),
        _ => None,
    }
}
