//! Chain validation: positional integrity checks over an ordered block slice.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::Block;

/// A block position that failed integrity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainDefect {
    pub height: u64,
}

impl ChainDefect {
    pub const fn at(height: u64) -> Self {
        Self { height }
    }
}

impl fmt::Display for ChainDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid block at {}", self.height)
    }
}

/// Validate a whole chain, returning one defect per failing position.
///
/// Adjacent pairs are walked from the start. A pair fails when its earlier
/// block does not match its own digest or when that digest is not what the
/// later block links to; the defect is reported at the earlier block's
/// position. The last block has no outgoing link, so it gets a separate
/// self-check at the end. A genesis-only chain only gets that self-check.
///
/// Defects come out in ascending position order. Never fails.
pub fn validate_chain(chain: &[Block]) -> Vec<ChainDefect> {
    let mut defects = Vec::new();

    let Some(last) = chain.last() else {
        return defects;
    };

    for (position, pair) in chain.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let linked = previous.hash() == current.previous_block_hash();
        if !(previous.validate() && linked) {
            defects.push(ChainDefect::at(position as u64));
        }
    }

    if !last.validate() {
        defects.push(ChainDefect::at((chain.len() - 1) as u64));
    }

    defects
}

/// Render defects as the strings reported to callers.
pub fn defect_messages(defects: &[ChainDefect]) -> Vec<String> {
    defects.iter().map(ToString::to_string).collect()
}
