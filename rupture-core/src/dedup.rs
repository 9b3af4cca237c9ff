//! Collapses the jumps kept by the path search into one canonical set.

use std::collections::HashSet;

use tracing::trace;

use crate::jump::Jump;

/// Keeps the first jump seen for every unordered section pair.
///
/// Surviving jumps are oriented so that they depart from the lower section
/// id, which makes a jump and its reverse indistinguishable in the output.
pub(crate) fn deduplicate_jumps<I>(jumps: I) -> Vec<Jump>
where
    I: IntoIterator<Item = Jump>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for jump in jumps {
        if seen.insert(jump.section_pair()) {
            unique.push(jump.into_canonical());
        } else {
            trace!(sections = %jump.section_pair(), "dropping repeated jump");
        }
    }
    unique
}
