use crate::draw_source::DrawSource;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Per-task pools of people still owed a turn since the last refill.
///
/// A pool never holds the same name twice. It only changes through
/// [`BucketStore::draw`]: either the winner is removed, or the pool is
/// replaced by a shuffled copy of the current eligible set first.
#[derive(Debug, Clone, Default)]
pub struct BucketStore {
    pools: HashMap<String, Vec<String>>,
}

impl BucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current undrawn pool for `task_label`, in draw order after the last shuffle.
    pub fn pool(&self, task_label: &str) -> &[String] {
        self.pools
            .get(task_label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Draws one person for `task_label`.
    ///
    /// Prefers a pool member not in `picked_this_week`, falling back to any
    /// eligible pool member. Returns `None` without touching the pool when
    /// `eligible` is empty.
    pub fn draw<S: DrawSource>(
        &mut self,
        task_label: &str,
        eligible: &[String],
        picked_this_week: &HashSet<String>,
        source: &mut S,
    ) -> Option<String> {
        if eligible.is_empty() {
            return None;
        }

        let pool = self.pools.entry(task_label.to_string()).or_default();
        let mut valid: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, name)| eligible.contains(name))
            .map(|(idx, _)| idx)
            .collect();

        if valid.is_empty() {
            let mut refill = dedup_in_order(eligible);
            source.shuffle(&mut refill);
            debug!(
                task = task_label,
                stale = pool.len(),
                size = refill.len(),
                "refilling bucket"
            );
            *pool = refill;
            valid = (0..pool.len()).collect();
        }

        let fresh: Vec<usize> = valid
            .iter()
            .copied()
            .filter(|idx| !picked_this_week.contains(&pool[*idx]))
            .collect();
        let candidates = if fresh.is_empty() { &valid } else { &fresh };
        let choice = candidates[source.choose_index(candidates.len())];
        let winner = pool.remove(choice);

        debug!(
            task = task_label,
            winner = winner.as_str(),
            collided = fresh.is_empty(),
            remaining = pool.len(),
            "drew from bucket"
        );
        Some(winner)
    }

    pub fn clear(&mut self) {
        self.pools.clear();
    }
}

fn dedup_in_order(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
