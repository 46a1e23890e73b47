//! Per-state set of valid transition targets.
//!
//! Adjacency is topological only: an edge either exists or it does not.
//! The set is a bitset sized to the machine's capacity at construction, so
//! the number of usable target ids is never silently capped by a machine
//! word width.

use super::state::StateId;

const WORD_BITS: usize = u64::BITS as usize;

/// Set of state ids directly reachable from one source state.
///
/// Membership and insertion are valid for every id below the capacity the
/// set was created with; ids at or beyond capacity are never members.
///
/// # Example
///
/// ```rust
/// use machina::TargetSet;
///
/// let mut targets = TargetSet::with_capacity(100);
/// targets.insert(3);
/// targets.insert(99);
///
/// assert!(targets.contains(3));
/// assert!(targets.contains(99));
/// assert!(!targets.contains(4));
/// assert_eq!(targets.iter().collect::<Vec<_>>(), vec![3, 99]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSet {
    words: Vec<u64>,
    capacity: usize,
}

impl TargetSet {
    /// Create an empty set able to hold ids in `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Add `id` to the set. Returns `true` if the id was newly inserted,
    /// `false` if it was already present.
    ///
    /// Callers are expected to validate `id < capacity` first; the machine
    /// does so before every insertion.
    pub fn insert(&mut self, id: StateId) -> bool {
        debug_assert!(id < self.capacity, "target id out of range");
        let word = &mut self.words[id / WORD_BITS];
        let mask = 1u64 << (id % WORD_BITS);
        let newly = *word & mask == 0;
        *word |= mask;
        newly
    }

    /// Whether `id` is a member. Ids at or beyond capacity are never members.
    pub fn contains(&self, id: StateId) -> bool {
        if id >= self.capacity {
            return false;
        }
        self.words[id / WORD_BITS] & (1u64 << (id % WORD_BITS)) != 0
    }

    /// Number of ids in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Iterate over the member ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.capacity).filter(|id| self.contains(*id))
    }
}
