// transition.rs — The status transition table and its direction lookup.
//
// Legal status moves form a directed graph partitioned into forward edges
// (the pitch advances) and backward edges (a previous decision is reverted).
// The split exists so authorization can differ per direction: anyone who can
// drive a pitch forward cannot necessarily undo a decision.
//
// The table is data, not code. `TransitionTable::standard()` ships the
// marketplace edge set, but hosts can build any table they like; the lookup
// is generic over whatever edges are present.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::pitch::PitchStatus;

/// Which way a legal transition moves the pitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// The directed graph of legal status moves.
///
/// Both directions map a current status to the set of statuses reachable
/// from it. Sets (not scalars) everywhere — a status may have one target or
/// many, and the lookup treats both uniformly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionTable {
    forward: BTreeMap<PitchStatus, BTreeSet<PitchStatus>>,
    backward: BTreeMap<PitchStatus, BTreeSet<PitchStatus>>,
}

impl TransitionTable {
    /// Start building a table from an empty edge set.
    pub fn builder() -> TransitionTableBuilder {
        TransitionTableBuilder {
            table: TransitionTable::default(),
        }
    }

    /// The marketplace edge set.
    ///
    /// Forward: a pending pitch gets a review verdict (approved, revisions,
    /// denied) or is withdrawn; revision rounds cycle through in-progress
    /// back to pending; an approved pitch completes. Backward: verdicts and
    /// closures can be reverted to pending by a privileged actor.
    pub fn standard() -> Self {
        use PitchStatus::*;
        Self::builder()
            .forward(Pending, [Approved, RevisionsRequested, Denied, Closed])
            .forward(RevisionsRequested, [InProgress, Closed])
            .forward(InProgress, [Pending, Closed])
            .forward(Approved, [Completed])
            .backward(Approved, [Pending])
            .backward(RevisionsRequested, [Pending])
            .backward(Denied, [Pending])
            .backward(Closed, [Pending])
            .build()
    }

    /// Determine which direction (if any) moves `current` to `target`.
    ///
    /// Pure lookup — no side effects, never errors. Callers turn a `None`
    /// into their own `InvalidTransition` failure carrying the pair.
    pub fn direction(&self, current: PitchStatus, target: PitchStatus) -> Option<Direction> {
        if self
            .forward
            .get(&current)
            .is_some_and(|targets| targets.contains(&target))
        {
            return Some(Direction::Forward);
        }
        if self
            .backward
            .get(&current)
            .is_some_and(|targets| targets.contains(&target))
        {
            return Some(Direction::Backward);
        }
        None
    }

    /// The statuses reachable forward from `current`.
    pub fn forward_targets(&self, current: PitchStatus) -> BTreeSet<PitchStatus> {
        self.forward.get(&current).cloned().unwrap_or_default()
    }

    /// The statuses reachable backward from `current`.
    pub fn backward_targets(&self, current: PitchStatus) -> BTreeSet<PitchStatus> {
        self.backward.get(&current).cloned().unwrap_or_default()
    }

    /// Total number of edges across both directions.
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum::<usize>()
            + self.backward.values().map(BTreeSet::len).sum::<usize>()
    }
}

/// Builder for [`TransitionTable`] — edges accumulate per call.
pub struct TransitionTableBuilder {
    table: TransitionTable,
}

impl TransitionTableBuilder {
    /// Add forward edges from `from` to each of `targets`.
    pub fn forward(
        mut self,
        from: PitchStatus,
        targets: impl IntoIterator<Item = PitchStatus>,
    ) -> Self {
        self.table.forward.entry(from).or_default().extend(targets);
        self
    }

    /// Add backward edges from `from` to each of `targets`.
    pub fn backward(
        mut self,
        from: PitchStatus,
        targets: impl IntoIterator<Item = PitchStatus>,
    ) -> Self {
        self.table.backward.entry(from).or_default().extend(targets);
        self
    }

    pub fn build(self) -> TransitionTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchStatus::*;

    #[test]
    fn forward_edges_resolve_forward() {
        let table = TransitionTable::standard();
        assert_eq!(table.direction(Pending, Approved), Some(Direction::Forward));
        assert_eq!(
            table.direction(Approved, Completed),
            Some(Direction::Forward)
        );
        assert_eq!(
            table.direction(RevisionsRequested, InProgress),
            Some(Direction::Forward)
        );
        assert_eq!(table.direction(InProgress, Pending), Some(Direction::Forward));
    }

    #[test]
    fn backward_edges_resolve_backward() {
        let table = TransitionTable::standard();
        assert_eq!(
            table.direction(Approved, Pending),
            Some(Direction::Backward)
        );
        assert_eq!(table.direction(Denied, Pending), Some(Direction::Backward));
        assert_eq!(table.direction(Closed, Pending), Some(Direction::Backward));
    }

    #[test]
    fn absent_pairs_resolve_none() {
        let table = TransitionTable::standard();
        assert_eq!(table.direction(Pending, Completed), None);
        assert_eq!(table.direction(Completed, Pending), None);
        assert_eq!(table.direction(Denied, Approved), None);
        assert_eq!(table.direction(Closed, Completed), None);
    }

    #[test]
    fn every_pair_outside_the_documented_edge_set_is_none() {
        // The documented edge set, spelled out pair by pair. Anything not
        // listed here must resolve to None — a silently dropped or invented
        // edge fails this test.
        let table = TransitionTable::standard();
        let forward = [
            (Pending, Approved),
            (Pending, RevisionsRequested),
            (Pending, Denied),
            (Pending, Closed),
            (RevisionsRequested, InProgress),
            (RevisionsRequested, Closed),
            (InProgress, Pending),
            (InProgress, Closed),
            (Approved, Completed),
        ];
        let backward = [
            (Approved, Pending),
            (RevisionsRequested, Pending),
            (Denied, Pending),
            (Closed, Pending),
        ];

        for current in PitchStatus::ALL {
            for target in PitchStatus::ALL {
                let expected = if forward.contains(&(current, target)) {
                    Some(Direction::Forward)
                } else if backward.contains(&(current, target)) {
                    Some(Direction::Backward)
                } else {
                    None
                };
                assert_eq!(
                    table.direction(current, target),
                    expected,
                    "unexpected direction for {current} -> {target}"
                );
            }
        }
        assert_eq!(table.edge_count(), forward.len() + backward.len());
    }

    #[test]
    fn completed_is_terminal() {
        let table = TransitionTable::standard();
        for target in PitchStatus::ALL {
            assert_eq!(table.direction(Completed, target), None);
        }
    }

    #[test]
    fn self_transitions_are_never_legal_in_the_standard_table() {
        let table = TransitionTable::standard();
        for status in PitchStatus::ALL {
            assert_eq!(table.direction(status, status), None);
        }
    }

    #[test]
    fn builder_accumulates_and_dedupes_edges() {
        let table = TransitionTable::builder()
            .forward(Pending, [Approved])
            .forward(Pending, [Approved, Denied])
            .build();
        assert_eq!(table.forward_targets(Pending).len(), 2);
        assert_eq!(table.edge_count(), 2);
    }

    #[test]
    fn empty_table_has_no_edges() {
        let table = TransitionTable::default();
        for current in PitchStatus::ALL {
            for target in PitchStatus::ALL {
                assert_eq!(table.direction(current, target), None);
            }
        }
    }

    #[test]
    fn serialization_round_trip() {
        let table = TransitionTable::standard();
        let json = serde_json::to_string(&table).unwrap();
        let restored: TransitionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }
}
