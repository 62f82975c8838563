//! Deferred one-shot actions.
//!
//! Everything the simulation wants to happen "later" goes through one queue
//! that the engine drains at a fixed point in the frame. Actions carry
//! generation-tagged entity handles (and a flash token where needed) so a
//! handler can tell when its target has gone away or moved on.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hecs::Entity;

/// A deferred action and the state it expects to find when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Turn off an enemy's damage flash, if `token` is still its latest hit.
    RevertFlash { enemy: Entity, token: u32 },
    /// Replace the dead enemy `previous` in roster `slot`.
    RespawnEnemy { slot: usize, previous: Entity },
    /// Remove a hit-scan impact marker.
    RemoveHitMarker { marker: Entity },
}

#[derive(Debug)]
struct Scheduled {
    due_secs: f64,
    seq: u64,
    action: DeferredAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest (due, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_secs
            .total_cmp(&self.due_secs)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of deferred actions keyed by simulation time.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once simulation time reaches `due_secs`.
    pub fn schedule(&mut self, due_secs: f64, action: DeferredAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            due_secs,
            seq,
            action,
        });
    }

    /// Remove and return every action due at or before `now_secs`, ordered by
    /// due time and then by scheduling order.
    pub fn pop_due(&mut self, now_secs: f64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        while let Some(next) = self.heap.peek() {
            if next.due_secs > now_secs {
                break;
            }
            if let Some(item) = self.heap.pop() {
                due.push(item.action);
            }
        }
        due
    }

    /// Time of the earliest pending action.
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|s| s.due_secs)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Pending actions in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &DeferredAction> {
        self.heap.iter().map(|s| &s.action)
    }
}
