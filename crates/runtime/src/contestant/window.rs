//! Reaction window: the snapshots a contestant has seen but not yet reacted to.

use std::collections::VecDeque;

use crate::environment::Snapshot;

/// Bounded FIFO of past snapshots awaiting consumption.
///
/// Holds at most `reaction_time` snapshots once [`discard_overflow`] has run.
///
/// [`discard_overflow`]: ReactionWindow::discard_overflow
#[derive(Clone, Debug)]
pub struct ReactionWindow {
    snapshots: VecDeque<Snapshot>,
    reaction_time: usize,
    min_reaction_time: usize,
}

impl ReactionWindow {
    /// Uniform draw added to the baseline is taken from `0..=MAX_JITTER`.
    pub const MAX_JITTER: u32 = 2;

    pub fn new(reaction_time: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(reaction_time + 1),
            reaction_time,
            min_reaction_time: reaction_time / 2,
        }
    }

    pub fn reaction_time(&self) -> usize {
        self.reaction_time
    }

    pub fn min_reaction_time(&self) -> usize {
        self.min_reaction_time
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
    }

    pub fn pop_oldest(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_front()
    }

    /// Snapshots to consume this update given a uniform `jitter` draw.
    ///
    /// Zero while the window is shorter than the minimum reaction time. Past
    /// the reaction time the baseline is `reaction_time - len`, which is
    /// negative, so an overflowing window rarely consumes; overflow is then
    /// dropped by [`discard_overflow`](Self::discard_overflow).
    pub fn reactions_to_consume(&self, jitter: u32) -> usize {
        let len = self.snapshots.len();
        if len < self.min_reaction_time {
            return 0;
        }
        let baseline = if len > self.reaction_time {
            self.reaction_time as i64 - len as i64
        } else {
            0
        };
        (baseline + i64::from(jitter)).max(0) as usize
    }

    /// Drops the oldest snapshots beyond `reaction_time`, returning how many.
    pub fn discard_overflow(&mut self) -> usize {
        let overflow = self.snapshots.len().saturating_sub(self.reaction_time);
        self.snapshots.drain(..overflow);
        overflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(reaction_time: usize, len: usize) -> ReactionWindow {
        let mut window = ReactionWindow::new(reaction_time);
        for _ in 0..len {
            window.push(Snapshot::new());
        }
        window
    }

    #[test]
    fn nothing_consumed_below_min_reaction_time() {
        for len in 0..10 {
            let window = filled(20, len);
            for jitter in 0..=ReactionWindow::MAX_JITTER {
                assert_eq!(window.reactions_to_consume(jitter), 0);
            }
        }
    }

    #[test]
    fn jitter_drives_consumption_inside_window() {
        let window = filled(20, 12);
        assert_eq!(window.reactions_to_consume(0), 0);
        assert_eq!(window.reactions_to_consume(2), 2);
    }

    #[test]
    fn overflow_baseline_is_negative() {
        let window = filled(4, 5);
        // 4 - 5 + 2
        assert_eq!(window.reactions_to_consume(2), 1);
        assert_eq!(window.reactions_to_consume(0), 0);
    }

    #[test]
    fn overflow_is_discarded_oldest_first() {
        let mut window = filled(3, 5);
        assert_eq!(window.discard_overflow(), 2);
        assert_eq!(window.len(), 3);
        assert_eq!(window.discard_overflow(), 0);
    }
}
