//! Deferred events keyed by a generation counter.
//!
//! Every entry captures the generation current when it was scheduled.
//! `invalidate` bumps the generation, so entries scheduled before it are
//! discarded when they come due instead of firing against post-reset state.

/// Handle returned by `Scheduler::schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub seq: u64,
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_us: u64,
    generation: u64,
    seq: u64,
    payload: T,
}

/// Logical-clock scheduler. Time is supplied by the caller; nothing here
/// reads a wall clock.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    generation: u64,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to come due at `due_us` on the caller's clock.
    pub fn schedule(&mut self, due_us: u64, payload: T) -> Ticket {
        let ticket = Ticket {
            generation: self.generation,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_us,
            generation: ticket.generation,
            seq: ticket.seq,
            payload,
        });
        ticket
    }

    /// Make every outstanding entry stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an entry was scheduled before the last `invalidate`.
    pub fn is_stale(&self, ticket: &Ticket) -> bool {
        ticket.generation != self.generation
    }

    /// Entries not yet popped, stale ones included.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest live entry due at or before `now_us`.
    /// Stale entries encountered on the way are dropped.
    pub fn pop_due(&mut self, now_us: u64) -> Option<T> {
        loop {
            let index = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.due_us <= now_us)
                .min_by_key(|(_, entry)| (entry.due_us, entry.seq))
                .map(|(index, _)| index)?;

            let entry = self.pending.swap_remove(index);
            if entry.generation == self.generation {
                return Some(entry.payload);
            }
            tracing::debug!(
                seq = entry.seq,
                generation = entry.generation,
                current = self.generation,
                "discarding stale deferred event"
            );
        }
    }
}
