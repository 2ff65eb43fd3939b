//! Last-write-wins slot for the most recently requested series.
//!
//! Every recomputation takes a [`Ticket`] before it starts. Only the output of the
//! newest ticket is published; a slower, older computation finishing later is
//! discarded. Readers only ever see a complete output.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::engine::SeriesOutput;

/// Generation stamp handed to a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Generation number.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    output: Option<Arc<SeriesOutput>>,
}

/// Holds the output of the newest recomputation.
#[derive(Debug, Default)]
pub struct LatestSeries {
    issued: AtomicU64,
    slot: RwLock<Published>,
}

impl LatestSeries {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a recomputation, superseding every earlier ticket.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if no newer ticket has been issued.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Publishes `output` if `ticket` is still the newest.
    ///
    /// Returns false when the output was discarded as stale.
    pub fn publish(&self, ticket: Ticket, output: Arc<SeriesOutput>) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) || slot.generation >= ticket.0 {
            tracing::debug!(
                generation = ticket.0,
                newest = self.issued.load(Ordering::SeqCst),
                "Discarding stale series"
            );
            return false;
        }

        slot.generation = ticket.0;
        slot.output = Some(output);
        true
    }

    /// The most recently published output.
    #[must_use]
    pub fn get(&self) -> Option<Arc<SeriesOutput>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .output
            .clone()
    }

    /// Generation of the most recently published output (0 when none).
    #[must_use]
    pub fn published_generation(&self) -> u64 {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDef;
    use crate::pipeline::Diagnostics;
    use aidflow_shared::types::AllocationMethod;

    fn output(method: AllocationMethod) -> Arc<SeriesOutput> {
        Arc::new(SeriesOutput {
            calendar: CalendarDef::Calendar,
            method,
            categories: vec![],
            points: vec![],
            diagnostics: Diagnostics::default(),
        })
    }

    #[test]
    fn test_newest_ticket_wins() {
        let latest = LatestSeries::new();
        assert!(latest.get().is_none());

        let older = latest.ticket();
        let newer = latest.ticket();
        assert!(!latest.is_current(older));
        assert!(latest.is_current(newer));

        assert!(latest.publish(newer, output(AllocationMethod::PeriodStart)));
        assert!(!latest.publish(older, output(AllocationMethod::Proportional)));

        let published = latest.get().unwrap();
        assert_eq!(published.method, AllocationMethod::PeriodStart);
        assert_eq!(latest.published_generation(), newer.generation());
    }

    #[test]
    fn test_stale_result_discarded_even_if_first() {
        let latest = LatestSeries::new();
        let older = latest.ticket();
        let _newer = latest.ticket();

        assert!(!latest.publish(older, output(AllocationMethod::Proportional)));
        assert!(latest.get().is_none());
    }

    #[test]
    fn test_concurrent_publishers_keep_newest() {
        let latest = Arc::new(LatestSeries::new());
        let tickets: Vec<Ticket> = (0..8).map(|_| latest.ticket()).collect();
        let newest = *tickets.last().unwrap();

        std::thread::scope(|scope| {
            for ticket in tickets {
                let latest = Arc::clone(&latest);
                scope.spawn(move || {
                    latest.publish(ticket, output(AllocationMethod::Proportional));
                });
            }
        });

        assert_eq!(latest.published_generation(), newest.generation());
    }
}
