use std::{
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use crate::{
    config::{DF, PROVIDER},
    data::FetchError,
    utils::AppInstant,
};

struct Delivery<T> {
    generation: u64,
    result: Result<T, FetchError>,
}

struct Pending {
    generation: u64,
    started: AppInstant,
}

/// Handed to the task doing the work; completing it posts the result back to the slot.
pub struct FetchTicket<T> {
    generation: u64,
    tx: Sender<Delivery<T>>,
}

impl<T> FetchTicket<T> {
    pub fn complete(self, result: Result<T, FetchError>) {
        // The slot may have been dropped with its view; nothing to deliver to then.
        let _ = self.tx.send(Delivery {
            generation: self.generation,
            result,
        });
    }
}

/// At most one in-flight request per series. Results from superseded requests are discarded,
/// and a request that outlives the deadline resolves to [`FetchError::Timeout`].
pub struct FetchSlot<T> {
    label: &'static str,
    generation: u64,
    pending: Option<Pending>,
    deadline: Duration,
    tx: Sender<Delivery<T>>,
    rx: Receiver<Delivery<T>>,
}

impl<T> FetchSlot<T> {
    pub fn new(label: &'static str) -> Self {
        Self::with_deadline(label, Duration::from_millis(PROVIDER.client.timeout_ms))
    }

    pub fn with_deadline(label: &'static str, deadline: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            label,
            generation: 0,
            pending: None,
            deadline,
            tx,
            rx,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// A ticket for a new request, or `None` while one is already in flight.
    pub fn begin(&mut self) -> Option<FetchTicket<T>> {
        self.begin_at(AppInstant::now())
    }

    pub fn begin_at(&mut self, now: AppInstant) -> Option<FetchTicket<T>> {
        if self.pending.is_some() {
            return None;
        }
        Some(self.issue(now))
    }

    /// Abandons whatever is in flight and issues a fresh ticket.
    pub fn supersede(&mut self) -> FetchTicket<T> {
        self.supersede_at(AppInstant::now())
    }

    pub fn supersede_at(&mut self, now: AppInstant) -> FetchTicket<T> {
        #[cfg(debug_assertions)]
        if DF.log_fetch {
            if let Some(stale) = &self.pending {
                log::info!("FETCH [{}]: superseding generation {}", self.label, stale.generation);
            }
        }
        self.issue(now)
    }

    fn issue(&mut self, now: AppInstant) -> FetchTicket<T> {
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            started: now,
        });
        FetchTicket {
            generation: self.generation,
            tx: self.tx.clone(),
        }
    }

    /// Drains finished work. Returns the current request's outcome once, if it has one.
    pub fn poll(&mut self) -> Option<Result<T, FetchError>> {
        self.poll_at(AppInstant::now())
    }

    pub fn poll_at(&mut self, now: AppInstant) -> Option<Result<T, FetchError>> {
        let current = self.pending.as_ref()?.generation;

        let mut outcome = None;
        while let Ok(delivery) = self.rx.try_recv() {
            if delivery.generation == current {
                outcome = Some(delivery.result);
            } else {
                #[cfg(debug_assertions)]
                if DF.log_fetch {
                    log::info!(
                        "FETCH [{}]: dropping stale generation {} (current {})",
                        self.label,
                        delivery.generation,
                        current
                    );
                }
            }
        }

        if outcome.is_some() {
            self.pending = None;
            return outcome;
        }

        let started = self.pending.as_ref()?.started;
        if now.saturating_duration_since(started) >= self.deadline {
            log::warn!("FETCH [{}]: timed out after {:?}", self.label, self.deadline);
            // Bump so a late answer for this request is treated as stale.
            self.generation += 1;
            self.pending = None;
            return Some(Err(FetchError::Timeout {
                after_ms: self.deadline.as_millis() as u64,
            }));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_request_in_flight() {
        let mut slot: FetchSlot<u32> = FetchSlot::new("test");
        let ticket = slot.begin().unwrap();
        assert!(slot.begin().is_none());
        ticket.complete(Ok(7));
        assert_eq!(slot.poll(), Some(Ok(7)));
        assert!(!slot.is_pending());
        assert!(slot.begin().is_some());
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut slot: FetchSlot<u32> = FetchSlot::new("test");
        let old = slot.begin().unwrap();
        let new = slot.supersede();
        old.complete(Ok(1));
        assert_eq!(slot.poll(), None);
        new.complete(Ok(2));
        assert_eq!(slot.poll(), Some(Ok(2)));
    }

    #[test]
    fn deadline_turns_into_timeout() {
        let mut slot: FetchSlot<u32> = FetchSlot::with_deadline("test", Duration::from_secs(10));
        let start = AppInstant::now();
        let late = slot.begin_at(start).unwrap();

        assert_eq!(slot.poll_at(start + Duration::from_secs(9)), None);
        assert_eq!(
            slot.poll_at(start + Duration::from_secs(10)),
            Some(Err(FetchError::Timeout { after_ms: 10_000 }))
        );

        // the late answer must not leak into the next request
        late.complete(Ok(5));
        let fresh = slot.begin_at(start + Duration::from_secs(11)).unwrap();
        assert_eq!(slot.poll_at(start + Duration::from_secs(11)), None);
        fresh.complete(Ok(6));
        assert_eq!(slot.poll_at(start + Duration::from_secs(12)), Some(Ok(6)));
    }

    #[test]
    fn idle_slot_polls_nothing() {
        let mut slot: FetchSlot<u32> = FetchSlot::new("test");
        assert_eq!(slot.poll(), None);
    }
}
