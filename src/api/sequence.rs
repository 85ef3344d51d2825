//! Ordering of in-flight generation requests.
//!
//! Requests are never cancelled; instead each one carries an id and only the
//! completion of the most recently issued id may touch the display.

/// Monotonic id attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
    settled: bool,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the id for a new submission. Every earlier id becomes stale.
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.settled = false;
        RequestId(self.latest)
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 == self.latest && self.latest != 0
    }

    /// Accept a completion if it belongs to the latest submission.
    pub fn settle(&mut self, id: RequestId) -> bool {
        if self.is_latest(id) && !self.settled {
            self.settled = true;
            true
        } else {
            false
        }
    }

    /// Whether the latest submission is still waiting for its completion.
    pub fn pending(&self) -> bool {
        self.latest != 0 && !self.settled
    }
}
