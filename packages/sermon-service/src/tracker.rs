use std::sync::atomic::{AtomicU64, Ordering};

/// Issues increasing tickets so a caller can drop results of a search that was superseded while
/// it was in flight.
#[derive(Debug, Default)]
pub struct SearchTracker {
	latest: AtomicU64,
}
impl SearchTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn issue(&self) -> SearchTicket {
		SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
	}

	pub fn is_latest(&self, ticket: SearchTicket) -> bool {
		self.latest.load(Ordering::SeqCst) == ticket.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);
