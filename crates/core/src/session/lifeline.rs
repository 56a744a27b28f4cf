//! Liveness flag for callers that may be torn down mid-operation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling a long-running operation whether its caller still exists.
///
/// The caller keeps one clone and calls [`dispose`](Self::dispose) (or drops
/// a [`LifelineGuard`]) on teardown; the operation checks
/// [`is_alive`](Self::is_alive) before applying results.
#[derive(Debug, Clone)]
pub struct Lifeline {
	alive: Arc<AtomicBool>,
}

impl Lifeline {
	pub fn new() -> Self {
		Self {
			alive: Arc::new(AtomicBool::new(true)),
		}
	}

	pub fn is_alive(&self) -> bool {
		self.alive.load(Ordering::Acquire)
	}

	pub fn dispose(&self) {
		self.alive.store(false, Ordering::Release);
	}

	/// Returns a guard that disposes this lifeline when dropped.
	pub fn guard(&self) -> LifelineGuard {
		LifelineGuard { lifeline: self.clone() }
	}
}

impl Default for Lifeline {
	fn default() -> Self {
		Self::new()
	}
}

/// Disposes its [`Lifeline`] on drop.
#[derive(Debug)]
pub struct LifelineGuard {
	lifeline: Lifeline,
}

impl Drop for LifelineGuard {
	fn drop(&mut self) {
		self.lifeline.dispose();
	}
}
