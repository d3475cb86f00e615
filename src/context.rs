//! Cancellation context threaded through every client call.

// crates.io
use tokio::sync::watch;
// self
use crate::_prelude::*;

/// Cloneable cancellation signal bound to a [`Client`](crate::client::Client).
///
/// Every call made through the client races the transport against this signal. Once cancelled
/// the context stays cancelled; bind a fresh context to resume issuing calls.
#[derive(Clone)]
pub struct CancelContext(Arc<watch::Sender<bool>>);
impl CancelContext {
	/// Creates a context that has not been cancelled.
	pub fn new() -> Self {
		let (tx, _) = watch::channel(false);

		Self(Arc::new(tx))
	}

	/// Cancels every in-flight and future call bound to this context.
	pub fn cancel(&self) {
		self.0.send_replace(true);
	}

	/// Returns `true` once [`cancel`](Self::cancel) has been called.
	pub fn is_cancelled(&self) -> bool {
		*self.0.borrow()
	}

	/// Resolves when the context is cancelled.
	pub async fn cancelled(&self) {
		let mut rx = self.0.subscribe();

		// The sender lives inside `self`, so the channel cannot close while we wait.
		let _ = rx.wait_for(|cancelled| *cancelled).await;
	}
}
impl Default for CancelContext {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for CancelContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CancelContext").field(&self.is_cancelled()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn clones_share_the_signal() {
		let ctx = CancelContext::new();
		let other = ctx.clone();

		assert!(!other.is_cancelled());

		ctx.cancel();

		assert!(other.is_cancelled());
		assert_eq!(format!("{other:?}"), "CancelContext(true)");
	}

	#[tokio::test]
	async fn cancelled_resolves_after_cancel() {
		let ctx = CancelContext::new();
		let waiter = ctx.clone();
		let handle = tokio::spawn(async move { waiter.cancelled().await });

		ctx.cancel();

		handle.await.expect("Waiter task should complete once cancelled.");
	}

	#[tokio::test]
	async fn cancelled_is_immediate_when_already_cancelled() {
		let ctx = CancelContext::new();

		ctx.cancel();
		ctx.cancelled().await;
	}
}
