//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `vgs_client.call` with the `operation` and
//!   `stage` fields, plus debug/warn events for token refreshes and failed calls.
//! - Enable `metrics` to increment the `vgs_client_call_total` counter for every
//!   attempt/success/failure (labeled by `operation` + `outcome`), record call latency in the
//!   `vgs_client_call_duration_seconds` histogram, and count payment host responses in
//!   `vgs_client_response_total` by `status_class`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// std
use std::time::Instant;
// self
use crate::_prelude::*;

/// Client operations observed by spans and counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Token endpoint exchange.
	FetchToken,
	/// `GET /gateways`.
	GetGateways,
	/// `GET /financial_instruments`.
	GetFinancialInstruments,
	/// `POST /financial_instruments`.
	CreateFinancialInstrument,
	/// `POST /verfications`.
	CreateVerifications,
	/// Raw body download through [`Client::get_raw`](crate::client::Client::get_raw).
	Raw,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::FetchToken => "fetch_token",
			Operation::GetGateways => "get_gateways",
			Operation::GetFinancialInstruments => "get_financial_instruments",
			Operation::CreateFinancialInstrument => "create_financial_instrument",
			Operation::CreateVerifications => "create_verifications",
			Operation::Raw => "raw",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a call span, recording attempt and final outcome.
pub(crate) async fn observe<T, Fut>(
	operation: Operation,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(operation, stage);
	let started = Instant::now();

	record_call_outcome(operation, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	record_call_duration(operation, started.elapsed());

	match &result {
		Ok(_) => record_call_outcome(operation, CallOutcome::Success),
		Err(e) => {
			record_call_outcome(operation, CallOutcome::Failure);
			warn_call_failed(operation, e);
		},
	}

	result
}
