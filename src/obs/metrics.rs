// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{CallOutcome, Operation};

/// Increments `vgs_client_call_total{operation,outcome}` (when enabled).
pub fn record_call_outcome(operation: Operation, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"vgs_client_call_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records the wall time of a finished call in `vgs_client_call_duration_seconds{operation}`.
pub fn record_call_duration(operation: Operation, elapsed: StdDuration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("vgs_client_call_duration_seconds", "operation" => operation.as_str())
			.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, elapsed);
	}
}

/// Increments `vgs_client_response_total{status_class}` for a response from the payment host.
pub fn record_response_status(status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("vgs_client_response_total", "status_class" => status_class(status))
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = status;
	}
}

/// Buckets an HTTP status into `1xx`..`5xx`, or `other` outside that range.
pub fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}
