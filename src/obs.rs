//! Optional observability helpers for signing and token flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth_client_kit.flow` with the `flow`
//!   (operation) and `stage` (call site) fields.
//!   Failures also emit a `debug` event carrying the error inside that span.
//! - Enable `metrics` to increment the `oauth_client_kit_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow`, `stage`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operation kinds observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// OAuth1 request signing.
	OAuth1Signature,
	/// Authorization Code grant (authorize URL + code exchange).
	AuthorizationCode,
	/// Refresh token grant.
	Refresh,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::OAuth1Signature => "oauth1_signature",
			FlowKind::AuthorizationCode => "authorization_code",
			FlowKind::Refresh => "refresh",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an instrumented operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a [`FlowSpan`] and records the attempt plus its outcome.
pub(crate) async fn observe<T, Fut>(kind: FlowKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage);

	record_flow_outcome(kind, stage, FlowOutcome::Attempt);

	let result = span.instrument(fut).await;

	finish(&span, kind, stage, &result);

	result
}

/// Synchronous counterpart of [`observe`] for operations that never suspend.
pub(crate) fn observe_sync<T, F>(kind: FlowKind, stage: &'static str, f: F) -> Result<T>
where
	F: FnOnce() -> Result<T>,
{
	let span = FlowSpan::new(kind, stage);

	record_flow_outcome(kind, stage, FlowOutcome::Attempt);

	let result = span.in_scope(f);

	finish(&span, kind, stage, &result);

	result
}

fn finish<T>(span: &FlowSpan, kind: FlowKind, stage: &'static str, result: &Result<T>) {
	match result {
		Ok(_) => record_flow_outcome(kind, stage, FlowOutcome::Success),
		Err(e) => {
			span.record_failure(e);
			record_flow_outcome(kind, stage, FlowOutcome::Failure);
		},
	}
}
