// self
use crate::{_prelude::*, obs::FlowKind};

/// Future returned by [`FlowSpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough when `tracing` is off.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// `oauth2_wellknown.flow` span covering one `discover`, `get_access_token`, or
/// `generate_authorization_url` call.
///
/// Fields: `flow` (the [`FlowKind`] label) and `stage` (the public method name). Zero-sized
/// without the `tracing` feature.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
#[cfg(feature = "tracing")]
impl FlowSpan {
	/// Opens the span at `info` level.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		Self { span: tracing::info_span!("oauth2_wellknown.flow", flow = kind.as_str(), stage) }
	}

	/// Attaches the span to `fut`; discovery and the token exchange both run inside it.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		tracing::Instrument::instrument(fut, self.span.clone())
	}
}
#[cfg(not(feature = "tracing"))]
impl FlowSpan {
	/// No-op.
	pub fn new(_kind: FlowKind, _stage: &'static str) -> Self {
		Self {}
	}

	/// Returns `fut` unchanged.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		fut
	}
}
