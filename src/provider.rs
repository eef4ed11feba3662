//! Provider-facing data: the local descriptor, the discovered document, and grant rules.
//!
//! `descriptor` holds validated local configuration (where the discovery document lives and the
//! scope requested by authorization URLs). `discovery` models the provider's
//! `/.well-known/openid-configuration` document. `grant` owns the immutable grant tables and the
//! argument validator every token request passes through before touching the network.

pub mod descriptor;
pub mod discovery;
pub mod grant;

pub use descriptor::*;
pub use discovery::*;
pub use grant::*;
