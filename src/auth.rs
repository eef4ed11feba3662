//! Client credentials, caller parameter maps, secrets, and token payloads.

pub mod params;
pub mod secret;
pub mod token;

pub use params::*;
pub use secret::*;
pub use token::*;
