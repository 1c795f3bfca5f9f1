//! Fragmentation and reassembly for MBIM control messages.
//!
//! The control channel negotiates a maximum transfer size; messages larger
//! than it are split into a primary fragment (the message with a truncated
//! payload) and secondary fragments (headers plus a payload slice). This is
//! the core value-add layer of mbimwire:
//!
//! - [`fragment_request`] splits an outgoing request into raw transfer
//!   buffers, or passes it through untouched when it already fits.
//! - [`reassemble_response`] parses the transfer buffers of one logical
//!   response back into a single message, validating the declared fragment
//!   count and payload length against what actually arrived.
//! - [`reassemble_request`] is the symmetric device-role entry point.
//!
//! Both halves are pure, call-scoped functions: no shared state, no I/O.
//! Collecting the fragments of one logical message (and nothing else) is the
//! transport layer's job.

pub mod error;
pub mod fragment;
pub mod plan;
pub mod reassemble;

pub use error::{FragError, Result};
pub use fragment::fragment_request;
pub use plan::FragmentPlan;
pub use reassemble::{reassemble_request, reassemble_response};
