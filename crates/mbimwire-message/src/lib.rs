//! Typed MBIM control messages with static wire-field schemas.
//!
//! Every MBIM 1.0 control transaction starts with a 12-byte message header:
//! - A 4-byte little-endian message type
//! - A 4-byte little-endian total message length
//! - A 4-byte little-endian transaction id
//!
//! Fragmentable message types (COMMAND, COMMAND_DONE, INDICATE_STATUS) follow
//! it with an 8-byte fragment header. Each concrete message type in this
//! crate carries a static [`schema::MessageSchema`] describing its ordered
//! wire fields; the hand-written encoders and decoders agree with those
//! tables byte for byte.
//!
//! Splitting messages across a bounded transport lives one layer up, in
//! `mbimwire-frag`. This crate only knows how to describe, serialize, and
//! parse individual messages and fragments.

pub mod error;
pub mod fragment;
pub mod header;
pub mod message;
pub mod request;
pub mod response;
pub mod schema;
pub mod service;
pub mod status;
pub mod txid;
pub mod types;

mod wire;

pub use error::{MessageError, Result};
pub use fragment::SecondaryFragment;
pub use header::{FragmentHeader, MessageHeader};
pub use message::ControlMessage;
pub use request::{
    CloseMessage, CommandMessage, HostErrorMessage, OpenMessage, RequestMessage,
};
pub use response::{
    CloseDoneMessage, CommandDoneMessage, FunctionErrorMessage, IndicateStatusMessage,
    OpenDoneMessage, ResponseMessage,
};
pub use service::DeviceServiceId;
pub use txid::TransactionIdPool;
pub use types::MessageType;
