//! Status and protocol error codes.
//!
//! Status codes travel in the `status` field of OPEN_DONE, CLOSE_DONE and
//! COMMAND_DONE. Protocol error codes travel in the `error_status_code`
//! field of HOST_ERROR and FUNCTION_ERROR.

/// The operation succeeded.
pub const STATUS_SUCCESS: u32 = 0;

/// The device is busy.
pub const STATUS_BUSY: u32 = 1;

/// The operation failed.
pub const STATUS_FAILURE: u32 = 2;

/// No SIM is inserted.
pub const STATUS_SIM_NOT_INSERTED: u32 = 3;

/// The SIM is faulty.
pub const STATUS_BAD_SIM: u32 = 4;

/// A PIN must be entered first.
pub const STATUS_PIN_REQUIRED: u32 = 5;

/// PIN entry is disabled.
pub const STATUS_PIN_DISABLED: u32 = 6;

/// The device is not registered on a network.
pub const STATUS_NOT_REGISTERED: u32 = 7;

/// No network providers were found.
pub const STATUS_PROVIDERS_NOT_FOUND: u32 = 8;

/// The device does not support the operation.
pub const STATUS_NO_DEVICE_SUPPORT: u32 = 9;

/// Returns a human-readable name for a status code.
pub fn status_name(code: u32) -> &'static str {
    match code {
        STATUS_SUCCESS => "SUCCESS",
        STATUS_BUSY => "BUSY",
        STATUS_FAILURE => "FAILURE",
        STATUS_SIM_NOT_INSERTED => "SIM_NOT_INSERTED",
        STATUS_BAD_SIM => "BAD_SIM",
        STATUS_PIN_REQUIRED => "PIN_REQUIRED",
        STATUS_PIN_DISABLED => "PIN_DISABLED",
        STATUS_NOT_REGISTERED => "NOT_REGISTERED",
        STATUS_PROVIDERS_NOT_FOUND => "PROVIDERS_NOT_FOUND",
        STATUS_NO_DEVICE_SUPPORT => "NO_DEVICE_SUPPORT",
        _ => "UNKNOWN",
    }
}

/// A fragment was not received within the fragmentation timeout.
pub const ERROR_TIMEOUT_FRAGMENT: u32 = 1;

/// A fragment arrived out of sequence.
pub const ERROR_FRAGMENT_OUT_OF_SEQUENCE: u32 = 2;

/// The declared information buffer length does not match the received bytes.
pub const ERROR_LENGTH_MISMATCH: u32 = 3;

/// A transaction id was reused while still outstanding.
pub const ERROR_DUPLICATED_TID: u32 = 4;

/// A command was issued before the channel was opened.
pub const ERROR_NOT_OPENED: u32 = 5;

/// Unspecified error.
pub const ERROR_UNKNOWN: u32 = 6;

/// The transaction was cancelled.
pub const ERROR_CANCEL: u32 = 7;

/// A message exceeded the negotiated maximum transfer size.
pub const ERROR_MAX_TRANSFER: u32 = 8;

/// Returns a human-readable name for a protocol error code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        ERROR_TIMEOUT_FRAGMENT => "TIMEOUT_FRAGMENT",
        ERROR_FRAGMENT_OUT_OF_SEQUENCE => "FRAGMENT_OUT_OF_SEQUENCE",
        ERROR_LENGTH_MISMATCH => "LENGTH_MISMATCH",
        ERROR_DUPLICATED_TID => "DUPLICATED_TID",
        ERROR_NOT_OPENED => "NOT_OPENED",
        ERROR_UNKNOWN => "UNKNOWN",
        ERROR_CANCEL => "CANCEL",
        ERROR_MAX_TRANSFER => "MAX_TRANSFER",
        _ => "UNKNOWN",
    }
}
