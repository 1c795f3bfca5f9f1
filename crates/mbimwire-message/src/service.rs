//! Device service identifiers.
//!
//! Device services are addressed by a 16-byte UUID carried verbatim (network
//! byte order) in COMMAND, COMMAND_DONE and INDICATE_STATUS messages.

use std::fmt;

/// A 16-byte device service UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceServiceId([u8; 16]);

impl DeviceServiceId {
    /// Basic connectivity (a289cc33-bcbb-8b4f-b6b0-133ec2aae6df).
    pub const BASIC_CONNECT: Self = Self([
        0xa2, 0x89, 0xcc, 0x33, 0xbc, 0xbb, 0x8b, 0x4f, 0xb6, 0xb0, 0x13, 0x3e, 0xc2, 0xaa, 0xe6,
        0xdf,
    ]);

    /// SMS (533fbe4b-14ed-4e44-8720-617aabf8c47f).
    pub const SMS: Self = Self([
        0x53, 0x3f, 0xbe, 0x4b, 0x14, 0xed, 0x4e, 0x44, 0x87, 0x20, 0x61, 0x7a, 0xab, 0xf8, 0xc4,
        0x7f,
    ]);

    /// USSD (e550a0c8-5e82-479e-82f7-10abf4c3351f).
    pub const USSD: Self = Self([
        0xe5, 0x50, 0xa0, 0xc8, 0x5e, 0x82, 0x47, 0x9e, 0x82, 0xf7, 0x10, 0xab, 0xf4, 0xc3, 0x35,
        0x1f,
    ]);

    /// Phonebook (4bf38476-1e6a-41db-b1d8-bed289c25bdb).
    pub const PHONEBOOK: Self = Self([
        0x4b, 0xf3, 0x84, 0x76, 0x1e, 0x6a, 0x41, 0xdb, 0xb1, 0xd8, 0xbe, 0xd2, 0x89, 0xc2, 0x5b,
        0xdb,
    ]);

    /// SIM toolkit (d8f20131-fcb5-4e17-8602-d6ed3816164c).
    pub const STK: Self = Self([
        0xd8, 0xf2, 0x01, 0x31, 0xfc, 0xb5, 0x4e, 0x17, 0x86, 0x02, 0xd6, 0xed, 0x38, 0x16, 0x16,
        0x4c,
    ]);

    /// Authentication (1d2b5ff7-0aa1-48b2-aa52-50f15767174e).
    pub const AUTH: Self = Self([
        0x1d, 0x2b, 0x5f, 0xf7, 0x0a, 0xa1, 0x48, 0xb2, 0xaa, 0x52, 0x50, 0xf1, 0x57, 0x67, 0x17,
        0x4e,
    ]);

    /// Device service stream (c08a26dd-7718-4382-8482-6e0d583c4d0e).
    pub const DSS: Self = Self([
        0xc0, 0x8a, 0x26, 0xdd, 0x77, 0x18, 0x43, 0x82, 0x84, 0x82, 0x6e, 0x0d, 0x58, 0x3c, 0x4d,
        0x0e,
    ]);

    /// Create a service id from raw wire bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// The raw wire bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for DeviceServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11], b[12],
            b[13], b[14], b[15]
        )
    }
}
