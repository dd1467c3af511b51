//! Client order id generation
//!
//! Exchange orders carry a caller-supplied `clientOid`: a random 128-bit
//! identifier rendered as 32 hexadecimal characters with no separators.

use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Alphabet for hexadecimal ids; 16 symbols, so 32 characters carry 128 bits
const HEX_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Client order id type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientOid(String);

impl Default for ClientOid {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientOid {
    /// Create a fresh random client order id
    pub fn new() -> Self {
        Self(flat_hex_id())
    }

    /// Create from a caller-supplied string
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClientOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a random 32-character hexadecimal identifier
pub fn flat_hex_id() -> String {
    nanoid!(32, &HEX_ALPHABET)
}
