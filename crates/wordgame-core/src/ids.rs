//! Client identifiers.

use std::fmt;

/// Identifier for an authenticated client.
///
/// Assigned sequentially starting at 1 and never reused for the
/// lifetime of the process. Carried on the wire as 4 bytes big-endian,
/// hence `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
