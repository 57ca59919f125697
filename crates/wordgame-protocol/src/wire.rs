//! Low-level wire tags and constants.
//!
//! Each frame is a single tag byte followed by a tag-specific payload.
//! There is no length prefix and no version byte; one socket read is
//! trusted to deliver one logical message. The encode/decode logic
//! lives in `codec`.

/// Maximum size of a single frame, including the tag byte.
///
/// Matches the receive buffer the server reads into; anything longer
/// is truncated at the transport and will fail to make sense here.
pub const MAX_FRAME_LEN: usize = 1024;

/// Message tags, both directions.
///
/// The tag is the first byte of every frame. Most tags travel in one
/// direction only; `Hint` is used both for submitting a hint and for
/// relaying it.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireTag {
    /// server → client: welcome banner (UTF-8 text).
    Welcome = 0x01,

    /// client → server: shared secret (raw bytes).
    Password = 0x02,

    /// server → client: assigned client id (u32 BE).
    Authorized = 0x03,

    /// server → client: wrong secret, connection will be closed. No payload.
    AuthRejected = 0x04,

    /// client → server: request opponent list. No payload.
    ListOpponents = 0x05,

    /// server → client: u32 BE count followed by that many u32 BE ids.
    OpponentList = 0x06,

    /// client → server: opponent id (u32 BE) + word (UTF-8).
    RequestMatch = 0x07,

    /// server → client: match confirmed to the challenger. No payload.
    MatchConfirmed = 0x08,

    /// server → client: opponent unavailable or busy (UTF-8 text).
    MatchDeclined = 0x09,

    /// server → client: match started, carries the word (UTF-8).
    MatchStarted = 0x0A,

    /// client → server: guess text (UTF-8).
    Guess = 0x0B,

    /// server → client: game over notification (UTF-8 text).
    GameOver = 0x0C,

    /// server → client: incorrect guess notification (UTF-8 text).
    WrongGuess = 0x0D,

    /// both directions: hint text (UTF-8).
    Hint = 0x0E,

    /// server → client: generic rule violation (UTF-8 text).
    RuleViolation = 0x0F,

    /// server → client: no active game for the attempted hint (UTF-8 text).
    NoActiveGame = 0x10,

    /// client → server: give up. No payload.
    GiveUp = 0x11,
}

impl WireTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(WireTag::Welcome),
            0x02 => Some(WireTag::Password),
            0x03 => Some(WireTag::Authorized),
            0x04 => Some(WireTag::AuthRejected),
            0x05 => Some(WireTag::ListOpponents),
            0x06 => Some(WireTag::OpponentList),
            0x07 => Some(WireTag::RequestMatch),
            0x08 => Some(WireTag::MatchConfirmed),
            0x09 => Some(WireTag::MatchDeclined),
            0x0A => Some(WireTag::MatchStarted),
            0x0B => Some(WireTag::Guess),
            0x0C => Some(WireTag::GameOver),
            0x0D => Some(WireTag::WrongGuess),
            0x0E => Some(WireTag::Hint),
            0x0F => Some(WireTag::RuleViolation),
            0x10 => Some(WireTag::NoActiveGame),
            0x11 => Some(WireTag::GiveUp),
            _ => None,
        }
    }
}
