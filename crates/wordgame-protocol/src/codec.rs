//! Binary encoding/decoding for wordgame-core messages.
//!
//! This module converts between:
//! - raw binary frames (`&[u8]`)
//! - high-level `wordgame_core::ClientCommand` / `ServerMessage`
//!
//! Framing model (single-message buffer):
//!
//! ```text
//! Client → server
//! ---------------
//! [0]   : tag (WireTag as u8)
//! [1..] : payload (depends on tag)
//!
//! Password (0x02):       [1..]  secret bytes (raw)
//! ListOpponents (0x05):  no payload
//! RequestMatch (0x07):   [1..5] opponent id (u32 BE)
//!                        [5..]  word (UTF-8)
//! Guess (0x0B):          [1..]  guess (UTF-8)
//! Hint (0x0E):           [1..]  hint (UTF-8)
//! GiveUp (0x11):         no payload
//!
//! Server → client
//! ---------------
//! Welcome (0x01):        [1..]  banner (UTF-8)
//! Authorized (0x03):     [1..5] client id (u32 BE)
//! AuthRejected (0x04):   no payload
//! OpponentList (0x06):   [1..5] count (u32 BE)
//!                        [5..]  count × client id (u32 BE)
//! MatchConfirmed (0x08): no payload
//! MatchDeclined (0x09):  [1..]  reason (UTF-8)
//! MatchStarted (0x0A):   [1..]  word (UTF-8)
//! GameOver (0x0C):       [1..]  text (UTF-8)
//! WrongGuess (0x0D):     [1..]  text (UTF-8)
//! Hint (0x0E):           [1..]  hint (UTF-8)
//! RuleViolation (0x0F):  [1..]  text (UTF-8)
//! NoActiveGame (0x10):   [1..]  text (UTF-8)
//! ```
//!
//! NOTE: This module encodes/decodes **one message per buffer**. The
//! server trusts the transport read boundary to deliver one logical
//! message per receive; there is no length prefix.

use thiserror::Error;

use wordgame_core::{ClientCommand, ClientId, ServerMessage};

use crate::wire::WireTag;

/// Errors that can arise when decoding a binary frame.
///
/// Decoding never panics on malformed input; every failure mode is
/// classified here. Encoding is total and has no error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Empty frame or buffer too short for the expected fields.
    #[error("frame truncated")]
    Truncated,

    /// First byte is not a tag valid in this direction.
    #[error("unknown message tag: {0:#04x}")]
    UnknownTag(u8),

    /// A text payload is not valid UTF-8.
    #[error("invalid text encoding")]
    InvalidText,
}

// ============================================================================
// Client → server
// ============================================================================

/// Decode a single client command from a binary frame.
pub fn decode_command(buf: &[u8]) -> Result<ClientCommand, DecodeError> {
    let (&tag, payload) = buf.split_first().ok_or(DecodeError::Truncated)?;

    let wire_tag = WireTag::from_u8(tag).ok_or(DecodeError::UnknownTag(tag))?;

    match wire_tag {
        WireTag::Password => Ok(ClientCommand::Password(payload.to_vec())),
        WireTag::ListOpponents => Ok(ClientCommand::ListOpponents),
        WireTag::RequestMatch => decode_request_match(payload),
        WireTag::Guess => Ok(ClientCommand::Guess(read_text(payload)?)),
        WireTag::Hint => Ok(ClientCommand::Hint(read_text(payload)?)),
        WireTag::GiveUp => Ok(ClientCommand::GiveUp),
        // Valid tag, but server → client only.
        _ => Err(DecodeError::UnknownTag(tag)),
    }
}

/// Encode a single client command into a binary frame.
///
/// The encoded bytes are appended to `out`. This is the **client** side
/// of the wire; the server only ever decodes commands.
pub fn encode_command(cmd: &ClientCommand, out: &mut Vec<u8>) {
    match cmd {
        ClientCommand::Password(secret) => {
            out.push(WireTag::Password as u8);
            out.extend_from_slice(secret);
        }
        ClientCommand::ListOpponents => out.push(WireTag::ListOpponents as u8),
        ClientCommand::RequestMatch { opponent, word } => {
            out.push(WireTag::RequestMatch as u8);
            out.extend_from_slice(&opponent.0.to_be_bytes());
            out.extend_from_slice(word.as_bytes());
        }
        ClientCommand::Guess(guess) => {
            out.push(WireTag::Guess as u8);
            out.extend_from_slice(guess.as_bytes());
        }
        ClientCommand::Hint(hint) => {
            out.push(WireTag::Hint as u8);
            out.extend_from_slice(hint.as_bytes());
        }
        ClientCommand::GiveUp => out.push(WireTag::GiveUp as u8),
    }
}

fn decode_request_match(payload: &[u8]) -> Result<ClientCommand, DecodeError> {
    if payload.len() < 4 {
        return Err(DecodeError::Truncated);
    }

    let opponent = ClientId(read_u32_be(&payload[0..4]));
    let word = read_text(&payload[4..])?;

    Ok(ClientCommand::RequestMatch { opponent, word })
}

// ============================================================================
// Server → client
// ============================================================================

/// Encode a single server message into a binary frame.
///
/// The encoded bytes are appended to `out`. Total: every well-formed
/// message variant encodes.
pub fn encode_message(msg: &ServerMessage, out: &mut Vec<u8>) {
    match msg {
        ServerMessage::Welcome(text) => encode_text(WireTag::Welcome, text, out),
        ServerMessage::Authorized(id) => {
            out.push(WireTag::Authorized as u8);
            out.extend_from_slice(&id.0.to_be_bytes());
        }
        ServerMessage::AuthRejected => out.push(WireTag::AuthRejected as u8),
        ServerMessage::OpponentList(ids) => {
            out.push(WireTag::OpponentList as u8);
            out.extend_from_slice(&(ids.len() as u32).to_be_bytes());
            for id in ids {
                out.extend_from_slice(&id.0.to_be_bytes());
            }
        }
        ServerMessage::MatchConfirmed => out.push(WireTag::MatchConfirmed as u8),
        ServerMessage::MatchDeclined(text) => {
            encode_text(WireTag::MatchDeclined, text, out)
        }
        ServerMessage::MatchStarted(word) => {
            encode_text(WireTag::MatchStarted, word, out)
        }
        ServerMessage::GameOver(text) => encode_text(WireTag::GameOver, text, out),
        ServerMessage::WrongGuess(text) => encode_text(WireTag::WrongGuess, text, out),
        ServerMessage::Hint(hint) => encode_text(WireTag::Hint, hint, out),
        ServerMessage::RuleViolation(text) => {
            encode_text(WireTag::RuleViolation, text, out)
        }
        ServerMessage::NoActiveGame(text) => {
            encode_text(WireTag::NoActiveGame, text, out)
        }
    }
}

/// Decode a single server message from a binary frame.
///
/// This is useful on the **client** side when reading from the server.
pub fn decode_message(buf: &[u8]) -> Result<ServerMessage, DecodeError> {
    let (&tag, payload) = buf.split_first().ok_or(DecodeError::Truncated)?;

    let wire_tag = WireTag::from_u8(tag).ok_or(DecodeError::UnknownTag(tag))?;

    match wire_tag {
        WireTag::Welcome => Ok(ServerMessage::Welcome(read_text(payload)?)),
        WireTag::Authorized => {
            if payload.len() < 4 {
                return Err(DecodeError::Truncated);
            }
            Ok(ServerMessage::Authorized(ClientId(read_u32_be(
                &payload[0..4],
            ))))
        }
        WireTag::AuthRejected => Ok(ServerMessage::AuthRejected),
        WireTag::OpponentList => decode_opponent_list(payload),
        WireTag::MatchConfirmed => Ok(ServerMessage::MatchConfirmed),
        WireTag::MatchDeclined => Ok(ServerMessage::MatchDeclined(read_text(payload)?)),
        WireTag::MatchStarted => Ok(ServerMessage::MatchStarted(read_text(payload)?)),
        WireTag::GameOver => Ok(ServerMessage::GameOver(read_text(payload)?)),
        WireTag::WrongGuess => Ok(ServerMessage::WrongGuess(read_text(payload)?)),
        WireTag::Hint => Ok(ServerMessage::Hint(read_text(payload)?)),
        WireTag::RuleViolation => Ok(ServerMessage::RuleViolation(read_text(payload)?)),
        WireTag::NoActiveGame => Ok(ServerMessage::NoActiveGame(read_text(payload)?)),
        // Valid tag, but client → server only.
        _ => Err(DecodeError::UnknownTag(tag)),
    }
}

fn decode_opponent_list(payload: &[u8]) -> Result<ServerMessage, DecodeError> {
    if payload.len() < 4 {
        return Err(DecodeError::Truncated);
    }

    let count = read_u32_be(&payload[0..4]) as usize;
    if payload.len() < 4 + count * 4 {
        return Err(DecodeError::Truncated);
    }

    let ids = (0..count)
        .map(|i| {
            let start = 4 + i * 4;
            ClientId(read_u32_be(&payload[start..start + 4]))
        })
        .collect();

    Ok(ServerMessage::OpponentList(ids))
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn encode_text(tag: WireTag, text: &str, out: &mut Vec<u8>) {
    out.push(tag as u8);
    out.extend_from_slice(text.as_bytes());
}

fn read_text(bytes: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| DecodeError::InvalidText)
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    let arr: [u8; 4] = bytes[0..4].try_into().expect("slice with incorrect length");
    u32::from_be_bytes(arr)
}
