//! wordgame-protocol
//!
//! Binary wire protocol for the word-guessing server:
//! - tag catalog and frame constants
//! - encode/decode between raw frames and `wordgame-core` messages

pub mod codec;
pub mod wire;

pub use codec::{
    decode_command, decode_message, encode_command, encode_message, DecodeError,
};
pub use wire::{WireTag, MAX_FRAME_LEN};
