// Typed messages exchanged between a room and its two players.
//
// Scalars (role, turn, verdict) go through `write_scalar`/`read_scalar`.
// Moves are JSON objects `{"x": .., "y": ..}` wrapped in a length-delimited
// frame. Both directions use the same move shape: players send their own
// move to the room, and the room relays it verbatim to the other player.
//
// Per half-turn, the room sends the turn scalar to both players, reads one
// move from the acting player, relays it to the other player, then sends the
// verdict scalar to both.

use std::io::{Read, Write};

use crate::error::ProtocolError;
use crate::framing::{read_message, read_scalar, write_message, write_scalar};
use crate::types::{Move, PlayerId, Verdict};

/// Serialize a move into its length-prefixed wire form.
pub fn encode_move(mv: &Move) -> Result<Vec<u8>, ProtocolError> {
    let json = serde_json::to_vec(mv)?;
    let mut wire = Vec::with_capacity(json.len() + 4);
    write_message(&mut wire, &json)?;
    Ok(wire)
}

/// Read one length-prefixed move from a stream.
pub fn decode_move<R: Read>(reader: &mut R) -> Result<Move, ProtocolError> {
    let bytes = read_message(reader)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn send_move<W: Write>(writer: &mut W, mv: &Move) -> Result<(), ProtocolError> {
    let json = serde_json::to_vec(mv)?;
    write_message(writer, &json)
}

pub fn recv_move<R: Read>(reader: &mut R) -> Result<Move, ProtocolError> {
    decode_move(reader)
}

/// Tell a freshly paired connection which seat it holds.
pub fn send_role<W: Write>(writer: &mut W, player: PlayerId) -> Result<(), ProtocolError> {
    write_scalar(writer, player.to_wire())
}

/// Announce whose half-turn is next.
pub fn send_turn<W: Write>(writer: &mut W, player: PlayerId) -> Result<(), ProtocolError> {
    write_scalar(writer, player.to_wire())
}

pub fn send_verdict<W: Write>(writer: &mut W, verdict: Verdict) -> Result<(), ProtocolError> {
    write_scalar(writer, verdict.to_wire())
}

pub fn recv_role<R: Read>(reader: &mut R) -> Result<PlayerId, ProtocolError> {
    recv_player(reader)
}

pub fn recv_turn<R: Read>(reader: &mut R) -> Result<PlayerId, ProtocolError> {
    recv_player(reader)
}

pub fn recv_verdict<R: Read>(reader: &mut R) -> Result<Verdict, ProtocolError> {
    let value = read_scalar(reader)?;
    Verdict::from_wire(value).ok_or(ProtocolError::UnknownScalar { value })
}

fn recv_player<R: Read>(reader: &mut R) -> Result<PlayerId, ProtocolError> {
    let value = read_scalar(reader)?;
    PlayerId::from_wire(value).ok_or(ProtocolError::UnknownScalar { value })
}
