// Byte-level framing over any `Read`/`Write` stream.
//
// The room speaks two shapes:
// - Scalars: a bare 4-byte big-endian `u32`, no prefix.
// - Messages: a 4-byte big-endian length prefix followed by that many payload
//   bytes. The caller handles JSON (see `message.rs`), keeping this module
//   format-agnostic.
//
// A stream that ends cleanly before a scalar or prefix is a transport error
// (the peer went away between messages). A stream that ends after a prefix
// but before the declared payload is complete is a framing error.

use std::io::{self, Read, Write};

use crate::error::ProtocolError;

/// Maximum allowed payload size (64 KiB). A move payload is a few dozen
/// bytes; anything near this limit is a corrupt or hostile prefix.
pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024;

/// Write a single 4-byte big-endian scalar and flush.
pub fn write_scalar<W: Write>(writer: &mut W, value: u32) -> Result<(), ProtocolError> {
    writer.write_all(&value.to_be_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read a single 4-byte big-endian scalar.
pub fn read_scalar<R: Read>(reader: &mut R) -> Result<u32, ProtocolError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Write a length-delimited message: 4-byte big-endian length, then payload.
pub fn write_message<W: Write>(writer: &mut W, msg: &[u8]) -> Result<(), ProtocolError> {
    let len = msg.len();
    let Ok(wire_len) = u32::try_from(len) else {
        return Err(ProtocolError::Oversized { len });
    };
    if wire_len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::Oversized { len });
    }
    writer.write_all(&wire_len.to_be_bytes())?;
    writer.write_all(msg)?;
    writer.flush()?;
    Ok(())
}

/// Read a length-delimited message: 4-byte big-endian length, then payload.
pub fn read_message<R: Read>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let declared = read_scalar(reader)?;
    if declared > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::Oversized {
            len: declared as usize,
        });
    }
    let mut buf = vec![0u8; declared as usize];
    let mut received = 0;
    while received < buf.len() {
        match reader.read(&mut buf[received..]) {
            Ok(0) => return Err(ProtocolError::Truncated { declared, received }),
            Ok(n) => received += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(buf)
}
