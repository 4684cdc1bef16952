//! OSC 1.0 message encoding.
//!
//! A message on the wire is three runs of NUL-terminated, 4-byte-aligned
//! strings: the address pattern, the type tag string (`,` plus one tag
//! character per argument), then each argument in order.

use super::message::{OscArg, ParsedMessage};

/// Encodes a parsed message into a single OSC packet.
///
/// Encoding is total: an empty address still produces a minimal, well-formed
/// packet. Checking the address for emptiness is the caller's job.
pub fn encode_message(message: &ParsedMessage) -> Vec<u8> {
    let mut packet = Vec::with_capacity(message.addr.len() + message.args.len() * 8 + 8);

    push_padded_str(&mut packet, &message.addr);

    let mut tags = String::with_capacity(1 + message.args.len());
    tags.push(',');
    for arg in &message.args {
        tags.push(arg.type_tag());
    }
    push_padded_str(&mut packet, &tags);

    for arg in &message.args {
        match arg {
            OscArg::String(s) => push_padded_str(&mut packet, s),
        }
    }

    packet
}

// Every segment starts on a 4-byte boundary, so padding against the packet
// length pads the segment itself.
fn push_padded_str(packet: &mut Vec<u8>, s: &str) {
    packet.extend_from_slice(s.as_bytes());
    packet.push(0);
    while packet.len() % 4 != 0 {
        packet.push(0);
    }
}
