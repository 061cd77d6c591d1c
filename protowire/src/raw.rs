//! Field level access to encoded messages.
//!
//! Decoding into the message structs and encoding back drops every field the structs do not
//! model. The functions here locate and replace a single length-delimited field directly in the
//! encoded bytes, so all other bytes of the message, including unmodelled fields, stay as they are.

use prost::{
    DecodeError,
    bytes::Buf,
    encoding::{WireType, decode_key, decode_varint, encode_key, encode_varint},
};
use std::ops::Range;

/// Selects which occurrence of a field is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// The `n`th occurrence, as used for elements of repeated fields
    Nth(usize),
    /// The last occurrence, which is the one decoding retains for singular fields
    Last,
}

/// A field found in an encoded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub tag: u32,
    pub wire_type: WireType,
    /// Bounds of the whole field, key included
    pub span: Range<usize>,
    /// Bounds of the value. For length-delimited fields the length prefix is excluded.
    pub value: Range<usize>,
}

fn position(message: &[u8], buf: &[u8]) -> usize {
    message.len() - buf.len()
}

fn skip(buf: &mut &[u8], len: usize) -> Result<(), DecodeError> {
    if buf.remaining() < len {
        return Err(DecodeError::new("buffer underflow"));
    }
    buf.advance(len);
    Ok(())
}

/// Skips a value of `wire_type` and returns the offset of its first byte past any length prefix
fn skip_value(message: &[u8], buf: &mut &[u8], tag: u32, wire_type: WireType) -> Result<usize, DecodeError> {
    let mut start = position(message, buf);
    match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
        }
        WireType::SixtyFourBit => skip(buf, 8)?,
        WireType::ThirtyTwoBit => skip(buf, 4)?,
        WireType::LengthDelimited => {
            let len = decode_varint(buf)?;
            start = position(message, buf);
            skip(buf, usize::try_from(len).map_err(|_| DecodeError::new("length delimiter exceeds usize"))?)?;
        }
        WireType::StartGroup => loop {
            let (inner_tag, inner_wire_type) = decode_key(buf)?;
            if inner_wire_type == WireType::EndGroup {
                if inner_tag != tag {
                    return Err(DecodeError::new("unexpected end group tag"));
                }
                break;
            }
            skip_value(message, buf, inner_tag, inner_wire_type)?;
        },
        WireType::EndGroup => return Err(DecodeError::new("unexpected end group tag")),
    }
    Ok(start)
}

/// Lists the top level fields of `message` in wire order
pub fn raw_fields(message: &[u8]) -> Result<Vec<RawField>, DecodeError> {
    let mut buf = message;
    let mut fields = vec![];
    while buf.has_remaining() {
        let span_start = position(message, buf);
        let (tag, wire_type) = decode_key(&mut buf)?;
        let value_start = skip_value(message, &mut buf, tag, wire_type)?;
        let end = position(message, buf);
        fields.push(RawField { tag, wire_type, span: span_start..end, value: value_start..end });
    }
    Ok(fields)
}

fn find_field(message: &[u8], tag: u32, occurrence: Occurrence) -> Result<Option<RawField>, DecodeError> {
    let mut matching =
        raw_fields(message)?.into_iter().filter(|field| field.tag == tag && field.wire_type == WireType::LengthDelimited);
    Ok(match occurrence {
        Occurrence::Nth(n) => matching.nth(n),
        Occurrence::Last => matching.last(),
    })
}

/// Returns the value of the selected occurrence of length-delimited field `tag`, if present
pub fn field_value(message: &[u8], tag: u32, occurrence: Occurrence) -> Result<Option<&[u8]>, DecodeError> {
    Ok(find_field(message, tag, occurrence)?.map(|field| &message[field.value]))
}

/// Returns a copy of `message` in which the selected occurrence of length-delimited field `tag`
/// holds `value`. Every other byte is copied unchanged. A missing [`Occurrence::Last`] field is
/// appended unless `value` is empty, while a missing [`Occurrence::Nth`] field is an error.
pub fn replace_field(message: &[u8], tag: u32, occurrence: Occurrence, value: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let field = find_field(message, tag, occurrence)?;
    let (head, tail) = match (&field, occurrence) {
        (Some(field), _) => (&message[..field.span.start], &message[field.span.end..]),
        (None, Occurrence::Last) if value.is_empty() => return Ok(message.to_vec()),
        (None, Occurrence::Last) => (message, &[][..]),
        (None, Occurrence::Nth(_)) => return Err(DecodeError::new("replaced field occurrence is missing")),
    };

    let mut replaced = Vec::with_capacity(head.len() + value.len() + tail.len() + 10);
    replaced.extend_from_slice(head);
    encode_key(tag, WireType::LengthDelimited, &mut replaced);
    encode_varint(value.len() as u64, &mut replaced);
    replaced.extend_from_slice(value);
    replaced.extend_from_slice(tail);
    Ok(replaced)
}
