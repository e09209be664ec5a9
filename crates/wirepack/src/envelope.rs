//! # Envelopes
//!
//! Wraps a struct value with the method name, message type, and sequence ID that a
//! dispatcher needs to route it.
//!
//! ## Format
//! `[Version|Type: i32][Name: Binary][SeqId: i32][Struct]`, where the version word is
//! `0x8001_0000 | type` (the strict binary protocol header).

use crate::binary::Decoder;
use crate::binary::Encoder;
use crate::value::Type;
use crate::value::Value;
use crate::Error;
use crate::Result;

const VERSION_1: u32 = 0x8001_0000;
const VERSION_MASK: u32 = 0xffff_0000;
const TYPE_MASK: u32 = 0x0000_00ff;

/// The kind of message inside an envelope.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeType {
    /// A request carrying a method's arguments.
    Call = 1,
    /// A response carrying a method's result union.
    Reply = 2,
    /// A protocol-level failure raised by the remote dispatcher.
    Exception = 3,
    /// A request that expects no response.
    OneWay = 4,
}

impl EnvelopeType {
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            1 => Some(EnvelopeType::Call),
            2 => Some(EnvelopeType::Reply),
            3 => Some(EnvelopeType::Exception),
            4 => Some(EnvelopeType::OneWay),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnvelopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnvelopeType::Call => "call",
            EnvelopeType::Reply => "reply",
            EnvelopeType::Exception => "exception",
            EnvelopeType::OneWay => "oneway",
        };
        f.write_str(name)
    }
}

/// A struct value addressed to a method.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub name: String,
    pub kind: EnvelopeType,
    pub seq_id: i32,
    /// Always a `Value::Struct`.
    pub value: Value,
}

impl Envelope {
    pub fn new(name: impl Into<String>, kind: EnvelopeType, seq_id: i32, value: Value) -> Self {
        Self { name: name.into(), kind, seq_id, value }
    }

    /// Encode this envelope into the encoder.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedType` if the payload is not a struct.
    pub fn encode(&self, enc: &mut Encoder) -> Result<()> {
        if self.value.ty() != Type::Struct {
            return Err(Error::UnexpectedType { expected: Type::Struct, found: self.value.ty() });
        }
        enc.i32((VERSION_1 | self.kind as u32) as i32);
        enc.binary(self.name.as_bytes())?;
        enc.i32(self.seq_id);
        enc.value(&self.value)
    }

    /// Encodes this envelope into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut enc = Encoder::new();
        self.encode(&mut enc)?;
        Ok(enc.into_bytes())
    }

    /// Decode an envelope from the decoder.
    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        let header = dec.read_i32()? as u32;
        if header & VERSION_MASK != VERSION_1 {
            return Err(Error::BadVersion(header));
        }
        let raw_kind = (header & TYPE_MASK) as u8;
        let kind = EnvelopeType::from_u8(raw_kind).ok_or(Error::InvalidEnvelopeType(raw_kind))?;
        let name = std::str::from_utf8(dec.binary()?).map_err(|_| Error::InvalidUtf8)?;
        let seq_id = dec.read_i32()?;
        let value = dec.value(Type::Struct)?;
        Ok(Self { name: name.to_string(), kind, seq_id, value })
    }

    /// Decodes an envelope, requiring the input to be fully consumed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut dec = Decoder::new(bytes);
        let envelope = Self::decode(&mut dec)?;
        if dec.remaining() != 0 {
            return Err(Error::TrailingBytes(dec.remaining()));
        }
        Ok(envelope)
    }
}
