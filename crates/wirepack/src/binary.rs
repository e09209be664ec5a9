//! # Binary Protocol
//!
//! Translation between `Value` trees and bytes.
//!
//! ## Invariants
//! - **Recursion Safety**: Encoding and decoding are bounded by `Limits::max_depth`.
//! - **Panic Safety**: Every read is bounds-checked; malformed input yields an `Error`.
//! - **Allocation Safety**: Length and count prefixes are checked against the remaining
//!   input before anything is allocated.

use crate::value::Field;
use crate::value::List;
use crate::value::Map;
use crate::value::Struct;
use crate::value::Type;
use crate::value::Value;
use crate::Error;
use crate::Result;

/// Default maximum nesting depth of containers.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Marks the end of a struct's field list.
const STOP: u8 = 0x00;

/// Decoding limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// How many containers may be nested inside one another.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl Limits {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Encodes a single value into a fresh buffer.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut enc = Encoder::new();
    enc.value(value)?;
    Ok(enc.into_bytes())
}

/// Decodes a single value of type `ty`, requiring the input to be fully consumed.
pub fn decode(bytes: &[u8], ty: Type) -> Result<Value> {
    let mut dec = Decoder::new(bytes);
    let value = dec.value(ty)?;
    if dec.remaining() != 0 {
        return Err(Error::TrailingBytes(dec.remaining()));
    }
    Ok(value)
}

/// An append-only binary writer.
///
/// The type of the top-level value is not written; the reader must know it,
/// just as it must know which struct it expects.
pub struct Encoder {
    buf: Vec<u8>,
    limits: Limits,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Creates a new encoder with default capacity and limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { buf: Vec::with_capacity(1024), limits }
    }

    /// Consumes the encoder and returns the final byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a view of the current buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Encodes a value (without its type byte).
    pub fn value(&mut self, value: &Value) -> Result<()> {
        self.value_at(value, 0)
    }

    fn value_at(&mut self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Bool(b) => self.buf.push(*b as u8),
            Value::I8(v) => self.buf.push(*v as u8),
            Value::I16(v) => self.i16(*v),
            Value::I32(v) => self.i32(*v),
            Value::I64(v) => self.i64(*v),
            Value::Double(v) => self.buf.extend_from_slice(&v.to_bits().to_be_bytes()),
            Value::Binary(b) => self.binary(b)?,
            Value::Struct(s) => {
                self.enter(depth)?;
                for field in s.fields() {
                    self.buf.push(field.value.ty() as u8);
                    self.buf.extend_from_slice(&field.id.to_be_bytes());
                    self.value_at(&field.value, depth + 1)?;
                }
                self.buf.push(STOP);
            }
            Value::List(l) => {
                self.enter(depth)?;
                self.buf.push(l.elem_type() as u8);
                self.len(l.len())?;
                for item in l.items() {
                    self.value_at(item, depth + 1)?;
                }
            }
            Value::Map(m) => {
                self.enter(depth)?;
                self.buf.push(m.key_type() as u8);
                self.buf.push(m.value_type() as u8);
                self.len(m.len())?;
                for (k, v) in m.pairs() {
                    self.value_at(k, depth + 1)?;
                    self.value_at(v, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.limits.max_depth {
            return Err(Error::DepthExceeded(self.limits.max_depth));
        }
        Ok(())
    }

    pub(crate) fn i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub(crate) fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub(crate) fn i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    fn len(&mut self, len: usize) -> Result<()> {
        if len > i32::MAX as usize {
            return Err(Error::BlobTooLarge(len));
        }
        self.i32(len as i32);
        Ok(())
    }

    /// Encodes a length-prefixed blob.
    pub fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.len(v.len())?;
        self.buf.extend_from_slice(v);
        Ok(())
    }
}

/// A bounds-checked cursor over a byte slice.
///
/// Reading advances the internal cursor.
///
/// # Errors
/// All read operations return `Error::UnexpectedEnd` if the buffer is exhausted.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    limits: Limits,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder over the slice with default limits.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, Limits::default())
    }

    pub fn with_limits(buf: &'a [u8], limits: Limits) -> Self {
        Self { buf, limits }
    }

    /// Returns the remaining bytes in the view.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Decodes one value of type `ty`.
    pub fn value(&mut self, ty: Type) -> Result<Value> {
        self.value_at(ty, 0)
    }

    fn value_at(&mut self, ty: Type, depth: usize) -> Result<Value> {
        match ty {
            Type::Bool => Ok(Value::Bool(self.read_u8()? != 0)),
            Type::I8 => Ok(Value::I8(self.read_u8()? as i8)),
            Type::I16 => Ok(Value::I16(self.read_i16()?)),
            Type::I32 => Ok(Value::I32(self.read_i32()?)),
            Type::I64 => Ok(Value::I64(self.read_i64()?)),
            Type::Double => Ok(Value::Double(f64::from_bits(self.read_i64()? as u64))),
            Type::Binary => Ok(Value::Binary(self.binary()?.to_vec())),
            Type::Struct => {
                self.enter(depth)?;
                let mut fields = Vec::new();
                loop {
                    let b = self.read_u8()?;
                    if b == STOP {
                        break;
                    }
                    let ty = Type::from_u8(b).ok_or(Error::InvalidType(b))?;
                    let id = self.read_u16()?;
                    let value = self.value_at(ty, depth + 1)?;
                    fields.push(Field::new(id, value));
                }
                Ok(Value::Struct(Struct::new(fields)?))
            }
            Type::List => {
                self.enter(depth)?;
                let elem = self.read_type()?;
                let count = self.read_len()?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.value_at(elem, depth + 1)?);
                }
                Ok(Value::List(List::new(elem, items)?))
            }
            Type::Map => {
                self.enter(depth)?;
                let key = self.read_type()?;
                let value = self.read_type()?;
                let count = self.read_len()?;
                let mut pairs = Vec::with_capacity(count);
                for _ in 0..count {
                    let k = self.value_at(key, depth + 1)?;
                    let v = self.value_at(value, depth + 1)?;
                    pairs.push((k, v));
                }
                Ok(Value::Map(Map::new(key, value, pairs)?))
            }
        }
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.limits.max_depth {
            return Err(Error::DepthExceeded(self.limits.max_depth));
        }
        Ok(())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let (&b, rest) = self.buf.split_first().ok_or(Error::UnexpectedEnd)?;
        self.buf = rest;
        Ok(b)
    }

    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.buf.len() {
            return Err(Error::UnexpectedEnd);
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    fn read_type(&mut self) -> Result<Type> {
        let b = self.read_u8()?;
        Type::from_u8(b).ok_or(Error::InvalidType(b))
    }

    /// Reads a length or count prefix.
    ///
    /// Every item occupies at least one byte, so a prefix larger than the remaining
    /// input can never be satisfied and is rejected before allocating.
    fn read_len(&mut self) -> Result<usize> {
        let n = self.read_i32()?;
        if n < 0 {
            return Err(Error::NegativeLength(n));
        }
        let n = n as usize;
        if n > self.buf.len() {
            return Err(Error::UnexpectedEnd);
        }
        Ok(n)
    }

    /// Decodes a length-prefixed blob.
    pub fn binary(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.read_bytes(len)
    }
}
