//! Bit-packed message bodies over [`soroban_sdk::Bytes`].
//!
//! A body is a big-endian bit string followed by a completion tag: a single
//! `1` bit and as many `0` bits as needed to reach a byte boundary. The tag is
//! always present (an empty body encodes as `0x80`), so the exact bit length
//! is recoverable and a reader can tell "two bits" apart from "two bits plus
//! six zero bits".
//!
//! Variable-length payloads ("references") are stored as a 16-bit byte length
//! followed by the raw bytes, unaligned.

use soroban_sdk::{Bytes, BytesN, Env};

/// Upper bound on the bytes of a single reference.
pub const MAX_REF_BYTES: u32 = u16::MAX as u32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BitsError {
    /// Body is empty or its last byte carries no completion tag.
    MissingTag,
    /// A field extends past the end of the body.
    Underflow,
    /// Bits remain after the last expected field.
    TrailingData,
    /// A value does not fit the declared width.
    Overflow,
    /// A value has no wire representation.
    Unsupported,
}

// ── Writer ───────────────────────────────────────────────────────────────────

pub struct BitWriter {
    bytes: Bytes,
    acc: u8,
    acc_len: u32,
}

impl BitWriter {
    pub fn new(env: &Env) -> Self {
        Self {
            bytes: Bytes::new(env),
            acc: 0,
            acc_len: 0,
        }
    }

    /// Number of data bits written so far.
    pub fn bit_len(&self) -> u32 {
        self.bytes.len() * 8 + self.acc_len
    }

    pub fn store_bit(&mut self, bit: bool) -> &mut Self {
        self.acc = (self.acc << 1) | u8::from(bit);
        self.acc_len += 1;
        if self.acc_len == 8 {
            self.bytes.push_back(self.acc);
            self.acc = 0;
            self.acc_len = 0;
        }
        self
    }

    /// Stores the low `width` bits of `value`, most significant first.
    pub fn store_uint(&mut self, value: u128, width: u32) -> Result<&mut Self, BitsError> {
        if width > 128 || (width < 128 && value >> width != 0) {
            return Err(BitsError::Overflow);
        }
        for i in (0..width).rev() {
            self.store_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Stores an amount as a 4-bit byte count followed by that many bytes.
    pub fn store_coins(&mut self, amount: u128) -> Result<&mut Self, BitsError> {
        let len = (128 - amount.leading_zeros()).div_ceil(8);
        if len > 15 {
            return Err(BitsError::Overflow);
        }
        self.store_uint(u128::from(len), 4)?;
        self.store_uint(amount, len * 8)
    }

    pub fn store_raw(&mut self, bytes: &Bytes) -> &mut Self {
        for byte in bytes.iter() {
            for i in (0..8).rev() {
                self.store_bit((byte >> i) & 1 == 1);
            }
        }
        self
    }

    /// Stores a length-prefixed reference.
    pub fn store_ref(&mut self, bytes: &Bytes) -> Result<&mut Self, BitsError> {
        if bytes.len() > MAX_REF_BYTES {
            return Err(BitsError::Overflow);
        }
        self.store_uint(u128::from(bytes.len()), 16)?;
        Ok(self.store_raw(bytes))
    }

    pub fn store_maybe_ref(&mut self, bytes: Option<&Bytes>) -> Result<&mut Self, BitsError> {
        match bytes {
            Some(bytes) => {
                self.store_bit(true);
                self.store_ref(bytes)
            }
            None => Ok(self.store_bit(false)),
        }
    }

    /// Appends the completion tag and returns the body.
    pub fn finish(mut self) -> Bytes {
        self.store_bit(true);
        while self.acc_len != 0 {
            self.store_bit(false);
        }
        self.bytes
    }
}

// ── Reader ───────────────────────────────────────────────────────────────────

pub struct BitReader {
    env: Env,
    bytes: Bytes,
    pos: u32,
    len: u32,
}

impl BitReader {
    pub fn new(env: &Env, bytes: Bytes) -> Result<Self, BitsError> {
        let last = match bytes.len().checked_sub(1) {
            Some(idx) => bytes.get(idx).unwrap_or(0),
            None => return Err(BitsError::MissingTag),
        };
        if last == 0 {
            return Err(BitsError::MissingTag);
        }
        let len = bytes.len() * 8 - last.trailing_zeros() - 1;
        Ok(Self {
            env: env.clone(),
            bytes,
            pos: 0,
            len,
        })
    }

    pub fn remaining(&self) -> u32 {
        self.len - self.pos
    }

    pub fn load_bit(&mut self) -> Result<bool, BitsError> {
        if self.pos >= self.len {
            return Err(BitsError::Underflow);
        }
        let byte = self.bytes.get(self.pos / 8).ok_or(BitsError::Underflow)?;
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Ok(bit)
    }

    pub fn load_uint(&mut self, width: u32) -> Result<u128, BitsError> {
        if width > 128 {
            return Err(BitsError::Overflow);
        }
        if width > self.remaining() {
            return Err(BitsError::Underflow);
        }
        let mut value = 0u128;
        for _ in 0..width {
            value = (value << 1) | u128::from(self.load_bit()?);
        }
        Ok(value)
    }

    pub fn load_u32(&mut self, width: u32) -> Result<u32, BitsError> {
        if width > 32 {
            return Err(BitsError::Overflow);
        }
        Ok(self.load_uint(width)? as u32)
    }

    pub fn load_u64(&mut self, width: u32) -> Result<u64, BitsError> {
        if width > 64 {
            return Err(BitsError::Overflow);
        }
        Ok(self.load_uint(width)? as u64)
    }

    pub fn load_coins(&mut self) -> Result<u128, BitsError> {
        let len = self.load_u32(4)?;
        self.load_uint(len * 8)
    }

    pub fn load_raw(&mut self, n_bytes: u32) -> Result<Bytes, BitsError> {
        if n_bytes.saturating_mul(8) > self.remaining() {
            return Err(BitsError::Underflow);
        }
        let mut out = Bytes::new(&self.env);
        for _ in 0..n_bytes {
            out.push_back(self.load_uint(8)? as u8);
        }
        Ok(out)
    }

    pub fn load_bytes_n<const N: usize>(&mut self) -> Result<BytesN<N>, BitsError> {
        if (N as u32).saturating_mul(8) > self.remaining() {
            return Err(BitsError::Underflow);
        }
        let mut buf = [0u8; N];
        for slot in buf.iter_mut() {
            *slot = self.load_uint(8)? as u8;
        }
        Ok(BytesN::from_array(&self.env, &buf))
    }

    pub fn load_ref(&mut self) -> Result<Bytes, BitsError> {
        let len = self.load_u32(16)?;
        self.load_raw(len)
    }

    pub fn load_maybe_ref(&mut self) -> Result<Option<Bytes>, BitsError> {
        if self.load_bit()? {
            self.load_ref().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Fails unless every bit of the body has been consumed.
    pub fn end_parse(&self) -> Result<(), BitsError> {
        if self.remaining() != 0 {
            return Err(BitsError::TrailingData);
        }
        Ok(())
    }
}
