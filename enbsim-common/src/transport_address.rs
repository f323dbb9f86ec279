//! Transport-layer address bit string.
//!
//! S1AP carries the GTP-U endpoint as a `BIT STRING (SIZE(1..160, ...))`:
//! 32 bits for IPv4, 128 bits for IPv6 and 160 bits for both. Bits are
//! stored MSB first within each byte.

use std::fmt;
use std::net::Ipv4Addr;

/// Maximum transport address length in bits.
pub const MAX_TRANSPORT_ADDRESS_BITS: usize = 160;

/// A variable-length transport-layer address.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct TransportAddress {
    /// Underlying byte storage
    data: Vec<u8>,
    /// Number of significant bits
    bit_length: usize,
}

impl TransportAddress {
    /// Creates a `TransportAddress` from existing bytes and bit length.
    ///
    /// Returns `None` if `bit_length` exceeds the storage or the S1AP bound.
    pub fn from_bytes(data: Vec<u8>, bit_length: usize) -> Option<Self> {
        if bit_length > data.len() * 8 || bit_length > MAX_TRANSPORT_ADDRESS_BITS {
            return None;
        }
        Some(Self { data, bit_length })
    }

    /// Creates a 32-bit address from an IPv4 address.
    pub fn from_ipv4(addr: Ipv4Addr) -> Self {
        Self {
            data: addr.octets().to_vec(),
            bit_length: 32,
        }
    }

    /// Returns the number of significant bits.
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Returns true if the address carries no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_length == 0
    }

    /// Returns the significant bytes of the address.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.bit_length.div_ceil(8)]
    }

    /// Reads a single bit at the given index.
    ///
    /// # Panics
    /// Panics if `index >= bit_length()`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.bit_length, "Bit index out of bounds");
        (self.data[index / 8] >> (7 - index % 8)) & 1 != 0
    }

    /// Interprets the address as an unsigned number, MSB first.
    ///
    /// Returns `None` when the address is longer than 32 bits.
    pub fn to_number(&self) -> Option<u32> {
        if self.bit_length > 32 {
            return None;
        }
        Some((0..self.bit_length).fold(0u32, |acc, i| (acc << 1) | u32::from(self.bit(i))))
    }

    /// Interprets a 32-bit address as IPv4.
    pub fn to_ipv4(&self) -> Option<Ipv4Addr> {
        if self.bit_length != 32 {
            return None;
        }
        self.to_number().map(Ipv4Addr::from)
    }
}

impl From<Ipv4Addr> for TransportAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self::from_ipv4(addr)
    }
}

impl fmt::Debug for TransportAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_ipv4() {
            Some(ip) => write!(f, "TransportAddress({ip})"),
            None => write!(
                f,
                "TransportAddress({} bits: {})",
                self.bit_length,
                hex::encode(self.data())
            ),
        }
    }
}
