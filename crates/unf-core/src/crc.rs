//! CRC-64 accumulator for version 2 fingerprints.
//!
//! Reflected CRC with the reversed polynomial `0xd800000000000000`, an
//! initial value of zero and no final xor. Between calls the state is held
//! as big-endian bytes, which is the byte order stored fingerprints were
//! produced with on every platform.

/// Reversed CRC-64 polynomial.
const POLY64REV: u64 = 0xd800_0000_0000_0000;

/// Lookup table, evaluated at compile time.
const CRC64_TABLE: [u64; 256] = generate_table();

const fn generate_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut part = i as u64;
        let mut j = 0;
        while j < 8 {
            if part & 1 == 1 {
                part = (part >> 1) ^ POLY64REV;
            } else {
                part >>= 1;
            }
            j += 1;
        }
        table[i] = part;
        i += 1;
    }
    table
}

/// Rolling CRC-64 state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crc64 {
    state: [u8; 8],
}

impl Crc64 {
    /// Starts from a zero accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `bytes` into the accumulator.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut crc = u64::from_be_bytes(self.state);
        for &b in bytes {
            crc = (crc >> 8) ^ CRC64_TABLE[((crc ^ u64::from(b)) & 0xff) as usize];
        }
        self.state = crc.to_be_bytes();
    }

    /// Current CRC value.
    pub fn value(&self) -> u64 {
        u64::from_be_bytes(self.state)
    }

    /// Stored accumulator bytes.
    pub fn to_bytes(&self) -> [u8; 8] {
        self.state
    }
}
