/// An append-only sequence of bits, packed most significant bit first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`len`](Self::len).
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.length, "Bit index out of range");
        ((self.data[index >> 3] >> (7 - (index & 7))) & 1) != 0
    }

    /// Appends the low `len` bits of `val`, high bit first. Bits of `val` above `len`
    /// are ignored.
    pub fn put(&mut self, val: u32, len: u8) {
        assert!(len <= 32);
        for i in (0..len).rev() {
            self.put_bit(((val >> i) & 1) != 0);
        }
    }

    pub fn put_bit(&mut self, bit: bool) {
        let index: usize = self.length >> 3;
        if index == self.data.len() {
            self.data.push(0);
        }
        if bit {
            self.data[index] |= 0x80 >> (self.length & 7);
        }
        self.length += 1;
    }

    /// Drops every bit from position `len` on. Does nothing if the buffer is shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.length {
            return;
        }
        self.length = len;
        self.data.truncate((len + 7) / 8);
        if len & 7 != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= 0xffu8 << (8 - (len & 7));
            }
        }
    }

    /// The packed bytes. A partially written last byte is zero-filled.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
