/// Most bytes ever withheld between reads: one less than a delimiter.
pub const CARRY_CAPACITY: usize = 2;

/// Bytes withheld at the end of a read because too few remained to
/// classify a delimiter starting there.
///
/// Fixed inline storage; holding more than [`CARRY_CAPACITY`] bytes is a
/// scanner bug.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryCarry {
    bytes: [u8; CARRY_CAPACITY],
    len: u8,
}

impl BoundaryCarry {
    pub const fn new() -> Self {
        Self {
            bytes: [0; CARRY_CAPACITY],
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Replaces the held bytes with `tail`.
    pub fn hold(&mut self, tail: &[u8]) {
        debug_assert!(
            tail.len() <= CARRY_CAPACITY,
            "carry of {} bytes exceeds capacity",
            tail.len()
        );
        let n = tail.len().min(CARRY_CAPACITY);
        self.bytes[..n].copy_from_slice(&tail[..n]);
        self.len = n as u8;
    }

    /// Empties the carry, returning what it held.
    pub fn take(&mut self) -> BoundaryCarry {
        std::mem::take(self)
    }
}
