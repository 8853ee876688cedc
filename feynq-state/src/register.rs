//! Classical register written by measurements

use std::fmt;

/// m classical bits, all starting at 0
///
/// # Example
/// ```
/// use feynq_state::ClassicalRegister;
///
/// let mut reg = ClassicalRegister::new(3);
/// reg.set(0, true);
/// assert_eq!(reg.bitstring(), "001");
/// assert_eq!(reg.value(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassicalRegister {
    bits: Vec<bool>,
}

impl ClassicalRegister {
    pub fn new(num_bits: usize) -> Self {
        Self {
            bits: vec![false; num_bits],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit value; out-of-range bits read as 0
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Write a bit; panics if `index` is out of range
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        self.bits[index] = value;
    }

    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn reset(&mut self) {
        self.bits.fill(false);
    }

    /// Integer with bit i = classical bit i (low 64 bits)
    pub fn value(&self) -> u64 {
        self.bits
            .iter()
            .take(64)
            .enumerate()
            .fold(0, |acc, (i, &b)| acc | (u64::from(b) << i))
    }

    /// Bit m-1 leftmost, bit 0 rightmost
    pub fn bitstring(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bitstring())
    }
}
