//! Fixed-width binary codec for component design variables.
//!
//! Every design variable occupies exactly `BITS_PER_VARIABLE` bits, most significant bit first,
//! so a component's genome is `6 × variable_count` bits long. The genome carries a key naming the
//! variable behind each 6-bit segment; decoding goes through the key rather than position so a
//! segment always lands on the variable it was encoded from.
//!
//! ```
//! use legforge::engines::generation::genome::{decode, encode};
//!
//! let bits = encode(5).unwrap();
//! assert_eq!(bits, vec![0, 0, 0, 1, 0, 1]);
//! assert_eq!(decode(&bits), 5);
//! ```

use crate::error::{LegforgeError, Result};
use crate::population::Component;
use crate::types::{BITS_PER_VARIABLE, MAX_ENCODED_VALUE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    /// Slot the genome was encoded from.
    pub component: &'static str,
    /// One 0/1 entry per bit.
    pub bits: Vec<u8>,
    /// Variable name per 6-bit segment.
    pub key: Vec<&'static str>,
}

impl Genome {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn segment(&self, index: usize) -> &[u8] {
        &self.bits[index * BITS_PER_VARIABLE..(index + 1) * BITS_PER_VARIABLE]
    }
}

/// Encode a value as `BITS_PER_VARIABLE` bits, MSB first. Zero encodes as all zeros.
pub fn encode(value: u32) -> Result<Vec<u8>> {
    if value > MAX_ENCODED_VALUE {
        return Err(LegforgeError::EncodeOverflow {
            value,
            bits: BITS_PER_VARIABLE,
        });
    }
    Ok((0..BITS_PER_VARIABLE)
        .rev()
        .map(|shift| ((value >> shift) & 1) as u8)
        .collect())
}

/// Positional MSB-first decode.
pub fn decode(bits: &[u8]) -> u32 {
    bits.iter().fold(0, |acc, bit| (acc << 1) | u32::from(*bit & 1))
}

pub fn encode_component(component: &Component) -> Result<Genome> {
    let mut bits = Vec::with_capacity(component.variable_count() * BITS_PER_VARIABLE);
    let mut key = Vec::with_capacity(component.variable_count());
    for (name, value) in component.named_values() {
        bits.extend(encode(value)?);
        key.push(name);
    }
    Ok(Genome {
        component: component.name(),
        bits,
        key,
    })
}

/// Write every segment of `genome` into the variable its key names.
pub fn decode_component(component: &mut Component, genome: &Genome) -> Result<()> {
    let expected = component.variable_count() * BITS_PER_VARIABLE;
    if genome.bits.len() != expected {
        log::error!(
            "{}: genome of {} bits cannot decode into {} variables",
            component.name(),
            genome.bits.len(),
            component.variable_count()
        );
        return Err(LegforgeError::GenomeLength {
            component: component.name().to_string(),
            expected,
            actual: genome.bits.len(),
        });
    }
    if genome.key.len() != component.variable_count() {
        return Err(LegforgeError::ChromosomeCount {
            component: component.name().to_string(),
            expected: component.variable_count(),
            actual: genome.key.len(),
        });
    }

    for (index, name) in genome.key.iter().enumerate() {
        component.set(name, decode(genome.segment(index)))?;
    }
    Ok(())
}
