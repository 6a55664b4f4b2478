//! Multi-line buses read as unsigned binary numbers.
//!
//! Decoders and multiplexers address their outputs/data lines through a
//! group of select lines. The first line of the group is the most
//! significant bit.

use crate::logic::Logic;

/// Read a group of lines as an unsigned integer, MSB first.
///
/// Returns `None` if any line is undetermined. An empty bus reads as 0.
pub fn bus_index<I>(lines: I) -> Option<usize>
where
    I: IntoIterator<Item = Logic>,
{
    lines.into_iter().try_fold(0usize, |acc, line| {
        line.to_bool().map(|bit| (acc << 1) | bit as usize)
    })
}

/// Spread `value` over `width` lines, MSB first.
///
/// Bits of `value` above `width` are ignored.
pub fn bus_levels(value: usize, width: usize) -> Vec<Logic> {
    (0..width)
        .rev()
        .map(|bit| Logic::from_bool(bit < usize::BITS as usize && (value >> bit) & 1 == 1))
        .collect()
}
