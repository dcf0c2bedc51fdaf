//! Measurement bases and photon polarization symbols.
//!
//! Alice encodes each bit as one of four polarizations, two per basis:
//!
//! | bit | basis | polarization |
//! |-----|-------|--------------|
//! | 0   | `+`   | `↑`          |
//! | 0   | `X`   | `↗`          |
//! | 1   | `+`   | `→`          |
//! | 1   | `X`   | `↘`          |

use serde::Serialize;
use std::fmt;

/// A measurement basis: rectilinear (`+`) or diagonal (`X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Basis {
    #[serde(rename = "+")]
    Rectilinear,
    #[serde(rename = "X")]
    Diagonal,
}

impl Basis {
    /// Maps a uniform bit draw to a basis (`false` -> `+`, `true` -> `X`).
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    /// Inverse of [`Basis::from_bit`]: `+` is 0, `X` is 1.
    pub fn index(self) -> u8 {
        match self {
            Basis::Rectilinear => 0,
            Basis::Diagonal => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'X',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.symbol(), f)
    }
}

/// One of the four BB84 polarization states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Polarization {
    #[serde(rename = "↑")]
    Vertical,
    #[serde(rename = "↗")]
    Diagonal,
    #[serde(rename = "→")]
    Horizontal,
    #[serde(rename = "↘")]
    AntiDiagonal,
}

impl Polarization {
    pub const ALL: [Polarization; 4] = [
        Polarization::Vertical,
        Polarization::Diagonal,
        Polarization::Horizontal,
        Polarization::AntiDiagonal,
    ];

    /// Encodes a bit in the given basis.
    pub fn encode(bit: bool, basis: Basis) -> Self {
        match (bit, basis) {
            (false, Basis::Rectilinear) => Polarization::Vertical,
            (false, Basis::Diagonal) => Polarization::Diagonal,
            (true, Basis::Rectilinear) => Polarization::Horizontal,
            (true, Basis::Diagonal) => Polarization::AntiDiagonal,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Polarization::Vertical => '↑',
            Polarization::Diagonal => '↗',
            Polarization::Horizontal => '→',
            Polarization::AntiDiagonal => '↘',
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.symbol(), f)
    }
}

/// Symbol used when Bob measures in the wrong basis.
pub const UNMEASURABLE: char = '?';

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn encoding_is_injective_over_all_inputs() {
        let mut seen = HashSet::new();
        for bit in [false, true] {
            for basis in [Basis::Rectilinear, Basis::Diagonal] {
                assert!(seen.insert(Polarization::encode(bit, basis)));
            }
        }
        assert_eq!(seen.len(), 4);
        assert!(Polarization::ALL.iter().all(|p| seen.contains(p)));
    }

    #[test]
    fn symbols() {
        assert_eq!(Polarization::encode(false, Basis::Rectilinear).symbol(), '↑');
        assert_eq!(Polarization::encode(false, Basis::Diagonal).symbol(), '↗');
        assert_eq!(Polarization::encode(true, Basis::Rectilinear).symbol(), '→');
        assert_eq!(Polarization::encode(true, Basis::Diagonal).symbol(), '↘');
        assert_eq!(Basis::from_bit(false).to_string(), "+");
        assert_eq!(Basis::from_bit(true).to_string(), "X");
        assert_eq!(Basis::from_bit(false).index(), 0);
        assert_eq!(Basis::from_bit(true).index(), 1);
    }
}
