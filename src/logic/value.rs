//! Single three-valued logic level.
//!
//! A wire carries one of three values:
//! - `0` (Zero)
//! - `1` (One)
//! - `X` (Unknown), meaning "not yet determined in this settle pass"
//!
//! Unknown is contagious: any two-input operation that reads an unknown
//! operand produces an unknown result.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A three-valued logic level.
///
/// Serializes as `0`, `1` or `null`, which is the shape used by the JSON
/// truth-table output.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Logic {
    /// Determined low.
    Zero,
    /// Determined high.
    One,
    /// Not determined yet.
    #[default]
    Unknown,
}

impl Logic {
    /// All possible values in order: 0, 1, X
    pub const ALL: [Logic; 3] = [Logic::Zero, Logic::One, Logic::Unknown];

    /// The two determined values.
    pub const KNOWN: [Logic; 2] = [Logic::Zero, Logic::One];

    /// Lift a Boolean into a determined level.
    #[inline]
    pub const fn from_bool(value: bool) -> Self {
        if value { Logic::One } else { Logic::Zero }
    }

    /// The Boolean value, or `None` if undetermined.
    #[inline]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Logic::Zero => Some(false),
            Logic::One => Some(true),
            Logic::Unknown => None,
        }
    }

    /// Returns true for `0` and `1`.
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Logic::Unknown)
    }

    /// Complement. Unknown stays unknown.
    #[inline]
    pub const fn not(self) -> Self {
        match self {
            Logic::Zero => Logic::One,
            Logic::One => Logic::Zero,
            Logic::Unknown => Logic::Unknown,
        }
    }

    /// Conjunction.
    #[inline]
    pub const fn and(self, other: Self) -> Self {
        match (self.to_bool(), other.to_bool()) {
            (Some(a), Some(b)) => Logic::from_bool(a & b),
            _ => Logic::Unknown,
        }
    }

    /// Disjunction.
    #[inline]
    pub const fn or(self, other: Self) -> Self {
        match (self.to_bool(), other.to_bool()) {
            (Some(a), Some(b)) => Logic::from_bool(a | b),
            _ => Logic::Unknown,
        }
    }

    /// Exclusive or.
    #[inline]
    pub const fn xor(self, other: Self) -> Self {
        match (self.to_bool(), other.to_bool()) {
            (Some(a), Some(b)) => Logic::from_bool(a ^ b),
            _ => Logic::Unknown,
        }
    }

    /// Negated conjunction.
    #[inline]
    pub const fn nand(self, other: Self) -> Self {
        self.and(other).not()
    }

    /// Negated disjunction.
    #[inline]
    pub const fn nor(self, other: Self) -> Self {
        self.or(other).not()
    }
}

impl fmt::Debug for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::Zero => write!(f, "0"),
            Logic::One => write!(f, "1"),
            Logic::Unknown => write!(f, "X"),
        }
    }
}

impl std::ops::Not for Logic {
    type Output = Self;

    fn not(self) -> Self::Output {
        Logic::not(self)
    }
}

impl std::ops::BitAnd for Logic {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl std::ops::BitOr for Logic {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl std::ops::BitXor for Logic {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor(rhs)
    }
}

impl From<bool> for Logic {
    fn from(value: bool) -> Self {
        Logic::from_bool(value)
    }
}

impl Serialize for Logic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Logic::Zero => serializer.serialize_u8(0),
            Logic::One => serializer.serialize_u8(1),
            Logic::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Logic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<u8>::deserialize(deserializer)? {
            Some(0) => Ok(Logic::Zero),
            Some(1) => Ok(Logic::One),
            None => Ok(Logic::Unknown),
            Some(other) => Err(serde::de::Error::custom(format!(
                "invalid logic level {} (expected 0, 1 or null)",
                other
            ))),
        }
    }
}
