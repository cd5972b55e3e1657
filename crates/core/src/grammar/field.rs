use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters in a complete heading.
pub const HEADING_LEN: usize = 6;

/// One field of a TTAAII heading, in positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TtaaiiField {
    /// Data type designator (position 0).
    T1,
    /// Data subtype designator (position 1).
    T2,
    /// First geographical / type designator (position 2).
    A1,
    /// Second geographical / time designator (position 3).
    A2,
    /// Level or bulletin number (positions 4–5).
    #[serde(rename = "ii")]
    Ii,
}

impl TtaaiiField {
    /// Every field in positional order.
    pub const ALL: [TtaaiiField; 5] = [
        TtaaiiField::T1,
        TtaaiiField::T2,
        TtaaiiField::A1,
        TtaaiiField::A2,
        TtaaiiField::Ii,
    ];

    /// Field governing the character at `position`; anything past A2 is `ii`.
    pub fn at_position(position: usize) -> TtaaiiField {
        match position {
            0 => TtaaiiField::T1,
            1 => TtaaiiField::T2,
            2 => TtaaiiField::A1,
            3 => TtaaiiField::A2,
            _ => TtaaiiField::Ii,
        }
    }

    /// First character position of this field.
    pub fn start(self) -> usize {
        match self {
            TtaaiiField::T1 => 0,
            TtaaiiField::T2 => 1,
            TtaaiiField::A1 => 2,
            TtaaiiField::A2 => 3,
            TtaaiiField::Ii => 4,
        }
    }

    /// Canonical name (`T1` … `ii`).
    pub fn as_str(self) -> &'static str {
        match self {
            TtaaiiField::T1 => "T1",
            TtaaiiField::T2 => "T2",
            TtaaiiField::A1 => "A1",
            TtaaiiField::A2 => "A2",
            TtaaiiField::Ii => "ii",
        }
    }

    /// Parse a field name, accepting `II` and `Ii` for `ii`.
    pub fn parse(name: &str) -> Option<TtaaiiField> {
        match name {
            "T1" | "t1" => Some(TtaaiiField::T1),
            "T2" | "t2" => Some(TtaaiiField::T2),
            "A1" | "a1" => Some(TtaaiiField::A1),
            "A2" | "a2" => Some(TtaaiiField::A2),
            "ii" | "II" | "Ii" => Some(TtaaiiField::Ii),
            _ => None,
        }
    }
}

/// Shorthand for [`TtaaiiField::at_position`].
pub fn field_at_position(position: usize) -> TtaaiiField {
    TtaaiiField::at_position(position)
}

impl fmt::Display for TtaaiiField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
