use super::field::{HEADING_LEN, TtaaiiField};
use serde::Serialize;
use thiserror::Error;

/// Errors from building a context field by field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A field was supplied while an earlier field is absent.
    #[error("{field} requires {missing} to be present")]
    Gap {
        /// The supplied field.
        field: TtaaiiField,
        /// The first absent predecessor.
        missing: TtaaiiField,
    },
    /// `ii` must have exactly two characters when present.
    #[error("ii must have two characters, got {0:?}")]
    PartialIi(String),
}

/// Parsed, partial interpretation of a heading.
///
/// A field is present only when every earlier field is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TtaaiiContext {
    #[serde(rename = "T1", skip_serializing_if = "Option::is_none")]
    t1: Option<char>,
    #[serde(rename = "T2", skip_serializing_if = "Option::is_none")]
    t2: Option<char>,
    #[serde(rename = "A1", skip_serializing_if = "Option::is_none")]
    a1: Option<char>,
    #[serde(rename = "A2", skip_serializing_if = "Option::is_none")]
    a2: Option<char>,
    #[serde(rename = "ii", skip_serializing_if = "Option::is_none")]
    ii: Option<String>,
}

impl TtaaiiContext {
    /// Build a context from explicit fields, rejecting gaps.
    pub fn from_fields(
        t1: Option<char>,
        t2: Option<char>,
        a1: Option<char>,
        a2: Option<char>,
        ii: Option<&str>,
    ) -> Result<Self, ContextError> {
        if let Some(ii) = ii
            && ii.chars().count() != 2
        {
            return Err(ContextError::PartialIi(ii.to_string()));
        }
        let present = [
            t1.is_some(),
            t2.is_some(),
            a1.is_some(),
            a2.is_some(),
            ii.is_some(),
        ];
        for (i, &is_set) in present.iter().enumerate().skip(1) {
            if is_set && let Some(gap) = present[..i].iter().position(|p| !p) {
                return Err(ContextError::Gap {
                    field: TtaaiiField::ALL[i],
                    missing: TtaaiiField::ALL[gap],
                });
            }
        }
        Ok(Self {
            t1,
            t2,
            a1,
            a2,
            ii: ii.map(str::to_string),
        })
    }

    /// Data type designator.
    pub fn t1(&self) -> Option<char> {
        self.t1
    }

    /// Data subtype designator.
    pub fn t2(&self) -> Option<char> {
        self.t2
    }

    /// First area / type designator.
    pub fn a1(&self) -> Option<char> {
        self.a1
    }

    /// Second area / time designator.
    pub fn a2(&self) -> Option<char> {
        self.a2
    }

    /// Two-character level / bulletin number.
    pub fn ii(&self) -> Option<&str> {
        self.ii.as_deref()
    }

    /// `T1T2` when both are present.
    pub fn t1t2(&self) -> Option<String> {
        Some([self.t1?, self.t2?].iter().collect())
    }

    /// Value of a single-character field; always `None` for `ii`.
    pub fn get(&self, field: TtaaiiField) -> Option<char> {
        match field {
            TtaaiiField::T1 => self.t1,
            TtaaiiField::T2 => self.t2,
            TtaaiiField::A1 => self.a1,
            TtaaiiField::A2 => self.a2,
            TtaaiiField::Ii => None,
        }
    }

    /// Whether `field` is present.
    pub fn has(&self, field: TtaaiiField) -> bool {
        match field {
            TtaaiiField::Ii => self.ii.is_some(),
            other => self.get(other).is_some(),
        }
    }
}

/// Context plus the uncommitted first `ii` digit of a five-character input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// Committed fields.
    pub context: TtaaiiContext,
    /// Lone fifth character, never part of the context.
    pub pending_ii: Option<char>,
}

/// Slice `input` into fields by position.
///
/// The input is not validated or case-normalized. `ii` is set only once both
/// of its characters are present; characters past the sixth are ignored.
pub fn parse_context(input: &str) -> TtaaiiContext {
    parse_input(input).context
}

/// Like [`parse_context`] but keeps a lone fifth character as `pending_ii`.
pub fn parse_input(input: &str) -> ParsedInput {
    let chars: Vec<char> = input.chars().take(HEADING_LEN).collect();
    let at = |i: usize| chars.get(i).copied();
    let ii = (chars.len() >= HEADING_LEN).then(|| chars[4..HEADING_LEN].iter().collect());
    let pending_ii = if chars.len() == 5 { at(4) } else { None };
    ParsedInput {
        context: TtaaiiContext {
            t1: at(0),
            t2: at(1),
            a1: at(2),
            a2: at(3),
            ii,
        },
        pending_ii,
    }
}
