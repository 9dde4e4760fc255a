use std::fmt;
use std::str::FromStr;

use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{AtomErrorKind, Error, Result};

/// Slot operator
///
/// Operators are directives for whoever builds the depending package; they
/// never narrow which packages an atom matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotOperator {
    /// `:=`, rebuild on slot or sub-slot change.
    Equal,
    /// `:*`, any slot.
    Star,
}

impl fmt::Display for SlotOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotOperator::Equal => write!(f, "="),
            SlotOperator::Star => write!(f, "*"),
        }
    }
}

/// Slot name and optional sub-slot
///
/// A package's `SLOT` value, e.g. `3.12` or `0/1.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    /// `0` in `0/1.2`.
    pub slot: String,
    /// `1.2` in `0/1.2`.
    pub subslot: Option<String>,
}

impl Slot {
    pub fn new(slot: impl Into<String>) -> Self {
        Slot {
            slot: slot.into(),
            subslot: None,
        }
    }

    pub fn with_subslot(slot: impl Into<String>, subslot: impl Into<String>) -> Self {
        Slot {
            slot: slot.into(),
            subslot: Some(subslot.into()),
        }
    }

    /// Parse `slot` or `slot/subslot`
    ///
    /// A slot parsed on its own describes a package, so a bad value is
    /// reported as [`Error::InvalidPackage`].
    pub fn parse(input: &str) -> Result<Self> {
        parse_slot().parse(input).map_err(|_| Error::InvalidPackage {
            raw: input.to_string(),
        })
    }

    /// Whether a package in slot `other` satisfies this slot constraint
    ///
    /// The slot names must be equal. The sub-slot only has to agree when this
    /// constraint names one.
    pub fn accepts(&self, other: &Slot) -> bool {
        self.slot == other.slot
            && match &self.subslot {
                Some(subslot) => other.subslot.as_ref() == Some(subslot),
                None => true,
            }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slot)?;
        if let Some(ref subslot) = self.subslot {
            write!(f, "/{}", subslot)?;
        }
        Ok(())
    }
}

impl FromStr for Slot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Slot part of an atom
///
/// Everything after the `:`, e.g. `:0`, `:0/2.1`, `:0=`, `:=`, `:*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotDep {
    /// A named slot with optional sub-slot, optionally followed by `=`,
    /// e.g. `:0`, `:0/1.2`, `:0=`.
    Slot { slot: Slot, op: Option<SlotOperator> },
    /// `:=` or `:*` alone.
    Operator(SlotOperator),
}

impl SlotDep {
    /// Parse the text after the atom's `:`
    ///
    /// A bad value is reported as a malformed [`Error::InvalidAtom`].
    pub fn parse(input: &str) -> Result<Self> {
        parse_slot_dep()
            .parse(input)
            .map_err(|_| Error::atom(input, AtomErrorKind::Malformed))
    }

    /// The named slot, if any
    pub fn slot(&self) -> Option<&Slot> {
        match self {
            SlotDep::Slot { slot, .. } => Some(slot),
            SlotDep::Operator(_) => None,
        }
    }

    /// The slot operator, if any
    pub fn operator(&self) -> Option<SlotOperator> {
        match self {
            SlotDep::Slot { op, .. } => *op,
            SlotDep::Operator(op) => Some(*op),
        }
    }
}

impl fmt::Display for SlotDep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotDep::Slot { slot, op } => {
                write!(f, "{}", slot)?;
                if let Some(o) = op {
                    write!(f, "{}", o)?;
                }
                Ok(())
            }
            SlotDep::Operator(op) => write!(f, "{}", op),
        }
    }
}

impl FromStr for SlotDep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Winnow parsers

/// `[A-Za-z0-9_+.-]+`
fn parse_slot_name<'s>() -> impl Parser<&'s str, String, ErrMode<ContextError>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '+' || c == '.'
    })
    .map(|s: &str| s.to_string())
}

/// Parse slot with optional subslot
pub(crate) fn parse_slot<'s>() -> impl Parser<&'s str, Slot, ErrMode<ContextError>> {
    (parse_slot_name(), opt(preceded('/', parse_slot_name())))
        .map(|(slot, subslot)| Slot { slot, subslot })
        .context(StrContext::Label("slot"))
}

/// Parse a bare slot operator
fn parse_slot_operator<'s>() -> impl Parser<&'s str, SlotOperator, ErrMode<ContextError>> {
    alt((
        '='.value(SlotOperator::Equal),
        '*'.value(SlotOperator::Star),
    ))
}

/// Slot part of an atom, without its `:`
///
/// Only `=` may follow a named slot.
pub(crate) fn parse_slot_dep<'s>() -> impl Parser<&'s str, SlotDep, ErrMode<ContextError>> {
    alt((
        parse_slot_operator().map(SlotDep::Operator),
        (parse_slot(), opt('='.value(SlotOperator::Equal)))
            .map(|(slot, op)| SlotDep::Slot { slot, op }),
    ))
    .context(StrContext::Label("slot dep"))
}
