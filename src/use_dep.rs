use std::fmt;
use std::str::FromStr;

use winnow::combinator::{alt, cut_err, delimited, opt, separated};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{AtomErrorKind, Error, Result};

/// Assumed state of a flag missing from the target package's IUSE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseDefault {
    /// `(+)`
    Enabled,
    /// `(-)`
    Disabled,
}

impl fmt::Display for UseDefault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UseDefault::Enabled => write!(f, "(+)"),
            UseDefault::Disabled => write!(f, "(-)"),
        }
    }
}

/// Sign written in front of a USE flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseSign {
    /// `-flag`
    Minus,
    /// `!flag`
    Bang,
}

impl fmt::Display for UseSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UseSign::Minus => write!(f, "-"),
            UseSign::Bang => write!(f, "!"),
        }
    }
}

/// Marker written after a USE flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCondition {
    /// `flag?`
    Conditional,
    /// `flag=`
    Equal,
}

impl fmt::Display for UseCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UseCondition::Conditional => write!(f, "?"),
            UseCondition::Equal => write!(f, "="),
        }
    }
}

/// Meaning of a USE constraint, see [`UseDep::kind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseDepKind {
    /// `flag`: enabled on the target.
    Enabled,
    /// `-flag`: disabled on the target.
    Disabled,
    /// `flag?`: enabled on the target if enabled on the depending package.
    Conditional,
    /// `!flag?`: disabled on the target if disabled on the depending package.
    ConditionalInverse,
    /// `flag=`: same state as on the depending package.
    Equal,
    /// `!flag=`: opposite state.
    EqualInverse,
}

/// One item of an atom's USE list
///
/// Appears inside brackets, e.g. `[ssl,-debug,python?]`. The grammar accepts
/// an optional `-` or `!` sign, the flag, an optional `(+)`/`(-)` default and
/// an optional `?` or `=` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UseDep {
    /// Flag name, e.g. `python_targets_python3_12`.
    pub flag: String,
    /// Optional `-` or `!` prefix.
    pub sign: Option<UseSign>,
    /// Optional default for packages that do not define the flag.
    pub default: Option<UseDefault>,
    /// Optional `?` or `=` suffix.
    pub condition: Option<UseCondition>,
}

impl UseDep {
    pub fn new(flag: impl Into<String>) -> Self {
        UseDep {
            flag: flag.into(),
            sign: None,
            default: None,
            condition: None,
        }
    }

    /// Parse one list item, e.g. `!icu(-)?`
    pub fn parse(input: &str) -> Result<Self> {
        parse_use_dep_item()
            .parse(input)
            .map_err(|_| Error::atom(input, AtomErrorKind::Malformed))
    }

    /// Meaning of the constraint, `None` for sign/marker pairs without one
    /// (`-flag?`, `!flag`, ...)
    pub fn kind(&self) -> Option<UseDepKind> {
        match (self.sign, self.condition) {
            (None, None) => Some(UseDepKind::Enabled),
            (Some(UseSign::Minus), None) => Some(UseDepKind::Disabled),
            (None, Some(UseCondition::Conditional)) => Some(UseDepKind::Conditional),
            (Some(UseSign::Bang), Some(UseCondition::Conditional)) => {
                Some(UseDepKind::ConditionalInverse)
            }
            (None, Some(UseCondition::Equal)) => Some(UseDepKind::Equal),
            (Some(UseSign::Bang), Some(UseCondition::Equal)) => Some(UseDepKind::EqualInverse),
            _ => None,
        }
    }
}

impl fmt::Display for UseDep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{}", sign)?;
        }

        write!(f, "{}", self.flag)?;

        // The default sits between the flag name and ?/=
        if let Some(default) = self.default {
            write!(f, "{}", default)?;
        }

        if let Some(condition) = self.condition {
            write!(f, "{}", condition)?;
        }

        Ok(())
    }
}

impl FromStr for UseDep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Winnow parsers

/// Parse USE flag name
fn parse_use_flag<'s>() -> impl Parser<&'s str, String, ErrMode<ContextError>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '+' || c == '@'
    })
    .verify(|s: &str| s.starts_with(|c: char| c.is_ascii_alphanumeric()))
    .map(|s: &str| s.to_string())
}

fn parse_use_sign<'s>() -> impl Parser<&'s str, UseSign, ErrMode<ContextError>> {
    alt(('-'.value(UseSign::Minus), '!'.value(UseSign::Bang)))
}

/// Parse USE default
fn parse_use_default<'s>() -> impl Parser<&'s str, UseDefault, ErrMode<ContextError>> {
    alt((
        "(+)".value(UseDefault::Enabled),
        "(-)".value(UseDefault::Disabled),
    ))
}

fn parse_use_condition<'s>() -> impl Parser<&'s str, UseCondition, ErrMode<ContextError>> {
    alt((
        '?'.value(UseCondition::Conditional),
        '='.value(UseCondition::Equal),
    ))
}

/// Parse single USE dependency item
pub(crate) fn parse_use_dep_item<'s>() -> impl Parser<&'s str, UseDep, ErrMode<ContextError>> {
    (
        opt(parse_use_sign()),
        parse_use_flag(),
        opt(parse_use_default()),
        opt(parse_use_condition()),
    )
        .map(|(sign, flag, default, condition)| UseDep {
            flag,
            sign,
            default,
            condition,
        })
}

/// Parse `[item,...]`
pub(crate) fn parse_use_deps<'s>() -> impl Parser<&'s str, Vec<UseDep>, ErrMode<ContextError>> {
    delimited(
        '[',
        cut_err(separated(1.., parse_use_dep_item(), ',')),
        cut_err(']'),
    )
    .context(StrContext::Label("use deps"))
}
