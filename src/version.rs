use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::str::FromStr;

use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::one_of;

use crate::error::{Error, Result};

/// Non-negative integer of any size, kept as decimal digits
///
/// Leading zeros are dropped on construction, so equal values have equal
/// digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Number(String);

static ZERO: Number = Number(String::new());

impl Number {
    /// Build from a non-empty run of ASCII digits
    pub(crate) fn from_digits(digits: &str) -> Self {
        Number(digits.trim_start_matches('0').to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Decimal digits without leading zeros, `"0"` for zero
    pub fn as_str(&self) -> &str {
        if self.is_zero() {
            "0"
        } else {
            &self.0
        }
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::from_digits(&n.to_string())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros: more digits means a larger value
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// Package revision (`-r1`, `-r2`, etc.)
///
/// Tracks packaging changes independently of the upstream version.
/// A version without a revision compares as revision `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(pub Number);

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-r{}", self.0)
    }
}

/// One dot-separated numeric component of a version
///
/// The first component of a version is always a plain number. Any later
/// component written with a leading zero is read as a decimal fraction of its
/// digits, so `1.02` sorts between `1.0` and `1.1`.
#[derive(Debug, Clone)]
pub enum Component {
    /// A component without a leading zero (`12` in `1.12`).
    Number(Number),
    /// A component with a leading zero, holding the literal digits
    /// (`"02"` in `1.02`, worth `0.02`).
    Fraction(String),
}

impl Component {
    /// Significant digits of a fraction: trailing zeros carry no value.
    fn fraction_digits(digits: &str) -> &str {
        digits.trim_end_matches('0')
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Component::Number(n) => write!(f, "{}", n),
            Component::Fraction(digits) => write!(f, "{}", digits),
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Component::Number(n) => n.hash(state),
            Component::Fraction(digits) => match Self::fraction_digits(digits) {
                // 0.0 == 0
                "" => ZERO.hash(state),
                significant => significant.hash(state),
            },
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Number(a), Component::Number(b)) => a.cmp(b),
            (Component::Fraction(a), Component::Fraction(b)) => {
                // Equal-length decimal expansions compare digit by digit
                Self::fraction_digits(a).cmp(Self::fraction_digits(b))
            }
            (Component::Number(n), Component::Fraction(digits)) => {
                match (n.is_zero(), Self::fraction_digits(digits).is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Less,
                    (false, _) => Ordering::Greater,
                }
            }
            (Component::Fraction(_), Component::Number(_)) => other.cmp(self).reverse(),
        }
    }
}

/// Version suffix kind
///
/// `Alpha`, `Beta`, `Pre`, and `Rc` sort *below* the unsuffixed version,
/// while `P` (patchlevel) sorts *above* it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    /// `_alpha`
    Alpha,
    /// `_beta`
    Beta,
    /// `_pre`
    Pre,
    /// `_rc`
    Rc,
    /// `_p`, a patch level above the base version.
    P,
}

impl SuffixKind {
    /// Ordering rank; an unsuffixed version ranks as `(0, -1)`
    fn rank(&self) -> i32 {
        match self {
            SuffixKind::Alpha => -4,
            SuffixKind::Beta => -3,
            SuffixKind::Pre => -2,
            SuffixKind::Rc => -1,
            SuffixKind::P => 0,
        }
    }
}

impl fmt::Display for SuffixKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuffixKind::Alpha => write!(f, "_alpha"),
            SuffixKind::Beta => write!(f, "_beta"),
            SuffixKind::Pre => write!(f, "_pre"),
            SuffixKind::Rc => write!(f, "_rc"),
            SuffixKind::P => write!(f, "_p"),
        }
    }
}

impl FromStr for SuffixKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alpha" => Ok(SuffixKind::Alpha),
            "beta" => Ok(SuffixKind::Beta),
            "pre" => Ok(SuffixKind::Pre),
            "rc" => Ok(SuffixKind::Rc),
            "p" => Ok(SuffixKind::P),
            _ => Err(Error::version(s)),
        }
    }
}

/// A version suffix with optional numeric qualifier
///
/// Represents one `_alpha`, `_beta`, `_pre`, `_rc`, or `_p` segment,
/// optionally followed by a number (e.g. `_rc2`, `_p1`). An omitted number
/// compares as `0`, so `_pre` equals `_pre0`.
#[derive(Debug, Clone)]
pub struct Suffix {
    /// The suffix type (`_alpha`, `_beta`, `_pre`, `_rc`, or `_p`).
    pub kind: SuffixKind,
    /// Optional numeric qualifier (e.g. `2` in `_rc2`).
    pub number: Option<Number>,
}

impl Suffix {
    /// Sentinel key of a version without any suffix: rank of `_p`, below
    /// any number.
    const UNSUFFIXED: (i32, Option<&'static Number>) = (0, None);

    fn key(&self) -> (i32, Option<&Number>) {
        (self.kind.rank(), Some(self.number.as_ref().unwrap_or(&ZERO)))
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(n) = &self.number {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

impl PartialEq for Suffix {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Suffix {}

impl Hash for Suffix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Suffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suffix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Package version
///
/// Represents a version string such as `1.2.3d_pre5-r6`.
///
/// Ordering compares, in turn:
///
/// 1. the numeric components, pairwise; when every shared component is
///    equal the version with fewer components is lower (`1.2 < 1.2.0`);
/// 2. the letter, where no letter sorts below `a`;
/// 3. the suffix chain, pairwise by `(rank, number)` with ranks
///    `alpha < beta < pre < rc < p`; a version without suffixes ranks as the
///    single pair `(p, -1)`, i.e. above every pre-release and below `_p0`;
/// 4. the revision, where no revision counts as `-r0`.
///
/// Equality and hashing follow that ordering, so `5.0`, `05.0` and `5.00`
/// are the same version.
#[derive(Debug, Clone)]
pub struct Version {
    /// Dot-separated numeric components (e.g. `1`, `2`, `3` for `1.2.3`).
    pub components: Vec<Component>,
    /// Optional single lowercase letter after the numeric components.
    pub letter: Option<char>,
    /// Zero or more version suffixes (`_alpha`, `_beta`, `_pre`, `_rc`, `_p`).
    pub suffixes: Vec<Suffix>,
    /// Package revision, if one was written.
    pub revision: Option<Revision>,
}

impl Version {
    /// Parse version from string
    pub fn parse(input: &str) -> Result<Self> {
        parse_version().parse(input).map_err(|_| Error::version(input))
    }

    /// Revision number, `0` when none was written
    pub fn revision_number(&self) -> &Number {
        self.revision.as_ref().map_or(&ZERO, |r| &r.0)
    }

    /// Upstream version: the same version without its revision
    ///
    /// Used by the `~` selector.
    pub fn upstream(&self) -> Self {
        Version {
            components: self.components.clone(),
            letter: self.letter,
            suffixes: self.suffixes.clone(),
            revision: None,
        }
    }

    /// Check whether this version starts with `prefix`
    ///
    /// The canonical text of `self` must begin with the canonical text of
    /// `prefix`, and must not continue with a digit right after it: `1.5.2`
    /// and `1.5b` start with `1.5`, `1.50` and `11` do not start with `1.5`
    /// and `1`.
    pub fn starts_with(&self, prefix: &Version) -> bool {
        let full = self.to_string();
        let prefix = prefix.to_string();
        match full.strip_prefix(prefix.as_str()) {
            Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
            None => false,
        }
    }

    /// [`starts_with`](Self::starts_with) for a prefix that is still text
    ///
    /// Fails if `prefix` is not itself a valid version.
    pub fn starts_with_str(&self, prefix: &str) -> Result<bool> {
        Ok(self.starts_with(&Version::parse(prefix)?))
    }

    fn cmp_components(a: &[Component], b: &[Component]) -> Ordering {
        a.iter().cmp(b.iter())
    }

    fn suffix_keys(suffixes: &[Suffix]) -> Vec<(i32, Option<&Number>)> {
        if suffixes.is_empty() {
            vec![Suffix::UNSUFFIXED]
        } else {
            suffixes.iter().map(Suffix::key).collect()
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
        }

        if let Some(letter) = self.letter {
            write!(f, "{}", letter)?;
        }

        for suffix in &self.suffixes {
            write!(f, "{}", suffix)?;
        }

        if let Some(revision) = &self.revision {
            write!(f, "{}", revision)?;
        }

        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
        self.letter.hash(state);
        Self::suffix_keys(&self.suffixes).hash(state);
        self.revision_number().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::cmp_components(&self.components, &other.components)
            .then_with(|| self.letter.cmp(&other.letter))
            .then_with(|| {
                Self::suffix_keys(&self.suffixes).cmp(&Self::suffix_keys(&other.suffixes))
            })
            .then_with(|| self.revision_number().cmp(other.revision_number()))
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Winnow parsers

fn parse_number<'s>() -> impl Parser<&'s str, Number, ErrMode<ContextError>> {
    digit1.map(Number::from_digits)
}

/// Parse a component after the first one; a leading zero makes it a fraction
fn parse_component<'s>() -> impl Parser<&'s str, Component, ErrMode<ContextError>> {
    digit1.map(|s: &str| {
        if s.starts_with('0') {
            Component::Fraction(s.to_string())
        } else {
            Component::Number(Number::from_digits(s))
        }
    })
}

fn parse_components<'s>() -> impl Parser<&'s str, Vec<Component>, ErrMode<ContextError>> {
    (parse_number(), repeat(0.., preceded('.', parse_component()))).map(
        |(first, rest): (Number, Vec<Component>)| {
            iter::once(Component::Number(first)).chain(rest).collect()
        },
    )
}

fn parse_letter<'s>() -> impl Parser<&'s str, char, ErrMode<ContextError>> {
    one_of('a'..='z')
}

fn parse_suffix_kind<'s>() -> impl Parser<&'s str, SuffixKind, ErrMode<ContextError>> {
    alt((
        "alpha".value(SuffixKind::Alpha),
        "beta".value(SuffixKind::Beta),
        "pre".value(SuffixKind::Pre),
        "rc".value(SuffixKind::Rc),
        "p".value(SuffixKind::P),
    ))
}

fn parse_suffix<'s>() -> impl Parser<&'s str, Suffix, ErrMode<ContextError>> {
    preceded('_', cut_err((parse_suffix_kind(), opt(parse_number()))))
        .map(|(kind, number)| Suffix { kind, number })
}

fn parse_revision<'s>() -> impl Parser<&'s str, Revision, ErrMode<ContextError>> {
    preceded("-r", cut_err(parse_number())).map(Revision)
}

pub(crate) fn parse_version<'s>() -> impl Parser<&'s str, Version, ErrMode<ContextError>> {
    (
        parse_components(),
        opt(parse_letter()),
        repeat(0.., parse_suffix()),
        opt(parse_revision()),
    )
        .map(|(components, letter, suffixes, revision)| Version {
            components,
            letter,
            suffixes,
            revision,
        })
        .context(StrContext::Label("version"))
}
