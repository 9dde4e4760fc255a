use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use winnow::combinator::{alt, opt, preceded, terminated};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{AtomErrorKind, Error, Result};
use crate::name::{is_package_name, parse_category, parse_repository, split_versioned};
use crate::slot::{parse_slot_dep, SlotDep, SlotOperator};
use crate::use_dep::{parse_use_deps, UseDep};
use crate::version::{parse_version, Version};

/// Atom dialect
///
/// Both dialects share the category, package, version and slot fields.
/// Dependency atoms (as written in ebuild `*DEPEND` variables) may also carry
/// a blocker prefix and USE constraints; query atoms (as typed by a user
/// looking for packages) may name a repository instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Dependency,
    Query,
}

/// Package dependency blocker type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blocker {
    /// `!`, may overlap during an upgrade.
    Weak,
    /// `!!`, must never be installed alongside.
    Strong,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Blocker::Weak => write!(f, "!"),
            Blocker::Strong => write!(f, "!!"),
        }
    }
}

/// Version selector
///
/// Written in front of a versioned atom to constrain which versions satisfy
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `<`: strictly less than the specified version.
    Less,
    /// `<=`: less than or equal to the specified version.
    LessOrEqual,
    /// `=`: exactly the specified version (including revision), or every
    /// version starting with it when the atom ends with `*`.
    Equal,
    /// `~`: the same upstream version with any revision
    /// (e.g. `~dev-lang/rust-1.75.0` matches `-r0`, `-r1`, etc.).
    Approximate,
    /// `>=`: greater than or equal to the specified version.
    GreaterOrEqual,
    /// `>`: strictly greater than the specified version.
    Greater,
}

impl Selector {
    /// Whether the selector denotes an open range of versions
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            Selector::Less | Selector::LessOrEqual | Selector::GreaterOrEqual | Selector::Greater
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Selector::Less => write!(f, "<"),
            Selector::LessOrEqual => write!(f, "<="),
            Selector::Equal => write!(f, "="),
            Selector::Approximate => write!(f, "~"),
            Selector::GreaterOrEqual => write!(f, ">="),
            Selector::Greater => write!(f, ">"),
        }
    }
}

/// Version constraint of an atom: selector, version and `*` postfix
///
/// The three only exist together; an atom without a version has no
/// constraint at all. The version text is kept as written for
/// [`Atom::glob_pattern`]; equality and hashing ignore it.
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    pub selector: Selector,
    pub version: Version,
    /// `*` postfix: match every version starting with `version`.
    pub wildcard: bool,
    text: String,
}

impl VersionConstraint {
    /// The version as written in the atom, e.g. `05.1` where
    /// [`version`](Self::version) renders `5.1`
    pub fn version_text(&self) -> &str {
        &self.text
    }
}

impl PartialEq for VersionConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector
            && self.version == other.version
            && self.wildcard == other.wildcard
    }
}

impl Eq for VersionConstraint {}

impl Hash for VersionConstraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.selector.hash(state);
        self.version.hash(state);
        self.wildcard.hash(state);
    }
}

/// Fields that only exist in one dialect
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    Dependency {
        /// Optional blocker prefix (`!` or `!!`).
        blocker: Option<Blocker>,
        /// Optional USE flag constraints (e.g. `[ssl,-debug]`).
        use_deps: Option<Vec<UseDep>>,
    },
    Query {
        /// Optional repository name (e.g. `gentoo` from `::gentoo`).
        repository: Option<String>,
    },
}

/// Package atom
///
/// A validated constraint over packages such as
/// `!!>=dev-lang/python-3.4:3.4/3.4m[sqlite]` (dependency dialect) or
/// `=dev-lang/python-3*::gentoo` (query dialect).
///
/// An `Atom` can only be obtained by parsing, so every value satisfies its
/// dialect's grammar and validation rules. The source string is kept and
/// available through [`as_str`](Self::as_str); [`Display`](fmt::Display)
/// renders a canonical form that parses back to an equal atom.
#[derive(Debug, Clone)]
pub struct Atom {
    raw: String,
    category: Option<String>,
    package: String,
    constraint: Option<VersionConstraint>,
    slot: Option<SlotDep>,
    extension: Extension,
}

impl Atom {
    /// Parse an atom of the given dialect
    ///
    /// With `strict`, the category is mandatory.
    pub fn parse(input: &str, dialect: Dialect, strict: bool) -> Result<Self> {
        let parts = parse_atom_parts(dialect)
            .parse(input)
            .map_err(|_| Error::atom(input, AtomErrorKind::Malformed))?;
        parts.validate(input, dialect, strict).inspect_err(|err| {
            tracing::debug!(atom = input, code = err.code(), "rejected atom");
        })
    }

    /// Parse a dependency atom, requiring a category
    pub fn dependency(input: &str) -> Result<Self> {
        Self::parse(input, Dialect::Dependency, true)
    }

    /// Parse a query atom, requiring a category
    pub fn query(input: &str) -> Result<Self> {
        Self::parse(input, Dialect::Query, true)
    }

    /// The string this atom was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn dialect(&self) -> Dialect {
        match self.extension {
            Extension::Dependency { .. } => Dialect::Dependency,
            Extension::Query { .. } => Dialect::Query,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn constraint(&self) -> Option<&VersionConstraint> {
        self.constraint.as_ref()
    }

    pub fn selector(&self) -> Option<Selector> {
        self.constraint.as_ref().map(|c| c.selector)
    }

    pub fn version(&self) -> Option<&Version> {
        self.constraint.as_ref().map(|c| &c.version)
    }

    /// Whether the atom ends with the `*` postfix
    pub fn is_wildcard(&self) -> bool {
        self.constraint.as_ref().is_some_and(|c| c.wildcard)
    }

    pub fn slot(&self) -> Option<&SlotDep> {
        self.slot.as_ref()
    }

    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    /// Blocker prefix (dependency atoms only)
    pub fn blocker(&self) -> Option<Blocker> {
        match &self.extension {
            Extension::Dependency { blocker, .. } => *blocker,
            Extension::Query { .. } => None,
        }
    }

    /// USE constraints (dependency atoms only)
    pub fn use_deps(&self) -> Option<&[UseDep]> {
        match &self.extension {
            Extension::Dependency { use_deps, .. } => use_deps.as_deref(),
            Extension::Query { .. } => None,
        }
    }

    /// Repository restriction (query atoms only)
    pub fn repository(&self) -> Option<&str> {
        match &self.extension {
            Extension::Query { repository } => repository.as_deref(),
            Extension::Dependency { .. } => None,
        }
    }
}

/// Atoms are equal when their parsed fields are; the source text is ignored.
impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.package == other.package
            && self.constraint == other.constraint
            && self.slot == other.slot
            && self.extension == other.extension
    }
}

impl Eq for Atom {}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(blocker) = self.blocker() {
            write!(f, "{}", blocker)?;
        }

        if let Some(constraint) = &self.constraint {
            write!(f, "{}", constraint.selector)?;
        }

        if let Some(category) = &self.category {
            write!(f, "{}/", category)?;
        }

        write!(f, "{}", self.package)?;

        if let Some(constraint) = &self.constraint {
            write!(f, "-{}", constraint.version)?;
            if constraint.wildcard {
                write!(f, "*")?;
            }
        }

        if let Some(slot) = &self.slot {
            write!(f, ":{}", slot)?;
        }

        if let Some(use_deps) = self.use_deps() {
            write!(f, "[")?;
            for (i, dep) in use_deps.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", dep)?;
            }
            write!(f, "]")?;
        }

        if let Some(repository) = self.repository() {
            write!(f, "::{}", repository)?;
        }

        Ok(())
    }
}

/// Parses a strict dependency atom.
impl FromStr for Atom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::dependency(s)
    }
}

/// Structural parse result: every field optional, nothing cross-checked yet
#[derive(Debug)]
struct AtomParts {
    blocker: Option<Blocker>,
    selector: Option<Selector>,
    category: Option<String>,
    package: String,
    version: Option<VersionPart>,
    slot: Option<SlotDep>,
    use_deps: Option<Vec<UseDep>>,
    repository: Option<String>,
}

impl AtomParts {
    /// Check the rules tying fields together; the first broken rule wins
    fn validate(self, raw: &str, dialect: Dialect, strict: bool) -> Result<Atom> {
        let reject = |kind| Err(Error::atom(raw, kind));

        if strict && self.category.is_none() {
            return reject(AtomErrorKind::MissingCategory);
        }

        let constraint = match (self.selector, self.version) {
            (None, None) => None,
            (None, Some(_)) => return reject(AtomErrorKind::MissingSelector),
            (Some(_), None) => return reject(AtomErrorKind::MissingVersion),
            (Some(selector), Some(part)) => {
                if selector == Selector::Approximate && part.version.revision.is_some() {
                    return reject(AtomErrorKind::UnexpectedRevision);
                }
                if part.wildcard && selector != Selector::Equal {
                    return reject(AtomErrorKind::UnexpectedPostfix);
                }
                Some(VersionConstraint {
                    selector,
                    version: part.version,
                    wildcard: part.wildcard,
                    text: part.text,
                })
            }
        };

        if dialect == Dialect::Query
            && self
                .slot
                .as_ref()
                .is_some_and(|slot| slot.operator() == Some(SlotOperator::Star))
        {
            return reject(AtomErrorKind::UnexpectedSlotOperator);
        }

        let extension = match dialect {
            Dialect::Dependency => Extension::Dependency {
                blocker: self.blocker,
                use_deps: self.use_deps,
            },
            Dialect::Query => Extension::Query {
                repository: self.repository,
            },
        };

        Ok(Atom {
            raw: raw.to_string(),
            category: self.category,
            package: self.package,
            constraint,
            slot: self.slot,
            extension,
        })
    }
}

// Winnow parsers

/// Parse blocker prefix
fn parse_blocker<'s>() -> impl Parser<&'s str, Blocker, ErrMode<ContextError>> {
    alt(("!!".value(Blocker::Strong), "!".value(Blocker::Weak)))
}

fn parse_selector<'s>() -> impl Parser<&'s str, Selector, ErrMode<ContextError>> {
    alt((
        "<=".value(Selector::LessOrEqual),
        "<".value(Selector::Less),
        ">=".value(Selector::GreaterOrEqual),
        ">".value(Selector::Greater),
        "~".value(Selector::Approximate),
        "=".value(Selector::Equal),
    ))
    .context(StrContext::Label("selector"))
}

/// Version of an atom before validation
#[derive(Debug)]
struct VersionPart {
    version: Version,
    text: String,
    wildcard: bool,
}

/// Parse a version followed by an optional `*` postfix
fn parse_version_postfix<'s>() -> impl Parser<&'s str, VersionPart, ErrMode<ContextError>> {
    (parse_version().with_taken(), opt('*')).map(
        |((version, text), star): ((Version, &str), Option<char>)| VersionPart {
            version,
            text: text.to_string(),
            wildcard: star.is_some(),
        },
    )
}

/// Parse `package` or `package-version[*]`
///
/// The name/version boundary is the earliest dash followed by a valid
/// version, so `pkg-a-4.4` is package `pkg-a` at version `4.4`.
fn parse_package_version<'s>(
) -> impl Parser<&'s str, (String, Option<VersionPart>), ErrMode<ContextError>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '-' | '.' | '*')
    })
    .verify_map(|token: &str| {
        match split_versioned(token, parse_version_postfix()) {
            Some((package, version)) => Some((package.to_string(), Some(version))),
            None if is_package_name(token) => Some((token.to_string(), None)),
            None => None,
        }
    })
    .context(StrContext::Label("package"))
}

/// Parse the structure of an atom
///
/// Dependency: `[!|!!][selector][category/]package[-version[*]][:slot][[use,...]]`
/// Query: `[selector][category/]package[-version[*]][:slot][::repository]`
fn parse_atom_parts<'s>(dialect: Dialect) -> impl Parser<&'s str, AtomParts, ErrMode<ContextError>> {
    move |input: &mut &'s str| {
        let blocker = match dialect {
            Dialect::Dependency => opt(parse_blocker()).parse_next(input)?,
            Dialect::Query => None,
        };

        let selector = opt(parse_selector()).parse_next(input)?;

        let category = opt(terminated(parse_category(), '/')).parse_next(input)?;

        let (package, version) = parse_package_version().parse_next(input)?;

        // `opt` backtracks when `:` starts `::repo` rather than a slot
        let slot = opt(preceded(':', parse_slot_dep())).parse_next(input)?;

        let (use_deps, repository) = match dialect {
            Dialect::Dependency => (opt(parse_use_deps()).parse_next(input)?, None),
            Dialect::Query => (
                None,
                opt(preceded("::", parse_repository())).parse_next(input)?,
            ),
        };

        Ok(AtomParts {
            blocker,
            selector,
            category,
            package,
            version,
            slot,
            use_deps,
            repository,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Slot;
    use crate::use_dep::UseDepKind;

    fn dep(s: &str) -> Atom {
        Atom::parse(s, Dialect::Dependency, false).unwrap()
    }

    fn query(s: &str) -> Atom {
        Atom::parse(s, Dialect::Query, false).unwrap()
    }

    fn error_code(s: &str, dialect: Dialect, strict: bool) -> &'static str {
        Atom::parse(s, dialect, strict).unwrap_err().code()
    }

    #[test]
    fn test_atom_simple() {
        let atom = Atom::dependency("dev-lang/rust").unwrap();
        assert_eq!(atom.category(), Some("dev-lang"));
        assert_eq!(atom.package(), "rust");
        assert!(atom.version().is_none());
        assert!(atom.blocker().is_none());
        assert_eq!(atom.dialect(), Dialect::Dependency);
        assert_eq!(atom.to_string(), "dev-lang/rust");
    }

    #[test]
    fn test_atom_without_category() {
        let atom = dep("package");
        assert_eq!(atom.category(), None);
        assert_eq!(atom.package(), "package");
    }

    #[test]
    fn test_atom_versioned() {
        let atom = Atom::dependency(">=dev-lang/rust-1.75.0").unwrap();
        assert_eq!(atom.selector(), Some(Selector::GreaterOrEqual));
        assert_eq!(atom.version().unwrap().to_string(), "1.75.0");
        assert!(!atom.is_wildcard());
        assert_eq!(atom.to_string(), ">=dev-lang/rust-1.75.0");
    }

    #[test]
    fn test_atom_versions() {
        let cases = [
            ("=cat/pkg-0.12.3", Some("0.12.3")),
            ("<=cat/pkg-3.14_pre5-r1", Some("3.14_pre5-r1")),
            (">cat/pkg-5", Some("5")),
            (">=cat/pkg-a-4.4.00c_p2_pre5-r10", Some("4.4.00c_p2_pre5-r10")),
            ("<cat/pkg-a-4.4.00c_p2_pre5-r10", Some("4.4.00c_p2_pre5-r10")),
            ("cat/some-pkg", None),
            ("dev-lang/python:3.4", None),
            ("=dev-lang/python-3*", Some("3")),
            ("=x11-libs/gtk+-2.4m_beta3*", Some("2.4m_beta3")),
            ("~media-libs/speex-1.2_rc1", Some("1.2_rc1")),
            ("=sys-kernel/vanilla-sources-4.8.10:4.8.10", Some("4.8.10")),
        ];
        for (atom, version) in cases {
            let atom = Atom::dependency(atom).unwrap();
            let expected = version.map(|v| Version::parse(v).unwrap());
            assert_eq!(atom.version(), expected.as_ref(), "{}", atom.as_str());
        }

        let atom = Atom::dependency("=x11-libs/gtk+-2.4m_beta3*").unwrap();
        assert_eq!(atom.package(), "gtk+");
        assert!(atom.is_wildcard());
        let atom = Atom::dependency("=sys-kernel/vanilla-sources-4.8.10:4.8.10").unwrap();
        assert_eq!(atom.package(), "vanilla-sources");
    }

    #[test]
    fn test_atom_with_slot() {
        let atom = dep("dev-lang/python:3.4/3.4m=");
        let slot = atom.slot().unwrap();
        assert_eq!(slot.slot(), Some(&Slot::with_subslot("3.4", "3.4m")));
        assert_eq!(slot.operator(), Some(SlotOperator::Equal));
        assert_eq!(atom.to_string(), "dev-lang/python:3.4/3.4m=");

        let atom = dep("dev-libs/openssl:*");
        assert_eq!(atom.slot(), Some(&SlotDep::Operator(SlotOperator::Star)));
    }

    #[test]
    fn test_atom_with_use_deps() {
        let atom = dep("dev-lang/rust[llvm_targets_AMDGPU,-debug,doc?]");
        let use_deps = atom.use_deps().unwrap();
        assert_eq!(use_deps.len(), 3);
        assert_eq!(use_deps[1].kind(), Some(UseDepKind::Disabled));
        assert_eq!(atom.to_string(), "dev-lang/rust[llvm_targets_AMDGPU,-debug,doc?]");
    }

    #[test]
    fn test_atom_with_blocker() {
        let atom = dep("!dev-lang/rust");
        assert_eq!(atom.blocker(), Some(Blocker::Weak));
        assert_eq!(atom.to_string(), "!dev-lang/rust");

        let atom = dep("!!<dev-lang/rust-1.70");
        assert_eq!(atom.blocker(), Some(Blocker::Strong));
        assert_eq!(atom.selector(), Some(Selector::Less));
        assert_eq!(atom.to_string(), "!!<dev-lang/rust-1.70");
    }

    #[test]
    fn test_query_with_repository() {
        let atom = query("dev-lang/rust::gentoo");
        assert_eq!(atom.repository(), Some("gentoo"));
        assert_eq!(atom.dialect(), Dialect::Query);
        assert_eq!(atom.to_string(), "dev-lang/rust::gentoo");

        let atom = query("=dev-lang/python-3.5*:3.5::sapher-overlay");
        assert_eq!(atom.repository(), Some("sapher-overlay"));
        assert_eq!(atom.slot().and_then(SlotDep::slot), Some(&Slot::new("3.5")));
    }

    #[test]
    fn test_dialect_specific_fields() {
        assert_eq!(
            error_code("dev-lang/rust::gentoo", Dialect::Dependency, false),
            "malformed"
        );
        assert_eq!(error_code("!dev-lang/rust", Dialect::Query, false), "malformed");
        assert_eq!(error_code("dev-lang/rust[ssl]", Dialect::Query, false), "malformed");
    }

    #[test]
    fn test_atom_complex() {
        let atom = dep("!!>=dev-lang/python-3.4_rc1-r2:3.4/3.4m=[sqlite,-tk,!test?]");
        assert_eq!(atom.blocker(), Some(Blocker::Strong));
        assert_eq!(atom.selector(), Some(Selector::GreaterOrEqual));
        assert!(atom.slot().is_some());
        assert_eq!(atom.use_deps().map(<[UseDep]>::len), Some(3));
        assert_eq!(
            atom.to_string(),
            "!!>=dev-lang/python-3.4_rc1-r2:3.4/3.4m=[sqlite,-tk,!test?]"
        );
    }

    #[test]
    fn test_valid_atoms() {
        for (atom, strict) in [
            ("package", false),
            ("dev-lang/python", true),
            ("~dev-python/ipython-5.4.0", true),
            ("=x11-libs/qtile-0.10.6", true),
            ("=toto-3.14*", false),
        ] {
            assert!(
                Atom::parse(atom, Dialect::Dependency, strict).is_ok(),
                "{}",
                atom
            );
        }
    }

    #[test]
    fn test_validation_errors() {
        use Dialect::*;

        assert_eq!(error_code("package", Dependency, true), "missing_category");
        assert_eq!(error_code("x11-libs/qtile-0.10.6", Dependency, false), "missing_selector");
        assert_eq!(error_code("toto-3.14*", Dependency, false), "missing_selector");
        assert_eq!(error_code("=dev-lang/python", Dependency, false), "missing_version");
        assert_eq!(error_code("~dev-python/ipython", Dependency, false), "missing_version");
        assert_eq!(error_code("~cat/pkg-1.0-r1", Dependency, false), "unexpected_revision");
        assert_eq!(error_code("~cat/pkg-1.0-r0", Query, false), "unexpected_revision");
        assert_eq!(error_code("<toto-3.14*", Dependency, false), "unexpected_postfix");
        assert_eq!(error_code("~cat/pkg-1.0*", Dependency, false), "unexpected_postfix");
        assert_eq!(error_code("cat/pkg:*", Query, false), "unexpected_slot_operator");
        assert!(Atom::parse("cat/pkg:*", Dependency, false).is_ok());
        // A trailing dash belongs to the package name
        assert_eq!(error_code("=cat/pkg-", Dependency, false), "missing_version");
    }

    #[test]
    fn test_validation_order() {
        // Both the category and the selector are missing: category wins
        assert_eq!(
            error_code("qtile-0.10.6", Dialect::Dependency, true),
            "missing_category"
        );
        // Revision under `~` is reported before the postfix
        assert_eq!(
            error_code("~cat/pkg-1.0-r1*", Dialect::Dependency, false),
            "unexpected_revision"
        );
        // Postfix is reported before the query slot operator
        assert_eq!(
            error_code(">cat/pkg-1*:*", Dialect::Query, false),
            "unexpected_postfix"
        );
    }

    #[test]
    fn test_malformed_atoms() {
        for s in [
            "",
            "/pkg",
            "cat/",
            "Cat/pkg",
            "dev-lang-extra/pkg",
            "cat/pkg-1.0_gamma",
            "cat/pkg-1.0-",
            "cat/pkg.name",
            "cat/pkg*",
            "cat/pkg:",
            "cat/pkg:0*",
            "cat/pkg[]",
            "cat/pkg[ssl",
            "!!!cat/pkg",
            "=<cat/pkg-1",
        ] {
            let err = Atom::parse(s, Dialect::Dependency, false).unwrap_err();
            assert_eq!(err.code(), "malformed", "{:?}", s);
            assert_eq!(err.raw(), s);
        }
    }

    #[test]
    fn test_round_trip() {
        let atoms = [
            ("dev-lang/rust", Dialect::Dependency),
            ("=cat/pkg-05.0_p005-r01", Dialect::Dependency),
            ("!>=dev-libs/foo-1.0a:2/2.1=[bar(+)?,-baz,!qux=]", Dialect::Dependency),
            ("=toto-3.14*", Dialect::Dependency),
            ("~media-libs/speex-1.2_rc1::gentoo", Dialect::Query),
            ("<pkg-a-4.4.00c:0", Dialect::Query),
            ("dev-lang/python:=", Dialect::Query),
        ];
        for (s, dialect) in atoms {
            let atom = Atom::parse(s, dialect, false).unwrap();
            let rendered = atom.to_string();
            let reparsed = Atom::parse(&rendered, dialect, false).unwrap();
            assert_eq!(reparsed, atom, "{} -> {}", s, rendered);
            assert_eq!(atom.as_str(), s);
        }
    }

    #[test]
    fn test_canonical_rendering() {
        let atom = dep("=cat/pkg-05.0_p005-r01");
        assert_eq!(atom.to_string(), "=cat/pkg-5.0_p5-r1");
        assert_eq!(atom.as_str(), "=cat/pkg-05.0_p005-r01");
    }

    #[test]
    fn test_from_str_is_strict_dependency() {
        let atom: Atom = "!dev-lang/rust".parse().unwrap();
        assert_eq!(atom.dialect(), Dialect::Dependency);
        assert!("rust".parse::<Atom>().is_err());
    }
}
