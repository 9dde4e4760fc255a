use std::fmt;

/// Why a version string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionErrorKind {
    /// The string does not follow the version grammar.
    Malformed,
}

impl VersionErrorKind {
    /// Machine-readable name of the error kind
    pub fn code(&self) -> &'static str {
        match self {
            VersionErrorKind::Malformed => "malformed",
        }
    }
}

impl fmt::Display for VersionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VersionErrorKind::Malformed => write!(f, "not a valid version"),
        }
    }
}

/// Why an atom string was rejected
///
/// Validation stops at the first violated rule; the variants below are listed
/// in the order the rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomErrorKind {
    /// The string does not follow the dialect grammar at all.
    Malformed,
    /// Strict parsing was requested and no category was given.
    MissingCategory,
    /// A version was given without a selector (`cat/pkg-1.0`).
    MissingSelector,
    /// A selector was given without a version (`>=cat/pkg`).
    MissingVersion,
    /// The `~` selector was used with a revision (`~cat/pkg-1.0-r1`).
    UnexpectedRevision,
    /// The `*` postfix was used with a selector other than `=`.
    UnexpectedPostfix,
    /// A query atom used the `*` slot operator.
    UnexpectedSlotOperator,
}

impl AtomErrorKind {
    /// Machine-readable name of the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AtomErrorKind::Malformed => "malformed",
            AtomErrorKind::MissingCategory => "missing_category",
            AtomErrorKind::MissingSelector => "missing_selector",
            AtomErrorKind::MissingVersion => "missing_version",
            AtomErrorKind::UnexpectedRevision => "unexpected_revision",
            AtomErrorKind::UnexpectedPostfix => "unexpected_postfix",
            AtomErrorKind::UnexpectedSlotOperator => "unexpected_slot_operator",
        }
    }
}

impl fmt::Display for AtomErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AtomErrorKind::Malformed => write!(f, "not a valid atom"),
            AtomErrorKind::MissingCategory => {
                write!(f, "may be ambiguous, please specify the category")
            }
            AtomErrorKind::MissingSelector => {
                write!(f, "missing version selector, did you mean `=`?")
            }
            AtomErrorKind::MissingVersion => write!(f, "misses a version number"),
            AtomErrorKind::UnexpectedRevision => {
                write!(f, "a revision cannot be given with the `~` selector")
            }
            AtomErrorKind::UnexpectedPostfix => {
                write!(f, "the `*` postfix can only be used with the `=` selector")
            }
            AtomErrorKind::UnexpectedSlotOperator => {
                write!(f, "the `*` slot operator is not allowed in a query")
            }
        }
    }
}

/// Why an ebuild path was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EbuildErrorKind {
    /// The path does not follow a known ebuild layout.
    Malformed,
    /// The file name and its package directory disagree on the package name.
    PackageNameMismatch,
}

impl EbuildErrorKind {
    /// Machine-readable name of the error kind
    pub fn code(&self) -> &'static str {
        match self {
            EbuildErrorKind::Malformed => "malformed",
            EbuildErrorKind::PackageNameMismatch => "package_name_mismatch",
        }
    }
}

impl fmt::Display for EbuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EbuildErrorKind::Malformed => write!(f, "not a valid ebuild path"),
            EbuildErrorKind::PackageNameMismatch => write!(f, "package name mismatch"),
        }
    }
}

/// Error type for portage-query parsing
///
/// Every variant keeps the offending input so callers can report it verbatim.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid version {raw}: {kind}")]
    InvalidVersion { raw: String, kind: VersionErrorKind },

    #[error("invalid atom {raw}: {kind}")]
    InvalidAtom { raw: String, kind: AtomErrorKind },

    #[error("invalid ebuild {raw}: {kind}")]
    InvalidEbuild { raw: String, kind: EbuildErrorKind },

    #[error("invalid package: {raw}")]
    InvalidPackage { raw: String },
}

impl Error {
    pub(crate) fn version(raw: impl Into<String>) -> Self {
        Error::InvalidVersion {
            raw: raw.into(),
            kind: VersionErrorKind::Malformed,
        }
    }

    pub(crate) fn atom(raw: impl Into<String>, kind: AtomErrorKind) -> Self {
        Error::InvalidAtom {
            raw: raw.into(),
            kind,
        }
    }

    pub(crate) fn ebuild(raw: impl Into<String>, kind: EbuildErrorKind) -> Self {
        Error::InvalidEbuild {
            raw: raw.into(),
            kind,
        }
    }

    /// The raw input that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            Error::InvalidVersion { raw, .. }
            | Error::InvalidAtom { raw, .. }
            | Error::InvalidEbuild { raw, .. }
            | Error::InvalidPackage { raw } => raw,
        }
    }

    /// Machine-readable error code, e.g. `missing_selector`
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidVersion { kind, .. } => kind.code(),
            Error::InvalidAtom { kind, .. } => kind.code(),
            Error::InvalidEbuild { kind, .. } => kind.code(),
            Error::InvalidPackage { .. } => "malformed",
        }
    }
}

/// Result type for portage-query operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::atom("=cat/pkg", AtomErrorKind::MissingVersion);
        assert_eq!(err.code(), "missing_version");
        assert_eq!(err.raw(), "=cat/pkg");
        assert_eq!(
            err.to_string(),
            "invalid atom =cat/pkg: misses a version number"
        );

        let err = Error::version("pi");
        assert_eq!(err.code(), "malformed");
        assert_eq!(err.raw(), "pi");
    }
}
