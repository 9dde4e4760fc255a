use std::fmt;
use std::str::FromStr;

use winnow::combinator::{cut_err, opt, preceded};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::atom::{Atom, Selector, VersionConstraint};
use crate::error::{Error, Result};
use crate::name::{is_repository_name, parse_category, parse_repository, split_versioned};
use crate::slot::{parse_slot, Slot};
use crate::version::{parse_version, Version};

/// Package identity
///
/// One concrete package revision as reported by a repository listing or the
/// installed-package database: `category/name-version`, plus the slot and
/// repository when the caller knows them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    pub category: String,
    pub name: String,
    pub version: Version,
    /// Slot and sub-slot, if known.
    pub slot: Option<Slot>,
    /// Name of the repository providing the package, if known.
    pub repository: Option<String>,
}

impl Package {
    /// Create a package from its parts, parsing `version`
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        version: &str,
    ) -> Result<Self> {
        Ok(Package {
            category: category.into(),
            name: name.into(),
            version: Version::parse(version)?,
            slot: None,
            repository: None,
        })
    }

    /// Parse `category/name-version[:slot[/subslot]][::repository]`
    pub fn parse(input: &str) -> Result<Self> {
        parse_package().parse(input).map_err(|_| Error::InvalidPackage {
            raw: input.to_string(),
        })
    }

    /// Set the slot from `slot` or `slot/subslot`
    pub fn with_slot(mut self, slot: &str) -> Result<Self> {
        self.slot = Some(Slot::parse(slot)?);
        Ok(self)
    }

    /// Set the providing repository
    pub fn with_repository(mut self, repository: &str) -> Result<Self> {
        if !is_repository_name(repository) {
            return Err(Error::InvalidPackage {
                raw: repository.to_string(),
            });
        }
        self.repository = Some(repository.to_string());
        Ok(self)
    }

    pub fn subslot(&self) -> Option<&str> {
        self.slot.as_ref().and_then(|s| s.subslot.as_deref())
    }

    /// Whether this package satisfies `atom`
    pub fn satisfies(&self, atom: &Atom) -> bool {
        atom.matches(self)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}-{}", self.category, self.name, self.version)?;
        if let Some(slot) = &self.slot {
            write!(f, ":{}", slot)?;
        }
        if let Some(repository) = &self.repository {
            write!(f, "::{}", repository)?;
        }
        Ok(())
    }
}

impl FromStr for Package {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl VersionConstraint {
    /// Whether `candidate` satisfies this constraint
    ///
    /// A `*` postfix turns the check into a prefix match, `~` compares the
    /// candidate's upstream version for equality, and the other selectors use
    /// the version ordering directly.
    pub fn matches(&self, candidate: &Version) -> bool {
        if self.wildcard {
            return candidate.starts_with(&self.version);
        }
        match self.selector {
            Selector::Less => *candidate < self.version,
            Selector::LessOrEqual => *candidate <= self.version,
            Selector::Equal => *candidate == self.version,
            Selector::Approximate => candidate.upstream() == self.version,
            Selector::GreaterOrEqual => *candidate >= self.version,
            Selector::Greater => *candidate > self.version,
        }
    }
}

impl Atom {
    /// Whether `package` satisfies this atom
    ///
    /// Category (when given), package name, repository (query atoms), version
    /// constraint and slot must all agree. Slot operators and USE constraints
    /// do not filter packages.
    pub fn matches(&self, package: &Package) -> bool {
        let reject = |reason: &str| {
            tracing::trace!(atom = self.as_str(), %package, reason, "no match");
            false
        };

        if self.category().is_some_and(|c| c != package.category) {
            return reject("category");
        }
        if self.package() != package.name {
            return reject("package");
        }
        if let Some(repository) = self.repository() {
            if package.repository.as_deref() != Some(repository) {
                return reject("repository");
            }
        }
        if let Some(constraint) = self.constraint() {
            if !constraint.matches(&package.version) {
                return reject("version");
            }
        }
        if let Some(slot) = self.slot().and_then(|s| s.slot()) {
            if !package.slot.as_ref().is_some_and(|p| slot.accepts(p)) {
                return reject("slot");
            }
        }
        true
    }
}

// Winnow parsers

/// Parse `category/name-version[:slot][::repository]`
pub(crate) fn parse_package<'s>() -> impl Parser<&'s str, Package, ErrMode<ContextError>> {
    (
        parse_category(),
        '/',
        cut_err(
            take_while(1.., |c: char| {
                c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '-' | '.')
            })
            .verify_map(|token: &str| split_versioned(token, parse_version())),
        ),
        opt(preceded(':', parse_slot())),
        opt(preceded("::", parse_repository())),
    )
        .map(|(category, _, (name, version), slot, repository)| Package {
            category,
            name: name.to_string(),
            version,
            slot,
            repository,
        })
        .context(StrContext::Label("package"))
}
