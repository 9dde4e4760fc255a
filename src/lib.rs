//! Portage version ordering, atom parsing and package matching
//!
//! This crate interprets the textual conventions of a Gentoo/Portage package
//! repository: version strings, dependency and query atoms, and ebuild paths.
//! It decides whether a package revision satisfies an atom and derives the
//! glob pattern a caller can use to find candidate ebuilds. It does no I/O;
//! listing files is delegated to a [`PackageSource`].
//!
//! # Examples
//!
//! Compare versions:
//! ```
//! use portage_query::Version;
//!
//! let a = Version::parse("1.2.3_pre5-r1").unwrap();
//! let b = Version::parse("1.2.3").unwrap();
//! assert!(a < b);
//! assert_eq!(Version::parse("5.0").unwrap(), Version::parse("05.00").unwrap());
//! ```
//!
//! Parse atoms in either dialect:
//! ```
//! use portage_query::{Atom, Blocker, Dialect, Selector};
//!
//! let atom = Atom::dependency("!!>=dev-lang/python-3.4:3.4/3.4m[sqlite]").unwrap();
//! assert_eq!(atom.blocker(), Some(Blocker::Strong));
//! assert_eq!(atom.selector(), Some(Selector::GreaterOrEqual));
//! assert_eq!(atom.package(), "python");
//!
//! let atom = Atom::parse("=python-3*::gentoo", Dialect::Query, false).unwrap();
//! assert!(atom.is_wildcard());
//! assert_eq!(atom.repository(), Some("gentoo"));
//!
//! let err = Atom::dependency("dev-lang/python-3.4").unwrap_err();
//! assert_eq!(err.code(), "missing_selector");
//! ```
//!
//! Match packages:
//! ```
//! use portage_query::{Atom, Package};
//!
//! let atom = Atom::dependency("~dev-lang/python-3.5.2").unwrap();
//! assert!(atom.matches(&Package::parse("dev-lang/python-3.5.2-r1").unwrap()));
//! assert!(!atom.matches(&Package::parse("dev-lang/python-3.5.3").unwrap()));
//! assert_eq!(atom.glob_pattern(), "dev-lang/python/python-3.5.2*.ebuild");
//! ```
//!
//! Work from an ebuild path:
//! ```
//! use portage_query::Ebuild;
//!
//! let ebuild = Ebuild::parse("/var/db/repos/gentoo/sys-apps/portage/portage-2.3.8.ebuild").unwrap();
//! assert_eq!(ebuild.db_dir().to_str(), Some("/var/db/pkg/sys-apps/portage-2.3.8"));
//! assert_eq!(ebuild.env()["PF"], "portage-2.3.8");
//! ```

mod atom;
mod ebuild;
mod error;
mod glob;
mod name;
mod package;
mod slot;
mod use_dep;
mod version;

// Re-export main types
pub use atom::{Atom, Blocker, Dialect, Extension, Selector, VersionConstraint};
pub use ebuild::{Ebuild, EbuildLocation, VDB_PATH};
pub use error::{AtomErrorKind, EbuildErrorKind, Error, Result, VersionErrorKind};
pub use glob::PackageSource;
pub use package::Package;
pub use slot::{Slot, SlotDep, SlotOperator};
pub use use_dep::{UseCondition, UseDefault, UseDep, UseDepKind, UseSign};
pub use version::{Component, Number, Revision, Suffix, SuffixKind, Version};
