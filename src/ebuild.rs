use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{EbuildErrorKind, Error, Result};
use crate::name::{is_category, is_package_name, split_versioned};
use crate::package::Package;
use crate::version::{parse_version, Version};

/// Root of the installed-package database
pub const VDB_PATH: &str = "/var/db/pkg";

const EBUILD_EXTENSION: &str = ".ebuild";

/// Where an ebuild file lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EbuildLocation {
    /// A repository checkout, rooted at the given directory
    /// (`/var/db/repos/gentoo`, `/usr/portage`, an overlay, ...).
    Repository(PathBuf),
    /// The copy kept in the installed-package database.
    Installed,
}

/// An ebuild file identified by its path
///
/// Two layouts are recognised:
///
/// - `<repository>/<category>/<package>/<package>-<version>.ebuild`
/// - `/var/db/pkg/<category>/<package>-<version>/<file>.ebuild`
///
/// Only the path is inspected; the file is never read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ebuild {
    category: String,
    package: String,
    version: Version,
    // As written in the file name; the installed-package directory and the
    // ebuild variables keep the original spelling.
    version_text: String,
    location: EbuildLocation,
    path: PathBuf,
}

impl Ebuild {
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = path
            .to_str()
            .ok_or_else(|| Error::ebuild(path.to_string_lossy(), EbuildErrorKind::Malformed))?;

        let ebuild = match text.strip_prefix(VDB_PATH).and_then(|r| r.strip_prefix('/')) {
            Some(entry) => Self::parse_installed(text, entry),
            None => Self::parse_repository(text),
        };
        ebuild.inspect_err(|err| tracing::debug!(path = text, code = err.code(), "rejected ebuild"))
    }

    /// `<category>/<package>-<version>/<file>.ebuild`, below [`VDB_PATH`]
    fn parse_installed(raw: &str, entry: &str) -> Result<Self> {
        let malformed = || Error::ebuild(raw, EbuildErrorKind::Malformed);

        let (category, rest) = entry.split_once('/').ok_or_else(malformed)?;
        let (dir, file) = rest.split_once('/').ok_or_else(malformed)?;
        if !is_category(category) || !file.ends_with(EBUILD_EXTENSION) {
            return Err(malformed());
        }
        let (package, version) = split_versioned(dir, parse_version()).ok_or_else(malformed)?;

        Ok(Ebuild {
            category: category.to_string(),
            package: package.to_string(),
            version,
            version_text: dir[package.len() + 1..].to_string(),
            location: EbuildLocation::Installed,
            path: PathBuf::from(raw),
        })
    }

    /// `<repository>/<category>/<package>/<package>-<version>.ebuild`
    fn parse_repository(raw: &str) -> Result<Self> {
        let malformed = || Error::ebuild(raw, EbuildErrorKind::Malformed);

        let stem = raw.strip_suffix(EBUILD_EXTENSION).ok_or_else(malformed)?;
        let mut segments = stem.rsplitn(4, '/');
        let (Some(file), Some(dir), Some(category), Some(location)) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(malformed());
        };
        // The repository must be an absolute, non-root directory
        if location.len() < 2 || !location.starts_with('/') {
            return Err(malformed());
        }
        if !is_category(category) || !is_package_name(dir) {
            return Err(malformed());
        }
        let (package, version) = split_versioned(file, parse_version()).ok_or_else(malformed)?;
        if package != dir {
            return Err(Error::ebuild(raw, EbuildErrorKind::PackageNameMismatch));
        }

        Ok(Ebuild {
            category: category.to_string(),
            package: package.to_string(),
            version,
            version_text: file[package.len() + 1..].to_string(),
            location: EbuildLocation::Repository(PathBuf::from(location)),
            path: PathBuf::from(raw),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn location(&self) -> &EbuildLocation {
        &self.location
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory of this package in the installed-package database
    pub fn db_dir(&self) -> PathBuf {
        Path::new(VDB_PATH)
            .join(&self.category)
            .join(format!("{}-{}", self.package, self.version_text))
    }

    /// Read-only variables the package manager defines for this ebuild
    ///
    /// `P`, `PN`, `PV`, `PR`, `PVR`, `PF` and `CATEGORY`.
    pub fn env(&self) -> BTreeMap<&'static str, String> {
        let (upstream, revision) = match self.version_text.rsplit_once("-r") {
            Some((upstream, revision)) => (upstream, revision),
            None => (self.version_text.as_str(), "0"),
        };

        BTreeMap::from([
            ("P", format!("{}-{}", self.package, upstream)),
            ("PN", self.package.clone()),
            ("PV", upstream.to_string()),
            ("PR", format!("r{}", revision)),
            ("PVR", self.version_text.clone()),
            ("PF", format!("{}-{}", self.package, self.version_text)),
            ("CATEGORY", self.category.clone()),
        ])
    }

    /// Package identity of this ebuild, for [`Atom::matches`](crate::Atom::matches)
    ///
    /// The slot and repository name are not part of the path; pass them when
    /// known (`SLOT` from the ebuild, the repository's `repo_name`).
    pub fn to_package(&self, slot: Option<&str>, repository: Option<&str>) -> Result<Package> {
        let mut package = Package {
            category: self.category.clone(),
            name: self.package.clone(),
            version: self.version.clone(),
            slot: None,
            repository: None,
        };
        if let Some(slot) = slot {
            package = package.with_slot(slot)?;
        }
        if let Some(repository) = repository {
            package = package.with_repository(repository)?;
        }
        Ok(package)
    }
}

impl fmt::Display for Ebuild {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}-{}", self.category, self.package, self.version_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{Atom, Dialect};

    #[test]
    fn test_valid_ebuilds() {
        let paths = [
            "/repo/cat-name/pkg/pkg-1.9.ebuild",
            "/dir/cat-name/pkg/pkg-1.9.ebuild",
            "/another/dir/cat-name/pkg/pkg-1.9.ebuild",
            "/usr/portage/cat/pkg/pkg-1.9.ebuild",
            "/usr/portage/cat/pkg/pkg-1.9.5z_pre05_alpha12_beta5_pre10-r99.ebuild",
            "/usr/portage/cat-name/nopkg/nopkg-1.9.ebuild",
            "/usr/portage/cat/no-pkg/no-pkg-1.9.ebuild",
            "/this/is/certainly/a/valid/valid-0.ebuild",
            "/this/is/certainly/a/valid/valid-9999.ebuild",
            "/this/is/certainly/a/valid/valid-99999z.ebuild",
            "/usr/portage/virtual/pi/pi-3.14-r1.ebuild",
            "/usr/portage/x11-wm/qtile/qtile-3.14-r1.ebuild",
            "/usr/portage/dev-lang/python/python-3.4.0_pre2-r1.ebuild",
            "/usr/portage/dev-lang/python/python-3.5.0.ebuild",
            "/var/overlay/dev-lang/python/python-3.5.0.ebuild",
            "/home/me/path/to/my overlay/dev-lang/python/python-3.5.0.ebuild",
            "/usr/potage/dev-lang/python/python-3.5.0.ebuild",
        ];
        for path in paths {
            assert!(Ebuild::parse(path).is_ok(), "{}", path);
        }

        let path = PathBuf::from("/home/me/path/to/my overlay/dev-lang/python/python-3.5.0.ebuild");
        let ebuild = Ebuild::parse(&path).unwrap();
        assert_eq!(ebuild.path(), path);
        assert_eq!(
            ebuild.location(),
            &EbuildLocation::Repository(PathBuf::from("/home/me/path/to/my overlay"))
        );
    }

    #[test]
    fn test_invalid_ebuilds() {
        let paths = [
            "/cat-name/pkg/pkg-1.9.ebuild",
            "dir/cat-name/pkg/pkg-1.9.ebuild",
            "another/dir/cat-name/pkg/pkg-1.9.ebuild",
            "/usr/portage/cat/pkg-1.9.ebuild",
            "usr/portage/cat/pkg/pkg-1.9.ebuild",
            "/usr/portage/cat/pkg/nopkg-1.9.ebuild",
            "this is certainly not a valid ebuild",
            "this is certainly not a valid.ebuild",
            "/usr/portage/virtual/pkg/3.14-r1.ebuild",
            "/usr/portage/x11-wm/qtile/qtile3.14-r1.ebuild",
            "/usr/portage/dev-lang/python/python-3.4.0_pre2-r1:3.4.ebuild",
            "/usr/portage/dev-lang/python/python-3.5.0",
            "/usr/portage/dev-lang/python/python-3.5.0.sh",
            "/usr/portage/dev-lang/python/python-3.5.0..ebuild",
            "/usr/portage/dev-lang/python/python.ebuild",
            "/usr/portage/dev-lang/python/python-.ebuild",
            "/usr/portage/cat/pkg/pkg-1.9.5B_pre05_alpha12_beta5_pre10-r99.ebuild",
        ];
        for path in paths {
            assert!(Ebuild::parse(path).is_err(), "{}", path);
        }
    }

    #[test]
    fn test_error_kinds() {
        let err = Ebuild::parse("/usr/portage/cat/pkg/nopkg-1.9.ebuild").unwrap_err();
        assert_eq!(err.code(), "package_name_mismatch");
        assert_eq!(err.raw(), "/usr/portage/cat/pkg/nopkg-1.9.ebuild");

        let err = Ebuild::parse("/usr/portage/dev-lang/python/python.ebuild").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEbuild {
                kind: EbuildErrorKind::Malformed,
                ..
            }
        ));
    }

    #[test]
    fn test_versions() {
        let cases = [
            ("/repo/cat/pkg/pkg-0.12.3.ebuild", "0.12.3"),
            ("/repo/cat/pkg/pkg-3.14_pre5-r1.ebuild", "3.14_pre5-r1"),
            ("/repo/cat/pkg/pkg-5.ebuild", "5"),
            ("/repo/cat/pkg-a/pkg-a-4.4.00c_p2_pre5-r10.ebuild", "4.4.00c_p2_pre5-r10"),
        ];
        for (path, version) in cases {
            let ebuild = Ebuild::parse(path).unwrap();
            assert_eq!(ebuild.version(), &Version::parse(version).unwrap(), "{}", path);
        }

        let ebuild = Ebuild::parse("/repo/cat/pkg-a/pkg-a-4.4.00c_p2_pre5-r10.ebuild").unwrap();
        assert_eq!(ebuild.package(), "pkg-a");
        assert_eq!(ebuild.category(), "cat");
        assert_eq!(ebuild.to_string(), "cat/pkg-a-4.4.00c_p2_pre5-r10");
    }

    #[test]
    fn test_db_dir() {
        let cases = [
            (
                "/usr/portage/sys-apps/portage/portage-2.3.8.ebuild",
                "/var/db/pkg/sys-apps/portage-2.3.8",
            ),
            (
                "/usr/portage/foo-bar/foobar/foobar-3.15-r11.ebuild",
                "/var/db/pkg/foo-bar/foobar-3.15-r11",
            ),
            (
                "/var/overlays/toto/dev-db/postgresql/postgresql-10_beta3.ebuild",
                "/var/db/pkg/dev-db/postgresql-10_beta3",
            ),
            ("/toto/dev-libs/clang/clang-9.ebuild", "/var/db/pkg/dev-libs/clang-9"),
        ];
        for (path, db_dir) in cases {
            assert_eq!(Ebuild::parse(path).unwrap().db_dir(), PathBuf::from(db_dir));
        }
    }

    #[test]
    fn test_installed_ebuilds() {
        let ebuild = Ebuild::parse("/var/db/pkg/dev-lang/python-3.11.8-r2/python-3.11.8-r2.ebuild")
            .unwrap();
        assert_eq!(ebuild.location(), &EbuildLocation::Installed);
        assert_eq!(ebuild.category(), "dev-lang");
        assert_eq!(ebuild.package(), "python");
        assert_eq!(ebuild.version(), &Version::parse("3.11.8-r2").unwrap());
        assert_eq!(
            ebuild.db_dir(),
            PathBuf::from("/var/db/pkg/dev-lang/python-3.11.8-r2")
        );

        assert!(Ebuild::parse("/var/db/pkg/dev-lang/python/python-3.11.8.ebuild").is_err());
        assert!(Ebuild::parse("/var/db/pkg/dev-lang/python-3.11.8/environment.bz2").is_err());
        assert!(Ebuild::parse("/var/db/pkg/dev-lang/python-3.11.8").is_err());
    }

    #[test]
    fn test_env() {
        let ebuild = Ebuild::parse("/repo/cat/pkg/pkg-3.14_pre5-r1.ebuild").unwrap();
        let env = ebuild.env();
        assert_eq!(env["P"], "pkg-3.14_pre5");
        assert_eq!(env["PN"], "pkg");
        assert_eq!(env["PV"], "3.14_pre5");
        assert_eq!(env["PR"], "r1");
        assert_eq!(env["PVR"], "3.14_pre5-r1");
        assert_eq!(env["PF"], "pkg-3.14_pre5-r1");
        assert_eq!(env["CATEGORY"], "cat");
        assert_eq!(env.len(), 7);

        let env = Ebuild::parse("/repo/cat/pkg/pkg-05.10.ebuild").unwrap().env();
        assert_eq!(env["PV"], "05.10");
        assert_eq!(env["PR"], "r0");
        assert_eq!(env["PVR"], "05.10");
    }

    #[test]
    fn test_to_package_matches_atoms() {
        let matches = [
            (
                "/repo/cat/pkg/pkg-0.1.0_pre0-r1.ebuild",
                &["cat/pkg", "=cat/pkg-0.1.0_pre0-r1", "~cat/pkg-0.1.0_pre0", "pkg", ">=pkg-0.1", "<pkg-0.1.0"][..],
            ),
            (
                "/usr/portage/dev-lang/python/python-3.5.2.ebuild",
                &["dev-lang/python", "<=dev-lang/python-4", "~dev-lang/python-3.5.2", ">python-3.5.0", "=python-3*"][..],
            ),
        ];
        for (path, atoms) in matches {
            let package = Ebuild::parse(path).unwrap().to_package(None, None).unwrap();
            for atom in atoms {
                let atom = Atom::parse(atom, Dialect::Dependency, false).unwrap();
                assert!(atom.matches(&package), "{} {}", path, atom);
            }
        }

        let unmatches = [
            (
                "/my/overlay/cat/pkg/pkg-1.2.3_p3-r5.ebuild",
                &["cat/package", "=category/pkg-1.2.3_p3-r5", "~cat/pkg-0.1.0_pre0", "pack", "<=pkg-1.2.3", ">cat/pkg-1.2.3_p3-r5"][..],
            ),
            (
                "/home/tony/Funtoo/Workspace/sapher-overlay/dev-lang/python/python-2.7.10-r1.ebuild",
                &["dev-python/python", "dev-lang/haskell", "~dev-lang/python-3.5.2", ">=python-3", "=dev-lang/python-3*"][..],
            ),
        ];
        for (path, atoms) in unmatches {
            let package = Ebuild::parse(path).unwrap().to_package(None, None).unwrap();
            for atom in atoms {
                let atom = Atom::parse(atom, Dialect::Dependency, false).unwrap();
                assert!(!atom.matches(&package), "{} {}", path, atom);
            }
        }
    }

    #[test]
    fn test_to_package_with_slot_and_repository() {
        let ebuild = Ebuild::parse("/var/db/repos/gentoo/dev-lang/python/python-3.4.5.ebuild").unwrap();
        let package = ebuild.to_package(Some("3.4/3.4m"), Some("gentoo")).unwrap();
        assert_eq!(package.to_string(), "dev-lang/python-3.4.5:3.4/3.4m::gentoo");

        let atom = Atom::query("dev-lang/python:3.4::gentoo").unwrap();
        assert!(atom.matches(&package));

        assert!(ebuild.to_package(Some(""), None).is_err());
        assert!(ebuild.to_package(None, Some("bad repo")).is_err());
    }
}
