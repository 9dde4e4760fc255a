use crate::atom::{Atom, Selector};
use crate::package::Package;

/// Lists the packages whose ebuild paths match a glob pattern
///
/// The crate never touches the filesystem itself; callers implement this for
/// a repository tree, the installed-package database or an in-memory index.
/// Any `Fn(&str) -> Result<Vec<Package>, E>` is a source.
pub trait PackageSource {
    type Error;

    /// Packages whose ebuild path matches `pattern`
    ///
    /// Patterns have the shape `category/package/package-version.ebuild`,
    /// relative to the repository root, with `*` wildcards.
    fn list(&self, pattern: &str) -> Result<Vec<Package>, Self::Error>;
}

impl<F, E> PackageSource for F
where
    F: Fn(&str) -> Result<Vec<Package>, E>,
{
    type Error = E;

    fn list(&self, pattern: &str) -> Result<Vec<Package>, E> {
        self(pattern)
    }
}

impl Atom {
    /// Version part of [`glob_pattern`](Self::glob_pattern), built from the
    /// version as written in the atom
    pub fn version_glob_pattern(&self) -> String {
        match self.constraint() {
            None => "*".to_string(),
            Some(c) if c.selector.is_range() => "*".to_string(),
            Some(c) if c.wildcard || c.selector == Selector::Approximate => {
                format!("{}*", c.version_text())
            }
            Some(c) => c.version_text().to_string(),
        }
    }

    /// Glob pattern covering the ebuild paths of every package this atom
    /// matches
    ///
    /// The pattern over-approximates: `>=cat/pkg-2` yields
    /// `cat/pkg/pkg-*.ebuild`, so candidates still have to go through
    /// [`matches`](Self::matches).
    pub fn glob_pattern(&self) -> String {
        format!(
            "{}/{}/{}-{}.ebuild",
            self.category().unwrap_or("*"),
            self.package(),
            self.package(),
            self.version_glob_pattern()
        )
    }

    /// Packages from `source` that satisfy this atom
    pub fn list_matching<S: PackageSource>(&self, source: &S) -> Result<Vec<Package>, S::Error> {
        let pattern = self.glob_pattern();
        let candidates = source.list(&pattern)?;
        let total = candidates.len();
        let matching: Vec<Package> = candidates
            .into_iter()
            .filter(|package| self.matches(package))
            .collect();
        tracing::debug!(
            atom = self.as_str(),
            %pattern,
            candidates = total,
            matching = matching.len(),
            "listed packages"
        );
        Ok(matching)
    }

    /// Whether `source` holds at least one package satisfying this atom
    pub fn matches_any<S: PackageSource>(&self, source: &S) -> Result<bool, S::Error> {
        let candidates = source.list(&self.glob_pattern())?;
        Ok(candidates.iter().any(|package| self.matches(package)))
    }
}
