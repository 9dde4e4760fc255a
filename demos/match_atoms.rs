//! Example matching Portage atoms against a small in-memory package tree

use std::convert::Infallible;

use portage_query::{Atom, Dialect, Ebuild, Package, Version};

const EBUILDS: &[&str] = &[
    "/var/db/repos/gentoo/dev-lang/python/python-2.7.18_p16-r1.ebuild",
    "/var/db/repos/gentoo/dev-lang/python/python-3.11.8_p1.ebuild",
    "/var/db/repos/gentoo/dev-lang/python/python-3.12.2.ebuild",
    "/var/db/repos/gentoo/dev-lang/python/python-3.12.3_rc1.ebuild",
    "/var/db/repos/gentoo/dev-lang/rust/rust-1.75.0-r1.ebuild",
    "/var/db/repos/gentoo/dev-lang/rust/rust-1.76.0.ebuild",
];

/// Answer a glob pattern the way a repository lister would
fn list(pattern: &str) -> Result<Vec<Package>, Infallible> {
    let packages = EBUILDS
        .iter()
        .filter_map(|path| Ebuild::parse(path).ok())
        .filter_map(|ebuild| ebuild.to_package(None, Some("gentoo")).ok())
        .collect();
    println!("   Listing: {}", pattern);
    Ok(packages)
}

fn main() {
    println!("Portage Query Examples\n");

    // Version ordering
    println!("1. Version ordering:");
    let mut versions: Vec<Version> = ["1.0_rc1", "1.0", "1.0_p1", "1.0-r2", "1.0a", "0.9.9"]
        .iter()
        .filter_map(|v| Version::parse(v).ok())
        .collect();
    versions.sort();
    for version in &versions {
        println!("   {}", version);
    }
    println!();

    // Atoms of both dialects
    println!("2. Atoms:");
    let inputs = [
        (">=dev-lang/python-3.11:3.11[sqlite]", Dialect::Dependency),
        ("!!<dev-lang/rust-1.76", Dialect::Dependency),
        ("=dev-lang/python-3.12*::gentoo", Dialect::Query),
        ("dev-lang/python-3.12", Dialect::Dependency),
    ];
    for (input, dialect) in inputs {
        match Atom::parse(input, dialect, true) {
            Ok(atom) => println!("   {} -> {} ({})", input, atom, atom.glob_pattern()),
            Err(err) => println!("   {} -> error: {}", input, err),
        }
    }
    println!();

    // Matching against the tree
    println!("3. Matching:");
    for input in [">=dev-lang/python-3.11", "~dev-lang/rust-1.75.0", "=dev-lang/python-3*"] {
        let atom = match Atom::dependency(input) {
            Ok(atom) => atom,
            Err(err) => {
                println!("   {}: {}", input, err);
                continue;
            }
        };
        match atom.list_matching(&list) {
            Ok(packages) => {
                for package in packages {
                    println!("   {} matches {}", input, package);
                }
            }
            Err(err) => match err {},
        }
    }
    println!();

    // Ebuild variables
    println!("4. Ebuild environment:");
    if let Ok(ebuild) = Ebuild::parse(EBUILDS[4]) {
        println!("   Installed at: {}", ebuild.db_dir().display());
        for (name, value) in ebuild.env() {
            println!("   {}={}", name, value);
        }
    }
}
