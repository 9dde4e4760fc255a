use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

/// Category name: one or two dash-joined runs of `[a-z0-9]`
/// (`virtual`, `dev-lang`, `x11-libs`)
pub(crate) fn is_category(s: &str) -> bool {
    let runs: Vec<&str> = s.split('-').collect();
    runs.len() <= 2
        && runs.iter().all(|run| {
            !run.is_empty()
                && run
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn is_package_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '_' || c == '-'
}

/// Package name: `[A-Za-z0-9+_-]+`
pub(crate) fn is_package_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_package_char)
}

fn is_repository_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Repository name: `[A-Za-z0-9_-]+`
pub(crate) fn is_repository_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_repository_char)
}

/// Split `name-version` at the earliest dash that leaves a valid package name
/// on the left and a complete `tail` on the right
///
/// Package names may contain dashes and digits (`pkg-a-4.4`, `font-3dfx-1.0`),
/// so every dash is a candidate boundary.
pub(crate) fn split_versioned<'s, O, P>(token: &'s str, mut tail: P) -> Option<(&'s str, O)>
where
    P: Parser<&'s str, O, ErrMode<ContextError>>,
{
    token.match_indices('-').find_map(|(i, _)| {
        let package = &token[..i];
        if !is_package_name(package) {
            return None;
        }
        tail.parse(&token[i + 1..]).ok().map(|out| (package, out))
    })
}

// Winnow parsers

/// Parse category name
pub(crate) fn parse_category<'s>() -> impl Parser<&'s str, String, ErrMode<ContextError>> {
    take_while(1.., |c: char| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
    })
    .verify(|s: &str| is_category(s))
    .map(|s: &str| s.to_string())
    .context(StrContext::Label("category"))
}

/// Parse repository name
pub(crate) fn parse_repository<'s>() -> impl Parser<&'s str, String, ErrMode<ContextError>> {
    take_while(1.., is_repository_char)
        .map(|s: &str| s.to_string())
        .context(StrContext::Label("repository"))
}
