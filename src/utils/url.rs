use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::InputError;
use crate::types::{Repo, MAX_REPOSITORIES};

static GITHUB_REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/([^/?#\s]+)/([^/?#\s]+)$").expect("valid regex")
});

/// Parse newline-separated GitHub repository URLs.
///
/// Blank lines are skipped and surrounding whitespace is trimmed. The first
/// line that is not exactly `https://github.com/<owner>/<repo>` aborts the
/// whole parse, so callers never see a partial result.
pub fn parse_github_urls(text: &str) -> Result<Vec<Repo>, InputError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            GITHUB_REPO_URL
                .captures(line)
                .map(|caps| Repo::new(&caps[1], &caps[2]))
                .ok_or_else(|| InputError::InvalidUrl(line.to_string()))
        })
        .collect()
}

/// Decide which parsed repositories can join the active list.
///
/// Returns the repositories to append, in input order. Repositories already
/// present (or repeated within `candidates`) are skipped; an addition that
/// would push the list past [`MAX_REPOSITORIES`] is rejected as a whole.
pub fn plan_addition(existing: &[Repo], candidates: Vec<Repo>) -> Result<Vec<Repo>, InputError> {
    if candidates.is_empty() {
        return Err(InputError::NoValidUrls);
    }

    let mut seen: HashSet<String> = existing.iter().map(Repo::key).collect();
    let fresh: Vec<Repo> = candidates
        .into_iter()
        .filter(|repo| seen.insert(repo.key()))
        .collect();

    if fresh.is_empty() {
        return Err(InputError::AllDuplicates);
    }
    if existing.len() + fresh.len() > MAX_REPOSITORIES {
        return Err(InputError::CapacityExceeded);
    }
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered(count: usize) -> Vec<Repo> {
        (0..count).map(|i| Repo::new("owner", format!("repo{i}"))).collect()
    }

    #[test]
    fn test_parse_valid_lines_in_order() {
        let text = "https://github.com/foo/bar\n  https://github.com/rust-lang/rust  \r\nhttps://github.com/foo/bar\n";
        let repos = parse_github_urls(text).unwrap();
        assert_eq!(
            repos,
            vec![
                Repo::new("foo", "bar"),
                Repo::new("rust-lang", "rust"),
                Repo::new("foo", "bar"),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_whole_input_on_bad_line() {
        let result = parse_github_urls("https://github.com/foo/bar\nnot-a-url");
        assert_eq!(result, Err(InputError::InvalidUrl("not-a-url".to_string())));
    }

    #[test]
    fn test_parse_reports_first_bad_line() {
        let text = "https://github.com/a/b\nhttps://github.com/a\nhttp://github.com/a/b";
        assert_eq!(
            parse_github_urls(text),
            Err(InputError::InvalidUrl("https://github.com/a".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_extra_segments() {
        for line in [
            "https://github.com/foo/bar/",
            "https://github.com/foo/bar/tree/main",
            "https://github.com/foo/bar?tab=readme",
            "https://github.com/foo/bar#readme",
            "https://github.com//bar",
            "https://gitlab.com/foo/bar",
            "https://github.com/foo bar/baz",
        ] {
            assert!(parse_github_urls(line).is_err(), "accepted {line}");
        }
    }

    #[test]
    fn test_parse_rejects_space_inside_segment() {
        assert_eq!(
            parse_github_urls("https://github.com/foo/bar\nhttps://github.com/foo bar/baz"),
            Err(InputError::InvalidUrl("https://github.com/foo bar/baz".to_string()))
        );
    }

    #[test]
    fn test_parse_blank_input() {
        assert_eq!(parse_github_urls("  \n\n \r\n"), Ok(vec![]));
    }

    #[test]
    fn test_plan_addition_skips_existing() {
        let existing = vec![Repo::new("foo", "bar")];
        let candidates = vec![Repo::new("foo", "bar"), Repo::new("foo", "baz")];
        assert_eq!(
            plan_addition(&existing, candidates),
            Ok(vec![Repo::new("foo", "baz")])
        );
    }

    #[test]
    fn test_plan_addition_collapses_repeats_within_input() {
        let candidates = vec![Repo::new("foo", "bar"), Repo::new("foo", "bar")];
        assert_eq!(plan_addition(&[], candidates), Ok(vec![Repo::new("foo", "bar")]));
    }

    #[test]
    fn test_plan_addition_errors() {
        assert_eq!(plan_addition(&[], vec![]), Err(InputError::NoValidUrls));

        let existing = vec![Repo::new("foo", "bar")];
        assert_eq!(
            plan_addition(&existing, vec![Repo::new("foo", "bar")]),
            Err(InputError::AllDuplicates)
        );
    }

    #[test]
    fn test_plan_addition_capacity_is_all_or_nothing() {
        let existing = numbered(28);
        let candidates = vec![
            Repo::new("x", "1"),
            Repo::new("x", "2"),
            Repo::new("x", "3"),
        ];
        assert_eq!(
            plan_addition(&existing, candidates.clone()),
            Err(InputError::CapacityExceeded)
        );
        assert_eq!(
            plan_addition(&existing, candidates[..2].to_vec()).map(|r| r.len()),
            Ok(2)
        );
    }
}
