//! Title canonicalization and artist/song splitting.

use regex::Regex;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical regex"));
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket regex"));

/// Lower-case, replace everything outside `[a-z0-9\s]` with a space, collapse
/// whitespace runs, trim.
///
/// ```
/// use mixtape_pipeline::normalize::normalize;
///
/// assert_eq!(
///     normalize("Drake - God's Plan (Official Video)"),
///     "drake god s plan official video"
/// );
/// ```
pub fn normalize(s: &str) -> String {
    let replaced: String = s
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A raw video title split into its likely parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub artist: Option<String>,
    pub song: String,
}

impl ParsedTitle {
    /// Search text: the present parts joined with a space.
    pub fn query(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{artist} {}", self.song),
            None => self.song.clone(),
        }
    }
}

/// Split `"Artist - Song (Official Video)"` into artist and song.
///
/// `(...)` and `[...]` groups are dropped first. Only the first `-` separates
/// the artist; later segments are joined back into the song. Trailing empty
/// segments are ignored, inner and leading ones are kept, so a title that
/// starts with `-` has no artist.
pub fn parse_title_artist(raw: &str) -> ParsedTitle {
    let cleaned = PARENTHETICAL.replace_all(raw, " ");
    let cleaned = BRACKETED.replace_all(&cleaned, " ");

    let mut segments: Vec<&str> = cleaned.split('-').collect();
    while segments.last().is_some_and(|seg| seg.is_empty()) {
        segments.pop();
    }
    let segments: Vec<&str> = segments.into_iter().map(str::trim).collect();

    match segments.split_first() {
        Some((artist, rest)) if !rest.is_empty() => ParsedTitle {
            artist: Some((*artist).to_string()).filter(|a| !a.is_empty()),
            song: rest.join(" "),
        },
        _ => ParsedTitle {
            artist: None,
            song: cleaned.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(
            normalize("Drake - God's Plan (Official Video)"),
            "drake god s plan official video"
        );
        assert_eq!(normalize("  AC/DC\t\tBack   in Black "), "ac dc back in black");
    }

    #[test]
    fn normalize_handles_empty_and_symbol_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ??? ---"), "");
    }

    #[test]
    fn normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("Beyoncé - Halo"), "beyonc halo");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "",
            "Drake - God's Plan (Official Video)",
            "  MiXeD\ncase\twith   SPACES ",
            "Sigur Rós – Hoppípolla [Live]",
            "123 -- 456 // 789",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn parses_artist_and_song() {
        assert_eq!(
            parse_title_artist("Billie Eilish - bury a friend"),
            ParsedTitle {
                artist: Some("Billie Eilish".into()),
                song: "bury a friend".into(),
            }
        );
    }

    #[test]
    fn no_dash_means_no_artist() {
        assert_eq!(
            parse_title_artist("No Dash Here"),
            ParsedTitle {
                artist: None,
                song: "No Dash Here".into(),
            }
        );
    }

    #[test]
    fn annotations_are_removed_before_splitting() {
        let parsed = parse_title_artist("Daft Punk - Get Lucky (Official Audio) [HD] (feat. Pharrell)");
        assert_eq!(parsed.artist.as_deref(), Some("Daft Punk"));
        assert_eq!(parsed.song, "Get Lucky");
    }

    #[test]
    fn dash_inside_parentheses_does_not_split() {
        let parsed = parse_title_artist("Hozier (live - Dublin)");
        assert_eq!(parsed.artist, None);
        assert_eq!(parsed.song, "Hozier");
    }

    #[test]
    fn only_first_dash_separates_artist() {
        let parsed = parse_title_artist("Jay-Z - Empire State of Mind - Live");
        assert_eq!(parsed.artist.as_deref(), Some("Jay"));
        assert_eq!(parsed.song, "Z Empire State of Mind Live");
    }

    #[test]
    fn leading_dash_leaves_no_artist() {
        assert_eq!(
            parse_title_artist("- Daft Punk - Get Lucky"),
            ParsedTitle {
                artist: None,
                song: "Daft Punk Get Lucky".into(),
            }
        );
    }

    #[test]
    fn empty_inner_segment_stays_in_the_song() {
        let parsed = parse_title_artist("A - - B");
        assert_eq!(parsed.artist.as_deref(), Some("A"));
        assert_eq!(parsed.song, " B");
        assert_eq!(normalize(&parsed.song), "b");
    }

    #[test]
    fn trailing_dash_is_not_a_separator() {
        let parsed = parse_title_artist("Solo Artist -");
        assert_eq!(parsed.artist, None);
        assert_eq!(parsed.song, "Solo Artist -");
    }

    #[test]
    fn query_joins_present_parts() {
        assert_eq!(parse_title_artist("A - B").query(), "A B");
        assert_eq!(parse_title_artist("Solo").query(), "Solo");
    }
}
