//! Picking a catalog track for a noisy video title.
//!
//! Each search result earns points when its artists overlap the parsed artist
//! and when its name overlaps the parsed song (overlap meaning either string
//! contains the other, after [`normalize`]). A result also earns a bonus when
//! its name contains the first two words of the song. The highest score wins,
//! earliest result on ties, and nothing below the acceptance threshold is
//! returned.

use crate::normalize::{normalize, parse_title_artist, ParsedTitle};
use crate::traits::CatalogSearch;
use mixtape_common::{MatchCandidate, ScoredCandidate, TrackUri};

/// Scoring weights and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub search_limit: usize,
    pub acceptance_threshold: u32,
    pub artist_weight: u32,
    pub title_weight: u32,
    pub partial_title_bonus: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            search_limit: 5,
            acceptance_threshold: 2,
            artist_weight: 2,
            title_weight: 2,
            partial_title_bonus: 1,
        }
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Score one candidate against already-normalized targets.
pub fn score_candidate(
    target_artist: &str,
    target_song: &str,
    candidate: &MatchCandidate,
    settings: &MatchSettings,
) -> u32 {
    let name = normalize(&candidate.name);

    let artist_score = if !target_artist.is_empty()
        && candidate
            .artists
            .iter()
            .map(|a| normalize(a))
            .any(|a| overlaps(&a, target_artist))
    {
        settings.artist_weight
    } else {
        0
    };

    let mut title_score = 0;
    if !target_song.is_empty() {
        if overlaps(&name, target_song) {
            title_score += settings.title_weight;
        }
        let partial = target_song
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ");
        if !partial.is_empty() && name.contains(&partial) {
            title_score += settings.partial_title_bonus;
        }
    }

    artist_score + title_score
}

/// Score every candidate, keeping the catalog's order.
pub fn score_candidates(
    parsed: &ParsedTitle,
    candidates: Vec<MatchCandidate>,
    settings: &MatchSettings,
) -> Vec<ScoredCandidate> {
    let target_artist = normalize(parsed.artist.as_deref().unwrap_or(""));
    let target_song = normalize(&parsed.song);
    candidates
        .into_iter()
        .map(|candidate| ScoredCandidate {
            score: score_candidate(&target_artist, &target_song, &candidate, settings),
            candidate,
        })
        .collect()
}

/// Highest score, first one on ties, or `None` if it falls short of the threshold.
pub fn select_best(scored: Vec<ScoredCandidate>, threshold: u32) -> Option<ScoredCandidate> {
    let best = scored.into_iter().fold(None, |best: Option<ScoredCandidate>, next| match best {
        Some(b) if b.score >= next.score => Some(b),
        _ => Some(next),
    })?;
    (best.score >= threshold).then_some(best)
}

/// Matches video titles against a [`CatalogSearch`].
pub struct CatalogMatcher<'a> {
    search: &'a dyn CatalogSearch,
    settings: MatchSettings,
}

impl<'a> CatalogMatcher<'a> {
    pub fn new(search: &'a dyn CatalogSearch, settings: MatchSettings) -> Self {
        Self { search, settings }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Best catalog URI for a raw title. Search failures are logged and
    /// treated as "no match".
    pub async fn match_track(&self, raw_title: &str) -> Option<TrackUri> {
        let parsed = parse_title_artist(raw_title);
        let query = parsed.query();

        let candidates = match self
            .search
            .search_tracks(&query, self.settings.search_limit)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(title = %raw_title, %query, error = %e, "catalog search failed");
                return None;
            }
        };
        if candidates.is_empty() {
            tracing::debug!(%query, "catalog search returned no tracks");
            return None;
        }

        let scored = score_candidates(&parsed, candidates, &self.settings);
        for s in &scored {
            tracing::trace!(
                uri = %s.candidate.uri,
                name = %s.candidate.name,
                score = s.score,
                "match.candidate"
            );
        }

        let best = select_best(scored, self.settings.acceptance_threshold)?;
        tracing::debug!(%query, uri = %best.candidate.uri, score = best.score, "match.accepted");
        Some(best.candidate.uri)
    }
}
