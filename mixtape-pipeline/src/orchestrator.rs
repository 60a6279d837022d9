//! Articles in, new track URIs out.

use crate::comments::collect_bodies;
use crate::links::LinkExtractor;
use crate::matcher::{CatalogMatcher, MatchSettings};
use crate::traits::{CatalogSearch, CommentSource, TitleResolver};
use mixtape_common::{Article, ExtractedLink, ResolveOutcome, TrackUri};
use std::collections::HashSet;

/// Knobs fixed at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineSettings {
    pub matching: MatchSettings,
    /// Also report finds that are already in the playlist.
    pub show_all_matches: bool,
}

/// Something the run noticed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    DirectTrack {
        uri: TrackUri,
        already_present: bool,
    },
    VideoMatched {
        video_id: String,
        title: String,
        uri: TrackUri,
        already_present: bool,
    },
    VideoUnmatched {
        video_id: String,
        title: String,
    },
    VideoUnresolved {
        video_id: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// New URIs in first-seen order, none already in the playlist.
    pub uris: Vec<TrackUri>,
    pub events: Vec<MatchEvent>,
}

enum Admission {
    New,
    AlreadyPresent,
    Duplicate,
}

struct Collector<'e> {
    existing: &'e HashSet<TrackUri>,
    emitted: HashSet<TrackUri>,
    report: PipelineReport,
}

impl<'e> Collector<'e> {
    fn new(existing: &'e HashSet<TrackUri>) -> Self {
        Self {
            existing,
            emitted: HashSet::new(),
            report: PipelineReport::default(),
        }
    }

    fn admit(&mut self, uri: &TrackUri) -> Admission {
        if self.existing.contains(uri) {
            Admission::AlreadyPresent
        } else if self.emitted.insert(uri.clone()) {
            self.report.uris.push(uri.clone());
            Admission::New
        } else {
            Admission::Duplicate
        }
    }
}

/// Walks each article's comments and turns links into playlist candidates.
///
/// Every collaborator call is awaited before the next one starts.
pub struct Pipeline<'a> {
    comments: &'a dyn CommentSource,
    resolver: &'a dyn TitleResolver,
    matcher: CatalogMatcher<'a>,
    extractor: &'a LinkExtractor,
    show_all_matches: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        comments: &'a dyn CommentSource,
        resolver: &'a dyn TitleResolver,
        catalog: &'a dyn CatalogSearch,
        extractor: &'a LinkExtractor,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            comments,
            resolver,
            matcher: CatalogMatcher::new(catalog, settings.matching),
            extractor,
            show_all_matches: settings.show_all_matches,
        }
    }

    pub async fn run(&self, articles: &[Article], existing: &HashSet<TrackUri>) -> PipelineReport {
        let mut collector = Collector::new(existing);

        for article in articles {
            let forest = self.comments.fetch_comment_tree(article.id).await;
            let bodies = collect_bodies(Some(forest.as_slice()));
            tracing::debug!(
                article_id = article.id,
                comments = bodies.len(),
                "pipeline.article"
            );
            for html in bodies {
                for link in self.extractor.extract(html) {
                    match link {
                        ExtractedLink::DirectTrack(id) => self.handle_direct_track(&id, &mut collector),
                        ExtractedLink::Video(id) => self.handle_video(&id, &mut collector).await,
                    }
                }
            }
        }

        collector.report
    }

    fn handle_direct_track(&self, track_id: &str, collector: &mut Collector<'_>) {
        let uri = TrackUri::from_track_id(track_id);
        match collector.admit(&uri) {
            Admission::New => {
                tracing::info!(%uri, "Found Spotify track");
                collector.report.events.push(MatchEvent::DirectTrack {
                    uri,
                    already_present: false,
                });
            }
            Admission::AlreadyPresent if self.show_all_matches => {
                tracing::info!(%uri, "Found Spotify track (already in playlist)");
                collector.report.events.push(MatchEvent::DirectTrack {
                    uri,
                    already_present: true,
                });
            }
            Admission::AlreadyPresent => {}
            Admission::Duplicate => {
                tracing::debug!(%uri, "track already collected this run");
            }
        }
    }

    async fn handle_video(&self, video_id: &str, collector: &mut Collector<'_>) {
        let title = match self.resolver.resolve_title(video_id).await {
            ResolveOutcome::Found(title) => title,
            ResolveOutcome::NotFound => {
                tracing::debug!(video_id, "video title not found");
                collector.report.events.push(MatchEvent::VideoUnresolved {
                    video_id: video_id.to_string(),
                });
                return;
            }
            ResolveOutcome::TransientFailure(reason) => {
                tracing::warn!(video_id, %reason, "video title lookup failed");
                collector.report.events.push(MatchEvent::VideoUnresolved {
                    video_id: video_id.to_string(),
                });
                return;
            }
        };
        tracing::info!(video_id, %title, "YouTube video");

        let Some(uri) = self.matcher.match_track(&title).await else {
            tracing::info!(video_id, %title, "No Spotify match found");
            collector.report.events.push(MatchEvent::VideoUnmatched {
                video_id: video_id.to_string(),
                title,
            });
            return;
        };

        match collector.admit(&uri) {
            Admission::New => {
                tracing::info!(video_id, %uri, "Matched Spotify track");
                collector.report.events.push(MatchEvent::VideoMatched {
                    video_id: video_id.to_string(),
                    title,
                    uri,
                    already_present: false,
                });
            }
            Admission::AlreadyPresent if self.show_all_matches => {
                tracing::info!(video_id, %uri, "Matched Spotify track (already in playlist)");
                collector.report.events.push(MatchEvent::VideoMatched {
                    video_id: video_id.to_string(),
                    title,
                    uri,
                    already_present: true,
                });
            }
            Admission::AlreadyPresent => {}
            Admission::Duplicate => {
                tracing::debug!(video_id, %uri, "track already collected this run");
            }
        }
    }
}
