use crate::catalog::Metric;
use crate::models::{PageMetrics, Recommendation, RecommendationKind};

pub const TITLE_MIN_CHARS: usize = 50;
pub const TITLE_MAX_CHARS: usize = 60;
pub const META_DESCRIPTION_MIN_CHARS: usize = 50;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;
pub const MIN_WORD_COUNT: usize = 300;
pub const MIN_LINK_COUNT: usize = 20;
pub const MAX_LINK_COUNT: usize = 500;
pub const MAX_LOAD_TIME_SECS: f64 = 2.0;

pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Evaluates every threshold in a fixed order: title, meta description,
    /// content length, links, alt text, headings, canonical.
    pub fn evaluate(metrics: &PageMetrics) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        // Title
        if metrics.title_length == 0 {
            push(
                &mut recommendations,
                RecommendationKind::MissingTitle,
                format!(
                    "Page is missing a title tag. Add one of {}-{} characters.",
                    TITLE_MIN_CHARS, TITLE_MAX_CHARS
                ),
            );
        } else if metrics.title_length > TITLE_MAX_CHARS {
            push(
                &mut recommendations,
                RecommendationKind::TitleTooLong,
                format!(
                    "Title is too long ({} characters). Keep it to {} or fewer.",
                    metrics.title_length, TITLE_MAX_CHARS
                ),
            );
        } else if metrics.title_length < TITLE_MIN_CHARS {
            push(
                &mut recommendations,
                RecommendationKind::TitleTooShort,
                format!(
                    "Title is too short ({} characters). Aim for {}-{} characters.",
                    metrics.title_length, TITLE_MIN_CHARS, TITLE_MAX_CHARS
                ),
            );
        }

        // Meta description
        if metrics.meta_description_length == 0 {
            push(
                &mut recommendations,
                RecommendationKind::MissingMetaDescription,
                format!(
                    "Page is missing a meta description. Add one of {}-{} characters.",
                    META_DESCRIPTION_MIN_CHARS, META_DESCRIPTION_MAX_CHARS
                ),
            );
        } else if metrics.meta_description_length > META_DESCRIPTION_MAX_CHARS {
            push(
                &mut recommendations,
                RecommendationKind::MetaDescriptionTooLong,
                format!(
                    "Meta description is too long ({} characters). Shorten to {}-{}.",
                    metrics.meta_description_length,
                    META_DESCRIPTION_MIN_CHARS,
                    META_DESCRIPTION_MAX_CHARS
                ),
            );
        } else if metrics.meta_description_length < META_DESCRIPTION_MIN_CHARS {
            push(
                &mut recommendations,
                RecommendationKind::MetaDescriptionTooShort,
                format!(
                    "Meta description is too short ({} characters). Lengthen to {}-{}.",
                    metrics.meta_description_length,
                    META_DESCRIPTION_MIN_CHARS,
                    META_DESCRIPTION_MAX_CHARS
                ),
            );
        }

        if metrics.word_count < MIN_WORD_COUNT {
            push(
                &mut recommendations,
                RecommendationKind::ThinContent,
                format!(
                    "Content is too short ({} words). Aim for {}+ words.",
                    metrics.word_count, MIN_WORD_COUNT
                ),
            );
        }

        if !(MIN_LINK_COUNT..=MAX_LINK_COUNT).contains(&metrics.link_count) {
            push(
                &mut recommendations,
                RecommendationKind::LinkCount,
                format!(
                    "Link count should be between {}-{} (current: {}).",
                    MIN_LINK_COUNT, MAX_LINK_COUNT, metrics.link_count
                ),
            );
        }

        if metrics.missing_alt_count > 0 {
            push(
                &mut recommendations,
                RecommendationKind::MissingImageAlt,
                format!("Add alt text to {} image(s).", metrics.missing_alt_count),
            );
        }

        // Headings
        if metrics.h1_count == 0 {
            push(
                &mut recommendations,
                RecommendationKind::MissingH1,
                "Page has no H1 tag. Add exactly one H1 describing the page.".to_string(),
            );
        } else if metrics.h1_count > 1 {
            push(
                &mut recommendations,
                RecommendationKind::MultipleH1,
                format!(
                    "Page has {} H1 tags. Consolidate them into exactly one.",
                    metrics.h1_count
                ),
            );
        }

        if metrics.canonical_url.is_none() {
            push(
                &mut recommendations,
                RecommendationKind::MissingCanonical,
                "Add a canonical tag to avoid duplicate content issues.".to_string(),
            );
        }

        recommendations
    }

    /// Whether a metric falls inside its "good" range, for the report's status column.
    pub fn is_good(metric: Metric, metrics: &PageMetrics) -> bool {
        match metric {
            Metric::Title => {
                (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&metrics.title_length)
            }
            Metric::MetaDescription => (META_DESCRIPTION_MIN_CHARS..=META_DESCRIPTION_MAX_CHARS)
                .contains(&metrics.meta_description_length),
            Metric::WordCount => metrics.word_count >= MIN_WORD_COUNT,
            Metric::TotalLinks => (MIN_LINK_COUNT..=MAX_LINK_COUNT).contains(&metrics.link_count),
            Metric::AltTagsMissing => metrics.missing_alt_count == 0,
            Metric::H1Tags => metrics.h1_count == 1,
            Metric::MobileFriendly => metrics.has_viewport_tag,
            Metric::CanonicalTag => metrics.canonical_url.is_some(),
            Metric::LoadTime => metrics.load_time_seconds < MAX_LOAD_TIME_SECS,
        }
    }
}

fn push(recommendations: &mut Vec<Recommendation>, kind: RecommendationKind, message: String) {
    recommendations.push(Recommendation { kind, message });
}
