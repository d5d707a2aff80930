use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No Title";
pub const NO_DESCRIPTION: &str = "No Description";
pub const NO_CANONICAL: &str = "None";

/// On-page signals extracted from a single fetched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub word_count: usize,
    pub link_count: usize,
    pub missing_alt_count: usize,
    pub h1_count: usize,
    pub has_viewport_tag: bool,
    pub canonical_url: Option<String>,
    pub load_time_seconds: f64,
}

impl PageMetrics {
    pub fn title_or_sentinel(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    pub fn meta_description_or_sentinel(&self) -> &str {
        self.meta_description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    pub fn canonical_or_sentinel(&self) -> &str {
        self.canonical_url.as_deref().unwrap_or(NO_CANONICAL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    MissingTitle,
    TitleTooLong,
    TitleTooShort,
    MissingMetaDescription,
    MetaDescriptionTooLong,
    MetaDescriptionTooShort,
    ThinContent,
    LinkCount,
    MissingImageAlt,
    MissingH1,
    MultipleH1,
    MissingCanonical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub url: String,
    pub timestamp: String,
    pub metrics: Option<PageMetrics>,
    pub recommendations: Vec<Recommendation>,
}

impl AuditReport {
    pub fn new(
        url: &str,
        metrics: Option<PageMetrics>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            metrics,
            recommendations,
        }
    }
}
