use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Metrics shown in the report, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Title,
    MetaDescription,
    WordCount,
    TotalLinks,
    AltTagsMissing,
    H1Tags,
    MobileFriendly,
    CanonicalTag,
    LoadTime,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::Title,
        Metric::MetaDescription,
        Metric::WordCount,
        Metric::TotalLinks,
        Metric::AltTagsMissing,
        Metric::H1Tags,
        Metric::MobileFriendly,
        Metric::CanonicalTag,
        Metric::LoadTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Title => "Title",
            Metric::MetaDescription => "Meta Description",
            Metric::WordCount => "Word Count",
            Metric::TotalLinks => "Total Links",
            Metric::AltTagsMissing => "Alt Tags Missing",
            Metric::H1Tags => "H1 Tags",
            Metric::MobileFriendly => "Mobile-Friendly",
            Metric::CanonicalTag => "Canonical Tag",
            Metric::LoadTime => "Load Time",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metric::ALL
            .into_iter()
            .find(|metric| metric.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Unknown metric: {}", wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDetails {
    pub definition: String,
    pub importance: String,
    pub criteria: String,
}

impl MetricDetails {
    fn new(definition: &str, importance: &str, criteria: &str) -> Self {
        Self {
            definition: definition.to_string(),
            importance: importance.to_string(),
            criteria: criteria.to_string(),
        }
    }
}

/// Read-only annotations used when rendering the report.
///
/// A catalog does not have to cover every [`Metric`]; the renderer shows
/// placeholders for metrics it has no entry for.
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    entries: HashMap<Metric, MetricDetails>,
}

impl MetricCatalog {
    pub fn new(entries: impl IntoIterator<Item = (Metric, MetricDetails)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new([
            (
                Metric::Title,
                MetricDetails::new(
                    "The title tag is the main clickable link shown in search results.",
                    "A concise title improves click-through rates and keeps the page visible in search results.",
                    "Good: 50-60 characters. Bad: Over 60 characters, under 50, or missing entirely.",
                ),
            ),
            (
                Metric::MetaDescription,
                MetricDetails::new(
                    "A short summary of the page that appears under the title in search results.",
                    "It helps users decide whether to click and improves search visibility.",
                    "Good: 50-160 characters. Bad: Missing, under 50 or over 160 characters.",
                ),
            ),
            (
                Metric::WordCount,
                MetricDetails::new(
                    "The total amount of visible text on the page.",
                    "Search engines favour pages with enough content to cover their topic.",
                    "Good: 600+ words for main pages. Bad: Less than 300 words.",
                ),
            ),
            (
                Metric::TotalLinks,
                MetricDetails::new(
                    "The number of internal and external links on the page.",
                    "Links distribute page authority and guide navigation.",
                    "Good: 20-500 links, ideally 50-150 for main pages. Bad: Less than 20 or more than 500.",
                ),
            ),
            (
                Metric::AltTagsMissing,
                MetricDetails::new(
                    "Alt attributes are text alternatives for images.",
                    "Required for accessibility and for image search.",
                    "Good: Every image has a descriptive alt attribute. Bad: Any image without one.",
                ),
            ),
            (
                Metric::H1Tags,
                MetricDetails::new(
                    "H1 tags are the primary headings that state the topic of the page.",
                    "They give users and search engines the structure of the content.",
                    "Good: Exactly one H1 tag. Bad: No H1 tag or multiple H1 tags.",
                ),
            ),
            (
                Metric::MobileFriendly,
                MetricDetails::new(
                    "Whether the page declares a responsive viewport for mobile devices.",
                    "Most traffic comes from mobile devices and search engines index mobile-first.",
                    "Good: Viewport meta tag present. Bad: No viewport meta tag.",
                ),
            ),
            (
                Metric::CanonicalTag,
                MetricDetails::new(
                    "A link tag that tells search engines which URL is the master copy of the page.",
                    "Prevents duplicate content issues and consolidates ranking signals.",
                    "Good: Canonical URL declared. Bad: Missing canonical tag.",
                ),
            ),
            (
                Metric::LoadTime,
                MetricDetails::new(
                    "Time until the server answered the audit request.",
                    "Fast responses improve user experience and rankings.",
                    "Good: Under 2 seconds. Bad: Over 2 seconds.",
                ),
            ),
        ])
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricDetails> {
        self.entries.get(&metric)
    }

    /// Looks up annotations by display name, e.g. `"Meta Description"`.
    pub fn lookup(&self, name: &str) -> Option<&MetricDetails> {
        name.parse::<Metric>().ok().and_then(|metric| self.get(metric))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_covers_every_metric() {
        let catalog = MetricCatalog::standard();
        assert_eq!(catalog.len(), Metric::ALL.len());
        for metric in Metric::ALL {
            let details = catalog.get(metric).expect("missing catalog entry");
            assert!(!details.definition.is_empty());
            assert!(!details.importance.is_empty());
            assert!(!details.criteria.is_empty());
        }
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("Title".parse::<Metric>().unwrap(), Metric::Title);
        assert_eq!(
            "meta description".parse::<Metric>().unwrap(),
            Metric::MetaDescription
        );
        assert_eq!(
            " Mobile-Friendly ".parse::<Metric>().unwrap(),
            Metric::MobileFriendly
        );
        assert!("Keyword Density".parse::<Metric>().is_err());
    }

    #[test]
    fn test_lookup_tolerates_unknown_names() {
        let catalog = MetricCatalog::standard();
        assert!(catalog.lookup("H1 Tags").is_some());
        assert!(catalog.lookup("Keyword Density").is_none());
    }

    #[test]
    fn test_partial_catalog() {
        let catalog = MetricCatalog::new([(
            Metric::Title,
            MetricDetails::new("d", "i", "c"),
        )]);
        assert!(catalog.get(Metric::Title).is_some());
        assert!(catalog.get(Metric::LoadTime).is_none());
        assert!(MetricCatalog::default().is_empty());
    }
}
