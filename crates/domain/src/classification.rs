//! Condition classification
//!
//! Maps provider free text onto the small, fixed vocabularies the renderer
//! understands: an animation category for a weather description, and a
//! severity label for an air-quality index.

use std::fmt;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

/// Visual condition class used to pick an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationCategory {
    /// Snowfall
    Snow,
    /// Rain or showers
    Rain,
    /// Clouds or overcast sky
    Cloud,
    /// Sunny or clear sky
    Sun,
    /// Thunder or storm
    Thunderstorm,
    /// No matching keyword; render a textual fallback instead
    None,
}

impl AnimationCategory {
    /// Whether an animation exists for this category
    #[must_use]
    pub const fn has_animation(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AnimationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Snow => "snow",
            Self::Rain => "rain",
            Self::Cloud => "cloud",
            Self::Sun => "sun",
            Self::Thunderstorm => "thunderstorm",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

struct AnimationRule {
    keywords: &'static [&'static str],
    category: AnimationCategory,
}

/// Ordered rule table; the first rule with any matching keyword wins.
///
/// "thunderstorm with light rain" is therefore Rain, and "snow showers" is
/// Snow.
const ANIMATION_RULES: &[AnimationRule] = &[
    AnimationRule {
        keywords: &["snow"],
        category: AnimationCategory::Snow,
    },
    AnimationRule {
        keywords: &["rain", "shower"],
        category: AnimationCategory::Rain,
    },
    AnimationRule {
        keywords: &["cloud", "overcast"],
        category: AnimationCategory::Cloud,
    },
    AnimationRule {
        keywords: &["sun", "clear"],
        category: AnimationCategory::Sun,
    },
    AnimationRule {
        keywords: &["thunder", "storm"],
        category: AnimationCategory::Thunderstorm,
    },
];

/// Rule index for each keyword, aligned with the automaton's pattern ids
static KEYWORD_RULES: LazyLock<Vec<usize>> = LazyLock::new(|| {
    ANIMATION_RULES
        .iter()
        .enumerate()
        .flat_map(|(rule, r)| r.keywords.iter().map(move |_| rule))
        .collect()
});

static KEYWORD_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    let keywords: Vec<&str> = ANIMATION_RULES
        .iter()
        .flat_map(|r| r.keywords.iter().copied())
        .collect();
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(keywords)
        .expect("Failed to build keyword matcher")
});

/// Classify a weather description into an animation category
///
/// Matching is a case-insensitive substring search; among all keywords found
/// the one belonging to the earliest rule decides.
#[must_use]
pub fn classify_animation(description: &str) -> AnimationCategory {
    KEYWORD_MATCHER
        .find_overlapping_iter(description)
        .filter_map(|m| KEYWORD_RULES.get(m.pattern().as_usize()).copied())
        .min()
        .and_then(|rule| ANIMATION_RULES.get(rule))
        .map_or(AnimationCategory::None, |r| r.category)
}

/// Air-quality severity on the provider's 1 to 5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQualityLevel {
    /// Index 1
    Good,
    /// Index 2
    Fair,
    /// Index 3
    Moderate,
    /// Index 4
    Poor,
    /// Index 5
    VeryPoor,
    /// Any other value
    Unknown,
}

impl AirQualityLevel {
    /// Map a raw index to a level; out-of-range values are `Unknown`
    #[must_use]
    pub const fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AirQualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity label for an air-quality index
#[must_use]
pub const fn classify_air_quality(index: i64) -> &'static str {
    AirQualityLevel::from_index(index).label()
}
