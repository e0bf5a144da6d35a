//! Deterministic keyword heuristics over the free-text request.
//!
//! Runs alongside the LLM call: the extracted profile is woven into the
//! prompt, drives theme selection, and supplies a degraded-mode query plan
//! when the LLM is unavailable. Pure string scanning, no network.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeHint {
    Large,
    Compact,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleHint {
    Playful,
    Readable,
    Fancy,
    Minimal,
    Flashy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionHint {
    Animated,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutHint {
    Comparison,
    Cards,
    List,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePreference {
    Budget,
    Premium,
}

/// Insurance lines the request may mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceLine {
    Dental,
    Health,
    Cancer,
    Life,
    Auto,
    Travel,
    Indemnity,
}

impl InsuranceLine {
    pub fn as_str(self) -> &'static str {
        match self {
            InsuranceLine::Dental => "dental",
            InsuranceLine::Health => "health",
            InsuranceLine::Cancer => "cancer",
            InsuranceLine::Life => "life",
            InsuranceLine::Auto => "auto",
            InsuranceLine::Travel => "travel",
            InsuranceLine::Indemnity => "indemnity",
        }
    }
}

/// What the scan extracted from one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestProfile {
    pub size: Option<SizeHint>,
    pub style: Option<StyleHint>,
    pub motion: Option<MotionHint>,
    pub layout: Option<LayoutHint>,
    pub price: Option<PricePreference>,
    /// Representative age when the request names one (explicitly or via an
    /// age group). Used for the age-eligibility filter.
    pub age: Option<u8>,
    pub interests: Vec<InsuranceLine>,
}

impl RequestProfile {
    /// Human-readable summary woven into the LLM prompt.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(size) = self.size {
            parts.push(format!(
                "size: {}",
                match size {
                    SizeHint::Large => "large, generous type and padding",
                    SizeHint::Compact => "compact layout",
                    SizeHint::Summary => "at-a-glance summary",
                }
            ));
        }
        if let Some(style) = self.style {
            parts.push(format!(
                "style: {}",
                match style {
                    StyleHint::Playful => "playful, bright colors and emoji",
                    StyleHint::Readable => "readability first",
                    StyleHint::Fancy => "visually rich, gradients and shadows",
                    StyleHint::Minimal => "minimal, clean",
                    StyleHint::Flashy => "bold, standout design",
                }
            ));
        }
        if let Some(motion) = self.motion {
            parts.push(format!(
                "motion: {}",
                match motion {
                    MotionHint::Animated => "CSS transitions and transforms",
                    MotionHint::Smooth => "smooth transitions",
                }
            ));
        }
        if let Some(layout) = self.layout {
            parts.push(format!(
                "layout: {}",
                match layout {
                    LayoutHint::Comparison => "side-by-side comparison",
                    LayoutHint::Cards => "card grid",
                    LayoutHint::List => "list",
                    LayoutHint::Table => "table",
                }
            ));
        }
        if let Some(price) = self.price {
            parts.push(format!(
                "price preference: {}",
                match price {
                    PricePreference::Budget => "budget-friendly products",
                    PricePreference::Premium => "premium products",
                }
            ));
        }
        if let Some(age) = self.age {
            parts.push(format!("age: {age}"));
        }
        if !self.interests.is_empty() {
            let lines: Vec<&str> = self.interests.iter().map(|l| l.as_str()).collect();
            parts.push(format!("interested in: {}", lines.join(", ")));
        }

        if parts.is_empty() {
            "general audience".to_string()
        } else {
            parts.join(" | ")
        }
    }

    /// Whether the request asked for a child-friendly presentation.
    pub fn wants_playful(&self) -> bool {
        self.style == Some(StyleHint::Playful) || matches!(self.age, Some(a) if a <= 12)
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Whole-word match, for short tokens where substring matching misfires
/// ("car" inside "cards", "auto" inside "automatic").
fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|t| t == word)
}

/// Pull an explicit age out of phrases like "5 year old" / "5-year-old".
fn explicit_age(lower: &str) -> Option<u8> {
    let bytes = lower.as_bytes();
    for (idx, _) in lower.match_indices("year") {
        // Walk back over "-", " " and digits directly before "year".
        let mut end = idx;
        while end > 0 && matches!(bytes[end - 1], b' ' | b'-') {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && bytes[start - 1].is_ascii_digit() {
            start -= 1;
        }
        if start < end {
            if let Ok(age) = lower[start..end].parse::<u8>() {
                if age <= 100 {
                    return Some(age);
                }
            }
        }
    }
    None
}

/// Representative age for an age-group mention.
fn age_group(lower: &str) -> Option<u8> {
    if contains_any(lower, &["baby", "infant", "newborn", "toddler"]) {
        Some(3)
    } else if contains_any(lower, &["child", "children", "kid", "kids"]) {
        Some(7)
    } else if contains_any(lower, &["teen", "teenager", "adolescent"]) {
        Some(15)
    } else if contains_any(lower, &["twenties", "20s", "in my 20s"]) {
        Some(25)
    } else if contains_any(lower, &["thirties", "30s"]) {
        Some(35)
    } else if contains_any(lower, &["forties", "40s"]) {
        Some(45)
    } else if contains_any(lower, &["fifties", "50s", "senior", "elderly"]) {
        Some(55)
    } else {
        None
    }
}

/// Scan a free-text request and extract presentation and filtering hints.
pub fn analyze(request: &str) -> RequestProfile {
    let lower = request.to_lowercase();

    let size = if contains_any(&lower, &["big", "large text", "large font", "easy to see"]) {
        Some(SizeHint::Large)
    } else if contains_any(&lower, &["small", "brief", "short", "condensed"]) {
        Some(SizeHint::Compact)
    } else if contains_any(&lower, &["at a glance", "overview", "summary", "summarize"]) {
        Some(SizeHint::Summary)
    } else {
        None
    };

    let style = if contains_any(&lower, &["cute", "fun", "playful", "kid-friendly"]) {
        Some(StyleHint::Playful)
    } else if contains_any(&lower, &["readable", "easy to read", "legible"]) {
        Some(StyleHint::Readable)
    } else if contains_any(&lower, &["pretty", "beautiful", "elegant", "stylish"]) {
        Some(StyleHint::Fancy)
    } else if contains_any(&lower, &["simple", "clean", "minimal"]) {
        Some(StyleHint::Minimal)
    } else if contains_any(&lower, &["flashy", "bold", "striking", "eye-catching"]) {
        Some(StyleHint::Flashy)
    } else {
        None
    };

    let motion = if contains_any(&lower, &["animated", "animation", "moving", "lively"]) {
        Some(MotionHint::Animated)
    } else if contains_any(&lower, &["smooth", "gentle"]) {
        Some(MotionHint::Smooth)
    } else {
        None
    };

    let layout = if contains_any(&lower, &["compare", "comparison", "side by side", "versus"]) {
        Some(LayoutHint::Comparison)
    } else if contains_any(&lower, &["cards", "card layout", "as cards"]) {
        Some(LayoutHint::Cards)
    } else if contains_any(&lower, &["as a list", "list them", "listed"]) {
        Some(LayoutHint::List)
    } else if contains_any(&lower, &["table", "as a grid", "spreadsheet"]) {
        Some(LayoutHint::Table)
    } else {
        None
    };

    let price = if contains_any(&lower, &["cheap", "affordable", "budget", "low cost", "inexpensive"])
    {
        Some(PricePreference::Budget)
    } else if contains_any(&lower, &["premium", "high-end", "top tier", "best coverage"]) {
        Some(PricePreference::Premium)
    } else {
        None
    };

    let age = explicit_age(&lower).or_else(|| age_group(&lower));

    let mut interests = Vec::new();
    if contains_any(&lower, &["dental", "tooth", "teeth"]) {
        interests.push(InsuranceLine::Dental);
    }
    if contains_any(&lower, &["health", "medical"]) {
        interests.push(InsuranceLine::Health);
    }
    if lower.contains("cancer") {
        interests.push(InsuranceLine::Cancer);
    }
    if contains_any(&lower, &["life insurance", "whole life", "term life"]) {
        interests.push(InsuranceLine::Life);
    }
    if contains_word(&lower, "car")
        || contains_word(&lower, "auto")
        || contains_any(&lower, &["vehicle", "driving"])
    {
        interests.push(InsuranceLine::Auto);
    }
    if contains_any(&lower, &["travel", "trip", "abroad", "overseas"]) {
        interests.push(InsuranceLine::Travel);
    }
    if contains_any(&lower, &["indemnity", "reimbursement", "out-of-pocket"]) {
        interests.push(InsuranceLine::Indemnity);
    }

    RequestProfile {
        size,
        style,
        motion,
        layout,
        price,
        age,
        interests,
    }
}

/// Keywords worth sending to the keyword filter: interest lines first,
/// otherwise nothing (the LLM plan carries its own terms).
pub fn interest_keywords(profile: &RequestProfile) -> Vec<String> {
    profile
        .interests
        .iter()
        .map(|line| line.as_str().to_string())
        .collect()
}
