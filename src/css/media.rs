//! `@media` query construction.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOperator {
    Not,
    Only,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    All,
    Print,
    #[default]
    Screen,
    Speech,
}

impl MediaType {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "print" => Some(Self::Print),
            "screen" => Some(Self::Screen),
            "speech" => Some(Self::Speech),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "landscape" => Some(Self::Landscape),
            "portrait" => Some(Self::Portrait),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaUpdate {
    None,
    Slow,
    Fast,
}

impl fmt::Display for MediaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Not => "not",
            Self::Only => "only",
        })
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Print => "print",
            Self::Screen => "screen",
            Self::Speech => "speech",
        })
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        })
    }
}

impl fmt::Display for MediaUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Slow => "slow",
            Self::Fast => "fast",
        })
    }
}

/// One comma-separated entry of a media query.
///
/// Dimension and resolution values are CSS text (`768px`, `2dppx`).
/// `media_type` renders as `screen` when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRule {
    pub operator: Option<MediaOperator>,
    pub media_type: Option<MediaType>,
    pub width: Option<String>,
    pub min_width: Option<String>,
    pub max_width: Option<String>,
    pub height: Option<String>,
    pub min_height: Option<String>,
    pub max_height: Option<String>,
    pub orientation: Option<Orientation>,
    pub min_resolution: Option<String>,
    pub max_resolution: Option<String>,
    pub resolution: Option<String>,
    pub update: Option<MediaUpdate>,
}

impl MediaRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn min_width(mut self, value: impl Into<String>) -> Self {
        self.min_width = Some(value.into());
        self
    }

    pub fn max_width(mut self, value: impl Into<String>) -> Self {
        self.max_width = Some(value.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// `(feature: value)` conditions in canonical order.
    fn conditions(&self) -> Vec<String> {
        let text = |name: &str, value: &Option<String>| {
            value.as_ref().map(|v| format!("({name}: {v})"))
        };

        [
            text("width", &self.width),
            text("min-width", &self.min_width),
            text("max-width", &self.max_width),
            text("height", &self.height),
            text("min-height", &self.min_height),
            text("max-height", &self.max_height),
            self.orientation.map(|o| format!("(orientation: {o})")),
            text("min-resolution", &self.min_resolution),
            text("max-resolution", &self.max_resolution),
            text("resolution", &self.resolution),
            self.update.map(|u| format!("(update: {u})")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl fmt::Display for MediaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operator) = self.operator {
            write!(f, "{operator} ")?;
        }
        write!(f, "{}", self.media_type.unwrap_or_default())?;

        let conditions = self.conditions();
        if !conditions.is_empty() {
            write!(f, " and {}", conditions.join(" and "))?;
        }
        Ok(())
    }
}

/// Build the `@media` prelude for a list of rules.
///
/// An empty list yields `"@media "`.
pub fn media_query(rules: &[MediaRule]) -> String {
    let rules: Vec<String> = rules.iter().map(ToString::to_string).collect();
    format!("@media {}", rules.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rules() {
        assert_eq!(media_query(&[]), "@media ");
    }

    #[test]
    fn test_media_types() {
        assert_eq!(
            media_query(&[MediaRule::new().media_type(MediaType::Print)]),
            "@media print"
        );
        assert_eq!(
            media_query(&[
                MediaRule::new().media_type(MediaType::Screen),
                MediaRule::new().media_type(MediaType::Print),
            ]),
            "@media screen, print"
        );
    }

    #[test]
    fn test_conditions_in_order() {
        let rule = MediaRule {
            operator: Some(MediaOperator::Only),
            max_width: Some("1200px".into()),
            min_width: Some("768px".into()),
            orientation: Some(Orientation::Landscape),
            update: Some(MediaUpdate::Fast),
            resolution: Some("2x".into()),
            ..MediaRule::default()
        };
        assert_eq!(
            media_query(&[rule]),
            "@media only screen and (min-width: 768px) and (max-width: 1200px) \
             and (orientation: landscape) and (resolution: 2x) and (update: fast)"
        );
    }

    #[test]
    fn test_mixed_rules() {
        assert_eq!(
            media_query(&[
                MediaRule::new()
                    .min_width("768px")
                    .orientation(Orientation::Landscape),
                MediaRule::new().media_type(MediaType::Print),
            ]),
            "@media screen and (min-width: 768px) and (orientation: landscape), print"
        );
    }
}
