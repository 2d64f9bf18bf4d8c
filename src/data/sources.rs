//! Upstream data sources
//!
//! Thin blocking fetchers for the element-set feed and the space-weather
//! notification feed. Both run once on the loader thread before the
//! render loop starts; a failure here is terminal for the session.

use anyhow::{Context, Result};
use serde::Deserialize;

/// One record from the space-weather notification feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceWeatherNotification {
    pub message_type: String,
    #[serde(rename = "messageID")]
    pub message_id: String,
    #[serde(rename = "messageURL", default)]
    pub message_url: Option<String>,
    pub message_issue_time: String,
    #[serde(default)]
    pub message_body: Option<String>,
}

/// Radiation risk level derived by the host from notification analysis.
///
/// The engine only consumes the level; how it is derived from message
/// text is the host's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskLevel {
    #[default]
    None,
    Low,
    Moderate,
    High,
    Severe,
    Extreme,
}

impl RiskLevel {
    /// Parse the host-supplied level string. Unrecognized input maps to
    /// `None` rather than failing.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Low" => Self::Low,
            "Moderate" => Self::Moderate,
            "High" => Self::High,
            "Severe" => Self::Severe,
            "Extreme" => Self::Extreme,
            _ => Self::None,
        }
    }

    /// Levels that trigger high-latitude hazard coloring.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Severe | Self::Extreme)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Severe => "Severe",
            Self::Extreme => "Extreme",
        }
    }

    pub const ALL: [RiskLevel; 6] = [
        RiskLevel::None,
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Severe,
        RiskLevel::Extreme,
    ];
}

/// Fetch the raw element-set text for active objects.
pub fn fetch_element_sets(url: &str) -> Result<String> {
    log::info!("Fetching element sets from {url}");
    let body = ureq::get(url)
        .call()
        .with_context(|| format!("element-set fetch failed: {url}"))?
        .into_string()
        .context("element-set response was not readable text")?;
    Ok(body)
}

/// Fetch and decode the notification feed.
pub fn fetch_notifications(url: &str) -> Result<Vec<SpaceWeatherNotification>> {
    log::info!("Fetching notifications from {url}");
    let body = ureq::get(url)
        .call()
        .with_context(|| format!("notification fetch failed: {url}"))?
        .into_string()
        .context("notification response was not readable text")?;

    let notifications: Vec<SpaceWeatherNotification> =
        serde_json::from_str(&body).context("notification feed was not valid JSON")?;
    log::info!("Fetched {} notifications", notifications.len());
    Ok(notifications)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_known_values() {
        assert_eq!(RiskLevel::parse("Severe"), RiskLevel::Severe);
        assert_eq!(RiskLevel::parse(" High "), RiskLevel::High);
        assert_eq!(RiskLevel::parse("None"), RiskLevel::None);
        assert_eq!(RiskLevel::parse("banana"), RiskLevel::None);
    }

    #[test]
    fn only_high_severe_extreme_are_elevated() {
        for level in RiskLevel::ALL {
            let expected = matches!(
                level,
                RiskLevel::High | RiskLevel::Severe | RiskLevel::Extreme
            );
            assert_eq!(level.is_elevated(), expected, "{level:?}");
        }
    }

    #[test]
    fn notification_feed_decodes() {
        let json = r#"[{
            "messageType": "RBE",
            "messageID": "RBE-20260201-001",
            "messageURL": "https://example.invalid/RBE-20260201-001",
            "messageIssueTime": "2026-02-01T12:00Z",
            "messageBody": "Radiation belt enhancement expected."
        }, {
            "messageType": "CME",
            "messageID": "CME-20260202-001",
            "messageIssueTime": "2026-02-02T08:30Z"
        }]"#;

        let parsed: Vec<SpaceWeatherNotification> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].message_type, "RBE");
        assert!(parsed[0].message_body.is_some());
        assert!(parsed[1].message_url.is_none());
        assert!(parsed[1].message_body.is_none());
    }
}
