//! Lenient parser for model responses
//!
//! Providers are asked to answer with pure JSON, but models routinely wrap
//! the payload in prose or code fences. The parser takes the span from the
//! first `{` to the last `}` and works with whatever is inside.

use serde::Deserialize;

use crate::domain::models::Insight;
use crate::error::{AppError, Result};

/// Maximum number of insights kept from a single response
pub const MAX_INSIGHTS: usize = 3;

#[derive(Debug, Deserialize)]
struct InsightEnvelope {
    insights: Vec<RawInsight>,
}

#[derive(Debug, Deserialize)]
struct RawInsight {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Extract the insight list from raw model output
///
/// Fails with a parse error when no `{...}` span can be located or the
/// payload lacks an `insights` array. Keeps at most [`MAX_INSIGHTS`]
/// entries; entries missing a field get an empty string instead of failing.
pub fn parse_insight_response(raw: &str) -> Result<Vec<Insight>> {
    let payload = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            log::error!("No JSON object found in model response: {}", raw);
            return Err(AppError::Parse("No JSON found in response".to_string()));
        }
    };

    let envelope: InsightEnvelope = serde_json::from_str(payload).map_err(|e| {
        log::error!("Failed to parse model response: {}", raw);
        AppError::Parse(format!("Failed to parse AI response: {}", e))
    })?;

    Ok(envelope
        .insights
        .into_iter()
        .take(MAX_INSIGHTS)
        .map(|raw| Insight {
            message: raw.message.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
        })
        .collect())
}
