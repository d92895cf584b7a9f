//! Response merger
//!
//! Turns an ordered sequence of settled provider outcomes into one
//! human-readable composite answer. Purely structural: no deduplication, no
//! ranking, no semantic merge. The system shows everything that worked
//! rather than trying to pick a best answer.

use chorus_types::ProviderOutcome;
use thiserror::Error;

/// Separator between per-provider sections of the merged answer
pub const RESPONSE_SEPARATOR: &str = "\n\n---\n\n";

/// Merge failure modes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
	#[error("All AI services failed")]
	AllFailed,
}

/// Merge the successful outcomes into one labeled composite string
///
/// Failures are excluded entirely; the surviving answers are renumbered
/// `AI 1`, `AI 2`, … in outcome order, so a failed provider's slot is
/// skipped rather than blanked. An aggregate with no successes is
/// [`MergeError::AllFailed`], which callers surface as a fault and must
/// never cache.
pub fn merge(outcomes: &[ProviderOutcome]) -> Result<String, MergeError> {
	let sections: Vec<String> = outcomes
		.iter()
		.filter_map(|outcome| outcome.result.text())
		.enumerate()
		.map(|(index, text)| format!("AI {}: {}", index + 1, text))
		.collect();

	if sections.is_empty() {
		return Err(MergeError::AllFailed);
	}

	Ok(sections.join(RESPONSE_SEPARATOR))
}
