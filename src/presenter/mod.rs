//! Result presentation.
//!
//! Pure computations the result view needs (risk and confidence tiers,
//! sequence differences, viability) plus [`resolve_result`], which turns a
//! request id into something displayable: the cached or fetched response, or
//! an explicit "not found" state carrying an emergency substitute.

use serde::Serialize;
use tracing::warn;

use crate::api::{SynthesisClient, SynthesisResponse};
use crate::demo::sequence;

/// Off-target risk tier derived from a site count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskTier {
    /// No sites
    Low,
    /// One to three sites
    Medium,
    /// More than three sites
    High,
}

impl RiskTier {
    /// 0 sites is Low, 1-3 Medium, more than 3 High.
    pub fn from_site_count(sites: u32) -> Self {
        match sites {
            0 => RiskTier::Low,
            1..=3 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence tier derived from a score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ConfidenceTier {
    /// Below 0.6
    Low,
    /// From 0.6 up to 0.8
    Medium,
    /// 0.8 or more
    High,
}

impl ConfidenceTier {
    /// At least 0.8 is High, at least 0.6 Medium, anything else Low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceTier::High
        } else if score >= 0.6 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position-wise mismatches plus the absolute length difference.
pub fn sequence_difference(original: &str, optimized: &str) -> usize {
    sequence::mismatch_count(original, optimized) + original.len().abs_diff(optimized.len())
}

/// [`sequence_difference`] as a percentage of the original length. An empty
/// original yields 0.
pub fn difference_percentage(original: &str, optimized: &str) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    sequence_difference(original, optimized) as f64 * 100.0 / original.len() as f64
}

/// Overall viability of the modification, clamped to `[0.1, 0.99]`.
///
/// Starts at 0.8: more than 3 off-target sites subtracts 0.2 and none adds
/// 0.1; toxicity above 0.6 subtracts 0.3; structure confidence above 0.7
/// adds 0.1.
pub fn viability_score(response: &SynthesisResponse) -> f64 {
    let mut score: f64 = 0.8;
    let sites = response.off_target_analysis.total_sites;
    if sites > 3 {
        score -= 0.2;
    } else if sites == 0 {
        score += 0.1;
    }
    if response.risk_assessment.toxicity_score > 0.6 {
        score -= 0.3;
    }
    if response.protein_structure.confidence_score > 0.7 {
        score += 0.1;
    }
    score.clamp(0.1, 0.99)
}

/// Everything the result view derives from a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    /// Id of the summarized response.
    pub request_id: String,
    /// Gene symbol.
    pub gene_name: String,
    /// Source species.
    pub species: String,
    /// Gene length in bases.
    pub sequence_length: usize,
    /// GC content in percent.
    pub gc_content: f64,
    /// Target locus.
    pub insertion_locus: String,
    /// Off-target risk tier.
    pub risk_tier: RiskTier,
    /// Tier of the overall confidence score.
    pub confidence_tier: ConfidenceTier,
    /// Tier of the structure prediction confidence.
    pub structure_confidence_tier: ConfidenceTier,
    /// `None` when optimization was not requested.
    pub optimization_change_percent: Option<f64>,
    /// See [`viability_score`].
    pub viability_score: f64,
    /// Response came from the demo generator.
    pub is_demo: bool,
    /// Response is an emergency substitute.
    pub is_emergency: bool,
}

impl ResultSummary {
    /// Derive the summary of a response.
    pub fn from_response(response: &SynthesisResponse) -> Self {
        Self {
            request_id: response.request_id.clone(),
            gene_name: response.gene.name.clone(),
            species: response.gene.species.clone(),
            sequence_length: response.gene.sequence_length,
            gc_content: sequence::gc_content(&response.gene.sequence),
            insertion_locus: response.insertion_locus.clone(),
            risk_tier: RiskTier::from_site_count(response.off_target_analysis.total_sites),
            confidence_tier: ConfidenceTier::from_score(response.confidence_score),
            structure_confidence_tier: ConfidenceTier::from_score(
                response.protein_structure.confidence_score,
            ),
            optimization_change_percent: response
                .optimized_sequence
                .as_deref()
                .map(|opt| difference_percentage(&response.gene.sequence, opt)),
            viability_score: viability_score(response),
            is_demo: response.is_demo(),
            is_emergency: response.is_emergency(),
        }
    }
}

/// Outcome of resolving a request id for display.
#[derive(Debug, Clone)]
pub enum ResultView {
    /// The response, from the cache or the API.
    Ready(SynthesisResponse),
    /// The id could not be resolved. `substitute` is an emergency record with
    /// an `emergency-` id; `message` is what the user should see.
    Unavailable {
        /// Error text for the user.
        message: String,
        /// Record to render in place of the result.
        substitute: SynthesisResponse,
    },
}

impl ResultView {
    /// Response to render, real or substitute.
    pub fn response(&self) -> &SynthesisResponse {
        match self {
            ResultView::Ready(response) => response,
            ResultView::Unavailable { substitute, .. } => substitute,
        }
    }

    /// True when the id resolved.
    pub fn is_ready(&self) -> bool {
        matches!(self, ResultView::Ready(_))
    }
}

/// Resolve `request_id`: cache, then API, then an emergency substitute.
pub async fn resolve_result(client: &SynthesisClient, request_id: &str) -> ResultView {
    match client.get_result(request_id).await {
        Ok(response) => ResultView::Ready(response),
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Result unavailable, showing substitute");
            ResultView::Unavailable {
                message: format!(
                    "Results for {} were not found or have expired: {}",
                    request_id, e
                ),
                substitute: client.emergency_record(request_id).await,
            }
        }
    }
}

/// Plain-text rendering of a summary for terminal output.
pub fn render_summary(summary: &ResultSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Request:          {}\n", summary.request_id));
    if summary.is_emergency {
        out.push_str("Source:           emergency substitute (not a real result)\n");
    } else if summary.is_demo {
        out.push_str("Source:           offline demo data\n");
    }
    out.push_str(&format!(
        "Gene:             {} ({})\n",
        summary.gene_name, summary.species
    ));
    out.push_str(&format!(
        "Sequence:         {} bp, GC {:.1}%\n",
        summary.sequence_length, summary.gc_content
    ));
    out.push_str(&format!("Insertion locus:  {}\n", summary.insertion_locus));
    out.push_str(&format!("Off-target risk:  {}\n", summary.risk_tier));
    out.push_str(&format!(
        "Confidence:       {} (structure {})\n",
        summary.confidence_tier, summary.structure_confidence_tier
    ));
    match summary.optimization_change_percent {
        Some(pct) => out.push_str(&format!("Optimization:     {:.1}% of bases changed\n", pct)),
        None => out.push_str("Optimization:     not requested\n"),
    }
    out.push_str(&format!("Viability:        {:.2}\n", summary.viability_score));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SynthesisRequest;
    use crate::demo::DemoGenerator;

    #[test]
    fn test_risk_tier_boundaries() {
        assert_eq!(RiskTier::from_site_count(0), RiskTier::Low);
        assert_eq!(RiskTier::from_site_count(1), RiskTier::Medium);
        assert_eq!(RiskTier::from_site_count(3), RiskTier::Medium);
        assert_eq!(RiskTier::from_site_count(4), RiskTier::High);
        assert_eq!(RiskTier::from_site_count(u32::MAX), RiskTier::High);
    }

    #[test]
    fn test_risk_tier_is_monotonic() {
        let tiers: Vec<RiskTier> = (0..20).map(RiskTier::from_site_count).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_confidence_tier_boundaries() {
        assert_eq!(ConfidenceTier::from_score(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.6), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.59), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(1.0), ConfidenceTier::High);
    }

    #[test]
    fn test_sequence_difference() {
        assert_eq!(sequence_difference("ATGC", "ATGC"), 0);
        assert_eq!(sequence_difference("ATGC", "ATCC"), 1);
        assert_eq!(sequence_difference("ATGC", "ATGCAA"), 2);
        assert_eq!(sequence_difference("ATGCAA", "TTGC"), 3);
        assert_eq!(sequence_difference("", "AT"), 2);
    }

    #[test]
    fn test_difference_percentage() {
        assert_eq!(difference_percentage("ATGC", "ATCC"), 25.0);
        assert_eq!(difference_percentage("", "ATGC"), 0.0);
    }

    #[test]
    fn test_viability_score() {
        let mut response = DemoGenerator::seeded(1)
            .generate(&SynthesisRequest::new("homo_sapiens", "hypoxia tolerance"));
        response.off_target_analysis.total_sites = 0;
        response.risk_assessment.toxicity_score = 0.1;
        response.protein_structure.confidence_score = 0.9;
        assert!((viability_score(&response) - 0.99).abs() < 1e-9);

        response.off_target_analysis.total_sites = 5;
        response.risk_assessment.toxicity_score = 0.7;
        response.protein_structure.confidence_score = 0.5;
        assert!((viability_score(&response) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_summary_from_demo_response() {
        let response = DemoGenerator::seeded(3)
            .generate(&SynthesisRequest::new("homo_sapiens", "freeze tolerance"));
        let summary = ResultSummary::from_response(&response);

        assert_eq!(summary.gene_name, "AFGP");
        assert!(summary.is_demo);
        assert!(!summary.is_emergency);
        let pct = summary.optimization_change_percent.unwrap();
        assert!((pct - 5.0).abs() < 0.1, "unexpected change {}", pct);

        let text = render_summary(&summary);
        assert!(text.contains("offline demo data"));
        assert!(text.contains("AFGP (Boreogadus saida)"));
    }

    #[test]
    fn test_summary_without_optimization() {
        let request = SynthesisRequest::new("homo_sapiens", "freeze tolerance").with_optimize(false);
        let response = DemoGenerator::seeded(3).generate(&request);
        let summary = ResultSummary::from_response(&response);
        assert!(summary.optimization_change_percent.is_none());
        assert!(render_summary(&summary).contains("not requested"));
    }
}
