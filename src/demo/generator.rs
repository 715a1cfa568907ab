use std::ops::RangeInclusive;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::catalog::{self, PLACEHOLDER_GENE, PLACEHOLDER_NCBI_ID};
use super::sequence;
use crate::api::{
    GeneData, OffTargetAnalysis, OffTargetSite, ProteinStructure, RiskAssessment,
    SynthesisRequest, SynthesisResponse, SynthesisStatus, DEMO_ID_PREFIX, EMERGENCY_ID_PREFIX,
};
use crate::config::DemoConfig;
use crate::presenter::RiskTier;

/// Upper bound of `off_target_analysis.total_sites`.
pub const MAX_OFF_TARGET_SITES: u32 = 8;

/// Bounds of `protein_structure.confidence_score`.
pub const STRUCTURE_CONFIDENCE_RANGE: RangeInclusive<f64> = 0.70..=0.95;

/// Bounds of `risk_assessment.toxicity_score`.
pub const TOXICITY_RANGE: RangeInclusive<f64> = 0.0..=0.3;

/// Bounds of `risk_assessment.immunogenicity_score`.
pub const IMMUNOGENICITY_RANGE: RangeInclusive<f64> = 0.0..=0.4;

/// Bounds of `risk_assessment.environmental_risk_score`.
pub const ENVIRONMENTAL_RISK_RANGE: RangeInclusive<f64> = 0.0..=0.25;

/// Bounds of the overall `confidence_score` heuristic.
pub const CONFIDENCE_RANGE: RangeInclusive<f64> = 0.3..=0.95;

/// Method reported for simulated structures.
pub const STRUCTURE_METHOD: &str = "Simulated";

const OFF_TARGET_WINDOW: usize = 20;
const MAX_PDB_RESIDUES: usize = 1000;

/// Builds structurally valid synthetic responses for when the API is
/// unreachable.
///
/// All randomness comes from the injected generator, so a seeded `StdRng`
/// reproduces every field except the time component of the request id.
pub struct DemoGenerator<R = StdRng> {
    rng: R,
    config: DemoConfig,
}

impl DemoGenerator<StdRng> {
    /// Generator with default bounds and a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(DemoConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Generator for `config`, seeded from `config.seed` or the OS.
    pub fn from_config(config: &DemoConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config.clone(), rng)
    }
}

impl<R: Rng> DemoGenerator<R> {
    /// Create a generator over any random source.
    pub fn new(config: DemoConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Bounds in use.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Substitute response for `request`, tagged with a `demo-` id.
    pub fn generate(&mut self, request: &SynthesisRequest) -> SynthesisResponse {
        let request_id = self.request_id(DEMO_ID_PREFIX);
        debug!(request_id = %request_id, desired_trait = %request.desired_trait, "Generating demo response");
        self.build(request_id, request, RecommendationSource::Demo)
    }

    /// Last-resort record shown when `request_id` could not be resolved.
    ///
    /// The id is `emergency-` followed by the requested id, so it can never be
    /// mistaken for a real or demo result.
    pub fn emergency(&mut self, request_id: &str) -> SynthesisResponse {
        let request = SynthesisRequest::new("homo_sapiens", "unknown trait")
            .with_optimize(false)
            .with_safety_check(false);
        let id = format!("{}{}", EMERGENCY_ID_PREFIX, request_id);
        debug!(request_id = %id, "Generating emergency response");
        self.build(id, &request, RecommendationSource::Emergency)
    }

    fn build(
        &mut self,
        request_id: String,
        request: &SynthesisRequest,
        source: RecommendationSource,
    ) -> SynthesisResponse {
        let gene = self.gene(request);
        let optimized_sequence = request
            .optimize
            .then(|| sequence::mutate(&mut self.rng, &gene.sequence, self.config.mutation_rate));
        let target = optimized_sequence.as_deref().unwrap_or(&gene.sequence);

        let insertion_locus =
            catalog::insertion_locus(&gene.name, request.organism(), gene.sequence_length);
        let off_target_analysis = self.off_target_analysis(target, request);
        let protein_structure = self.protein_structure(target);
        let risk_assessment = self.risk_assessment(request);
        let confidence_score = overall_confidence(target);

        let recommendation = match source {
            RecommendationSource::Demo => recommendation(
                request,
                &gene,
                &insertion_locus,
                &off_target_analysis,
                &risk_assessment,
                optimized_sequence
                    .as_deref()
                    .map(|opt| sequence::mismatch_count(&gene.sequence, opt)),
            ),
            RecommendationSource::Emergency => format!(
                "Results for {} could not be retrieved. This record is a synthetic \
                 substitute and must not be used for experimental decisions.",
                request_id
                    .strip_prefix(EMERGENCY_ID_PREFIX)
                    .unwrap_or(request_id.as_str())
            ),
        };

        SynthesisResponse {
            request_id,
            status: SynthesisStatus::Completed,
            gene,
            optimized_sequence,
            insertion_locus,
            off_target_analysis,
            protein_structure,
            risk_assessment,
            recommendation,
            confidence_score,
        }
    }

    fn request_id(&mut self, prefix: &str) -> String {
        let token = uuid::Builder::from_random_bytes(self.rng.random()).into_uuid();
        format!(
            "{}{}-{}",
            prefix,
            Utc::now().timestamp_millis(),
            token.simple()
        )
    }

    // Configs rejected by `DemoConfig::validate` may have no codon count in
    // range; those get the smallest count at or above the minimum.
    fn sequence_codons(&mut self) -> usize {
        let lo = self.config.min_sequence_length.div_ceil(3);
        let hi = self.config.max_sequence_length / 3;
        if lo > hi {
            lo
        } else {
            self.rng.random_range(lo..=hi)
        }
    }

    fn gene(&mut self, request: &SynthesisRequest) -> GeneData {
        let codons = self.sequence_codons();
        let seq = sequence::random_coding_sequence(&mut self.rng, codons);

        let (name, species, ncbi_id, description) = match catalog::lookup_gene(&request.desired_trait) {
            Some(entry) => (
                entry.name.to_string(),
                entry.species.to_string(),
                entry.ncbi_id.to_string(),
                entry.description.to_string(),
            ),
            None => (
                PLACEHOLDER_GENE.to_string(),
                request.host_display_name(),
                PLACEHOLDER_NCBI_ID.to_string(),
                format!("Simulated gene for {}", request.desired_trait.trim()),
            ),
        };

        GeneData {
            name,
            species,
            ncbi_id,
            sequence_length: seq.len(),
            sequence: seq,
            description,
        }
    }

    fn off_target_analysis(&mut self, target: &str, request: &SynthesisRequest) -> OffTargetAnalysis {
        let hotspots = catalog::hotspots_for(request.organism());
        let total = self.rng.random_range(0..=MAX_OFF_TARGET_SITES);

        let mut sites = Vec::with_capacity(total as usize);
        for _ in 0..total {
            let Some(spot) = hotspots.choose(&mut self.rng) else {
                break;
            };
            let window = self.off_target_window(target);
            let mut bases = window.as_bytes().to_vec();
            let mismatches = self.rng.random_range(1..=6).min(bases.len());
            for pos in rand::seq::index::sample(&mut self.rng, bases.len(), mismatches).into_iter() {
                bases[pos] = sequence::random_base_except(&mut self.rng, bases[pos]);
            }
            let site_seq: String = bases.into_iter().map(char::from).collect();

            sites.push(OffTargetSite {
                mismatch_count: sequence::mismatch_count(window, &site_seq) as u32,
                sequence: site_seq,
                chromosome: spot.chromosome.to_string(),
                position: self.rng.random_range(spot.start..=spot.end),
                potential_impact: spot.impact.as_str().to_string(),
            });
        }

        let total_sites = sites.len() as u32;
        let high_risk_sites = sites.iter().filter(|s| s.is_high_risk()).count() as u32;

        let mut warnings = Vec::new();
        if total_sites > 5 {
            warnings.push(
                "High number of potential off-target sites detected - consider sequence refinement"
                    .to_string(),
            );
        }
        if high_risk_sites > 0 {
            warnings.push(format!(
                "{} high-risk off-target sites in critical genomic regions",
                high_risk_sites
            ));
        }
        let close_matches = sites.iter().filter(|s| s.mismatch_count <= 2).count();
        if close_matches > 0 {
            warnings.push(format!(
                "{} sites with <=2 mismatches - very high off-target risk",
                close_matches
            ));
        }
        if sites.is_empty() {
            warnings.push("No significant off-target sites detected - low risk profile".to_string());
        }

        OffTargetAnalysis {
            total_sites,
            high_risk_sites,
            sites,
            warnings,
        }
    }

    fn off_target_window<'a>(&mut self, target: &'a str) -> &'a str {
        if target.len() <= OFF_TARGET_WINDOW {
            return target;
        }
        let start = self.rng.random_range(0..=target.len() - OFF_TARGET_WINDOW);
        &target[start..start + OFF_TARGET_WINDOW]
    }

    fn protein_structure(&mut self, target: &str) -> ProteinStructure {
        let protein = sequence::translate(target);
        ProteinStructure {
            pdb_data: simulated_pdb(&protein),
            confidence_score: self.rng.random_range(STRUCTURE_CONFIDENCE_RANGE),
            method: STRUCTURE_METHOD.to_string(),
        }
    }

    fn risk_assessment(&mut self, request: &SynthesisRequest) -> RiskAssessment {
        let toxicity_score = self.rng.random_range(TOXICITY_RANGE);
        let immunogenicity_score = self.rng.random_range(IMMUNOGENICITY_RANGE);
        let environmental_risk_score = self.rng.random_range(ENVIRONMENTAL_RISK_RANGE);

        let mut recommendations = Vec::new();
        if toxicity_score > 0.2 {
            recommendations.push("Consider protein engineering to reduce potential toxicity".to_string());
        }
        if immunogenicity_score > 0.3 {
            recommendations.push("Evaluate potential immune responses in the host organism".to_string());
        }
        if environmental_risk_score > 0.2 {
            recommendations.push("Implement containment strategies for environmental release".to_string());
        }
        if recommendations.is_empty() {
            recommendations.push(
                "No significant risks identified. Proceed with standard validation protocols."
                    .to_string(),
            );
        }
        if !request.safety_check {
            recommendations.push(
                "Safety screening was not requested; scores are indicative only.".to_string(),
            );
        }

        RiskAssessment {
            toxicity_score,
            immunogenicity_score,
            environmental_risk_score,
            recommendations,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RecommendationSource {
    Demo,
    Emergency,
}

/// Overall confidence from sequence properties, clamped to [`CONFIDENCE_RANGE`].
///
/// Base 0.6; GC content 40-60% adds 0.15, 30-70% adds 0.05, anything else
/// subtracts 0.1; a protein-coding length (multiple of 3, over 30) adds 0.1;
/// under 2000 bases adds 0.15, under 5000 adds 0.05, longer subtracts 0.1.
pub fn overall_confidence(sequence: &str) -> f64 {
    let gc = sequence::gc_content(sequence);
    let mut confidence: f64 = 0.6;

    if (40.0..=60.0).contains(&gc) {
        confidence += 0.15;
    } else if (30.0..=70.0).contains(&gc) {
        confidence += 0.05;
    } else {
        confidence -= 0.1;
    }

    if sequence.len() % 3 == 0 && sequence.len() > 30 {
        confidence += 0.1;
    }

    let len = sequence.len();
    if len < 2000 {
        confidence += 0.15;
    } else if len < 5000 {
        confidence += 0.05;
    } else {
        confidence -= 0.1;
    }

    confidence.clamp(*CONFIDENCE_RANGE.start(), *CONFIDENCE_RANGE.end())
}

/// Helix-like C-alpha trace for a protein, capped at 1000 residues.
pub fn simulated_pdb(protein: &str) -> String {
    let preview: String = protein.chars().take(50).collect();
    let mut lines = vec![
        "HEADER    SIMULATED STRUCTURE".to_string(),
        format!("REMARK   1 SIMULATED STRUCTURE FOR PROTEIN {}", preview),
    ];

    for (i, aa) in protein.chars().take(MAX_PDB_RESIDUES).enumerate() {
        let serial = i + 1;
        // 3.6 residues per turn, 1.5 A rise, 2.3 A radius
        let angle = (i as f64) * 100.0_f64.to_radians();
        let x = 2.3 * angle.cos();
        let y = 2.3 * angle.sin();
        let z = 1.5 * i as f64;
        lines.push(format!(
            "ATOM  {:>5}  CA  {} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00 30.00           C",
            serial,
            residue_name(aa),
            serial,
            x,
            y,
            z
        ));
    }

    lines.push("TER".to_string());
    lines.push("END".to_string());
    lines.join("\n")
}

fn residue_name(aa: char) -> &'static str {
    match aa {
        'A' => "ALA",
        'R' => "ARG",
        'N' => "ASN",
        'D' => "ASP",
        'C' => "CYS",
        'Q' => "GLN",
        'E' => "GLU",
        'G' => "GLY",
        'H' => "HIS",
        'I' => "ILE",
        'L' => "LEU",
        'K' => "LYS",
        'M' => "MET",
        'F' => "PHE",
        'P' => "PRO",
        'S' => "SER",
        'T' => "THR",
        'W' => "TRP",
        'Y' => "TYR",
        'V' => "VAL",
        _ => "UNK",
    }
}

/// Recommendation assembled from fragments for the off-target risk tier and
/// the requested options.
fn recommendation(
    request: &SynthesisRequest,
    gene: &GeneData,
    locus: &str,
    off_target: &OffTargetAnalysis,
    risk: &RiskAssessment,
    optimized_changes: Option<usize>,
) -> String {
    let host = request.host_display_name();
    let mut text = match RiskTier::from_site_count(off_target.total_sites) {
        RiskTier::Low => format!(
            "{} from {} is a strong candidate for insertion into {} at {}.",
            gene.name, gene.species, host, locus
        ),
        RiskTier::Medium => format!(
            "{} from {} is viable for {}, but {} potential off-target site(s) should be validated before proceeding.",
            gene.name, gene.species, host, off_target.total_sites
        ),
        RiskTier::High => format!(
            "{} from {} shows elevated off-target risk in {} ({} sites, {} high-risk); redesign the guide sequences before proceeding.",
            gene.name, gene.species, host, off_target.total_sites, off_target.high_risk_sites
        ),
    };

    match optimized_changes {
        Some(changes) => text.push_str(&format!(
            " Codon optimization rewrote {} positions for expression in the host.",
            changes
        )),
        None => text.push_str(" Enabling codon optimization may improve expression in the host."),
    }

    if request.safety_check {
        let worst = risk
            .toxicity_score
            .max(risk.immunogenicity_score)
            .max(risk.environmental_risk_score);
        text.push_str(&format!(
            " Safety screening completed with a highest risk score of {:.2}.",
            worst
        ));
    } else {
        text.push_str(" Safety screening was skipped; complete a biosafety review before any wet-lab work.");
    }

    text.push_str(" Generated offline because the synthesis service was unreachable.");
    text
}
