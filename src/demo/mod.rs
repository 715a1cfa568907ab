//! Demo/fallback response generation.
//!
//! When the synthesis API cannot be reached the client substitutes a
//! synthetic [`SynthesisResponse`](crate::api::SynthesisResponse) built here.
//! Values are plausible but invented: genes come from a small trait catalog,
//! sequences are random open reading frames, and scores are drawn from the
//! bounds exported by [`generator`].

pub mod catalog;
pub mod generator;
pub mod sequence;

pub use generator::{
    overall_confidence, simulated_pdb, DemoGenerator, CONFIDENCE_RANGE, ENVIRONMENTAL_RISK_RANGE,
    IMMUNOGENICITY_RANGE, MAX_OFF_TARGET_SITES, STRUCTURE_CONFIDENCE_RANGE, STRUCTURE_METHOD,
    TOXICITY_RANGE,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SynthesisRequest, SynthesisStatus};
    use crate::config::DemoConfig;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bone_density(optimize: bool) -> SynthesisRequest {
        SynthesisRequest::new("homo_sapiens", "high bone density").with_optimize(optimize)
    }

    #[test]
    fn test_sequence_length_matches_sequence() {
        for seed in 0..25 {
            let mut generator = DemoGenerator::seeded(seed);
            let response = generator.generate(&bone_density(seed % 2 == 0));
            assert_eq!(response.gene.sequence_length, response.gene.sequence.len());
            assert!(sequence::is_nucleotide_sequence(&response.gene.sequence));
        }
    }

    #[test]
    fn test_sequence_within_configured_bounds() {
        for seed in 0..25 {
            let response = DemoGenerator::seeded(seed).generate(&bone_density(false));
            let len = response.gene.sequence.len();
            assert!((1200..=3000).contains(&len), "length {} out of bounds", len);
            assert_eq!(len % 3, 0);
            assert!(response.gene.sequence.starts_with(sequence::START_CODON));
            assert!(sequence::STOP_CODONS.contains(&&response.gene.sequence[len - 3..]));
        }
    }

    #[test]
    fn test_optimized_sequence_absent_when_not_requested() {
        for seed in 0..10 {
            let response = DemoGenerator::seeded(seed).generate(&bone_density(false));
            assert!(response.optimized_sequence.is_none());
        }
    }

    #[test]
    fn test_optimized_sequence_differs_by_about_five_percent() {
        for seed in 0..10 {
            let response = DemoGenerator::seeded(seed).generate(&bone_density(true));
            let original = &response.gene.sequence;
            let optimized = response.optimized_sequence.as_deref().unwrap();

            assert_eq!(optimized.len(), original.len());
            let changed = sequence::mismatch_count(original, optimized);
            let expected = (original.len() as f64 * 0.05).round() as usize;
            assert_eq!(changed, expected);
        }
    }

    #[test]
    fn test_off_target_invariants() {
        for seed in 0..50 {
            let response = DemoGenerator::seeded(seed).generate(&bone_density(true));
            let analysis = &response.off_target_analysis;
            assert!(analysis.high_risk_sites <= analysis.total_sites);
            assert!(analysis.total_sites <= MAX_OFF_TARGET_SITES);
            assert_eq!(analysis.total_sites as usize, analysis.sites.len());
            if analysis.sites.is_empty() {
                assert!(analysis.warnings[0].starts_with("No significant off-target sites"));
            }
            for site in &analysis.sites {
                assert_eq!(site.sequence.len(), 20);
                assert!((1..=6).contains(&site.mismatch_count));
            }
        }
    }

    #[test]
    fn test_scores_within_documented_bounds() {
        for seed in 0..50 {
            let response = DemoGenerator::seeded(seed).generate(&bone_density(true));
            let risk = &response.risk_assessment;
            assert!(TOXICITY_RANGE.contains(&risk.toxicity_score));
            assert!(IMMUNOGENICITY_RANGE.contains(&risk.immunogenicity_score));
            assert!(ENVIRONMENTAL_RISK_RANGE.contains(&risk.environmental_risk_score));
            assert!(!risk.recommendations.is_empty());
            assert!(STRUCTURE_CONFIDENCE_RANGE
                .contains(&response.protein_structure.confidence_score));
            assert!(CONFIDENCE_RANGE.contains(&response.confidence_score));
        }
    }

    #[test]
    fn test_bone_density_scenario() {
        let response = DemoGenerator::seeded(42).generate(&bone_density(true));

        assert!(response.is_demo());
        assert_eq!(response.status, SynthesisStatus::Completed);
        assert_eq!(response.gene.name, "LRP5");
        assert_eq!(response.gene.species, "Ursus maritimus");
        assert_eq!(response.insertion_locus, "Chr11:68200000");
        let optimized = response.optimized_sequence.as_deref().unwrap();
        assert_ne!(optimized, response.gene.sequence);
        assert!(response.recommendation.starts_with("LRP5 from Ursus maritimus"));
        assert!(response.recommendation.contains("Codon optimization rewrote"));
        assert!(response.recommendation.contains("Safety screening completed"));
    }

    #[test]
    fn test_unknown_trait_uses_placeholder() {
        let request = SynthesisRequest::new("mus_musculus", "glowing fur");
        let response = DemoGenerator::seeded(1).generate(&request);

        assert_eq!(response.gene.name, catalog::PLACEHOLDER_GENE);
        assert_eq!(response.gene.species, "Mus musculus");
        assert_eq!(response.gene.ncbi_id, catalog::PLACEHOLDER_NCBI_ID);
        assert_eq!(response.gene.description, "Simulated gene for glowing fur");
    }

    #[test]
    fn test_same_seed_same_content() {
        let a = DemoGenerator::seeded(9).generate(&bone_density(true));
        let b = DemoGenerator::seeded(9).generate(&bone_density(true));

        assert_eq!(a.gene, b.gene);
        assert_eq!(a.optimized_sequence, b.optimized_sequence);
        assert_eq!(a.off_target_analysis, b.off_target_analysis);
        assert_eq!(a.risk_assessment, b.risk_assessment);
        assert_eq!(a.recommendation, b.recommendation);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut generator = DemoGenerator::seeded(4);
        let a = generator.generate(&bone_density(false));
        let b = generator.generate(&bone_density(false));
        assert_ne!(a.request_id, b.request_id);
        assert!(a.request_id.starts_with(crate::api::DEMO_ID_PREFIX));
    }

    #[test]
    fn test_safety_check_skipped_fragment() {
        let request = bone_density(false).with_safety_check(false);
        let response = DemoGenerator::seeded(6).generate(&request);
        assert!(response.recommendation.contains("Safety screening was skipped"));
        assert!(response
            .recommendation
            .contains("Enabling codon optimization may improve expression"));
    }

    #[test]
    fn test_emergency_record_is_distinguishable() {
        let response = DemoGenerator::seeded(2).emergency("abc-123");
        assert_eq!(response.request_id, "emergency-abc-123");
        assert!(response.is_emergency());
        assert!(!response.is_demo());
        assert!(response.optimized_sequence.is_none());
        assert!(response.recommendation.contains("abc-123"));
    }

    #[test]
    fn test_emergency_text_strips_prefix_once() {
        let response = DemoGenerator::seeded(2).emergency("emergency-x");
        assert_eq!(response.request_id, "emergency-emergency-x");
        assert!(response
            .recommendation
            .starts_with("Results for emergency-x could not be retrieved."));
    }

    #[test]
    fn test_gene_length_honors_bounds_off_codon_grid() {
        // 10..=14 holds exactly one multiple of 3
        let config = DemoConfig {
            min_sequence_length: 10,
            max_sequence_length: 14,
            mutation_rate: 0.0,
            seed: None,
        };
        assert!(config.validate().is_ok());
        for seed in 0..10 {
            let mut generator = DemoGenerator::new(config.clone(), StdRng::seed_from_u64(seed));
            let response = generator.generate(&bone_density(false));
            assert_eq!(response.gene.sequence.len(), 12);
        }
    }

    #[test]
    fn test_custom_bounds() {
        let config = DemoConfig {
            min_sequence_length: 30,
            max_sequence_length: 30,
            mutation_rate: 0.1,
            seed: None,
        };
        let mut generator = DemoGenerator::new(config, StdRng::seed_from_u64(8));
        let response = generator.generate(&bone_density(true));
        assert_eq!(response.gene.sequence.len(), 30);
        let optimized = response.optimized_sequence.unwrap();
        assert_eq!(sequence::mismatch_count(&response.gene.sequence, &optimized), 3);
    }

    #[test]
    fn test_overall_confidence_heuristic() {
        // 1200 bases at 50% GC: 0.6 + 0.15 + 0.1 + 0.15
        let balanced = "ATGC".repeat(300);
        assert!((overall_confidence(&balanced) - 0.95).abs() < 1e-9);

        // 6000 bases at 0% GC, coding length: 0.6 - 0.1 + 0.1 - 0.1
        let poor = "A".repeat(6000);
        assert!((overall_confidence(&poor) - 0.5).abs() < 1e-9);

        assert!((overall_confidence("") - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_simulated_pdb_shape() {
        let pdb = simulated_pdb("MAW");
        let atoms: Vec<&str> = pdb.lines().filter(|l| l.starts_with("ATOM")).collect();
        assert_eq!(atoms.len(), 3);
        assert!(atoms[0].contains("MET"));
        assert!(atoms[2].contains("TRP"));
        assert!(pdb.ends_with("END"));
    }
}
