//! Static reference tables for demo data: trait-to-gene mappings, genomic
//! hotspots used for off-target sites, and insertion loci.

use crate::api::Organism;

/// Gene reported for a trait keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneEntry {
    /// Lowercase keyword matched as a substring of the desired trait.
    pub keyword: &'static str,
    /// Gene symbol.
    pub name: &'static str,
    /// Source species.
    pub species: &'static str,
    /// NCBI gene identifier.
    pub ncbi_id: &'static str,
    /// Gene product description.
    pub description: &'static str,
}

/// Name used when no catalog entry matches the trait.
pub const PLACEHOLDER_GENE: &str = "SIM1";

/// NCBI id used for placeholder genes.
pub const PLACEHOLDER_NCBI_ID: &str = "999999999";

/// First match wins, so more specific keywords come first.
pub const TRAIT_GENES: &[GeneEntry] = &[
    GeneEntry {
        keyword: "bone density",
        name: "LRP5",
        species: "Ursus maritimus",
        ncbi_id: "101885918",
        description: "Low-density lipoprotein receptor-related protein 5, linked to unusually high bone density in polar bears.",
    },
    GeneEntry {
        keyword: "radiation",
        name: "XP-V",
        species: "Deinococcus radiodurans",
        ncbi_id: "100385918",
        description: "Xeroderma pigmentosum variant protein, involved in DNA repair mechanisms against radiation damage.",
    },
    GeneEntry {
        keyword: "pain insensitivity",
        name: "SCN9A",
        species: "Heterocephalus glaber",
        ncbi_id: "101704257",
        description: "Sodium voltage-gated channel alpha subunit 9, mutations are linked to insensitivity to certain types of pain in naked mole-rats.",
    },
    GeneEntry {
        keyword: "hypoxia",
        name: "HIF1A",
        species: "Heterocephalus glaber",
        ncbi_id: "101706691",
        description: "Hypoxia-inducible factor 1-alpha, a key regulator for survival in low-oxygen environments.",
    },
    GeneEntry {
        keyword: "freeze",
        name: "AFGP",
        species: "Boreogadus saida",
        ncbi_id: "101149420",
        description: "Antifreeze glycoprotein, prevents ice crystal growth in the blood of polar cod.",
    },
    GeneEntry {
        keyword: "toxin resistance",
        name: "SCN4A",
        species: "Thamnophis sirtalis",
        ncbi_id: "102914589",
        description: "Sodium voltage-gated channel alpha subunit 4, mutations provide resistance to tetrodotoxin in garter snakes.",
    },
    GeneEntry {
        keyword: "drought",
        name: "AREB1",
        species: "Arabidopsis thaliana",
        ncbi_id: "N/A",
        description: "ABA-responsive element binding protein 1, a transcription factor driving drought stress responses.",
    },
    GeneEntry {
        keyword: "cold tolerance",
        name: "CBF",
        species: "Arabidopsis thaliana",
        ncbi_id: "N/A",
        description: "C-repeat binding factor, activates cold-regulated genes during acclimation.",
    },
    GeneEntry {
        keyword: "disease resistance",
        name: "NLR",
        species: "Oryza sativa",
        ncbi_id: "N/A",
        description: "Nucleotide-binding leucine-rich repeat receptor mediating pathogen recognition.",
    },
    GeneEntry {
        keyword: "insulin",
        name: "INS",
        species: "Homo sapiens",
        ncbi_id: "3630",
        description: "Insulin precursor, processed into the hormone regulating glucose uptake.",
    },
];

/// Catalog entry whose keyword occurs in `desired_trait`, ignoring case.
pub fn lookup_gene(desired_trait: &str) -> Option<&'static GeneEntry> {
    let needle = desired_trait.to_lowercase();
    TRAIT_GENES.iter().find(|entry| needle.contains(entry.keyword))
}

/// Predicted impact of an edit at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Critical region
    High,
    /// Sensitive region
    Medium,
    /// Region of little consequence
    Low,
}

impl Impact {
    /// Wire representation used in `potential_impact`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

/// A genomic region prone to off-target binding.
#[derive(Debug, Clone, Copy)]
pub struct Hotspot {
    /// Chromosome name.
    pub chromosome: &'static str,
    /// First position of the region.
    pub start: u64,
    /// Last position of the region.
    pub end: u64,
    /// Nearby gene or feature.
    pub context: &'static str,
    /// Impact of an edit inside the region.
    pub impact: Impact,
}

const fn hotspot(
    chromosome: &'static str,
    start: u64,
    end: u64,
    context: &'static str,
    impact: Impact,
) -> Hotspot {
    Hotspot {
        chromosome,
        start,
        end,
        context,
        impact,
    }
}

const HUMAN_HOTSPOTS: &[Hotspot] = &[
    hotspot("Chr1", 1_000_000, 5_000_000, "gene_cluster", Impact::High),
    hotspot("Chr2", 10_000_000, 15_000_000, "regulatory_region", Impact::Medium),
    hotspot("Chr3", 20_000_000, 25_000_000, "intergenic", Impact::Low),
    hotspot("Chr6", 28_000_000, 33_000_000, "HLA_complex", Impact::High),
    hotspot("Chr11", 68_000_000, 69_000_000, "LRP5_locus", Impact::Medium),
    hotspot("Chr17", 43_000_000, 44_000_000, "BRCA1_region", Impact::High),
    hotspot("Chr19", 55_115_756, 55_115_856, "AAVS1_safe_harbor", Impact::Low),
    hotspot("ChrX", 153_000_000, 154_000_000, "F8_locus", Impact::Medium),
];

const MOUSE_HOTSPOTS: &[Hotspot] = &[
    hotspot("Chr1", 3_000_000, 8_000_000, "gene_cluster", Impact::High),
    hotspot("Chr2", 12_000_000, 17_000_000, "regulatory_region", Impact::Medium),
    hotspot("Chr7", 45_000_000, 50_000_000, "intergenic", Impact::Low),
];

const ECOLI_HOTSPOTS: &[Hotspot] = &[
    hotspot("Chromosome", 100_000, 200_000, "essential_genes", Impact::High),
    hotspot("Chromosome", 500_000, 600_000, "metabolic_cluster", Impact::Medium),
    hotspot("Chromosome", 1_000_000, 1_100_000, "intergenic", Impact::Low),
];

/// Hotspots for a host; hosts without their own table use the human one.
pub fn hotspots_for(organism: Option<Organism>) -> &'static [Hotspot] {
    match organism {
        Some(Organism::MusMusculus) => MOUSE_HOTSPOTS,
        Some(Organism::EscherichiaColi) => ECOLI_HOTSPOTS,
        _ => HUMAN_HOTSPOTS,
    }
}

/// Locus used when the host has neither a gene-specific site nor safe harbors.
pub const GENERIC_LOCUS: &str = "Chr1:100000000";

const HUMAN_GENE_SITES: &[(&str, &str)] = &[
    ("LRP5", "Chr11:68200000"),
    ("COL1A1", "Chr17:50190000"),
    ("MYOSTATIN", "Chr2:190430000"),
    ("EPO", "Chr7:100720000"),
    ("VEGF", "Chr6:43737000"),
    ("INSULIN", "Chr11:2160000"),
    ("DYSTROPHIN", "ChrX:31200000"),
    ("CFTR", "Chr7:117120000"),
    ("TP53", "Chr17:7670000"),
    ("BRCA1", "Chr17:43044000"),
];

const MOUSE_GENE_SITES: &[(&str, &str)] = &[
    ("LRP5", "Chr19:3400000"),
    ("COL1A1", "Chr11:94940000"),
    ("MSTN", "Chr1:53060000"),
];

const HUMAN_SAFE_HARBORS: &[(&str, &str)] = &[
    ("AAVS1", "Chr19:55115756"),
    ("CCR5", "Chr3:46414943"),
    ("ROSA26", "Chr6:113072530"),
    ("HPRT1", "ChrX:134460000"),
];

const MOUSE_SAFE_HARBORS: &[(&str, &str)] = &[
    ("ROSA26", "Chr6:113012944"),
    ("H11", "Chr11:95397000"),
    ("HPRT", "ChrX:53269000"),
];

const RAT_SAFE_HARBORS: &[(&str, &str)] = &[
    ("ROSA26", "Chr1:220500000"),
    ("HPRT1", "ChrX:137000000"),
];

const ECOLI_SAFE_HARBORS: &[(&str, &str)] = &[
    ("attB", "Position:4361000"),
    ("lacZ", "Position:365000"),
];

fn gene_sites_for(organism: Option<Organism>) -> &'static [(&'static str, &'static str)] {
    match organism {
        Some(Organism::HomoSapiens) => HUMAN_GENE_SITES,
        Some(Organism::MusMusculus) => MOUSE_GENE_SITES,
        _ => &[],
    }
}

fn safe_harbors_for(organism: Option<Organism>) -> &'static [(&'static str, &'static str)] {
    match organism {
        Some(Organism::HomoSapiens) => HUMAN_SAFE_HARBORS,
        Some(Organism::MusMusculus) => MOUSE_SAFE_HARBORS,
        Some(Organism::RattusNorvegicus) => RAT_SAFE_HARBORS,
        Some(Organism::EscherichiaColi) => ECOLI_SAFE_HARBORS,
        _ => &[],
    }
}

/// Insertion locus for a gene in a host.
///
/// A gene-specific site wins (exact name, then family match by containment).
/// Otherwise a safe harbor is chosen by construct size: AAVS1 below 2000
/// bases, ROSA26 below 5000, CCR5 above that. Harbors missing from the
/// host's table fall back to its first (or second, for mid-size) entry.
pub fn insertion_locus(gene_name: &str, organism: Option<Organism>, sequence_length: usize) -> String {
    let gene = gene_name.to_uppercase();
    let sites = gene_sites_for(organism);

    if let Some((_, locus)) = sites.iter().find(|(name, _)| *name == gene) {
        return locus.to_string();
    }
    if !gene.is_empty() {
        if let Some((_, locus)) = sites
            .iter()
            .find(|(name, _)| name.contains(gene.as_str()) || gene.contains(name))
        {
            return locus.to_string();
        }
    }

    let harbors = safe_harbors_for(organism);
    let Some(first) = harbors.first() else {
        return GENERIC_LOCUS.to_string();
    };
    let named = |wanted: &str| {
        harbors
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, locus)| *locus)
    };

    let locus = if sequence_length < 2000 {
        named("AAVS1").unwrap_or(first.1)
    } else if sequence_length < 5000 {
        named("ROSA26").unwrap_or_else(|| harbors.get(1).unwrap_or(first).1)
    } else {
        named("CCR5").unwrap_or(first.1)
    };
    locus.to_string()
}
