use serde::{Deserialize, Serialize};

/// Prefix of request ids minted by the demo generator when the API is unreachable.
pub const DEMO_ID_PREFIX: &str = "demo-";

/// Prefix of last-resort records substituted for a result that could not be fetched.
pub const EMERGENCY_ID_PREFIX: &str = "emergency-";

/// Host organisms known to the synthesis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organism {
    /// Human
    HomoSapiens,
    /// House mouse
    MusMusculus,
    /// Brown rat
    RattusNorvegicus,
    /// Zebrafish
    DanioRerio,
    /// Fruit fly
    DrosophilaMelanogaster,
    /// E. coli
    EscherichiaColi,
}

impl Organism {
    /// All known organisms, in menu order.
    pub const ALL: [Organism; 6] = [
        Organism::HomoSapiens,
        Organism::MusMusculus,
        Organism::RattusNorvegicus,
        Organism::DanioRerio,
        Organism::DrosophilaMelanogaster,
        Organism::EscherichiaColi,
    ];

    /// Wire identifier, e.g. `homo_sapiens`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Organism::HomoSapiens => "homo_sapiens",
            Organism::MusMusculus => "mus_musculus",
            Organism::RattusNorvegicus => "rattus_norvegicus",
            Organism::DanioRerio => "danio_rerio",
            Organism::DrosophilaMelanogaster => "drosophila_melanogaster",
            Organism::EscherichiaColi => "escherichia_coli",
        }
    }

    /// Binomial name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Organism::HomoSapiens => "Homo sapiens",
            Organism::MusMusculus => "Mus musculus",
            Organism::RattusNorvegicus => "Rattus norvegicus",
            Organism::DanioRerio => "Danio rerio",
            Organism::DrosophilaMelanogaster => "Drosophila melanogaster",
            Organism::EscherichiaColi => "Escherichia coli",
        }
    }

    /// Parse a wire identifier, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|o| o.as_str() == needle)
    }
}

impl std::fmt::Display for Organism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for `POST /api/v1/synthesize`.
///
/// Built by the form layer after validation and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Organism identifier, e.g. `homo_sapiens`
    pub host_organism: String,
    /// Free-text trait description
    pub desired_trait: String,
    /// Request simulated codon optimization
    pub optimize: bool,
    /// Request safety screening
    pub safety_check: bool,
}

impl SynthesisRequest {
    /// Create a request with both options enabled.
    pub fn new(host_organism: impl Into<String>, desired_trait: impl Into<String>) -> Self {
        Self {
            host_organism: host_organism.into(),
            desired_trait: desired_trait.into(),
            optimize: true,
            safety_check: true,
        }
    }

    /// Toggle simulated codon optimization
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Toggle safety screening
    pub fn with_safety_check(mut self, safety_check: bool) -> Self {
        self.safety_check = safety_check;
        self
    }

    /// Host as a known organism, if it is one.
    pub fn organism(&self) -> Option<Organism> {
        Organism::parse(&self.host_organism)
    }

    /// Human-readable host name; unknown hosts are shown as entered.
    pub fn host_display_name(&self) -> String {
        self.organism()
            .map(|o| o.display_name().to_string())
            .unwrap_or_else(|| self.host_organism.trim().to_string())
    }
}

/// Processing state of a synthesis job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStatus {
    /// Queued
    Pending,
    /// Running
    Processing,
    /// Finished successfully
    Completed,
    /// Older backends report `"error"`.
    #[serde(alias = "error")]
    Failed,
}

impl SynthesisStatus {
    /// True once the job will not change any more.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SynthesisStatus::Completed | SynthesisStatus::Failed)
    }
}

impl std::fmt::Display for SynthesisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SynthesisStatus::Pending => "pending",
            SynthesisStatus::Processing => "processing",
            SynthesisStatus::Completed => "completed",
            SynthesisStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Source gene selected for the desired trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneData {
    /// Gene symbol
    pub name: String,
    /// Source species
    pub species: String,
    /// NCBI gene identifier
    pub ncbi_id: String,
    /// Nucleotides over `A`, `T`, `G`, `C`.
    pub sequence: String,
    /// Always `sequence.len()`.
    pub sequence_length: usize,
    /// Short description of the gene product
    pub description: String,
}

/// A genomic location flagged as a possible unintended edit target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffTargetSite {
    /// Matched window of the target
    pub sequence: String,
    /// Chromosome name, e.g. `Chr19`
    pub chromosome: String,
    /// Position on the chromosome
    pub position: u64,
    /// Mismatches against the construct
    pub mismatch_count: u32,
    /// `High`, `Medium` or `Low`.
    pub potential_impact: String,
}

impl OffTargetSite {
    /// Site identifier, `chromosome:position`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.chromosome, self.position)
    }

    /// True for sites in critical regions.
    pub fn is_high_risk(&self) -> bool {
        self.potential_impact.eq_ignore_ascii_case("high")
    }
}

/// Off-target prediction for the construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffTargetAnalysis {
    /// Number of entries in `sites`
    pub total_sites: u32,
    /// Never greater than `total_sites`.
    pub high_risk_sites: u32,
    /// Predicted sites
    pub sites: Vec<OffTargetSite>,
    /// Messages for the user, possibly empty
    pub warnings: Vec<String>,
}

/// Predicted protein structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinStructure {
    /// Structure in PDB text format
    pub pdb_data: String,
    /// Prediction confidence in `[0, 1]`
    pub confidence_score: f64,
    /// Prediction method, e.g. `Simulated`
    pub method: String,
}

/// Biosafety scores, each in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Toxicity risk
    pub toxicity_score: f64,
    /// Immune response risk
    pub immunogenicity_score: f64,
    /// Environmental release risk
    pub environmental_risk_score: f64,
    /// Safety recommendations
    pub recommendations: Vec<String>,
}

/// Response of `POST /api/v1/synthesize` and `GET /api/v1/results/{id}`.
///
/// Produced either by the API or by the demo generator. Not modified after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResponse {
    /// Server id, or a `demo-`/`emergency-` id
    pub request_id: String,
    /// Job state
    pub status: SynthesisStatus,
    /// Selected source gene
    pub gene: GeneData,
    /// Absent when optimization was not requested, which is different from
    /// an optimized sequence identical to the original.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_sequence: Option<String>,
    /// Target locus, `chromosome:position`
    pub insertion_locus: String,
    /// Off-target prediction
    pub off_target_analysis: OffTargetAnalysis,
    /// Predicted structure
    pub protein_structure: ProteinStructure,
    /// Biosafety scores
    pub risk_assessment: RiskAssessment,
    /// Summary advice for the user
    pub recommendation: String,
    /// Overall confidence in `[0, 1]`
    pub confidence_score: f64,
}

impl SynthesisResponse {
    /// True when minted by the demo generator instead of the API.
    pub fn is_demo(&self) -> bool {
        self.request_id.starts_with(DEMO_ID_PREFIX)
    }

    /// True for a last-resort substitute record.
    pub fn is_emergency(&self) -> bool {
        self.request_id.starts_with(EMERGENCY_ID_PREFIX)
    }
}

/// Response of `GET /api/v1/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// `ok` when healthy
    pub status: String,
    /// Optional detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Service version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Service name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl ApiStatus {
    /// True when the service reports `ok`.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
