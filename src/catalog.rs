//! Framework Catalog
//!
//! The static taxonomy of governance/risk frameworks, their sections, and
//! their maturity questions. Built once at startup, validated, and read-only
//! afterwards. Editing the catalog is a deployment-time change, not a
//! runtime operation.

use crate::responses::QuestionId;
use crate::utils::slug::{question_key, slugify};
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

/// A thematic grouping of questions within a framework.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: String,
    pub questions: Vec<String>,
}

/// A named governance/risk standard decomposed into sections.
#[derive(Debug, Clone, Serialize)]
pub struct Framework {
    pub name: String,
    pub description: String,
    pub sections: Vec<Section>,
}

/// Catalog construction failures. All are programmer errors in the shipped
/// data, caught at startup and in tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("empty name in catalog definition")]
    EmptyName,

    #[error("duplicate framework name: '{0}'")]
    DuplicateFramework(String),

    #[error("duplicate section name '{section}' in framework '{framework}'")]
    DuplicateSection { framework: String, section: String },

    #[error("question key collision: '{key}' is produced by two distinct questions")]
    KeyCollision { key: String },
}

/// The full set of frameworks surveyed, in display order, plus an index from
/// string question keys back to structured identities.
#[derive(Debug, Clone)]
pub struct Catalog {
    frameworks: Vec<Framework>,
    key_index: FxHashMap<String, QuestionId>,
}

type SectionDef = (&'static str, &'static [&'static str]);
type FrameworkDef = (&'static str, &'static str, &'static [SectionDef]);

/// Shipped survey content: NIST AI RMF, COSO ERM, and GRC practices.
const BUILTIN_FRAMEWORKS: &[FrameworkDef] = &[
    (
        "NIST AI RMF",
        "Functions: Govern, Map, Measure, Manage",
        &[
            (
                "Govern",
                &[
                    "Defined AI risk governance roles and responsibilities.",
                    "Approved AI risk policies and oversight cadence.",
                    "Documented risk appetite for AI systems.",
                ],
            ),
            (
                "Map",
                &[
                    "Documented intended AI system purpose and context.",
                    "Identified stakeholders impacted by AI outcomes.",
                    "Tracked data sources and lineage for AI systems.",
                ],
            ),
            (
                "Measure",
                &[
                    "Implemented bias and fairness evaluation procedures.",
                    "Conducted model performance monitoring and drift checks.",
                    "Validated data quality and representativeness.",
                ],
            ),
            (
                "Manage",
                &[
                    "Implemented human oversight and escalation workflows.",
                    "Defined incident response for AI failures.",
                    "Maintained change management for AI models.",
                ],
            ),
        ],
    ),
    (
        "COSO ERM",
        "Components aligned to strategy and performance",
        &[
            (
                "Governance and Culture",
                &[
                    "Board or leadership oversight of enterprise risks.",
                    "Defined ethical values and accountability.",
                    "Aligned incentives with risk-aware behavior.",
                ],
            ),
            (
                "Strategy and Objective-Setting",
                &[
                    "Risk appetite aligned to strategy.",
                    "Objectives consider risk and uncertainty.",
                    "Resource allocation reflects risk priorities.",
                ],
            ),
            (
                "Performance",
                &[
                    "Identified and assessed key enterprise risks.",
                    "Prioritized risks using consistent criteria.",
                    "Implemented risk responses and controls.",
                ],
            ),
            (
                "Review and Revision",
                &[
                    "Periodic review of risk posture and controls.",
                    "Adapted to internal and external changes.",
                ],
            ),
            (
                "Information, Communication, and Reporting",
                &[
                    "Reliable risk data and reporting cadence.",
                    "Cross-functional communication of risk issues.",
                ],
            ),
        ],
    ),
    (
        "GRC Tools and Practices",
        "Core GRC process capabilities",
        &[
            (
                "Risk Register",
                &[
                    "Maintained centralized risk register.",
                    "Assigned risk owners and mitigation plans.",
                ],
            ),
            (
                "Control Library",
                &[
                    "Documented controls mapped to risks.",
                    "Evidence collection and testing process.",
                ],
            ),
            (
                "Audit and Assurance",
                &[
                    "Internal audit plan aligned to top risks.",
                    "Remediation tracking for audit findings.",
                ],
            ),
            (
                "Third-Party Risk",
                &[
                    "Vendor due diligence and periodic reviews.",
                    "Contractual risk clauses for AI vendors.",
                ],
            ),
            (
                "Incident and Issue Management",
                &[
                    "Centralized incident reporting and triage.",
                    "Root cause analysis and corrective action.",
                ],
            ),
        ],
    ),
];

impl Catalog {
    /// Build a catalog from framework definitions, validating identity
    /// invariants: non-empty names, unique framework names, unique section
    /// names within each framework, and globally unique question keys.
    ///
    /// The key check makes the slug-collision risk ("A-B" and "A B" both
    /// slug to "a-b") a construction error instead of a silent mis-score.
    pub fn new(frameworks: Vec<Framework>) -> Result<Self, CatalogError> {
        let mut framework_names = FxHashMap::default();
        let mut key_index = FxHashMap::default();

        for (f_idx, framework) in frameworks.iter().enumerate() {
            if framework.name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if framework_names.insert(framework.name.clone(), f_idx).is_some() {
                return Err(CatalogError::DuplicateFramework(framework.name.clone()));
            }

            let mut section_names = FxHashMap::default();
            for (s_idx, section) in framework.sections.iter().enumerate() {
                if section.name.is_empty() {
                    return Err(CatalogError::EmptyName);
                }
                if section_names.insert(section.name.clone(), s_idx).is_some() {
                    return Err(CatalogError::DuplicateSection {
                        framework: framework.name.clone(),
                        section: section.name.clone(),
                    });
                }

                for q_idx in 0..section.questions.len() {
                    let key = question_key(&framework.name, &section.name, q_idx);
                    let id = QuestionId::new(f_idx, s_idx, q_idx);
                    if key_index.insert(key.clone(), id).is_some() {
                        return Err(CatalogError::KeyCollision { key });
                    }
                }
            }
        }

        Ok(Self {
            frameworks,
            key_index,
        })
    }

    /// The shipped catalog. Infallible: the builtin definitions are
    /// validated data (the construction invariants are covered by tests).
    pub fn builtin() -> Self {
        let frameworks = BUILTIN_FRAMEWORKS
            .iter()
            .map(|(name, description, sections)| Framework {
                name: (*name).to_string(),
                description: (*description).to_string(),
                sections: sections
                    .iter()
                    .map(|(section_name, questions)| Section {
                        name: (*section_name).to_string(),
                        questions: questions.iter().map(|q| (*q).to_string()).collect(),
                    })
                    .collect(),
            })
            .collect();

        match Self::new(frameworks) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("builtin catalog failed validation: {e}"),
        }
    }

    /// Frameworks in display order.
    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    /// Framework at a given catalog position.
    pub fn framework(&self, index: usize) -> Option<&Framework> {
        self.frameworks.get(index)
    }

    /// Find a framework by its slug form, e.g. "nist-ai-rmf". Used by the
    /// web routes.
    pub fn framework_by_slug(&self, slug: &str) -> Option<(usize, &Framework)> {
        self.frameworks
            .iter()
            .enumerate()
            .find(|(_, f)| slugify(&f.name) == slug)
    }

    /// Resolve a string question key (as carried by a form field) back to
    /// its structured identity. Unknown keys resolve to `None`.
    pub fn resolve_key(&self, key: &str) -> Option<QuestionId> {
        self.key_index.get(key).copied()
    }

    /// Question text for a structured identity, if it exists in the catalog.
    pub fn question(&self, id: QuestionId) -> Option<&str> {
        self.frameworks
            .get(id.framework)?
            .sections
            .get(id.section)?
            .questions
            .get(id.question)
            .map(String::as_str)
    }

    /// Total number of questions across all frameworks.
    pub fn question_count(&self) -> usize {
        self.frameworks
            .iter()
            .flat_map(|f| f.sections.iter())
            .map(|s| s.questions.len())
            .sum()
    }
}
