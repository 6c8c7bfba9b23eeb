use guidewright_evidence::Finding;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of decision classes a `scoutType == decisions` finding can be
/// bucketed into when the orchestrator creates a `DocUpdateRequest`
/// (§4.G step 6). Plain data, versioned alongside the code (§9 REDESIGN
/// FLAG), not a runtime-configurable taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DecisionClass {
    ApiContract,
    DataModel,
    DependencyChoice,
    SecurityPosture,
    ToolingChoice,
}

impl DecisionClass {
    pub fn name(&self) -> &'static str {
        match self {
            DecisionClass::ApiContract => "ApiContract",
            DecisionClass::DataModel => "DataModel",
            DecisionClass::DependencyChoice => "DependencyChoice",
            DecisionClass::SecurityPosture => "SecurityPosture",
            DecisionClass::ToolingChoice => "ToolingChoice",
        }
    }

    fn all() -> &'static [DecisionClass] {
        &[
            DecisionClass::ApiContract,
            DecisionClass::DataModel,
            DecisionClass::DependencyChoice,
            DecisionClass::SecurityPosture,
            DecisionClass::ToolingChoice,
        ]
    }
}

impl fmt::Display for DecisionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `(pattern, weight)` — a keyword's contribution to a class's score when
/// it matches the finding's text, case-insensitively.
type WeightedPattern = (&'static str, f64);

fn weights_for(class: DecisionClass) -> &'static [WeightedPattern] {
    match class {
        DecisionClass::ApiContract => &[
            (r"\bbreaking change\b", 3.0),
            (r"\bendpoint\b", 2.0),
            (r"\bapi version\b", 2.5),
            (r"\bresponse shape\b", 2.0),
        ],
        DecisionClass::DataModel => &[
            (r"\bschema\b", 3.0),
            (r"\bmigration\b", 2.5),
            (r"\bcolumn\b", 1.5),
            (r"\bnormali[sz]ation\b", 2.0),
        ],
        DecisionClass::DependencyChoice => &[
            (r"\bdependency\b", 3.0),
            (r"\bcrate\b", 1.5),
            (r"\bpackage\b", 1.5),
            (r"\blicen[sc]e\b", 2.0),
        ],
        DecisionClass::SecurityPosture => &[
            (r"\bthreat model\b", 3.0),
            (r"\bauthoriz", 2.0),
            (r"\bencrypt", 2.0),
            (r"\bvulnerab", 2.5),
        ],
        DecisionClass::ToolingChoice => &[
            (r"\bci/cd\b", 2.0),
            (r"\bbuild system\b", 2.5),
            (r"\blinter\b", 1.5),
            (r"\bframework\b", 2.0),
        ],
    }
}

struct CompiledClass {
    class: DecisionClass,
    patterns: Vec<(Regex, f64)>,
}

static COMPILED: Lazy<Vec<CompiledClass>> = Lazy::new(|| {
    DecisionClass::all()
        .iter()
        .map(|&class| CompiledClass {
            class,
            patterns: weights_for(class)
                .iter()
                .map(|(pattern, weight)| {
                    (
                        Regex::new(&format!("(?i){pattern}")).expect("static decision pattern compiles"),
                        *weight,
                    )
                })
                .collect(),
        })
        .collect()
});

/// Score `text` against every `DecisionClass`'s weighted pattern table and
/// return the highest-scoring class. Ties break alphabetically on the
/// class's name, per §4.G step 6. Returns `None` only if every class
/// scores zero (no pattern matched at all).
pub fn classify_decision(text: &str) -> Option<DecisionClass> {
    let mut scored: Vec<(DecisionClass, f64)> = COMPILED
        .iter()
        .map(|c| {
            let score = c
                .patterns
                .iter()
                .filter(|(re, _)| re.is_match(text))
                .map(|(_, w)| w)
                .sum();
            (c.class, score)
        })
        .collect();

    scored.retain(|(_, score)| *score > 0.0);
    if scored.is_empty() {
        return None;
    }

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap()
            .then_with(|| a.0.name().cmp(b.0.name()))
    });
    Some(scored[0].0)
}

/// Convenience overload scoring a Finding's title + description + evidence.
pub fn classify_decision_finding(finding: &Finding) -> Option<DecisionClass> {
    classify_decision(&format!(
        "{} {} {}",
        finding.title, finding.description, finding.evidence
    ))
}
