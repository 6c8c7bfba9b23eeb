use guidewright_evidence::Tags;
use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed, versioned keyword table for `touches`/`technologies`/`taskTypes`
/// extraction (§4.G step 8 / §9 REDESIGN FLAG). Each entry is
/// `(label, case-insensitive regex pattern)`; plain Rust data, not
/// runtime-loaded configuration, so tests can pin exact outputs.
///
/// Version 1. Bump the comment (and add entries, never silently reorder or
/// remove) when the table changes, so a pinned test output documents which
/// version produced it.
const TOUCH_KEYWORDS: &[(&str, &str)] = &[
    ("database", r"\b(sql|query|database|migration|schema|orm)\b"),
    ("api", r"\b(endpoint|api|route|handler|controller)\b"),
    ("frontend", r"\b(react|component|ui|css|html|dom)\b"),
    ("auth", r"\b(auth|session|token|login|credential)\b"),
    ("infra", r"\b(deploy|terraform|kubernetes|docker|ci/cd|pipeline)\b"),
];

const TECHNOLOGY_KEYWORDS: &[(&str, &str)] = &[
    ("rust", r"\b(rust|cargo|tokio|serde)\b"),
    ("postgres", r"\b(postgres|postgresql|psql)\b"),
    ("javascript", r"\b(javascript|typescript|node\.?js|npm)\b"),
    ("python", r"\b(python|pip|django|flask)\b"),
    ("aws", r"\b(aws|s3|lambda|dynamodb)\b"),
];

const TASK_TYPE_KEYWORDS: &[(&str, &str)] = &[
    ("bugfix", r"\b(bug|fix|regression|crash)\b"),
    ("feature", r"\b(feature|implement|add support)\b"),
    ("refactor", r"\b(refactor|cleanup|simplify)\b"),
    ("security", r"\b(vulnerab|injection|exploit|cve)\b"),
    ("testing", r"\b(test|spec|coverage|assertion)\b"),
];

struct CompiledTable(Vec<(&'static str, Regex)>);

impl CompiledTable {
    fn compile(table: &'static [(&'static str, &'static str)]) -> Self {
        Self(
            table
                .iter()
                .map(|(label, pattern)| {
                    let re = Regex::new(&format!("(?i){pattern}")).expect("static keyword regex compiles");
                    (*label, re)
                })
                .collect(),
        )
    }

    fn matches(&self, text: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(label, _)| label.to_string())
            .collect()
    }
}

static TOUCH_TABLE: Lazy<CompiledTable> = Lazy::new(|| CompiledTable::compile(TOUCH_KEYWORDS));
static TECHNOLOGY_TABLE: Lazy<CompiledTable> =
    Lazy::new(|| CompiledTable::compile(TECHNOLOGY_KEYWORDS));
static TASK_TYPE_TABLE: Lazy<CompiledTable> =
    Lazy::new(|| CompiledTable::compile(TASK_TYPE_KEYWORDS));

/// Extract `touches`/`technologies`/`taskTypes` tags from a finding's free
/// text (title, description, evidence, task description) via the fixed
/// keyword tables above.
pub fn extract_tags(text: &str) -> Tags {
    Tags::new(
        TOUCH_TABLE.matches(text),
        TECHNOLOGY_TABLE.matches(text),
        TASK_TYPE_TABLE.matches(text),
    )
}
