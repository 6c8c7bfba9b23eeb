use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};

/// A fingerprint of a carrier document as it existed when it was read,
/// tagged by the kind of source it came from and carrying that source's
/// own identity fields. The core never resolves a fingerprint back to a
/// live document (§1 Non-goals) — it only stores fingerprints and hashes
/// of the excerpts it used, so a later upstream edit is detectable without
/// the core ever fetching the document itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocFingerprint {
    Git {
        repo: String,
        commit_sha: String,
        path: String,
    },
    Linear {
        issue_id: String,
    },
    Web {
        url: String,
        retrieved_at_ms: u64,
    },
    External {
        source_id: String,
    },
}

impl DocFingerprint {
    pub fn kind(&self) -> &'static str {
        match self {
            DocFingerprint::Git { .. } => "git",
            DocFingerprint::Linear { .. } => "linear",
            DocFingerprint::Web { .. } => "web",
            DocFingerprint::External { .. } => "external",
        }
    }

    /// A stable string identifying the document within its source, used as
    /// an input to excerpt/provenance hashing. Not a resolvable address —
    /// the core never dereferences it.
    pub fn identity_key(&self) -> String {
        match self {
            DocFingerprint::Git {
                repo,
                commit_sha,
                path,
            } => format!("git:{repo}@{commit_sha}:{path}"),
            DocFingerprint::Linear { issue_id } => format!("linear:{issue_id}"),
            DocFingerprint::Web { url, .. } => format!("web:{url}"),
            DocFingerprint::External { source_id } => format!("external:{source_id}"),
        }
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::hash(self.identity_key().as_bytes())
    }
}
