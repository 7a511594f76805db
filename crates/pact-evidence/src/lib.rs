//! Evidence bundle packaging and executive-summary views (§6): the
//! external-interface layer that wraps C3/C4's pure verification and blame
//! resolution into shareable, re-verifiable artifacts.

mod bundle;
mod error;
mod summary;

pub use bundle::{
    build_bundle, read_bundle, verify_bundle, write_bundle, BundleVerdict, EvidenceBundle,
    EvidenceManifest,
};
pub use error::{EvidenceError, Result};
pub use summary::{executive_summary, ExecutiveSummary};
