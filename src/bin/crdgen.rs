//! Prints the Revision CustomResourceDefinition as YAML
//!
//! ```bash
//! cargo run --bin crdgen > config/crd/revision.yaml
//! ```

use anyhow::{Context, Result};
use kube::CustomResourceExt;
use revision_condition_manager::crd::Revision;

fn main() -> Result<()> {
    let crd = serde_yaml::to_string(&Revision::crd()).context("Failed to serialize Revision CRD")?;
    print!("{crd}");
    Ok(())
}
