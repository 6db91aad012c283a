use super::super::args::ListArgs;
use crate::exit_codes;
use anyhow::Context;
use reconcile_core::{DirectoryStore, DocumentStore};

pub fn run(args: ListArgs) -> anyhow::Result<i32> {
    let store = DirectoryStore::new(&args.dir).with_suffix(args.suffix)?;
    let ids = store
        .list_identifiers()
        .with_context(|| format!("failed to list results in {}", args.dir.display()))?;
    for id in &ids {
        println!("{id}");
    }
    tracing::debug!(dir = %args.dir.display(), clusters = ids.len(), "listed results");
    Ok(exit_codes::SUCCESS)
}
