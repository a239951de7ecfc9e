use anyhow::Context as _;
use mer_client::{Annotation, CreateAnnotation};
use mer_config::MeridianConfig;

use crate::cli::{AnnotateArgs, GlobalFlags};
use crate::commands::shared::build_client;
use crate::output::output;

pub fn run(args: &AnnotateArgs, config: &MeridianConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let annotation = Annotation::new(args.text.as_str(), &args.tags, args.start, args.end)?;
    let client = build_client(&args.connection, config)?;

    let outcome = client.reconcile(&annotation).with_context(|| {
        format!(
            "failed to publish annotation; attempted payload: {}",
            serde_json::to_string(&CreateAnnotation::from(&annotation)).unwrap_or_default()
        )
    })?;

    output(&outcome, flags.format)
}
