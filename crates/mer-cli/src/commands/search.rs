use anyhow::Context as _;
use mer_client::{Annotation, RemoteAnnotation};
use mer_config::MeridianConfig;
use serde::Serialize;

use crate::cli::{AnnotateArgs, GlobalFlags};
use crate::commands::shared::build_client;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SearchResponse {
    annotations: Vec<RemoteAnnotation>,
}

pub fn run(args: &AnnotateArgs, config: &MeridianConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let annotation = Annotation::new(args.text.as_str(), &args.tags, args.start, args.end)?;
    let client = build_client(&args.connection, config)?;

    let annotations = client
        .search(&annotation)
        .context("annotation search failed")?;

    output(&SearchResponse { annotations }, flags.format)
}
