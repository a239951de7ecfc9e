//! Connection resolution shared by command handlers.

use mer_client::{AnnotationClient, Auth, HttpTransport};
use mer_config::{GrafanaConfig, MeridianConfig};

use crate::cli::ConnectionArgs;

/// Merge CLI connection overrides with config and build a client.
///
/// Flags win over config. Credential flags override as a group: supplying
/// any of `--username`/`--password`/`--token` ignores configured
/// credentials entirely, so a flag-supplied token never collides with a
/// configured basic auth pair.
pub fn build_client(
    args: &ConnectionArgs,
    config: &MeridianConfig,
) -> anyhow::Result<AnnotationClient<HttpTransport>> {
    let url = match &args.url {
        Some(url) => url.clone(),
        None => config.grafana.ensure_url()?.to_string(),
    };
    let auth = resolve_auth(args, &config.grafana)?;
    tracing::debug!(%url, "resolved grafana endpoint");
    Ok(AnnotationClient::new(url, &auth))
}

fn resolve_auth(args: &ConnectionArgs, grafana: &GrafanaConfig) -> anyhow::Result<Auth> {
    let overridden = args.username.is_some() || args.password.is_some() || args.token.is_some();
    let (username, password, token) = if overridden {
        (
            args.username.as_deref(),
            args.password.as_deref(),
            args.token.as_deref(),
        )
    } else {
        (
            non_empty(&grafana.username),
            non_empty(&grafana.password),
            non_empty(&grafana.api_token),
        )
    };
    Ok(Auth::resolve(username, password, token)?)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
