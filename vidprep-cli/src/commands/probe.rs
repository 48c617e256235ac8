use crate::cli::ProbeArgs;
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use vidprep_core::{ProbeConfig, Prober};

/// Builds the probe configuration from command-line arguments.
pub fn probe_config(args: &ProbeArgs) -> ProbeConfig {
    ProbeConfig {
        ffprobe_path: args.ffprobe.clone(),
        max_preview_dim: args.max_dim,
        query_timeout: args.timeout_secs.map(Duration::from_secs),
        ..ProbeConfig::default()
    }
}

/// Probes the input and writes `KEY='value'` lines to `out`.
pub fn run_probe<W: Write>(args: &ProbeArgs, out: &mut W) -> Result<()> {
    let config = probe_config(args);
    config.validate()?;

    let result = Prober::from_config(config).run(&args.input, &args.out_width, &args.out_height);
    log::debug!("Probe result: {result:?}");

    out.write_all(result.to_shell().as_bytes())
        .and_then(|()| out.flush())
        .context("writing probe output")?;
    Ok(())
}
