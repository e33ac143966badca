//! `declsynth generate`

use super::util::{input_stem, report_diagnostics, synthesize_file, write_output};
use crate::GenerateArgs;
use declsynth::{render_outcomes, Config, Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

pub fn cmd_generate(args: &GenerateArgs) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&std::env::current_dir()?)?.unwrap_or_default(),
    };

    let targets = match args.target {
        Some(target) => vec![target],
        None => config.targets.clone(),
    };
    if targets.is_empty() {
        return Err(Error::Config("No targets configured".into()));
    }
    if targets.len() > 1 && args.output.is_some() {
        return Err(Error::Other(
            "--output needs a single target; pass --target".into(),
        ));
    }

    let (content, outcomes) = synthesize_file(&args.input)?;
    let diagnostics = report_diagnostics(&args.input, &outcomes);

    let mut render_config = config.render_config().with_source(
        args.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        &content,
    );
    if let Some(dir) = &args.template_dir {
        render_config.template_dir = Some(dir.clone());
    }

    let stem = input_stem(&args.input);
    for target in &targets {
        let code = render_outcomes(&outcomes, *target, &render_config)?;
        let output = if targets.len() == 1 {
            args.output.clone()
        } else {
            let dir = args.input.parent().map(PathBuf::from).unwrap_or_default();
            Some(dir.join(config.output_file_name(&stem, *target)))
        };
        write_output(&output, &code)?;
    }

    tracing::info!(
        records = outcomes.len(),
        failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
        "generation finished"
    );

    Ok(if diagnostics > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
