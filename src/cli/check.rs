//! `declsynth check`

use super::util::{report_diagnostics, synthesize_file};
use crate::CheckArgs;
use declsynth::{Diagnostic, Result};
use serde::Serialize;
use std::process::ExitCode;

/// JSON report entry for one declaration
#[derive(Serialize)]
struct RecordReport<'a> {
    record: &'a str,
    ok: bool,
    companions: Vec<String>,
    diagnostics: &'a [Diagnostic],
}

pub fn cmd_check(args: &CheckArgs) -> Result<ExitCode> {
    let (_, outcomes) = synthesize_file(&args.input)?;

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if args.json {
        let report: Vec<RecordReport<'_>> = outcomes
            .iter()
            .map(|outcome| RecordReport {
                record: &outcome.record,
                ok: outcome.is_ok(),
                companions: outcome
                    .companions()
                    .iter()
                    .map(|c| c.macro_kind().to_string())
                    .collect(),
                diagnostics: outcome.diagnostics(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report_diagnostics(&args.input, &outcomes);
        for outcome in outcomes.iter().filter(|o| o.is_ok()) {
            let companions: Vec<String> = outcome
                .companions()
                .iter()
                .map(|c| c.macro_kind().to_string())
                .collect();
            println!("✓ {} ({})", outcome.record, companions.join(", "));
        }
        println!(
            "{} declaration(s), {} with errors",
            outcomes.len(),
            failed
        );
    }

    Ok(if failed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
