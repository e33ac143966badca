//! CLI utility helpers

use declsynth::{parse_input, Error, InputFormat, Outcome, Result, SchemaFile, Synthesizer};
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse an input file, picking the front-end by extension
pub fn load_input(path: &Path) -> Result<(String, SchemaFile)> {
    let format = InputFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Other(format!("Failed to read {}: {}", path.display(), e)))?;
    let schema = parse_input(&content, format)?;
    tracing::debug!(path = %path.display(), records = schema.records.len(), "loaded input");
    Ok((content, schema))
}

/// Synthesize every declaration of an input file
pub fn synthesize_file(path: &Path) -> Result<(String, Vec<Outcome>)> {
    let (content, schema) = load_input(path)?;
    Ok((content, Synthesizer::new().synthesize_schema(&schema)))
}

/// Print every diagnostic to stderr; returns how many there were
pub fn report_diagnostics(path: &Path, outcomes: &[Outcome]) -> usize {
    let mut count = 0;
    for diagnostic in outcomes.iter().flat_map(|o| o.diagnostics()) {
        eprintln!("{}: {}", path.display(), diagnostic);
        count += 1;
    }
    count
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            tracing::info!(path = %p.display(), "written");
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

/// File stem used for `{name}` in output naming
pub fn input_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("declarations")
        .to_string()
}
