use crate::Questions::equation::{ChemicalEquation, EquationList};
use crate::Questions::validate::validate_equation;
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{0}' does not exist")]
    Missing(PathBuf),
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "Error parsing question bank at line {line}, column {column} (line {file_line} in file): {message}"
    )]
    Json {
        line: usize,
        column: usize,
        file_line: usize,
        message: String,
    },
}

pub struct LoadData {
    pub file_name: PathBuf,
}

impl LoadData {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        LoadData {
            file_name: file_name.into(),
        }
    }
    pub fn load_equations(&self) -> Result<Vec<ChemicalEquation>, LoadError> {
        load_and_validate_bank(&self.file_name)
    }
}

fn is_section_header(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Parses a question bank. The JSON (array of equations or `{"equations": [...]}`) may fill the
/// whole file or sit under an "EQUATIONS" or "QUESTIONS" header, ending at the next header.
pub fn load_equation_bank(file_name: &Path) -> Result<Vec<ChemicalEquation>, LoadError> {
    if !file_name.exists() {
        return Err(LoadError::Missing(file_name.to_path_buf()));
    }
    let file = File::open(file_name).map_err(|source| LoadError::Io {
        path: file_name.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|source| LoadError::Io {
            path: file_name.to_path_buf(),
            source,
        })?;

    // Find the EQUATIONS or QUESTIONS header, the whole file is the section otherwise
    let start_index = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim().to_uppercase();
            trimmed == "EQUATIONS" || trimmed == "QUESTIONS"
        })
        .map_or(0, |i| i + 1);
    let end_index = lines[start_index..]
        .iter()
        .position(|line| is_section_header(line.trim()))
        .map_or(lines.len(), |i| start_index + i);
    let section = lines[start_index..end_index].join("\n");

    match serde_json::from_str::<EquationList>(&section) {
        Ok(list) => {
            info!(
                "Successfully parsed question bank from file '{}'",
                file_name.display()
            );
            Ok(list.into_vec())
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            // Calculate the actual line number in the file
            let file_line = start_index + error_line;
            error!(
                "Error parsing question bank '{}' at line {} in file: {}",
                file_name.display(),
                file_line,
                e
            );
            if let Some(problem_line) = lines.get(file_line.saturating_sub(1)) {
                error!("Problematic line: {}", problem_line);
                if error_column >= 1 && error_column <= problem_line.len() {
                    error!("{}^", " ".repeat(error_column - 1));
                }
            }
            Err(LoadError::Json {
                line: error_line,
                column: error_column,
                file_line,
                message: e.to_string(),
            })
        }
    }
}

/// Loads a question bank and drops equations that break the balance invariant.
pub fn load_and_validate_bank(file_name: &Path) -> Result<Vec<ChemicalEquation>, LoadError> {
    let equations = load_equation_bank(file_name)?;
    if equations.is_empty() {
        warn!("Loaded question bank is empty");
    }
    let total = equations.len();
    let valid: Vec<ChemicalEquation> = equations
        .into_iter()
        .filter(|equation| match validate_equation(equation) {
            Ok(()) => true,
            Err(reason) => {
                warn!("Skipping equation from '{}': {}", file_name.display(), reason);
                false
            }
        })
        .collect();
    info!(
        "Loaded {} of {} equations from file '{}'",
        valid.len(),
        total,
        file_name.display()
    );
    Ok(valid)
}
