//! File system operations for problems and reports.
use super::{GridProblem, SolveReport};

use itertools::Itertools;

use std::collections::HashMap;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

/// Summarized information about a problem file.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ProblemEntry {
    pub filename: String,
    pub name: String,
    pub kind: String,
}

/// Yields a list of the problem files for the root directory and each
/// subdirectory. The root directory will have an empty string key in the
/// HashMap, and others will have their relative path as their key.
///
/// Both `.json` and `.yaml`/`.yml` problem files are listed; saved reports
/// (`.report.json`) are skipped.
pub fn list_problems(dir: &Path) -> std::io::Result<HashMap<String, Vec<ProblemEntry>>> {
    if !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Path {} is not a directory.", dir.to_string_lossy()),
        ));
    }
    let mut q = vec![dir.to_path_buf()];
    let mut all_problems: HashMap<String, Vec<ProblemEntry>> = HashMap::new();
    let rootdirstr = dir.to_path_buf().into_os_string().into_string().unwrap();
    let rootdirstrlen = rootdirstr.len();
    while let Some(dir) = q.pop() {
        let mut entries: Vec<ProblemEntry> = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                q.push(path);
                continue;
            }
            let filename = String::from(
                &path.clone().into_os_string().into_string().unwrap()[rootdirstrlen..],
            );
            if filename.ends_with(".report.json") || !is_problem_filename(&filename) {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let data: serde_json::Value = if filename.ends_with(".json") {
                serde_json::from_str(&content)?
            } else {
                match serde_yaml::from_str(&content) {
                    Ok(data) => data,
                    Err(e) => {
                        log::warn!("Cannot parse {filename}: {e}");
                        continue;
                    }
                }
            };
            let name = if let Some(serde_json::Value::String(name)) = data.get("name") {
                String::from(name)
            } else {
                String::from(path.file_stem().unwrap().to_str().unwrap())
            };
            let kind = match data.get("query").and_then(|q| q.get("kind")) {
                Some(serde_json::Value::String(kind)) => String::from(kind),
                Some(_) => {
                    log::warn!("Cannot parse \"query\" member of {filename}");
                    continue;
                }
                // Ignore files without a query silently.
                None => continue,
            };
            entries.push(ProblemEntry {
                filename,
                name,
                kind,
            });
        }
        let dirname = String::from(&dir.into_os_string().into_string().unwrap()[rootdirstrlen..]);
        all_problems.insert(dirname, entries);
    }
    Ok(all_problems)
}

fn is_problem_filename(filename: &str) -> bool {
    filename.ends_with(".json") || filename.ends_with(".yaml") || filename.ends_with(".yml")
}

/// Convert a problem name to a sanitized report filename.
pub fn report_filename(name: &str) -> String {
    let name = name.split_whitespace().join("-");
    let name = name + ".report.json";
    sanitize_filename::sanitize(name)
}

/// Save a report as a human-readable (pretty) JSON file.
pub fn save_report<P: AsRef<Path>>(report: &SolveReport, path: P) -> std::io::Result<()> {
    let content = match serde_json::to_string_pretty(report) {
        Ok(s) => s,
        Err(e) => {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    log::info!("Saved report: {}", path.as_ref().display());
    Ok(())
}

/// Given a problem document, read its `grid` field from the file it names,
/// relative to the given `path`. A `grid` string without a newline is
/// treated as a path; grid text passes through unchanged.
pub fn read_grid_from_file<P: AsRef<Path>>(
    value: &mut serde_json::Value,
    path: P,
) -> std::io::Result<bool> {
    let field = match value.get_mut("grid") {
        Some(field) => field,
        None => return Ok(false),
    };
    if let serde_json::Value::String(s) = field {
        if !s.contains('\n') {
            let mut grid_path = PathBuf::new();
            grid_path.push(path);
            grid_path.pop();
            grid_path.push(&s);
            *field = serde_json::Value::String(std::fs::read_to_string(&grid_path)?);
            return Ok(true);
        }
    }
    Ok(false)
}

impl GridProblem {
    /// Reads a problem from a JSON or YAML file, resolving the `grid` field
    /// through [`read_grid_from_file`].
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<GridProblem> {
        use std::io::{Error, ErrorKind};

        let content = std::fs::read_to_string(&path)?;
        let extension = path.as_ref().extension().and_then(|e| e.to_str());
        let mut value: serde_json::Value = if matches!(extension, Some("yaml") | Some("yml")) {
            match serde_yaml::from_str(&content) {
                Ok(value) => value,
                Err(error) => {
                    return Err(Error::new(
                        ErrorKind::Other,
                        format!("Failed to parse problem YAML: {error}"),
                    ));
                }
            }
        } else {
            serde_json::from_str(&content)?
        };
        read_grid_from_file(&mut value, &path)?;
        let problem: GridProblem = serde_json::from_value(value)?;
        Ok(problem)
    }
}
