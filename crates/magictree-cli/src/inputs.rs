//! Expanding command-line paths into the inputs to classify.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Stdin,
    File(PathBuf),
    /// A path that cannot be classified; reported as a failed detection.
    Invalid { path: PathBuf, reason: String },
}

/// Inputs in command-line order; directory contents sorted by file name.
pub(crate) fn collect(paths: &[PathBuf], recursive: bool) -> Vec<Input> {
    if paths.is_empty() {
        return vec![Input::Stdin];
    }

    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        if path.as_os_str() == "-" {
            inputs.push(Input::Stdin);
        } else if path.is_dir() {
            if recursive {
                walk(path, &mut inputs);
            } else {
                inputs.push(Input::Invalid {
                    path: path.clone(),
                    reason: "is a directory (use --recursive)".to_string(),
                });
            }
        } else {
            inputs.push(Input::File(path.clone()));
        }
    }
    inputs
}

fn walk(dir: &Path, inputs: &mut Vec<Input>) {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                inputs.push(Input::File(entry.into_path()));
            }
            Ok(_) => {}
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                tracing::debug!(path = %path.display(), error = %err, "walk failed");
                inputs.push(Input::Invalid {
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }
}
