//! Input validation, answer loading and output writing shared by the
//! subcommands.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use firstcar_scorer::RawAnswer;
use serde::Serialize;

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match firstcar_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn read_input(path: &Utf8Path) -> Result<String, CliError> {
    firstcar_fs::read_utf8_file(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of [`RawAnswer`]s.
pub(crate) fn load_answers(path: &Utf8Path) -> Result<Vec<RawAnswer>, CliError> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseAnswers {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` to `--output` when given, otherwise to `writer`.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    output: Option<&Utf8PathBuf>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    payload.push('\n');
    match output {
        Some(path) => {
            firstcar_fs::write_utf8_file(path, payload.as_bytes()).map_err(CliError::WriteOutput)?;
            log::info!("wrote {path}");
            Ok(())
        }
        None => writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteOutput),
    }
}
