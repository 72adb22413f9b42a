use std::{fs, path::{Path, PathBuf}};

use log::debug;
use anyhow::Result;
use located_error::{LocatedError, LocatedOption};

mod error;
pub use error::ParseError;

/// Attempt to create an output directory (and its parents, if needed) and return an error if it failed.
pub fn create_output_directory(dir: &Path) -> Result<()> {
    use ParseError::CreateOutputDirectory;
    let loc_msg = || format!("While attempting to create output directory '{}'", dir.display());
    fs::create_dir_all(dir).map_err(CreateOutputDirectory).with_loc(loc_msg)
}

/// Check if a given file already exists ; raise an error if such is the case, and the user did not explicitly
/// allow file overwriting.
/// # Errors
/// - If the provided `path` already exists and the user did not specifically allow for file
///   overwrite using the `--overwrite` argument
pub fn can_write_file(overwrite: bool, path: &Path) -> Result<bool> {
    let loc_msg = "While ensuring that file permissions were appropriate";
    if !overwrite && path.exists() {
        return Err(ParseError::OverwriteDisallowed{path: path.to_path_buf()}).loc(loc_msg)
    }
    Ok(true)
}

/// Format the path of an output file, located within `output_dir` and named after the stem of `input` (e.g.
/// `family0.csv` -> `{output_dir}/family0.{ext}`). The output directory is created if needed.
///
/// # Errors
/// - if `input` does not carry a valid UTF-8 file stem.
/// - if the output directory cannot be created.
/// - if the output file already exists and `allow_overwrite` is false.
pub fn output_file(output_dir: &Path, input: &Path, ext: &str, allow_overwrite: bool) -> Result<PathBuf> {
    let loc_msg = || format!("While attempting to format an output filename for '{}'", input.display());
    let stem = input.file_stem()
        .and_then(|stem| stem.to_str())
        .with_loc(|| ParseError::InvalidFilename)
        .with_loc(loc_msg)?;

    create_output_directory(output_dir)?;
    let path = output_dir.join(format!("{stem}.{ext}"));
    can_write_file(allow_overwrite, &path)?;
    debug!("Output file: {}", path.display());
    Ok(path)
}
