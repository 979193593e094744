//! Command implementations.

pub mod extract;
pub mod parse;
pub mod prompt;

pub use self::extract::execute_extract;
pub use self::parse::execute_parse;
pub use self::prompt::execute_prompt;

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write `contents` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
