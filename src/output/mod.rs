//! Output generation for the chordpro command line tool

use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the rendered song to the given file, or to standard output if no
/// file was named.
pub(crate) fn emit(content: &str, target: Option<&Path>) -> std::io::Result<()> {
    match target {
        Some(path) => {
            info!("Writing output to: {:?}", path);
            std::fs::write(path, content)
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()
        }
    }
}
