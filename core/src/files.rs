//! Reading input files into request text.

use std::path::Path;

use crate::error::{BoostError, Result};

/// Load the full text content of `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| BoostError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_whole_file_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">seq1\nACGT\n>seq2\nTTGA\n").unwrap();
        let text = read_file(file.path()).unwrap();
        assert_eq!(text, ">seq1\nACGT\n>seq2\nTTGA\n");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_file("/nonexistent/boost/input.fasta").unwrap_err();
        match err {
            BoostError::FileRead { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/boost/input.fasta"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
