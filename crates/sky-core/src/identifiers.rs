//! Level list parsing
//!
//! The level list is a plain enumeration of map identifiers such as
//! `Day Sk8 Dawn Dusk Maze PHub`, split across any number of lines.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::error;

/// Split a level list into identifiers, in file order.
///
/// Any run of whitespace (including line breaks) separates two identifiers.
pub fn parse_identifiers(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_string).collect()
}

/// Read and parse a level list file
pub fn read_identifiers<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_identifiers(&content))
}

/// Like [`read_identifiers`], but logs a failure and yields no identifiers.
pub fn load_identifiers<P: AsRef<Path>>(path: P) -> Vec<String> {
    read_identifiers(path).unwrap_or_else(|err| {
        error!(%err, "failed to parse level list");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line() {
        assert_eq!(
            parse_identifiers("Day Sk8 Dawn Dusk Maze PHub"),
            vec!["Day", "Sk8", "Dawn", "Dusk", "Maze", "PHub"]
        );
    }

    #[test]
    fn test_parse_collapses_whitespace_runs() {
        let content = "  Day\t\tSk8\r\n\r\nDawn   \n Dusk\n";
        assert_eq!(parse_identifiers(content), vec!["Day", "Sk8", "Dawn", "Dusk"]);
    }

    #[test]
    fn test_parse_preserves_case() {
        assert_eq!(parse_identifiers("PHub pHUB"), vec!["PHub", "pHUB"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_identifiers("").is_empty());
        assert!(parse_identifiers(" \n\t\r\n").is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let ids = load_identifiers("definitely/not/a/real/AllLevelList.lua");
        assert!(ids.is_empty());
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let err = read_identifiers("nope/AllLevelList.lua").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
        assert!(err.to_string().contains("AllLevelList.lua"));
    }
}
