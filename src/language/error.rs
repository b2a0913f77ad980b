use std::{fmt, path::PathBuf};

/// Problems reading input files or translation packs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError {
    pub problem: String,
    pub details: String,
    pub filename: PathBuf,
}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}: {}", self.problem, self.filename.display())
        } else {
            write!(
                f,
                "{}: {}: {}",
                self.problem,
                self.filename.display(),
                self.details
            )
        }
    }
}

impl std::error::Error for LoadingError {}

/// A block table that cannot be turned into a database. These come from
/// a mistake in the table itself, never from parser input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    DuplicateFlag {
        blockid: String,
        first: String,
        second: String,
    },
    UnknownFlag {
        blockid: String,
        flag: String,
    },
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::DuplicateFlag {
                blockid,
                first,
                second,
            } => write!(
                f,
                "block '{}' has two structural flags, '{}' and '{}'",
                blockid, first, second
            ),
            DatabaseError::UnknownFlag { blockid, flag } => {
                write!(f, "block '{}' has unknown flag '{}'", blockid, flag)
            }
        }
    }
}

impl std::error::Error for DatabaseError {}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn loading_error_display() {
        let error = LoadingError {
            problem: "File not found".to_string(),
            details: String::new(),
            filename: PathBuf::from("scripts.sb"),
        };
        assert_eq!(error.to_string(), "File not found: scripts.sb");

        let error = LoadingError {
            problem: "Invalid translation".to_string(),
            details: "expected value at line 1 column 1".to_string(),
            filename: PathBuf::from("de.json"),
        };
        assert_eq!(
            error.to_string(),
            "Invalid translation: de.json: expected value at line 1 column 1"
        );
    }

    #[test]
    fn database_error_display() {
        let error = DatabaseError::DuplicateFlag {
            blockid: "forever".to_string(),
            first: "cstart".to_string(),
            second: "celse".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "block 'forever' has two structural flags, 'cstart' and 'celse'"
        );
    }
}
