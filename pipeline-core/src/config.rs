use std::path::{Path, PathBuf};

/// Verbosity at which the bridge logs every lexeme it handles.
pub const LOG_LEXEMES_VERBOSITY: u8 = 2;

/// Settings shared by every step of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Source file recorded in every token; `None` for in-memory input.
    pub file_path: Option<PathBuf>,
    /// Level of debug output. At [`LOG_LEXEMES_VERBOSITY`] and above, each
    /// skipped or delivered lexeme is logged.
    pub verbosity: u8,
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub(crate) fn logs_lexemes(&self) -> bool {
        self.verbosity >= LOG_LEXEMES_VERBOSITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.file_path(), None);
        assert_eq!(config.verbosity, 0);
        assert!(!config.logs_lexemes());
    }

    #[test]
    fn test_builder() {
        let config = BridgeConfig::new()
            .with_file_path("main.lm")
            .with_verbosity(2);
        assert_eq!(config.file_path(), Some(Path::new("main.lm")));
        assert!(config.logs_lexemes());
    }
}
