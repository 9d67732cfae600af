use std::path::{Path, PathBuf};

use crate::ast::Module;
use crate::errors::Result;
use crate::parser::parse_module;

/// One analysable source file: its path, raw text, and parsed syntax tree.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
    pub module: Module,
}

impl SourceUnit {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_source(path, text)
    }

    /// Parse already-loaded source text.
    pub fn from_source(path: &Path, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let module = parse_module(path, &text)?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
            module,
        })
    }
}
