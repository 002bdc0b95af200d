use crate::app_error::AppError;
use ignore::WalkBuilder;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Go,
    JavaScript,
    TypeScript,
    Rust,
    Java,
    C,
    Ruby,
    Shell,
    Unknown,
}

const EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("go", Language::Go),
    ("js", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("rs", Language::Rust),
    ("java", Language::Java),
    ("c", Language::C),
    ("h", Language::C),
    ("rb", Language::Ruby),
    ("sh", Language::Shell),
];

impl Language {
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Language::Unknown;
        };
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, language)| *language)
            .unwrap_or(Language::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Go => "Go",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Rust => "Rust",
            Language::Java => "Java",
            Language::C => "C",
            Language::Ruby => "Ruby",
            Language::Shell => "Shell",
            Language::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub path: PathBuf,
    pub content: String,
    pub language: Language,
}

impl File {
    pub(crate) fn read(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read context file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            language: Language::from_path(path),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
    pub files: Vec<File>,
}

impl FileContext {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn load_single_file(path: &Path) -> Result<FileContext, AppError> {
    Ok(FileContext {
        files: vec![File::read(path)?],
    })
}

/// Walks `dir` recursively and includes every regular file, hidden or ignored
/// ones too. Entries are visited in file-name order.
pub fn load_directory(dir: &Path) -> Result<FileContext, AppError> {
    if !dir.is_dir() {
        return Err(AppError::Config(format!(
            "Context directory '{}' does not exist or is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for result in walker {
        let entry =
            result.map_err(|e| AppError::Config(format!("Error walking directory: {e}")))?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(File::read(entry.path())?);
        }
    }

    tracing::debug!(count = files.len(), dir = %dir.display(), "loaded context directory");
    Ok(FileContext { files })
}
