use crate::app_error::AppError;
use crate::response_parser::Action;
use path_clean::PathClean;
use std::fs;
use std::path::{Path, PathBuf};

struct TestFileRule {
    extension: &'static str,
    is_test_file: fn(&str) -> bool,
    marker: &'static str,
}

const TEST_FILE_RULES: &[TestFileRule] = &[
    TestFileRule {
        extension: "go",
        is_test_file: |name| name.ends_with("_test.go"),
        marker: "package",
    },
    TestFileRule {
        extension: "py",
        is_test_file: |name| name.starts_with("test_"),
        marker: "from . import",
    },
    TestFileRule {
        extension: "js",
        is_test_file: |name| name.starts_with("test_") || name.ends_with(".test.js"),
        marker: "const { ",
    },
];

pub fn write_action_file(action: &Action) -> Result<PathBuf, AppError> {
    let path = action.path().ok_or_else(|| {
        AppError::FileUpdate(format!("{} action has no path", action.kind().label()))
    })?;
    let content = normalize_content(path, action.content());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::FileUpdate(format!(
                    "Failed to create parent directory for {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, content).map_err(|e| {
        AppError::FileUpdate(format!("Failed to write to file {}: {}", path.display(), e))
    })?;
    Ok(path.to_path_buf())
}

pub fn normalize_content(path: &Path, content: &str) -> String {
    let content = trim_indentation(content);

    let Some(rule) = matching_rule(path) else {
        return content;
    };
    let Some(dir_name) = containing_dir_name(path) else {
        return content;
    };
    ensure_marker_line(&content, rule.marker, &dir_name)
}

// Every line but the first loses its leading whitespace.
fn trim_indentation(content: &str) -> String {
    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| if i == 0 { line } else { line.trim_start() })
        .collect::<Vec<_>>()
        .join("\n")
}

fn matching_rule(path: &Path) -> Option<&'static TestFileRule> {
    let extension = path.extension()?.to_str()?;
    let file_name = path.file_name()?.to_str()?;
    TEST_FILE_RULES
        .iter()
        .find(|rule| rule.extension == extension && (rule.is_test_file)(file_name))
}

fn containing_dir_name(path: &Path) -> Option<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    let parent = absolute.clean().parent()?.to_path_buf();
    parent.file_name()?.to_str().map(str::to_string)
}

fn ensure_marker_line(content: &str, marker: &str, dir_name: &str) -> String {
    let mut replaced = false;
    content
        .split('\n')
        .map(|line| {
            if !replaced && line.trim().starts_with(marker) {
                replaced = true;
                format!("{} {}", marker.trim_end(), dir_name)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
