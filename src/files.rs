use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use globwalk::GlobWalkerBuilder;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("NoFilesFound")]
    NoFilesFound { guidance: String },
}

/// Roster files matching a glob such as "./input/**/*.txt", sorted by path.
pub fn enumerate_rosters(glob_pattern: &str) -> Result<Vec<PathBuf>, EnumerateError> {
    let no_files = || EnumerateError::NoFilesFound { guidance: folder_guidance(glob_pattern) };
    let (root, pattern) = if Path::new(glob_pattern).is_absolute() {
        ("/", glob_pattern)
    } else {
        (".", glob_pattern.strip_prefix("./").unwrap_or(glob_pattern))
    };

    let mut rosters: Vec<PathBuf> = GlobWalkerBuilder::from_patterns(root, &[pattern])
        .case_insensitive(false)
        .follow_links(false)
        .build()
        .map_err(|_| no_files())?
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .collect();

    if rosters.is_empty() {
        return Err(no_files());
    }
    rosters.sort();
    Ok(rosters)
}

fn folder_guidance(glob_pattern: &str) -> String {
    format!(
        "{} 패턴에 해당하는 명단 파일이 없습니다.\n한 줄에 승객 한 명씩 적은 텍스트 파일을 넣어주세요.\n예: 1. 김진욱(입완, 양재, 1)",
        glob_pattern
    )
}

pub fn slugify(base: &str) -> String {
    let lower = base.to_lowercase();
    let mut collapsed = String::with_capacity(lower.len());
    let mut prev_dash = true;
    for ch in lower.chars() {
        if ch.is_alphanumeric() {
            collapsed.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            collapsed.push('-');
            prev_dash = true;
        }
    }
    let trimmed = collapsed.trim_end_matches('-');
    if trimmed.is_empty() {
        "roster".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Append `-1`, `-2`, ... until the slug is unused.
pub fn unique_slug(slug_in: String, used: &mut HashSet<String>) -> String {
    if used.insert(slug_in.clone()) {
        return slug_in;
    }
    let mut i = 1;
    loop {
        let candidate = format!("{}-{}", slug_in, i);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        i += 1;
    }
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("WriteFailed: {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("EncodeFailed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitPaths {
    pub md_path: String,
    pub meta_path: String,
}

/// Write `<stem>.md` and `<stem>.meta.json` under `outdir`, replacing any previous report.
pub fn emit_files(markdown: &str, meta: &serde_json::Value, outdir: &str, stem: &str) -> Result<EmitPaths, EmitError> {
    let dir = Path::new(outdir);
    std::fs::create_dir_all(dir).map_err(|source| EmitError::WriteFailed { path: dir.to_path_buf(), source })?;

    let md_path = dir.join(format!("{}.md", stem));
    let meta_path = dir.join(format!("{}.meta.json", stem));
    persist_in(dir, &md_path, markdown.as_bytes())?;
    persist_in(dir, &meta_path, &serde_json::to_vec_pretty(meta)?)?;

    Ok(EmitPaths { md_path: md_path.display().to_string(), meta_path: meta_path.display().to_string() })
}

/// Stage `bytes` in a temp file next to `target`, then rename it into place.
fn persist_in(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), EmitError> {
    let fail = |source: std::io::Error| EmitError::WriteFailed { path: target.to_path_buf(), source };
    let mut staged = NamedTempFile::new_in(dir).map_err(fail)?;
    staged.write_all(bytes).map_err(fail)?;
    staged.persist(target).map_err(|e| fail(e.error))?;
    Ok(())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Attach `meta_fingerprint`: sha256 of the meta without its `timestamps` key.
pub fn with_fingerprint(meta: serde_json::Value) -> serde_json::Value {
    let mut norm = meta.clone();
    if let Some(obj) = norm.as_object_mut() {
        obj.remove("timestamps");
    }
    let bytes = serde_json::to_vec(&norm).unwrap_or_default();
    let mut full = meta.as_object().cloned().unwrap_or_default();
    full.insert("meta_fingerprint".to_string(), serde_json::json!(sha256_hex(&bytes)));
    serde_json::Value::Object(full)
}
