use crate::domain::model::Fragment;
use crate::domain::ports::FragmentLookup;
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory fragment set, keyed by fragment name.
#[derive(Debug, Clone, Default)]
pub struct FragmentSet {
    fragments: HashMap<String, Fragment>,
}

impl FragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入片段；同名片段已存在時回傳 false 並保留原片段
    pub fn insert(&mut self, fragment: Fragment) -> bool {
        if self.fragments.contains_key(fragment.name()) {
            return false;
        }
        self.fragments.insert(fragment.name().to_string(), fragment);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fragments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FragmentLookup for FragmentSet {
    fn lookup(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }
}

impl<N, C> FromIterator<(N, C)> for FragmentSet
where
    N: Into<String>,
    C: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut set = FragmentSet::new();
        for (name, content) in iter {
            set.insert(Fragment::new(name, content));
        }
        set
    }
}

/// 從本機目錄載入所有片段檔案。
///
/// 每個檔案以 `/` 分隔的相對路徑註冊（如 `inc/header.inc.php`），
/// 並在不衝突時以去掉最後副檔名的路徑作為別名（如 `inc/header.inc`）。
#[derive(Debug, Clone)]
pub struct LocalFragmentStore {
    base_path: PathBuf,
}

impl LocalFragmentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn load(&self) -> Result<FragmentSet> {
        let mut files = Vec::new();
        collect_files(&self.base_path, &mut files)?;
        files.sort();

        let mut set = FragmentSet::new();
        let mut aliases = Vec::new();

        for path in &files {
            let Some(name) = fragment_name(&self.base_path, path) else {
                tracing::warn!("⚠️ Skipping fragment with non UTF-8 path: {}", path.display());
                continue;
            };
            let fragment = Fragment::new(name, fs::read(path)?);

            if let Some(alias) = strip_extension(fragment.name()) {
                aliases.push(fragment.renamed(alias));
            }
            set.insert(fragment);
        }

        // 完整路徑優先，別名只補上尚未使用的名稱
        for alias in aliases {
            let alias_name = alias.name().to_string();
            if !set.insert(alias) {
                tracing::debug!("Fragment alias '{}' already taken, skipping", alias_name);
            }
        }

        tracing::info!(
            "📦 Loaded {} fragment files ({} names) from {}",
            files.len(),
            set.len(),
            self.base_path.display()
        );
        Ok(set)
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut visited = HashSet::new();
    visited.insert(fs::canonicalize(dir)?);
    walk_dir(dir, files, &mut visited)
}

/// 遞迴收集檔案；符號連結會跟隨到目標，已走過的目錄不重複進入
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, visited: &mut HashSet<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let mut file_type = entry.file_type()?;

        if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(metadata) => file_type = metadata.file_type(),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping broken fragment link {}: {}", path.display(), e);
                    continue;
                }
            }
        }

        if file_type.is_dir() {
            if visited.insert(fs::canonicalize(&path)?) {
                walk_dir(&path, files, visited)?;
            } else {
                tracing::warn!("⚠️ Skipping already visited directory {}", path.display());
            }
        } else if file_type.is_file() {
            files.push(path);
        } else {
            tracing::warn!("⚠️ Skipping non-regular fragment entry {}", path.display());
        }
    }
    Ok(())
}

fn fragment_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn strip_extension(name: &str) -> Option<String> {
    let (dir, file) = match name.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, name),
    };
    let (stem, _ext) = file.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(match dir {
        Some(dir) => format!("{}/{}", dir, stem),
        None => stem.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_set_keeps_first_insert() {
        let mut set = FragmentSet::new();
        assert!(set.insert(Fragment::new("menu", "<nav/>")));
        assert!(!set.insert(Fragment::new("menu", "<ul/>")));
        assert_eq!(set.lookup("menu").unwrap().content(), b"<nav/>");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("header.html"), Some("header".to_string()));
        assert_eq!(
            strip_extension("inc/header.inc.php"),
            Some("inc/header.inc".to_string())
        );
        assert_eq!(strip_extension("menu"), None);
        assert_eq!(strip_extension("inc/.hidden"), None);
        assert_eq!(strip_extension("v1.2/menu"), None);
    }
}
