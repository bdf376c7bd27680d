use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use super::model::{iteration_of, ProfileError};

// ---------------------------------------------------------------------------
// FilePattern – `prefix*suffix` wildcard
// ---------------------------------------------------------------------------

/// A file name pattern with at most one `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    prefix: String,
    /// `None` for a literal pattern without `*`.
    suffix: Option<String>,
}

impl FilePattern {
    pub fn parse(pattern: &str) -> Result<Self, ProfileError> {
        match pattern.split_once('*') {
            None => Ok(FilePattern {
                prefix: pattern.to_string(),
                suffix: None,
            }),
            Some((_, rest)) if rest.contains('*') => {
                Err(ProfileError::InvalidPattern(pattern.to_string()))
            }
            Some((prefix, suffix)) => Ok(FilePattern {
                prefix: prefix.to_string(),
                suffix: Some(suffix.to_string()),
            }),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.suffix {
            None => name == self.prefix,
            Some(suffix) => {
                name.len() >= self.prefix.len() + suffix.len()
                    && name.starts_with(&self.prefix)
                    && name.ends_with(suffix.as_str())
            }
        }
    }
}

impl FromStr for FilePattern {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilePattern::parse(s)
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}*{}", self.prefix, suffix),
            None => write!(f, "{}", self.prefix),
        }
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        FilePattern {
            prefix: "flow_profile_it".to_string(),
            suffix: Some(".csv".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// List the files in `dir` matching `pattern`, ordered by iteration number
/// and then by name. A directory that does not exist contains no profiles.
pub fn find_profiles(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::debug!("{} is not a directory, nothing to plot", dir.display());
        return Ok(Vec::new());
    }

    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if pattern.matches(name) {
            found.push(path);
        } else {
            log::trace!("skipping {name}");
        }
    }

    found.sort_by(|a, b| {
        iteration_of(a)
            .cmp(&iteration_of(b))
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
    log::debug!("{} profile(s) found in {}", found.len(), dir.display());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_prefix_and_suffix() {
        let p = FilePattern::parse("flow_profile_it*.csv").unwrap();
        assert_eq!(p, FilePattern::default());
        assert_eq!(p.to_string(), "flow_profile_it*.csv");
        assert!(p.matches("flow_profile_it10.csv"));
        assert!(p.matches("flow_profile_it.csv"));
        assert!(!p.matches("flow_profile_it10.csv.bak"));
        assert!(!p.matches("particle_profiling_10.csv"));
    }

    #[test]
    fn prefix_and_suffix_do_not_overlap() {
        let p = FilePattern::parse("ab*ba").unwrap();
        assert!(p.matches("abba"));
        assert!(!p.matches("aba"));
    }

    #[test]
    fn literal_pattern_matches_one_name() {
        let p = FilePattern::parse("profile.csv").unwrap();
        assert!(p.matches("profile.csv"));
        assert!(!p.matches("profile.csv2"));
    }

    #[test]
    fn two_wildcards_are_rejected() {
        assert_eq!(
            FilePattern::parse("*_it*.csv"),
            Err(ProfileError::InvalidPattern("*_it*.csv".into()))
        );
    }

    #[test]
    fn missing_directory_is_empty() {
        let found = find_profiles(
            Path::new("/definitely/not/a/statistics/dir"),
            &FilePattern::default(),
        )
        .unwrap();
        assert!(found.is_empty());
    }
}
