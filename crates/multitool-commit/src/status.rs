//! Parsing of `git diff --name-status` output

/// Change kind, from the first letter of the status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Unknown(char),
}

impl ChangeStatus {
    pub fn from_code(code: char) -> Self {
        match code {
            'A' => ChangeStatus::Added,
            'M' => ChangeStatus::Modified,
            'D' => ChangeStatus::Deleted,
            'R' => ChangeStatus::Renamed,
            'C' => ChangeStatus::Copied,
            other => ChangeStatus::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub status: ChangeStatus,
    /// Path after the change; for renames and copies, the new path
    pub path: String,
}

impl ChangeRecord {
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}

/// Per-kind counts. Copies and unknown kinds are listed but not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub renamed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub changes: Vec<ChangeRecord>,
    pub stats: DiffStats,
}

impl DiffSummary {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Sorted, de-duplicated paths of the first five changes.
    pub fn key_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .changes
            .iter()
            .take(5)
            .map(|change| change.path.as_str())
            .collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }
}

/// Summarize `--name-status` lines.
///
/// Lines are trimmed and blank lines skipped. Fields are tab-separated; a
/// line with fewer than two fields is ignored. The first character of the
/// first field classifies the change and the last field is the path.
pub fn summarize<'a>(lines: impl IntoIterator<Item = &'a str>) -> DiffSummary {
    let mut summary = DiffSummary::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            continue;
        }
        let Some(code) = fields[0].chars().next() else {
            continue;
        };
        let status = ChangeStatus::from_code(code);

        match status {
            ChangeStatus::Added => summary.stats.added += 1,
            ChangeStatus::Modified => summary.stats.modified += 1,
            ChangeStatus::Deleted => summary.stats.deleted += 1,
            ChangeStatus::Renamed => summary.stats.renamed += 1,
            ChangeStatus::Copied | ChangeStatus::Unknown(_) => {}
        }

        summary
            .changes
            .push(ChangeRecord::new(status, fields[fields.len() - 1]));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summarize_counts_each_kind() {
        let output = "A\tsrc/app.py\nM\tREADME.md\nD\told.txt\nR100\told.py\tnew.py\nC75\ta.rs\tb.rs\n";
        let summary = summarize(output.lines());

        assert_eq!(
            summary.stats,
            DiffStats {
                added: 1,
                modified: 1,
                deleted: 1,
                renamed: 1,
            }
        );
        assert_eq!(summary.len(), 5);
        assert_eq!(
            summary.changes[3],
            ChangeRecord::new(ChangeStatus::Renamed, "new.py")
        );
        assert_eq!(summary.changes[4].status, ChangeStatus::Copied);
    }

    #[test]
    fn test_summarize_skips_blank_and_short_lines() {
        let summary = summarize(["", "   ", "M", "garbage line", "M\tkept.rs"]);
        assert_eq!(
            summary.changes,
            vec![ChangeRecord::new(ChangeStatus::Modified, "kept.rs")]
        );
    }

    #[test]
    fn test_unknown_status_is_listed_but_not_counted() {
        let summary = summarize(["T\tlink"]);
        assert_eq!(summary.changes[0].status, ChangeStatus::Unknown('T'));
        assert_eq!(summary.stats, DiffStats::default());
    }

    #[test]
    fn test_key_paths_sorted_and_limited_to_five() {
        let summary = summarize([
            "M\tz.rs", "M\ta.rs", "M\tz.rs", "M\tm.rs", "M\tb.rs", "M\tlate.rs",
        ]);
        assert_eq!(summary.key_paths(), vec!["a.rs", "b.rs", "m.rs", "z.rs"]);
    }
}
