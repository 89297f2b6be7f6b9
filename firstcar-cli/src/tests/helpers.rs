//! Scratch workspaces holding answer files and catalogs for CLI tests.

use camino::Utf8PathBuf;
use firstcar_core::test_support::sample_catalog;
use firstcar_scorer::RawAnswer;
use tempfile::TempDir;

pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn answers_path(&self) -> Utf8PathBuf {
        self.root.join("answers.json")
    }

    pub(super) fn json_catalog_path(&self) -> Utf8PathBuf {
        self.root.join("catalog.json")
    }

    pub(super) fn sqlite_catalog_path(&self) -> Utf8PathBuf {
        self.root.join("catalog.db")
    }

    pub(super) fn write_answers(&self, answers: &[RawAnswer]) {
        let payload = serde_json::to_string_pretty(answers).expect("serialize answers");
        write_utf8(&self.answers_path(), payload.as_bytes());
    }

    pub(super) fn write_json_catalog(&self) {
        let payload = serde_json::to_string_pretty(&sample_catalog()).expect("serialize catalog");
        write_utf8(&self.json_catalog_path(), payload.as_bytes());
    }

    #[cfg(feature = "store-sqlite")]
    pub(super) fn write_sqlite_catalog(&self) {
        firstcar_core::test_support::write_sqlite_catalog(
            self.sqlite_catalog_path().as_std_path(),
            &sample_catalog(),
        )
        .expect("write sqlite catalog");
    }
}

/// Budget capped at $20k and maximum safety, both weighted heavily.
pub(super) fn cautious_answers() -> Vec<RawAnswer> {
    vec![
        RawAnswer::single("budget", "15k-20k").with_priority(5),
        RawAnswer::single("safety", "max").with_priority(4),
        RawAnswer::text("notes", "first car for our daughter"),
    ]
}

pub(super) fn write_utf8(path: &Utf8PathBuf, contents: &[u8]) {
    firstcar_fs::write_utf8_file(path, contents).expect("write fixture");
}
