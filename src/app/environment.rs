// Location hash and test-harness detection, kept behind a trait so the
// panel logic never touches process-wide state directly.

use std::str::FromStr;
use url::Url;

/// Access to the app's location hash.
pub trait Environment {
    /// Current hash, including the leading `#` when non-empty.
    fn hash(&self) -> String;
    /// Replaces the current hash without adding a history entry.
    fn replace_hash(&mut self, hash: String);
    /// True when running under an automated test harness; hash writes are skipped then.
    fn is_test_harness(&self) -> bool;
}

const LOCATION_ENV: &str = "MAP_DATA_LOCATION";
const TEST_HARNESS_ENV: &str = "MAP_DATA_TEST_HARNESS";

/// In-process location used by the desktop build.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    hash: String,
    test_harness: bool,
}

impl MemoryLocation {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: normalize(hash.into()),
            test_harness: false,
        }
    }

    pub fn with_test_harness(mut self, on: bool) -> Self {
        self.test_harness = on;
        self
    }

    /// Initial location from the first CLI argument, falling back to `MAP_DATA_LOCATION`.
    /// Test-harness mode comes from `MAP_DATA_TEST_HARNESS`.
    pub fn from_process() -> Self {
        let hash = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(LOCATION_ENV).ok())
            .unwrap_or_default();
        let test_harness = std::env::var(TEST_HARNESS_ENV)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        log::info!(
            "Starting at location {:?}{}",
            hash,
            if test_harness { " (test harness)" } else { "" }
        );
        Self::new(hash).with_test_harness(test_harness)
    }
}

impl Environment for MemoryLocation {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn replace_hash(&mut self, hash: String) {
        self.hash = normalize(hash);
    }

    fn is_test_harness(&self) -> bool {
        self.test_harness
    }
}

// Accepts "#a=b", "a=b" or a full link like "app://map#a=b".
fn normalize(raw: String) -> String {
    let link = Url::from_str(raw.trim()).ok();
    let frag = match &link {
        Some(url) => url.fragment().unwrap_or_default(),
        None => raw.trim().trim_start_matches('#'),
    };
    if frag.is_empty() {
        String::new()
    } else {
        format!("#{frag}")
    }
}

pub(crate) fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
