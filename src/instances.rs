/*!
 * Endpoint instance pool for multi-instance providers.
 *
 * LibreTranslate is served by many public instances of varying
 * reliability. The pool keeps an ordered working list (user-added custom
 * instances first, then the fixed public fallback list), a set of
 * instances that failed during the current cycle, and the index of the
 * instance currently in use. Failure state persists across calls as a
 * warm cache of what last worked.
 */

use std::collections::HashSet;

use parking_lot::Mutex;
use url::Url;

/// Snapshot of pool state for the host application
#[derive(Debug, Clone)]
pub struct InstanceInfo {
    /// Instance currently selected
    pub current: String,
    /// Index of the current instance in the working list
    pub current_index: usize,
    /// Total number of instances in the working list
    pub total: usize,
    /// User-added custom instances, in priority order
    pub custom: Vec<String>,
    /// Instances marked failed in the current cycle
    pub failed: Vec<String>,
}

#[derive(Debug)]
struct PoolState {
    custom: Vec<String>,
    working: Vec<String>,
    failed: HashSet<String>,
    current: usize,
}

impl PoolState {
    fn rebuild_working(&mut self, public: &[String]) {
        self.working = self
            .custom
            .iter()
            .chain(public.iter())
            .cloned()
            .collect();
        self.current = 0;
    }
}

/// Ordered endpoint list with transient health tracking
#[derive(Debug)]
pub struct InstancePool {
    public: Vec<String>,
    state: Mutex<PoolState>,
}

fn normalize_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Url::parse(trimmed).ok()?;
    Some(trimmed.to_string())
}

impl InstancePool {
    /// Create a pool over a fixed public fallback list
    pub fn new(public: Vec<String>) -> Self {
        let working = public.clone();
        Self {
            public,
            state: Mutex::new(PoolState {
                custom: Vec::new(),
                working,
                failed: HashSet::new(),
                current: 0,
            }),
        }
    }

    /// Number of instances in the working list
    pub fn len(&self) -> usize {
        self.state.lock().working.len()
    }

    /// True when the working list is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The instance currently selected
    pub fn current(&self) -> Option<String> {
        let state = self.state.lock();
        state.working.get(state.current).cloned()
    }

    /// Mark an instance as failed for the current cycle
    pub fn mark_failed(&self, url: &str) {
        self.state.lock().failed.insert(url.to_string());
    }

    /// Advance selection to the next non-failed instance, wrapping.
    ///
    /// Starts the scan at the current index, so a healthy current
    /// instance is kept. Returns the selected instance, or None when
    /// every instance is marked failed.
    pub fn select_available(&self) -> Option<String> {
        let mut state = self.state.lock();
        let len = state.working.len();
        for offset in 0..len {
            let index = (state.current + offset) % len;
            let candidate = state.working[index].clone();
            if !state.failed.contains(&candidate) {
                state.current = index;
                return Some(candidate);
            }
        }
        None
    }

    /// Clear the failed set and restart selection from index 0.
    ///
    /// Used once per retry cycle after full exhaustion.
    pub fn reset_failures(&self) {
        let mut state = self.state.lock();
        state.failed.clear();
        state.current = 0;
    }

    /// Add a custom instance at the end of the custom section.
    ///
    /// Returns false for invalid URLs or duplicates. The working list is
    /// rebuilt (custom ++ public) and selection restarts at index 0; the
    /// failed set is preserved.
    pub fn add_custom(&self, url: &str) -> bool {
        let Some(url) = normalize_url(url) else {
            return false;
        };
        let mut state = self.state.lock();
        if state.working.contains(&url) {
            return false;
        }
        state.custom.push(url);
        state.rebuild_working(&self.public);
        true
    }

    /// Add or move a custom instance to the front, making it current
    pub fn promote_custom(&self, url: &str) -> bool {
        let Some(url) = normalize_url(url) else {
            return false;
        };
        let mut state = self.state.lock();
        state.custom.retain(|u| u != &url);
        state.custom.insert(0, url);
        state.rebuild_working(&self.public);
        true
    }

    /// Remove a custom instance; public instances cannot be removed
    pub fn remove_custom(&self, url: &str) -> bool {
        let Some(url) = normalize_url(url) else {
            return false;
        };
        let mut state = self.state.lock();
        let before = state.custom.len();
        state.custom.retain(|u| u != &url);
        if state.custom.len() == before {
            return false;
        }
        state.rebuild_working(&self.public);
        true
    }

    /// Drop every custom instance and restore the pristine public list.
    ///
    /// Returns how many custom instances were removed.
    pub fn clear_custom(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.custom.len();
        state.custom.clear();
        state.failed.clear();
        state.rebuild_working(&self.public);
        removed
    }

    /// Snapshot of the pool for display
    pub fn info(&self) -> InstanceInfo {
        let state = self.state.lock();
        let mut failed: Vec<String> = state.failed.iter().cloned().collect();
        failed.sort_unstable();
        InstanceInfo {
            current: state.working.get(state.current).cloned().unwrap_or_default(),
            current_index: state.current,
            total: state.working.len(),
            custom: state.custom.clone(),
            failed,
        }
    }
}
