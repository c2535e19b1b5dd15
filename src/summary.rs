use std::fmt;

/// Aggregate counters for one batch run.
///
/// `succeeded + failed + skipped` always equals the number of manifest
/// entries visited. Skips (missing source files) are counted apart from
/// failures and never produce output files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub const fn new() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            skipped: 0,
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub const fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "✅ Processed: {} images", self.succeeded)?;
        if self.failed > 0 {
            writeln!(f, "❌ Failed: {} images", self.failed)?;
        }
        if self.skipped > 0 {
            writeln!(f, "⚠ Skipped (not found): {} images", self.skipped)?;
        }
        write!(f, "{}", "=".repeat(60))
    }
}
