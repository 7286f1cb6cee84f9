/// Outcome of qualifying a single relative specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier already names a file and is left as is
    AlreadyQualified(String),
    /// The specifier needs a suffix to name a file
    Rewritten { from: String, to: String },
    /// No file matched under any suffix
    Unresolvable(String),
}

/// Counters collected while walking one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub files_scanned: usize,
    /// Files with at least one rewritten specifier (written back unless dry run)
    pub files_rewritten: usize,
    pub specifiers_rewritten: usize,
    pub specifiers_qualified: usize,
    pub specifiers_unresolvable: usize,
}

impl WalkSummary {
    pub(crate) fn tally(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::AlreadyQualified(_) => self.specifiers_qualified += 1,
            Resolution::Rewritten { .. } => self.specifiers_rewritten += 1,
            Resolution::Unresolvable(_) => self.specifiers_unresolvable += 1,
        }
    }

    /// Fold the counters of another package run into this one
    pub fn merge(&mut self, other: &WalkSummary) {
        self.files_scanned += other.files_scanned;
        self.files_rewritten += other.files_rewritten;
        self.specifiers_rewritten += other.specifiers_rewritten;
        self.specifiers_qualified += other.specifiers_qualified;
        self.specifiers_unresolvable += other.specifiers_unresolvable;
    }
}
