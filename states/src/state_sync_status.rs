#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Never computed; runs on the next `run_computed`.
    #[default]
    BeforeInit,
    /// Changed since the last `run_computed`; dependents will re-run.
    Dirty,
    Clean,
}
