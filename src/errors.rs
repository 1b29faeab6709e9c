/// Run-level failure taxonomy. Both variants abort the run, get recorded as
/// a Failed audit row, and propagate to the scheduler's retry policy.
/// Degraded-but-continuing conditions (scores feed down) and per-record
/// skips never surface here.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("upcoming-match acquisition failed: {0}")]
    Acquisition(#[source] anyhow::Error),

    #[error("run failed during {stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl RunError {
    pub fn stage(stage: &'static str, source: anyhow::Error) -> Self {
        RunError::Stage { stage, source }
    }
}
