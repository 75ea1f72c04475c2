use crate::host::QualityEngine;

/// Everything the ceremony needs from configuration, fixed for one invocation.
///
/// The context owns the engine handle; dropping the context releases it.
#[derive(Debug)]
pub struct PolicyContext<E> {
    retry_budget: u32,
    debug: bool,
    engine: E,
}

impl<E: QualityEngine> PolicyContext<E> {
    /// A zero budget is treated as the default of one attempt.
    pub fn new(engine: E, retry_budget: u32, debug: bool) -> Self {
        Self {
            retry_budget: retry_budget.max(1),
            debug,
            engine,
        }
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
