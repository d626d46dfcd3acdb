//! Policy knobs for the validation pass.

/// Configuration for [`validate`](crate::validate).
#[derive(Clone, Debug)]
pub struct Config {
    /// Report undefined references as warnings instead of errors.
    ///
    /// Editor tooling runs validation on documents that are still being typed,
    /// where a missing import is expected to be transient.
    pub tolerate_partial: bool,
    /// Report `-name` omissions that no ancestor provides.
    pub check_omissions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerate_partial: false,
            check_omissions: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tolerate_partial(mut self, value: bool) -> Self {
        self.tolerate_partial = value;
        self
    }

    pub fn check_omissions(mut self, value: bool) -> Self {
        self.check_omissions = value;
        self
    }
}
