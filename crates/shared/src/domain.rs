/// Rule preselected in a freshly opened playground.
pub const DEFAULT_RULE: &str = "nb-double-one-line";

/// Path of the evaluation endpoint, relative to the server base URL.
pub const EVALUATE_PATH: &str = "values";

/// Tag of one run; only the latest issued one may update the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunSeq(pub u64);

impl RunSeq {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RunSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
