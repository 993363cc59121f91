/// What to do with a constraint segment the parser does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownConstraintPolicy {
    /// Skip it silently.
    #[default]
    Ignore,
    /// Fail the decode with [`DecodeError::UnknownConstraint`](crate::DecodeError::UnknownConstraint).
    Reject,
}

/// Decoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_constraints: UnknownConstraintPolicy,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_constraints(mut self, policy: UnknownConstraintPolicy) -> Self {
        self.unknown_constraints = policy;
        self
    }
}
