/// Classification for retry policy.
///
/// Used by callers to decide how long a failed lookup should be remembered
/// and whether asking again later can succeed.
///
/// | Class | Retry later? | Typical cause |
/// |-------|--------------|---------------|
/// | `Never` | No | Unknown identifier, malformed request |
/// | `WithBackoff` | Yes, after a short delay | Rate limiting, timeout, network |
/// | `NextProvider` | Yes, with another source | Provider-side failure |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// The answer will not change by asking again.
    Never,

    /// Transient failure. Retry after a delay.
    WithBackoff,

    /// This provider could not answer; another source might.
    NextProvider,
}

impl RetryClass {
    /// Whether the failure is transient and the same request may succeed later.
    pub fn is_transient(self) -> bool {
        !matches!(self, RetryClass::Never)
    }
}
