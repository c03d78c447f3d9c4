//! The DOM-free half of the image loader: which phase an element is in and
//! what to do after a probe settles. The browser side only observes
//! elements, runs probes and mutates classes; every decision lives here so
//! the laws (single in-flight attempt, one fallback retry, placeholder
//! terminal state) are testable natively.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Pending,
    Observed,
    Loading,
    Loaded,
    Failed,
}

/// A promotion may begin only from the pre-loading phases. Repeated
/// intersection or load notifications on an element that is already
/// loading or terminal are ignored.
pub fn can_begin(phase: LoadPhase) -> bool {
    matches!(phase, LoadPhase::Pending | LoadPhase::Observed)
}

/// Timeouts and network/decode errors are indistinguishable to the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextStep {
    /// Assign this URL to the live element and mark it loaded.
    Commit(String),
    /// Re-enter loading with the fallback source.
    RetryFallback(String),
    /// The chain is exhausted; assign the generated placeholder and mark error.
    Placeholder,
}

/// Source chain for one element: a primary URL and at most one fallback.
#[derive(Clone, Debug)]
pub struct LoadPlan {
    current: String,
    fallback: Option<String>,
    fallback_tried: bool,
}

impl LoadPlan {
    pub fn new(primary: String, fallback: Option<String>) -> Self {
        let fallback = fallback
            .filter(|candidate| !candidate.trim().is_empty() && *candidate != primary);
        Self {
            current: primary,
            fallback,
            fallback_tried: false,
        }
    }

    /// The URL the next probe should fetch.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn after_probe(&mut self, outcome: ProbeOutcome) -> NextStep {
        match outcome {
            ProbeOutcome::Success => NextStep::Commit(self.current.clone()),
            ProbeOutcome::Failure => match self.fallback.clone() {
                Some(fallback) if !self.fallback_tried => {
                    self.fallback_tried = true;
                    self.current = fallback.clone();
                    NextStep::RetryFallback(fallback)
                }
                _ => NextStep::Placeholder,
            },
        }
    }
}

/// Builds the source chain for a deferred image: the breakpoint variant as
/// primary when the category publishes variants (the unadorned source backs
/// it up), otherwise the source itself, with `data-fallback-src` taking
/// precedence as the single retry in both cases.
pub fn plan_for(
    original: &str,
    fallback_attr: Option<&str>,
    profile: &crate::breakpoints::BreakpointProfile,
    variants: bool,
    webp: bool,
) -> LoadPlan {
    if !variants {
        return LoadPlan::new(original.to_string(), fallback_attr.map(str::to_string));
    }
    let primary = crate::breakpoints::variant_url(original, profile, webp);
    let fallback = fallback_attr
        .map(str::to_string)
        .or_else(|| Some(original.to_string()));
    LoadPlan::new(primary, fallback)
}
