mod policy;

pub use policy::{LabMeasurements, LabVerdict, MeasurementError, Verdict, VerdictPolicy};

#[cfg(test)]
pub(crate) use policy::classify_with_spec;

/// Rules configuration for the verdict engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityConfig {
    pub policy: VerdictPolicy,
}

/// Stateless classifier applying the configured verdict policy to a lab test.
#[derive(Debug, Clone, Default)]
pub struct QualityEngine {
    config: QualityConfig,
}

impl QualityEngine {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Classifies one laboratory test against the delivered grade.
    ///
    /// Pure: callers must reject malformed measurements through
    /// [`LabMeasurements::validated`] before reaching the engine.
    pub fn classify(&self, grade: &str, measurements: &LabMeasurements) -> LabVerdict {
        match self.config.policy {
            VerdictPolicy::GradeAware => policy::classify_graded(grade, measurements),
            VerdictPolicy::UngradedScreen => policy::classify_ungraded(measurements),
        }
    }
}
