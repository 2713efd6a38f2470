use serde::{Deserialize, Serialize};

use super::super::grades::{grade_spec, GradeSpec};

/// Lab-acceptance outcome for a delivered grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Risk,
    Fail,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Risk => "RISK",
            Verdict::Fail => "FAIL",
        }
    }
}

/// Verdict plus the annotation stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabVerdict {
    pub verdict: Verdict,
    pub comment: String,
}

impl LabVerdict {
    fn new(verdict: Verdict, comment: impl Into<String>) -> Self {
        Self {
            verdict,
            comment: comment.into(),
        }
    }
}

/// The two verdict policies observed in the field.
///
/// `GradeAware` is the unified primary policy. `UngradedScreen` preserves the
/// legacy grade-blind screen (generic VG30-shaped thresholds) as an explicitly
/// named secondary variant; it is not wired into the default service
/// configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerdictPolicy {
    #[default]
    GradeAware,
    UngradedScreen,
}

/// Raised before classification when a measurement is not a usable number.
#[derive(Debug, thiserror::Error)]
#[error("measurement '{name}' must be a finite non-negative number, got {value}")]
pub struct MeasurementError {
    pub name: &'static str,
    pub value: f64,
}

/// Validated measurement triple handed to the verdict engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabMeasurements {
    pub penetration: f64,
    pub softening_point: f64,
    pub ductility: f64,
}

impl LabMeasurements {
    pub fn validated(
        penetration: f64,
        softening_point: f64,
        ductility: f64,
    ) -> Result<Self, MeasurementError> {
        for (name, value) in [
            ("penetration", penetration),
            ("softening_point", softening_point),
            ("ductility", ductility),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MeasurementError { name, value });
            }
        }

        Ok(Self {
            penetration,
            softening_point,
            ductility,
        })
    }
}

pub(super) fn classify_graded(grade: &str, m: &LabMeasurements) -> LabVerdict {
    match grade_spec(grade) {
        Some(spec) => classify_with_spec(spec, grade, m),
        None => LabVerdict::new(Verdict::Fail, format!("unrecognized grade '{}'", grade.trim())),
    }
}

pub(crate) fn classify_with_spec(spec: &GradeSpec, grade: &str, m: &LabMeasurements) -> LabVerdict {
    let grade = grade.trim();

    if m.penetration < spec.penetration_min || m.penetration > spec.penetration_max {
        return LabVerdict::new(
            Verdict::Fail,
            format!(
                "penetration {} outside {}-{} for {grade}",
                m.penetration, spec.penetration_min, spec.penetration_max
            ),
        );
    }

    let margin = spec.advisory_margin.unwrap_or(0.0);

    if m.softening_point < spec.softening_min - margin {
        return LabVerdict::new(
            Verdict::Fail,
            format!(
                "softening point {} below minimum {} for {grade}",
                m.softening_point, spec.softening_min
            ),
        );
    }
    if m.ductility < spec.ductility_min - margin {
        return LabVerdict::new(
            Verdict::Fail,
            format!(
                "ductility {} below minimum {} for {grade}",
                m.ductility, spec.ductility_min
            ),
        );
    }

    if m.softening_point < spec.softening_min {
        return LabVerdict::new(
            Verdict::Risk,
            format!(
                "softening point {} within advisory margin below minimum {} for {grade}",
                m.softening_point, spec.softening_min
            ),
        );
    }
    if m.ductility < spec.ductility_min {
        return LabVerdict::new(
            Verdict::Risk,
            format!(
                "ductility {} within advisory margin below minimum {} for {grade}",
                m.ductility, spec.ductility_min
            ),
        );
    }

    LabVerdict::new(
        Verdict::Pass,
        format!("all parameters within acceptable limits for {grade}"),
    )
}

// Legacy screen: fixed VG30-shaped thresholds, grade ignored entirely.
pub(super) fn classify_ungraded(m: &LabMeasurements) -> LabVerdict {
    if m.penetration < 50.0 || m.penetration > 70.0 {
        return LabVerdict::new(Verdict::Fail, "penetration out of acceptable range");
    }
    if m.softening_point < 47.0 {
        return LabVerdict::new(Verdict::Risk, "low softening point may cause rutting");
    }
    if m.ductility < 75.0 {
        return LabVerdict::new(Verdict::Risk, "low ductility - cracking risk");
    }

    LabVerdict::new(Verdict::Pass, "all parameters within acceptable limits")
}
