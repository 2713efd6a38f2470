//! Acceptance bounds for the viscosity grades handled at the facility.
//!
//! The table is process-wide immutable configuration. An unknown grade has no
//! entry and classifies as an unconditional FAIL downstream.

/// Acceptance bounds for one viscosity grade.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSpec {
    /// Inclusive penetration range, tenths of a millimeter.
    pub penetration_min: f64,
    pub penetration_max: f64,
    /// Minimum softening point, degC.
    pub softening_min: f64,
    /// Minimum ductility, centimeters.
    pub ductility_min: f64,
    /// Optional soft-fail band: a softening point or ductility deficiency of
    /// at most this amount below the minimum downgrades the verdict to RISK
    /// instead of FAIL, provided penetration is in range. Built-in grades are
    /// strict and carry no margin.
    pub advisory_margin: Option<f64>,
}

static VG10: GradeSpec = GradeSpec {
    penetration_min: 80.0,
    penetration_max: 100.0,
    softening_min: 40.0,
    ductility_min: 75.0,
    advisory_margin: None,
};

static VG30: GradeSpec = GradeSpec {
    penetration_min: 50.0,
    penetration_max: 70.0,
    softening_min: 47.0,
    ductility_min: 75.0,
    advisory_margin: None,
};

static VG40: GradeSpec = GradeSpec {
    penetration_min: 40.0,
    penetration_max: 60.0,
    softening_min: 50.0,
    ductility_min: 50.0,
    advisory_margin: None,
};

pub(crate) fn grade_spec(grade: &str) -> Option<&'static GradeSpec> {
    match grade.trim() {
        "VG10" => Some(&VG10),
        "VG30" => Some(&VG30),
        "VG40" => Some(&VG40),
        _ => None,
    }
}
