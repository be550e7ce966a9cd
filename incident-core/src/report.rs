use crate::classifier::{ClassificationProvider, SimulatedClassifier};
use crate::error::DashboardError;
use crate::geo;
use crate::incident::{Category, Confidence, Coordinates, Severity};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// In-progress form contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            category: Category::Flooding,
            title: String::new(),
            description: String::new(),
            severity: Severity::Medium,
        }
    }
}

impl ReportDraft {
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// A report ready to become an incident. Missing confidence and radius are
/// filled with configured defaults by the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmittedReport {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub location: Coordinates,
    pub confidence: Option<Confidence>,
    pub affected_radius_m: Option<u32>,
}

impl SubmittedReport {
    pub fn new(
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        location: Coordinates,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            severity,
            location,
            confidence: None,
            affected_radius_m: None,
        }
    }
}

pub fn validate_report(report: &SubmittedReport) -> Result<(), DashboardError> {
    if report.title.trim().is_empty() {
        return Err(DashboardError::InvalidReport("title is required".into()));
    }
    if report.description.trim().is_empty() {
        return Err(DashboardError::InvalidReport("description is required".into()));
    }
    if !report.location.is_valid() {
        return Err(DashboardError::InvalidReport(format!(
            "coordinates out of range: {}, {}",
            report.location.latitude, report.location.longitude
        )));
    }
    Ok(())
}

/// Turns a draft into a `SubmittedReport` using a classification provider
/// and the user's position, if known.
pub struct ReportComposer<P> {
    provider: P,
    rng: StdRng,
    fallback: Coordinates,
}

impl ReportComposer<SimulatedClassifier> {
    pub fn simulated(seed: Option<u64>, fallback: Coordinates, delay: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let provider_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        Self::new(SimulatedClassifier::new(provider_rng, delay), rng, fallback)
    }
}

impl<P: ClassificationProvider> ReportComposer<P> {
    pub fn new(provider: P, rng: StdRng, fallback: Coordinates) -> Self {
        Self {
            provider,
            rng,
            fallback,
        }
    }

    pub fn processing_delay(&self) -> Duration {
        self.provider.processing_delay()
    }

    pub fn compose(
        &mut self,
        draft: &ReportDraft,
        user_location: Option<Coordinates>,
    ) -> Result<SubmittedReport, DashboardError> {
        if !draft.is_submittable() {
            return Err(DashboardError::InvalidReport(
                "title and description are required".into(),
            ));
        }

        let assessment = self.provider.assess(draft);
        let location = geo::report_location(user_location, self.fallback, &mut self.rng);

        Ok(SubmittedReport {
            category: draft.category,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            severity: draft.severity,
            location,
            confidence: assessment.confidence,
            affected_radius_m: assessment.affected_radius_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Assessment, FixedClassifier};
    use crate::config::NEW_YORK;

    fn draft() -> ReportDraft {
        ReportDraft {
            category: Category::Fire,
            title: "  Smoke on Elm  ".into(),
            description: "Thick smoke near the school".into(),
            severity: Severity::High,
        }
    }

    fn fixed_composer() -> ReportComposer<FixedClassifier> {
        ReportComposer::new(
            FixedClassifier::new(Assessment {
                confidence: Some(Confidence::new(91)),
                affected_radius_m: Some(640),
            }),
            StdRng::seed_from_u64(3),
            NEW_YORK,
        )
    }

    #[test]
    fn blank_drafts_are_not_submittable() {
        let mut d = ReportDraft::default();
        assert!(!d.is_submittable());
        d.title = "x".into();
        d.description = "   ".into();
        assert!(!d.is_submittable());
        assert!(fixed_composer().compose(&d, None).is_err());
    }

    #[test]
    fn compose_uses_user_location_and_assessment() {
        let here = Coordinates::new(51.5, -0.12);
        let report = fixed_composer().compose(&draft(), Some(here)).expect("compose");
        assert_eq!(report.location, here);
        assert_eq!(report.title, "Smoke on Elm");
        assert_eq!(report.confidence, Some(Confidence::new(91)));
        assert_eq!(report.affected_radius_m, Some(640));
        assert_eq!(report.category, Category::Fire);
    }

    #[test]
    fn compose_without_location_jitters_around_fallback() {
        let report = fixed_composer().compose(&draft(), None).expect("compose");
        assert!((report.location.latitude - NEW_YORK.latitude).abs() <= 0.005);
        assert!((report.location.longitude - NEW_YORK.longitude).abs() <= 0.005);
    }

    #[test]
    fn validate_rejects_bad_coordinates() {
        let report = SubmittedReport::new(
            Category::Traffic,
            "Crash",
            "Two cars",
            Severity::Low,
            Coordinates::new(120.0, 0.0),
        );
        assert!(matches!(
            validate_report(&report),
            Err(DashboardError::InvalidReport(_))
        ));
    }
}
