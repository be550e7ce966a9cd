//! Seam for automated report assessment.
//!
//! No real model sits behind this trait. `SimulatedClassifier` fabricates a
//! confidence and radius after an artificial delay; `FixedClassifier` returns
//! a configured answer for tests.

use crate::incident::Confidence;
use crate::report::ReportDraft;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub confidence: Option<Confidence>,
    pub affected_radius_m: Option<u32>,
}

pub trait ClassificationProvider {
    /// How long the caller should wait before the assessment is shown.
    fn processing_delay(&self) -> Duration;

    fn assess(&mut self, draft: &ReportDraft) -> Assessment;
}

pub struct SimulatedClassifier {
    rng: StdRng,
    delay: Duration,
}

impl SimulatedClassifier {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(rng: StdRng, delay: Duration) -> Self {
        Self { rng, delay }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Self::DEFAULT_DELAY)
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), Self::DEFAULT_DELAY)
    }
}

impl ClassificationProvider for SimulatedClassifier {
    fn processing_delay(&self) -> Duration {
        self.delay
    }

    fn assess(&mut self, draft: &ReportDraft) -> Assessment {
        let assessment = Assessment {
            confidence: Some(Confidence::new(self.rng.gen_range(80..100))),
            affected_radius_m: Some(self.rng.gen_range(500..2000)),
        };
        tracing::debug!(
            category = %draft.category,
            confidence = ?assessment.confidence,
            "simulated assessment"
        );
        assessment
    }
}

#[derive(Clone, Debug, Default)]
pub struct FixedClassifier {
    pub assessment: Assessment,
}

impl FixedClassifier {
    pub fn new(assessment: Assessment) -> Self {
        Self { assessment }
    }
}

impl ClassificationProvider for FixedClassifier {
    fn processing_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn assess(&mut self, _draft: &ReportDraft) -> Assessment {
        self.assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_assessment_stays_in_range() {
        let mut classifier = SimulatedClassifier::seeded(11);
        let draft = ReportDraft::default();
        for _ in 0..200 {
            let a = classifier.assess(&draft);
            let confidence = a.confidence.map(Confidence::value).unwrap_or_default();
            let radius = a.affected_radius_m.unwrap_or_default();
            assert!((80..100).contains(&confidence));
            assert!((500..2000).contains(&radius));
        }
        assert_eq!(classifier.processing_delay(), Duration::from_secs(2));
    }

    #[test]
    fn fixed_classifier_is_deterministic_and_instant() {
        let mut classifier = FixedClassifier::default();
        assert_eq!(classifier.processing_delay(), Duration::ZERO);
        assert_eq!(classifier.assess(&ReportDraft::default()), Assessment::default());
    }
}
