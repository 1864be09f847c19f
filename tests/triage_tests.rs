use complaint_triage::{
    ClassProbabilityDistribution, TriageDecision, TriageThreshold, MANUAL_TRIAGE_ROUTE,
};

#[cfg(test)]
mod triage_tests {
    use super::*;

    fn decide(probabilities: &[(&str, f64)], threshold: f64) -> TriageDecision {
        let distribution =
            ClassProbabilityDistribution::new(probabilities.iter().copied()).unwrap();
        TriageDecision::decide(&distribution, TriageThreshold::new(threshold).unwrap())
    }

    #[test]
    fn test_confidence_exactly_at_threshold_is_routed() {
        let decision = decide(&[("Infrastructure", 0.70), ("Sanitation", 0.30)], 0.70);

        assert_eq!(decision.predicted_label, "Infrastructure");
        assert_eq!(decision.routed_to, "Infrastructure");
        assert!(!decision.requires_human_review);
    }

    #[test]
    fn test_one_ulp_below_threshold_goes_to_manual_triage() {
        let below = f64::from_bits(0.70_f64.to_bits() - 1);
        assert!(below < 0.70);

        let decision = decide(&[("Infrastructure", below), ("Sanitation", 1.0 - below)], 0.70);

        assert_eq!(decision.predicted_label, "Infrastructure");
        assert_eq!(decision.routed_to, MANUAL_TRIAGE_ROUTE);
        assert_eq!(decision.routed_to, "MANUAL TRIAGE");
        assert!(decision.requires_human_review);
    }

    #[test]
    fn test_tie_goes_to_first_label() {
        let decision = decide(&[("B", 0.70), ("A", 0.70)], 0.70);

        assert_eq!(decision.predicted_label, "A");
        assert_eq!(decision.routed_to, "A");
        assert_eq!(decision.confidence, 0.70);
        assert!(!decision.requires_human_review);
    }

    #[test]
    fn test_low_confidence_keeps_prediction() {
        let decision = decide(
            &[("Healthcare", 0.40), ("Infrastructure", 0.35), ("Sanitation", 0.25)],
            0.70,
        );

        assert_eq!(decision.predicted_label, "Healthcare");
        assert_eq!(decision.confidence, 0.40);
        assert_eq!(decision.routed_to, MANUAL_TRIAGE_ROUTE);
    }

    #[test]
    fn test_threshold_of_one() {
        assert!(!decide(&[("A", 1.0), ("B", 0.0)], 1.0).requires_human_review);
        assert!(decide(&[("A", 0.99), ("B", 0.01)], 1.0).requires_human_review);
    }

    #[test]
    fn test_display() {
        let decision = decide(&[("Sanitation", 0.9), ("General", 0.1)], 0.70);
        assert_eq!(decision.to_string(), "Sanitation (90.00%) -> Sanitation");
    }
}
