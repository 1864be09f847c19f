use complaint_triage::{
    PipelineConfig, Predictor, Trainer, TrainingRecord, TriageThreshold, MANUAL_TRIAGE_ROUTE,
};
use std::fs;
use std::thread;
use tempfile::TempDir;
use test_utils::{fixture_predictor, municipal_complaint_corpus, write_corpus_csv};

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_pothole_is_routed_to_infrastructure() {
        let predictor = fixture_predictor();
        let decision = predictor.classify("pothole on road is crumbling on the main highway.");

        assert_eq!(decision.predicted_label, "Infrastructure");
        assert_eq!(decision.routed_to, "Infrastructure");
        assert!(decision.confidence >= 0.70, "{}", decision);
        assert!(!decision.requires_human_review);
    }

    #[test]
    fn test_stress_scenarios() {
        let predictor = fixture_predictor();

        let decision = predictor.classify(
            "The clerk at the city hall refused to help me with my birth certificate and asked for money.",
        );
        assert_eq!(decision.predicted_label, "Administration");

        let decision = predictor.classify("There is a garbage pile near the park attracting rats");
        assert_eq!(decision.predicted_label, "Sanitation");
    }

    #[test]
    fn test_empty_input_never_fails() {
        let predictor = fixture_predictor();

        for text in ["", "   ", "!!!", "the and of"] {
            let decision = predictor.classify(text);
            assert!(predictor.labels().contains(&decision.predicted_label));
            assert!((0.0..=1.0).contains(&decision.confidence));
            if decision.requires_human_review {
                assert_eq!(decision.routed_to, MANUAL_TRIAGE_ROUTE);
            }
        }
    }

    #[test]
    fn test_out_of_vocabulary_input_is_low_confidence() {
        let predictor = fixture_predictor().with_threshold(TriageThreshold::new(0.9).unwrap());
        let decision = predictor.classify("xylophone quokka zeppelin");

        assert!(decision.requires_human_review);
        assert_eq!(decision.routed_to, MANUAL_TRIAGE_ROUTE);
    }

    #[test]
    fn test_csv_round_trip_through_trainer() {
        let workspace = TempDir::new().unwrap();
        let csv_path = workspace.path().join("complaints.csv");
        let model_dir = workspace.path().join("model");

        let corpus = municipal_complaint_corpus();
        write_corpus_csv(&corpus, &csv_path).unwrap();

        let records = TrainingRecord::read_from_path(&csv_path).unwrap();
        assert_eq!(records, corpus);

        let config = PipelineConfig {
            max_vocabulary_size: 500,
            ..PipelineConfig::default()
        };
        let outcome = Trainer::new(config.clone())
            .unwrap()
            .train_and_save(&records, "csv-v1", &model_dir)
            .unwrap();

        assert_eq!(outcome.train_size + outcome.test_size, corpus.len());
        let report = outcome.report.unwrap();
        assert_eq!(report.total_support, outcome.test_size);
        assert!(report.accuracy > 0.9, "{}", report);

        let predictor = Predictor::load(&model_dir, &config).unwrap();
        assert_eq!(predictor.model_version(), "csv-v1");
        assert_eq!(
            predictor
                .classify("raw sewage is leaking into drains behind the school.")
                .predicted_label,
            "Sanitation"
        );
    }

    #[test]
    fn test_config_file_drives_threshold() {
        let workspace = TempDir::new().unwrap();
        let config_path = workspace.path().join("triage.toml");
        fs::write(&config_path, "triage_threshold = 0.95\nseed = 7\n").unwrap();

        let config = PipelineConfig::from_toml_file(&config_path).unwrap();
        assert_eq!(config.triage_threshold, 0.95);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_vocabulary_size, 2500);
        assert_eq!(config.triage_threshold().unwrap().value(), 0.95);
    }

    #[test]
    fn test_concurrent_classification_matches_sequential() {
        let predictor = &fixture_predictor();
        let corpus = municipal_complaint_corpus();
        let texts: Vec<&str> = corpus
            .iter()
            .step_by(13)
            .map(|record| record.complaint_text.as_str())
            .collect();

        let sequential: Vec<_> = texts.iter().map(|text| predictor.classify(text)).collect();

        let concurrent: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = texts
                .iter()
                .map(|&text| scope.spawn(move || predictor.classify(text)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(sequential, concurrent);
    }
}
