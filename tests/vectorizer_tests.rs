use complaint_triage::models::TfidfVectorizer;
use complaint_triage::{Normalizer, PipelineConfig};
use test_utils::{fixture_artifacts, municipal_complaint_corpus};

#[cfg(test)]
mod vectorizer_tests {
    use super::*;

    #[test]
    fn test_every_text_has_vocabulary_dimension() {
        let vectorizer = fixture_artifacts().vectorizer();
        assert!(vectorizer.dimension() > 0);
        assert!(vectorizer.dimension() <= 2500);

        for text in [
            "",
            "pothole road crumble main highway",
            "zzzz qqqq",
            "a",
            "garbage pile near park garbage pile near park",
        ] {
            let vector = vectorizer.transform_one(text);
            assert_eq!(vector.dimension(), vectorizer.dimension(), "{:?}", text);
        }
    }

    #[test]
    fn test_unknown_and_empty_text_is_zero_vector() {
        let vectorizer = fixture_artifacts().vectorizer();

        assert!(vectorizer.transform_one("").is_zero());
        assert!(vectorizer.transform_one("xylophone quokka").is_zero());
    }

    #[test]
    fn test_known_text_is_unit_length() {
        let vectorizer = fixture_artifacts().vectorizer();
        let vector = vectorizer.transform_one("pothole road crumble main highway");

        assert!(!vector.is_zero());
        assert!((vector.squared_norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vocabulary_includes_trigrams() {
        let vectorizer = fixture_artifacts().vectorizer();

        assert!(vectorizer.feature_index("pothole").is_some());
        assert!(vectorizer.feature_index("garbage pile").is_some());
        assert!(vectorizer
            .vocabulary()
            .iter()
            .any(|term| term.split(' ').count() == 3));
        assert!(vectorizer
            .vocabulary()
            .iter()
            .all(|term| term.split(' ').all(|token| token.len() >= 2)));
    }

    #[test]
    fn test_vocabulary_cap() {
        let normalizer = Normalizer::embedded().unwrap();
        let corpus: Vec<String> = municipal_complaint_corpus()
            .iter()
            .map(|record| normalizer.normalize(&record.complaint_text))
            .collect();

        let config = PipelineConfig {
            max_vocabulary_size: 50,
            ..PipelineConfig::default()
        };
        let vectorizer = TfidfVectorizer::from_config(&config)
            .unwrap()
            .fit(&corpus)
            .unwrap();

        assert_eq!(vectorizer.dimension(), 50);
        assert_eq!(vectorizer.transform(&corpus).len(), corpus.len());
    }
}
