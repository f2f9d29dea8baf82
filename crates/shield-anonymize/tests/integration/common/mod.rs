//! Shared fixtures for integration tests.

use shield_anonymize::{Anonymizer, AnonymizerConfig, PatternDetector};

/// A support ticket with one of each standard entity type.
pub const SAMPLE_TICKET: &str = "\
Customer: John Doe
Phone: 555-123-4567
Email: john.doe@example.com
Website: https://example.com
IP: 192.168.1.1
Issue: Unable to login
";

/// A ticket where the same email address appears three times.
pub const REPEATED_PII_TICKET: &str = "\
Email john@x.com reported an outage. We replied to john@x.com twice.
Final confirmation was sent to john@x.com after the fix.
";

/// Texts that contain no detectable PII.
pub const CLEAN_TEXTS: &[&str] = &[
    "the printer on floor two is out of toner",
    "please restart the service after the deploy",
    "ticket closed as duplicate",
];

/// Creates an anonymizer with the default configuration and detector.
pub fn default_anonymizer() -> Anonymizer {
    Anonymizer::with_defaults()
}

/// Creates an anonymizer with a specific confidence threshold.
pub fn anonymizer_with_threshold(min_score_threshold: f64) -> Anonymizer {
    let config = AnonymizerConfig {
        min_score_threshold,
        ..Default::default()
    };
    Anonymizer::new(config, Box::new(PatternDetector::new()))
}
