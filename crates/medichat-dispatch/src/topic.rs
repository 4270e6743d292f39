//! Topic classification for user utterances.
//!
//! Classification is a fixed, ordered list of keyword sets evaluated
//! first-match-wins. The priority order is a correctness contract: an
//! utterance mentioning both "weight" and "history" is a vitals question,
//! because `Vitals` outranks `History`.

/// The six response topics the dispatcher can answer about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Medications,
    Allergies,
    Vitals,
    Labs,
    History,
    Visits,
}

impl Topic {
    /// All topics in priority order. First match wins; do not reorder.
    pub const ALL: [Topic; 6] = [
        Topic::Medications,
        Topic::Allergies,
        Topic::Vitals,
        Topic::Labs,
        Topic::History,
        Topic::Visits,
    ];

    /// The substrings that route an utterance to this topic.
    ///
    /// Matched case-insensitively against the whole utterance. "allerg" is
    /// deliberately a stem so "allergy", "allergies", and "allergic" all
    /// match.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Medications => &["medication", "drug", "prescription"],
            Topic::Allergies => &["allerg"],
            Topic::Vitals => &["vital", "blood pressure", "weight"],
            Topic::Labs => &["lab", "test", "result"],
            Topic::History => &["history", "condition", "chronic"],
            Topic::Visits => &["visit", "appointment", "recent"],
        }
    }

    /// Display label, e.g. for log fields.
    pub fn name(self) -> &'static str {
        match self {
            Topic::Medications => "medications",
            Topic::Allergies => "allergies",
            Topic::Vitals => "vitals",
            Topic::Labs => "labs",
            Topic::History => "history",
            Topic::Visits => "visits",
        }
    }

    /// Classify an utterance into a topic, or `None` when no keyword set
    /// matches.
    ///
    /// The utterance is lowercased once, then each topic's keyword set is
    /// tested in priority order; the first topic with any matching
    /// substring wins.
    pub fn classify(utterance: &str) -> Option<Topic> {
        let lower = utterance.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.keywords().iter().any(|kw| lower.contains(kw)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::Topic;

    #[test]
    fn each_keyword_routes_to_its_topic() {
        assert_eq!(Topic::classify("what drugs am I on?"), Some(Topic::Medications));
        assert_eq!(Topic::classify("any new prescriptions?"), Some(Topic::Medications));
        assert_eq!(Topic::classify("am I allergic to anything?"), Some(Topic::Allergies));
        assert_eq!(Topic::classify("how is my blood pressure?"), Some(Topic::Vitals));
        assert_eq!(Topic::classify("show my lab work"), Some(Topic::Labs));
        assert_eq!(Topic::classify("chronic problems?"), Some(Topic::History));
        assert_eq!(Topic::classify("when was my last appointment?"), Some(Topic::Visits));
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(Topic::classify("MEDICATION list please"), Some(Topic::Medications));
        assert_eq!(Topic::classify("Blood Pressure?"), Some(Topic::Vitals));
    }

    #[test]
    fn unmatched_utterance_is_none() {
        assert_eq!(Topic::classify("hello there"), None);
        assert_eq!(Topic::classify(""), None);
    }

    /// Priority order is a contract: when keywords from two topics appear,
    /// the earlier topic in `Topic::ALL` wins.
    #[test]
    fn first_match_wins_across_topics() {
        // "drug" (Medications) beats "allergy" (Allergies).
        assert_eq!(
            Topic::classify("any drug allergy I should know about?"),
            Some(Topic::Medications)
        );
        // "weight" (Vitals) beats "history" (History).
        assert_eq!(
            Topic::classify("weight history over the years"),
            Some(Topic::Vitals)
        );
        // "test" (Labs) beats "recent" (Visits).
        assert_eq!(Topic::classify("recent test results"), Some(Topic::Labs));
    }

    /// The stem "allerg" matches all inflections.
    #[test]
    fn allergy_stem_matches_inflections() {
        for utterance in ["allergy", "allergies", "allergic reaction", "ALLERGEN list"] {
            assert_eq!(Topic::classify(utterance), Some(Topic::Allergies), "{}", utterance);
        }
    }
}
