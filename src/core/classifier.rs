//! Reaction time classifier
//!
//! Ten buckets by ascending threshold. A reaction lands in the first bucket
//! whose threshold it is strictly below, so 150.0 is already "<200".

/// Reaction speed bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionBucket {
    Under150,
    Under200,
    Under250,
    Under300,
    Under350,
    Under400,
    Under500,
    Under600,
    Under800,
    Slowest,
}

/// (exclusive upper bound in ms, bucket), ascending
const BUCKETS: [(f64, ReactionBucket); 10] = [
    (150.0, ReactionBucket::Under150),
    (200.0, ReactionBucket::Under200),
    (250.0, ReactionBucket::Under250),
    (300.0, ReactionBucket::Under300),
    (350.0, ReactionBucket::Under350),
    (400.0, ReactionBucket::Under400),
    (500.0, ReactionBucket::Under500),
    (600.0, ReactionBucket::Under600),
    (800.0, ReactionBucket::Under800),
    (f64::INFINITY, ReactionBucket::Slowest),
];

impl ReactionBucket {
    /// Threshold label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under150 => "<150",
            Self::Under200 => "<200",
            Self::Under250 => "<250",
            Self::Under300 => "<300",
            Self::Under350 => "<350",
            Self::Under400 => "<400",
            Self::Under500 => "<500",
            Self::Under600 => "<600",
            Self::Under800 => "<800",
            Self::Slowest => "≥800",
        }
    }

    /// Message shown with the result
    pub fn message(&self) -> &'static str {
        match self {
            Self::Under150 => "🏎️ Are you secretly Lewis Hamilton? That was insane! 🤯",
            Self::Under200 => "🚀 F1 teams want to know your location! 🔥",
            Self::Under250 => "⚡ Quick enough to catch a falling phone! 📱",
            Self::Under300 => "🎯 Not bad, but my grandma is faster... jk! 👵",
            Self::Under350 => "🐢 Getting there... maybe try coffee? ☕",
            Self::Under400 => "🦥 Are you playing in slow motion? 🎬",
            Self::Under500 => "🐌 Did you fall asleep mid-game? 😴",
            Self::Under600 => "🧟‍♂️ Internet Explorer, is that you? 🤔",
            Self::Under800 => "🦕 Even dinosaurs were faster than this! 😅",
            Self::Slowest => "🐨 Plot twist: Sloths are asking for racing tips! 🌿",
        }
    }
}

/// Bucket for a reaction time in milliseconds. NaN falls through to the slowest bucket.
pub fn classify(reaction_ms: f64) -> ReactionBucket {
    BUCKETS
        .iter()
        .find(|(limit, _)| reaction_ms < *limit)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(ReactionBucket::Slowest)
}

/// Shorthand for the result message
pub fn reaction_message(reaction_ms: f64) -> &'static str {
    classify(reaction_ms).message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_go_to_slower_bucket() {
        assert_eq!(classify(149.9).label(), "<150");
        assert_eq!(classify(150.0).label(), "<200");
        assert_eq!(classify(799.999).label(), "<800");
        assert_eq!(classify(800.0).label(), "≥800");
        assert_eq!(classify(1000.0).label(), "≥800");
    }

    #[test]
    fn test_every_threshold_is_exclusive() {
        for window in BUCKETS.windows(2) {
            let (limit, _) = window[0];
            let (_, next) = window[1];
            assert_eq!(classify(limit), next);
        }
    }

    #[test]
    fn test_zero_is_fastest() {
        assert_eq!(classify(0.0), ReactionBucket::Under150);
    }

    #[test]
    fn test_message_lookup() {
        assert_eq!(reaction_message(220.0), "⚡ Quick enough to catch a falling phone! 📱");
    }

    #[test]
    fn test_nan_is_slowest() {
        assert_eq!(classify(f64::NAN), ReactionBucket::Slowest);
    }
}
