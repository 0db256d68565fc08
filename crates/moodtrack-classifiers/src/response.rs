//! Canned supportive responses keyed on sentiment and topic keywords

use moodtrack_core::Sentiment;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SLEEP_TIPS: &str = "The average adult needs to sleep for 7-9 hours. \
If you find yourself laying awake at night, there are several things you can do to help you sleep.\n\
Eat foods with melatonin around bedtime, such as cherries.\n\
To relax, you can try the 4-7-8 breathing technique: breathe in for 4 seconds, \
hold your breath for 7 seconds, and breathe out for 8 seconds.\n\
You can also flex all of your muscles, starting at your feet and gradually working your way up to your head, \
then gradually relax them, again, starting from your feet and working your way up to your head.";

const SELF_CARE: &str =
    "Yay! Life is too short to not enjoy yourself. Always remember that you ARE worth it.";

const SICK_DAY: &str = "If you need to take a sick day tomorrow to rest, don't be afraid to do it. \
It will keep the sickness from spreading to others and will allow your body to fight it, so it's a win-win.\n\
And if you worry that you are seriously ill, then visit the doctor, rather than trying to diagnose and treat yourself.";

const GENERIC_NEGATIVE: &str = "Oof, that's rough. Do your best to make tomorrow a better day :)";

const GENERIC_POSITIVE: &str = "Yay! Happy days are the best days!";

/// Which canned response was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    SleepTips,
    SelfCare,
    SickDay,
    GenericNegative,
    GenericPositive,
}

impl ResponseKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::SleepTips => SLEEP_TIPS,
            Self::SelfCare => SELF_CARE,
            Self::SickDay => SICK_DAY,
            Self::GenericNegative => GENERIC_NEGATIVE,
            Self::GenericPositive => GENERIC_POSITIVE,
        }
    }
}

/// Keyword lists that trigger topic-specific responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRules {
    #[serde(default = "default_sleep")]
    pub sleep: Vec<String>,

    #[serde(default = "default_self_care")]
    pub self_care: Vec<String>,

    #[serde(default = "default_illness")]
    pub illness: Vec<String>,
}

impl Default for ResponseRules {
    fn default() -> Self {
        Self {
            sleep: default_sleep(),
            self_care: default_self_care(),
            illness: default_illness(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_sleep() -> Vec<String> {
    to_strings(&["sleepy", "sleep", "drowsy"])
}

fn default_self_care() -> Vec<String> {
    to_strings(&["holiday", "vacation", "relax", "party", "festival"])
}

fn default_illness() -> Vec<String> {
    to_strings(&["sick", "illness", "unwell", "sickness", "fever"])
}

/// Rule-based lookup from (content words, sentiment) to a message
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    sleep: HashSet<String>,
    self_care: HashSet<String>,
    illness: HashSet<String>,
}

impl ResponseSelector {
    pub fn new(rules: &ResponseRules) -> Self {
        let lower = |words: &[String]| -> HashSet<String> {
            words.iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            sleep: lower(&rules.sleep),
            self_care: lower(&rules.self_care),
            illness: lower(&rules.illness),
        }
    }

    /// Pick the response rule for an entry.
    ///
    /// Rules are checked in order: sleep (negative), self-care (positive),
    /// illness (negative), then generic negative and generic positive.
    /// Neutral entries with no matching rule get nothing.
    pub fn select_kind<S: AsRef<str>>(&self, words: &[S], label: Sentiment) -> Option<ResponseKind> {
        let mentions = |set: &HashSet<String>| words.iter().any(|w| set.contains(w.as_ref()));

        match label {
            Sentiment::Negative if mentions(&self.sleep) => Some(ResponseKind::SleepTips),
            Sentiment::Positive if mentions(&self.self_care) => Some(ResponseKind::SelfCare),
            Sentiment::Negative if mentions(&self.illness) => Some(ResponseKind::SickDay),
            Sentiment::Negative => Some(ResponseKind::GenericNegative),
            Sentiment::Positive => Some(ResponseKind::GenericPositive),
            Sentiment::Neutral => None,
        }
    }

    /// Message text for an entry, if any
    pub fn select<S: AsRef<str>>(&self, words: &[S], label: Sentiment) -> Option<&'static str> {
        self.select_kind(words, label).map(|kind| kind.message())
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new(&ResponseRules::default())
    }
}
