//! Plaque category classifier
//!
//! Classification is an ordered list of rules evaluated first-match-wins.
//! Each rule fires when any of its conditions holds; a record matching no
//! rule falls back to [`Category::Other`]. All conditions compare against
//! lower-cased field text, absent fields reading as empty.

use std::borrow::Cow;

use plaques_common::RawRecord;

use crate::record::Category;

/// Record field a condition inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Inscription,
    Address,
    LeadSubjectType,
    LeadSubjectRoles,
}

/// Single text test against one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Field contains any of the keywords
    Contains(TextField, &'static [&'static str]),
    /// Field equals one of the tokens exactly
    Equals(TextField, &'static [&'static str]),
}

impl Condition {
    fn holds(&self, text: &ClassifierText) -> bool {
        match self {
            Condition::Contains(field, keywords) => {
                let value = text.field(*field);
                keywords.iter().any(|k| value.contains(k))
            }
            Condition::Equals(field, tokens) => {
                let value = text.field(*field);
                tokens.iter().any(|t| value == *t)
            }
        }
    }
}

/// Category assigned when any condition holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub category: Category,
    pub any_of: &'static [Condition],
}

impl Rule {
    fn matches(&self, text: &ClassifierText) -> bool {
        self.any_of.iter().any(|c| c.holds(text))
    }
}

/// Default rule table in priority order
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        category: Category::Building,
        any_of: &[
            Condition::Contains(
                TextField::Inscription,
                &["was founded", "opened", "built", "constructed"],
            ),
            Condition::Contains(
                TextField::Title,
                &["hall", "house", "theatre", "hospital", "school", "church"],
            ),
            Condition::Contains(TextField::Address, &["hall", "house"]),
        ],
    },
    Rule {
        category: Category::Event,
        any_of: &[Condition::Contains(
            TextField::Inscription,
            &[
                "here stood",
                "site of",
                "battle",
                "meeting",
                "event",
                "happened",
                "occurred",
            ],
        )],
    },
    Rule {
        category: Category::HistoricalPerson,
        any_of: &[
            Condition::Equals(TextField::LeadSubjectType, &["man", "woman", "person"]),
            Condition::Contains(
                TextField::LeadSubjectRoles,
                &["writer", "artist", "politician", "scientist", "musician", "actor"],
            ),
            Condition::Contains(
                TextField::Inscription,
                &["was born", "lived here", "died here", "worked here"],
            ),
        ],
    },
];

/// Lower-cased fields the rules read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierText {
    pub title: String,
    pub inscription: String,
    pub address: String,
    pub lead_subject_type: String,
    pub lead_subject_roles: String,
}

impl ClassifierText {
    pub fn from_record(record: &RawRecord) -> Self {
        let attrs = record.attributes();
        Self {
            title: attrs.title.to_lowercase(),
            inscription: attrs.inscription.to_lowercase(),
            address: attrs.address.to_lowercase(),
            lead_subject_type: attrs.lead_subject_type.to_lowercase(),
            lead_subject_roles: attrs.lead_subject_roles.to_lowercase(),
        }
    }

    fn field(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Inscription => &self.inscription,
            TextField::Address => &self.address,
            TextField::LeadSubjectType => &self.lead_subject_type,
            TextField::LeadSubjectRoles => &self.lead_subject_roles,
        }
    }
}

/// Ordered rule evaluator
///
/// The default classifier borrows [`DEFAULT_RULES`] without allocating.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Cow<'static, [Rule]>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: Cow::Borrowed(DEFAULT_RULES),
        }
    }
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: Cow::Owned(rules),
        }
    }

    pub fn classify_text(&self, text: &ClassifierText) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }

    pub fn classify(&self, record: &RawRecord) -> Category {
        self.classify_text(&ClassifierText::from_record(record))
    }
}

/// Classify with the default rule table
pub fn classify(record: &RawRecord) -> Category {
    Classifier::default().classify(record)
}
