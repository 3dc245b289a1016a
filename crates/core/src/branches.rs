//! Remote branch listing and menu ordering.

use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use itertools::Itertools;
use log::warn;
use serde::Deserialize;

const HEADS_PREFIX: &str = "refs/heads/";

/// Naming conventions used to float the interesting branches to the top of
/// the branch menu.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BranchPolicy {
    /// Main integration branch, listed first.
    pub primary: String,
    /// Release branch, listed second.
    pub stable: String,
    /// Ticket prefix (matched case-insensitively), listed after the two above.
    pub ticket_prefix: String,
}

impl Default for BranchPolicy {
    fn default() -> Self {
        Self {
            primary: "develop".to_string(),
            stable: "master".to_string(),
            ticket_prefix: "MHP-".to_string(),
        }
    }
}

impl BranchPolicy {
    fn priority(&self, branch: &str) -> u8 {
        if branch == self.primary {
            3
        } else if branch == self.stable {
            2
        } else if starts_with_ignore_case(branch, &self.ticket_prefix) {
            1
        } else {
            0
        }
    }

    /// Orders two branch names: higher priority first, then by `collator`.
    fn compare(&self, collator: &BranchCollator, a: &str, b: &str) -> Ordering {
        self.priority(b)
            .cmp(&self.priority(a))
            .then_with(|| collator.compare(a, b))
    }

    /// Sorts branch names for display: higher priority first, then
    /// locale-aware ascending, ignoring case and accents. Names that collate
    /// equal keep their input order.
    #[must_use]
    pub fn sort(&self, branches: Vec<String>) -> Vec<String> {
        let collator = BranchCollator::new();
        branches
            .into_iter()
            .sorted_by(|a, b| self.compare(&collator, a, b))
            .collect()
    }
}

/// Root-locale collation at primary strength.
enum BranchCollator {
    Icu(CollatorBorrowed<'static>),
    Lowercase,
}

impl BranchCollator {
    fn new() -> Self {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Primary);

        match Collator::try_new(Default::default(), options) {
            Ok(collator) => BranchCollator::Icu(collator),
            Err(e) => {
                warn!("No collation data, sorting branches by lowercase name: {e}");
                BranchCollator::Lowercase
            }
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            BranchCollator::Icu(collator) => collator.compare(a, b),
            BranchCollator::Lowercase => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }

    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Extracts branch names from `git ls-remote --heads` output.
///
/// Each line has the form `<sha>\trefs/heads/<name>`.
#[must_use]
pub fn parse_remote_heads(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(|reference| reference.strip_prefix(HEADS_PREFIX).unwrap_or(reference))
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}
