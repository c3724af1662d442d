//! Locale-aware, case-insensitive string ordering

use std::cmp::Ordering;
use std::fmt;

use icu::collator::Collator;
use icu::collator::CollatorBorrowed;
use icu::collator::options::CollatorOptions;
use icu::collator::options::Strength;
use icu::locale::Locale;
use log::warn;

/// Compares display strings the way users expect a column sort to behave.
///
/// Uses ICU collation at secondary strength, so case is ignored while
/// accents still count. Falls back to the root collation when the locale
/// cannot be loaded, and to a lowercase comparison when no collation data
/// is available at all.
pub struct DisplayCollator {
    locale: String,
    collator: Option<CollatorBorrowed<'static>>,
}

impl DisplayCollator {
    /// Creates a collator for a BCP 47 locale (e.g. "en-US").
    pub fn new(locale: &str) -> Self {
        let collator = match locale.parse::<Locale>() {
            Ok(parsed) => Collator::try_new(parsed.into(), secondary_strength()).ok(),
            Err(e) => {
                warn!("Invalid collation locale '{}': {}", locale, e);
                None
            }
        }
        .or_else(|| Collator::try_new(Default::default(), secondary_strength()).ok());

        if collator.is_none() {
            warn!("No collation data for '{}', comparing lowercase", locale);
        }

        Self {
            locale: locale.to_string(),
            collator,
        }
    }

    /// Returns the locale this collator was requested for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compares two display strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

fn secondary_strength() -> CollatorOptions {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Secondary);
    options
}

impl fmt::Debug for DisplayCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayCollator")
            .field("locale", &self.locale)
            .field("icu", &self.collator.is_some())
            .finish()
    }
}

impl Default for DisplayCollator {
    fn default() -> Self {
        Self::new("en-US")
    }
}
