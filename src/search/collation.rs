//! Locale-aware string ordering for headwords.

use crate::catalog::types::Locale;
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::locale;
use std::cmp::Ordering;

/// One collator per catalog locale, built once from compiled ICU data.
pub struct Collators {
    ru: CollatorBorrowed<'static>,
    uk: CollatorBorrowed<'static>,
}

impl Collators {
    pub fn new() -> anyhow::Result<Self> {
        let ru = Collator::try_new(locale!("ru").into(), CollatorOptions::default())
            .map_err(|e| anyhow::anyhow!("failed to load ru collation data: {}", e))?;
        let uk = Collator::try_new(locale!("uk").into(), CollatorOptions::default())
            .map_err(|e| anyhow::anyhow!("failed to load uk collation data: {}", e))?;
        Ok(Self { ru, uk })
    }

    fn for_locale(&self, locale: Locale) -> &CollatorBorrowed<'static> {
        match locale {
            Locale::Ru => &self.ru,
            Locale::Uk => &self.uk,
        }
    }

    pub fn compare(&self, locale: Locale, a: &str, b: &str) -> Ordering {
        self.for_locale(locale).compare(a, b)
    }

    /// Sorts in collation order. Strings the collator deems equal fall back to
    /// byte order so the result does not depend on input order.
    pub fn sort(&self, locale: Locale, items: &mut [String]) {
        let collator = self.for_locale(locale);
        items.sort_by(|a, b| collator.compare(a, b).then_with(|| a.cmp(b)));
    }
}
