//! Locale bookkeeping shared by the adapters.
//!
//! The adapters only need two things from a locale: a default first day of
//! the week for the month grid and a way to tell dependants that the locale
//! changed. Name catalogs are not carried; names come from chrono.

use log::{debug, warn};
use tokio::sync::watch;

use crate::DEFAULT_LOCALE;

/// Regions whose weeks start on Monday.
const MONDAY_REGIONS: &[&str] = &[
    "AD", "AL", "AM", "AT", "AU", "AZ", "BA", "BE", "BG", "BN", "BY", "CH", "CL", "CM", "CN",
    "CR", "CY", "CZ", "DE", "DK", "EC", "EE", "ES", "FI", "FJ", "FO", "FR", "GB", "GE", "GF",
    "GP", "GR", "HR", "HU", "IE", "IS", "IT", "KG", "KZ", "LB", "LI", "LK", "LT", "LU", "LV",
    "MC", "MD", "ME", "MK", "MN", "MQ", "MY", "NL", "NO", "NZ", "PL", "RE", "RO", "RS", "RU",
    "SE", "SI", "SK", "SM", "TJ", "TM", "TR", "UA", "UY", "UZ", "VA", "VN", "XK",
];

/// Regions whose weeks start on Saturday.
const SATURDAY_REGIONS: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

/// Languages used when a tag carries no region.
const MONDAY_LANGUAGES: &[&str] = &[
    "bg", "cs", "da", "de", "el", "es", "et", "fi", "fr", "hr", "hu", "it", "lt", "lv", "nb",
    "nl", "nn", "no", "pl", "ro", "ru", "sk", "sl", "sr", "sv", "tr", "uk", "vi", "zh",
];
const SATURDAY_LANGUAGES: &[&str] = &["ar", "fa"];

const SUNDAY: u32 = 0;
const MONDAY: u32 = 1;
const SATURDAY: u32 = 6;

/// Splits a BCP 47 or POSIX style tag into (language, region).
fn split_tag(tag: &str) -> (String, Option<String>) {
    let mut parts = tag.split(['-', '_', '.', '@']);
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    // Script subtags are four letters, regions two letters or three digits.
    let region = parts
        .take_while(|p| !p.is_empty())
        .find(|p| {
            (p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
                || (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()))
        })
        .map(str::to_ascii_uppercase);
    (language, region)
}

/// First day of the week for a locale tag, 0 = Sunday.
///
/// Unknown tags fall back to Sunday.
pub fn first_day_of_week(tag: &str) -> u32 {
    let (language, region) = split_tag(tag);

    if let Some(region) = region.as_deref() {
        if MONDAY_REGIONS.contains(&region) {
            return MONDAY;
        }
        if SATURDAY_REGIONS.contains(&region) {
            return SATURDAY;
        }
        return SUNDAY;
    }

    if MONDAY_LANGUAGES.contains(&language.as_str()) {
        MONDAY
    } else if SATURDAY_LANGUAGES.contains(&language.as_str()) {
        SATURDAY
    } else {
        if language != "en" {
            debug!("no week data for locale {tag:?}, weeks start on Sunday");
        }
        SUNDAY
    }
}

/// The current locale plus a channel announcing changes to it.
#[derive(Debug)]
pub struct LocaleState {
    tag:     String,
    changes: watch::Sender<String>,
}

impl LocaleState {
    pub fn new(tag: &str) -> Self {
        let tag = normalize(tag);
        let (changes, _) = watch::channel(tag.clone());
        Self { tag, changes }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replaces the locale and notifies every subscriber. Setting the same
    /// locale again does not notify.
    pub fn set(&mut self, tag: &str) {
        let tag = normalize(tag);
        if tag == self.tag {
            return;
        }
        debug!("locale changed from {:?} to {tag:?}", self.tag);
        self.tag.clone_from(&tag);
        self.changes.send_replace(tag);
    }

    /// A receiver that observes every later `set`.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.changes.subscribe()
    }

    pub fn first_day_of_week(&self) -> u32 {
        first_day_of_week(&self.tag)
    }
}

impl Default for LocaleState {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

fn normalize(tag: &str) -> String {
    let tag = tag.trim();
    if tag.is_empty() {
        warn!("empty locale tag, using {DEFAULT_LOCALE}");
        DEFAULT_LOCALE.to_owned()
    } else {
        tag.to_owned()
    }
}
