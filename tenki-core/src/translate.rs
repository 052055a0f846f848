//! Static translation table from WeatherAPI condition codes to Japanese
//! labels with their kana reading and English gloss.
//!
//! The numeric code is the canonical key. Labels are kept as a secondary
//! index so a reading can still be translated when only the text matches.

use std::{collections::HashMap, sync::LazyLock};

use crate::model::WeatherReading;

const TOOLTIP_SEPARATOR: &str = "\n\n\n---------------\n";

/// Localized label for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Label as returned by the provider with `lang=ja`.
    pub label: &'static str,
    /// Kana reading of the label.
    pub reading: &'static str,
    pub gloss: &'static str,
}

/// One provider condition code. `night` is set only where the provider uses a
/// different label after dark.
#[derive(Debug, Clone, Copy)]
pub struct ConditionEntry {
    pub code: u32,
    pub day: TranslationEntry,
    pub night: Option<TranslationEntry>,
}

impl ConditionEntry {
    pub fn variant(&self, is_day: bool) -> &TranslationEntry {
        match (&self.night, is_day) {
            (Some(night), false) => night,
            _ => &self.day,
        }
    }
}

/// Outcome of a lookup. A miss is a degraded result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Found(&'static TranslationEntry),
    Missing(String),
}

impl Translation {
    pub fn is_found(&self) -> bool {
        matches!(self, Translation::Found(_))
    }

    /// Tooltip body: the reading and the gloss joined by a rule, or a note
    /// naming the key that had no entry.
    pub fn tooltip(&self) -> String {
        match self {
            Translation::Found(entry) => {
                format!("{}{TOOLTIP_SEPARATOR}({})", entry.reading, entry.gloss)
            }
            Translation::Missing(key) => format!("Not found for value: {key}"),
        }
    }
}

const fn entry(label: &'static str, reading: &'static str, gloss: &'static str) -> TranslationEntry {
    TranslationEntry { label, reading, gloss }
}

const fn row(code: u32, day: TranslationEntry) -> ConditionEntry {
    ConditionEntry { code, day, night: None }
}

static CONDITIONS: &[ConditionEntry] = &[
    ConditionEntry {
        code: 1000,
        day: entry("晴れ", "はれ", "Sunny"),
        night: Some(entry("快晴", "かいせい", "Clear")),
    },
    row(1003, entry("所により曇り", "ところによりくもり", "Partly cloudy")),
    row(1006, entry("曇り", "くもり", "Cloudy")),
    row(1009, entry("本曇り", "ほんくもり", "Overcast")),
    row(1030, entry("もや", "もや", "Mist")),
    row(1063, entry("近くで所により雨", "ちかくでところによりあめ", "Patchy rain possible")),
    row(1066, entry("近くで所により雪", "ちかくでところによりゆき", "Patchy snow possible")),
    row(1069, entry("近くで所によりみぞれ", "ちかくでところによりみぞれ", "Patchy sleet possible")),
    row(
        1072,
        entry(
            "近くで所により着氷性の霧雨",
            "ちかくでところによりちゃくひょうせいのきりさめ",
            "Patchy freezing drizzle possible",
        ),
    ),
    row(1087, entry("近くで雷の発生", "ちかくでかみなりのはっせい", "Thundery outbreaks possible")),
    row(1114, entry("吹雪", "ふぶき", "Blowing snow")),
    row(1117, entry("猛吹雪", "もうふぶき", "Blizzard")),
    row(1135, entry("霧", "きり", "Fog")),
    row(1147, entry("着氷性の霧", "ちゃくひょうせいのきり", "Freezing fog")),
    row(1150, entry("所により霧雨", "ところによりきりさめ", "Patchy light drizzle")),
    row(1153, entry("霧雨", "きりさめ", "Light drizzle")),
    row(1168, entry("着氷性の霧雨", "ちゃくひょうせいのきりさめ", "Freezing drizzle")),
    row(
        1171,
        entry("強い着氷性の霧雨", "つよいちゃくひょうせいのきりさめ", "Heavy freezing drizzle"),
    ),
    row(1180, entry("所により弱い雨", "ところによりよわいあめ", "Patchy light rain")),
    row(1183, entry("弱い雨", "よわいあめ", "Light rain")),
    row(1186, entry("時々穏やかな雨", "ときどきおだやかなあめ", "Moderate rain at times")),
    row(1189, entry("穏やかな雨", "おだやかなあめ", "Moderate rain")),
    row(1192, entry("時々大雨", "ときどきおおあめ", "Heavy rain at times")),
    row(1195, entry("大雨", "おおあめ", "Heavy rain")),
    row(1198, entry("着氷性の弱い雨", "ちゃくひょうせいのよわいあめ", "Light freezing rain")),
    row(
        1201,
        entry(
            "着氷性の穏やかな雨または大雨",
            "ちゃくひょうせいのおだやかなあめまたはおおあめ",
            "Moderate or heavy freezing rain",
        ),
    ),
    row(1204, entry("軽いみぞれ", "かるいみぞれ", "Light sleet")),
    row(
        1207,
        entry("穏やかなまたは強いみぞれ", "おだやかなまたはつよいみぞれ", "Moderate or heavy sleet"),
    ),
    row(1210, entry("所により小雪", "ところによりこゆき", "Patchy light snow")),
    row(1213, entry("小雪", "こゆき", "Light snow")),
    row(1216, entry("所により穏やかな雪", "ところによりおだやかなゆき", "Patchy moderate snow")),
    row(1219, entry("穏やかな雪", "おだやかなゆき", "Moderate snow")),
    row(1222, entry("所により大雪", "ところによりおおゆき", "Patchy heavy snow")),
    row(1225, entry("大雪", "おおゆき", "Heavy snow")),
    row(1237, entry("凍雨", "とうう", "Freezing rain")),
    row(1240, entry("軽いにわか雨", "かるいにわかあめ", "Light rain")),
    row(
        1243,
        entry(
            "穏やかなまたは強いにわか雨",
            "おだやかなまたはつよいにわかあめ",
            "Moderate or heavy rain",
        ),
    ),
    row(1246, entry("急な豪雨", "きゅうなごうう", "Heavy rain")),
    row(1249, entry("急な軽いみぞれ", "きゅうなかるいみぞれ", "Light sleet")),
    row(
        1252,
        entry(
            "穏やかなまたは強い急なみぞれ",
            "おだやかなまたはつよいきゅうなみぞれ",
            "Moderate or heavy sleet",
        ),
    ),
    row(1255, entry("急な軽い雪", "きゅうなかるいゆき", "Light snow")),
    row(
        1258,
        entry(
            "穏やかなまたは強い急な雪",
            "おだやかなまたはつよいきゅうなゆき",
            "Moderate or heavy snow",
        ),
    ),
    row(1261, entry("軽い急な凍雨", "かるいきゅうなとうう", "Light freezing rain")),
    row(
        1264,
        entry(
            "穏やかなまたは強い急な凍雨",
            "おだやかなまたはつよいきゅうなとうう",
            "Moderate or heavy freezing rain",
        ),
    ),
    row(
        1273,
        entry(
            "所により雷を伴う弱い雨",
            "ところによりかみなりをともなうよわいあめ",
            "Patchy light rain with thunder",
        ),
    ),
    row(
        1276,
        entry(
            "雷を伴う穏やかなまたは強い雨",
            "かみなりをともなうおだやかなまたはつよいあめ",
            "Moderate or heavy rain with thunder",
        ),
    ),
    row(
        1279,
        entry("雷を伴う軽い雪", "かみなりをともなうかるいゆき", "Light snow with thunder"),
    ),
    row(
        1282,
        entry(
            "雷を伴う穏やかなまたは強い雪",
            "かみなりをともなうおだやかなまたはつよいゆき",
            "Moderate or heavy snow with thunder",
        ),
    ),
];

static BY_CODE: LazyLock<HashMap<u32, &'static ConditionEntry>> =
    LazyLock::new(|| CONDITIONS.iter().map(|c| (c.code, c)).collect());

static BY_LABEL: LazyLock<HashMap<&'static str, &'static TranslationEntry>> = LazyLock::new(|| {
    CONDITIONS
        .iter()
        .flat_map(|c| std::iter::once(&c.day).chain(c.night.as_ref()))
        .map(|e| (e.label, e))
        .collect()
});

/// All rows of the table, ordered by code.
pub fn conditions() -> &'static [ConditionEntry] {
    CONDITIONS
}

pub fn lookup_code(code: u32, is_day: bool) -> Option<&'static TranslationEntry> {
    BY_CODE.get(&code).map(|&c| c.variant(is_day))
}

pub fn lookup_text(text: &str) -> Option<&'static TranslationEntry> {
    BY_LABEL.get(text).copied()
}

/// Translate a reading, preferring the code and falling back to the label.
pub fn translate(reading: &WeatherReading) -> Translation {
    lookup_code(reading.condition_code, reading.is_day)
        .or_else(|| lookup_text(&reading.condition_text))
        .map(Translation::Found)
        .unwrap_or_else(|| Translation::Missing(reading.condition_text.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn reading(text: &str, code: u32, is_day: bool) -> WeatherReading {
        WeatherReading {
            temperature_c: 10.0,
            condition_text: text.to_string(),
            condition_code: code,
            is_day,
        }
    }

    #[test]
    fn codes_and_labels_are_unique() {
        let mut codes = HashSet::new();
        for c in conditions() {
            assert!(codes.insert(c.code), "duplicate code {}", c.code);
        }

        let labels: Vec<_> = conditions()
            .iter()
            .flat_map(|c| std::iter::once(c.day.label).chain(c.night.map(|n| n.label)))
            .collect();
        let unique: HashSet<_> = labels.iter().collect();
        assert_eq!(labels.len(), unique.len());
    }

    #[test]
    fn table_is_sorted_by_code() {
        assert!(conditions().windows(2).all(|w| w[0].code < w[1].code));
        assert_eq!(conditions().len(), 48);
    }

    #[test]
    fn code_lookup_uses_night_variant_after_dark() {
        assert_eq!(lookup_code(1000, true).map(|e| e.gloss), Some("Sunny"));
        assert_eq!(lookup_code(1000, false).map(|e| e.gloss), Some("Clear"));
        // no night variant: day label is used
        assert_eq!(lookup_code(1006, false).map(|e| e.label), Some("曇り"));
        assert!(lookup_code(42, true).is_none());
    }

    #[test]
    fn text_lookup_finds_both_variants() {
        assert_eq!(lookup_text("晴れ").map(|e| e.reading), Some("はれ"));
        assert_eq!(lookup_text("快晴").map(|e| e.reading), Some("かいせい"));
        assert!(lookup_text("Sunny").is_none());
    }

    #[test]
    fn translate_prefers_code_over_text() {
        // English label from a provider queried without lang=ja
        let t = translate(&reading("Partly cloudy", 1003, true));
        assert_eq!(t, Translation::Found(lookup_code(1003, true).unwrap()));
    }

    #[test]
    fn translate_falls_back_to_text_for_unknown_code() {
        let t = translate(&reading("大雨", 9999, true));
        assert!(t.is_found());
        assert!(t.tooltip().contains("Heavy rain"));
    }

    #[test]
    fn miss_keeps_queried_text_verbatim() {
        let t = translate(&reading("砂嵐", 9999, true));
        assert_eq!(t, Translation::Missing("砂嵐".to_string()));
        assert!(t.tooltip().contains("砂嵐"));
    }

    #[test]
    fn shower_rows_keep_plain_glosses() {
        assert_eq!(lookup_code(1240, true).map(|e| e.gloss), Some("Light rain"));
        assert_eq!(lookup_code(1246, true).map(|e| e.gloss), Some("Heavy rain"));
        assert_eq!(lookup_code(1279, true).map(|e| e.gloss), Some("Light snow with thunder"));
        assert_eq!(lookup_text("凍雨").map(|e| e.gloss), Some("Freezing rain"));
    }

    #[test]
    fn drizzle_rows_match_their_labels() {
        assert_eq!(lookup_code(1150, true).map(|e| e.gloss), Some("Patchy light drizzle"));
        assert_eq!(lookup_code(1153, true).map(|e| e.gloss), Some("Light drizzle"));
        assert_eq!(lookup_code(1168, true).map(|e| e.gloss), Some("Freezing drizzle"));
        assert_eq!(lookup_code(1180, true).map(|e| e.gloss), Some("Patchy light rain"));
    }

    #[test]
    fn tooltip_joins_reading_and_gloss() {
        let t = translate(&reading("晴れ", 1000, true));
        assert_eq!(t.tooltip(), "はれ\n\n\n---------------\n(Sunny)");
    }
}
