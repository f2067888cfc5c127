//! Script classification and per-language function-word profiles.

/// Writing system of a letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Armenian,
    Georgian,
    Arabic,
    Hebrew,
    Devanagari,
    Bengali,
    Thai,
    Hangul,
    Kana,
    Han,
    Other,
}

impl Script {
    /// Classify an alphabetic character by its Unicode block.
    pub fn of(c: char) -> Script {
        match c {
            'a'..='z' | 'A'..='Z' => Script::Latin,
            '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}' => Script::Latin,
            '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Script::Greek,
            '\u{0400}'..='\u{052F}' => Script::Cyrillic,
            '\u{0530}'..='\u{058F}' => Script::Armenian,
            '\u{0590}'..='\u{05FF}' => Script::Hebrew,
            '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' => Script::Arabic,
            '\u{0900}'..='\u{097F}' => Script::Devanagari,
            '\u{0980}'..='\u{09FF}' => Script::Bengali,
            '\u{0E00}'..='\u{0E7F}' => Script::Thai,
            '\u{10A0}'..='\u{10FF}' => Script::Georgian,
            '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' => Script::Hangul,
            '\u{3040}'..='\u{30FF}' => Script::Kana,
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{2A6DF}' => {
                Script::Han
            }
            _ => Script::Other,
        }
    }

    /// The language written in this script, when it is the only candidate.
    pub fn sole_language(self) -> Option<&'static str> {
        match self {
            Script::Greek => Some("el"),
            Script::Armenian => Some("hy"),
            Script::Georgian => Some("ka"),
            Script::Hebrew => Some("he"),
            Script::Arabic => Some("ar"),
            Script::Devanagari => Some("hi"),
            Script::Bengali => Some("bn"),
            Script::Thai => Some("th"),
            Script::Hangul => Some("ko"),
            Script::Kana => Some("ja"),
            Script::Han => Some("zh"),
            Script::Latin | Script::Cyrillic | Script::Other => None,
        }
    }
}

/// Function words and characteristic letters of one language.
#[derive(Debug)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub script: Script,
    pub function_words: &'static [&'static str],
    pub marker_chars: &'static [char],
}

pub const PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        code: "en",
        script: Script::Latin,
        function_words: &[
            "the", "and", "of", "to", "a", "in", "is", "it", "that", "was", "for", "on", "are",
            "with", "as", "his", "they", "be", "at", "this", "have", "from", "or", "by", "not",
            "but", "what", "which", "you", "were", "their", "when", "we", "there", "been",
        ],
        marker_chars: &[],
    },
    LanguageProfile {
        code: "de",
        script: Script::Latin,
        function_words: &[
            "der", "die", "und", "in", "den", "von", "zu", "das", "mit", "sich", "des", "auf",
            "für", "ist", "im", "dem", "nicht", "ein", "eine", "als", "auch", "es", "an", "werden",
            "aus", "er", "hat", "dass", "sie", "nach", "wird", "bei", "einer", "um", "noch",
        ],
        marker_chars: &['ß', 'ä', 'ö', 'ü'],
    },
    LanguageProfile {
        code: "fr",
        script: Script::Latin,
        function_words: &[
            "le", "la", "les", "de", "des", "et", "un", "une", "du", "est", "que", "qui", "dans",
            "pour", "pas", "sur", "au", "il", "elle", "ne", "se", "ce", "avec", "par", "sont",
            "nous", "vous", "mais", "aux", "cette", "ont", "leur",
        ],
        marker_chars: &['ç', 'è', 'ê', 'à', 'ù', 'œ', 'â', 'î', 'û', 'ë'],
    },
    LanguageProfile {
        code: "es",
        script: Script::Latin,
        function_words: &[
            "el", "la", "los", "las", "de", "que", "y", "en", "un", "una", "es", "por", "con",
            "no", "se", "del", "al", "lo", "para", "como", "más", "pero", "sus", "le", "ya", "o",
            "este", "porque", "esta", "entre", "cuando", "muy", "sin", "sobre", "también",
        ],
        marker_chars: &['ñ', 'á', 'í', 'ó', 'ú', '¿', '¡'],
    },
    LanguageProfile {
        code: "it",
        script: Script::Latin,
        function_words: &[
            "il", "di", "che", "è", "e", "la", "per", "un", "una", "in", "non", "sono", "del",
            "della", "gli", "le", "con", "si", "da", "al", "lo", "nel", "anche", "come", "ma",
            "questo", "alla", "dei", "più", "ha",
        ],
        marker_chars: &['ò', 'ì'],
    },
    LanguageProfile {
        code: "pt",
        script: Script::Latin,
        function_words: &[
            "o", "a", "os", "as", "de", "que", "e", "do", "da", "em", "um", "uma", "para", "com",
            "não", "é", "no", "na", "por", "mais", "dos", "das", "se", "como", "mas", "ao", "ele",
            "ela", "seu", "sua", "ou", "também", "são",
        ],
        marker_chars: &['ã', 'õ', 'ç', 'ê', 'ô'],
    },
    LanguageProfile {
        code: "nl",
        script: Script::Latin,
        function_words: &[
            "de", "het", "een", "en", "van", "ik", "te", "dat", "die", "in", "is", "niet", "zijn",
            "op", "aan", "met", "als", "voor", "maar", "om", "ook", "er", "wat", "dit", "bij",
            "naar", "werd", "hij", "zij", "worden",
        ],
        marker_chars: &['ĳ'],
    },
    LanguageProfile {
        code: "ru",
        script: Script::Cyrillic,
        function_words: &[
            "и", "в", "не", "на", "я", "что", "он", "с", "как", "а", "то", "все", "она", "так",
            "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
            "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "это", "они",
        ],
        marker_chars: &['ы', 'э', 'ё', 'ъ'],
    },
    LanguageProfile {
        code: "uk",
        script: Script::Cyrillic,
        function_words: &[
            "і", "в", "не", "на", "що", "з", "та", "як", "до", "й", "він", "це", "у", "за", "але",
            "від", "про", "його", "вона", "так", "вже", "ми", "ви", "їх", "цей", "бути", "був",
            "є", "також", "коли", "щоб",
        ],
        marker_chars: &['ї', 'є', 'і', 'ґ'],
    },
];

/// Profiles of every language written in `script`.
pub fn profiles_for(script: Script) -> impl Iterator<Item = &'static LanguageProfile> {
    PROFILES.iter().filter(move |p| p.script == script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_classification() {
        assert_eq!(Script::of('a'), Script::Latin);
        assert_eq!(Script::of('ß'), Script::Latin);
        assert_eq!(Script::of('ж'), Script::Cyrillic);
        assert_eq!(Script::of('λ'), Script::Greek);
        assert_eq!(Script::of('한'), Script::Hangul);
        assert_eq!(Script::of('の'), Script::Kana);
        assert_eq!(Script::of('字'), Script::Han);
        assert_eq!(Script::of('5'), Script::Other);
    }

    #[test]
    fn test_profiles_have_unique_codes() {
        let mut codes: Vec<_> = PROFILES.iter().map(|p| p.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), PROFILES.len());
        assert_eq!(profiles_for(Script::Cyrillic).count(), 2);
    }
}
