//! Static display labels for the presentation layer.
//!
//! The table is a flat `key -> text` mapping per language. Templates use
//! `{placeholder}` markers that [`render`] substitutes. Nothing in the
//! ledger reads these labels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Switch between the two supported languages.
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    /// Right-to-left script
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}' (expected en or ar)")]
pub struct UnknownLanguage(pub String);

const EN: &[(&str, &str)] = &[
    ("title", "Split Bills"),
    ("subtitle", "Track individual expenses with friends"),
    ("friends", "Friends"),
    ("add_friend", "Add Friend"),
    ("friend_name_placeholder", "Add friend's name"),
    ("image_placeholder", "Image URL (optional)"),
    ("add_expense", "Add Expense"),
    ("description", "Description"),
    ("amount", "Amount"),
    ("total_expenses", "Total Expenses"),
    ("your_payment", "Your Payment"),
    ("their_payment", "{name}'s Payment"),
    ("each_should_pay", "Each Should Pay"),
    ("balance_with", "Balance with {name}"),
    ("owes_you", "{name} owes you {amount}"),
    ("you_owe", "You owe {name} {amount}"),
    ("settled", "You are all settled up!"),
    ("no_friends", "Add a friend to start splitting expenses."),
    ("no_expenses", "No expenses yet."),
    ("language", "Language"),
];

const AR: &[(&str, &str)] = &[
    ("title", "تقسيم الفواتير"),
    ("subtitle", "تتبع النفقات الفردية مع الأصدقاء"),
    ("friends", "الأصدقاء"),
    ("add_friend", "إضافة صديق"),
    ("friend_name_placeholder", "أضف اسم الصديق"),
    ("image_placeholder", "رابط الصورة (اختياري)"),
    ("add_expense", "إضافة مصروف"),
    ("description", "الوصف"),
    ("amount", "المبلغ"),
    ("total_expenses", "إجمالي النفقات"),
    ("your_payment", "دفعتك"),
    ("their_payment", "دفعة {name}"),
    ("each_should_pay", "على كل شخص أن يدفع"),
    ("balance_with", "الرصيد مع {name}"),
    ("owes_you", "{name} مدين لك بمبلغ {amount}"),
    ("you_owe", "أنت مدين لـ {name} بمبلغ {amount}"),
    ("settled", "لقد تمت تسوية كل الحسابات!"),
    ("no_friends", "أضف صديقًا لبدء تقسيم النفقات."),
    ("no_expenses", "لا توجد نفقات بعد."),
    ("language", "اللغة"),
];

/// The full label table for `lang`.
pub fn labels(lang: Language) -> &'static [(&'static str, &'static str)] {
    match lang {
        Language::En => EN,
        Language::Ar => AR,
    }
}

pub fn label(lang: Language, key: &str) -> Option<&'static str> {
    labels(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}

/// Look up `key` and substitute `{placeholder}` markers.
/// An unknown key renders as the key itself.
pub fn render(lang: Language, key: &str, args: &[(&str, &str)]) -> String {
    let mut text = label(lang, key).unwrap_or(key).to_string();
    for (placeholder, value) in args {
        text = text.replace(&format!("{{{}}}", placeholder), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!(" AR ".parse::<Language>(), Ok(Language::Ar));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::Ar.to_string(), "ar");
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Language::En.toggle(), Language::Ar);
        assert_eq!(Language::En.toggle().toggle(), Language::En);
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn test_both_languages_define_same_keys() {
        let en: Vec<_> = labels(Language::En).iter().map(|(k, _)| *k).collect();
        let ar: Vec<_> = labels(Language::Ar).iter().map(|(k, _)| *k).collect();
        assert_eq!(en, ar);
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let text = render(
            Language::En,
            "owes_you",
            &[("name", "Alice"), ("amount", "$10.00")],
        );
        assert_eq!(text, "Alice owes you $10.00");

        let text = render(Language::Ar, "balance_with", &[("name", "Alice")]);
        assert!(text.contains("Alice"));
    }

    #[test]
    fn test_render_unknown_key_falls_back_to_key() {
        assert_eq!(render(Language::En, "missing_key", &[]), "missing_key");
        assert_eq!(label(Language::En, "missing_key"), None);
    }
}
