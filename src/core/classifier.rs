//! Keyword classifier for free-form text
//!
//! Routes a message to a menu action when the user types instead of pressing
//! buttons. Ordered rule table, first match wins. Only consulted when the
//! sender has no active dialog.

use lazy_regex::{regex, Lazy, Regex};

/// Menu action recognized in free-form text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Faq,
    About,
    Reviews,
    LeadStart,
    HwStart,
}

static RULES: &[(&Lazy<Regex>, Intent)] = &[
    (regex!(r"(?i)\b(цена|сколько\s+стоит|стоимость|оплата)"), Intent::Faq),
    (regex!(r"(?i)\b(расписани|когда\s+занятия|время|дни)"), Intent::About),
    (regex!(r"(?i)\b(отзыв|результат|кейсы)"), Intent::Reviews),
    (regex!(r"(?i)\b(запис|хочу\s+заниматься|как\s+попасть)"), Intent::LeadStart),
    (regex!(r"(?i)\b(дз|домашк|провер(ить|ка))"), Intent::HwStart),
];

/// Classifies free text into a menu action.
///
/// Returns `None` for empty input and for text no rule matches.
pub fn classify(text: &str) -> Option<Intent> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    for (pattern, intent) in RULES {
        if pattern.is_match(t) {
            return Some(*intent);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_price_question() {
        assert_eq!(classify("Сколько стоит занятие?"), Some(Intent::Faq));
        assert_eq!(classify("какая у вас оплата"), Some(Intent::Faq));
    }

    #[test]
    fn test_classify_schedule() {
        assert_eq!(classify("Какое расписание?"), Some(Intent::About));
    }

    #[test]
    fn test_classify_reviews() {
        assert_eq!(classify("есть отзывы?"), Some(Intent::Reviews));
    }

    #[test]
    fn test_classify_enrollment() {
        assert_eq!(classify("хочу записаться"), Some(Intent::LeadStart));
        assert_eq!(classify("как попасть в группу"), Some(Intent::LeadStart));
    }

    #[test]
    fn test_classify_homework() {
        assert_eq!(classify("проверите домашку?"), Some(Intent::HwStart));
        assert_eq!(classify("отправлю дз"), Some(Intent::HwStart));
    }

    #[test]
    fn test_first_match_wins() {
        // Both the price rule and the enrollment rule match; the price rule
        // is earlier in the table.
        assert_eq!(classify("сколько стоит записаться"), Some(Intent::Faq));
    }

    #[test]
    fn test_classify_empty_and_unknown() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
        assert_eq!(classify("привет, как дела"), None);
    }
}
