use std::io::{self, Write};

use crate::application::{FriendReport, Session};
use crate::domain::{Standing, format_amount, format_currency, format_percentage};
use crate::i18n::{self, Language};

/// Truncate a string to fit a column
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Friend list with the indexes `friend remove` expects.
pub fn render_friends<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let lang = session.language();
    writeln!(out, "{}:", i18n::render(lang, "friends", &[]))?;
    for (index, friend) in session.ledger().friends().iter().enumerate() {
        match &friend.image {
            Some(image) => writeln!(out, "  [{}] {} ({})", index, friend.name, image)?,
            None => writeln!(out, "  [{}] {}", index, friend.name)?,
        }
    }
    Ok(())
}

/// Sentence describing who owes whom.
pub fn standing_sentence(
    lang: Language,
    currency: &str,
    friend: &str,
    standing: Standing,
) -> String {
    let (key, amount) = match standing {
        Standing::FriendOwesYou(amount) => ("owes_you", amount),
        Standing::YouOweFriend(amount) => ("you_owe", amount),
        Standing::Settled => return i18n::render(lang, "settled", &[]),
    };
    let amount = format_currency(currency, amount);
    i18n::render(lang, key, &[("name", friend), ("amount", amount.as_str())])
}

/// Signed balance, with a leading `+` when the friend owes the owner.
pub fn format_balance(currency: &str, balance: f64) -> String {
    if balance > 0.0 {
        format!("+{}", format_currency(currency, balance))
    } else {
        format_currency(currency, balance)
    }
}

pub fn render_report<W: Write>(
    session: &Session,
    report: &FriendReport,
    out: &mut W,
) -> io::Result<()> {
    let lang = session.language();
    let currency = session.settings().currency_symbol.as_str();
    let name = report.friend.as_str();
    let summary = &report.summary;

    match &report.image {
        Some(image) => writeln!(out, "== {} ({}) ==", name, image)?,
        None => writeln!(out, "== {} ==", name)?,
    }
    writeln!(
        out,
        "  {:<24} {:>12}",
        i18n::render(lang, "total_expenses", &[]),
        format_currency(currency, summary.total_expenses)
    )?;
    writeln!(
        out,
        "  {:<24} {:>12} ({}%)",
        i18n::render(lang, "your_payment", &[]),
        format_currency(currency, summary.you_paid),
        format_percentage(summary.you_paid, summary.total_expenses)
    )?;
    writeln!(
        out,
        "  {:<24} {:>12} ({}%)",
        i18n::render(lang, "their_payment", &[("name", name)]),
        format_currency(currency, summary.they_paid),
        format_percentage(summary.they_paid, summary.total_expenses)
    )?;
    writeln!(
        out,
        "  {:<24} {:>12} (50%)",
        i18n::render(lang, "each_should_pay", &[]),
        format_currency(currency, report.expected_share)
    )?;

    if report.expenses.is_empty() {
        writeln!(out, "  {}", i18n::render(lang, "no_expenses", &[]))?;
    } else {
        writeln!(out)?;
        for expense in &report.expenses {
            writeln!(
                out,
                "  #{:<5} {:<30} {:>12}",
                expense.id,
                truncate(&expense.description, 30),
                format_amount(expense.amount)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {}: {}",
        i18n::render(lang, "balance_with", &[("name", name)]),
        format_balance(currency, report.balance)
    )?;
    writeln!(
        out,
        "  {}",
        standing_sentence(lang, currency, name, report.standing)
    )?;
    Ok(())
}

/// Full view: title, friend list and one block per split partner.
pub fn render_all<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let lang = session.language();
    writeln!(out, "{}", i18n::render(lang, "title", &[]))?;
    writeln!(out, "{}", i18n::render(lang, "subtitle", &[]))?;
    writeln!(out)?;
    render_friends(session, out)?;

    let reports = session.reports();
    if reports.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", i18n::render(lang, "no_friends", &[]))?;
    }
    for report in &reports {
        writeln!(out)?;
        render_report(session, report, out)?;
    }
    Ok(())
}

/// Print the label table for one language.
pub fn render_labels<W: Write>(lang: Language, out: &mut W) -> io::Result<()> {
    let direction = if lang.is_rtl() { "right-to-left" } else { "left-to-right" };
    writeln!(out, "{:<26} TEXT ({}, {})", "KEY", lang, direction)?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (key, text) in i18n::labels(lang) {
        writeln!(out, "{:<26} {}", key, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Event;
    use crate::domain::ExpenseUpdate;

    fn render_to_string(session: &Session) -> String {
        let mut buffer = Vec::new();
        render_all(session, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long description", 10), "a long ...");
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance("$", 10.0), "+$10.00");
        assert_eq!(format_balance("$", -50.0), "-$50.00");
        assert_eq!(format_balance("$", 0.0), "$0.00");
    }

    #[test]
    fn test_render_empty_session() {
        let output = render_to_string(&Session::default());
        assert!(output.contains("Split Bills"));
        assert!(output.contains("[0] Me"));
        assert!(output.contains("Add a friend to start splitting expenses."));
    }

    #[test]
    fn test_render_friend_block() {
        let mut session = Session::default();
        session.apply(Event::AddFriend {
            name: "Alice".into(),
            image: None,
        });
        session.apply(Event::AddExpense {
            friend: "Alice".into(),
        });
        session.apply(Event::UpdateExpense {
            id: 1,
            update: ExpenseUpdate::Description("Groceries".into()),
        });
        session.apply(Event::UpdateExpense {
            id: 1,
            update: ExpenseUpdate::Amount(100.0),
        });

        let output = render_to_string(&session);
        assert!(output.contains("== Alice (default.png) =="));
        assert!(output.contains("Groceries"));
        assert!(output.contains("$100.00"));
        assert!(output.contains("Balance with Alice: -$50.00"));
        assert!(output.contains("You owe Alice $50.00"));
    }

    #[test]
    fn test_render_payment_percentages() {
        let mut session = Session::default();
        session.apply(Event::AddFriend {
            name: "Alice".into(),
            image: None,
        });
        session.apply(Event::AddExpense {
            friend: "Alice".into(),
        });
        session.apply(Event::UpdateExpense {
            id: 1,
            update: ExpenseUpdate::Amount(30.0),
        });
        session.apply(Event::SetDirectPayment {
            friend: "Alice".into(),
            amount: 10.0,
        });

        let output = render_to_string(&session);
        assert!(output.contains("$10.00 (33.3%)"));
        assert!(output.contains("$20.00 (66.7%)"));
        assert!(output.contains("$15.00 (50%)"));
    }

    #[test]
    fn test_render_labels_direction() {
        let mut buffer = Vec::new();
        render_labels(Language::Ar, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("KEY"));
        assert!(output.contains("TEXT (ar, right-to-left)"));

        let mut buffer = Vec::new();
        render_labels(Language::En, &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("TEXT (en, left-to-right)"));
    }

    #[test]
    fn test_render_in_arabic() {
        let mut session = Session::default();
        session.apply(Event::AddFriend {
            name: "Alice".into(),
            image: None,
        });
        session.apply(Event::ToggleLanguage);

        let output = render_to_string(&session);
        assert!(output.contains("تقسيم الفواتير"));
        assert!(output.contains("لقد تمت تسوية كل الحسابات!"));
    }
}
