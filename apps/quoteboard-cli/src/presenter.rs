//! Terminal rendering for the quote book.

use quoteboard_core::Quote;
use quoteboard_sync::Presenter;

/// Shown when the selected category has no quotes.
pub const EMPTY_CATEGORY_MESSAGE: &str = "No quotes available for this category.";

/// `"text" - category`, or the empty-category message.
pub fn format_quote(quote: Option<&Quote>) -> String {
    match quote {
        Some(quote) => format!("\"{}\" - {}", quote.text, quote.category),
        None => EMPTY_CATEGORY_MESSAGE.to_string(),
    }
}

/// One category per line, `all` first.
pub fn format_categories(categories: &[String]) -> String {
    std::iter::once(quoteboard_core::ALL_CATEGORIES)
        .chain(categories.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints to stdout. Logs go to stderr.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    /// Print category refreshes (off for one-shot commands that don't ask)
    pub show_categories: bool,
}

impl TerminalPresenter {
    pub fn new(show_categories: bool) -> Self {
        TerminalPresenter { show_categories }
    }
}

impl Presenter for TerminalPresenter {
    fn show_notification(&self, message: Option<&str>) {
        // Clearing has nothing to erase on a scrolling terminal
        if let Some(message) = message {
            println!("* {}", message);
        }
    }

    fn render_quote(&self, quote: Option<&Quote>) {
        println!("{}", format_quote(quote));
    }

    fn render_categories(&self, categories: &[String]) {
        if self.show_categories {
            println!("{}", format_categories(categories));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quote() {
        let quote = Quote::new("Be yourself", "Life");
        assert_eq!(format_quote(Some(&quote)), "\"Be yourself\" - Life");
        assert_eq!(format_quote(None), "No quotes available for this category.");
    }

    #[test]
    fn test_format_categories_lists_all_first() {
        let categories = vec!["Life".to_string(), "Server".to_string()];
        assert_eq!(format_categories(&categories), "all\nLife\nServer");
        assert_eq!(format_categories(&[]), "all");
    }
}
