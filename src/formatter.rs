use crate::catalog::CatalogItem;

// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const WHITE: &'static str = "\x1b[37m";
    pub const GRAY: &'static str = "\x1b[90m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_MAGENTA: &'static str = "\x1b[95m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
}

/// Renders the drink menu as an aligned list with a `>` marker on the
/// single selected row.
pub struct MenuFormatter {
    colored: bool,
}

impl MenuFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_menu(&self, items: &[CatalogItem], selected: Option<usize>) -> String {
        if items.is_empty() {
            return "The menu is empty - ordering is unavailable.".to_string();
        }

        let name_width = items.iter().map(|i| i.name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (idx, item) in items.iter().enumerate() {
            let marker = if selected == Some(idx) { '>' } else { ' ' };
            let line = format!(
                "{marker} {:>2}. {:<name_width$}  {}  {}",
                idx + 1,
                item.name,
                item.image,
                item.price_display()
            );
            if self.colored && selected == Some(idx) {
                out.push_str(Colors::BRIGHT_GREEN);
                out.push_str(&line);
                out.push_str(Colors::RESET);
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }
        out
    }

    pub fn print_menu(&self, items: &[CatalogItem], selected: Option<usize>) {
        print!("{}", self.format_menu(items, selected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<CatalogItem> {
        vec![
            CatalogItem {
                name: "Espresso".to_string(),
                image: "e.png".to_string(),
                price: "2.50".to_string(),
            },
            CatalogItem {
                name: "Latte".to_string(),
                image: "l.png".to_string(),
                price: "3.00".to_string(),
            },
            CatalogItem {
                name: "Cola".to_string(),
                image: "c.png".to_string(),
                price: "1.75".to_string(),
            },
        ]
    }

    #[test]
    fn exactly_one_row_is_marked_selected() {
        let formatter = MenuFormatter::new(false);
        let rendered = formatter.format_menu(&menu(), Some(1));
        let marked: Vec<&str> = rendered.lines().filter(|l| l.starts_with('>')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Latte"));
    }

    #[test]
    fn no_selection_marks_nothing() {
        let formatter = MenuFormatter::new(false);
        let rendered = formatter.format_menu(&menu(), None);
        assert!(rendered.lines().all(|l| !l.starts_with('>')));
    }

    #[test]
    fn rows_carry_index_and_price() {
        let formatter = MenuFormatter::new(false);
        let rendered = formatter.format_menu(&menu(), None);
        assert!(rendered.contains("1. Espresso"));
        assert!(rendered.contains("$1.75"));
    }

    #[test]
    fn empty_menu_reports_unavailable() {
        let formatter = MenuFormatter::new(false);
        assert!(formatter.format_menu(&[], None).contains("unavailable"));
    }
}
