use super::row::Row;

/// Quotes a sheet title for use in an A1 range, doubling embedded quotes.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Range covering a whole row of a sheet, e.g. `'Sheet1'!1:1`.
pub fn whole_row(sheet_title: &str, row: Row) -> String {
    format!("{}!{}:{}", quote_sheet_title(sheet_title), row, row)
}

/// Range covering a whole sheet; used as the table anchor for appends.
pub fn whole_sheet(sheet_title: &str) -> String {
    quote_sheet_title(sheet_title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_row() {
        assert_eq!(whole_row("Sheet1", Row::FIRST), "'Sheet1'!1:1");
        assert_eq!(whole_row("Leads 2024", Row::from_row(3)), "'Leads 2024'!3:3");
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(quote_sheet_title("Bob's leads"), "'Bob''s leads'");
        assert_eq!(whole_sheet("Аркуш1"), "'Аркуш1'");
    }
}
