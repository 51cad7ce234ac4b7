use std::fmt::Formatter;

/// Spreadsheet row, stored as a zero-based index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    /// The header row.
    pub const FIRST: Row = Row { index: 0 };

    /// Builds a row from its 1-based spreadsheet number. Zero saturates to the first row.
    #[cfg(test)]
    pub(crate) fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1),
        }
    }

    /// Returns the row number as a 1-based index, as shown by spreadsheets.
    /// # Examples
    /// ```
    /// use sheets_diagnostics::domain::sheets::row::Row;
    /// assert_eq!(Row::FIRST.number(), 1);
    /// ```
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_is_one_based() {
        assert_eq!(Row::from_row(1), Row::FIRST);
        assert_eq!(Row::from_row(26).index(), 25);
    }

    #[test]
    fn test_from_row_zero_saturates() {
        assert_eq!(Row::from_row(0), Row::FIRST);
    }

    #[test]
    fn test_display_uses_row_number() {
        assert_eq!(Row::from_row(10).to_string(), "10");
        assert_eq!(format!("{:?}", Row::FIRST), "Row(index: 0, row: 1)");
    }
}
