//! Column-wrapped rendering of table values.

/// Fixed layout of a generated table body.
///
/// Values are right-aligned to `width` characters. The separator comes
/// before each value (a space for the first, a comma afterwards), a line
/// break follows every `columns`-th value and a blank line follows every
/// `columns * rows_per_block`-th value. Existing consumers of generated
/// files depend on the default layout byte for byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableLayout {
    /// Right-aligned field width of each value.
    pub width: usize,
    /// Values per line.
    pub columns: usize,
    /// Lines per blank-line separated block.
    pub rows_per_block: usize,
}

impl TableLayout {
    /// Layout of every emitted table: width 6, 8 columns, blocks of 4 rows.
    pub const DEFAULT: Self = Self {
        width: 6,
        columns: 8,
        rows_per_block: 4,
    };

    /// Number of values per block.
    pub const fn block_len(&self) -> usize {
        self.columns * self.rows_per_block
    }

    /// Render `values` as a table body.
    ///
    /// # Example
    ///
    /// ```
    /// use curvetab_core::TableLayout;
    ///
    /// let layout = TableLayout { width: 3, columns: 2, rows_per_block: 2 };
    /// assert_eq!(layout.format(&[1, 22, 333]), "   1, 22\n,333");
    /// ```
    pub fn format<T>(&self, values: &[T]) -> String
    where
        T: std::fmt::Display,
    {
        let columns = self.columns.max(1);
        let block = self.block_len().max(1);
        let mut body = String::with_capacity(values.len() * (self.width + 2));

        for (i, value) in values.iter().enumerate() {
            body.push(if i == 0 { ' ' } else { ',' });
            body.push_str(&format!("{value:>width$}", width = self.width));

            let count = i + 1;
            if count % columns == 0 {
                body.push('\n');
            }
            if count % block == 0 {
                body.push('\n');
            }
        }

        body
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render `values` with [`TableLayout::DEFAULT`].
pub fn format_table<T>(values: &[T]) -> String
where
    T: std::fmt::Display,
{
    TableLayout::DEFAULT.format(values)
}
