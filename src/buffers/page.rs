use crate::protocol::{ColumnBatch, FetchResultsResp, RowSet};

/// The rows returned by the last fetch, together with the information whether the result set
/// continues after them.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Page {
    row_set: RowSet,
    has_more_rows: bool,
}

impl Page {
    pub fn new(row_set: RowSet, has_more_rows: bool) -> Self {
        Self {
            row_set,
            has_more_rows,
        }
    }

    /// Page described by a fetch response. A response without results is an empty page starting
    /// at row `0`.
    pub fn from_response(response: FetchResultsResp) -> Self {
        Self::new(response.results.unwrap_or_default(), response.has_more_rows)
    }

    /// Logical row number of the first row in this page.
    pub fn start_row_offset(&self) -> i64 {
        self.row_set.start_row_offset
    }

    pub fn num_rows(&self) -> usize {
        self.row_set.num_rows()
    }

    /// `true` if fetching forward may extend the result set beyond this page.
    pub fn has_more_rows(&self) -> bool {
        self.has_more_rows
    }

    /// `true` if the logical row `row_number` is part of this page.
    pub fn contains(&self, row_number: i64) -> bool {
        self.row_index(row_number).is_some()
    }

    /// Position of the logical row `row_number` within this page, if the page contains it.
    pub fn row_index(&self, row_number: i64) -> Option<usize> {
        // The start offset is supplied by the server and may be anywhere in the `i64` range. Never
        // compute the end of the page, it may not be representable.
        let offset = row_number.checked_sub(self.start_row_offset())?;
        usize::try_from(offset)
            .ok()
            .filter(|&index| index < self.num_rows())
    }

    /// Batch of the column at the zero based `index`.
    pub fn column(&self, index: usize) -> Option<&ColumnBatch> {
        self.row_set.columns.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::Page;
    use crate::protocol::{ColumnBatch, FetchResultsResp, RowSet, TypedColumn};

    fn page(start_row_offset: i64, num_rows: usize) -> Page {
        let values = vec![true; num_rows];
        let columns = vec![ColumnBatch::Bool(TypedColumn::from_values(values))];
        Page::new(RowSet::new(start_row_offset, columns), true)
    }

    #[test]
    fn contains_half_open_range() {
        let page = page(10, 5);

        assert!(!page.contains(9));
        assert!(page.contains(10));
        assert!(page.contains(14));
        assert!(!page.contains(15));
        assert_eq!(Some(4), page.row_index(14));
        assert_eq!(None, page.row_index(15));
    }

    #[test]
    fn page_at_end_of_row_number_range() {
        let page = page(i64::MAX, 1);

        assert!(page.contains(i64::MAX));
        assert_eq!(Some(0), page.row_index(i64::MAX));
        assert!(!page.contains(i64::MAX - 1));
        assert!(!page.contains(0));
        assert!(!page.contains(i64::MIN));
    }

    #[test]
    fn page_at_start_of_row_number_range() {
        let page = page(i64::MIN, 2);

        assert_eq!(Some(1), page.row_index(i64::MIN + 1));
        assert!(!page.contains(i64::MAX));
    }

    #[test]
    fn empty_page_contains_nothing() {
        let page = page(3, 0);
        assert!(!page.contains(3));
    }

    #[test]
    fn response_without_results() {
        let response = FetchResultsResp {
            has_more_rows: true,
            ..FetchResultsResp::default()
        };

        let page = Page::from_response(response);

        assert_eq!(0, page.start_row_offset());
        assert_eq!(0, page.num_rows());
        assert!(page.has_more_rows());
    }
}
