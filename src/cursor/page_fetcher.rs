use std::mem;

use log::{debug, trace};

use crate::{
    Error,
    buffers::Page,
    error::ExtendResult,
    protocol::{CliService, FetchOrientation, FetchResultsReq, OperationHandle},
};

/// Keeps the page of rows around which contains the row a cursor is about to read, fetching
/// pages from the remote service as needed.
///
/// Only the page fetched last is held in memory. Moving to a row outside of it fetches the next
/// page if the row lies behind the current page, or the prior page if it lies before it.
#[derive(Debug)]
pub struct PageFetcher {
    /// Maximum number of rows requested with each fetch.
    page_size: i64,
    page: Option<Page>,
}

impl PageFetcher {
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size,
            page: None,
        }
    }

    /// Page fetched last, if any.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Logical row number of the first row in the current page. `0` if no page has been fetched
    /// yet.
    pub fn page_start_row_offset(&self) -> i64 {
        self.page.as_ref().map_or(0, Page::start_row_offset)
    }

    /// Direction in which to fetch in order to move towards `row_number`. [`FetchOrientation::Next`]
    /// if `row_number` is already in the current page. Use [`Page::contains`] to determine if a
    /// fetch is required at all.
    pub fn direction_for(&self, row_number: i64) -> FetchOrientation {
        if row_number < self.page_start_row_offset() {
            FetchOrientation::Prior
        } else {
            FetchOrientation::Next
        }
    }

    /// Fetches pages until the current one contains `row_number`. No request is issued if it
    /// already does.
    ///
    /// # Return
    ///
    /// The current page and the position of `row_number` within it. `None` if fetching forward
    /// reached the end of the result set.
    pub fn ensure_page_contains(
        &mut self,
        client: &mut impl CliService,
        operation_handle: &OperationHandle,
        row_number: i64,
    ) -> Result<Option<(&Page, usize)>, Error> {
        while !self.page.as_ref().is_some_and(|page| page.contains(row_number)) {
            let orientation = self.direction_for(row_number);
            match orientation {
                FetchOrientation::Prior => {
                    if self.page_start_row_offset() == 0 {
                        return Err(Error::FetchPriorToStart);
                    }
                }
                FetchOrientation::Next => {
                    if self.page.as_ref().is_some_and(|page| !page.has_more_rows()) {
                        trace!("Reached end of result set at row {row_number}.");
                        return Ok(None);
                    }
                }
                other => return Err(Error::UnsupportedDirection(other)),
            }

            debug!(
                "Fetching up to {} rows in direction {:?} to reach row {}.",
                self.page_size, orientation, row_number
            );
            let mut response = client
                .fetch_results(FetchResultsReq {
                    operation_handle,
                    orientation,
                    max_rows: self.page_size,
                })
                .remote_call("FetchResults")?;
            mem::take(&mut response.status).into_result("FetchResults")?;
            self.page = Some(Page::from_response(response));
        }

        // Don't assume the requested row is the first row in the page
        Ok(self
            .page
            .as_ref()
            .and_then(|page| page.row_index(row_number).map(|index| (page, index))))
    }
}
