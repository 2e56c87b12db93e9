use model::{
    execution::request::ReportRequest,
    pagination::page::{EndReason, PageOutcome},
};

/// Where pagination stands after a page has been handled.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// Ask for the next page with this request.
    More(ReportRequest),
    Done(EndReason),
}

/// Decides whether another page is needed for the same establishment.
///
/// Only a full page keeps pagination going; a short page, an empty
/// page or a failed page ends it.
pub fn next_state(request: &ReportRequest, outcome: &PageOutcome) -> PageState {
    match outcome {
        PageOutcome::Page { rows } if request.cursor.is_full_page(rows.len()) => {
            PageState::More(request.next_page())
        }
        PageOutcome::Page { .. } => PageState::Done(EndReason::ShortPage),
        PageOutcome::EndOfData => PageState::Done(EndReason::EndOfData),
        PageOutcome::TransientError { .. } => PageState::Done(EndReason::TransientError),
    }
}
