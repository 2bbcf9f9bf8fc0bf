//! Tests for pagination module

use super::*;
use test_case::test_case;

/// Drive the paginator against a server returning the given page sizes,
/// recording every window requested.
fn drive(paginator: &OffsetPaginator, pages: &[usize]) -> (Vec<PageWindow>, Option<StopReason>) {
    let mut state = PaginationState::new();
    let mut windows = Vec::new();
    let mut reason = None;
    let mut served = pages.iter();

    while let Some(window) = paginator.next_window(&state) {
        windows.push(window);
        let returned = served.next().copied().unwrap_or(0);
        if let NextPage::Done(r) = paginator.process_page(window, returned, &mut state) {
            reason = Some(r);
            break;
        }
    }

    (windows, reason)
}

// ============================================================================
// NextPage / PaginationState Tests
// ============================================================================

#[test]
fn test_next_page_predicates() {
    assert!(NextPage::Continue.is_continue());
    assert!(!NextPage::Continue.is_done());
    assert!(NextPage::Done(StopReason::ShortPage).is_done());
}

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.offset, 0);
    assert_eq!(state.pages, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
}

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::new();

    state.add_offset(50);
    assert_eq!(state.offset, 50);

    state.add_offset(u32::MAX);
    assert_eq!(state.offset, u32::MAX);

    state.add_fetched(100);
    assert_eq!(state.total_fetched, 100);

    state.mark_done();
    assert!(state.done);
}

// ============================================================================
// OffsetPaginator Tests
// ============================================================================

#[test]
fn test_zero_page_size_rejected() {
    let err = OffsetPaginator::new(0, None).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Config);
}

#[test]
fn test_first_window() {
    let paginator = OffsetPaginator::new(5000, None).unwrap();
    let window = paginator.next_window(&PaginationState::new()).unwrap();
    assert_eq!(window, PageWindow { skip: 0, top: 5000 });
}

#[test]
fn test_total_smaller_than_page_size() {
    let paginator = OffsetPaginator::new(5000, Some(120)).unwrap();
    let window = paginator.next_window(&PaginationState::new()).unwrap();
    assert_eq!(window, PageWindow { skip: 0, top: 120 });
}

#[test]
fn test_total_zero_requests_nothing() {
    let paginator = OffsetPaginator::new(10, Some(0)).unwrap();
    let (windows, reason) = drive(&paginator, &[]);
    assert!(windows.is_empty());
    assert_eq!(reason, None);
}

#[test]
fn test_bounded_fetch_clamps_last_page() {
    // page_size=2, total=5, server pages [2,2,1]
    let paginator = OffsetPaginator::new(2, Some(5)).unwrap();
    let (windows, reason) = drive(&paginator, &[2, 2, 1]);

    assert_eq!(
        windows,
        vec![
            PageWindow { skip: 0, top: 2 },
            PageWindow { skip: 2, top: 2 },
            PageWindow { skip: 4, top: 1 },
        ]
    );
    // The last page returned exactly what was asked, so the total ends it
    assert_eq!(reason, Some(StopReason::TotalReached));
}

#[test]
fn test_unbounded_fetch_stops_on_short_page() {
    // page_size=2, no total, server pages [2,2,2,1]
    let paginator = OffsetPaginator::new(2, None).unwrap();
    let (windows, reason) = drive(&paginator, &[2, 2, 2, 1]);

    assert_eq!(windows.len(), 4);
    assert_eq!(windows[3], PageWindow { skip: 6, top: 2 });
    assert_eq!(reason, Some(StopReason::ShortPage));
}

#[test]
fn test_empty_page_is_short_page() {
    let paginator = OffsetPaginator::new(3, None).unwrap();
    let (windows, reason) = drive(&paginator, &[3, 0]);
    assert_eq!(windows.len(), 2);
    assert_eq!(reason, Some(StopReason::ShortPage));
}

#[test]
fn test_short_page_wins_over_total() {
    // Total allows 10 but the server runs dry on page 2
    let paginator = OffsetPaginator::new(4, Some(10)).unwrap();
    let (windows, reason) = drive(&paginator, &[4, 1]);
    assert_eq!(windows.len(), 2);
    assert_eq!(reason, Some(StopReason::ShortPage));
}

#[test]
fn test_offset_advances_by_requested_not_returned() {
    // A server that ignores $top and sends more than asked
    let paginator = OffsetPaginator::new(2, None).unwrap();
    let mut state = PaginationState::new();

    let window = paginator.next_window(&state).unwrap();
    let next = paginator.process_page(window, 5, &mut state);

    assert!(next.is_continue());
    assert_eq!(state.offset, 2);
    assert_eq!(state.total_fetched, 5);
}

#[test]
fn test_done_state_yields_no_window() {
    let paginator = OffsetPaginator::new(2, None).unwrap();
    let mut state = PaginationState::new();
    state.mark_done();
    assert!(paginator.next_window(&state).is_none());
}

#[test_case(1, 1 ; "single record single page")]
#[test_case(10, 3 ; "uneven split")]
#[test_case(9, 3 ; "exact multiple")]
#[test_case(7, 10 ; "total below page size")]
#[test_case(5000, 5000 ; "default page size")]
fn test_request_count_is_ceiling(total: u32, page_size: u32) {
    let paginator = OffsetPaginator::new(page_size, Some(total)).unwrap();
    // Server always fills whatever is requested
    let full: Vec<usize> = (0..total.div_ceil(page_size))
        .map(|i| page_size.min(total - i * page_size) as usize)
        .collect();

    let (windows, reason) = drive(&paginator, &full);

    assert_eq!(windows.len() as u32, total.div_ceil(page_size));
    assert_eq!(windows.iter().map(|w| w.top).sum::<u32>(), total);
    if total % page_size != 0 {
        let last = windows.last().unwrap();
        assert_eq!(last.top, total - (windows.len() as u32 - 1) * page_size);
    }
    assert_eq!(reason, Some(StopReason::TotalReached));
}
