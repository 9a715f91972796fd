// SPDX-License-Identifier: GPL-3.0-only

use super::Location;
use crate::entities::Cursor;

/// Identifies an action related to Pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationAction {
    Next,
    Previous,
}

/// Where `action` leads from `location`, or `None` when the action is unavailable.
///
/// On the list page `limit` is the page size and `has_next` whether the source
/// reported a further page. On the detail page ids step by one; there is no upper
/// bound, an id past the last Pokémon simply fails to load.
pub fn target(
    location: Location,
    action: PaginationAction,
    has_next: bool,
    limit: i64,
) -> Option<Location> {
    match location {
        Location::List { offset } => {
            let cursor = Cursor::new(offset, limit);
            let offset = match action {
                PaginationAction::Next => next_offset(cursor, has_next),
                PaginationAction::Previous => previous_offset(cursor),
            }?;
            Some(Location::List { offset })
        }
        Location::Detail { id, offset } => {
            let id = match action {
                PaginationAction::Next => next_id(id),
                PaginationAction::Previous => previous_id(id),
            }?;
            Some(Location::Detail { id, offset })
        }
    }
}

pub fn next_offset(cursor: Cursor, has_next: bool) -> Option<i64> {
    if !has_next {
        return None;
    }
    cursor.offset.checked_add(cursor.limit)
}

pub fn previous_offset(cursor: Cursor) -> Option<i64> {
    (cursor.offset > 0).then(|| (cursor.offset - cursor.limit).max(0))
}

pub fn next_id(id: i64) -> Option<i64> {
    id.checked_add(1)
}

pub fn previous_id(id: i64) -> Option<i64> {
    (id - 1 > 0).then_some(id - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_pages_step_by_the_limit() {
        let first = Location::List { offset: 0 };

        let second = target(first, PaginationAction::Next, true, 12).unwrap();
        assert_eq!(second, Location::List { offset: 12 });

        let back = target(second, PaginationAction::Previous, true, 12).unwrap();
        assert_eq!(back, first);
    }

    #[test]
    fn list_edges() {
        let first = Location::List { offset: 0 };
        assert_eq!(target(first, PaginationAction::Previous, true, 12), None);

        let last = Location::List { offset: 1296 };
        assert_eq!(target(last, PaginationAction::Next, false, 12), None);

        // a bookmarked offset near the top of the range has nowhere further to go
        let far = Location::List { offset: i64::MAX };
        assert_eq!(target(far, PaginationAction::Next, true, 12), None);
        assert_eq!(
            target(far, PaginationAction::Previous, true, 12),
            Some(Location::List {
                offset: i64::MAX - 12
            })
        );

        // an offset that is not a multiple of the page size never goes negative
        let odd = Location::List { offset: 5 };
        assert_eq!(
            target(odd, PaginationAction::Previous, true, 12),
            Some(Location::List { offset: 0 })
        );
    }

    #[test]
    fn detail_steps_by_one_and_keeps_the_offset() {
        let five = Location::Detail { id: 5, offset: 12 };
        assert_eq!(
            target(five, PaginationAction::Next, false, 12),
            Some(Location::Detail { id: 6, offset: 12 })
        );
        assert_eq!(
            target(five, PaginationAction::Previous, false, 12),
            Some(Location::Detail { id: 4, offset: 12 })
        );
    }

    #[test]
    fn detail_edges() {
        let one = Location::Detail { id: 1, offset: 0 };
        assert_eq!(target(one, PaginationAction::Previous, true, 12), None);

        let max = Location::Detail {
            id: i64::MAX,
            offset: 0,
        };
        assert_eq!(target(max, PaginationAction::Next, true, 12), None);
    }
}
