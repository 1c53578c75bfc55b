//! Follow-up reply interpretation for delete/complete/add prompts.
//!
//! Instead of accepting a bare index at any time, each prompt arms a
//! per-user pending-action slot and the next plain-text message is resolved
//! against it. Indices are 1-based against the currently *stored*
//! collection, not the rendered one; positions renumber on the next render.

use crate::domains::records::RecordKind;

/// What the user's next plain-text message is meant to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Awaiting an index (or the all-sentinel) to delete from a collection.
    Delete(RecordKind),
    /// Awaiting an index to mark a homework item done.
    HomeworkDone,
    /// Awaiting the reminder text (`Текст | Дата`).
    ReminderAdd,
    /// Awaiting a notes search keyword.
    NoteSearch,
}

/// A parsed delete/complete reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexReply {
    /// 0-based position, converted from the user's 1-based input.
    Index(usize),
    /// Clear-the-collection sentinel ("Все"/"all").
    All,
}

/// Parses an index reply. Returns None for anything that is neither a
/// positive integer nor the all-sentinel; the caller reports that as
/// recoverable invalid input.
pub fn parse_index_reply(text: &str) -> Option<IndexReply> {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();
    if lower == "все" || lower == "all" {
        return Some(IndexReply::All);
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 => Some(IndexReply::Index(n - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_based_indices() {
        assert_eq!(parse_index_reply("1"), Some(IndexReply::Index(0)));
        assert_eq!(parse_index_reply(" 12 "), Some(IndexReply::Index(11)));
    }

    #[test]
    fn accepts_all_sentinel_in_both_languages_and_cases() {
        assert_eq!(parse_index_reply("Все"), Some(IndexReply::All));
        assert_eq!(parse_index_reply("ВСЕ"), Some(IndexReply::All));
        assert_eq!(parse_index_reply("all"), Some(IndexReply::All));
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        assert_eq!(parse_index_reply("0"), None);
        assert_eq!(parse_index_reply("-3"), None);
        assert_eq!(parse_index_reply("first"), None);
    }
}
