use crate::types::FieldMatch;

/// Approximate string matching used to compare a query against field text.
///
/// Both sides arrive already normalised (case folded, optionally stripped of
/// diacritics). Implementations must be total: a field that cannot be
/// aligned is reported as `None`, never as a panic.
pub trait Matcher: Send + Sync {
    /// Best alignment of `pattern` within `text` costing at most `max_edits`.
    fn find(&self, pattern: &[char], text: &[char], max_edits: usize) -> Option<FieldMatch>;
}
