//! Record identifier scheme.
//!
//! Every stored record carries an id of the form `{PREFIX}_{NNNN}` with a
//! zero-padded sequence number (`LEAD_0001`, `PROJ_0012`, `QUOTE_0103`).
//! Allocation scans the ids already in use for that prefix and takes the
//! highest sequence plus one, so imported files and interactively created
//! records share one sequence without a separate counter table.

use serde::{Deserialize, Serialize};

/// Minimum digit width of the sequence part; wider sequences keep all
/// their digits.
const SEQUENCE_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordPrefix {
    Lead,
    Project,
    Quote,
}

impl RecordPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "LEAD",
            Self::Project => "PROJ",
            Self::Quote => "QUOTE",
        }
    }

    fn format(&self, sequence: u64) -> String {
        format!("{}_{:0width$}", self.as_str(), sequence, width = SEQUENCE_WIDTH)
    }

    /// Sequence number of `id` when it belongs to this prefix.
    fn sequence_of(&self, id: &str) -> Option<u64> {
        let rest = id.strip_prefix(self.as_str())?.strip_prefix('_')?;
        rest.parse().ok()
    }
}

/// Allocates the next identifier for `prefix` given the ids already in use.
///
/// Ids with other prefixes, or with a malformed sequence part, are ignored.
/// An empty store starts at `..._0001`.
pub fn next_record_id<'a, I>(prefix: RecordPrefix, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max_sequence = existing
        .into_iter()
        .filter_map(|id| prefix.sequence_of(id))
        .max()
        .unwrap_or(0);
    prefix.format(max_sequence + 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn first_id_starts_at_one() {
        let id = next_record_id(RecordPrefix::Lead, []);

        assert_eq!(id, "LEAD_0001");
    }

    #[test]
    fn next_id_follows_highest_sequence() {
        let existing = ["LEAD_0001", "LEAD_0007", "LEAD_0003"];

        let id = next_record_id(RecordPrefix::Lead, existing);

        assert_eq!(id, "LEAD_0008");
    }

    #[test]
    fn other_prefixes_are_ignored() {
        let existing = ["PROJ_0044", "QUOTE_0100", "LEAD_0002"];

        let id = next_record_id(RecordPrefix::Lead, existing);

        assert_eq!(id, "LEAD_0003");
    }

    #[test]
    fn malformed_ids_are_ignored() {
        let existing = ["LEAD_abc", "LEAD-0009", "LEAD_0004", "junk"];

        let id = next_record_id(RecordPrefix::Lead, existing);

        assert_eq!(id, "LEAD_0005");
    }

    #[test]
    fn sequence_grows_past_padding_width() {
        let existing = ["QUOTE_9999"];

        let id = next_record_id(RecordPrefix::Quote, existing);

        assert_eq!(id, "QUOTE_10000");
    }

    #[test]
    fn prefixes_render_expected_strings() {
        assert_eq!(RecordPrefix::Lead.as_str(), "LEAD");
        assert_eq!(RecordPrefix::Project.as_str(), "PROJ");
        assert_eq!(RecordPrefix::Quote.as_str(), "QUOTE");
    }
}
