//! Merge rule lookup for a pair of node kinds.

use std::fmt;

use crate::error::{Error, Result};
use crate::node::Kind;

/// The merge rule that applies to a `from`/`into` kind pair.
///
/// Direction matters: merging a mapping into a scalar is a different rule
/// from merging a scalar into a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combination {
    ScalarIntoScalar,
    /// Scalar into a mapping, sequence or document.
    ScalarIntoOther,
    MappingIntoScalar,
    MappingIntoMapping,
    MappingIntoSequence,
    SequenceIntoScalar,
    SequenceIntoMapping,
    SequenceIntoSequence,
    DocumentIntoDocument,
}

impl Combination {
    /// Look up the rule for `from` merged into `into`.
    ///
    /// Aliases on either side, documents paired with anything but a document,
    /// and collections merged into a document are rejected.
    pub fn classify(from: Kind, into: Kind) -> Result<Self> {
        use Combination::*;

        let combination = match (from, into) {
            (_, Kind::Alias) => None,
            (Kind::Scalar, Kind::Scalar) => Some(ScalarIntoScalar),
            (Kind::Scalar, _) => Some(ScalarIntoOther),
            (Kind::Mapping, Kind::Scalar) => Some(MappingIntoScalar),
            (Kind::Mapping, Kind::Mapping) => Some(MappingIntoMapping),
            (Kind::Mapping, Kind::Sequence) => Some(MappingIntoSequence),
            (Kind::Sequence, Kind::Scalar) => Some(SequenceIntoScalar),
            (Kind::Sequence, Kind::Mapping) => Some(SequenceIntoMapping),
            (Kind::Sequence, Kind::Sequence) => Some(SequenceIntoSequence),
            (Kind::Document, Kind::Document) => Some(DocumentIntoDocument),
            _ => None,
        };
        combination.ok_or(Error::UnsupportedCombination { from, into })
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Combination::ScalarIntoScalar => "scalar-into-scalar",
            Combination::ScalarIntoOther => "scalar-into-other",
            Combination::MappingIntoScalar => "mapping-into-scalar",
            Combination::MappingIntoMapping => "mapping-into-mapping",
            Combination::MappingIntoSequence => "mapping-into-sequence",
            Combination::SequenceIntoScalar => "sequence-into-scalar",
            Combination::SequenceIntoMapping => "sequence-into-mapping",
            Combination::SequenceIntoSequence => "sequence-into-sequence",
            Combination::DocumentIntoDocument => "document-into-document",
        };
        f.write_str(name)
    }
}
