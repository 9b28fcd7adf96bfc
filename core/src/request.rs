//! Payload assembly for the juggle and verify resources.
//!
//! Stateless functions, one per request section. The ones that take a file
//! read it eagerly so that a missing input fails before anything is sent.

use std::path::Path;

use crate::error::Result;
use crate::files::read_file;
use crate::types::{
    ConstraintsData, FileFormat, GeneticCode, ModificationData, OutputData, SequenceData,
    SequenceType, Strategy, Vendor,
};

/// Sequence information: the file's raw text, its type, and whether the
/// server should annotate coding regions on its own.
pub fn build_sequence_data(
    file: impl AsRef<Path>,
    sequence_type: SequenceType,
    auto_annotate: bool,
) -> Result<SequenceData> {
    Ok(SequenceData {
        text: read_file(file)?,
        sequence_type: vec![sequence_type],
        auto_annotate,
    })
}

/// Modification information: strategy plus codon usage table. The genetic
/// code is always `STANDARD`.
pub fn build_modification_data(
    strategy: Strategy,
    codon_usage_table: impl AsRef<Path>,
) -> Result<ModificationData> {
    Ok(ModificationData {
        strategy_name: strategy,
        text: read_file(codon_usage_table)?,
        strategy_genetic_code: GeneticCode::Standard,
    })
}

pub fn build_output_data(format: FileFormat) -> OutputData {
    OutputData {
        output_format: format,
    }
}

pub fn build_constraints_data(vendor: Vendor) -> ConstraintsData {
    ConstraintsData { vendor }
}
