use crate::models::envelope::STRUCTURE_FLAG;
use crate::models::{Block, BlockBody, BlockKind, Envelope, Span};

use super::{
    ids::{ROOT_BLOCK_ID, ROOT_SPAN_ID},
    provenance::{SourceOrigin, classify},
};

/// Restores the root span and root block of an envelope whose structure may
/// have been stripped. A no-op when both are present; missing ones are
/// inserted at index 0.
pub fn ensure_root_span_and_block(mut envelope: Envelope) -> Envelope {
    let has_span = envelope.spans.iter().any(|s| s.id == ROOT_SPAN_ID);
    let has_block = envelope.blocks.iter().any(|b| b.id == ROOT_BLOCK_ID);
    if has_span && has_block {
        return envelope;
    }

    let line_count = envelope.line_count.max(1);
    if !has_span {
        envelope
            .spans
            .insert(0, Span::new(ROOT_SPAN_ID, 1, line_count));
    }
    if !has_block {
        let provenance = classify(
            BlockKind::Root,
            SourceOrigin::from_media_type(&envelope.media_type),
            None,
        );
        envelope.blocks.insert(
            0,
            Block {
                id: ROOT_BLOCK_ID.to_string(),
                span_id: ROOT_SPAN_ID.to_string(),
                parent_id: None,
                body: BlockBody::Root {
                    title: envelope.doc_title.clone(),
                    media_type: envelope.media_type.clone(),
                },
                provenance: provenance.tag,
                confidence: provenance.confidence,
            },
        );
    }
    envelope
        .feature_flags
        .insert(STRUCTURE_FLAG.to_string(), true);
    envelope
}
