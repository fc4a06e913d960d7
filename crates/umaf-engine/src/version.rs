/// Envelope schema identifier written into every envelope's `version` field.
pub const ENVELOPE_VERSION: &str = "umaf-0.7.0";

/// Version segment embedded in provenance tags (`umaf:<version>:...`).
pub const PROVENANCE_VERSION: &str = "0.7.0";
