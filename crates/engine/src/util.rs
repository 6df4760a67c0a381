//! Internal helpers shared by the engine modules.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID read back from storage. Ids are written by the engine, so a
/// parse failure means the row is not usable and is reported as missing.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::KeyNotFound(label.to_string()))
}
