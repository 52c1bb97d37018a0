use crate::types::constant::COLLECTION_ID_SEPARATOR;

/// Composite collection id, `<name>___<version>`.
pub fn construct_collection_id(name: &str, version: &str) -> String {
    format!("{}{}{}", name, COLLECTION_ID_SEPARATOR, version)
}
