use crate::models::SemanticModel;

use super::SemanticParser;

/// JSON documents carry no prose structure; the walker covers them with raw blocks.
pub struct JsonParser;

impl SemanticParser for JsonParser {
    fn parse(&self, _text: &str) -> SemanticModel {
        SemanticModel::default()
    }
}
