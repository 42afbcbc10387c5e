//! Wire types for the generation backend.

use serde::{Deserialize, Serialize};

use crate::domain::GenerationRequest;

/// Request body sent to the generation service.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequestDto {
    /// Source text to document.
    pub code: String,
    /// Language tag, forwarded unchanged.
    pub language: String,
}

impl From<&GenerationRequest> for GenerateRequestDto {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            code: request.code().as_str().to_owned(),
            language: request.language().as_str().to_owned(),
        }
    }
}

/// Response body returned by the generation service.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponseDto {
    /// Generated documentation text.
    pub documentation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CodeSnippet, LanguageTag};

    #[test]
    fn request_dto_mirrors_the_domain_request() {
        let request = GenerationRequest::new(
            CodeSnippet::new("print(1)").expect("valid code"),
            LanguageTag::new("python").expect("valid language"),
        );
        let dto = GenerateRequestDto::from(&request);
        let encoded = serde_json::to_value(&dto).expect("serialises");
        assert_eq!(encoded["code"], "print(1)");
        assert_eq!(encoded["language"], "python");
    }

    #[test]
    fn response_dto_decodes_the_documented_shape() {
        let decoded: GenerateResponseDto =
            serde_json::from_str(r#"{"documentation":"Prints 1"}"#).expect("decodes");
        assert_eq!(decoded.documentation, "Prints 1");
    }
}
