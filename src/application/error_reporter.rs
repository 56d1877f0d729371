use std::fmt;

use crate::domain::models::{ItemError, ItemRejection, ItemResult};

/// Statuses at or above this are item rejections.
pub const REJECTION_STATUS: u16 = 400;

/// Returns the diagnostic for a rejected item, or `None` if it was accepted.
pub fn describe(item: &ItemResult) -> Option<ItemRejection> {
    if item.status < REJECTION_STATUS {
        return None;
    }

    let detail = item
        .error
        .as_ref()
        .map(error_detail)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| format!("status {}", item.status));

    Some(ItemRejection {
        id: item.id.clone(),
        status: item.status,
        detail,
    })
}

/// `type; reason` for structured errors, skipping absent parts; raw strings as-is.
pub fn error_detail(error: &ItemError) -> String {
    match error {
        ItemError::Structured(cause) => [cause.kind.as_deref(), cause.reason.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("; "),
        ItemError::Raw(message) => message.clone(),
    }
}

impl fmt::Display for ItemRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(document ID '{}'): {}", self.id, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ErrorCause;

    fn item(status: u16, error: Option<ItemError>) -> ItemResult {
        ItemResult {
            operation: "index".into(),
            id: "17".into(),
            status,
            error,
        }
    }

    fn structured(kind: Option<&str>, reason: Option<&str>) -> Option<ItemError> {
        Some(ItemError::Structured(ErrorCause {
            kind: kind.map(String::from),
            reason: reason.map(String::from),
        }))
    }

    #[test]
    fn accepted_items_have_no_diagnostic() {
        assert_eq!(describe(&item(200, None)), None);
        assert_eq!(describe(&item(201, None)), None);
        assert_eq!(describe(&item(399, structured(Some("x"), None))), None);
    }

    #[test]
    fn joins_type_and_reason() {
        let rejection = describe(&item(
            400,
            structured(Some("mapper_parsing_exception"), Some("failed to parse [iso.dot.name]")),
        ))
        .unwrap();

        assert_eq!(
            rejection.to_string(),
            "error(document ID '17'): mapper_parsing_exception; failed to parse [iso.dot.name]"
        );
    }

    #[test]
    fn omits_absent_parts() {
        let only_reason = describe(&item(400, structured(None, Some("bad field")))).unwrap();
        let only_type = describe(&item(409, structured(Some("version_conflict"), None))).unwrap();

        assert_eq!(only_reason.detail, "bad field");
        assert_eq!(only_type.detail, "version_conflict");
    }

    #[test]
    fn uses_raw_error_string() {
        let rejection = describe(&item(
            500,
            Some(ItemError::Raw("MapperParsingException[failed]".into())),
        ))
        .unwrap();

        assert_eq!(rejection.to_string(), "error(document ID '17'): MapperParsingException[failed]");
    }

    #[test]
    fn falls_back_to_status_without_error_body() {
        let rejection = describe(&item(503, structured(None, None))).unwrap();

        assert_eq!(rejection.detail, "status 503");
        assert_eq!(describe(&item(404, None)).unwrap().detail, "status 404");
    }
}
