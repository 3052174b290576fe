use serde::Serialize;
use utoipa::ToSchema;

/// Pagination block attached to list responses. Single-object and mutation
/// responses carry the empty variant so the envelope shape stays constant.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

/// Error payload; `error` repeats the envelope message so clients that only
/// look at `data` still see what went wrong.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub error: String,
}

/// The one JSON envelope every endpoint answers with, success or failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

impl ApiResponse<ErrorDetail> {
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            data: Some(ErrorDetail {
                error: message.clone(),
            }),
            message,
            meta: Some(Meta::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_repeats_the_message() {
        let body = ApiResponse::failure("Unauthorized");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["message"], "Unauthorized");
        assert_eq!(json["data"]["error"], "Unauthorized");
        assert!(json["meta"]["page"].is_null());
    }
}
