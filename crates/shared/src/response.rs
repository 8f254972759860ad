use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

/// API の共通レスポンス形式 `{status, message, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success("ok", Some(json!({"id": "1"})));

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({"status": "success", "message": "ok", "data": {"id": "1"}}));
    }

    #[test]
    fn test_fail_envelope_omits_data() {
        let response: ApiResponse<()> = ApiResponse::fail("nope");

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({"status": "fail", "message": "nope"}));
        assert_eq!(response.status, ResponseStatus::Fail);
    }
}
