use serde::Serialize;

/// Envelope wrapped around every JSON body the API returns:
///
/// ```json
/// { "success": true, "data": { "id": 7, "title": "VPN is down" }, "message": "Ticket created successfully" }
/// ```
///
/// Failures carry `success: false`, the default value of `T` as `data`, and the reason
/// in `message`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error response; `data` is `T::default()`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}
