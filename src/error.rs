use thiserror::Error;

/// Request-level failures. Startup failures go through `anyhow` instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read request body: {0}")]
    Body(#[from] std::io::Error),

    #[error("invalid update request: {0}")]
    InvalidUpdate(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

impl DashboardError {
    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::Body(_) | DashboardError::InvalidUpdate(_) => 400,
            DashboardError::NotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let bad: DashboardError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert_eq!(bad.status_code(), 400);
        assert!(bad.to_string().starts_with("invalid update request"));
        assert_eq!(DashboardError::NotFound("/nope".into()).status_code(), 404);
    }
}
