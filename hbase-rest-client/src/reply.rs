//! Data-or-status result of a gateway call.

use reqwest::StatusCode;

use crate::error::{Error, Result};

/// Outcome of a call whose success is signalled by a specific status code.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply<T> {
    /// The gateway answered with the success status and a parsed body.
    Data(T),
    /// The gateway answered with any other status.
    Status(StatusCode),
}

impl<T> GatewayReply<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, GatewayReply::Data(_))
    }

    pub fn data(self) -> Option<T> {
        match self {
            GatewayReply::Data(data) => Some(data),
            GatewayReply::Status(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            GatewayReply::Data(data) => Some(data),
            GatewayReply::Status(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayReply::Data(_) => None,
            GatewayReply::Status(status) => Some(*status),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> GatewayReply<U> {
        match self {
            GatewayReply::Data(data) => GatewayReply::Data(f(data)),
            GatewayReply::Status(status) => GatewayReply::Status(status),
        }
    }

    /// Treat any status reply as [`Error::UnexpectedStatus`].
    pub fn into_result(self) -> Result<T> {
        match self {
            GatewayReply::Data(data) => Ok(data),
            GatewayReply::Status(status) => Err(Error::UnexpectedStatus(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_accessors() {
        let reply: GatewayReply<u32> = GatewayReply::Data(7);
        assert!(reply.is_data());
        assert_eq!(reply.status(), None);
        assert_eq!(reply.as_data(), Some(&7));
        assert_eq!(reply.map(|n| n * 2).data(), Some(14));
    }

    #[test]
    fn test_status_accessors() {
        let reply: GatewayReply<u32> = GatewayReply::Status(StatusCode::NOT_FOUND);
        assert!(!reply.is_data());
        assert_eq!(reply.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(reply.clone().map(|n| n + 1), GatewayReply::Status(StatusCode::NOT_FOUND));
        assert_eq!(reply.data(), None);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(GatewayReply::Data("ok").into_result().unwrap(), "ok");

        let err = GatewayReply::<()>::Status(StatusCode::SERVICE_UNAVAILABLE)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE)));
    }
}
