//! Classification of response status codes.

/// How the client reacts to a response, decided from its status code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    /// 401: the server no longer recognizes the session.
    Unauthorized,
    /// 404: the endpoint (or record) is not there.
    NotFound,
    OtherError,
}

impl ResponseStatus {
    pub fn classify(status: u16) -> Self {
        match status {
            200..=299 => ResponseStatus::Success,
            401 => ResponseStatus::Unauthorized,
            404 => ResponseStatus::NotFound,
            _ => ResponseStatus::OtherError,
        }
    }

    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_codes() {
        assert_eq!(ResponseStatus::classify(200), ResponseStatus::Success);
        assert_eq!(ResponseStatus::classify(204), ResponseStatus::Success);
        assert_eq!(ResponseStatus::classify(401), ResponseStatus::Unauthorized);
        assert_eq!(ResponseStatus::classify(404), ResponseStatus::NotFound);
        assert_eq!(ResponseStatus::classify(403), ResponseStatus::OtherError);
        assert_eq!(ResponseStatus::classify(500), ResponseStatus::OtherError);
        assert_eq!(ResponseStatus::classify(302), ResponseStatus::OtherError);
    }
}
