/// Formats externally reachable photo links from the configured host and port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoUrlBuilder {
    host: String,
    port: u16,
}

impl PhotoUrlBuilder {
    /// Creates a builder for the given public host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Link to the photo of `item_id`.
    pub fn photo_url(&self, item_id: &str) -> String {
        build_photo_url(&self.host, self.port, item_id)
    }
}

/// `http://{host}:{port}/inventory/{id}/photo`
pub fn build_photo_url(host: &str, port: u16, item_id: &str) -> String {
    format!("http://{}:{}/inventory/{}/photo", host, port, item_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_photo_url() {
        assert_eq!(
            build_photo_url("127.0.0.1", 3000, "abc"),
            "http://127.0.0.1:3000/inventory/abc/photo"
        );
        assert_eq!(
            PhotoUrlBuilder::new("example.org", 80).photo_url("42"),
            "http://example.org:80/inventory/42/photo"
        );
    }
}
