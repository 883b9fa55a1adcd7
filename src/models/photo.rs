use serde::{Deserialize, Serialize};

/// A single photo returned by the search API.
///
/// All four identifiers are required to derive a fetchable image URL; raw
/// records missing any of them are dropped during response mapping and never
/// reach consumers of the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub farm_id: u32,
    pub server_id: String,
    pub photo_id: String,
    pub secret_token: String,
}

impl Photo {
    /// URL of the static image for this photo.
    #[must_use]
    pub fn image_url(&self) -> String {
        format!(
            "https://farm{}.staticflickr.com/{}/{}_{}.jpg",
            self.farm_id, self.server_id, self.photo_id, self.secret_token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_format() {
        let photo = Photo {
            farm_id: 65,
            server_id: "55".to_string(),
            photo_id: "12345".to_string(),
            secret_token: "abcdef".to_string(),
        };
        assert_eq!(
            photo.image_url(),
            "https://farm65.staticflickr.com/55/12345_abcdef.jpg"
        );
    }

    #[test]
    fn photo_serialization_round_trip() {
        let photo = Photo {
            farm_id: 1,
            server_id: "srv".to_string(),
            photo_id: "id".to_string(),
            secret_token: "sec".to_string(),
        };
        let json = serde_json::to_string(&photo).unwrap();
        let back: Photo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, photo);
    }
}
