//! Enrichment links stored alongside each record

/// Google Maps search pinned at the coordinates
pub fn map_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        latitude, longitude
    )
}

/// YouTube search for weather videos about the resolved place name
pub fn youtube_url(name: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}+weather",
        name.trim().replace(' ', "+")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_url() {
        assert_eq!(
            map_url(48.8566, 2.3522),
            "https://www.google.com/maps/search/?api=1&query=48.8566,2.3522"
        );
        assert!(map_url(-33.8688, 151.2093).ends_with("query=-33.8688,151.2093"));
    }

    #[test]
    fn test_youtube_url_joins_words() {
        assert_eq!(
            youtube_url("New York"),
            "https://www.youtube.com/results?search_query=New+York+weather"
        );
        assert_eq!(
            youtube_url("Paris"),
            "https://www.youtube.com/results?search_query=Paris+weather"
        );
    }
}
