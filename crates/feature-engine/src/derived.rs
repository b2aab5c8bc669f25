//! Derived Engagement Features

/// Likes plus comments per view; 0 when there are no views
pub fn engagement_rate(likes: f64, comments: f64, views: f64) -> f64 {
    if views > 0.0 {
        (likes + comments) / views
    } else {
        0.0
    }
}

/// Total interactions (likes + comments)
pub fn interaction(likes: f64, comments: f64) -> f64 {
    likes + comments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_rate() {
        assert!((engagement_rate(500.0, 100.0, 10_000.0) - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_engagement_rate_without_views() {
        assert_eq!(engagement_rate(0.0, 0.0, 0.0), 0.0);
        assert_eq!(engagement_rate(10.0, 3.0, 0.0), 0.0);
    }

    #[test]
    fn test_interaction() {
        assert_eq!(interaction(500.0, 100.0), 600.0);
    }
}
