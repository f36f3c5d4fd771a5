use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query/body parameters for the recommendations endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_validation() {
        assert!(RecommendRequest { limit: None }.validate().is_ok());
        assert!(RecommendRequest { limit: Some(20) }.validate().is_ok());
        assert!(RecommendRequest { limit: Some(0) }.validate().is_err());
        assert!(RecommendRequest { limit: Some(101) }.validate().is_err());
    }
}
