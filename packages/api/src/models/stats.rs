use serde::Deserialize;

/// Platform totals for the admin dashboard; missing counters read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_lessons: u64,
    #[serde(default)]
    pub public_lessons: u64,
    #[serde(default)]
    pub total_reports: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats() {
        let stats: AdminStats = serde_json::from_str(r#"{"totalUsers":4,"publicLessons":2}"#).unwrap();
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.public_lessons, 2);
        assert_eq!(stats.total_lessons, 0);
        assert_eq!(stats.total_reports, 0);
    }
}
