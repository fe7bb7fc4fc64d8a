//! Planner title and icon shown above the grid.

use crate::constants::DEFAULT_PLANNER_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerProfile {
    pub name: String,
    /// Image data URI, or empty for no icon.
    pub icon: String,
}

impl Default for PlannerProfile {
    fn default() -> Self {
        PlannerProfile {
            name: DEFAULT_PLANNER_NAME.to_string(),
            icon: String::new(),
        }
    }
}

impl PlannerProfile {
    /// Trimmed name, or the default when blank.
    pub fn normalize_name(name: &str) -> String {
        match name.trim() {
            "" => DEFAULT_PLANNER_NAME.to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_fall_back_to_default() {
        assert_eq!(PlannerProfile::normalize_name("   "), "SNFTutor");
        assert_eq!(PlannerProfile::normalize_name("  Ms. Park  "), "Ms. Park");
    }
}
