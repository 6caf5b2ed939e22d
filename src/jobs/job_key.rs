use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::database::models::job;

/// Identity of a live scheduled task: the job id within its group.
///
/// Always derive it from a persisted row. A key built from stale data (for
/// example the group before an update) addresses a task that no longer matches
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub id: i32,
    pub group: String,
}

impl JobKey {
    pub fn new(id: i32, group: impl Into<String>) -> Self {
        Self {
            id,
            group: group.into(),
        }
    }
}

impl From<&job::Model> for JobKey {
    fn from(job: &job::Model) -> Self {
        Self::new(job.id, job.job_group.clone())
    }
}

impl Display for JobKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.job-{}", self.group, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_in_different_groups_are_distinct_keys() {
        assert_ne!(JobKey::new(7, "DEFAULT"), JobKey::new(7, "SYSTEM"));
        assert_eq!(JobKey::new(7, "DEFAULT"), JobKey::new(7, "DEFAULT"));
    }

    #[test]
    fn test_display() {
        assert_eq!(JobKey::new(42, "SYSTEM").to_string(), "SYSTEM.job-42");
    }
}
