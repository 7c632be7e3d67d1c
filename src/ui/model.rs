use crate::task::Task;

/// Indices of tasks whose name contains `query`, case-insensitively.
/// The query is matched raw, whitespace included; an empty query matches
/// everything.
pub fn filter_task_indices(tasks: &[Task], query: &str) -> Vec<usize> {
    let query_norm = query.to_lowercase();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| {
            query_norm.is_empty() || task.name.to_lowercase().contains(&query_norm)
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Keep the previously selected task selected if it is still visible,
/// otherwise fall back to the first visible row.
pub fn select_by_id(tasks: &[Task], filtered: &[usize], previous_id: Option<u64>) -> Option<usize> {
    if filtered.is_empty() {
        return None;
    }
    if let Some(id) = previous_id {
        if let Some(index) = tasks.iter().position(|task| task.id == id) {
            if filtered.contains(&index) {
                return Some(index);
            }
        }
    }
    Some(filtered[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status};
    use chrono::NaiveDate;

    fn task(id: u64, name: &str) -> Task {
        Task {
            id,
            name: name.to_string(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: Status::Pending,
            priority: Priority::Low,
        }
    }

    #[test]
    fn empty_query_matches_all() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta")];
        assert_eq!(filter_task_indices(&tasks, ""), vec![0, 1]);
    }

    #[test]
    fn whitespace_in_query_is_significant() {
        let tasks = vec![task(1, "Plan trip"), task(2, "Planning")];
        assert_eq!(filter_task_indices(&tasks, "plan "), vec![0]);
        assert!(filter_task_indices(&tasks, "   ").is_empty());
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let tasks = vec![task(1, "Review proposal"), task(2, "Write report")];
        assert_eq!(filter_task_indices(&tasks, "REVIEW"), vec![0]);
        assert_eq!(filter_task_indices(&tasks, "re"), vec![0, 1]);
        assert!(filter_task_indices(&tasks, "zzz").is_empty());
    }

    #[test]
    fn selection_survives_filtering() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta"), task(3, "Alpine")];
        let filtered = filter_task_indices(&tasks, "al");
        assert_eq!(filtered, vec![0, 2]);
        assert_eq!(select_by_id(&tasks, &filtered, Some(3)), Some(2));
        assert_eq!(select_by_id(&tasks, &filtered, Some(2)), Some(0));
        assert_eq!(select_by_id(&tasks, &[], Some(1)), None);
    }
}
