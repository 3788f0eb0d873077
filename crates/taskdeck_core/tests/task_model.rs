use taskdeck_core::{Category, Deadline, Task, TaskId, TaskValidationError};

#[test]
fn task_new_sets_defaults_and_trims_text() {
    let task = Task::new("  Finish homework  ", Category::Assignment, None);

    assert!(!task.id.as_str().is_empty());
    assert_eq!(task.text, "Finish homework");
    assert_eq!(task.category, Category::Assignment);
    assert_eq!(task.deadline, None);
    assert!(!task.completed);
}

#[test]
fn generated_ids_are_unique() {
    let first = Task::new("a", Category::Study, None);
    let second = Task::new("b", Category::Study, None);
    assert_ne!(first.id, second.id);
}

#[test]
fn validate_rejects_blank_text_and_id() {
    let blank_text = Task::with_id(TaskId::from("t-1"), "   ", Category::Other, None);
    assert_eq!(blank_text.validate(), Err(TaskValidationError::EmptyText));

    let blank_id = Task::with_id(TaskId::from(""), "Lab", Category::Lab, None);
    assert_eq!(blank_id.validate(), Err(TaskValidationError::EmptyId));
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let deadline = Deadline::parse("2025-12-30T14:30").unwrap();
    let mut task = Task::with_id(TaskId::from("lx3k9a2b"), "Exam review", Category::Exam, deadline);
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "lx3k9a2b");
    assert_eq!(json["text"], "Exam review");
    assert_eq!(json["category"], "exam");
    assert_eq!(json["deadline"], "2025-12-30T14:30");
    assert_eq!(json["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_treats_empty_null_and_missing_deadline_as_none() {
    for value in [
        serde_json::json!({"id": "a", "text": "x", "category": "study", "deadline": "", "completed": false}),
        serde_json::json!({"id": "a", "text": "x", "category": "study", "deadline": null, "completed": false}),
        serde_json::json!({"id": "a", "text": "x", "category": "study", "completed": false}),
    ] {
        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.deadline, None);
    }
}

#[test]
fn deserialize_rejects_garbage_deadline() {
    let value = serde_json::json!({
        "id": "a",
        "text": "x",
        "category": "study",
        "deadline": "next friday",
        "completed": false
    });
    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid deadline"),
        "unexpected error: {err}"
    );
}

#[test]
fn overdue_requires_deadline_in_past_and_active_task() {
    let now = Deadline::parse("2025-06-01T12:00").unwrap().unwrap().as_datetime();
    let past = Deadline::parse("2025-01-01T10:00").unwrap();
    let exact = Deadline::parse("2025-06-01T12:00").unwrap();

    let mut task = Task::new("Finish homework", Category::Assignment, past);
    assert!(task.is_overdue(now));

    task.completed = true;
    assert!(!task.is_overdue(now));

    let on_the_minute = Task::new("Submit lab", Category::Lab, exact);
    assert!(!on_the_minute.is_overdue(now));

    let no_deadline = Task::new("Read Ch.1", Category::Reading, None);
    assert!(!no_deadline.is_overdue(now));
}

#[test]
fn category_table_covers_every_variant() {
    let classes: Vec<&str> = Category::ALL.iter().map(|c| c.style_class()).collect();
    assert_eq!(
        classes,
        vec![
            "cat-study",
            "cat-assignment",
            "cat-project",
            "cat-exam",
            "cat-lab",
            "cat-reading",
            "cat-other"
        ]
    );
    assert!(Category::Exam.label().ends_with("Exam Prep"));
    assert!(Category::Lab.label().ends_with("Lab Work"));
}
