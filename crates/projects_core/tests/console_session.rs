use projects_core::db::open_db_in_memory;
use projects_core::{
    ConsoleError, Flow, Hours, InMemoryProjectRepository, Project, ProjectRepository,
    ProjectService, ProjectsConsole, SqliteProjectRepository,
};
use std::io::Cursor;

type Session<'r, R> = ProjectsConsole<&'r R, Cursor<Vec<u8>>, Vec<u8>>;

fn session<'r, R: ProjectRepository>(repo: &'r R, script: &str) -> Session<'r, R> {
    ProjectsConsole::new(
        ProjectService::new(repo),
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
    )
}

fn transcript<R: ProjectRepository>(console: &Session<'_, R>) -> String {
    String::from_utf8(console.output().clone()).unwrap()
}

fn hours(text: &str) -> Hours {
    text.parse().unwrap()
}

fn seeded_repo(names: &[&str]) -> InMemoryProjectRepository {
    let repo = InMemoryProjectRepository::new();
    for name in names {
        repo.add_project(&Project::named(*name)).unwrap();
    }
    repo
}

#[test]
fn build_shed_walkthrough() {
    let repo = InMemoryProjectRepository::new();
    let script = concat!(
        "1\nBuild shed\n12\n\n3\n\n", // create
        "2\n",                       // list
        "3\n1\n",                    // select
        "4\n\n15\n\n\n\n",           // update estimated hours only
        "\n",                        // exit
    );
    let mut console = session(&repo, script);

    assert_eq!(console.step().unwrap(), Flow::Continue);
    let created = repo.fetch_project_by_id(1).unwrap().unwrap();
    assert_eq!(created.name.as_deref(), Some("Build shed"));
    assert_eq!(created.estimated_hours, Some(hours("12.00")));
    assert_eq!(created.actual_hours, None);
    assert_eq!(created.difficulty, Some(3));
    assert_eq!(created.notes, None);

    assert_eq!(console.step().unwrap(), Flow::Continue);
    assert!(transcript(&console).contains("\n  1: Build shed\n"));

    assert_eq!(console.step().unwrap(), Flow::Continue);
    assert_eq!(console.current_project(), Some(&created));

    assert_eq!(console.step().unwrap(), Flow::Continue);
    let selected = console.current_project().unwrap();
    assert_eq!(selected.estimated_hours.unwrap().to_string(), "15.00");
    assert_eq!(selected.name.as_deref(), Some("Build shed"));
    assert_eq!(repo.fetch_project_by_id(1).unwrap().as_ref(), Some(selected));

    assert_eq!(console.step().unwrap(), Flow::Exit);
    assert!(transcript(&console).ends_with("Exiting the menu.\n"));
}

#[test]
fn walkthrough_over_sqlite_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    let script = "1\nBuild shed\n12\n\n3\n\n3\n1\n4\n\n15\n\n\n\n\n";

    let mut console = session(&repo, script);
    console.run().unwrap();

    let stored = repo.fetch_project_by_id(1).unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Build shed"));
    assert_eq!(stored.estimated_hours, Some(hours("15")));
    assert_eq!(stored.difficulty, Some(3));
    assert!(console.current_project().is_none());
}

#[test]
fn created_record_is_printed_with_assigned_id() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "1\nPaint fence\n2.5\n1\n2\nwhite\n");

    console.step().unwrap();

    let output = transcript(&console);
    assert!(output.contains("You have successfully created project: "));
    assert!(output.contains("ID=1"));
    assert!(output.contains("estimatedHours=2.50"));
    assert!(output.contains("actualHours=1.00"));
    assert!(output.contains("notes=white"));
}

#[test]
fn select_then_fetch_matches_created_record() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "1\nTile floor\n30\n28.75\n4\ngrout twice\n3\n1\n");

    console.step().unwrap();
    console.step().unwrap();

    let expected = Project {
        id: Some(1),
        name: Some("Tile floor".to_string()),
        estimated_hours: Some(hours("30")),
        actual_hours: Some(hours("28.75")),
        difficulty: Some(4),
        notes: Some("grout twice".to_string()),
    };
    assert_eq!(console.current_project(), Some(&expected));
}

#[test]
fn menu_shows_current_selection() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = session(&repo, "3\n1\n\n");

    console.run().unwrap();

    let output = transcript(&console);
    assert!(output.contains("You are not working with a project."));
    assert!(output.contains("You are working with project:\n   ID=1\n   name=Build shed"));
}

#[test]
fn blank_update_answers_leave_record_unchanged() {
    let repo = InMemoryProjectRepository::new();
    let before = Project {
        id: None,
        name: Some("Build shed".to_string()),
        estimated_hours: Some(hours("12")),
        actual_hours: Some(hours("9.5")),
        difficulty: Some(3),
        notes: Some("cedar".to_string()),
    };
    let id = repo.add_project(&before).unwrap();
    let mut console = session(&repo, "3\n1\n4\n\n\n\n\n\n");

    console.step().unwrap();
    console.step().unwrap();

    let after = repo.fetch_project_by_id(id).unwrap().unwrap();
    assert_eq!(after, before.with_id(id));
    assert_eq!(console.current_project(), Some(&after));
}

#[test]
fn update_prompts_show_each_fields_current_value() {
    let repo = InMemoryProjectRepository::new();
    let mut project = Project::named("Build shed");
    project.estimated_hours = Some(hours("12"));
    project.difficulty = Some(3);
    repo.add_project(&project).unwrap();
    let mut console = session(&repo, "3\n1\n4\n\n\n\n\n\n");

    console.step().unwrap();
    console.step().unwrap();

    let output = transcript(&console);
    assert!(output.contains("Enter the project name [Build shed]: "));
    assert!(output.contains("Enter the estimated hours [12.00]: "));
    assert!(output.contains("Enter the actual hours []: "));
    assert!(output.contains("Enter the project difficulty (1-5) [3]: "));
    assert!(output.contains("Enter the project notes []: "));
}

#[test]
fn update_without_selection_asks_for_one() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = session(&repo, "4\n");

    assert_eq!(console.step().unwrap(), Flow::Continue);

    assert!(transcript(&console).contains("Please select a project."));
    assert_eq!(
        repo.fetch_project_by_id(1).unwrap(),
        Some(Project::named("Build shed").with_id(1))
    );
}

#[test]
fn selecting_unknown_id_clears_selection_without_error() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = session(&repo, "3\n1\n3\n42\n");

    console.step().unwrap();
    assert!(console.current_project().is_some());

    assert_eq!(console.step().unwrap(), Flow::Continue);
    assert!(console.current_project().is_none());

    let output = transcript(&console);
    assert!(output.contains("That is not a valid project."));
    assert!(!output.contains("Error:"));
}

#[test]
fn deleting_selected_project_clears_selection() {
    let repo = seeded_repo(&["Build shed", "Paint fence"]);
    let mut console = session(&repo, "3\n1\n5\n1\n");

    console.step().unwrap();
    console.step().unwrap();

    assert!(console.current_project().is_none());
    assert!(transcript(&console).contains("Project 1 was deleted successfully."));
    assert_eq!(repo.len(), 1);
}

#[test]
fn deleting_other_project_keeps_selection() {
    let repo = seeded_repo(&["Build shed", "Paint fence"]);
    let mut console = session(&repo, "3\n1\n5\n2\n");

    console.step().unwrap();
    console.step().unwrap();

    assert_eq!(console.current_project().and_then(|p| p.id), Some(1));
    assert!(repo.fetch_project_by_id(2).unwrap().is_none());
}

#[test]
fn deleting_unknown_id_reports_store_error_and_continues() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = session(&repo, "5\n8\n2\n\n");

    console.run().unwrap();

    let output = transcript(&console);
    assert!(output.contains("Error: project with ID=8 does not exist. Try again."));
    assert!(output.contains("  1: Build shed"));
}

#[test]
fn malformed_menu_input_is_reported_and_loop_continues() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "abc\n9\n\n");

    console.run().unwrap();

    let output = transcript(&console);
    assert!(output.contains("Error: abc is not a valid number. Try again."));
    assert!(output.contains("9 is not a valid selection. Try again."));
    assert!(output.ends_with("Exiting the menu.\n"));
}

#[test]
fn malformed_hours_abort_create_without_storing() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "1\nBuild shed\nlots\n");

    assert_eq!(console.step().unwrap(), Flow::Continue);

    assert!(transcript(&console).contains("Error: lots is not a valid decimal number. Try again."));
    assert!(repo.is_empty());
}

#[test]
fn blank_name_is_rejected_by_the_store() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "1\n\n5\n\n\n\n");

    assert_eq!(console.step().unwrap(), Flow::Continue);

    assert!(transcript(&console).contains("Error: project name is required. Try again."));
    assert!(repo.is_empty());
}

#[test]
fn end_of_input_at_menu_exits_cleanly() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "");

    console.run().unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.ends_with("Exiting the menu.\n"));
}

#[test]
fn end_of_input_inside_operation_is_fatal() {
    let repo = InMemoryProjectRepository::new();
    let mut console = session(&repo, "1\nBuild shed\n");

    let err = console.run().unwrap_err();

    assert!(matches!(err, ConsoleError::InputClosed));
    assert!(repo.is_empty());
}

#[test]
fn non_utf8_menu_line_is_reported_and_loop_continues() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = ProjectsConsole::new(
        ProjectService::new(&repo),
        Cursor::new(b"\xff\n2\n\n".to_vec()),
        Vec::new(),
    );

    console.run().unwrap();

    let output = transcript(&console);
    assert!(output.contains("is not a valid number. Try again."));
    assert!(output.contains("  1: Build shed"));
    assert!(output.ends_with("Exiting the menu.\n"));
}

#[test]
fn non_utf8_field_value_aborts_only_that_operation() {
    let repo = InMemoryProjectRepository::new();
    let mut console = ProjectsConsole::new(
        ProjectService::new(&repo),
        Cursor::new(b"1\nBuild shed\n1\xfe2\n\n".to_vec()),
        Vec::new(),
    );

    console.run().unwrap();

    assert!(transcript(&console).contains("is not a valid decimal number. Try again."));
    assert!(repo.is_empty());
}

#[test]
fn blank_id_on_delete_keeps_store_and_selection() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = session(&repo, "3\n1\n5\n\n");

    console.step().unwrap();
    assert_eq!(console.step().unwrap(), Flow::Continue);

    assert!(transcript(&console).contains("No project ID entered."));
    assert_eq!(repo.len(), 1);
    assert_eq!(console.current_project().and_then(|p| p.id), Some(1));
}

#[test]
fn blank_id_on_select_clears_selection_without_error() {
    let repo = seeded_repo(&["Build shed"]);
    let mut console = session(&repo, "3\n1\n3\n\n");

    console.step().unwrap();
    assert!(console.current_project().is_some());

    assert_eq!(console.step().unwrap(), Flow::Continue);

    assert!(console.current_project().is_none());
    let output = transcript(&console);
    assert!(output.contains("That is not a valid project."));
    assert!(!output.contains("Error:"));
}
