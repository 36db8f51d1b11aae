//! Integration tests for the PostgreSQL collaborator implementations.
//!
//! Exercises `PgStore` against a real database:
//! - Report insert with ordered tasks
//! - `(user_id, report_date)` uniqueness
//! - Status compare-and-swap on update and task-list replacement
//! - Search filters and ordering
//! - Comments and user accounts
//! - A full lifecycle through `DailyReportWorkflow`

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use reportflow_core::comment::{Comment, CreateCommentInput};
use reportflow_core::config::WorkflowConfig;
use reportflow_core::project::{Project, ProjectStatus};
use reportflow_core::report::{
    ApproveDailyReportInput, CreateDailyReportInput, DailyReport, ReportStatus,
    SubmitDailyReportInput, TaskInput, TaskProgress,
};
use reportflow_core::roles::Role;
use reportflow_core::search::DailyReportSearchCriteria;
use reportflow_core::store::{
    AccountStore, CommentStore, ProjectStore, ReportStore, StoreError, UserStore,
};
use reportflow_core::types::{
    CalendarDay, CommentId, DailyReportId, DepartmentId, ProjectId, TaskId, UserId,
};
use reportflow_core::user::{User, UserSearchCriteria};
use reportflow_core::{CoreError, DailyReportWorkflow};
use reportflow_db::repositories::{DepartmentRepo, ProjectRepo};
use reportflow_db::PgStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day(d: u32) -> CalendarDay {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn new_user(id: &str, role: Role, manager: Option<&str>) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id),
        email: format!("{id}@example.com"),
        name: id.to_uppercase(),
        role,
        department_id: DepartmentId::new("d-1"),
        manager_id: manager.map(UserId::new),
        is_active: true,
        external_chat_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn new_project(id: &str) -> Project {
    let now = Utc::now();
    Project {
        id: ProjectId::new(id),
        name: format!("Project {id}"),
        description: None,
        department_id: DepartmentId::new("d-1"),
        status: ProjectStatus::Active,
        start_date: day(1),
        end_date: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn task(id: &str, project: &str, hours: f64) -> TaskProgress {
    TaskProgress {
        id: TaskId::new(id),
        project_id: ProjectId::new(project),
        description: format!("work on {project}"),
        hours_spent: hours,
        progress: 50,
    }
}

fn new_report(id: &str, owner: &str, date: CalendarDay, tasks: Vec<TaskProgress>) -> DailyReport {
    let now = Utc::now();
    DailyReport {
        id: DailyReportId::new(id),
        user_id: UserId::new(owner),
        date,
        tasks,
        challenges: "none".to_string(),
        next_day_plan: "more".to_string(),
        status: ReportStatus::Draft,
        submitted_at: None,
        approved_at: None,
        approved_by: None,
        rejected_at: None,
        rejected_by: None,
        feedback: None,
        created_at: now,
        updated_at: now,
    }
}

/// Department d-1, manager m1 with employee e1, employee e2, projects p1 and p2.
async fn seed(pool: &PgPool) -> PgStore {
    DepartmentRepo::create(pool, "d-1", "Engineering", None)
        .await
        .unwrap();
    let store = PgStore::new(pool.clone());
    AccountStore::create(&store, &new_user("m1", Role::Manager, None), "hash")
        .await
        .unwrap();
    AccountStore::create(&store, &new_user("e1", Role::Employee, Some("m1")), "hash")
        .await
        .unwrap();
    AccountStore::create(&store, &new_user("e2", Role::Employee, None), "hash")
        .await
        .unwrap();
    ProjectRepo::create(pool, &new_project("p1")).await.unwrap();
    ProjectRepo::create(pool, &new_project("p2")).await.unwrap();
    store
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_load_report_with_ordered_tasks(pool: PgPool) {
    let store = seed(&pool).await;
    let report = new_report(
        "r1",
        "e1",
        day(15),
        vec![task("t2", "p2", 3.0), task("t1", "p1", 4.5)],
    );

    let created = ReportStore::create(&store, &report).await.unwrap();
    assert_eq!(created.tasks, report.tasks);

    let loaded = ReportStore::find_by_id(&store, &report.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.tasks[0].id, TaskId::new("t2"));
    assert_eq!(loaded.tasks[1].hours_spent, 4.5);
    assert_eq!(loaded.status, ReportStatus::Draft);

    let by_date = store
        .find_by_user_and_date(&UserId::new("e1"), day(15))
        .await
        .unwrap();
    assert_eq!(by_date.map(|r| r.id), Some(report.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_user_date_is_unique_violation(pool: PgPool) {
    let store = seed(&pool).await;
    ReportStore::create(&store, &new_report("r1", "e1", day(15), vec![task("t1", "p1", 1.0)]))
        .await
        .unwrap();

    let duplicate = new_report("r2", "e1", day(15), vec![task("t2", "p1", 1.0)]);
    let err = ReportStore::create(&store, &duplicate)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation(ref c) if c == "uq_daily_reports_user_date");

    // The failed insert left no orphan tasks behind.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_tasks_and_checks_status(pool: PgPool) {
    let store = seed(&pool).await;
    let report = new_report("r1", "e1", day(15), vec![task("t1", "p1", 1.0)]);
    ReportStore::create(&store, &report).await.unwrap();

    let mut edited = report.clone();
    edited.tasks = vec![task("t8", "p2", 2.0), task("t9", "p1", 3.0)];
    edited.status = ReportStatus::Submitted;
    edited.submitted_at = Some(Utc::now());

    let saved = ReportStore::update(&store, &edited, ReportStatus::Draft)
        .await
        .unwrap();
    assert_eq!(saved.status, ReportStatus::Submitted);
    assert_eq!(saved.tasks.len(), 2);
    assert_eq!(saved.tasks[0].id, TaskId::new("t8"));

    // Stale expected status: nothing written.
    let mut stale = edited.clone();
    stale.tasks = vec![task("t10", "p1", 9.0)];
    let err = ReportStore::update(&store, &stale, ReportStatus::Draft)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
    let reloaded = ReportStore::find_by_id(&store, &report.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.tasks.len(), 2);

    let ghost = new_report("nope", "e1", day(20), vec![]);
    let err = ReportStore::update(&store, &ghost, ReportStatus::Draft)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Missing(_));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_filters_and_orders_by_date_desc(pool: PgPool) {
    let store = seed(&pool).await;
    ReportStore::create(&store, &new_report("r1", "e1", day(10), vec![task("t1", "p1", 1.0)]))
        .await
        .unwrap();
    ReportStore::create(&store, &new_report("r2", "e1", day(12), vec![task("t2", "p2", 1.0)]))
        .await
        .unwrap();
    ReportStore::create(&store, &new_report("r3", "e2", day(11), vec![task("t3", "p1", 1.0)]))
        .await
        .unwrap();

    let all = ReportStore::search(&store, &DailyReportSearchCriteria::default())
        .await
        .unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r2", "r3", "r1"]);

    let on_p1 = ReportStore::search(
        &store,
        &DailyReportSearchCriteria {
            project_id: Some(ProjectId::new("p1")),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(on_p1.len(), 2);

    let scoped = ReportStore::search(
        &store,
        &DailyReportSearchCriteria {
            user_ids: Some(vec![UserId::new("e2")]),
            date_from: Some(day(11)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].id, DailyReportId::new("r3"));

    let in_range = store
        .list_for_user_in_range(&UserId::new("e1"), day(10), day(11))
        .await
        .unwrap();
    assert_eq!(in_range.len(), 1);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_comments_listed_in_order_and_marked_read(pool: PgPool) {
    let store = seed(&pool).await;
    let report = new_report("r1", "e1", day(15), vec![task("t1", "p1", 1.0)]);
    ReportStore::create(&store, &report).await.unwrap();

    let now = Utc::now();
    for (i, author) in ["m1", "e1"].into_iter().enumerate() {
        let comment = Comment {
            id: CommentId::new(format!("c{i}")),
            daily_report_id: report.id.clone(),
            user_id: UserId::new(author),
            content: format!("from {author}"),
            is_read: false,
            created_at: now + chrono::Duration::seconds(i as i64),
            updated_at: now,
        };
        CommentStore::create(&store, &comment).await.unwrap();
    }

    let comments = store.find_by_daily_report_id(&report.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "from m1");

    let read = store.mark_as_read(&CommentId::new("c0")).await.unwrap();
    assert!(read.is_read);
    let again = store.mark_as_read(&CommentId::new("c0")).await.unwrap();
    assert!(again.is_read);

    let err = store.mark_as_read(&CommentId::new("c9")).await.unwrap_err();
    assert_matches!(err, StoreError::Missing(_));
}

// ---------------------------------------------------------------------------
// Users and projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_user_accounts(pool: PgPool) {
    let store = seed(&pool).await;

    let err = AccountStore::create(&store, &new_user("e1", Role::Employee, None), "hash")
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation(_));

    let credentials = store
        .find_credentials_by_email("e1@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credentials.password_hash, "hash");
    assert_eq!(credentials.user.manager_id, Some(UserId::new("m1")));

    store
        .update_password(&UserId::new("e1"), "new-hash")
        .await
        .unwrap();
    let credentials = store
        .find_credentials_by_id(&UserId::new("e1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credentials.password_hash, "new-hash");

    let subordinates = store.find_subordinates(&UserId::new("m1")).await.unwrap();
    assert_eq!(subordinates.len(), 1);

    let employees = AccountStore::search(
        &store,
        &UserSearchCriteria {
            role: Some(Role::Employee),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let emails: Vec<&str> = employees.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["e1@example.com", "e2@example.com"]);

    let mut renamed = credentials.user.clone();
    renamed.name = "Renamed".to_string();
    let saved = AccountStore::update(&store, &renamed).await.unwrap();
    assert_eq!(saved.name, "Renamed");
    assert!(UserStore::find_by_id(&store, &UserId::new("zz"))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_department_is_missing(pool: PgPool) {
    let store = seed(&pool).await;
    let mut stray = new_user("x1", Role::Employee, None);
    stray.department_id = DepartmentId::new("d-404");

    let err = AccountStore::create(&store, &stray, "hash").await.unwrap_err();
    assert_matches!(err, StoreError::Missing(msg) if msg.contains("department"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_projects_by_ids_skips_unknown(pool: PgPool) {
    let store = seed(&pool).await;
    let department = DepartmentRepo::find_by_id(&pool, "d-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(department.name, "Engineering");

    let found = store
        .find_by_ids(&[ProjectId::new("p1"), ProjectId::new("p9")])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ProjectId::new("p1"));
}

// ---------------------------------------------------------------------------
// Workflow over PostgreSQL
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_report_lifecycle_through_workflow(pool: PgPool) {
    let store = Arc::new(seed(&pool).await);
    let workflow = DailyReportWorkflow::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        WorkflowConfig::default(),
    );

    let input = || CreateDailyReportInput {
        user_id: UserId::new("e1"),
        date: day(15),
        tasks: vec![TaskInput {
            project_id: ProjectId::new("p1"),
            description: "API design".to_string(),
            hours_spent: 4.0,
            progress: 80,
        }],
        challenges: "x".to_string(),
        next_day_plan: "y".to_string(),
    };

    let report = workflow.create(input()).await.unwrap();
    let err = workflow.create(input()).await.unwrap_err();
    assert_matches!(err, CoreError::BusinessRule(_));

    workflow
        .submit(SubmitDailyReportInput {
            id: report.id.clone(),
            user_id: UserId::new("e1"),
        })
        .await
        .unwrap();
    workflow
        .create_comment(CreateCommentInput {
            daily_report_id: report.id.clone(),
            user_id: UserId::new("m1"),
            content: "looks fine".to_string(),
        })
        .await
        .unwrap();
    let approved = workflow
        .approve(ApproveDailyReportInput {
            id: report.id.clone(),
            approver_id: UserId::new("m1"),
            feedback: Some("Good work!".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(approved.status, ReportStatus::Approved);
    assert_eq!(approved.approved_by, Some(UserId::new("m1")));
    assert_eq!(approved.tasks.len(), 1);

    let summary = workflow
        .summary(&UserId::new("m1"), &UserId::new("e1"), day(1), day(31))
        .await
        .unwrap();
    assert_eq!(summary.approved_count, 1);
    assert_eq!(summary.total_hours, 4.0);
}
