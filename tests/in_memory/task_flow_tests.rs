//! End-to-end flows through the orchestration service.

use super::helpers::{login_bug_request, world, World};
use chrono::Duration;
use eyre::{bail, ensure};
use foreman::directory::domain::UserId;
use foreman::task::{
    domain::{TaskNotes, TaskStatus},
    services::{TaskServiceError, TaskServiceErrorKind, UpdateTaskRequest},
};
use mockable::{Clock, DefaultClock};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_start_complete_then_restart_is_rejected(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world
        .service
        .create_task(login_bug_request().with_assignees([UserId::new(3)]))
        .await?;
    let id = created.task().id();
    ensure!(created.task().status() == TaskStatus::Pending);

    let started = world.service.start_task(id).await?;
    ensure!(started.task().status() == TaskStatus::InProgress);
    ensure!(started.task().started_at().is_some());

    let completed = world.service.complete_task(id).await?;
    ensure!(completed.task().status() == TaskStatus::Completed);
    ensure!(completed.task().completed_at().is_some());

    let restart = world.service.start_task(id).await;
    let Err(error) = restart else {
        bail!("expected a rejection");
    };
    ensure!(error.kind() == TaskServiceErrorKind::BusinessRule);

    let fetched = world.service.get_task(id).await?;
    ensure!(fetched.task().status() == TaskStatus::Completed);
    ensure!(fetched.task().completed_at().is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn block_appends_reasons_and_blank_reasons_are_rejected(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world.service.create_task(login_bug_request()).await?;
    let id = created.task().id();

    let blocked = world
        .service
        .block_task(id, "waiting on credentials from ops")
        .await?;
    ensure!(blocked.task().status() == TaskStatus::Blocked);

    let blocked_again = world.service.block_task(id, "ops escalated upstream").await?;
    let notes = blocked_again
        .task()
        .notes()
        .map(TaskNotes::as_str)
        .unwrap_or_default();
    ensure!(notes.contains("waiting on credentials from ops"));
    ensure!(notes.contains("ops escalated upstream"));

    let blank = world.service.block_task(id, "   ").await;
    let Err(error) = blank else {
        bail!("expected a rejection");
    };
    ensure!(error.kind() == TaskServiceErrorKind::Validation);

    let resumed = world.service.start_task(id).await?;
    ensure!(resumed.task().status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_succeeds_from_every_status_except_completed(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world.service.create_task(login_bug_request()).await?;
    let id = created.task().id();

    let cancelled = world.service.cancel_task(id).await?;
    ensure!(cancelled.task().status() == TaskStatus::Cancelled);

    // Cancelling again is idempotent.
    let cancelled_again = world.service.cancel_task(id).await?;
    ensure!(cancelled_again.task().status() == TaskStatus::Cancelled);

    let completed_task = world.service.create_task(login_bug_request()).await?;
    let completed_id = completed_task.task().id();
    world.service.start_task(completed_id).await?;
    world.service.complete_task(completed_id).await?;

    let result = world.service.cancel_task(completed_id).await;
    let Err(error) = result else {
        bail!("expected a rejection");
    };
    ensure!(error.kind() == TaskServiceErrorKind::BusinessRule);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_style_updates_resolve_to_the_last_writer(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world.service.create_task(login_bug_request()).await?;
    let id = created.task().id();

    // No locking is specified for racing updates; this pins the
    // last-writer-wins outcome so a future "fix" shows up as a diff.
    world
        .service
        .update_task(
            id,
            UpdateTaskRequest::new()
                .with_title("First writer title")
                .with_assignees([UserId::new(1)]),
        )
        .await?;
    let second = world
        .service
        .update_task(
            id,
            UpdateTaskRequest::new()
                .with_title("Second writer title")
                .with_assignees([UserId::new(3)]),
        )
        .await?;

    ensure!(second.task().title().as_str() == "Second writer title");
    let fetched = world.service.get_task(id).await?;
    ensure!(fetched.task().title().as_str() == "Second writer title");
    let ids: Vec<i64> = fetched.assignees().iter().map(|u| u.id().value()).collect();
    ensure!(ids == vec![3], "second writer's assignees win: {ids:?}");
    ensure!(world.store.len()? == 1, "updates overwrite, never duplicate");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_survives_its_project_being_archived(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    use foreman::directory::domain::{Project, ProjectId};

    let world = world?;
    let created = world.service.create_task(login_bug_request()).await?;
    let id = created.task().id();

    // Placement is gated at creation and reassignment only; archiving the
    // owning project afterwards does not invalidate the task.
    world
        .projects
        .upsert(Project::new(ProjectId::new(1), "Platform", false))?;

    let fetched = world.service.get_task(id).await?;
    ensure!(fetched.task().project_id() == ProjectId::new(1));

    let started = world.service.start_task(id).await?;
    ensure!(started.task().status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workflow_operations_on_a_missing_task_return_not_found(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let id = foreman::task::domain::TaskId::new();

    for result in [
        world.service.start_task(id).await,
        world.service.complete_task(id).await,
        world.service.cancel_task(id).await,
        world.service.block_task(id, "anything").await,
    ] {
        let Err(error) = result else {
            bail!("expected a rejection");
        };
        ensure!(matches!(error, TaskServiceError::TaskNotFound(missing) if missing == id));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_dates_may_move_into_the_past_on_update(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world.service.create_task(login_bug_request()).await?;
    let id = created.task().id();

    // The present-or-future rule binds at creation only; rescheduling an
    // existing task into the past simply makes it overdue.
    let past = DefaultClock.utc() - Duration::days(2);
    let updated = world
        .service
        .update_task(id, UpdateTaskRequest::new().with_due_date(past))
        .await?;

    ensure!(updated.task().due_date() == past);
    ensure!(updated.task().is_overdue(&DefaultClock));
    ensure!(updated.task().hours_until_due(&DefaultClock) < 0);
    Ok(())
}
