//! Assignee materialization under soft deletion and deactivation.

use super::helpers::{login_bug_request, user, world, World};
use eyre::ensure;
use foreman::directory::domain::UserId;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sole_assignee_deleted_after_assignment_reads_as_unassigned(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world
        .service
        .create_task(login_bug_request().with_assignees([UserId::new(3)]))
        .await?;

    world.users.upsert(user(3, "carol", true, true)?)?;
    let fetched = world.service.get_task(created.task().id()).await?;

    ensure!(
        fetched.assignees().is_empty(),
        "deleted assignee must vanish from the view, not error"
    );
    ensure!(
        fetched.task().assignee_ids().contains(&UserId::new(3)),
        "the raw assignment link is history and stays"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_active_and_deleted_assignees_read_as_exactly_the_active_one(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world
        .service
        .create_task(login_bug_request().with_assignees([UserId::new(1), UserId::new(3)]))
        .await?;

    world.users.upsert(user(3, "carol", true, true)?)?;
    let fetched = world.service.get_task(created.task().id()).await?;

    let names: Vec<&str> = fetched
        .assignees()
        .iter()
        .map(|u| u.username().as_str())
        .collect();
    ensure!(names == vec!["alice"], "got {names:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_deactivated_after_assignment_remains_visible(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world
        .service
        .create_task(login_bug_request().with_assignees([UserId::new(1)]))
        .await?;

    // Deactivation is not deletion: only the deleted flag hides a user
    // from reads. The assignment predates the deactivation and stands.
    world.users.upsert(user(1, "alice", false, false)?)?;
    let fetched = world.service.get_task(created.task().id()).await?;

    let assignee = fetched
        .assignees()
        .first()
        .ok_or_else(|| eyre::eyre!("expected the deactivated assignee to remain visible"))?;
    ensure!(!assignee.is_active());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_task_reads_with_an_empty_collection(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world.service.create_task(login_bug_request()).await?;

    let fetched = world.service.get_task(created.task().id()).await?;

    let (task, assignees) = fetched.into_parts();
    ensure!(assignees.is_empty());
    ensure!(task.assignee_ids().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_assignee_cannot_be_reassigned_through_an_update(
    world: Result<World, eyre::Report>,
) -> Result<(), eyre::Report> {
    let world = world?;
    let created = world
        .service
        .create_task(login_bug_request().with_assignees([UserId::new(3)]))
        .await?;

    world.users.upsert(user(3, "carol", true, true)?)?;
    let result = world
        .service
        .update_task(
            created.task().id(),
            foreman::task::services::UpdateTaskRequest::new()
                .with_assignees([UserId::new(3)]),
        )
        .await;

    ensure!(result.is_err(), "re-validation must reject a deleted user");
    Ok(())
}
