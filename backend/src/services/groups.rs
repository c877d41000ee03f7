use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{GroupMemberRow, GroupRow};
use shared::{CreateGroupRequest, Group, GroupMember};

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("Group not found")]
    NotFound,
    #[error("User is already a member of this group")]
    AlreadyMember,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub async fn create_group(
    pool: &SqlitePool,
    request: &CreateGroupRequest,
) -> Result<Group, GroupError> {
    let now = Utc::now();

    let result = sqlx::query("INSERT INTO groups (name, created_at) VALUES (?, ?)")
        .bind(&request.name)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(Group {
        id: result.last_insert_rowid(),
        name: request.name.clone(),
        created_at: now,
    })
}

pub async fn get_group(pool: &SqlitePool, group_id: i64) -> Result<Option<Group>, GroupError> {
    let group: Option<GroupRow> = sqlx::query_as("SELECT * FROM groups WHERE id = ?")
        .bind(group_id)
        .fetch_optional(pool)
        .await?;

    Ok(group.map(|g| g.to_shared()))
}

pub async fn list_groups(pool: &SqlitePool) -> Result<Vec<Group>, GroupError> {
    let groups: Vec<GroupRow> = sqlx::query_as("SELECT * FROM groups ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(groups.iter().map(|g| g.to_shared()).collect())
}

pub async fn add_member(
    pool: &SqlitePool,
    group_id: i64,
    user_id: i64,
) -> Result<GroupMember, GroupError> {
    get_group(pool, group_id).await?.ok_or(GroupError::NotFound)?;

    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO group_members (group_id, user_id, joined_at) VALUES (?, ?, ?)",
    )
    .bind(group_id)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        if crate::services::is_unique_violation(&e) {
            GroupError::AlreadyMember
        } else {
            GroupError::DatabaseError(e)
        }
    })?;

    Ok(GroupMember {
        id: result.last_insert_rowid(),
        group_id,
        user_id,
        joined_at: now,
    })
}

pub async fn list_members(
    pool: &SqlitePool,
    group_id: i64,
) -> Result<Vec<GroupMember>, GroupError> {
    let members: Vec<GroupMemberRow> =
        sqlx::query_as("SELECT * FROM group_members WHERE group_id = ? ORDER BY joined_at")
            .bind(group_id)
            .fetch_all(pool)
            .await?;

    Ok(members.iter().map(|m| m.to_shared()).collect())
}
