//! Read-only staff directory.

pub mod model;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::workspace::Workspace;
use model::User;

/// List all users in stored order.
pub async fn list_users(ws: &Workspace) -> CoreResult<Vec<User>> {
    let users = ws.users.load().await?;
    debug!(count = users.len(), "Listed users");
    Ok(users)
}

/// Get a user by ID.
pub async fn get_user(ws: &Workspace, id: &str) -> CoreResult<User> {
    ws.users
        .load()
        .await?
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| CoreError::UserNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_users() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::open(dir.path()).await.unwrap();

        let users = list_users(&ws).await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["张三", "李四", "王五"]);

        let sales = get_user(&ws, "2").await.unwrap();
        assert_eq!(sales.role, model::UserRole::Sales);

        let err = get_user(&ws, "99").await.unwrap_err();
        assert!(matches!(err, CoreError::UserNotFound(_)));
    }
}
