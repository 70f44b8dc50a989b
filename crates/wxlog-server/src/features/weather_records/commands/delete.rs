use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{weather_records, DbError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWeatherRecordCommand {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteWeatherRecordResponse {
    pub id: i64,
    pub deleted: bool,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteWeatherRecordError {
    #[error("Weather record {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: DeleteWeatherRecordCommand,
) -> Result<DeleteWeatherRecordResponse, DeleteWeatherRecordError> {
    match weather_records::delete(&pool, command.id).await {
        Ok(()) => Ok(DeleteWeatherRecordResponse {
            id: command.id,
            deleted: true,
            message: "Record deleted".to_string(),
        }),
        Err(e) if e.is_not_found() => Err(DeleteWeatherRecordError::NotFound(command.id)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, weather_records::fixtures::new_record};

    #[tokio::test]
    async fn test_handle_deletes_record() {
        let pool = test_pool().await;
        let created = weather_records::create(&pool, new_record("Paris", 7.2))
            .await
            .unwrap();

        let response = handle(pool.clone(), DeleteWeatherRecordCommand { id: created.id })
            .await
            .unwrap();

        assert_eq!(
            response,
            DeleteWeatherRecordResponse {
                id: created.id,
                deleted: true,
                message: "Record deleted".to_string(),
            }
        );
        assert!(weather_records::list_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let pool = test_pool().await;
        let result = handle(pool, DeleteWeatherRecordCommand { id: 7 }).await;
        assert!(matches!(result, Err(DeleteWeatherRecordError::NotFound(7))));
    }
}
