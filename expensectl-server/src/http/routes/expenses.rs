//! Expense endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::{ExpenseId, JsonBody};
use crate::http::server::AppState;
use crate::models::{Expense, ExpenseInput};

/// POST /expenses - create an expense, id is generated
async fn create_expense(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ExpenseInput>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = state
        .store
        .create(input)
        .await
        .map_err(|e| ApiError::from_db("can't create expense", e))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /expenses - list every expense
async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = state.store.list().await.map_err(|e| match e {
        DbError::Decode(_) => ApiError::from_db("can't scan expenses", e),
        _ => ApiError::from_db("can't query all expenses", e),
    })?;

    Ok(Json(expenses))
}

/// GET /expenses/{id} - get a single expense
async fn get_expense(
    State(state): State<Arc<AppState>>,
    ExpenseId(id): ExpenseId,
) -> Result<Json<Expense>, ApiError> {
    let expense = state
        .store
        .get(id)
        .await
        .map_err(|e| ApiError::from_db("can't scan expense", e))?;

    Ok(Json(expense))
}

/// PUT /expenses/{id} - overwrite an existing expense
async fn update_expense(
    State(state): State<Arc<AppState>>,
    ExpenseId(id): ExpenseId,
    JsonBody(input): JsonBody<ExpenseInput>,
) -> Result<Json<Expense>, ApiError> {
    let expense = state
        .store
        .update(id, input)
        .await
        .map_err(|e| ApiError::from_db("can't update expense", e))?;

    Ok(Json(expense))
}

/// Expense routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).put(update_expense))
}
