//! Catalog route handlers.
//!
//! Reads serve both the customer menu and the admin dashboard; writes are
//! admin actions. The only business rule here is referential integrity: a
//! product's category must exist when the product is created.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use kirana_core::{Category, CategoryId, Product, ProductId};

use super::not_found_as;
use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// New category payload.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub icon: String,
}

/// Category update payload; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub icon: Option<String>,
}

/// New product payload.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub category_id: CategoryId,
    pub name: String,
    /// Whole currency units; must be positive.
    pub price: i64,
}

/// Product update payload; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<i64>,
}

/// List all categories with their products.
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}

/// Add a category.
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategory>,
) -> Result<Json<Category>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("category name is required".to_owned()));
    }
    let icon = payload.icon.trim();
    if icon.is_empty() {
        return Err(AppError::Validation("category icon is required".to_owned()));
    }

    let category = CatalogRepository::new(state.pool())
        .create_category(name, icon)
        .await?;
    tracing::info!(category_id = %category.id, "category created");
    Ok(Json(category))
}

/// Update a category's name and/or icon.
#[instrument(skip(state))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<Value>> {
    CatalogRepository::new(state.pool())
        .update_category(&id, payload.name.as_deref(), payload.icon.as_deref())
        .await
        .map_err(|e| not_found_as(e, format!("category {id}")))?;
    Ok(Json(json!({ "success": true })))
}

/// Delete a category and (via cascade) all its products.
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Value>> {
    CatalogRepository::new(state.pool())
        .delete_category(&id)
        .await
        .map_err(|e| not_found_as(e, format!("category {id}")))?;
    tracing::info!(category_id = %id, "category deleted");
    Ok(Json(json!({ "success": true })))
}

/// Add a product to a category.
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<Json<Product>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("product name is required".to_owned()));
    }
    if payload.price <= 0 {
        return Err(AppError::Validation(
            "product price must be a positive whole number".to_owned(),
        ));
    }

    let product = CatalogRepository::new(state.pool())
        .create_product(&payload.category_id, name, payload.price)
        .await
        .map_err(|e| not_found_as(e, format!("category {}", payload.category_id)))?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(Json(product))
}

/// Update a product's name and/or price. Historical orders keep their
/// snapshots.
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<UpdateProduct>,
) -> Result<Json<Value>> {
    if let Some(price) = payload.price
        && price <= 0
    {
        return Err(AppError::Validation(
            "product price must be a positive whole number".to_owned(),
        ));
    }

    CatalogRepository::new(state.pool())
        .update_product(&id, payload.name.as_deref(), payload.price)
        .await
        .map_err(|e| not_found_as(e, format!("product {id}")))?;
    Ok(Json(json!({ "success": true })))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>> {
    CatalogRepository::new(state.pool())
        .delete_product(&id)
        .await
        .map_err(|e| not_found_as(e, format!("product {id}")))?;
    tracing::info!(product_id = %id, "product deleted");
    Ok(Json(json!({ "success": true })))
}
