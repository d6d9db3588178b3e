//! Route handlers: decode, validate, call one service operation, encode.

use crate::http::error::ApiError;
use crate::http::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use franchise_core::{
    core_version, CreateBranchRequest, CreateFranchiseRequest, CreateProductRequest, Franchise,
    TopProduct, UpdateNameRequest, UpdateStockRequest,
};
use serde_json::{json, Value};

type ApiResult<T> = Result<T, ApiError>;
type Created = (StatusCode, Json<Franchise>);

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(value) = payload?;
    Ok(value)
}

fn created(franchise: Franchise) -> Created {
    (StatusCode::CREATED, Json(franchise))
}

pub(crate) async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok", "version": core_version()}))
}

pub(crate) async fn create_franchise(
    State(state): State<AppState>,
    payload: Result<Json<CreateFranchiseRequest>, JsonRejection>,
) -> ApiResult<Created> {
    let name = body(payload)?.validate()?;
    let franchise = state.service.create_franchise(name).await?;
    Ok(created(franchise))
}

pub(crate) async fn list_franchises(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Franchise>>> {
    Ok(Json(state.service.list_franchises().await?))
}

pub(crate) async fn get_franchise(
    State(state): State<AppState>,
    Path(franchise_id): Path<String>,
) -> ApiResult<Json<Franchise>> {
    Ok(Json(state.service.get_franchise(&franchise_id).await?))
}

pub(crate) async fn rename_franchise(
    State(state): State<AppState>,
    Path(franchise_id): Path<String>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> ApiResult<Json<Franchise>> {
    let name = body(payload)?.validate()?;
    let franchise = state.service.rename_franchise(&franchise_id, name).await?;
    Ok(Json(franchise))
}

pub(crate) async fn add_branch(
    State(state): State<AppState>,
    Path(franchise_id): Path<String>,
    payload: Result<Json<CreateBranchRequest>, JsonRejection>,
) -> ApiResult<Created> {
    let name = body(payload)?.validate()?;
    let franchise = state.service.add_branch(&franchise_id, name).await?;
    Ok(created(franchise))
}

pub(crate) async fn rename_branch(
    State(state): State<AppState>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> ApiResult<Json<Franchise>> {
    let name = body(payload)?.validate()?;
    let franchise = state
        .service
        .rename_branch(&franchise_id, &branch_id, name)
        .await?;
    Ok(Json(franchise))
}

pub(crate) async fn add_product(
    State(state): State<AppState>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<Created> {
    let product = body(payload)?.validate()?;
    let franchise = state
        .service
        .add_product(&franchise_id, &branch_id, product.name, product.stock)
        .await?;
    Ok(created(franchise))
}

pub(crate) async fn remove_product(
    State(state): State<AppState>,
    Path((franchise_id, branch_id, product_id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    state
        .service
        .remove_product(&franchise_id, &branch_id, &product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn update_product_stock(
    State(state): State<AppState>,
    Path((franchise_id, branch_id, product_id)): Path<(String, String, String)>,
    payload: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> ApiResult<Json<Franchise>> {
    let stock = body(payload)?.validate()?;
    let franchise = state
        .service
        .update_product_stock(&franchise_id, &branch_id, &product_id, stock)
        .await?;
    Ok(Json(franchise))
}

pub(crate) async fn rename_product(
    State(state): State<AppState>,
    Path((franchise_id, branch_id, product_id)): Path<(String, String, String)>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> ApiResult<Json<Franchise>> {
    let name = body(payload)?.validate()?;
    let franchise = state
        .service
        .rename_product(&franchise_id, &branch_id, &product_id, name)
        .await?;
    Ok(Json(franchise))
}

pub(crate) async fn top_products(
    State(state): State<AppState>,
    Path(franchise_id): Path<String>,
) -> ApiResult<Json<Vec<TopProduct>>> {
    Ok(Json(state.service.top_products_by_branch(&franchise_id).await?))
}
