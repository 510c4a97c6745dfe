use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use crate::{
    AppState,
    api::models::articles::ArticlesQuery,
    auth::session::Session,
    db::models::articles::Article,
    errors::{Error, Result},
    types::ArticleId,
};

#[utoipa::path(
    get,
    path = "/articles",
    tag = "articles",
    summary = "List articles",
    description = "Latest articles, newest first",
    params(ArticlesQuery),
    responses(
        (status = 200, description = "Articles ordered by publish time, descending", body = Vec<Article>),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all)]
pub async fn list_articles(State(state): State<AppState>, _session: Session, Query(query): Query<ArticlesQuery>) -> Result<Json<Vec<Article>>> {
    let articles = state.backend.latest_articles(query.limit()).await?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = "articles",
    summary = "Get article",
    params(
        ("id" = uuid::Uuid, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, description = "Article found", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Article not found"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip(state, _session), fields(article_id = %id))]
pub async fn get_article(State(state): State<AppState>, _session: Session, Path(id): Path<ArticleId>) -> Result<Json<Article>> {
    let article = state.backend.article(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Article".to_string(),
        id: id.to_string(),
    })?;
    Ok(Json(article))
}
