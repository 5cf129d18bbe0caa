//! Gallery listing page.

use crate::error::ApiResult;
use crate::html::{self, GalleryEntry};
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Display format for upload timestamps on the gallery page.
const GALLERY_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// GET /gallery - HTML page listing all stored images, newest first.
#[tracing::instrument(skip(state))]
pub async fn gallery(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut records = state.records.list().await?;
    records.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| a.id.as_str().cmp(b.id.as_str()))
    });

    let entries: Vec<GalleryEntry> = records
        .into_iter()
        .map(|record| {
            let uploaded_at = record
                .uploaded_at
                .format(GALLERY_TIME_FORMAT)
                .unwrap_or_else(|_| record.uploaded_at.to_string());
            GalleryEntry {
                image_url: state.image_url(&record.id),
                view_url: state.view_url(&record.id),
                uploaded_at,
                record,
            }
        })
        .collect();

    Ok(Html(html::gallery_page(&entries)))
}
