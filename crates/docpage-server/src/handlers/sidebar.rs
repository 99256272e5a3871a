//! Sidebar API endpoint.
//!
//! Returns every section with its files and the links generated for them.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use docpage_nav::Sidebar;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/sidebar.
#[derive(Serialize)]
pub(crate) struct SidebarResponse {
    sections: Vec<SectionResponse>,
}

/// Section item for JSON response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionResponse {
    name: String,
    slug: String,
    href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_file: Option<String>,
    files: Vec<FileResponse>,
}

/// File item for JSON response.
#[derive(Serialize)]
struct FileResponse {
    file: String,
    label: String,
    href: String,
}

impl SidebarResponse {
    fn from_sidebar(sidebar: &Sidebar) -> Self {
        let sections = sidebar
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| SectionResponse {
                name: section.name.clone(),
                slug: section.url_slug(),
                href: sidebar.section_href(index).unwrap_or_default(),
                index_file: section.index_file.clone(),
                files: section
                    .files
                    .iter()
                    .map(|file| FileResponse {
                        file: file.clone(),
                        label: section.label(file),
                        href: sidebar.link_href(index, Some(file.as_str())).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }
}

/// Handle GET /api/sidebar.
pub(crate) async fn get_sidebar(State(state): State<Arc<AppState>>) -> Json<SidebarResponse> {
    Json(SidebarResponse::from_sidebar(&state.sidebar))
}
