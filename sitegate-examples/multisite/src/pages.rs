use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use sitegate_axum::CurrentSite;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub site_id: String,
    pub lang: String,
    pub canonical_key: Option<String>,
    pub page: &'static str,
}

fn view(site: &CurrentSite, page: &'static str) -> PageView {
    PageView {
        site_id: site.site_id.to_string(),
        lang: site.lang.to_string(),
        canonical_key: site.canonical_key.clone(),
        page,
    }
}

pub async fn home(site: CurrentSite) -> Json<PageView> {
    Json(view(&site, "home"))
}

pub async fn contact(site: CurrentSite) -> Json<PageView> {
    Json(view(&site, "contact"))
}

pub async fn site_info(site: CurrentSite) -> Json<Value> {
    Json(json!({ "site": site.0 }))
}
