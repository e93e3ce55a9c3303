use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sitegate_axum::{AxumSiteApp, CurrentSite};
use sitegate_core::{Lang, MemorySiteDirectory, SiteCtx, SiteId, SiteKeyRow, SiteResolver};
use tower::ServiceExt;

async fn site_json(CurrentSite(ctx): CurrentSite) -> Json<SiteCtx> {
    Json(ctx)
}

async fn maybe_site(site: Option<CurrentSite>) -> String {
    match site {
        Some(site) => format!("site:{}", site.site_id),
        None => "no-site".to_string(),
    }
}

fn seeded_directory() -> MemorySiteDirectory {
    let dir = MemorySiteDirectory::new();

    let acme = SiteId::new("acme-id");
    dir.insert_site(&acme, "acme-legacy", true);
    dir.insert_key(SiteKeyRow::new("p", &acme, Lang::Hu, "acme").primary());
    dir.insert_key(SiteKeyRow::new("a", &acme, Lang::Hu, "acme-alias"));
    dir.insert_instance(&acme, Lang::Hu);

    let kave = SiteId::new("kave-id");
    dir.insert_site(&kave, "kave", true);
    dir.insert_key(SiteKeyRow::new("kp", &kave, Lang::Hu, "kávé").primary());
    dir.insert_key(SiteKeyRow::new("ka", &kave, Lang::Hu, "kávé-régi"));

    let shop = SiteId::new("shop-id");
    dir.insert_site(&shop, "shop", true);
    dir.insert_domain("shop.example", &shop, Lang::En, true);
    dir.insert_instance(&shop, Lang::En);

    dir
}

fn app(dir: MemorySiteDirectory) -> Router {
    let resolver = SiteResolver::with_tracing(Arc::new(dir));

    let site_routes = Router::new()
        .route("/", get(site_json))
        .route("/{lang}/{siteKey}/", get(site_json))
        .route("/{lang}/{siteKey}/contact", get(site_json))
        .route("/api/public/{lang}/{siteKey}/contact", get(site_json))
        .route("/legacy/{lang}/{tenantKey}", get(site_json))
        .route("/open", get(maybe_site));

    AxumSiteApp::new(resolver)
        .site_routes(site_routes)
        .service("/health", || async { "ok" })
        .into_router()
}

fn get_req(uri: &str, host: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn primary_key_attaches_context() {
    let res = app(seeded_directory())
        .oneshot(get_req("/hu/acme/", "localhost:3000"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers().get("x-request-id").is_some());
    let body = json_body(res).await;
    assert_eq!(
        body,
        json!({"siteId": "acme-id", "canonicalKey": "acme", "redirected": false, "lang": "hu"})
    );
}

#[tokio::test]
async fn alias_is_301_to_canonical_with_query() {
    let res = app(seeded_directory())
        .oneshot(get_req("/api/public/hu/acme-alias/contact?ref=42", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 301);
    assert_eq!(
        res.headers().get("location").unwrap(),
        "/api/public/hu/acme/contact?ref=42"
    );
}

#[tokio::test]
async fn non_ascii_alias_redirects_to_encoded_location() {
    let res = app(seeded_directory())
        .oneshot(get_req("/hu/k%C3%A1v%C3%A9-r%C3%A9gi/contact?x=1", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 301);
    let location = res.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/hu/k%C3%A1v%C3%A9/contact?x=1");
}

#[tokio::test]
async fn padded_alias_segment_is_replaced() {
    let res = app(seeded_directory())
        .oneshot(get_req("/hu/%20acme-alias/contact?x=1", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 301);
    assert_eq!(res.headers().get("location").unwrap(), "/hu/acme/contact?x=1");
}

#[tokio::test]
async fn custom_domain_resolves_on_root() {
    let res = app(seeded_directory())
        .oneshot(get_req("/", "Shop.Example:443"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body["siteId"], "shop-id");
    assert_eq!(body["canonicalKey"], Value::Null);
    assert_eq!(body["lang"], "en");
}

#[tokio::test]
async fn forwarded_host_is_honored() {
    let req = Request::builder()
        .uri("/")
        .header("host", "10.0.0.7:8080")
        .header("x-forwarded-host", "shop.example, lb.internal")
        .body(Body::empty())
        .unwrap();

    let res = app(seeded_directory()).oneshot(req).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await["siteId"], "shop-id");
}

#[tokio::test]
async fn unresolved_root_rejects_with_404() {
    let res = app(seeded_directory())
        .oneshot(get_req("/", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["name"], "NotFound");
    assert_eq!(body["className"], "not-found");
}

#[tokio::test]
async fn unsupported_lang_is_400() {
    let res = app(seeded_directory())
        .oneshot(get_req("/fr/acme/", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["name"], "BadRequest");
    assert_eq!(body["code"], 400);
    assert_eq!(body["data"]["lang"], "fr");
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let res = app(seeded_directory())
        .oneshot(get_req("/hu/nobody/", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await["code"], 404);
}

#[tokio::test]
async fn legacy_tenant_key_route_resolves() {
    let res = app(seeded_directory())
        .oneshot(get_req("/legacy/hu/acme", "localhost"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await["siteId"], "acme-id");
}

#[tokio::test]
async fn optional_site_passes_through() {
    let res = app(seeded_directory())
        .oneshot(get_req("/open", "localhost"))
        .await
        .unwrap();
    assert_eq!(text_body(res).await, "no-site");

    let res = app(seeded_directory())
        .oneshot(get_req("/open", "shop.example"))
        .await
        .unwrap();
    assert_eq!(text_body(res).await, "site:shop-id");
}

#[tokio::test]
async fn directory_failure_is_general_error() {
    let dir = seeded_directory();
    dir.set_fail_lookups(true);

    let res = app(dir).oneshot(get_req("/hu/acme/", "localhost")).await.unwrap();

    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert_eq!(body["name"], "GeneralError");
    assert_eq!(body["className"], "general-error");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("lang=hu, slug=acme, path=/hu/acme/"), "{message}");
    assert!(!message.contains("Some("), "{message}");
}

#[tokio::test]
async fn non_site_routes_skip_resolution() {
    let dir = seeded_directory();
    dir.set_fail_lookups(true);

    let provided = HeaderValue::from_static("req-test-123");
    let req = Request::builder()
        .uri("/health")
        .header("host", "shop.example")
        .header("x-request-id", provided.clone())
        .body(Body::empty())
        .unwrap();

    let res = app(dir).oneshot(req).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}
