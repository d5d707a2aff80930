use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use std::time::Duration;

pub const MINIMAL_PAGE: &str =
    "<html><head><title>T</title></head><body><h1>H</h1><img src=x></body></html>";

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn optimized_page() -> String {
    let links: String = (0..60)
        .map(|i| format!("<a href=\"/page-{}\">Page {}</a>\n", i, i))
        .collect();
    let words = "lorem ipsum dolor sit amet ".repeat(80);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Handmade Oak Furniture Built To Last For Generations</title>
<meta name="description" content="Solid oak tables, chairs and shelving made by hand in our workshop, finished with natural oils and shipped nationwide.">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="canonical" href="https://example.com/">
</head>
<body>
<h1>Handmade Oak Furniture</h1>
<img src="/table.jpg" alt="Oak dining table">
<p>{}</p>
{}
</body>
</html>"#,
        words, links
    )
}

async fn echo_user_agent(req: HttpRequest) -> HttpResponse {
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    HttpResponse::Ok()
        .content_type("text/html")
        .body(format!(
            "<html><head><title>{}</title></head><body></body></html>",
            user_agent
        ))
}

/// Starts a fixture server on an ephemeral port and returns its base URL.
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("text/html")
                        .body(optimized_page())
                }),
            )
            .route("/minimal", web::get().to(|| async { html(MINIMAL_PAGE) }))
            .route(
                "/multiple-h1",
                web::get().to(|| async {
                    html("<html><head><title>Two headings</title></head><body><h1>One</h1><h1>Two</h1></body></html>")
                }),
            )
            .route(
                "/dir/",
                web::get().to(|| async {
                    html("<html><head><title>Directory index</title></head><body><h1>Dir</h1></body></html>")
                }),
            )
            .route("/user-agent", web::get().to(echo_user_agent))
            .route(
                "/plain",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("text/plain")
                        .body(MINIMAL_PAGE)
                }),
            )
            .route(
                "/image",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("image/png")
                        .body(&b"\x89PNG\r\n\x1a\n"[..])
                }),
            )
            .route(
                "/slow",
                web::get().to(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    html(MINIMAL_PAGE)
                }),
            )
            .route(
                "/empty",
                web::get().to(|| async { HttpResponse::Ok().content_type("text/html").finish() }),
            )
            .route(
                "/not-found",
                web::get().to(|| async { HttpResponse::NotFound().body("Not Found") }),
            )
            .route(
                "/server-error",
                web::get().to(|| async { HttpResponse::InternalServerError().body("Error") }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}
