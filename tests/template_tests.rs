//! Integration tests for the template half of the pipeline
//!
//! None of these need a browser, so they run everywhere.

use cardshot::{render_template_to_html, render_template_to_image_buffer, Error, RenderOptions};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn test_interpolates_data_into_template() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.html");
    fs::write(&path, "<h1>{{ title }}</h1>").expect("Failed to write template");

    let html = render_template_to_html(&path, json!({ "title": "Hi" }))
        .await
        .expect("Failed to render template");

    assert_eq!(html, "<h1>Hi</h1>");
}

#[tokio::test]
async fn test_rendered_output_has_no_template_markers() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("list.html");
    fs::write(
        &path,
        "<ul>{% for item in items %}<li>{{ item }}</li>{% endfor %}</ul><p>{{ footer }}</p>",
    )
    .expect("Failed to write template");

    let html = render_template_to_html(
        &path,
        json!({ "items": ["one", "two"], "footer": "done" }),
    )
    .await
    .expect("Failed to render template");

    assert_eq!(html, "<ul><li>one</li><li>two</li></ul><p>done</p>");
    assert!(!html.contains("{{"));
    assert!(!html.contains("{%"));
}

#[tokio::test]
async fn test_unicode_data_survives_interpolation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.html");
    fs::write(&path, "<h1>{{ title }}</h1>").expect("Failed to write template");

    let html = render_template_to_html(&path, json!({ "title": "Hello World 🚀" }))
        .await
        .expect("Failed to render template");

    assert_eq!(html, "<h1>Hello World 🚀</h1>");
}

#[tokio::test]
async fn test_markup_in_data_is_escaped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.html");
    fs::write(&path, "<h1>{{ title }}</h1>").expect("Failed to write template");

    let html = render_template_to_html(&path, json!({ "title": "<script>&" }))
        .await
        .expect("Failed to render template");

    assert_eq!(html, "<h1>&lt;script&gt;&amp;</h1>");
}

#[tokio::test]
async fn test_includes_resolve_relative_to_template() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("header.html"),
        "<header>{{ site }}</header>",
    )
    .expect("Failed to write partial");
    let path = dir.path().join("page.html");
    fs::write(&path, "{% include \"header.html\" %}<p>body</p>").expect("Failed to write template");

    // Render from a different working directory than the template's.
    let html = render_template_to_html(&path, json!({ "site": "cardshot" }))
        .await
        .expect("Failed to render template with include");

    assert_eq!(html, "<header>cardshot</header><p>body</p>");
}

#[tokio::test]
async fn test_missing_template_is_template_not_found() {
    let err = render_template_to_html("definitely/not/here.html", ())
        .await
        .expect_err("Expected missing template to fail");

    assert!(matches!(err, Error::TemplateNotFound { .. }));
    let message = err.to_string();
    assert!(
        message.contains("here.html"),
        "Error should name the offending path: {}",
        message
    );
}

#[tokio::test]
async fn test_image_render_rejects_missing_template_without_a_browser() {
    // The template step runs first, so this fails fast even on machines
    // without Chrome installed.
    let err =
        render_template_to_image_buffer("definitely/not/here.html", (), RenderOptions::default())
            .await
            .expect_err("Expected missing template to fail");

    assert!(matches!(err, Error::TemplateNotFound { .. }));
}

#[tokio::test]
async fn test_undefined_variable_is_a_template_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.html");
    fs::write(&path, "<h1>{{ headline }}</h1>").expect("Failed to write template");

    let err = render_template_to_html(&path, json!({ "title": "wrong key" }))
        .await
        .expect_err("Expected undefined variable to fail");

    assert!(matches!(err, Error::TemplateSyntax { .. }));
}

#[tokio::test]
async fn test_malformed_template_is_a_template_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.html");
    fs::write(&path, "{% if %}no condition{% endif %}").expect("Failed to write template");

    let err = render_template_to_html(&path, json!({}))
        .await
        .expect_err("Expected malformed template to fail");

    assert!(matches!(err, Error::TemplateSyntax { .. }));
}

#[tokio::test]
async fn test_static_template_renders_with_unit_data() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("static.html");
    fs::write(&path, "<p>nothing to substitute</p>").expect("Failed to write template");

    let html = render_template_to_html(&path, ())
        .await
        .expect("Failed to render static template");

    assert_eq!(html, "<p>nothing to substitute</p>");
}
