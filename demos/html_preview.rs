//! Prints the interpolated HTML for the demo card template without
//! launching a browser.
//! Run with: cargo run --example html_preview

use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let html = cardshot::render_template_to_html(
        "demos/templates/card.html",
        json!({
            "title": "Preview",
            "subtitle": "No browser involved",
        }),
    )
    .await?;

    println!("{}", html);
    Ok(())
}
