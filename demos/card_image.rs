//! Renders the demo card template to both a PNG and a JPEG file.
//! Run with: cargo run --example card_image

use cardshot::{ImageFormat, RenderOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data = json!({
        "title": "Hello World 🚀",
        "subtitle": "Rendered with headless Chrome",
    });

    let png = cardshot::render_template_to_image_file(
        "demos/templates/card.html",
        &data,
        "out/card.png",
        RenderOptions::default(),
    )
    .await?;
    println!("wrote {}", png.display());

    let jpeg = cardshot::render_template_to_image_file(
        "demos/templates/card.html",
        &data,
        "out/card.jpg",
        RenderOptions {
            format: ImageFormat::Jpeg,
            quality: 85,
            ..Default::default()
        },
    )
    .await?;
    println!("wrote {}", jpeg.display());

    Ok(())
}
