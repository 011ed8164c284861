//! Print a JSON summary of an MD3 model.
//!
//! Run: `cargo run -p md3 --features tools --bin inspect_md3 -- <locator> [base]`
//!
//! The locator may be an `http(s)://` or `file://` URL or a local path. When
//! a base locator is given, relative locators resolve against it.

use std::env;

use md3::{Client, Model};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let Some(locator) = args.get(1) else {
        eprintln!("usage: inspect_md3 <locator> [base]");
        std::process::exit(2);
    };

    let client = Client::new();
    let mut model: Model<()> = match args.get(2) {
        Some(base) => Model::with_base(base.as_str()),
        None => Model::new(),
    };
    model.load(&client, locator).await?;

    let header = model.header().copied().unwrap_or_default();
    let surfaces: Vec<_> = model
        .surfaces()
        .iter()
        .map(|surface| {
            let mesh = surface.mesh();
            let bounds = mesh.bounds().map(|(min, max)| {
                serde_json::json!({ "min": min.to_array(), "max": max.to_array() })
            });
            serde_json::json!({
                "index": surface.index(),
                "name": surface.name(),
                "frames": surface.frame_count(),
                "vertices": mesh.vertex_count(),
                "triangles": mesh.triangle_count(),
                "bounds": bounds,
            })
        })
        .collect();

    let summary = serde_json::json!({
        "src": model.src(),
        "bytes": model.buffer().len(),
        "header": {
            "num_frames": header.num_frames,
            "num_tags": header.num_tags,
            "num_surfaces": header.num_surfaces,
            "num_skins": header.num_skins,
            "ofs_frames": header.ofs_frames,
            "ofs_tags": header.ofs_tags,
            "ofs_surfaces": header.ofs_surfaces,
            "ofs_eof": header.ofs_eof,
        },
        "surfaces": surfaces,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
