/// Example: Render one frame headlessly and save it as a binary PPM
///
/// Usage: cargo run --example render_ppm -- [mesh.obj] [out.ppm]

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use sl3d_core::{obj, Compositor, Mesh, RenderConfig, RenderMode};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => obj::load_obj(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?,
        None => {
            eprintln!("No mesh provided, using the sample cube...");
            Mesh::sample_cube()
        }
    };
    let out_path = args.get(2).map(String::as_str).unwrap_or("frame.ppm");

    let mut mesh = mesh;
    mesh.rotate(25.0, -35.0, 0.0);

    let config = RenderConfig::default();
    let (frame, report) = Compositor::new(&config).render_with_report(&mesh, RenderMode::Filled);
    println!(
        "Drew {} triangles ({} skipped), {} pixels",
        report.triangles_drawn, report.triangles_skipped, report.raster.pixels_written
    );

    let mut out = BufWriter::new(File::create(out_path)?);
    write!(out, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
    for pixel in frame.as_bytes().chunks_exact(4) {
        out.write_all(&pixel[..3])?;
    }
    out.flush()?;

    println!("Wrote {}", out_path);
    Ok(())
}
