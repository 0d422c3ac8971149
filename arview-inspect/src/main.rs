/// ARView Inspect - Headless model loader
///
/// Loads an OBJ model the way the viewer would (materials and textures
/// included, without a GPU) and prints what the renderer would receive.
///
/// Usage: arview-inspect <model.obj> [--swap-yz] [--strict-textures]

use std::env;
use std::path::Path;
use std::process;

use arview_core::{
    load_model, projection_from_intrinsics, Calibration, HandleAllocator, LoadOptions,
    TextureCache, ViewerConfig,
};
use log::info;

fn main() {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <model.obj> [--swap-yz] [--strict-textures]", args[0]);
        process::exit(2);
    }

    let options = LoadOptions {
        swap_yz: args.iter().any(|a| a == "--swap-yz"),
        strict_textures: args.iter().any(|a| a == "--strict-textures"),
    };

    if let Err(e) = run(Path::new(&args[1]), &options) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(path: &Path, options: &LoadOptions) -> arview_core::Result<()> {
    info!("loading {}", path.display());

    let mut cache = TextureCache::new(HandleAllocator::new());
    let model = load_model(path, options, &mut cache)?;

    println!("Model: {}", path.display());
    println!("  vertices:      {}", model.vertices.len());
    println!("  normals:       {}", model.normals.len());
    println!("  tex coords:    {}", model.tex_coords.len());
    println!("  faces:         {}", model.faces.len());
    println!("  materials:     {}", model.materials.len());
    println!("  textures:      {}", cache.len());
    println!("  draw commands: {}", model.draw_list().len());

    // A representative 640x480 calibration so the projection numbers can
    // be eyeballed against a known-good run.
    let config = ViewerConfig::default();
    let calibration = Calibration::from_slices(
        &[800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0],
        &[0.0; 5],
    )?;
    let projection =
        projection_from_intrinsics(&calibration.matrix, 640, 480, config.near, config.far);

    println!("Projection (640x480, near {}, far {}):", config.near, config.far);
    for row in 0..4 {
        println!(
            "  [{:9.5} {:9.5} {:9.5} {:9.5}]",
            projection[(row, 0)],
            projection[(row, 1)],
            projection[(row, 2)],
            projection[(row, 3)]
        );
    }

    cache.release_all();
    Ok(())
}
