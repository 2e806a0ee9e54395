use clap::Parser;
use polymesh::{BoundingSphere, Element, Mesh, MeshError};

mod cli;
mod shape;

use cli::Cli;
use shape::Grid;

fn describe(mesh: &Mesh, limit: usize) -> Result<(), MeshError> {
    let counts = mesh.counts()?;
    println!(
        "{:?}: {} vertices, {} elements",
        mesh.mode(),
        counts.vertices,
        counts.elements
    );
    for buf in mesh.buffer_list() {
        println!(
            "  {:?}: {} x {:?}{}, {} elements",
            buf.kind(),
            buf.components(),
            buf.format(),
            if buf.normalized() { " (normalized)" } else { "" },
            buf.element_count()
        );
    }
    println!("  bound: {:?}", mesh.bound());

    for i in 0..counts.elements.min(limit) {
        match mesh.element(i)? {
            Element::Triangle(ids) => {
                let tri = mesh.triangle(i)?;
                println!(
                    "  #{i}: {ids:?} centroid {:?} normal {:?}",
                    tri.centroid(),
                    tri.normal()
                );
            }
            e => println!("  #{i}: {:?}", e.vertices()),
        }
    }
    if counts.elements > limit {
        println!("  ... {} more", counts.elements - limit);
    }

    for lod in 0..mesh.num_lod_levels() {
        println!("  LOD {lod}: {} elements", mesh.lod_triangle_count(lod)?);
    }
    Ok(())
}

pub fn main() -> Result<(), MeshError> {
    let args = Cli::parse();
    cli::initialize_tracing(&args.log_filter, args.log_format);
    tracing::debug!(?args, "parsed arguments");

    let grid = Grid {
        quads: args.grid,
        scale: args.scale,
    };
    let mode = args.mode();
    let mut mesh = grid.build(mode, args.lod_levels)?;
    if args.sphere {
        mesh.set_bound(BoundingSphere::new(nalgebra::Point3::<f32>::origin(), 0.0).into());
    }
    let counts = mesh.update_counts()?;
    mesh.update_bound()?;
    mesh.set_static();
    tracing::info!(
        ?mode,
        vertices = counts.vertices,
        elements = counts.elements,
        "generated mesh"
    );

    describe(&mesh, args.limit)?;

    // a deep copy keeps the original's layout but none of its storage
    let copy = mesh.deep_clone();
    let shared = mesh
        .buffer_list()
        .iter()
        .zip(copy.buffer_list())
        .filter(|(a, b)| a.shares_storage(b))
        .count();
    tracing::info!(
        buffers = copy.buffer_list().len(),
        shared,
        "deep-cloned mesh"
    );
    Ok(())
}
