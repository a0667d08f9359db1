//! Builds sections for a small hand-made level and prints them.
//!
//! Usage:
//! ```text
//! cargo run --example dump
//! RUST_LOG=sectmesh=debug cargo run --example dump    # include the build dump
//! ```

use sectmesh::math::Point2;
use sectmesh::operations::query::{DumpSections, IsValid, SectionArea};
use sectmesh::{Level, LevelBuilder, SectionMesh, SectionParams, Wall};

fn square(x: i32, y: i32, size: i32) -> Vec<Point2> {
    vec![
        Point2::new(x, y),
        Point2::new(x + size, y),
        Point2::new(x + size, y + size),
        Point2::new(x, y + size),
    ]
}

/// A room with a pillar, a corridor next to it, and one broken sector whose
/// second loop sits inside the first with the same orientation.
fn sample_level() -> sectmesh::Result<Level> {
    let mut pillar = square(48, 48, 32);
    pillar.reverse();

    let mut builder = LevelBuilder::new();
    builder
        .sector()
        .add_loop(&square(0, 0, 128))
        .add_loop(&pillar)
        .sector()
        .add_loop(&square(128, 0, 128))
        .sector()
        .add_loop(&square(512, 0, 256))
        .add_loop(&square(576, 64, 64));
    // Unclosed sector: the chain runs back into its second wall.
    builder.sector();
    let first = builder.num_walls();
    builder.push_wall(Wall::new(Point2::new(1024, 0), first + 1));
    builder.push_wall(Wall::new(Point2::new(1088, 0), first + 2));
    builder.push_wall(Wall::new(Point2::new(1088, 64), first + 1));
    builder.link_portals();
    Ok(builder.build()?)
}

fn main() -> sectmesh::Result<()> {
    // Default: WARN for everything, DEBUG for sectmesh.
    // Override with RUST_LOG env var (e.g. RUST_LOG=sectmesh=info).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("sectmesh=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let level = sample_level()?;
    let mut mesh = SectionMesh::new();
    let stats = mesh.rebuild(&level, SectionParams::default().with_debug_dump(true));
    println!("{stats:#?}");

    print!("{}", DumpSections::new().execute(&level, &mesh));
    for (id, section) in mesh.sections() {
        let area = SectionArea::new(id).execute(&mesh)?;
        println!("section {} ({}): area {area}", id.index(), section.flag);
    }
    for issue in IsValid::new().issues(&level, &mesh) {
        println!("issue: {issue:?}");
    }
    Ok(())
}
