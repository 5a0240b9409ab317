//! Walks an anchored vector through a move and two rotations.
//!
//! ```text
//! cargo run --example anchored
//! RUST_LOG=geom3d=trace cargo run --example anchored
//! ```

use std::f64::consts::FRAC_PI_2;

use geom3d::{AnchoredVector, Point, Result, Tolerance, Vector};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for geom3d.
    // Override with RUST_LOG env var (e.g. RUST_LOG=geom3d=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("anchored=info".parse().unwrap_or_default())
        .add_directive("geom3d=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    Tolerance::new(1e-9, 9)?.install()?;

    let mut v = AnchoredVector::new(Vector::new(1.0, 2.0, 3.0), None);
    tracing::info!(%v, end = %v.end_point(), "start");

    v.move_by([4.0, 5.0, 6.0]);
    tracing::info!(%v, end = %v.end_point(), "after move");

    v.rotate(FRAC_PI_2, Vector::x_unit(), None)?;
    tracing::info!(%v, end = %v.end_point(), "after rotating the direction");

    v.rotate(FRAC_PI_2, Vector::z_unit(), Some(&Point::origin()))?;
    tracing::info!(%v, end = %v.end_point(), "after rotating about the origin");

    if let Err(err) = v.rotate(1.0, Vector::zero(), None) {
        tracing::warn!(%err, "zero axis rejected");
    }

    let a = Point::new(1.0, 1.0, 1.0);
    let b = Point::new(1.0, 2.0, 3.0);
    tracing::info!(distance = a.distance(&b), link = %a.vector_to(&b), "distance");
    Ok(())
}
