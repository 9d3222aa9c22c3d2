use denso::{DenseMatrix, MatrixOptions, init_distances, relax};
use tracing_subscriber::EnvFilter;

fn main() -> denso::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    // CLRS figure 25.4, zero-based; 0 means "no edge"
    let edges = [
        (0, 1, 3.0),
        (0, 2, 8.0),
        (0, 4, -4.0),
        (1, 3, 1.0),
        (1, 4, 7.0),
        (2, 1, 4.0),
        (3, 0, 2.0),
        (3, 2, -5.0),
        (4, 3, 6.0),
    ];
    let mut d = DenseMatrix::with_options(5, 5, MatrixOptions::distance())?;
    for (i, j, w) in edges {
        d.set(i, j, w)?;
    }

    init_distances(&mut d)?;
    println!("initial distances:\n{d}");
    relax(&mut d)?;
    println!("shortest paths:\n{d}");
    Ok(())
}
