use denso::{DenseMatrix, inverse, lu, mul, qr, symmetric_eigen, transpose};
use rand::Rng;

fn main() -> denso::Result<()> {
    let n = 6;
    // build a random SPD matrix: A = MᵀM + I
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let m = DenseMatrix::from_vec(n, n, data)?;
    let mut a = mul(&transpose(&m)?, &m)?;
    a.apply(|i, j, v| if i == j { v + 1.0 } else { v })?;

    let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();

    // LU solve
    let factors = lu(&a)?;
    let x = factors.solve(&b)?;
    println!("LU x = {:?}, det = {}", x, factors.determinant());

    // inverse
    let inv = inverse(&a)?;
    println!("A * inv(A) =\n{}", mul(&a, &inv)?);

    // QR: A = Qᵀ R
    let f = qr(&a)?;
    println!("R =\n{}", f.r);

    // Jacobi eigenvalues
    let e = symmetric_eigen(&a, 1e-12, 10_000)?;
    println!("eigenvalues = {:?}, stats = {:?}", e.values, e.stats);
    Ok(())
}
