//! File-level output tests against a temporary directory.

use std::fs::{self, File};
use std::io::Read;

use cloud_core::normals::estimate_normals;
use cloud_core::rng::CloudRng;
use cloud_core::sampling::generate;
use cloud_core::shape::{Ball, CubeWithHole, HoleAxis, ShapeParams};
use cloud_core::{NormalBatch, PointBatch};
use cloud_io::{save_cloud, IoError, OutputFormat, Precision};
use tempfile::tempdir;
use zip::ZipArchive;

fn sample(n: usize, params: &ShapeParams) -> (PointBatch, NormalBatch) {
    let mut rng = CloudRng::from_seed(42);
    let points = generate(n, params, &mut rng).unwrap();
    let normals = estimate_normals(&points, params).unwrap();
    (points, normals)
}

fn npy_header_len(bytes: &[u8]) -> usize {
    10 + u16::from_le_bytes([bytes[8], bytes[9]]) as usize
}

fn npy_f64_values(bytes: &[u8]) -> Vec<f64> {
    bytes[npy_header_len(bytes)..]
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

fn npz_member(path: &std::path::Path, name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut bytes = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

#[test]
fn test_ply_with_normals_file_size() {
    let dir = tempdir().unwrap();
    let params = ShapeParams::Ball(Ball::new(10.0).unwrap());
    let (points, normals) = sample(500, &params);

    let saved = save_cloud(
        &dir.path().join("ball"),
        OutputFormat::Ply,
        Precision::F32,
        &points,
        Some(&normals),
    )
    .unwrap();

    assert_eq!(saved.main, dir.path().join("ball.ply"));
    assert!(saved.aux.is_empty());

    let bytes = fs::read(&saved.main).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    let header_end = text.find("end_header\n").unwrap() + "end_header\n".len();
    assert!(text[..header_end].contains("element vertex 500"));
    assert!(text[..header_end].contains("property float nz"));
    assert_eq!(bytes.len() - header_end, 500 * 6 * 4);
}

#[test]
fn test_xyz_with_normals_writes_npz_companion() {
    let dir = tempdir().unwrap();
    let params = ShapeParams::CubeWithHole(CubeWithHole::new(10.0, 1.0, HoleAxis::Z).unwrap());
    let (points, normals) = sample(200, &params);

    let saved = save_cloud(
        &dir.path().join("holed"),
        OutputFormat::Xyz,
        Precision::F64,
        &points,
        Some(&normals),
    )
    .unwrap();

    assert_eq!(saved.main, dir.path().join("holed.xyzn"));
    assert_eq!(saved.aux, vec![dir.path().join("holed.npz")]);

    let text = fs::read_to_string(&saved.main).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|l| l.split(' ').count() == 6));

    let stored_points = npy_f64_values(&npz_member(&saved.aux[0], "points.npy"));
    let stored_normals = npy_f64_values(&npz_member(&saved.aux[0], "normals.npy"));
    assert_eq!(stored_points, points.iter().flatten().copied().collect::<Vec<_>>());
    assert_eq!(stored_normals, normals.iter().flatten().copied().collect::<Vec<_>>());
}

#[test]
fn test_xyz_without_normals() {
    let dir = tempdir().unwrap();
    let params = ShapeParams::Ball(Ball::new(1.0).unwrap());
    let (points, _) = sample(10, &params);

    let saved = save_cloud(
        &dir.path().join("b"),
        OutputFormat::Xyz,
        Precision::F32,
        &points,
        None,
    )
    .unwrap();

    assert_eq!(saved.main, dir.path().join("b.xyz"));
    assert_eq!(saved.aux, vec![dir.path().join("b.npy")]);
}

#[test]
fn test_npy_values_match_points() {
    let dir = tempdir().unwrap();
    let points = PointBatch::from_vec(vec![[1.5, -2.0, 0.25], [0.0, 3.0, -4.0]]);

    let saved = save_cloud(
        &dir.path().join("pts.npy"),
        OutputFormat::Npy,
        Precision::F64,
        &points,
        None,
    )
    .unwrap();
    assert_eq!(saved.main, dir.path().join("pts.npy"));

    let bytes = fs::read(&saved.main).unwrap();
    assert_eq!(npy_f64_values(&bytes), vec![1.5, -2.0, 0.25, 0.0, 3.0, -4.0]);
}

#[test]
fn test_npy_with_normals_is_single_archive() {
    let dir = tempdir().unwrap();
    let params = ShapeParams::Ball(Ball::new(2.0).unwrap());
    let (points, normals) = sample(50, &params);

    let saved = save_cloud(
        &dir.path().join("ball"),
        OutputFormat::Npy,
        Precision::F32,
        &points,
        Some(&normals),
    )
    .unwrap();

    assert_eq!(saved.main, dir.path().join("ball.npz"));
    assert!(saved.aux.is_empty());
    let member = npz_member(&saved.main, "normals.npy");
    assert!(String::from_utf8_lossy(&member).contains("'descr': '<f4'"));
    assert_eq!(member.len() - npy_header_len(&member), 50 * 3 * 4);
}

#[test]
fn test_float16_npy() {
    let dir = tempdir().unwrap();
    let points = PointBatch::from_vec(vec![[0.5, -2.0, 1024.0]]);

    let saved = save_cloud(
        &dir.path().join("half"),
        OutputFormat::Npy,
        Precision::F16,
        &points,
        None,
    )
    .unwrap();

    let bytes = fs::read(&saved.main).unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("'descr': '<f2'"));
    let data = &bytes[npy_header_len(&bytes)..];
    let values: Vec<f32> = data
        .chunks_exact(2)
        .map(|c| half::f16::from_le_bytes([c[0], c[1]]).to_f32())
        .collect();
    assert_eq!(values, vec![0.5, -2.0, 1024.0]);
}

#[test]
fn test_float16_ply_stores_rounded_floats() {
    let dir = tempdir().unwrap();
    // 2049 is not representable in f16 and rounds to 2048.
    let points = PointBatch::from_vec(vec![[2049.0, 0.1, -1.0]]);

    let saved = save_cloud(
        &dir.path().join("half"),
        OutputFormat::Ply,
        Precision::F16,
        &points,
        None,
    )
    .unwrap();

    let bytes = fs::read(&saved.main).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    let header_end = text.find("end_header\n").unwrap() + "end_header\n".len();
    assert!(text[..header_end].contains("property float x"));

    let values: Vec<f32> = bytes[header_end..]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(values[0], 2048.0);
    assert_eq!(values[1], half::f16::from_f64(0.1).to_f32());
    assert_eq!(values[2], -1.0);
}

#[test]
fn test_misaligned_normals_rejected() {
    let dir = tempdir().unwrap();
    let points = PointBatch::from_vec(vec![[0.0; 3]; 3]);
    let normals = NormalBatch::from_vec(vec![[0.0, 0.0, 1.0]]);

    let err = save_cloud(
        &dir.path().join("bad"),
        OutputFormat::Ply,
        Precision::F32,
        &points,
        Some(&normals),
    )
    .unwrap_err();

    assert!(matches!(err, IoError::LengthMismatch { points: 3, normals: 1 }));
    assert!(!dir.path().join("bad.ply").exists());
}
