//! Round-trip and repair behavior of the ambient config/input layer.

use std::io::Write;

use kmeans_core::config::Config;
use kmeans_core::io::points::read_points;

#[test]
fn config_round_trips_through_toml() {
    let config = Config {
        data_filename: "points.txt".to_string(),
        result_filename: "out.txt".to_string(),
        clusters_number: 4,
        threads_number: 2,
        dimensions_number: Some(3),
        points_number: Some(200),
        seed: Some(9),
    };

    let serialized = toml::to_string(&config_as_serializable(&config)).unwrap();
    let reloaded: Config = toml::from_str(&serialized).unwrap();

    assert_eq!(reloaded.data_filename, config.data_filename);
    assert_eq!(reloaded.result_filename, config.result_filename);
    assert_eq!(reloaded.clusters_number, config.clusters_number);
    assert_eq!(reloaded.threads_number, config.threads_number);
    assert_eq!(reloaded.dimensions_number, config.dimensions_number);
    assert_eq!(reloaded.points_number, config.points_number);
    assert_eq!(reloaded.seed, config.seed);

    // `Config` only derives `Deserialize`; re-serializing for this test goes
    // through an equivalent plain struct so the round trip exercises TOML's
    // own encode/decode symmetry rather than any serializer on `Config` itself.
    fn config_as_serializable(config: &Config) -> impl serde::Serialize {
        #[derive(serde::Serialize)]
        struct Mirror {
            data_filename: String,
            result_filename: String,
            clusters_number: usize,
            threads_number: usize,
            dimensions_number: Option<usize>,
            points_number: Option<usize>,
            seed: Option<u64>,
        }
        Mirror {
            data_filename: config.data_filename.clone(),
            result_filename: config.result_filename.clone(),
            clusters_number: config.clusters_number,
            threads_number: config.threads_number,
            dimensions_number: config.dimensions_number,
            points_number: config.points_number,
            seed: config.seed,
        }
    }
}

#[test]
fn ragged_and_invalid_input_is_repaired_without_panicking() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1.0, 2.0, 3.0").unwrap();
    writeln!(file, "4.0 oops").unwrap();
    writeln!(file, "5.0, 6.0, 7.0, 8.0").unwrap();
    file.flush().unwrap();

    let matrix = read_points(file.path(), Some(3), None).unwrap();
    assert_eq!(matrix.dims, 3);
    assert_eq!(
        matrix.data,
        vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 5.0, 6.0, 7.0]
    );
}
