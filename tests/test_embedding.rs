//! Integration test: 2D embeddings of country selections

use culture_map::embedding::UmapConfig;
use culture_map::prelude::*;

/// Two culturally distinct groups of four countries each
fn two_groups() -> Vec<CountryRecord> {
    let mut countries = Vec::new();
    for i in 0..4 {
        let j = i as f64;
        countries.push(CountryRecord::new(
            format!("North {}", i),
            [20.0 + j, 75.0 - j, 20.0 + j, 30.0, 40.0 + j, 65.0, 65.0 - j],
        ));
    }
    for i in 0..4 {
        let j = i as f64;
        countries.push(CountryRecord::new(
            format!("South {}", i),
            [80.0 - j, 20.0 + j, 60.0, 85.0 - j, 30.0, 30.0 + j, 25.0],
        ));
    }
    countries
}

fn centroid(points: &[[f64; 2]]) -> [f64; 2] {
    let n = points.len() as f64;
    let sx: f64 = points.iter().map(|p| p[0]).sum();
    let sy: f64 = points.iter().map(|p| p[1]).sum();
    [sx / n, sy / n]
}

fn spread(points: &[[f64; 2]], c: [f64; 2]) -> f64 {
    points
        .iter()
        .map(|p| ((p[0] - c[0]).powi(2) + (p[1] - c[1]).powi(2)).sqrt())
        .fold(0.0, f64::max)
}

#[test]
fn test_every_algorithm_returns_two_columns_per_country() {
    let table = extract(&two_groups()).unwrap();
    for algorithm in EmbeddingAlgorithm::ALL {
        let embedding = embed(&table, algorithm).unwrap();
        assert_eq!(embedding.len(), 8, "{}", algorithm);
        assert_eq!(embedding.n_columns(), 2);
        assert_eq!(embedding.index(), table.index());
        assert!(embedding.coords().iter().flatten().all(|v| v.is_finite()));
    }
}

#[test]
fn test_groups_stay_apart_in_the_map() {
    let table = extract(&two_groups()).unwrap();
    for algorithm in EmbeddingAlgorithm::ALL {
        let embedding = embed(&table, algorithm).unwrap();
        let (north, south) = embedding.coords().split_at(4);
        let (cn, cs) = (centroid(north), centroid(south));
        let gap = ((cn[0] - cs[0]).powi(2) + (cn[1] - cs[1]).powi(2)).sqrt();
        let within = spread(north, cn).max(spread(south, cs));
        assert!(gap > within, "{}: gap {} within {}", algorithm, gap, within);
    }
}

/// Countries evenly spaced around a circle in the PDI/IDV plane, with one
/// duplicated, so the two leading eigenvalues are equal
fn ring_with_duplicate() -> Vec<CountryRecord> {
    let mut countries: Vec<CountryRecord> = (0..12)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::PI / 6.0;
            CountryRecord::new(
                format!("Ring {}", i),
                [50.0 + 40.0 * angle.cos(), 50.0 + 40.0 * angle.sin(), 50.0, 50.0, 50.0, 50.0, 50.0],
            )
        })
        .collect();
    let mut twin = countries[3].clone();
    twin.title = "Ring 3 twin".to_string();
    countries.push(twin);
    countries
}

#[test]
fn test_linear_layouts_ignore_seed() {
    for countries in [two_groups(), ring_with_duplicate()] {
        let table = extract(&countries).unwrap();
        for algorithm in [EmbeddingAlgorithm::Pca, EmbeddingAlgorithm::Mds] {
            let a = Embedder::new(EmbeddingConfig::default().with_random_state(42))
                .embed(&table, algorithm)
                .unwrap();
            let b = Embedder::new(EmbeddingConfig::default().with_random_state(7))
                .embed(&table, algorithm)
                .unwrap();
            assert_eq!(a, b, "{}", algorithm);
        }
    }
}

#[test]
fn test_mds_keeps_ring_distances() {
    let countries = ring_with_duplicate();
    let embedding = embed(&extract(&countries).unwrap(), EmbeddingAlgorithm::Mds).unwrap();
    let coords = embedding.coords();
    for i in 0..countries.len() {
        for j in 0..countries.len() {
            let a = countries[i].scores();
            let b = countries[j].scores();
            let original = a.iter().zip(&b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt();
            let mapped = ((coords[i][0] - coords[j][0]).powi(2) + (coords[i][1] - coords[j][1]).powi(2)).sqrt();
            assert!((original - mapped).abs() < 1e-8, "({}, {}): {} vs {}", i, j, original, mapped);
        }
    }
}

#[test]
fn test_seed_controls_umap_layout() {
    let table = extract(&two_groups()).unwrap();
    let run = |seed: u64| {
        Embedder::new(EmbeddingConfig::default().with_random_state(seed))
            .embed(&table, EmbeddingAlgorithm::Umap)
            .unwrap()
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(7));
}

#[test]
fn test_small_selections_use_trivial_layout() {
    let countries = two_groups();
    for algorithm in EmbeddingAlgorithm::ALL {
        let empty = embed(&extract(&[]).unwrap(), algorithm).unwrap();
        assert!(empty.is_empty());

        let one = embed(&extract(&countries[..1]).unwrap(), algorithm).unwrap();
        assert_eq!(one.coords(), &[[0.0, 0.0]]);

        let two = embed(&extract(&countries[..2]).unwrap(), algorithm).unwrap();
        let d = (two.coords()[1][0] - two.coords()[0][0]).abs();
        let scores: Vec<[f64; 7]> = countries[..2].iter().map(|c| c.scores()).collect();
        let expected = scores[0]
            .iter()
            .zip(&scores[1])
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();
        assert!((d - expected).abs() < 1e-9, "{}", algorithm);
    }
}

#[test]
fn test_identical_countries_embed_without_error() {
    let same = [50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0];
    let countries: Vec<CountryRecord> = (0..5)
        .map(|i| CountryRecord::new(format!("Clone {}", i), same))
        .collect();
    let table = extract(&countries).unwrap();
    for algorithm in EmbeddingAlgorithm::ALL {
        let embedding = embed(&table, algorithm).unwrap();
        assert_eq!(embedding.len(), 5);
        assert!(embedding.coords().iter().flatten().all(|v| v.is_finite()), "{}", algorithm);
    }
}

#[test]
fn test_umap_with_few_neighbors() {
    let table = extract(&two_groups()).unwrap();
    let config = EmbeddingConfig::default().with_umap(UmapConfig {
        n_neighbors: 3,
        n_epochs: 100,
        ..Default::default()
    });
    let embedding = Embedder::new(config).embed(&table, EmbeddingAlgorithm::Umap).unwrap();
    assert_eq!(embedding.len(), 8);
}
