use geoclump::cluster::{
    assign_points, update_centroids, Clustering, Kmeans, Point, ReseedFromPoints, Sampler,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 1..40)
        .prop_map(|raw| raw.into_iter().map(Point::from).collect())
}

proptest! {
    #[test]
    fn prop_kmeans_all_assigned(data in points(), k in 1usize..6) {
        // Skip if k > n
        if k <= data.len() {
            let model = Kmeans::new(k).with_seed(42);
            let labels = model.fit_predict(&data).unwrap();

            prop_assert_eq!(labels.len(), data.len());
            for &l in &labels {
                prop_assert!(l < k);
            }
        }
    }

    #[test]
    fn prop_kmeans_returns_k_centroids(data in points(), k in 1usize..6, seed in any::<u64>()) {
        let fit = Kmeans::new(k).with_seed(seed).fit(&data);
        if k <= data.len() {
            let fit = fit.unwrap();
            prop_assert_eq!(fit.centroids.len(), k);
            prop_assert!(fit.iterations >= 1);
            prop_assert!(fit.shift >= 0.0);
            prop_assert!(fit.centroids.iter().all(|c| c.is_finite()));
        } else {
            prop_assert!(fit.unwrap_err().is_invalid_input());
        }
    }

    #[test]
    fn prop_kmeans_seeded_is_deterministic(data in points(), seed in any::<u64>()) {
        let k = data.len().min(3);
        let model = Kmeans::new(k);
        let a = model.fit_with(&data, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = model.fit_with(&data, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_single_cluster_is_mean(data in points(), max_iter in 1usize..5) {
        let fit = Kmeans::new(1).with_max_iter(max_iter).with_seed(0).fit(&data).unwrap();
        let mean = Point::mean(data.iter().copied()).unwrap();
        prop_assert!(fit.centroids[0].squared_distance(mean) < 1e-12);
    }

    #[test]
    fn prop_nonempty_centroids_are_cluster_means(data in points(), seed in any::<u64>()) {
        let k = data.len().min(2);
        let fit = Kmeans::new(k).with_seed(seed).fit(&data).unwrap();
        for (i, c) in fit.centroids.iter().enumerate() {
            let members = data
                .iter()
                .zip(&fit.assignments)
                .filter(|&(_, &a)| a == i)
                .map(|(p, _)| *p);
            if let Some(mean) = Point::mean(members) {
                prop_assert!(c.squared_distance(mean) < 1e-9);
            }
        }
    }

    #[test]
    fn prop_shift_is_non_negative_and_stays_settled(data in points(), k in 1usize..5, seed in any::<u64>()) {
        let k = k.min(data.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut centroids: Vec<Point> = rng
            .sample_distinct(data.len(), k)
            .into_iter()
            .map(|i| data[i])
            .collect();
        let mut assignments = vec![0; data.len()];

        let mut settled = false;
        for _ in 0..30 {
            assign_points(&data, &centroids, &mut assignments);
            let update = update_centroids(&data, &assignments, &centroids, &mut rng, &mut ReseedFromPoints);
            prop_assert!(update.shift >= 0.0);
            if settled {
                prop_assert_eq!(update.shift, 0.0);
            }
            settled = update.shift == 0.0 && update.counts.iter().all(|&c| c > 0);
            centroids = update.centroids;
        }
    }
}
