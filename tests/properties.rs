use proptest::prelude::*;

use sigmoid_nn::activation::sigmoid_prime_from_activation;
use sigmoid_nn::{accuracy, sigmoid, sigmoid_prime, Matrix, Network, RandomSource, TrainingDataset};

fn arb_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-1e3f64..1e3, rows * cols)
            .prop_map(move |values| Matrix::from_values(rows, cols, &values).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn transpose_is_an_involution(m in arb_matrix()) {
        prop_assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn equals_is_reflexive(m in arb_matrix(), eps in 0.0f64..1.0) {
        prop_assert!(m.approx_eq(&m, eps));
    }

    #[test]
    fn product_shape(n in 1usize..6, k in 1usize..6, p in 1usize..6) {
        let a = Matrix::zeros(n, k);
        let b = Matrix::zeros(k, p);
        prop_assert_eq!(a.product(&b).unwrap().shape(), (n, p));
        let c = Matrix::zeros(k + 1, p);
        prop_assert!(a.product(&c).is_err());
    }

    #[test]
    fn sigmoid_derivative_identity(x in -30.0f64..30.0) {
        let s = sigmoid(x);
        prop_assert!((sigmoid_prime(x) - s * (1.0 - s)).abs() < 1e-12);
        prop_assert!((sigmoid_prime_from_activation(s) - sigmoid_prime(x)).abs() < 1e-12);
    }

    #[test]
    fn int_in_range_bounds(seed in any::<u64>(), min in 0usize..100, width in 0usize..100) {
        let mut rng = RandomSource::new(seed);
        for _ in 0..20 {
            let v = rng.int_in_range(min, min + width);
            prop_assert!(v >= min && v <= min + width);
        }
    }

    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>(), n in 1usize..40) {
        let inputs: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, -(i as f64)]).collect();
        let labels: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64]).collect();
        let test = vec![vec![0.5, 0.5], vec![0.25, 0.75]];
        let test_labels = vec![vec![1.0], vec![0.0]];
        let mut data = TrainingDataset::new(inputs, labels, test.clone(), test_labels.clone()).unwrap();

        data.shuffle_training(&mut RandomSource::new(seed));

        let mut pairs: Vec<(i64, i64)> = data
            .train_inputs()
            .iter()
            .zip(data.train_labels())
            .map(|(x, y)| (x[0] as i64, y[0] as i64))
            .collect();
        pairs.sort_unstable();
        let expected: Vec<(i64, i64)> = (0..n as i64).map(|i| (i, i)).collect();
        prop_assert_eq!(pairs, expected);
        prop_assert_eq!(data.test_inputs(), test.as_slice());
        prop_assert_eq!(data.test_labels(), test_labels.as_slice());
    }

    #[test]
    fn accuracy_is_a_fraction(seed in any::<u64>(), n in 1usize..20) {
        let mut rng = RandomSource::new(seed);
        let network = Network::new(&[3, 4, 2], &mut rng).unwrap();
        let inputs: Vec<Vec<f64>> = (0..n).map(|_| (0..3).map(|_| rng.uniform()).collect()).collect();
        let labels: Vec<Vec<f64>> = (0..n).map(|_| {
            let class = rng.int_in_range(0, 1);
            sigmoid_nn::data::one_hot(class, 2)
        }).collect();
        let acc = accuracy(&network, &inputs, &labels).unwrap();
        prop_assert!((0.0..=1.0).contains(&acc));
    }
}
