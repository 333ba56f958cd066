use crate::data::error::DatasetError;
use crate::math::RandomSource;

/// Training and testing examples for one run.
///
/// Every input has `input_size` values and every label `output_size`
/// values. Labels are normally one-hot vectors so that the index of their
/// maximum is the class.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    train_inputs: Vec<Vec<f64>>,
    train_labels: Vec<Vec<f64>>,
    test_inputs: Vec<Vec<f64>>,
    test_labels: Vec<Vec<f64>>,
    input_size: usize,
    output_size: usize,
}

/// A borrowed run of consecutive training examples.
///
/// The view holds shared borrows of its parent dataset, so the parent can
/// neither be dropped nor reshuffled while a batch is alive.
#[derive(Debug, Clone, Copy)]
pub struct MiniBatch<'a> {
    /// Index of the first example in the training partition.
    pub offset: usize,
    pub inputs: &'a [Vec<f64>],
    pub labels: &'a [Vec<f64>],
}

impl<'a> MiniBatch<'a> {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// `(input, label)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a [f64], &'a [f64])> {
        self.inputs
            .iter()
            .zip(self.labels.iter())
            .map(|(x, y)| (x.as_slice(), y.as_slice()))
    }
}

impl TrainingDataset {
    /// Validates and wraps the four partitions. Dimensions are taken from the
    /// first example; either partition may be empty, but not both.
    pub fn new(
        train_inputs: Vec<Vec<f64>>,
        train_labels: Vec<Vec<f64>>,
        test_inputs: Vec<Vec<f64>>,
        test_labels: Vec<Vec<f64>>,
    ) -> Result<TrainingDataset, DatasetError> {
        check_counts("training", &train_inputs, &train_labels)?;
        check_counts("testing", &test_inputs, &test_labels)?;

        let (first_input, first_label) = train_inputs
            .first()
            .zip(train_labels.first())
            .or_else(|| test_inputs.first().zip(test_labels.first()))
            .ok_or(DatasetError::Empty)?;
        let input_size = first_input.len();
        let output_size = first_label.len();
        if input_size == 0 || output_size == 0 {
            return Err(DatasetError::Empty);
        }

        for (partition, inputs, labels) in [
            ("training", &train_inputs, &train_labels),
            ("testing", &test_inputs, &test_labels),
        ] {
            if let Some((index, x)) = inputs.iter().enumerate().find(|(_, x)| x.len() != input_size) {
                return Err(DatasetError::InputSize { partition, index, expected: input_size, actual: x.len() });
            }
            if let Some((index, y)) = labels.iter().enumerate().find(|(_, y)| y.len() != output_size) {
                return Err(DatasetError::LabelSize { partition, index, expected: output_size, actual: y.len() });
            }
        }

        Ok(TrainingDataset {
            train_inputs,
            train_labels,
            test_inputs,
            test_labels,
            input_size,
            output_size,
        })
    }

    pub fn n_train(&self) -> usize {
        self.train_inputs.len()
    }

    pub fn n_test(&self) -> usize {
        self.test_inputs.len()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn train_inputs(&self) -> &[Vec<f64>] {
        &self.train_inputs
    }

    pub fn train_labels(&self) -> &[Vec<f64>] {
        &self.train_labels
    }

    pub fn test_inputs(&self) -> &[Vec<f64>] {
        &self.test_inputs
    }

    pub fn test_labels(&self) -> &[Vec<f64>] {
        &self.test_labels
    }

    /// Fisher–Yates shuffle of the training partition. Inputs and labels are
    /// permuted together; the testing partition is left as is.
    pub fn shuffle_training(&mut self, rng: &mut RandomSource) {
        for i in (1..self.n_train()).rev() {
            let j = rng.int_in_range(0, i);
            self.train_inputs.swap(i, j);
            self.train_labels.swap(i, j);
        }
    }

    /// View of training examples `start..end`, or `None` if out of bounds.
    pub fn subset(&self, start: usize, end: usize) -> Option<MiniBatch<'_>> {
        Some(MiniBatch {
            offset: start,
            inputs: self.train_inputs.get(start..end)?,
            labels: self.train_labels.get(start..end)?,
        })
    }

    /// Consecutive full batches of `size` training examples. A trailing
    /// remainder shorter than `size` is not yielded; see
    /// [`TrainingDataset::dropped_remainder`].
    ///
    /// # Panics
    /// Panics if `size` is 0.
    pub fn mini_batches(&self, size: usize) -> impl Iterator<Item = MiniBatch<'_>> + '_ {
        assert!(size > 0, "mini-batch size must be at least 1");
        self.train_inputs
            .chunks_exact(size)
            .zip(self.train_labels.chunks_exact(size))
            .enumerate()
            .map(move |(i, (inputs, labels))| MiniBatch { offset: i * size, inputs, labels })
    }

    /// Number of training examples skipped each epoch by `mini_batches(size)`.
    pub fn dropped_remainder(&self, size: usize) -> usize {
        if size == 0 {
            return self.n_train();
        }
        self.n_train() % size
    }
}

/// One-hot vector of length `n_classes` with a 1.0 at `label`.
///
/// # Panics
/// Panics if `label >= n_classes`.
pub fn one_hot(label: usize, n_classes: usize) -> Vec<f64> {
    assert!(label < n_classes, "label {label} is outside 0..{n_classes}");
    let mut v = vec![0.0; n_classes];
    v[label] = 1.0;
    v
}

fn check_counts(
    partition: &'static str,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> Result<(), DatasetError> {
    if inputs.len() != labels.len() {
        return Err(DatasetError::CountMismatch { partition, inputs: inputs.len(), labels: labels.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n_train: usize, n_test: usize) -> TrainingDataset {
        let train: Vec<Vec<f64>> = (0..n_train).map(|i| vec![i as f64, i as f64, i as f64]).collect();
        let labels: Vec<Vec<f64>> = (0..n_train).map(|i| vec![i as f64]).collect();
        let test: Vec<Vec<f64>> = (0..n_test).map(|i| vec![-(i as f64); 3]).collect();
        let test_labels: Vec<Vec<f64>> = (0..n_test).map(|i| vec![-(i as f64)]).collect();
        TrainingDataset::new(train, labels, test, test_labels).unwrap()
    }

    #[test]
    fn new_infers_dimensions() {
        let data = numbered(3, 2);
        assert_eq!(data.n_train(), 3);
        assert_eq!(data.n_test(), 2);
        assert_eq!(data.input_size(), 3);
        assert_eq!(data.output_size(), 1);
    }

    #[test]
    fn new_accepts_empty_test_partition() {
        let data = TrainingDataset::new(vec![vec![1.0, 1.0]], vec![vec![1.0]], vec![], vec![]).unwrap();
        assert_eq!(data.n_test(), 0);
    }

    #[test]
    fn new_rejects_inconsistent_data() {
        assert!(matches!(
            TrainingDataset::new(vec![], vec![], vec![], vec![]),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(
            TrainingDataset::new(vec![vec![1.0]], vec![], vec![], vec![]),
            Err(DatasetError::CountMismatch { partition: "training", .. })
        ));
        assert!(matches!(
            TrainingDataset::new(vec![vec![1.0], vec![1.0, 2.0]], vec![vec![1.0], vec![0.0]], vec![], vec![]),
            Err(DatasetError::InputSize { index: 1, expected: 1, actual: 2, .. })
        ));
        assert!(matches!(
            TrainingDataset::new(vec![vec![1.0]], vec![vec![1.0]], vec![vec![1.0]], vec![vec![1.0, 0.0]]),
            Err(DatasetError::LabelSize { partition: "testing", .. })
        ));
    }

    #[test]
    fn shuffle_keeps_pairs_and_test_partition() {
        let mut data = numbered(50, 5);
        let test_before = (data.test_inputs().to_vec(), data.test_labels().to_vec());
        data.shuffle_training(&mut RandomSource::new(3));

        for (x, y) in data.train_inputs().iter().zip(data.train_labels()) {
            assert_eq!(x[0], y[0]);
        }
        let mut seen: Vec<f64> = data.train_labels().iter().map(|y| y[0]).collect();
        assert_ne!(seen, (0..50).map(|i| i as f64).collect::<Vec<_>>());
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..50).map(|i| i as f64).collect::<Vec<_>>());
        assert_eq!((data.test_inputs().to_vec(), data.test_labels().to_vec()), test_before);
    }

    #[test]
    fn shuffle_of_single_example_is_identity() {
        let mut data = numbered(1, 0);
        let before = data.clone();
        data.shuffle_training(&mut RandomSource::new(3));
        assert_eq!(data, before);
    }

    #[test]
    fn mini_batches_drop_the_remainder() {
        let data = numbered(5, 0);
        let batches: Vec<MiniBatch> = data.mini_batches(2).collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].offset, 0);
        assert_eq!(batches[1].offset, 2);
        assert_eq!(batches[1].inputs[0][0], 2.0);
        assert_eq!(batches[1].len(), 2);
        assert_eq!(data.dropped_remainder(2), 1);
        assert_eq!(data.mini_batches(6).count(), 0);
    }

    #[test]
    fn subset_borrows_a_range() {
        let data = numbered(4, 0);
        let view = data.subset(1, 3).unwrap();
        assert_eq!(view.offset, 1);
        let labels: Vec<f64> = view.iter().map(|(_, y)| y[0]).collect();
        assert_eq!(labels, vec![1.0, 2.0]);
        assert!(data.subset(3, 5).is_none());
    }

    #[test]
    fn one_hot_encodes_class() {
        assert_eq!(one_hot(2, 4), vec![0.0, 0.0, 1.0, 0.0]);
    }
}
