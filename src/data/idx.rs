//! Reader for the IDX files the MNIST digits are distributed in.
//!
//! Headers are big-endian by definition, but files rewritten on
//! little-endian machines turn up in the wild; the byte order is detected
//! from the magic number.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::data::dataset::{one_hot, TrainingDataset};
use crate::data::error::DatasetError;

pub const LABEL_MAGIC: u32 = 0x0000_0801;
pub const IMAGE_MAGIC: u32 = 0x0000_0803;

/// Number of digit classes in MNIST label files.
pub const MNIST_CLASSES: usize = 10;

pub const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
pub const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
pub const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

/// Decoded IDX3 image file.
#[derive(Debug, Clone, PartialEq)]
pub struct Images {
    pub rows: usize,
    pub cols: usize,
    /// One `rows * cols` vector per image, pixels scaled to [0, 1].
    pub pixels: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy)]
enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    fn decode(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }
}

/// Reads an IDX1 label file into one-hot vectors of length `n_classes`.
pub fn read_labels<R: Read>(mut reader: R, n_classes: usize) -> Result<Vec<Vec<f64>>, DatasetError> {
    let dims = read_header(&mut reader, LABEL_MAGIC, 1)?;
    let bytes = read_body(&mut reader, dims[0])?;

    bytes
        .iter()
        .map(|&label| {
            if usize::from(label) >= n_classes {
                return Err(DatasetError::LabelOutOfRange { label, classes: n_classes });
            }
            Ok(one_hot(usize::from(label), n_classes))
        })
        .collect()
}

/// Reads an IDX3 image file, normalizing pixels from [0, 255] to [0, 1].
pub fn read_images<R: Read>(mut reader: R) -> Result<Images, DatasetError> {
    let dims = read_header(&mut reader, IMAGE_MAGIC, 3)?;
    let (count, rows, cols) = (dims[0], dims[1], dims[2]);
    let total = rows
        .checked_mul(cols)
        .filter(|&n| n > 0)
        .and_then(|n| n.checked_mul(count).map(|total| (n, total)));
    let Some((n_pixels, total)) = total else {
        return Err(DatasetError::BadDimensions { count, rows, cols });
    };

    let bytes = read_body(&mut reader, total)?;
    let pixels = bytes
        .chunks(n_pixels)
        .map(|chunk| chunk.iter().map(|&p| f64::from(p) / 255.0).collect())
        .collect();
    Ok(Images { rows, cols, pixels })
}

/// Loads the four standard MNIST files from `dir`.
pub fn load_mnist(dir: &Path) -> Result<TrainingDataset, DatasetError> {
    let train_labels = read_labels(open(&dir.join(TRAIN_LABELS))?, MNIST_CLASSES)?;
    log::info!("loaded {}: {} labels", TRAIN_LABELS, train_labels.len());
    let test_labels = read_labels(open(&dir.join(TEST_LABELS))?, MNIST_CLASSES)?;
    log::info!("loaded {}: {} labels", TEST_LABELS, test_labels.len());

    let train = read_images(open(&dir.join(TRAIN_IMAGES))?)?;
    log::info!("loaded {}: {} {}x{} images", TRAIN_IMAGES, train.pixels.len(), train.rows, train.cols);
    let test = read_images(open(&dir.join(TEST_IMAGES))?)?;
    log::info!("loaded {}: {} {}x{} images", TEST_IMAGES, test.pixels.len(), test.rows, test.cols);

    TrainingDataset::new(train.pixels, train_labels, test.pixels, test_labels)
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Open { path: path.to_path_buf(), source })
}

fn read_header<R: Read>(reader: &mut R, magic: u32, n_dims: usize) -> Result<Vec<usize>, DatasetError> {
    let mut buf4 = [0u8; 4];
    read_exact(reader, &mut buf4)?;

    let order = if u32::from_be_bytes(buf4) == magic {
        ByteOrder::Big
    } else if u32::from_le_bytes(buf4) == magic {
        log::debug!("little-endian IDX header");
        ByteOrder::Little
    } else {
        return Err(DatasetError::BadMagic { expected: magic, found: u32::from_be_bytes(buf4) });
    };

    let mut dims = Vec::with_capacity(n_dims);
    for _ in 0..n_dims {
        read_exact(reader, &mut buf4)?;
        dims.push(order.decode(buf4) as usize);
    }
    Ok(dims)
}

/// Reads exactly `len` body bytes, growing the buffer only as data arrives
/// so a lying header cannot force a large allocation.
fn read_body<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, DatasetError> {
    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < len {
        return Err(DatasetError::Truncated);
    }
    Ok(bytes)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), DatasetError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DatasetError::Truncated,
        _ => DatasetError::Io(e),
    })
}
