use rand::Rng;

/// One loaded image/label set. Pixels are flattened row-major and normalized
/// from [0, 255] to [0.0, 1.0]; labels stay integer class indices.
#[derive(Debug, Clone)]
pub struct MnistSet {
    pub images: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
    pub rows: usize,
    pub cols: usize,
}

/// Parses an IDX3 image file into normalized flat pixel vectors.
///
/// # IDX3 image file layout
/// ```text
/// bytes  0-1:   0x00 0x00   (reserved, must be zero)
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x03        (number of dimensions = 3)
/// bytes  4-7:   N           (number of images, big-endian u32)
/// bytes  8-11:  rows        (image height in pixels, big-endian u32)
/// bytes 12-15:  cols        (image width in pixels, big-endian u32)
/// bytes 16..:   N * rows * cols bytes, row-major, uint8
/// ```
///
/// Returns `(images, rows, cols)`, each pixel divided by 255.0 so values lie
/// in `[0.0, 1.0]`.
pub fn parse_images(bytes: &[u8]) -> Result<(Vec<Vec<f64>>, usize, usize), String> {
    if bytes.len() < 16 {
        return Err(format!(
            "IDX image file too short: expected at least 16 header bytes, got {}.",
            bytes.len()
        ));
    }

    if bytes[0] != 0x00 || bytes[1] != 0x00 {
        return Err(format!(
            "IDX image file: bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}.",
            bytes[0], bytes[1]
        ));
    }
    if bytes[2] != 0x08 {
        return Err(format!(
            "IDX image file: byte 2 (dtype) must be 0x08 (uint8), got 0x{:02X}.",
            bytes[2]
        ));
    }
    if bytes[3] != 0x03 {
        return Err(format!(
            "IDX image file: byte 3 (dimensions) must be 3, got {}. \
             This does not appear to be an IDX3 image file.",
            bytes[3]
        ));
    }

    let n_items = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    let rows = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let cols = u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]) as usize;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        format!("IDX image file: rows * cols overflows usize (rows={}, cols={}).", rows, cols)
    })?;
    let data_len = n_items.checked_mul(n_pixels).ok_or_else(|| {
        format!(
            "IDX image file: n_items * n_pixels overflows usize (n_items={}, n_pixels={}).",
            n_items, n_pixels
        )
    })?;
    let required_len = 16_usize
        .checked_add(data_len)
        .ok_or_else(|| "IDX image file: data length overflows usize.".to_owned())?;

    if bytes.len() < required_len {
        return Err(format!(
            "IDX image file too short: header declares {} items of {}×{} pixels \
             ({} data bytes needed after header), but file is only {} bytes total.",
            n_items, rows, cols, data_len,
            bytes.len()
        ));
    }

    let images: Vec<Vec<f64>> = bytes[16..16 + data_len]
        .chunks_exact(n_pixels)
        .map(|chunk| chunk.iter().map(|&px| px as f64 / 255.0).collect())
        .collect();

    Ok((images, rows, cols))
}

/// Parses an IDX1 label file into integer class indices, each checked to be
/// a digit in [0, 10).
///
/// # IDX1 label file layout
/// ```text
/// bytes  0-1:   0x00 0x00   (reserved, must be zero)
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x01        (number of dimensions = 1)
/// bytes  4-7:   N           (number of labels, big-endian u32)
/// bytes  8..:   N bytes, each a class index in [0, 10)
/// ```
pub fn parse_labels(bytes: &[u8]) -> Result<Vec<u8>, String> {
    if bytes.len() < 8 {
        return Err(format!(
            "IDX label file too short: expected at least 8 header bytes, got {}.",
            bytes.len()
        ));
    }

    if bytes[0] != 0x00 || bytes[1] != 0x00 {
        return Err(format!(
            "IDX label file: bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}.",
            bytes[0], bytes[1]
        ));
    }
    if bytes[2] != 0x08 {
        return Err(format!(
            "IDX label file: byte 2 (dtype) must be 0x08 (uint8), got 0x{:02X}.",
            bytes[2]
        ));
    }
    if bytes[3] != 0x01 {
        return Err(format!(
            "IDX label file: byte 3 (dimensions) must be 1, got {}. \
             This does not appear to be an IDX1 label file.",
            bytes[3]
        ));
    }

    let n_items = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;

    if bytes.len() < 8 + n_items {
        return Err(format!(
            "IDX label file too short: header declares {} labels but file is only {} bytes \
             (need at least {} bytes).",
            n_items, bytes.len(), 8 + n_items
        ));
    }

    let labels = bytes[8..8 + n_items].to_vec();
    for (i, &label) in labels.iter().enumerate() {
        if label >= 10 {
            return Err(format!(
                "IDX label at index {}: class index {} is out of range for digits 0-9.",
                i, label
            ));
        }
    }

    Ok(labels)
}

impl MnistSet {
    /// Reads and parses an image/label file pair from disk.
    pub fn load(images_path: &str, labels_path: &str) -> Result<MnistSet, String> {
        let image_bytes = std::fs::read(images_path)
            .map_err(|e| format!("Cannot read image file '{}': {}", images_path, e))?;
        let label_bytes = std::fs::read(labels_path)
            .map_err(|e| format!("Cannot read label file '{}': {}", labels_path, e))?;
        MnistSet::from_bytes(&image_bytes, &label_bytes)
    }

    /// Parses an already-loaded image/label byte pair.
    pub fn from_bytes(image_bytes: &[u8], label_bytes: &[u8]) -> Result<MnistSet, String> {
        let (images, rows, cols) = parse_images(image_bytes)?;
        let labels = parse_labels(label_bytes)?;

        if images.len() != labels.len() {
            return Err(format!(
                "IDX file mismatch: image file declares {} items but label file declares {}.",
                images.len(),
                labels.len()
            ));
        }

        Ok(MnistSet { images, labels, rows, cols })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns one sample as `(flattened normalized pixels, label)`.
    pub fn get(&self, idx: usize) -> Option<(&[f64], u8)> {
        let pixels = self.images.get(idx)?;
        let label = *self.labels.get(idx)?;
        Some((pixels.as_slice(), label))
    }

    /// Picks a uniformly random sample index. Returns `None` for an empty set.
    pub fn random_index<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Builds a valid IDX3 byte buffer of `n` images of `rows × cols` pixels,
    /// pixel value = image index (mod 256).
    fn idx3_bytes(n: u32, rows: u32, cols: u32) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x08, 0x03];
        bytes.extend_from_slice(&n.to_be_bytes());
        bytes.extend_from_slice(&rows.to_be_bytes());
        bytes.extend_from_slice(&cols.to_be_bytes());
        for i in 0..n {
            bytes.extend(std::iter::repeat((i % 256) as u8).take((rows * cols) as usize));
        }
        bytes
    }

    fn idx1_bytes(labels: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x08, 0x01];
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn parse_images_normalizes_pixels_to_unit_range() {
        let mut bytes = idx3_bytes(1, 2, 2);
        let data_start = bytes.len() - 4;
        bytes[data_start..].copy_from_slice(&[0, 51, 204, 255]);

        let (images, rows, cols) = parse_images(&bytes).unwrap();
        assert_eq!((rows, cols), (2, 2));
        assert_eq!(images.len(), 1);
        assert_eq!(images[0][0], 0.0);
        assert_eq!(images[0][3], 1.0);
        assert!((images[0][1] - 51.0 / 255.0).abs() < 1e-12);
        assert!((images[0][2] - 204.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn parse_images_rejects_wrong_magic() {
        let mut bytes = idx3_bytes(1, 2, 2);
        bytes[3] = 0x01;
        let err = parse_images(&bytes).unwrap_err();
        assert!(err.contains("IDX3"));
    }

    #[test]
    fn parse_images_rejects_header_whose_length_overflows() {
        // n_items * rows * cols = (2³² − 1)(2³² + 1) = 2⁶⁴ − 1: both products
        // fit in usize, but adding the 16 header bytes would wrap.
        let mut bytes = vec![0x00, 0x00, 0x08, 0x03];
        bytes.extend_from_slice(&u32::MAX.to_be_bytes());
        bytes.extend_from_slice(&641u32.to_be_bytes());
        bytes.extend_from_slice(&6_700_417u32.to_be_bytes());

        let err = parse_images(&bytes).unwrap_err();
        assert!(err.contains("overflows"));
    }

    #[test]
    fn parse_images_rejects_truncated_data() {
        let mut bytes = idx3_bytes(2, 3, 3);
        bytes.truncate(bytes.len() - 1);
        assert!(parse_images(&bytes).unwrap_err().contains("too short"));
    }

    #[test]
    fn parse_labels_reads_class_indices() {
        let bytes = idx1_bytes(&[0, 3, 9]);
        assert_eq!(parse_labels(&bytes).unwrap(), vec![0, 3, 9]);
    }

    #[test]
    fn parse_labels_rejects_out_of_range_class() {
        let bytes = idx1_bytes(&[4, 12]);
        let err = parse_labels(&bytes).unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn from_bytes_rejects_count_mismatch() {
        let images = idx3_bytes(3, 2, 2);
        let labels = idx1_bytes(&[1, 2]);
        let err = MnistSet::from_bytes(&images, &labels).unwrap_err();
        assert!(err.contains("mismatch"));
    }

    #[test]
    fn get_pairs_pixels_with_label() {
        let images = idx3_bytes(2, 2, 2);
        let labels = idx1_bytes(&[7, 1]);
        let set = MnistSet::from_bytes(&images, &labels).unwrap();

        assert_eq!(set.len(), 2);
        let (pixels, label) = set.get(1).unwrap();
        assert_eq!(pixels.len(), 4);
        assert_eq!(label, 1);
        assert!(set.get(2).is_none());
    }

    #[test]
    fn random_index_stays_in_bounds() {
        let images = idx3_bytes(5, 1, 1);
        let labels = idx1_bytes(&[0, 1, 2, 3, 4]);
        let set = MnistSet::from_bytes(&images, &labels).unwrap();

        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let idx = set.random_index(&mut rng).unwrap();
            assert!(idx < set.len());
        }
    }
}
