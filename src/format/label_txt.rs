//! Normalized label TXT codec and on-disk layout.
//!
//! One record per line:
//!
//! ```text
//! <color_id> <class_token> <x0> <y0> <x1> <y1> <x2> <y2> <x3> <y3>
//! ```
//!
//! Corners follow the canonical TL/BL/BR/TR order. On write, coordinates are
//! normalized by image width/height and printed with 6 decimals. On read the
//! codec also accepts legacy files with raw pixel coordinates: a record whose
//! largest absolute coordinate exceeds [`NORMALIZED_MAX`] is taken as pixels
//! and passed through unscaled.

use std::path::{Path, PathBuf};

use crate::format::error::LabelError;
use crate::model::{normalize_class_token, Annotation, ColorToken, Point, Size, CORNER_COUNT};

/// Largest absolute coordinate a normalized record may contain. Values in
/// `(1.0, 1.5]` still count as normalized to tolerate slightly out-of-bounds
/// corners from older writers.
pub const NORMALIZED_MAX: f32 = 1.5;

/// Tokens per record: color id, class, four corner pairs.
const TOKENS_PER_RECORD: usize = 2 + 2 * CORNER_COUNT;

/// A line the decoder skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    /// 1-based line number in the input.
    pub line: usize,
    /// Human-readable reason the line was skipped.
    pub reason: String,
}

/// Decoded annotations plus any skipped-line warnings.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub annotations: Vec<Annotation>,
    pub warnings: Vec<DecodeWarning>,
}

impl DecodeReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Encode annotations for an image of the given size.
///
/// Fails only on a zero image dimension; annotations themselves are always
/// encodable.
pub fn encode(annotations: &[Annotation], image_size: Size) -> Result<String, LabelError> {
    if !image_size.is_valid() {
        return Err(LabelError::invalid_image_size(
            image_size.width,
            image_size.height,
        ));
    }
    let w = image_size.width as f32;
    let h = image_size.height as f32;
    let mut out = String::new();
    for ann in annotations {
        out.push_str(&format!("{} {}", ann.color.id(), ann.class_token));
        for corner in &ann.corners {
            out.push_str(&format!(" {:.6} {:.6}", corner.x / w, corner.y / h));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Decode label file content against an image size.
///
/// Never fails on content: `#` starts a comment, blank lines are skipped,
/// and any line with the wrong token count or an unparsable number is
/// reported in the returned warnings and skipped.
pub fn decode(content: &str, image_size: Size) -> DecodeReport {
    let mut report = DecodeReport::default();
    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line, image_size) {
            Ok(ann) => report.annotations.push(ann),
            Err(reason) => {
                log::warn!("skipping label line {}: {}", line_no, reason);
                report.warnings.push(DecodeWarning {
                    line: line_no,
                    reason,
                });
            }
        }
    }
    report
}

fn parse_record(line: &str, image_size: Size) -> Result<Annotation, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != TOKENS_PER_RECORD {
        return Err(format!(
            "expected {} tokens, found {}",
            TOKENS_PER_RECORD,
            tokens.len()
        ));
    }

    let color = ColorToken::parse(tokens[0]);
    let class_token = normalize_class_token(tokens[1]);

    let mut coords = [0.0f32; 2 * CORNER_COUNT];
    for (slot, token) in coords.iter_mut().zip(&tokens[2..]) {
        *slot = token
            .parse::<f32>()
            .map_err(|_| format!("unparsable coordinate '{}'", token))?;
    }

    // Legacy files store raw pixels; anything within the normalized range
    // is scaled by the image size instead.
    let max_abs = coords.iter().fold(0.0f32, |m, c| m.max(c.abs()));
    let normalized = max_abs <= NORMALIZED_MAX && image_size.is_valid();

    let (sx, sy) = if normalized {
        (image_size.width as f32, image_size.height as f32)
    } else {
        (1.0, 1.0)
    };
    let corners = [
        Point::new(coords[0] * sx, coords[1] * sy),
        Point::new(coords[2] * sx, coords[3] * sy),
        Point::new(coords[4] * sx, coords[5] * sy),
        Point::new(coords[6] * sx, coords[7] * sy),
    ];

    Ok(Annotation::new(class_token, color, corners))
}

/// Path of the label file for an image: a `label/` directory next to the
/// image's own directory, same stem, `.txt` extension.
///
/// `dataset/images/frame_0042.png` → `dataset/label/frame_0042.txt`.
pub fn label_path_for_image(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("label");
    let image_dir = image_path.parent().unwrap_or_else(|| Path::new("."));
    let dataset_dir = image_dir.parent().unwrap_or_else(|| Path::new("."));
    dataset_dir.join("label").join(format!("{}.txt", stem))
}

/// Encode and write the label file, creating the `label/` directory if
/// needed. The file is truncated on each write.
pub fn write_label_file(
    path: &Path,
    annotations: &[Annotation],
    image_size: Size,
) -> Result<(), LabelError> {
    let content = encode(annotations, image_size)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, content)?;
    log::info!("wrote {} labels to {:?}", annotations.len(), path);
    Ok(())
}

/// Read and decode a label file. A missing file is an empty set, not an
/// error; other I/O failures are.
pub fn read_label_file(path: &Path, image_size: Size) -> Result<DecodeReport, LabelError> {
    if !path.exists() {
        log::debug!("no label file at {:?}", path);
        return Ok(DecodeReport::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(decode(&content, image_size))
}
