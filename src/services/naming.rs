use halftone::{ProcessingConfig, RenderMode};
use std::path::Path;

/// Output file name for a render of `stem` with `config`.
///
/// `{stem}_GS{num_colors}_DIV{divisions}` followed by `_smooth`,
/// `_contrast`, `_color`, `_inv` and `_x{factor}` for the options that are
/// on, then `.png`.
pub fn output_filename(stem: &str, config: &ProcessingConfig) -> String {
    let mut name = format!(
        "{}_GS{}_DIV{}",
        stem,
        config.num_colors,
        config.divisions()
    );
    if config.smoothing {
        name.push_str("_smooth");
    }
    if config.enhance_contrast {
        name.push_str("_contrast");
    }
    if config.mode == RenderMode::Color {
        name.push_str("_color");
    }
    if config.invert {
        name.push_str("_inv");
    }
    if config.upscale_factor > 1 {
        name.push_str(&format!("_x{}", config.upscale_factor));
    }
    name.push_str(".png");
    name
}

/// File stem of an input path, `image` when it has none.
pub fn input_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image")
        .to_string()
}

/// Stem of an uploaded file name, reduced to `[A-Za-z0-9._-]`.
///
/// Directory components are dropped and every other character becomes `_`,
/// so the result is safe to use in a path or a `Content-Disposition` header.
pub fn upload_stem(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem: String = input_stem(Path::new(base))
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "image".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_name_uses_num_colors_as_divisions() {
        let config = ProcessingConfig::new().num_colors(6);
        assert_eq!(output_filename("cat", &config), "cat_GS6_DIV6.png");
    }

    #[test]
    fn test_explicit_grid_and_flags() {
        let config = ProcessingConfig::new()
            .num_colors(4)
            .grid_size(32)
            .smoothing(1.5)
            .enhance_contrast(2.0, 98.0);
        assert_eq!(
            output_filename("cat", &config),
            "cat_GS4_DIV32_smooth_contrast.png"
        );
    }

    #[test]
    fn test_extended_suffixes() {
        let config = ProcessingConfig::new()
            .grid_size(10)
            .color(4)
            .invert(true)
            .upscale_factor(2);
        assert_eq!(
            output_filename("dog", &config),
            "dog_GS5_DIV10_color_inv_x2.png"
        );
    }

    #[test]
    fn test_input_stem() {
        assert_eq!(input_stem(&PathBuf::from("/tmp/photos/beach.jpeg")), "beach");
        assert_eq!(input_stem(&PathBuf::from("archive.tar.png")), "archive.tar");
        assert_eq!(input_stem(&PathBuf::from("/")), "image");
    }

    #[test]
    fn test_upload_stem_is_sanitized() {
        assert_eq!(upload_stem("My Photo (1).JPG"), "My_Photo__1_");
        assert_eq!(upload_stem("../../etc/passwd.png"), "passwd");
        assert_eq!(upload_stem("C:\\Users\\me\\cat.png"), "cat");
        assert_eq!(upload_stem("say\"hi\".png"), "say_hi_");
        assert_eq!(upload_stem("..png"), "image");
    }
}
