use super::*;

fn unsupported() -> image::ImageError {
    image::ImageError::Unsupported(image::error::UnsupportedError::from_format_and_kind(
        image::error::ImageFormatHint::Unknown,
        image::error::UnsupportedErrorKind::Format(image::error::ImageFormatHint::Unknown),
    ))
}

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GifferError::decode(0, None, unsupported())
            .to_string()
            .contains("decode error:")
    );
    assert!(
        GifferError::quantize(0, "x")
            .to_string()
            .contains("quantize error:")
    );
    assert!(
        GifferError::EmptyAnimation
            .to_string()
            .contains("assembly error:")
    );
    assert!(
        GifferError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GifferError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn frame_index_only_for_per_frame_errors() {
    assert_eq!(GifferError::decode(3, None, unsupported()).frame_index(), Some(3));
    assert_eq!(GifferError::quantize(5, "too wide").frame_index(), Some(5));
    assert_eq!(GifferError::EmptyAnimation.frame_index(), None);
    assert_eq!(GifferError::validation("x").frame_index(), None);
}

#[test]
fn decode_keeps_image_error_as_source() {
    use std::error::Error as _;

    let err = GifferError::decode(1, Some(image::ImageFormat::Png), unsupported());
    assert!(err.source().is_some());
    assert!(err.to_string().contains("frame 1"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GifferError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
