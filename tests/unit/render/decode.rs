use super::*;

#[test]
fn decode_layer_png_keeps_straight_pixels() {
    let png = encode_png(1, 1, &[100, 50, 200, 128]).unwrap();

    let layer = decode_layer(&png).unwrap();
    assert_eq!(layer.width, 1);
    assert_eq!(layer.height, 1);
    assert_eq!(layer.rgba8.as_slice(), &[100, 50, 200, 128]);
}

#[test]
fn decode_layer_rejects_garbage() {
    let err = decode_layer(b"not an image").unwrap_err();
    assert!(matches!(err, LayermintError::Render(_)));
}

#[test]
fn from_rgba8_checks_buffer_length() {
    assert!(LayerImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    let layer = LayerImage::from_rgba8(1, 1, vec![200, 100, 50, 1]).unwrap();
    assert_eq!(layer.rgba8.as_slice(), &[200, 100, 50, 1]);
}

#[test]
fn encode_png_rejects_mismatched_buffer() {
    assert!(encode_png(2, 2, &[0; 4]).is_err());
}
