use crate::{
    catalog::discover::Catalog,
    foundation::error::{LayermintError, LayermintResult},
    render::{
        decode::{LayerImage, encode_png},
        source::LayerSource,
    },
    sample::universe::Combination,
};

/// One straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over on straight RGBA8.
///
/// `out.a = src.a + dst.a * (1 - src.a)` and each color channel is the alpha-weighted mean of
/// `src` and `dst`, rounded once.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let sa = u32::from(sa);
            // Both weights are scaled by 255 so the division happens once per channel.
            let src_w = sa * 255;
            let dst_w = u32::from(dst[3]) * (255 - sa);
            let total = src_w + dst_w;
            let mut out = [0u8; 4];
            for i in 0..3 {
                let c = u32::from(src[i]) * src_w + u32::from(dst[i]) * dst_w;
                out[i] = ((c + total / 2) / total) as u8;
            }
            out[3] = ((total + 127) / 255) as u8;
            out
        }
    }
}

/// Composite `src` over `dst` pixel by pixel. Buffers must have equal rgba8 lengths.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> LayermintResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(LayermintError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Final composited image in straight RGBA8.
pub struct Artwork {
    /// Width in pixels; equals the background layer's width.
    pub width: u32,
    /// Height in pixels; equals the background layer's height.
    pub height: u32,
    /// Row-major straight RGBA8.
    pub rgba8: Vec<u8>,
}

impl Artwork {
    /// Encode as PNG bytes.
    pub fn to_png(&self) -> LayermintResult<Vec<u8>> {
        encode_png(self.width, self.height, &self.rgba8)
    }
}

/// Stack `layers` bottom to top. The first layer is the canvas; every other layer must
/// share its dimensions.
pub fn composite_layers<'a, I>(layers: I) -> LayermintResult<Artwork>
where
    I: IntoIterator<Item = (&'a str, &'a LayerImage)>,
{
    let mut layers = layers.into_iter();
    let (_, base) = layers
        .next()
        .ok_or_else(|| LayermintError::render("nothing to composite"))?;

    let (width, height) = (base.width, base.height);
    let mut canvas = base.rgba8.as_ref().clone();

    for (name, layer) in layers {
        if (layer.width, layer.height) != (width, height) {
            return Err(LayermintError::render(format!(
                "layer '{name}' is {}x{} but the background is {width}x{height}",
                layer.width, layer.height
            )));
        }
        over_in_place(&mut canvas, &layer.rgba8)?;
    }

    Ok(Artwork {
        width,
        height,
        rgba8: canvas,
    })
}

/// Load every option of `combination` from `source` and stack them in layer order.
pub fn render_combination(
    catalog: &Catalog,
    combination: &Combination,
    source: &mut dyn LayerSource,
) -> LayermintResult<Artwork> {
    let options = combination.resolve(catalog)?;

    let mut loaded = Vec::with_capacity(options.len());
    for (category, option) in catalog.categories().iter().zip(&options) {
        let layer = source.load(&category.name, option)?;
        loaded.push((format!("{}/{}", category.name, option.id), layer));
    }

    composite_layers(loaded.iter().map(|(name, layer)| (name.as_str(), layer)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
