//! Stimulus offset catalog.

/// One catalog entry: a horizontal offset in both unit systems
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub offset_cm: f64,
    pub offset_px: i32,
}

/// Build the fixed presentation catalog: center first, then `+m, -m` for
/// each configured magnitude, in configuration order. The catalog is
/// deliberately not shuffled.
///
/// Pixel offsets round to the nearest pixel.
pub fn build_catalog(magnitudes_cm: &[f64], cm_to_pixel: f64) -> Vec<CatalogEntry> {
    let mut offsets_cm = Vec::with_capacity(1 + magnitudes_cm.len() * 2);
    offsets_cm.push(0.0);
    for magnitude in magnitudes_cm {
        offsets_cm.push(*magnitude);
        offsets_cm.push(-magnitude);
    }

    offsets_cm
        .into_iter()
        .map(|offset_cm| CatalogEntry {
            offset_cm,
            offset_px: (offset_cm * cm_to_pixel).round() as i32,
        })
        .collect()
}
