use std::hash::{DefaultHasher, Hash as _, Hasher as _};

/// Stable color for a tag, so the same tag looks the same everywhere.
pub fn tag_color(tag: &str) -> String {
    let mut hasher = DefaultHasher::new();
    tag.to_lowercase().hash(&mut hasher);
    color_from_hash(hasher.finish())
}

pub fn color_from_hash(hash: u64) -> String {
    let hue = hash % 360;
    // Saturation 55-75%, lightness 35-50%: readable white text on top.
    let saturation = 55 + ((hash >> 16) % 21);
    let lightness = 35 + ((hash >> 32) % 16);
    format!("hsl({hue}, {saturation}%, {lightness}%)")
}
