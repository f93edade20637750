//! Texture atlas resource types
//!
//! An [`Atlas`] is the parsed form of one descriptor: the image it refers to
//! plus a set of named [`Texture`] regions. Pixel data is not touched here;
//! the renderer uploads `image_path` and samples the regions.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use super::descriptor::AtlasParser;
use crate::assets::{Asset, AssetError};

/// Axis-aligned rectangle in atlas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Named sub-texture of an atlas
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    name: String,
    region: Rectangle,
    frame: Option<Rectangle>,
    rotated: bool,
}

impl Texture {
    /// Texture name as written in the descriptor
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region inside the atlas image
    pub fn region(&self) -> Rectangle {
        self.region
    }

    /// Untrimmed frame, if whitespace was trimmed when the atlas was packed
    pub fn frame(&self) -> Option<Rectangle> {
        self.frame
    }

    /// Whether the region is stored rotated by 90 degrees
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Logical width, including any trimmed border
    pub fn width(&self) -> f32 {
        self.frame.map_or(self.region.width, |f| f.width)
    }

    /// Logical height, including any trimmed border
    pub fn height(&self) -> f32 {
        self.frame.map_or(self.region.height, |f| f.height)
    }
}

/// Immutable set of named textures loaded from one descriptor
#[derive(Debug, Clone)]
pub struct Atlas {
    image_path: String,
    /// Textures in natural name order
    textures: Vec<Arc<Texture>>,
    /// Name -> index into `textures`
    index: HashMap<String, usize>,
}

impl Atlas {
    /// Parse an atlas from descriptor text
    pub fn from_descriptor(contents: &str) -> Result<Self, AssetError> {
        let data = AtlasParser::parse(contents).map_err(AssetError::InvalidData)?;

        let mut textures: Vec<Arc<Texture>> = data
            .sub_textures
            .into_iter()
            .map(|sub| {
                Arc::new(Texture {
                    name: sub.name,
                    region: sub.region,
                    frame: sub.frame,
                    rotated: sub.rotated,
                })
            })
            .collect();
        textures.sort_by(|a, b| natural_cmp(&a.name, &b.name).then_with(|| a.name.cmp(&b.name)));

        let index = textures
            .iter()
            .enumerate()
            .map(|(i, texture)| (texture.name.clone(), i))
            .collect();

        Ok(Self {
            image_path: data.image_path,
            textures,
            index,
        })
    }

    /// Image file the regions refer to
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Number of textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the atlas holds no textures
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture with exactly this name
    pub fn texture_named(&self, name: &str) -> Option<&Arc<Texture>> {
        self.index.get(name).map(|&i| &self.textures[i])
    }

    /// All textures whose name starts with `prefix`, in natural name order
    pub fn textures_with_prefix(&self, prefix: &str) -> Vec<Arc<Texture>> {
        self.textures
            .iter()
            .filter(|texture| texture.name.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// All texture names, in natural name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.textures.iter().map(|texture| texture.name.as_str())
    }
}

impl Asset for Atlas {
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let contents = std::str::from_utf8(bytes)
            .map_err(|e| AssetError::InvalidData(format!("Descriptor is not UTF-8: {}", e)))?;
        Self::from_descriptor(contents)
    }
}

/// Compare names so that embedded numbers sort by value ("frame_2" < "frame_10")
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let a_num = take_digits(&mut a_chars);
                let b_num = take_digits(&mut b_chars);
                let a_trimmed = a_num.trim_start_matches('0');
                let b_trimmed = b_num.trim_start_matches('0');
                let ordering = a_trimmed
                    .len()
                    .cmp(&b_trimmed.len())
                    .then_with(|| a_trimmed.cmp(b_trimmed))
                    .then_with(|| a_num.len().cmp(&b_num.len()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a_chars.next();
                b_chars.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}
