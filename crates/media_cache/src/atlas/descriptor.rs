//! Texture atlas descriptor parser
//!
//! Parses Sparrow/Starling `TextureAtlas` XML files:
//!
//! ```xml
//! <TextureAtlas imagePath="atlas.png">
//!     <SubTexture name="hero_1" x="0" y="0" width="32" height="48"/>
//!     <SubTexture name="hero_2" x="32" y="0" width="30" height="48"
//!                 frameX="-1" frameY="0" frameWidth="32" frameHeight="48" rotated="true"/>
//! </TextureAtlas>
//! ```
//!
//! Only the subset of XML these files use is understood: elements with
//! quoted attributes, comments, the `<?xml ?>` prolog, the five
//! predefined entities and numeric character references.

use std::collections::HashSet;

use super::Rectangle;

/// Parsed `SubTexture` element
#[derive(Debug, Clone, PartialEq)]
pub struct SubTextureData {
    /// Texture name
    pub name: String,
    /// Region inside the atlas image
    pub region: Rectangle,
    /// Untrimmed frame, if the texture was trimmed when packed
    pub frame: Option<Rectangle>,
    /// Whether the region is stored rotated by 90 degrees
    pub rotated: bool,
}

/// Parsed descriptor contents
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasData {
    /// Image file the regions refer to
    pub image_path: String,
    /// Sub-textures in document order
    pub sub_textures: Vec<SubTextureData>,
}

/// One start or end tag
struct Tag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, String)>,
    closing: bool,
}

impl Tag<'_> {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Atlas descriptor parser
pub struct AtlasParser;

impl AtlasParser {
    /// Parse descriptor contents
    ///
    /// # Returns
    /// The atlas image path and every sub-texture, or a message describing
    /// the first problem found
    pub fn parse(contents: &str) -> Result<AtlasData, String> {
        let tags = Self::tokenize(contents)?;
        let mut tags = tags.iter().filter(|tag| !tag.closing);

        let root = tags.next().ok_or("Missing TextureAtlas element")?;
        if root.name != "TextureAtlas" {
            return Err(format!("Expected TextureAtlas root element, found '{}'", root.name));
        }
        let image_path = root
            .attribute("imagePath")
            .ok_or("TextureAtlas missing imagePath attribute")?
            .to_string();

        let mut names = HashSet::new();
        let mut sub_textures = Vec::new();
        for tag in tags.filter(|tag| tag.name == "SubTexture") {
            let sub_texture = Self::parse_sub_texture(tag)?;
            if !names.insert(sub_texture.name.clone()) {
                return Err(format!("Duplicate SubTexture name '{}'", sub_texture.name));
            }
            sub_textures.push(sub_texture);
        }

        Ok(AtlasData { image_path, sub_textures })
    }

    fn parse_sub_texture(tag: &Tag<'_>) -> Result<SubTextureData, String> {
        let name = tag
            .attribute("name")
            .ok_or("SubTexture missing name attribute")?
            .to_string();

        let region = Rectangle::new(
            Self::parse_f32(tag, &name, "x")?,
            Self::parse_f32(tag, &name, "y")?,
            Self::parse_f32(tag, &name, "width")?,
            Self::parse_f32(tag, &name, "height")?,
        );

        let frame_keys = ["frameX", "frameY", "frameWidth", "frameHeight"];
        let present = frame_keys.iter().filter(|key| tag.attribute(key).is_some()).count();
        let frame = match present {
            0 => None,
            4 => Some(Rectangle::new(
                Self::parse_f32(tag, &name, "frameX")?,
                Self::parse_f32(tag, &name, "frameY")?,
                Self::parse_f32(tag, &name, "frameWidth")?,
                Self::parse_f32(tag, &name, "frameHeight")?,
            )),
            _ => return Err(format!("SubTexture '{}' has an incomplete frame", name)),
        };

        let rotated = match tag.attribute("rotated") {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => return Err(format!("SubTexture '{}': invalid rotated value '{}'", name, other)),
        };

        Ok(SubTextureData { name, region, frame, rotated })
    }

    fn parse_f32(tag: &Tag<'_>, name: &str, key: &str) -> Result<f32, String> {
        let value = tag
            .attribute(key)
            .ok_or_else(|| format!("SubTexture '{}' missing {} attribute", name, key))?;
        value
            .trim()
            .parse::<f32>()
            .map_err(|_| format!("SubTexture '{}': invalid {} value '{}'", name, key, value))
    }

    /// Split the document into tags, skipping text, comments and declarations
    fn tokenize(contents: &str) -> Result<Vec<Tag<'_>>, String> {
        let mut tags = Vec::new();
        let mut rest = contents;

        while let Some(start) = rest.find('<') {
            rest = &rest[start..];

            if let Some(after) = rest.strip_prefix("<!--") {
                let end = after.find("-->").ok_or("Unterminated comment")?;
                rest = &after[end + 3..];
                continue;
            }
            if let Some(after) = rest.strip_prefix("<?") {
                let end = after.find("?>").ok_or("Unterminated declaration")?;
                rest = &after[end + 2..];
                continue;
            }
            if rest.starts_with("<!") {
                let end = rest.find('>').ok_or("Unterminated declaration")?;
                rest = &rest[end + 1..];
                continue;
            }

            let end = Self::find_tag_end(rest).ok_or("Unterminated tag")?;
            tags.push(Self::parse_tag(&rest[1..end])?);
            rest = &rest[end + 1..];
        }

        Ok(tags)
    }

    /// Index of the `>` closing the tag, ignoring any inside quoted values
    fn find_tag_end(tag: &str) -> Option<usize> {
        let mut quote = None;
        for (i, c) in tag.char_indices() {
            match (quote, c) {
                (None, '"' | '\'') => quote = Some(c),
                (Some(q), c) if c == q => quote = None,
                (None, '>') => return Some(i),
                _ => {}
            }
        }
        None
    }

    fn parse_tag(inner: &str) -> Result<Tag<'_>, String> {
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };
        let inner = inner.trim_end();
        let inner = inner.strip_suffix('/').unwrap_or(inner);

        let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
        let name = &inner[..name_end];
        if name.is_empty() {
            return Err("Tag without a name".to_string());
        }

        let attributes = Self::parse_attributes(&inner[name_end..])
            .map_err(|e| format!("<{}>: {}", name, e))?;

        Ok(Tag { name, attributes, closing })
    }

    fn parse_attributes(source: &str) -> Result<Vec<(&str, String)>, String> {
        let mut attributes = Vec::new();
        let mut rest = source.trim_start();

        while !rest.is_empty() {
            let eq = rest
                .find('=')
                .ok_or_else(|| format!("attribute without value near '{}'", rest))?;
            let key = rest[..eq].trim();
            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(format!("malformed attribute near '{}'", rest));
            }

            let value_part = rest[eq + 1..].trim_start();
            let quote = value_part
                .chars()
                .next()
                .filter(|c| *c == '"' || *c == '\'')
                .ok_or_else(|| format!("unquoted value for '{}'", key))?;
            let body = &value_part[1..];
            let end = body
                .find(quote)
                .ok_or_else(|| format!("unterminated value for '{}'", key))?;

            attributes.push((key, Self::unescape(&body[..end])));
            rest = body[end + 1..].trim_start();
        }

        Ok(attributes)
    }

    /// Decode predefined entities and numeric character references
    ///
    /// Anything that is not a recognized reference is kept verbatim.
    fn unescape(value: &str) -> String {
        if !value.contains('&') {
            return value.to_string();
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find('&') {
            out.push_str(&rest[..start]);
            rest = &rest[start..];

            let decoded = rest
                .find(';')
                .and_then(|end| Self::decode_reference(&rest[1..end]).map(|c| (c, end)));
            match decoded {
                Some((c, end)) => {
                    out.push(c);
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn decode_reference(reference: &str) -> Option<char> {
        match reference {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "amp" => Some('&'),
            _ => {
                let number = reference.strip_prefix('#')?;
                let code = match number.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                    None => number.parse::<u32>().ok()?,
                };
                char::from_u32(code)
            }
        }
    }
}
