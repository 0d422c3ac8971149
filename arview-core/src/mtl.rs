/// MTL material library parser
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Error, Result};
use crate::obj::LoadOptions;
use crate::texture::{TextureCache, TextureHandle, TextureUpload};

/// Property keys that reference a texture image.
const TEXTURE_KEYS: &[&str] = &[
    "map_Kd", "map_Ka", "map_Ks", "map_Ns", "map_d", "refl", "bump",
];

/// A material property value.
///
/// Most properties are numeric vectors (colors, shininess). Some are
/// non-numeric by design (e.g. `illum` arguments on exotic exporters,
/// texture file references), so token lists are kept as a typed fallback
/// rather than being silently coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialProperty {
    Scalars(Vec<f32>),
    Text(Vec<String>),
}

/// A named material record from a library file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Raw properties keyed by directive, in key order.
    pub properties: BTreeMap<String, MaterialProperty>,
    /// Resolved texture handle, [`TextureHandle::NONE`] when untextured.
    pub texture: TextureHandle,
}

impl Material {
    /// The diffuse color (`Kd`) as an RGB triple, if present and numeric.
    pub fn diffuse(&self) -> Option<[f32; 3]> {
        match self.properties.get("Kd") {
            Some(MaterialProperty::Scalars(values)) if values.len() >= 3 => {
                Some([values[0], values[1], values[2]])
            }
            _ => None,
        }
    }
}

/// Parse a material library file into named material records.
///
/// Texture references are resolved relative to the library file's own
/// directory and loaded through the session cache. A duplicate `newmtl`
/// name overwrites the earlier record.
pub fn parse_mtl<U: TextureUpload>(
    path: &Path,
    options: &LoadOptions,
    cache: &mut TextureCache<U>,
) -> Result<HashMap<String, Material>> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    parse_mtl_source(&source, path, base_dir, options, cache)
}

fn parse_mtl_source<U: TextureUpload>(
    source: &str,
    path: &Path,
    base_dir: &Path,
    options: &LoadOptions,
    cache: &mut TextureCache<U>,
) -> Result<HashMap<String, Material>> {
    let mut materials: HashMap<String, Material> = HashMap::new();
    let mut current: Option<(String, Material)> = None;

    for (index, raw_line) in source.lines().enumerate() {
        let number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let key = match tokens.next() {
            Some(key) => key,
            None => continue,
        };
        let args: Vec<&str> = tokens.collect();

        if key == "newmtl" {
            let name = args
                .first()
                .ok_or_else(|| Error::parse(path, number, "newmtl without a name"))?;
            // Insert overwrites: duplicate names are last-wins.
            if let Some((finished_name, finished)) = current.take() {
                materials.insert(finished_name, finished);
            }
            current = Some(((*name).to_string(), Material::default()));
            continue;
        }

        let (_, material) = current
            .as_mut()
            .ok_or_else(|| Error::parse(path, number, "property line before first newmtl"))?;

        if TEXTURE_KEYS.contains(&key) {
            let reference = args.first().ok_or_else(|| {
                Error::parse(path, number, format!("{} without a file reference", key))
            })?;
            let texture_path = base_dir.join(reference);

            material
                .properties
                .insert(key.to_string(), text_property(&args));

            let handle = cache.resolve(&texture_path);
            if handle.is_none() && options.strict_textures {
                return Err(Error::TextureLoad(texture_path));
            }
            material.texture = handle;
        } else {
            // Numeric when every token parses, raw text otherwise.
            let parsed: std::result::Result<Vec<f32>, _> =
                args.iter().map(|t| t.parse::<f32>()).collect();

            let value = match parsed {
                Ok(scalars) => MaterialProperty::Scalars(scalars),
                Err(_) => text_property(&args),
            };
            material.properties.insert(key.to_string(), value);
        }
    }

    if let Some((name, material)) = current.take() {
        materials.insert(name, material);
    }

    debug!(
        "parsed material library {}: {} materials",
        path.display(),
        materials.len()
    );

    Ok(materials)
}

fn text_property(args: &[&str]) -> MaterialProperty {
    MaterialProperty::Text(args.iter().map(|a| (*a).to_string()).collect())
}
