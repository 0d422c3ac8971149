/// OBJ geometry file parser
use log::info;
use nalgebra::{Point2, Point3, Vector3};
use nom::{
    character::complete::{char, i64, multispace0, multispace1},
    combinator::opt,
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{Face, FaceCorner, Model};
use crate::mtl::{self, Material};
use crate::texture::{TextureCache, TextureUpload};

/// Options for one model load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Reorder vertex and normal components to `(x, z, y)`, for assets
    /// authored with a different up axis.
    pub swap_yz: bool,
    /// Treat a missing or undecodable texture as a fatal load error
    /// instead of degrading to the no-texture sentinel.
    pub strict_textures: bool,
}

/// Load an OBJ file into a compiled [`Model`].
///
/// Material libraries referenced by `mtllib` are resolved relative to the
/// object file's directory; their textures go through the session cache.
/// Any syntax error fails the whole load with the file and line.
pub fn load_model<U: TextureUpload>(
    path: &Path,
    options: &LoadOptions,
    cache: &mut TextureCache<U>,
) -> Result<Model> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    parse_obj_source(&source, path, base_dir, options, cache)
}

fn parse_obj_source<U: TextureUpload>(
    source: &str,
    path: &Path,
    base_dir: &Path,
    options: &LoadOptions,
    cache: &mut TextureCache<U>,
) -> Result<Model> {
    let mut vertices: Vec<Point3<f32>> = Vec::new();
    let mut normals: Vec<Vector3<f32>> = Vec::new();
    let mut tex_coords: Vec<Point2<f32>> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();
    let mut face_lines: Vec<usize> = Vec::new();
    let mut materials: HashMap<String, Material> = HashMap::new();
    let mut current_material: Option<String> = None;

    for (index, raw_line) in source.lines().enumerate() {
        let number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (directive, rest) = match line.split_once(|c: char| c.is_whitespace()) {
            Some((directive, rest)) => (directive, rest),
            None => (line, ""),
        };

        match directive {
            "v" => {
                let (x, y, z) = parse_triple(rest)
                    .map_err(|_| Error::parse(path, number, format!("malformed vertex: {}", line)))?;
                vertices.push(if options.swap_yz {
                    Point3::new(x, z, y)
                } else {
                    Point3::new(x, y, z)
                });
            }
            "vn" => {
                let (x, y, z) = parse_triple(rest)
                    .map_err(|_| Error::parse(path, number, format!("malformed normal: {}", line)))?;
                normals.push(if options.swap_yz {
                    Vector3::new(x, z, y)
                } else {
                    Vector3::new(x, y, z)
                });
            }
            "vt" => {
                // Only the first two components, even when a third is present.
                let (u, v) = parse_pair(rest).map_err(|_| {
                    Error::parse(path, number, format!("malformed texture coordinate: {}", line))
                })?;
                tex_coords.push(Point2::new(u, v));
            }
            "usemtl" | "usemat" => {
                let name = rest
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| Error::parse(path, number, "usemtl without a name"))?;
                current_material = Some(name.to_string());
            }
            "mtllib" => {
                // One directive may name several libraries.
                let names: Vec<&str> = rest.split_whitespace().collect();
                if names.is_empty() {
                    return Err(Error::parse(path, number, "mtllib without a file name"));
                }
                for name in names {
                    let library = mtl::parse_mtl(&base_dir.join(name), options, cache)?;
                    materials.extend(library);
                }
            }
            "f" => {
                let face = parse_face(rest, current_material.clone())
                    .map_err(|message| Error::parse(path, number, message))?;
                faces.push(face);
                face_lines.push(number);
            }
            // Unknown directives are ignored for forward compatibility.
            _ => {}
        }
    }

    validate_indices(path, &faces, &face_lines, vertices.len(), tex_coords.len(), normals.len())?;

    info!(
        "loaded model {}: {} vertices, {} normals, {} faces, {} materials",
        path.display(),
        vertices.len(),
        normals.len(),
        faces.len(),
        materials.len()
    );

    Ok(Model::new(vertices, normals, tex_coords, faces, materials))
}

/// Parse one face corner: `v`, `v/t`, `v//n` or `v/t/n`, 1-based.
/// Slots left empty (trailing slashes included) are absent attributes.
fn parse_corner(input: &str) -> IResult<&str, (i64, Option<i64>, Option<i64>)> {
    let (input, vertex) = i64(input)?;
    let (input, rest) = opt(preceded(
        char('/'),
        tuple((opt(i64), opt(preceded(char('/'), opt(i64))))),
    ))(input)?;

    let (tex_coord, normal) = match rest {
        Some((tex_coord, normal)) => (tex_coord, normal.flatten()),
        None => (None, None),
    };
    Ok((input, (vertex, tex_coord, normal)))
}

fn parse_face(rest: &str, material: Option<String>) -> std::result::Result<Face, String> {
    let mut corners = Vec::new();

    for token in rest.split_whitespace() {
        let (remaining, (vertex, tex_coord, normal)) = parse_corner(token)
            .map_err(|_| format!("invalid face corner: {}", token))?;
        if !remaining.is_empty() {
            return Err(format!("invalid face corner: {}", token));
        }

        corners.push(FaceCorner {
            vertex: to_zero_based(vertex).ok_or_else(|| format!("invalid face corner: {}", token))?,
            tex_coord: convert_optional(tex_coord, token)?,
            normal: convert_optional(normal, token)?,
        });
    }

    if corners.len() < 3 {
        return Err(format!("face has {} corners, need at least 3", corners.len()));
    }

    Ok(Face { corners, material })
}

fn to_zero_based(index: i64) -> Option<usize> {
    if index >= 1 {
        Some((index - 1) as usize)
    } else {
        None
    }
}

fn convert_optional(index: Option<i64>, token: &str) -> std::result::Result<Option<usize>, String> {
    match index {
        Some(index) => to_zero_based(index)
            .map(Some)
            .ok_or_else(|| format!("invalid face corner: {}", token)),
        None => Ok(None),
    }
}

fn parse_triple(input: &str) -> std::result::Result<(f32, f32, f32), ()> {
    fn inner(input: &str) -> IResult<&str, (f32, f32, f32)> {
        let (input, _) = multispace0(input)?;
        let (input, x) = float(input)?;
        let (input, _) = multispace1(input)?;
        let (input, y) = float(input)?;
        let (input, _) = multispace1(input)?;
        let (input, z) = float(input)?;
        Ok((input, (x, y, z)))
    }

    inner(input).map(|(_, triple)| triple).map_err(|_| ())
}

fn parse_pair(input: &str) -> std::result::Result<(f32, f32), ()> {
    fn inner(input: &str) -> IResult<&str, (f32, f32)> {
        let (input, _) = multispace0(input)?;
        let (input, u) = float(input)?;
        let (input, _) = multispace1(input)?;
        let (input, v) = float(input)?;
        Ok((input, (u, v)))
    }

    inner(input).map(|(_, pair)| pair).map_err(|_| ())
}

fn validate_indices(
    path: &Path,
    faces: &[Face],
    face_lines: &[usize],
    vertex_count: usize,
    tex_coord_count: usize,
    normal_count: usize,
) -> Result<()> {
    for (face, &line) in faces.iter().zip(face_lines) {
        for corner in &face.corners {
            if corner.vertex >= vertex_count {
                return Err(Error::parse(
                    path,
                    line,
                    format!("vertex index {} out of range (pool has {})", corner.vertex + 1, vertex_count),
                ));
            }
            if let Some(index) = corner.tex_coord {
                if index >= tex_coord_count {
                    return Err(Error::parse(
                        path,
                        line,
                        format!("texture coordinate index {} out of range (pool has {})", index + 1, tex_coord_count),
                    ));
                }
            }
            if let Some(index) = corner.normal {
                if index >= normal_count {
                    return Err(Error::parse(
                        path,
                        line,
                        format!("normal index {} out of range (pool has {})", index + 1, normal_count),
                    ));
                }
            }
        }
    }

    Ok(())
}
