/// Model data produced by the geometry parser
use nalgebra::{Point2, Point3, Vector3};
use std::collections::HashMap;

use crate::draw::DrawList;
use crate::mtl::Material;

/// One corner of a face: indices into the model's pools, 0-based.
///
/// Texture coordinate and normal are optional because the source format
/// allows `v`, `v/t`, `v//n` and `v/t/n` corner forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCorner {
    pub vertex: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

/// A polygon face with 3 or more corners, in winding order.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub corners: Vec<FaceCorner>,
    /// Material name from the most recent `usemtl`, if any.
    pub material: Option<String>,
}

/// A fully loaded, immutable model.
///
/// The pools are frozen at the end of parsing; faces index into them.
/// The compiled draw list is built once from the frozen data and replaced
/// wholesale if the model is ever reloaded.
#[derive(Debug, PartialEq)]
pub struct Model {
    pub vertices: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub tex_coords: Vec<Point2<f32>>,
    pub faces: Vec<Face>,
    pub materials: HashMap<String, Material>,
    draw: DrawList,
}

impl Model {
    pub(crate) fn new(
        vertices: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        tex_coords: Vec<Point2<f32>>,
        faces: Vec<Face>,
        materials: HashMap<String, Material>,
    ) -> Self {
        let draw = DrawList::compile(&vertices, &normals, &tex_coords, &faces, &materials);

        Self {
            vertices,
            normals,
            tex_coords,
            faces,
            materials,
            draw,
        }
    }

    /// The compiled draw sequence, replayed by the renderer once per frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }
}
