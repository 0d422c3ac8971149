/// Compilation of parsed models into a replayable draw sequence
use log::warn;
use nalgebra::{Point2, Point3, Vector3};
use std::collections::{HashMap, HashSet};

use crate::geometry::Face;
use crate::mtl::Material;
use crate::texture::TextureHandle;

/// Flat gray used when a face has no material or names an unknown one.
pub const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Polygon winding for front faces. Draw lists always declare
/// counter-clockwise; the type keeps the replay event explicit for
/// backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
}

/// Render state bound before a face is emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    pub color: [f32; 3],
    pub texture: TextureHandle,
}

impl Default for MaterialState {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            texture: TextureHandle::NONE,
        }
    }
}

/// One face corner with indices resolved into concrete values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawVertex {
    pub position: Point3<f32>,
    pub normal: Option<Vector3<f32>>,
    pub tex_coord: Option<Point2<f32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BindMaterial(MaterialState),
    Polygon(Vec<DrawVertex>),
}

/// Sink for a draw-list replay, implemented by the rendering collaborator.
pub trait DrawBackend {
    fn front_face(&mut self, winding: Winding);
    fn bind_material(&mut self, material: &MaterialState);
    fn polygon(&mut self, corners: &[DrawVertex]);
}

/// A compiled, immutable draw sequence for one model.
///
/// Compilation is a pure function of the model's frozen data. There is no
/// incremental update: a changed model is recompiled wholesale and the
/// superseded list dropped.
#[derive(Debug, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub(crate) fn compile(
        vertices: &[Point3<f32>],
        normals: &[Vector3<f32>],
        tex_coords: &[Point2<f32>],
        faces: &[Face],
        materials: &HashMap<String, Material>,
    ) -> DrawList {
        let mut commands = Vec::with_capacity(faces.len() * 2);
        let mut warned: HashSet<&str> = HashSet::new();

        for face in faces {
            commands.push(DrawCommand::BindMaterial(material_state(
                face,
                materials,
                &mut warned,
            )));

            let mut corners = Vec::with_capacity(face.corners.len());
            for corner in &face.corners {
                let position = match vertices.get(corner.vertex) {
                    Some(position) => *position,
                    None => continue,
                };

                corners.push(DrawVertex {
                    position,
                    normal: corner.normal.and_then(|i| normals.get(i)).copied(),
                    tex_coord: corner.tex_coord.and_then(|i| tex_coords.get(i)).copied(),
                });
            }

            commands.push(DrawCommand::Polygon(corners));
        }

        DrawList { commands }
    }

    /// Replay the sequence into a backend, once per frame.
    ///
    /// Emits the fixed counter-clockwise front-face winding first, then
    /// for every face a material bind followed by its polygon, in the
    /// original face order.
    pub fn replay<B: DrawBackend>(&self, backend: &mut B) {
        backend.front_face(Winding::CounterClockwise);

        for command in &self.commands {
            match command {
                DrawCommand::BindMaterial(material) => backend.bind_material(material),
                DrawCommand::Polygon(corners) => backend.polygon(corners),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn material_state<'a>(
    face: &'a Face,
    materials: &HashMap<String, Material>,
    warned: &mut HashSet<&'a str>,
) -> MaterialState {
    let name = match &face.material {
        Some(name) => name,
        None => return MaterialState::default(),
    };

    match materials.get(name) {
        Some(material) => MaterialState {
            color: material.diffuse().unwrap_or(DEFAULT_COLOR),
            texture: material.texture,
        },
        None => {
            if warned.insert(name) {
                warn!("face references undefined material '{}', using default", name);
            }
            MaterialState::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, PartialEq)]
    pub enum Event {
        FrontFace(Winding),
        Bind(MaterialState),
        Polygon(Vec<DrawVertex>),
    }

    /// Backend that records the replayed commands for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        pub events: Vec<Event>,
    }

    impl DrawBackend for RecordingBackend {
        fn front_face(&mut self, winding: Winding) {
            self.events.push(Event::FrontFace(winding));
        }

        fn bind_material(&mut self, material: &MaterialState) {
            self.events.push(Event::Bind(*material));
        }

        fn polygon(&mut self, corners: &[DrawVertex]) {
            self.events.push(Event::Polygon(corners.to_vec()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Event, RecordingBackend};
    use super::*;
    use crate::geometry::FaceCorner;
    use crate::mtl::MaterialProperty;

    fn quad_pools() -> (Vec<Point3<f32>>, Vec<Face>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let corners = (0..4)
            .map(|vertex| FaceCorner {
                vertex,
                tex_coord: None,
                normal: None,
            })
            .collect();
        let faces = vec![Face {
            corners,
            material: None,
        }];

        (vertices, faces)
    }

    #[test]
    fn test_quad_compiles_to_bind_and_polygon() {
        let (vertices, faces) = quad_pools();
        let list = DrawList::compile(&vertices, &[], &[], &faces, &HashMap::new());

        assert_eq!(list.len(), 2);

        let mut backend = RecordingBackend::default();
        list.replay(&mut backend);

        assert_eq!(backend.events.len(), 3);
        assert_eq!(backend.events[0], Event::FrontFace(Winding::CounterClockwise));
        assert_eq!(backend.events[1], Event::Bind(MaterialState::default()));
        match &backend.events[2] {
            Event::Polygon(corners) => {
                assert_eq!(corners.len(), 4);
                // Corner order preserved from the face definition.
                assert_eq!(corners[0].position, vertices[0]);
                assert_eq!(corners[3].position, vertices[3]);
                assert!(corners[0].normal.is_none());
                assert!(corners[0].tex_coord.is_none());
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_undefined_material_falls_back_to_default() {
        let (vertices, mut faces) = quad_pools();
        faces[0].material = Some("missing".to_string());

        let list = DrawList::compile(&vertices, &[], &[], &faces, &HashMap::new());
        let mut backend = RecordingBackend::default();
        list.replay(&mut backend);

        assert_eq!(backend.events[1], Event::Bind(MaterialState::default()));
    }

    #[test]
    fn test_known_material_binds_color_and_texture() {
        let (vertices, mut faces) = quad_pools();
        faces[0].material = Some("shell".to_string());

        let mut shell = Material::default();
        shell
            .properties
            .insert("Kd".to_string(), MaterialProperty::Scalars(vec![0.1, 0.2, 0.3]));
        shell.texture = TextureHandle(7);

        let mut materials = HashMap::new();
        materials.insert("shell".to_string(), shell);

        let list = DrawList::compile(&vertices, &[], &[], &faces, &materials);
        let mut backend = RecordingBackend::default();
        list.replay(&mut backend);

        assert_eq!(
            backend.events[1],
            Event::Bind(MaterialState {
                color: [0.1, 0.2, 0.3],
                texture: TextureHandle(7),
            })
        );
    }

    #[test]
    fn test_corner_attributes_resolved_from_pools() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let normals = vec![Vector3::new(0.0, 0.0, 1.0)];
        let tex_coords = vec![Point2::new(0.5, 0.5)];
        let faces = vec![Face {
            corners: vec![
                FaceCorner {
                    vertex: 0,
                    tex_coord: Some(0),
                    normal: Some(0),
                },
                FaceCorner {
                    vertex: 1,
                    tex_coord: None,
                    // Out-of-range attribute indices degrade to absent.
                    normal: Some(9),
                },
                FaceCorner {
                    vertex: 2,
                    tex_coord: None,
                    normal: None,
                },
            ],
            material: None,
        }];

        let list = DrawList::compile(&vertices, &normals, &tex_coords, &faces, &HashMap::new());
        let mut backend = RecordingBackend::default();
        list.replay(&mut backend);

        match &backend.events[2] {
            Event::Polygon(corners) => {
                assert_eq!(corners[0].normal, Some(normals[0]));
                assert_eq!(corners[0].tex_coord, Some(tex_coords[0]));
                assert_eq!(corners[1].normal, None);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }
}
