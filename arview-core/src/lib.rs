/// ARView Core Library - Asset ingestion and transform pipeline
///
/// This library provides the stateless core of the AR viewer: OBJ/MTL
/// parsing into renderable models, per-session texture caching, draw-list
/// compilation, and the projection/model matrices that bridge camera
/// calibration and pose estimates into the renderer's coordinate frame.

pub mod calibration;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod mtl;
pub mod obj;
pub mod projection;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use calibration::Calibration;
pub use config::ViewerConfig;
pub use draw::{DrawBackend, DrawCommand, DrawList, DrawVertex, MaterialState, Winding};
pub use error::{Error, Result};
pub use geometry::{Face, FaceCorner, Model};
pub use mtl::{Material, MaterialProperty};
pub use obj::{load_model, LoadOptions};
pub use projection::projection_from_intrinsics;
pub use texture::{HandleAllocator, TextureCache, TextureHandle, TextureUpload};
pub use transform::{compose_model, model_from_pose};
